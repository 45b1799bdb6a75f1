//! オブジェクトIDと文字列ID

use std::fmt;

/// ヒープ上のオブジェクトID（クラス、インスタンス、配列）
///
/// `0` は null 参照を表す予約値です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// null 参照
    pub const NULL: ObjectId = ObjectId(0);

    /// null 参照かどうか
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// 文字列テーブルのID（クラス名、フィールド名）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(pub u64);

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sentinel() {
        assert!(ObjectId::NULL.is_null());
        assert!(ObjectId::default().is_null());
        assert!(!ObjectId(0x10).is_null());
        assert_eq!(format!("{}", ObjectId(0xbeef)), "0xbeef");
    }
}
