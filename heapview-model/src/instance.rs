//! インスタンスとフィールド値

use crate::{BasicType, ModelError, ObjectId, Result};
use std::fmt;

/// インスタンス
#[derive(Debug, Clone)]
pub struct Instance {
    pub object_id: ObjectId,
    pub class_id: ObjectId,
    /// フィールド値の格納領域
    ///
    /// インスタンス自身のクラスのフィールドが先頭に並び、続いてスーパークラスを
    /// 順にたどった各クラスのフィールドが宣言順に並びます（ビッグエンディアン）。
    pub data: Vec<u8>,
}

/// 型付きのフィールド値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Object(ObjectId),
    Boolean(bool),
    /// UTF-16コード単位
    Char(u16),
    Float(f32),
    Double(f64),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
}

impl FieldValue {
    /// バイト列を指定の型としてデコードする
    ///
    /// `bytes` は `ty.size(id_size)` バイトちょうどであること。
    pub(crate) fn decode(ty: BasicType, bytes: &[u8]) -> Result<Self> {
        let value = match ty {
            BasicType::Object => match bytes.len() {
                4 => FieldValue::Object(ObjectId(u32::from_be_bytes(be_array(bytes)) as u64)),
                8 => FieldValue::Object(ObjectId(u64::from_be_bytes(be_array(bytes)))),
                n => return Err(ModelError::InvalidIdSize(n)),
            },
            BasicType::Boolean => FieldValue::Boolean(bytes[0] != 0),
            BasicType::Char => FieldValue::Char(u16::from_be_bytes(be_array(bytes))),
            BasicType::Float => FieldValue::Float(f32::from_be_bytes(be_array(bytes))),
            BasicType::Double => FieldValue::Double(f64::from_be_bytes(be_array(bytes))),
            BasicType::Byte => FieldValue::Byte(bytes[0] as i8),
            BasicType::Short => FieldValue::Short(i16::from_be_bytes(be_array(bytes))),
            BasicType::Int => FieldValue::Int(i32::from_be_bytes(be_array(bytes))),
            BasicType::Long => FieldValue::Long(i64::from_be_bytes(be_array(bytes))),
        };
        Ok(value)
    }

    /// 値を指定のIDサイズでエンコードする
    pub(crate) fn encode(&self, id_size: usize, out: &mut Vec<u8>) {
        match *self {
            FieldValue::Object(id) => {
                if id_size == 4 {
                    out.extend_from_slice(&(id.0 as u32).to_be_bytes());
                } else {
                    out.extend_from_slice(&id.0.to_be_bytes());
                }
            }
            FieldValue::Boolean(v) => out.push(v as u8),
            FieldValue::Char(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Float(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Double(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Byte(v) => out.push(v as u8),
            FieldValue::Short(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    /// 値の型
    pub fn basic_type(&self) -> BasicType {
        match self {
            FieldValue::Object(_) => BasicType::Object,
            FieldValue::Boolean(_) => BasicType::Boolean,
            FieldValue::Char(_) => BasicType::Char,
            FieldValue::Float(_) => BasicType::Float,
            FieldValue::Double(_) => BasicType::Double,
            FieldValue::Byte(_) => BasicType::Byte,
            FieldValue::Short(_) => BasicType::Short,
            FieldValue::Int(_) => BasicType::Int,
            FieldValue::Long(_) => BasicType::Long,
        }
    }

    /// int値として取得する
    pub fn as_int(&self) -> Result<i32> {
        match self {
            FieldValue::Int(v) => Ok(*v),
            other => Err(ModelError::UnexpectedFieldType {
                expected: BasicType::Int,
                found: other.basic_type(),
            }),
        }
    }

    /// オブジェクト参照として取得する
    pub fn as_object(&self) -> Result<ObjectId> {
        match self {
            FieldValue::Object(id) => Ok(*id),
            other => Err(ModelError::UnexpectedFieldType {
                expected: BasicType::Object,
                found: other.basic_type(),
            }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Object(id) => write!(f, "{}", id),
            FieldValue::Boolean(v) => write!(f, "{}", v),
            FieldValue::Char(v) => match char::from_u32(*v as u32) {
                Some(c) => write!(f, "'{}'", c),
                None => write!(f, "'\\u{{{:04x}}}'", v),
            },
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Double(v) => write!(f, "{}", v),
            FieldValue::Byte(v) => write!(f, "{}", v),
            FieldValue::Short(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Long(v) => write!(f, "{}", v),
        }
    }
}

/// スライスを固定長配列にコピーする（長さは呼び出し側で保証済み）
fn be_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut array = [0u8; N];
    array.copy_from_slice(&bytes[..N]);
    array
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_big_endian() {
        let val = FieldValue::decode(BasicType::Int, &[0x00, 0x00, 0x01, 0x02]).unwrap();
        assert_eq!(val, FieldValue::Int(0x0102));

        let val = FieldValue::decode(BasicType::Int, &(-5i32).to_be_bytes()).unwrap();
        assert_eq!(val.as_int().unwrap(), -5);

        let val = FieldValue::decode(BasicType::Char, &[0x00, 0x48]).unwrap();
        assert_eq!(val, FieldValue::Char(0x48));
    }

    #[test]
    fn test_decode_object_id_sizes() {
        let val = FieldValue::decode(BasicType::Object, &[0, 0, 0x12, 0x34]).unwrap();
        assert_eq!(val.as_object().unwrap(), ObjectId(0x1234));

        let val = FieldValue::decode(BasicType::Object, &0x7f00_0000_0001u64.to_be_bytes()).unwrap();
        assert_eq!(val.as_object().unwrap(), ObjectId(0x7f00_0000_0001));

        assert!(matches!(
            FieldValue::decode(BasicType::Object, &[0, 1]),
            Err(ModelError::InvalidIdSize(2))
        ));
    }

    #[test]
    fn test_encode_matches_decode_layout() {
        let mut out = Vec::new();
        FieldValue::Object(ObjectId(0x20)).encode(4, &mut out);
        FieldValue::Short(-2).encode(4, &mut out);
        assert_eq!(out, vec![0, 0, 0, 0x20, 0xff, 0xfe]);
    }

    #[test]
    fn test_type_mismatch() {
        let err = FieldValue::Long(1).as_int().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnexpectedFieldType {
                expected: BasicType::Int,
                found: BasicType::Long,
            }
        );
        assert!(FieldValue::Int(1).as_object().is_err());
    }
}
