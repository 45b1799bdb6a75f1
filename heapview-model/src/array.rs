//! オブジェクト配列とプリミティブ配列

use crate::{BasicType, ObjectId};

/// オブジェクト配列
#[derive(Debug, Clone)]
pub struct ObjectArray {
    pub object_id: ObjectId,
    pub element_class_id: ObjectId,
    /// 要素のID（null を含み得る）
    pub elements: Vec<ObjectId>,
}

/// プリミティブ配列
#[derive(Debug, Clone)]
pub struct PrimitiveArray {
    pub object_id: ObjectId,
    /// 要素型
    pub ty: BasicType,
    /// 生のバイト列（ビッグエンディアン）
    pub data: Vec<u8>,
}

impl PrimitiveArray {
    /// 要素数
    ///
    /// 要素型がオブジェクト型の場合は0を返します。
    pub fn len(&self) -> usize {
        match self.ty {
            BasicType::Object => 0,
            ty => self.data.len() / ty.size(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
