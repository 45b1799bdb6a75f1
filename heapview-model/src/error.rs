//! ヒープダンプモデルのエラー

use crate::{BasicType, ObjectId};
use thiserror::Error;

/// モデルへのアクセス時に発生するエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// クラスIDが解決できない
    #[error("Unknown class {0}")]
    UnknownClass(ObjectId),

    /// 宣言クラスがインスタンスのクラス階層に存在しない
    #[error("Class {declaring_class} is not in the hierarchy of instance {instance}")]
    FieldNotInHierarchy {
        instance: ObjectId,
        declaring_class: ObjectId,
    },

    /// フィールドインデックスが宣言クラスの範囲外
    #[error("Field index {index} out of range for class {class}")]
    FieldIndexOutOfRange { class: ObjectId, index: usize },

    /// インスタンスデータがフィールドを読むのに足りない
    #[error("Field at offset {offset} (size {size}) exceeds {len} bytes of instance {instance}")]
    FieldOutOfBounds {
        instance: ObjectId,
        offset: usize,
        size: usize,
        len: usize,
    },

    /// フィールドの型が期待と異なる
    #[error("Expected {expected} field, found {found}")]
    UnexpectedFieldType { expected: BasicType, found: BasicType },

    /// IDサイズが4または8ではない
    #[error("Invalid identifier size {0}")]
    InvalidIdSize(usize),

    /// 未知の型タグ
    #[error("Unknown basic type tag {0}")]
    UnknownTypeTag(u8),
}
