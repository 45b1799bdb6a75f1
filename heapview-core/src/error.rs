//! ビュー階層構築のエラー

use heapview_model::{BasicType, ModelError, ObjectId};
use thiserror::Error;

/// ビュー階層構築時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// 必要なクラスがダンプ内に見つからない
    #[error("No class with name {0} found")]
    MissingClass(String),

    /// 必要なフィールドが宣言クラスに見つからない（名前と型の両方で照合）
    #[error("Field {name} ({ty}) not found in class {class}")]
    MissingField {
        class: String,
        name: String,
        ty: BasicType,
    },

    /// String の内部バッファが char 配列ではない
    #[error("String {string} value buffer is {found}[] (expected char[])")]
    MalformedTextBuffer { string: ObjectId, found: BasicType },

    /// String の内部バッファの長さが奇数
    #[error("String {string} value buffer has odd length {len}")]
    OddTextBuffer { string: ObjectId, len: usize },

    /// String の内部バッファが解決できない
    #[error("String {string} value buffer {array} not found")]
    MissingTextBuffer { string: ObjectId, array: ObjectId },

    /// 走査中のパス上で同じインスタンスを再訪した
    #[error("Cyclic reference to instance {0}")]
    CyclicReference(ObjectId),

    /// 設定された最大深さを超えた
    #[error("View hierarchy deeper than {0}")]
    DepthLimitExceeded(usize),

    /// ルートインスタンスが存在しない
    #[error("Root instance {0} not found")]
    MissingRoot(ObjectId),

    /// モデルへのアクセスエラー
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ViewError {
    /// テキストのデコードに起因するエラーかどうか
    ///
    /// これらは `MalformedTextPolicy::Placeholder` でノード単位に置き換えられます。
    pub fn is_text_error(&self) -> bool {
        matches!(
            self,
            ViewError::MalformedTextBuffer { .. }
                | ViewError::OddTextBuffer { .. }
                | ViewError::MissingTextBuffer { .. }
        )
    }
}
