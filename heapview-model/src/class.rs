//! クラス定義

use crate::{BasicType, ObjectId, StringId};

/// インスタンスフィールドの宣言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceField {
    /// フィールド名（文字列テーブルID）
    pub name_id: StringId,
    /// 宣言された型
    pub ty: BasicType,
}

/// クラス定義
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    pub object_id: ObjectId,
    /// スーパークラスのID（ルートクラスでは null）
    pub super_class_id: ObjectId,
    /// クラス名（文字列テーブルID）
    pub name_id: StringId,
    /// このクラス自身が宣言するインスタンスフィールド（継承分を含まない）
    pub instance_fields: Vec<InstanceField>,
}

impl ClassDefinition {
    /// スーパークラスのIDを取得する
    pub fn super_class(&self) -> Option<ObjectId> {
        if self.super_class_id.is_null() {
            None
        } else {
            Some(self.super_class_id)
        }
    }

    /// このクラス自身のフィールドがインスタンスデータ内で占めるバイト数
    pub fn fields_size(&self, id_size: usize) -> usize {
        self.instance_fields.iter().map(|f| f.ty.size(id_size)).sum()
    }
}
