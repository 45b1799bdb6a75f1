//! クラスとフィールドの名前による解決
//!
//! ダンプ内のクラス・フィールドは型ではなくデータとして表現されているため、
//! 名前（フィールドは名前と型）で一度だけ検索し、以降はハンドルを使ってアクセスします。

use crate::{Result, ViewError};
use heapview_model::{BasicType, ClassDefinition, Instance, MemoryDump, ObjectId};
use tracing::debug;

/// 解決済みのクラス
///
/// 同一性はクラスのオブジェクトIDで比較します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassHandle(ObjectId);

impl ClassHandle {
    /// クラスのオブジェクトID
    pub fn id(self) -> ObjectId {
        self.0
    }

    /// クラス定義を取得する
    pub fn definition(self, dump: &MemoryDump) -> Option<&ClassDefinition> {
        dump.class(self.0)
    }
}

/// 解決済みのフィールド（宣言クラスとその中でのインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle {
    pub class: ClassHandle,
    pub index: usize,
    pub ty: BasicType,
}

impl FieldHandle {
    /// int型フィールドを読み取る
    pub fn read_int(&self, dump: &MemoryDump, instance: &Instance) -> Result<i32> {
        Ok(dump.read_int(instance, self.class.id(), self.index)?)
    }

    /// オブジェクト参照フィールドを読み取る
    pub fn read_object(&self, dump: &MemoryDump, instance: &Instance) -> Result<ObjectId> {
        Ok(dump.read_object(instance, self.class.id(), self.index)?)
    }
}

/// クラス名が完全一致するクラスを検索する
pub fn find_class_by_name(dump: &MemoryDump, name: &str) -> Result<ClassHandle> {
    dump.classes
        .values()
        .find(|cls| dump.class_name(cls) == Some(name))
        .map(|cls| {
            debug!("Resolved class {} -> {}", name, cls.object_id);
            ClassHandle(cls.object_id)
        })
        .ok_or_else(|| ViewError::MissingClass(name.to_string()))
}

/// クラス自身が宣言するフィールドを名前と型で検索する
///
/// 継承したフィールドは対象外です。名前が一致しても型が異なれば見つからない扱いになります。
pub fn find_field_by_name(
    dump: &MemoryDump,
    class: ClassHandle,
    name: &str,
    ty: BasicType,
) -> Result<FieldHandle> {
    let missing = || ViewError::MissingField {
        class: class_label(dump, class),
        name: name.to_string(),
        ty,
    };

    let cls = class.definition(dump).ok_or_else(missing)?;
    let index = cls
        .instance_fields
        .iter()
        .position(|field| field.ty == ty && dump.string(field.name_id) == Some(name))
        .ok_or_else(missing)?;

    debug!("Resolved field {}.{} ({}) at index {}", class_label(dump, class), name, ty, index);
    Ok(FieldHandle { class, index, ty })
}

/// エラー・ログ表示用のクラス名
fn class_label(dump: &MemoryDump, class: ClassHandle) -> String {
    class
        .definition(dump)
        .and_then(|cls| dump.class_name(cls))
        .map(str::to_string)
        .unwrap_or_else(|| class.id().to_string())
}
