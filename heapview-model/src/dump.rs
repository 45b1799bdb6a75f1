//! IDでインデックスされたヒープダンプ

use crate::{
    BasicType, ClassDefinition, FieldValue, Instance, ModelError, ObjectArray, ObjectId,
    PrimitiveArray, Result, StringId,
};
use std::collections::HashMap;

/// 解析済みのヒープダンプ
///
/// ダンプの読み込み中に構築され、以降は読み取り専用として扱います。
/// 複数のスレッドから同時に参照しても問題ありません。
#[derive(Debug, Clone)]
pub struct MemoryDump {
    /// IDサイズ（4または8バイト）
    pub id_size: usize,
    /// 文字列テーブル（クラス名・フィールド名）
    pub strings: HashMap<StringId, String>,
    pub classes: HashMap<ObjectId, ClassDefinition>,
    pub instances: HashMap<ObjectId, Instance>,
    pub object_arrays: HashMap<ObjectId, ObjectArray>,
    pub primitive_arrays: HashMap<ObjectId, PrimitiveArray>,
}

impl MemoryDump {
    /// 空のダンプを作成する
    pub fn new(id_size: usize) -> Result<Self> {
        if id_size != 4 && id_size != 8 {
            return Err(ModelError::InvalidIdSize(id_size));
        }
        Ok(Self {
            id_size,
            strings: HashMap::new(),
            classes: HashMap::new(),
            instances: HashMap::new(),
            object_arrays: HashMap::new(),
            primitive_arrays: HashMap::new(),
        })
    }

    pub fn string(&self, id: StringId) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }

    pub fn class(&self, id: ObjectId) -> Option<&ClassDefinition> {
        self.classes.get(&id)
    }

    pub fn instance(&self, id: ObjectId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    pub fn object_array(&self, id: ObjectId) -> Option<&ObjectArray> {
        self.object_arrays.get(&id)
    }

    pub fn primitive_array(&self, id: ObjectId) -> Option<&PrimitiveArray> {
        self.primitive_arrays.get(&id)
    }

    /// クラス名を取得する（文字列テーブルにない場合は None）
    pub fn class_name(&self, class: &ClassDefinition) -> Option<&str> {
        self.string(class.name_id)
    }

    /// インスタンスのクラス名を取得する
    pub fn instance_class_name(&self, instance: &Instance) -> Option<&str> {
        self.class(instance.class_id).and_then(|cls| self.class_name(cls))
    }

    /// インスタンスのフィールド値を読み取る
    ///
    /// フィールドは宣言クラスと、そのクラス内でのインデックスで指定します。
    /// インスタンスのクラスからスーパークラスをたどり、宣言クラスに到達するまでの
    /// 各クラスのフィールドサイズを積算してオフセットを求めます。
    pub fn read_field(
        &self,
        instance: &Instance,
        declaring_class: ObjectId,
        field_index: usize,
    ) -> Result<FieldValue> {
        let not_in_hierarchy = ModelError::FieldNotInHierarchy {
            instance: instance.object_id,
            declaring_class,
        };
        let mut offset = 0;
        let mut current = instance.class_id;
        // 連鎖はクラステーブルより長くならない
        let mut remaining = self.classes.len();

        let field = loop {
            let cls = self
                .class(current)
                .ok_or(ModelError::UnknownClass(current))?;

            if cls.object_id == declaring_class {
                let field = cls.instance_fields.get(field_index).ok_or(
                    ModelError::FieldIndexOutOfRange {
                        class: declaring_class,
                        index: field_index,
                    },
                )?;
                offset += cls.instance_fields[..field_index]
                    .iter()
                    .map(|f| f.ty.size(self.id_size))
                    .sum::<usize>();
                break field;
            }

            offset += cls.fields_size(self.id_size);
            remaining = remaining.checked_sub(1).ok_or_else(|| not_in_hierarchy.clone())?;
            current = cls.super_class().ok_or_else(|| not_in_hierarchy.clone())?;
        };

        let size = field.ty.size(self.id_size);
        let bytes = instance
            .data
            .get(offset..offset + size)
            .ok_or(ModelError::FieldOutOfBounds {
                instance: instance.object_id,
                offset,
                size,
                len: instance.data.len(),
            })?;

        FieldValue::decode(field.ty, bytes)
    }

    /// int型フィールドを読み取る
    pub fn read_int(
        &self,
        instance: &Instance,
        declaring_class: ObjectId,
        field_index: usize,
    ) -> Result<i32> {
        self.read_field(instance, declaring_class, field_index)?.as_int()
    }

    /// オブジェクト参照フィールドを読み取る
    pub fn read_object(
        &self,
        instance: &Instance,
        declaring_class: ObjectId,
        field_index: usize,
    ) -> Result<ObjectId> {
        self.read_field(instance, declaring_class, field_index)?.as_object()
    }

    /// 指定クラスのフィールド宣言の型を取得する
    pub fn field_type(&self, class: ObjectId, field_index: usize) -> Option<BasicType> {
        self.class(class)
            .and_then(|cls| cls.instance_fields.get(field_index))
            .map(|f| f.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DumpBuilder;

    fn sample_dump() -> (MemoryDump, ObjectId, ObjectId, ObjectId) {
        let mut b = DumpBuilder::new(4);
        let base = b.class(
            "Base",
            ObjectId::NULL,
            &[("a", BasicType::Int), ("flag", BasicType::Boolean)],
        );
        let derived = b.class("Derived", base, &[("ref", BasicType::Object), ("b", BasicType::Int)]);
        let inst = b.instance(
            derived,
            &[
                ("a", FieldValue::Int(7)),
                ("flag", FieldValue::Boolean(true)),
                ("ref", FieldValue::Object(ObjectId(0x99))),
                ("b", FieldValue::Int(-3)),
            ],
        );
        (b.build().unwrap(), base, derived, inst)
    }

    #[test]
    fn test_read_inherited_and_own_fields() {
        let (dump, base, derived, inst) = sample_dump();
        let instance = dump.instance(inst).unwrap();

        // 自クラス: ref(4) + b(4)、続いてBase: a(4) + flag(1)
        assert_eq!(instance.data.len(), 13);
        assert_eq!(dump.read_object(instance, derived, 0).unwrap(), ObjectId(0x99));
        assert_eq!(dump.read_int(instance, derived, 1).unwrap(), -3);
        assert_eq!(dump.read_int(instance, base, 0).unwrap(), 7);
        assert_eq!(
            dump.read_field(instance, base, 1).unwrap(),
            FieldValue::Boolean(true)
        );
        assert_eq!(dump.instance_class_name(instance), Some("Derived"));
    }

    #[test]
    fn test_read_field_errors() {
        let (dump, base, _derived, inst) = sample_dump();
        let instance = dump.instance(inst).unwrap();

        assert!(matches!(
            dump.read_field(instance, ObjectId(0x1234), 0),
            Err(ModelError::FieldNotInHierarchy { .. })
        ));
        assert!(matches!(
            dump.read_field(instance, base, 5),
            Err(ModelError::FieldIndexOutOfRange { index: 5, .. })
        ));
        assert!(matches!(
            dump.read_int(instance, base, 1),
            Err(ModelError::UnexpectedFieldType { .. })
        ));

        let mut truncated = instance.clone();
        truncated.data.truncate(10);
        assert!(matches!(
            dump.read_int(&truncated, base, 0),
            Err(ModelError::FieldOutOfBounds { offset: 8, size: 4, len: 10, .. })
        ));
    }

    #[test]
    fn test_super_class_loop_is_not_in_hierarchy() {
        let mut b = DumpBuilder::new(4);
        let other = b.class("Other", ObjectId::NULL, &[("x", BasicType::Int)]);
        let looped = b.class("Loop", ObjectId::NULL, &[("y", BasicType::Int)]);
        let inst = b.instance(looped, &[("y", FieldValue::Int(2))]);
        let mut dump = b.build().unwrap();
        dump.classes.get_mut(&looped).unwrap().super_class_id = looped;
        let instance = dump.instance(inst).unwrap();

        assert_eq!(dump.read_int(instance, looped, 0).unwrap(), 2);
        assert_eq!(
            dump.read_int(instance, other, 0),
            Err(ModelError::FieldNotInHierarchy {
                instance: inst,
                declaring_class: other,
            })
        );
    }

    #[test]
    fn test_invalid_id_size() {
        assert!(matches!(MemoryDump::new(2), Err(ModelError::InvalidIdSize(2))));
        assert!(MemoryDump::new(8).is_ok());
    }
}
