//! メモリ上でのヒープダンプ構築
//!
//! バイナリのダンプを読み込まずに、クラス・インスタンス・配列を組み立てて
//! `MemoryDump` を作成します。インスタンスのフィールドデータはダンプと同じ順序
//! （自クラス → スーパークラス、各クラス内は宣言順、ビッグエンディアン）でエンコードされます。

use crate::{
    BasicType, ClassDefinition, FieldValue, Instance, InstanceField, MemoryDump, ObjectArray,
    ObjectId, PrimitiveArray, Result, StringId,
};
use std::collections::HashMap;
use tracing::warn;

/// 割り当てるオブジェクトIDの開始値
const FIRST_OBJECT_ID: u64 = 0x1000;

/// ダンプビルダー
pub struct DumpBuilder {
    id_size: usize,
    next_id: u64,
    next_string_id: u64,
    string_ids: HashMap<String, StringId>,
    strings: HashMap<StringId, String>,
    classes: HashMap<ObjectId, ClassDefinition>,
    instances: HashMap<ObjectId, Instance>,
    object_arrays: HashMap<ObjectId, ObjectArray>,
    primitive_arrays: HashMap<ObjectId, PrimitiveArray>,
}

impl DumpBuilder {
    /// 新しいビルダーを作成する
    ///
    /// `id_size` は `build` で検証されます。
    pub fn new(id_size: usize) -> Self {
        Self {
            id_size,
            next_id: FIRST_OBJECT_ID,
            next_string_id: 1,
            string_ids: HashMap::new(),
            strings: HashMap::new(),
            classes: HashMap::new(),
            instances: HashMap::new(),
            object_arrays: HashMap::new(),
            primitive_arrays: HashMap::new(),
        }
    }

    /// 未使用のオブジェクトIDを予約する
    pub fn reserve_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 8;
        id
    }

    /// 文字列テーブルに登録する（同じ文字列には同じIDを返す）
    pub fn string(&mut self, value: &str) -> StringId {
        if let Some(id) = self.string_ids.get(value) {
            return *id;
        }
        let id = StringId(self.next_string_id);
        self.next_string_id += 1;
        self.string_ids.insert(value.to_string(), id);
        self.strings.insert(id, value.to_string());
        id
    }

    /// クラスを定義する
    ///
    /// `fields` はこのクラス自身が宣言するフィールドのみ。
    pub fn class(
        &mut self,
        name: &str,
        super_class_id: ObjectId,
        fields: &[(&str, BasicType)],
    ) -> ObjectId {
        let object_id = self.reserve_id();
        let name_id = self.string(name);
        let instance_fields = fields
            .iter()
            .map(|(field_name, ty)| InstanceField {
                name_id: self.string(field_name),
                ty: *ty,
            })
            .collect();

        self.classes.insert(
            object_id,
            ClassDefinition {
                object_id,
                super_class_id,
                name_id,
                instance_fields,
            },
        );
        object_id
    }

    /// インスタンスを作成する
    ///
    /// 値はフィールド名で指定します。指定のないフィールド、型が一致しないフィールドはゼロで埋めます。
    /// 同名のフィールドが階層内に複数ある場合、同じ値がそれぞれに書き込まれます。
    pub fn instance(&mut self, class_id: ObjectId, values: &[(&str, FieldValue)]) -> ObjectId {
        let id = self.reserve_id();
        self.instance_at(id, class_id, values);
        id
    }

    /// 予約済みのIDでインスタンスを作成する
    pub fn instance_at(&mut self, object_id: ObjectId, class_id: ObjectId, values: &[(&str, FieldValue)]) {
        let data = self.encode_fields(class_id, values);
        self.instance_with_data(object_id, class_id, data);
    }

    /// 生のフィールドデータでインスタンスを作成する
    pub fn instance_with_data(&mut self, object_id: ObjectId, class_id: ObjectId, data: Vec<u8>) {
        self.instances.insert(
            object_id,
            Instance {
                object_id,
                class_id,
                data,
            },
        );
    }

    /// オブジェクト配列を作成する
    pub fn object_array(&mut self, elements: &[ObjectId]) -> ObjectId {
        let id = self.reserve_id();
        self.object_array_at(id, elements);
        id
    }

    /// 予約済みのIDでオブジェクト配列を作成する
    pub fn object_array_at(&mut self, object_id: ObjectId, elements: &[ObjectId]) {
        self.object_arrays.insert(
            object_id,
            ObjectArray {
                object_id,
                element_class_id: ObjectId::NULL,
                elements: elements.to_vec(),
            },
        );
    }

    /// プリミティブ配列を作成する
    pub fn primitive_array(&mut self, ty: BasicType, data: Vec<u8>) -> ObjectId {
        let object_id = self.reserve_id();
        self.primitive_arrays
            .insert(object_id, PrimitiveArray { object_id, ty, data });
        object_id
    }

    /// 文字列をUTF-16ビッグエンディアンの char 配列として作成する
    pub fn char_array(&mut self, text: &str) -> ObjectId {
        let data = text
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect();
        self.primitive_array(BasicType::Char, data)
    }

    /// ダンプを構築する
    pub fn build(self) -> Result<MemoryDump> {
        let mut dump = MemoryDump::new(self.id_size)?;
        dump.strings = self.strings;
        dump.classes = self.classes;
        dump.instances = self.instances;
        dump.object_arrays = self.object_arrays;
        dump.primitive_arrays = self.primitive_arrays;
        Ok(dump)
    }

    /// クラス階層に沿ってフィールド値をエンコードする
    fn encode_fields(&self, class_id: ObjectId, values: &[(&str, FieldValue)]) -> Vec<u8> {
        let mut data = Vec::new();
        let mut current = Some(class_id);
        // 連鎖はクラステーブルより長くならない
        let mut remaining = self.classes.len();

        while let Some(cls) = current.and_then(|id| self.classes.get(&id)) {
            if remaining == 0 {
                warn!("Super class chain of {} does not terminate", class_id);
                break;
            }
            remaining -= 1;
            for field in &cls.instance_fields {
                let name = self.strings.get(&field.name_id).map(String::as_str);
                let value = values
                    .iter()
                    .find(|(n, _)| Some(*n) == name)
                    .map(|(_, v)| *v);

                let value = match value {
                    Some(v) if v.basic_type() == field.ty => v,
                    Some(v) => {
                        warn!(
                            "Field {:?} is declared as {} but got {}, writing zero",
                            name,
                            field.ty,
                            v.basic_type()
                        );
                        zero_value(field.ty)
                    }
                    None => zero_value(field.ty),
                };
                value.encode(self.id_size, &mut data);
            }
            current = cls.super_class();
        }

        data
    }
}

/// 型ごとのゼロ値
fn zero_value(ty: BasicType) -> FieldValue {
    match ty {
        BasicType::Object => FieldValue::Object(ObjectId::NULL),
        BasicType::Boolean => FieldValue::Boolean(false),
        BasicType::Char => FieldValue::Char(0),
        BasicType::Float => FieldValue::Float(0.0),
        BasicType::Double => FieldValue::Double(0.0),
        BasicType::Byte => FieldValue::Byte(0),
        BasicType::Short => FieldValue::Short(0),
        BasicType::Int => FieldValue::Int(0),
        BasicType::Long => FieldValue::Long(0),
    }
}
