//! `android.util.ArrayMap` インスタンスの読み取り

use crate::binding::{find_class_by_name, find_field_by_name, ClassHandle, FieldHandle};
use crate::subtype::is_instance_of;
use crate::Result;
use heapview_model::{BasicType, Instance, MemoryDump, ObjectId};
use tracing::warn;

pub const ARRAY_MAP_CLASS: &str = "android.util.ArrayMap";

/// ArrayMap のクラス定義
///
/// `mArray` にはキーと値が交互に格納され、先頭の `mSize` 組が有効です。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayMapDef {
    pub class: ClassHandle,
    pub size: FieldHandle,
    pub array: FieldHandle,
}

impl ArrayMapDef {
    pub fn bind(dump: &MemoryDump) -> Result<Self> {
        let class = find_class_by_name(dump, ARRAY_MAP_CLASS)?;
        let size = find_field_by_name(dump, class, "mSize", BasicType::Int)?;
        let array = find_field_by_name(dump, class, "mArray", BasicType::Object)?;
        Ok(Self { class, size, array })
    }

    /// インスタンスが ArrayMap（またはそのサブクラス）か判定する
    pub fn is_array_map(&self, dump: &MemoryDump, instance: &Instance) -> bool {
        is_instance_of(dump, instance, self.class)
    }

    /// キーと値のIDの組を格納順に取得する
    pub fn entries(&self, dump: &MemoryDump, instance: &Instance) -> Result<Vec<(ObjectId, ObjectId)>> {
        let size = self.size.read_int(dump, instance)?.max(0) as usize;
        let array_id = self.array.read_object(dump, instance)?;
        if array_id.is_null() {
            return Ok(Vec::new());
        }

        let Some(array) = dump.object_array(array_id) else {
            warn!("ArrayMap {} storage {} not found", instance.object_id, array_id);
            return Ok(Vec::new());
        };

        let pairs = array.elements.len() / 2;
        if size > pairs {
            warn!(
                "ArrayMap {} reports {} entries but storage holds {}",
                instance.object_id, size, pairs
            );
        }

        Ok(array
            .elements
            .chunks_exact(2)
            .take(size)
            .map(|pair| (pair[0], pair[1]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapview_model::{DumpBuilder, FieldValue};

    #[test]
    fn test_entries() {
        let mut b = DumpBuilder::new(4);
        let map_class = b.class(
            ARRAY_MAP_CLASS,
            ObjectId::NULL,
            &[("mArray", BasicType::Object), ("mSize", BasicType::Int)],
        );
        let key = b.reserve_id();
        let value = b.reserve_id();
        // 容量は3組、有効なのは1組
        let storage = b.object_array(&[key, value, ObjectId::NULL, ObjectId::NULL, ObjectId::NULL, ObjectId::NULL]);
        let map = b.instance(
            map_class,
            &[("mArray", FieldValue::Object(storage)), ("mSize", FieldValue::Int(1))],
        );
        let empty = b.instance(map_class, &[]);
        let dump = b.build().unwrap();

        let def = ArrayMapDef::bind(&dump).unwrap();
        let instance = dump.instance(map).unwrap();
        assert!(def.is_array_map(&dump, instance));
        assert_eq!(def.entries(&dump, instance).unwrap(), vec![(key, value)]);
        assert!(def.entries(&dump, dump.instance(empty).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_size_larger_than_storage() {
        let mut b = DumpBuilder::new(8);
        let map_class = b.class(
            ARRAY_MAP_CLASS,
            ObjectId::NULL,
            &[("mArray", BasicType::Object), ("mSize", BasicType::Int)],
        );
        let storage = b.object_array(&[ObjectId(1), ObjectId(2), ObjectId(3)]);
        let map = b.instance(
            map_class,
            &[("mArray", FieldValue::Object(storage)), ("mSize", FieldValue::Int(5))],
        );
        let dump = b.build().unwrap();

        let def = ArrayMapDef::bind(&dump).unwrap();
        let entries = def.entries(&dump, dump.instance(map).unwrap()).unwrap();
        assert_eq!(entries, vec![(ObjectId(1), ObjectId(2))]);
    }
}
