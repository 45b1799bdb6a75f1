//! スーパークラスの連鎖による型判定

use crate::binding::ClassHandle;
use heapview_model::{Instance, MemoryDump, ObjectId};

/// インスタンスが指定クラス（またはそのサブクラス）のものか判定する
pub fn is_instance_of(dump: &MemoryDump, instance: &Instance, class: ClassHandle) -> bool {
    is_subclass_of(dump, instance.class_id, class)
}

/// クラスが指定クラス自身またはそのサブクラスか判定する
///
/// クラスIDの同一性で比較し、スーパークラスをたどります。
/// 解決できないスーパークラスIDに到達した場合は一致なしとして扱います。
pub fn is_subclass_of(dump: &MemoryDump, class_id: ObjectId, of: ClassHandle) -> bool {
    let mut current = dump.class(class_id);
    // 連鎖はクラステーブルより長くならない
    let mut remaining = dump.classes.len();

    while let Some(cls) = current {
        if cls.object_id == of.id() {
            return true;
        }
        if remaining == 0 {
            break;
        }
        remaining -= 1;
        current = cls.super_class().and_then(|id| dump.class(id));
    }

    false
}
