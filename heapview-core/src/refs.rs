//! ビュー階層の構築に必要なクラスとフィールドのバインディング

use crate::binding::{find_class_by_name, find_field_by_name, ClassHandle, FieldHandle};
use crate::Result;
use heapview_model::{BasicType, MemoryDump};
use tracing::debug;

pub const VIEW_CLASS: &str = "android.view.View";
pub const VIEW_GROUP_CLASS: &str = "android.view.ViewGroup";
pub const TEXT_VIEW_CLASS: &str = "android.widget.TextView";
pub const STRING_CLASS: &str = "java.lang.String";

pub const VIEW_LEFT_FIELD: &str = "mLeft";
pub const VIEW_RIGHT_FIELD: &str = "mRight";
pub const VIEW_TOP_FIELD: &str = "mTop";
pub const VIEW_BOTTOM_FIELD: &str = "mBottom";
pub const VIEW_GROUP_CHILDREN_FIELD: &str = "mChildren";
pub const TEXT_VIEW_TEXT_FIELD: &str = "mText";
pub const STRING_VALUE_FIELD: &str = "value";

/// 解決済みのクラス・フィールドハンドル一式
///
/// 同じダンプに対してのみ有効です。ダンプにのみ依存するため、
/// 一度解決すれば複数の構築で読み取り専用として共有できます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRefs {
    pub view_class: ClassHandle,
    pub view_group_class: ClassHandle,
    pub text_view_class: ClassHandle,
    pub string_class: ClassHandle,

    pub view_left_field: FieldHandle,
    pub view_right_field: FieldHandle,
    pub view_top_field: FieldHandle,
    pub view_bottom_field: FieldHandle,
    pub view_group_children_field: FieldHandle,
    pub text_view_text_field: FieldHandle,
    pub string_value_field: FieldHandle,
}

impl ViewRefs {
    /// ダンプから全てのハンドルを解決する
    ///
    /// 一つでも見つからなければエラーを返します。
    pub fn bind(dump: &MemoryDump) -> Result<Self> {
        let view_class = find_class_by_name(dump, VIEW_CLASS)?;
        let view_group_class = find_class_by_name(dump, VIEW_GROUP_CLASS)?;
        let text_view_class = find_class_by_name(dump, TEXT_VIEW_CLASS)?;
        let string_class = find_class_by_name(dump, STRING_CLASS)?;

        let field = |class, name| find_field_by_name(dump, class, name, BasicType::Int);
        let view_left_field = field(view_class, VIEW_LEFT_FIELD)?;
        let view_right_field = field(view_class, VIEW_RIGHT_FIELD)?;
        let view_top_field = field(view_class, VIEW_TOP_FIELD)?;
        let view_bottom_field = field(view_class, VIEW_BOTTOM_FIELD)?;

        let view_group_children_field = find_field_by_name(
            dump,
            view_group_class,
            VIEW_GROUP_CHILDREN_FIELD,
            BasicType::Object,
        )?;
        let text_view_text_field =
            find_field_by_name(dump, text_view_class, TEXT_VIEW_TEXT_FIELD, BasicType::Object)?;
        let string_value_field =
            find_field_by_name(dump, string_class, STRING_VALUE_FIELD, BasicType::Object)?;

        debug!("Bound view classes and fields");

        Ok(Self {
            view_class,
            view_group_class,
            text_view_class,
            string_class,
            view_left_field,
            view_right_field,
            view_top_field,
            view_bottom_field,
            view_group_children_field,
            text_view_text_field,
            string_value_field,
        })
    }
}
