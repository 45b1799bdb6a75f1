//! Android のビュークラスを模したダンプのフィクスチャ

#![allow(dead_code)]

use heapview_core::Bounds;
use heapview_model::{BasicType, DumpBuilder, FieldValue, MemoryDump, ObjectId};

/// テストログを有効にする（`RUST_LOG=debug cargo test` で表示）
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// スキーマの生成オプション
#[derive(Debug, Clone, Copy)]
pub struct SchemaOptions {
    pub id_size: usize,
    /// 省略するクラス名、または `クラス名.フィールド名`
    pub omit: Option<&'static str>,
    /// TextView を ViewGroup のサブクラスにする
    pub text_view_extends_group: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            id_size: 4,
            omit: None,
            text_view_extends_group: false,
        }
    }
}

pub struct AndroidDump {
    pub b: DumpBuilder,
    pub object: ObjectId,
    pub view: ObjectId,
    pub view_group: ObjectId,
    pub text_view: ObjectId,
    pub string: ObjectId,
    pub linear_layout: ObjectId,
    pub frame_layout: ObjectId,
    pub image_view: ObjectId,
    pub spannable: ObjectId,
}

impl AndroidDump {
    pub fn new() -> Self {
        Self::with_options(SchemaOptions::default())
    }

    pub fn with_options(opts: SchemaOptions) -> Self {
        let mut b = DumpBuilder::new(opts.id_size);
        let omit = opts.omit.unwrap_or("");

        let object = define_class(&mut b, omit, "java.lang.Object", ObjectId::NULL, &[]);
        let view = define_class(
            &mut b,
            omit,
            "android.view.View",
            object,
            &[
                ("mParent", BasicType::Object),
                ("mLeft", BasicType::Int),
                ("mRight", BasicType::Int),
                ("mTop", BasicType::Int),
                ("mBottom", BasicType::Int),
                ("mAlpha", BasicType::Float),
            ],
        );
        let view_group = define_class(
            &mut b,
            omit,
            "android.view.ViewGroup",
            view,
            &[("mChildrenCount", BasicType::Int), ("mChildren", BasicType::Object)],
        );
        let text_view_super = if opts.text_view_extends_group { view_group } else { view };
        let text_view = define_class(
            &mut b,
            omit,
            "android.widget.TextView",
            text_view_super,
            &[("mText", BasicType::Object), ("mGravity", BasicType::Int)],
        );
        let string = define_class(
            &mut b,
            omit,
            "java.lang.String",
            object,
            &[("hash", BasicType::Int), ("value", BasicType::Object)],
        );
        let linear_layout = define_class(&mut b, omit, "android.widget.LinearLayout", view_group, &[]);
        let frame_layout = define_class(&mut b, omit, "android.widget.FrameLayout", view_group, &[]);
        let image_view = define_class(&mut b, omit, "android.widget.ImageView", view, &[]);
        let spannable = define_class(&mut b, omit, "android.text.SpannableString", object, &[]);

        Self {
            b,
            object,
            view,
            view_group,
            text_view,
            string,
            linear_layout,
            frame_layout,
            image_view,
            spannable,
        }
    }

    /// 子を持たないビューを作成する
    pub fn view(&mut self, class: ObjectId, bounds: Bounds) -> ObjectId {
        self.b.instance(class, &bounds_fields(bounds))
    }

    /// 子ビュー配列を持つコンテナを作成する
    pub fn group(&mut self, class: ObjectId, bounds: Bounds, children: &[ObjectId]) -> ObjectId {
        let array = self.b.object_array(children);
        self.group_with_array(class, bounds, array)
    }

    /// 子ビュー配列のIDを直接指定してコンテナを作成する
    pub fn group_with_array(&mut self, class: ObjectId, bounds: Bounds, array: ObjectId) -> ObjectId {
        let mut fields = bounds_fields(bounds);
        fields.push(("mChildren", FieldValue::Object(array)));
        self.b.instance(class, &fields)
    }

    /// java.lang.String を作成する
    pub fn string(&mut self, text: &str) -> ObjectId {
        let value = self.b.char_array(text);
        self.string_with_value(value)
    }

    pub fn string_with_value(&mut self, value: ObjectId) -> ObjectId {
        let class = self.string;
        self.b.instance(class, &[("value", FieldValue::Object(value))])
    }

    /// テキストオブジェクトを指定して TextView を作成する
    pub fn text_view_with(&mut self, bounds: Bounds, text: ObjectId) -> ObjectId {
        let mut fields = bounds_fields(bounds);
        fields.push(("mText", FieldValue::Object(text)));
        let class = self.text_view;
        self.b.instance(class, &fields)
    }

    /// String のテキストを持つ TextView を作成する
    pub fn text_view(&mut self, bounds: Bounds, text: &str) -> ObjectId {
        let string = self.string(text);
        self.text_view_with(bounds, string)
    }

    pub fn build(self) -> MemoryDump {
        self.b.build().expect("valid id size")
    }
}

/// クラスを定義する（`omit` に一致するクラスは別名に、フィールドは除外する）
fn define_class(
    b: &mut DumpBuilder,
    omit: &str,
    name: &str,
    super_class: ObjectId,
    fields: &[(&str, BasicType)],
) -> ObjectId {
    let fields: Vec<(&str, BasicType)> = fields
        .iter()
        .filter(|(field, _)| omit != format!("{}.{}", name, field))
        .copied()
        .collect();
    if omit == name {
        b.class(&format!("{}$Omitted", name), super_class, &fields)
    } else {
        b.class(name, super_class, &fields)
    }
}

fn bounds_fields(bounds: Bounds) -> Vec<(&'static str, FieldValue)> {
    vec![
        ("mLeft", FieldValue::Int(bounds.left)),
        ("mRight", FieldValue::Int(bounds.right)),
        ("mTop", FieldValue::Int(bounds.top)),
        ("mBottom", FieldValue::Int(bounds.bottom)),
    ]
}
