//! Heapview ビュー階層の再構築
//!
//! このクレートは、解析済みヒープダンプのオブジェクトグラフから、
//! 端末上のビュー階層を型付きのツリーとして再構築します。
//! 必要なクラスとフィールドを名前で一度だけ解決し、スーパークラスの連鎖による
//! 型判定と char 配列からの文字列デコードを組み合わせてツリーを組み立てます。

pub mod error;
pub mod config;
pub mod binding;
pub mod refs;
pub mod subtype;
pub mod text;
pub mod view;
pub mod builder;
pub mod array_map;

pub use error::ViewError;
pub use config::{BuildConfig, MalformedTextPolicy};
pub use binding::{find_class_by_name, find_field_by_name, ClassHandle, FieldHandle};
pub use refs::ViewRefs;
pub use subtype::is_instance_of;
pub use text::{decode_char_buffer, TextDecoder};
pub use view::{Bounds, View, ViewKind};
pub use builder::{build_view_hierarchy, ViewHierarchyBuilder};
pub use array_map::ArrayMapDef;

/// ビュー階層構築の結果型
pub type Result<T> = std::result::Result<T, ViewError>;
