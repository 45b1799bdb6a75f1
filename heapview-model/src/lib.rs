//! Heapview ヒープダンプモデル
//!
//! このクレートは、解析済みヒープダンプのオブジェクトグラフを表現します。
//! クラス定義、インスタンス、オブジェクト配列、プリミティブ配列、文字列テーブルを
//! IDをキーとするマップとして保持し、インスタンスのフィールド値を型付きで読み取ります。

pub mod ids;
pub mod basic_type;
pub mod class;
pub mod instance;
pub mod array;
pub mod dump;
pub mod builder;
pub mod error;

pub use ids::{ObjectId, StringId};
pub use basic_type::BasicType;
pub use class::{ClassDefinition, InstanceField};
pub use instance::{FieldValue, Instance};
pub use array::{ObjectArray, PrimitiveArray};
pub use dump::MemoryDump;
pub use builder::DumpBuilder;
pub use error::ModelError;

/// ヒープダンプモデルの結果型
pub type Result<T> = std::result::Result<T, ModelError>;
