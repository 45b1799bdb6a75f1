//! ヒープダンプの基本型タグ

use crate::{ModelError, Result};
use std::fmt;

/// フィールドおよびプリミティブ配列の要素型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Object,
    Boolean,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
}

impl BasicType {
    /// ダンプ内の型タグから変換する
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            2 => Ok(BasicType::Object),
            4 => Ok(BasicType::Boolean),
            5 => Ok(BasicType::Char),
            6 => Ok(BasicType::Float),
            7 => Ok(BasicType::Double),
            8 => Ok(BasicType::Byte),
            9 => Ok(BasicType::Short),
            10 => Ok(BasicType::Int),
            11 => Ok(BasicType::Long),
            _ => Err(ModelError::UnknownTypeTag(tag)),
        }
    }

    /// ダンプ内の型タグ
    pub fn tag(self) -> u8 {
        match self {
            BasicType::Object => 2,
            BasicType::Boolean => 4,
            BasicType::Char => 5,
            BasicType::Float => 6,
            BasicType::Double => 7,
            BasicType::Byte => 8,
            BasicType::Short => 9,
            BasicType::Int => 10,
            BasicType::Long => 11,
        }
    }

    /// 値のサイズ（バイト）
    ///
    /// オブジェクト参照のサイズはダンプのIDサイズ（4または8）に従います。
    pub fn size(self, id_size: usize) -> usize {
        match self {
            BasicType::Object => id_size,
            BasicType::Boolean | BasicType::Byte => 1,
            BasicType::Char | BasicType::Short => 2,
            BasicType::Float | BasicType::Int => 4,
            BasicType::Double | BasicType::Long => 8,
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BasicType::Object => "object",
            BasicType::Boolean => "boolean",
            BasicType::Char => "char",
            BasicType::Float => "float",
            BasicType::Double => "double",
            BasicType::Byte => "byte",
            BasicType::Short => "short",
            BasicType::Int => "int",
            BasicType::Long => "long",
        };
        write!(f, "{}", name)
    }
}
