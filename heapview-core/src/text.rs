//! 文字列のデコード
//!
//! `java.lang.String` の内部バッファ（char 配列）を読み取り、テキストを復元します。
//! それ以外の CharSequence 実装はテキストを復元できないため、クラス名を代わりに返します。

use crate::refs::ViewRefs;
use crate::{Result, ViewError};
use heapview_model::{BasicType, Instance, MemoryDump};
use tracing::debug;

/// ビッグエンディアンの2バイト単位のバッファを文字列にデコードする
///
/// 2バイトごとに1つのUTF-16コード単位として組み立てます。サロゲートペアは結合し、
/// 対にならないサロゲートは置換文字になります。長さが奇数の場合は None を返します。
pub fn decode_char_buffer(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }

    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    Some(
        char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
    )
}

/// テキストオブジェクトのデコーダー
pub struct TextDecoder<'a> {
    dump: &'a MemoryDump,
    refs: &'a ViewRefs,
}

impl<'a> TextDecoder<'a> {
    pub fn new(dump: &'a MemoryDump, refs: &'a ViewRefs) -> Self {
        Self { dump, refs }
    }

    /// テキストオブジェクトから文字列を取得する
    ///
    /// String 以外の実装の場合はそのクラス名を返します。
    pub fn decode(&self, instance: &Instance) -> Result<String> {
        if instance.class_id != self.refs.string_class.id() {
            let name = self.class_name(instance);
            debug!("Text object {} is {}, using class name", instance.object_id, name);
            return Ok(name);
        }

        let array_id = self.refs.string_value_field.read_object(self.dump, instance)?;
        let array = self
            .dump
            .primitive_array(array_id)
            .ok_or(ViewError::MissingTextBuffer {
                string: instance.object_id,
                array: array_id,
            })?;

        if array.ty != BasicType::Char {
            return Err(ViewError::MalformedTextBuffer {
                string: instance.object_id,
                found: array.ty,
            });
        }

        decode_char_buffer(&array.data).ok_or(ViewError::OddTextBuffer {
            string: instance.object_id,
            len: array.data.len(),
        })
    }

    /// インスタンスのクラス名（解決できない場合はクラスID）
    pub fn class_name(&self, instance: &Instance) -> String {
        self.dump
            .instance_class_name(instance)
            .map(str::to_string)
            .unwrap_or_else(|| instance.class_id.to_string())
    }
}
