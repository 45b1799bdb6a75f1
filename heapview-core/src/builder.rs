//! ビュー階層の構築
//!
//! ルートインスタンスから子ビュー配列を再帰的にたどり、各インスタンスを
//! コンテナ（ViewGroup）、テキストビュー（TextView）、その他のビューに分類して
//! ツリーを組み立てます。

use crate::config::{BuildConfig, MalformedTextPolicy};
use crate::refs::ViewRefs;
use crate::subtype::is_instance_of;
use crate::text::TextDecoder;
use crate::view::{Bounds, View};
use crate::{Result, ViewError};
use heapview_model::{Instance, MemoryDump, ObjectId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// デフォルト設定でビュー階層を構築する
pub fn build_view_hierarchy(root: &Instance, dump: &MemoryDump) -> Result<View> {
    ViewHierarchyBuilder::new(dump)?.build(root)
}

/// ビュー階層ビルダー
///
/// バインディングは作成時に一度だけ解決し、全てのノードで共有します。
pub struct ViewHierarchyBuilder<'a> {
    dump: &'a MemoryDump,
    refs: ViewRefs,
    config: BuildConfig,
}

/// 一回の構築における走査状態
struct Walk<'a> {
    texts: TextDecoder<'a>,
    /// 現在のパス上のインスタンス（循環検出が有効な場合のみ）
    path: HashSet<ObjectId>,
}

impl<'a> ViewHierarchyBuilder<'a> {
    /// ダンプからバインディングを解決してビルダーを作成する
    pub fn new(dump: &'a MemoryDump) -> Result<Self> {
        let refs = ViewRefs::bind(dump)?;
        Ok(Self::with_refs(dump, refs))
    }

    /// 解決済みのバインディングからビルダーを作成する
    ///
    /// `refs` は同じ `dump` から解決したものであること。
    pub fn with_refs(dump: &'a MemoryDump, refs: ViewRefs) -> Self {
        Self {
            dump,
            refs,
            config: BuildConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn refs(&self) -> &ViewRefs {
        &self.refs
    }

    /// ルートインスタンスからビュー階層を構築する
    pub fn build(&self, root: &Instance) -> Result<View> {
        let mut walk = Walk {
            texts: TextDecoder::new(self.dump, &self.refs),
            path: HashSet::new(),
        };
        let view = self.build_view(&mut walk, root, 0)?;
        debug!(
            "Built view hierarchy from {} with {} descendants",
            root.object_id,
            view.descendant_count()
        );
        Ok(view)
    }

    /// ルートインスタンスのIDからビュー階層を構築する
    pub fn build_from_id(&self, root: ObjectId) -> Result<View> {
        let instance = self.dump.instance(root).ok_or(ViewError::MissingRoot(root))?;
        self.build(instance)
    }

    fn build_view(&self, walk: &mut Walk<'_>, instance: &Instance, depth: usize) -> Result<View> {
        if let Some(max_depth) = self.config.max_depth {
            if depth > max_depth {
                return Err(ViewError::DepthLimitExceeded(max_depth));
            }
        }
        if self.config.detect_cycles && !walk.path.insert(instance.object_id) {
            return Err(ViewError::CyclicReference(instance.object_id));
        }

        let bounds = self.read_bounds(instance)?;
        let class_name = walk.texts.class_name(instance);

        let view = if is_instance_of(self.dump, instance, self.refs.view_group_class) {
            debug!("{} {} is a view group", class_name, instance.object_id);
            let children = self.build_children(walk, instance, depth)?;
            View::group(bounds, class_name, children)
        } else if is_instance_of(self.dump, instance, self.refs.text_view_class) {
            let text = self.read_text(walk, instance)?;
            View::text(bounds, class_name, text)
        } else {
            View::plain(bounds, class_name)
        };

        if self.config.detect_cycles {
            walk.path.remove(&instance.object_id);
        }
        Ok(view)
    }

    /// 子ビュー配列を配列順に構築する（null 要素は読み飛ばす）
    fn build_children(
        &self,
        walk: &mut Walk<'_>,
        instance: &Instance,
        depth: usize,
    ) -> Result<Vec<View>> {
        let array_id = self
            .refs
            .view_group_children_field
            .read_object(self.dump, instance)?;
        if array_id.is_null() {
            return Ok(Vec::new());
        }

        let Some(array) = self.dump.object_array(array_id) else {
            warn!(
                "Children array {} of {} not found, treating as empty",
                array_id, instance.object_id
            );
            return Ok(Vec::new());
        };

        let mut children = Vec::with_capacity(array.elements.len());
        for &element in &array.elements {
            if element.is_null() {
                continue;
            }
            match self.dump.instance(element) {
                Some(child) => children.push(self.build_view(walk, child, depth + 1)?),
                None => warn!("Child {} of {} not found, skipping", element, instance.object_id),
            }
        }
        Ok(children)
    }

    fn read_bounds(&self, instance: &Instance) -> Result<Bounds> {
        Ok(Bounds {
            left: self.refs.view_left_field.read_int(self.dump, instance)?,
            right: self.refs.view_right_field.read_int(self.dump, instance)?,
            top: self.refs.view_top_field.read_int(self.dump, instance)?,
            bottom: self.refs.view_bottom_field.read_int(self.dump, instance)?,
        })
    }

    /// TextView のテキストを読み取る（null 参照は空文字列）
    fn read_text(&self, walk: &Walk<'_>, instance: &Instance) -> Result<String> {
        let text_id = self.refs.text_view_text_field.read_object(self.dump, instance)?;
        if text_id.is_null() {
            return Ok(String::new());
        }

        let Some(text_instance) = self.dump.instance(text_id) else {
            warn!("Text {} of {} not found, using empty text", text_id, instance.object_id);
            return Ok(String::new());
        };

        match walk.texts.decode(text_instance) {
            Err(e)
                if e.is_text_error()
                    && self.config.malformed_text == MalformedTextPolicy::Placeholder =>
            {
                warn!("{}, using class name instead", e);
                Ok(walk.texts.class_name(text_instance))
            }
            result => result,
        }
    }
}
