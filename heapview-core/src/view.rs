//! 再構築されたビューツリー

use std::fmt;

/// ビューの矩形（ダンプの値をそのまま保持する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// 幅（負になり得る）
    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    /// 高さ（負になり得る）
    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{}][{},{}]", self.left, self.top, self.right, self.bottom)
    }
}

/// ビューの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// 子ビューを持つコンテナ（ViewGroup）
    Group { children: Vec<View> },
    /// テキストを持つビュー（TextView）
    Text { text: String },
    /// その他のビュー
    Plain,
}

/// ビュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub bounds: Bounds,
    /// 実行時のクラス名
    pub class_name: String,
    pub kind: ViewKind,
}

impl View {
    pub fn group(bounds: Bounds, class_name: String, children: Vec<View>) -> Self {
        Self {
            bounds,
            class_name,
            kind: ViewKind::Group { children },
        }
    }

    pub fn text(bounds: Bounds, class_name: String, text: String) -> Self {
        Self {
            bounds,
            class_name,
            kind: ViewKind::Text { text },
        }
    }

    pub fn plain(bounds: Bounds, class_name: String) -> Self {
        Self {
            bounds,
            class_name,
            kind: ViewKind::Plain,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ViewKind::Group { .. })
    }

    /// 子ビュー（コンテナ以外は空）
    pub fn children(&self) -> &[View] {
        match &self.kind {
            ViewKind::Group { children } => children.as_slice(),
            _ => &[],
        }
    }

    /// テキスト（TextView 以外は None）
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ViewKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// 自身を除く子孫の数
    pub fn descendant_count(&self) -> usize {
        self.children()
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// 深さ優先（行きがけ順）で自身と子孫を列挙する
    pub fn iter(&self) -> ViewIter<'_> {
        ViewIter { stack: vec![self] }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{} {}", "", self.class_name, self.bounds, indent = depth * 2)?;
        if let ViewKind::Text { text } = &self.kind {
            write!(f, " {:?}", text)?;
        }
        writeln!(f)?;
        for child in self.children() {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// 行きがけ順のイテレータ
pub struct ViewIter<'a> {
    stack: Vec<&'a View>,
}

impl<'a> Iterator for ViewIter<'a> {
    type Item = &'a View;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.stack.pop()?;
        self.stack.extend(view.children().iter().rev());
        Some(view)
    }
}

/// インデント付きのアウトライン表示
impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
