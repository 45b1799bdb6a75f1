//! ビュー階層構築の設定

/// テキストバッファが壊れている場合の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedTextPolicy {
    /// 構築全体をエラーで中断する
    #[default]
    Fail,
    /// テキストオブジェクトのクラス名で置き換えて続行する
    Placeholder,
}

/// 構築設定
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// 走査中のパス上での循環参照を検出する
    ///
    /// 無効の場合、循環したグラフではスタックを使い果たすまで再帰します。
    pub detect_cycles: bool,
    /// 最大深さ（ルートが深さ0）
    pub max_depth: Option<usize>,
    /// テキストバッファが壊れている場合の扱い
    pub malformed_text: MalformedTextPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            detect_cycles: false,
            max_depth: None,
            malformed_text: MalformedTextPolicy::Fail,
        }
    }
}

impl BuildConfig {
    /// 循環検出と深さ制限を有効にした設定
    pub fn guarded(max_depth: usize) -> Self {
        Self {
            detect_cycles: true,
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }
}
