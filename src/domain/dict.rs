//! 単語エントリとリポジトリ抽象 – ドメイン層

use crate::error::Result;
use std::fmt;
use std::path::Path;

/// 1 単語エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: String,    // 正規化済みの見出し語
    pub meaning: String, // 意味（大文字小文字は保持）
}

impl Entry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }

    /// `word : meaning` 形式の表示文字列
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.word, self.meaning)
    }
}

/// 見出し語の正規化（前後の空白除去 + 小文字化）
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// 読み込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// ファイルから読み込んだ（ファイル内の有効行数）
    Loaded { records: usize },
    /// ファイルが存在しない。空の辞書で開始する
    Missing,
}

/// 辞書永続化 I/F
pub trait DictRepository {
    /// 保存先（メッセージ表示用）
    fn location(&self) -> &Path;

    /// ファイル順に全レコードを返す。ファイルが無ければ `None`
    fn load(&self) -> Result<Option<Vec<Entry>>>;

    /// 全レコードで上書き保存
    fn save(&self, all: &[Entry]) -> Result<()>;
}
