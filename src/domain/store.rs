//! 辞書ストア – 見出し語→意味のマップと永続化
//!
//! **重要**: 変更はオンメモリのみ。`save` を呼ぶまでファイルには反映されない。

use crate::domain::dict::{DictRepository, Entry, LoadOutcome, normalize_word};
use crate::error::Result;
use log::{debug, info, warn};
use std::collections::HashMap;

/// 辞書ストア
#[derive(Debug)]
pub struct DictionaryStore<R> {
    repo: R,
    /// 見出し語（正規化済み）-> 意味
    entries: HashMap<String, String>,
}

impl<R: DictRepository> DictionaryStore<R> {
    /// 空のストアを作成（ファイルはまだ読まない）
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            entries: HashMap::new(),
        }
    }

    /// 永続ファイルから読み込み、現在の内容を置き換える
    ///
    /// 同じ見出し語が複数行にある場合は後の行が勝つ。
    /// 読み込みに失敗した場合、ストアは空のままエラーを返す。
    pub fn load(&mut self) -> Result<LoadOutcome> {
        self.entries.clear();
        let records = match self.repo.load() {
            Ok(Some(records)) => records,
            Ok(None) => {
                info!("dictionary file missing, starting empty");
                return Ok(LoadOutcome::Missing);
            }
            Err(e) => {
                debug!("dictionary load failed: {e}");
                return Err(e);
            }
        };

        let count = records.len();
        for Entry { word, meaning } in records {
            self.entries.insert(word, meaning);
        }
        info!(
            "dictionary loaded: {} record(s), {} unique word(s)",
            count,
            self.entries.len()
        );
        Ok(LoadOutcome::Loaded { records: count })
    }

    /// 追加 or 上書き。上書き確認は対話層の責務
    pub fn upsert(&mut self, word: &str, meaning: &str) {
        let word = normalize_word(word);
        if word.is_empty() {
            warn!("storing entry under an empty word");
        }
        debug!("upsert '{word}'");
        self.entries.insert(word, meaning.trim().to_string());
    }

    /// 意味を取得。見つからなければ `None`
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&normalize_word(word)).map(String::as_str)
    }

    /// 削除。戻り値 true=削除した / false=見つからず
    pub fn remove(&mut self, word: &str) -> bool {
        let word = normalize_word(word);
        let removed = self.entries.remove(&word).is_some();
        debug!("remove '{word}': {removed}");
        removed
    }

    /// 見出し語の昇順で全エントリを返す（呼び出し毎に再計算）
    pub fn list_sorted(&self) -> Vec<Entry> {
        let mut out: Vec<Entry> = self
            .entries
            .iter()
            .map(|(w, m)| Entry::new(w.as_str(), m.as_str()))
            .collect();
        out.sort_by(|a, b| a.word.cmp(&b.word));
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全件を上書き保存。失敗してもメモリ上の内容は変わらない
    pub fn save(&self) -> Result<()> {
        let all: Vec<Entry> = self
            .entries
            .iter()
            .map(|(w, m)| Entry::new(w.as_str(), m.as_str()))
            .collect();
        match self.repo.save(&all) {
            Ok(()) => {
                info!("dictionary saved: {} entries", all.len());
                Ok(())
            }
            Err(e) => {
                debug!("dictionary save failed: {e}");
                Err(e)
            }
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }
}
