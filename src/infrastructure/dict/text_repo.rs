//! テキストファイル版 DictRepository 実装
//!
//! 1 行 1 レコード `word:meaning`。区切りは最初の `:` のみ。
use crate::domain::dict::{DictRepository, Entry, normalize_word};
use crate::error::{DictError, Result};
use log::debug;
use std::{
    fs,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// 既定の辞書ファイル（カレントディレクトリ相対）
pub const DEFAULT_DICT_FILE: &str = "personal_dictionary.txt";

pub struct TextFileDictRepo {
    path: PathBuf,
}

impl TextFileDictRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for TextFileDictRepo {
    fn default() -> Self {
        Self::new(DEFAULT_DICT_FILE)
    }
}

/// 1 行をレコードとして解釈。`:` を含まない行は `None`
pub fn parse_line(line: &str) -> Option<Entry> {
    let (word, meaning) = line.split_once(':')?;
    Some(Entry::new(normalize_word(word), meaning.trim()))
}

/// レコードを 1 行分の文字列へ（改行なし）
pub fn format_line(entry: &Entry) -> String {
    format!("{}:{}", entry.word, entry.meaning)
}

impl DictRepository for TextFileDictRepo {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Vec<Entry>>> {
        let read_err = |source| DictError::Read {
            path: self.path.clone(),
            source,
        };

        let f = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_err(e)),
        };

        // 不正な UTF-8 は置換文字に変えて読み続ける。失敗扱いは本当の読み込みエラーのみ
        let mut reader = BufReader::new(f);
        let mut buf = Vec::new();
        let mut out = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).map_err(read_err)? == 0 {
                break;
            }
            let raw: &[u8] = &buf;
            let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = String::from_utf8_lossy(raw);
            match parse_line(&line) {
                Some(entry) => out.push(entry),
                None => debug!("skipping line without separator: {line:?}"),
            }
        }
        Ok(Some(out))
    }

    fn save(&self, all: &[Entry]) -> Result<()> {
        let write_err = |source| DictError::Write {
            path: self.path.clone(),
            source,
        };

        let tmp = self.path.with_extension("txt.tmp");
        if let Err(e) = write_lines(&tmp, all).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        Ok(())
    }
}

fn write_lines(path: &Path, all: &[Entry]) -> io::Result<()> {
    let mut w = BufWriter::new(fs::File::create(path)?);
    for entry in all {
        writeln!(w, "{}", format_line(entry))?;
    }
    w.flush()
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_line_splits_at_first_colon() {
        assert_eq!(
            parse_line("  Ratio : a:b relation "),
            Some(Entry::new("ratio", "a:b relation"))
        );
        assert_eq!(parse_line("no separator here"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line(":orphan"), Some(Entry::new("", "orphan")));
        assert_eq!(parse_line("word:"), Some(Entry::new("word", "")));
    }

    #[test]
    fn format_line_has_no_padding() {
        assert_eq!(format_line(&Entry::new("cat", "meow")), "cat:meow");
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let repo = TextFileDictRepo::new(dir.path().join("absent.txt"));
        assert!(repo.load().unwrap().is_none());
    }

    /// `:` の無い行は読み飛ばし、重複はファイル順のまま返す
    #[test]
    fn load_skips_invalid_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict.txt");
        fs::write(&path, "cat:a small domesticated animal\ngarbage\n\nDOG : loyal\ncat:again\n")
            .unwrap();

        let records = TextFileDictRepo::new(&path).load().unwrap().unwrap();
        assert_eq!(
            records,
            vec![
                Entry::new("cat", "a small domesticated animal"),
                Entry::new("dog", "loyal"),
                Entry::new("cat", "again"),
            ]
        );
    }

    #[test]
    fn directory_path_is_read_error() {
        let dir = TempDir::new().unwrap();
        let repo = TextFileDictRepo::new(dir.path());
        assert!(matches!(repo.load(), Err(DictError::Read { .. })));
    }

    #[test]
    fn save_overwrites_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict.txt");
        fs::write(&path, "old:stuff\nmore:old stuff\n").unwrap();

        let repo = TextFileDictRepo::new(&path);
        repo.save(&[Entry::new("ratio", "a:b")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ratio:a:b\n");
        assert!(!path.with_extension("txt.tmp").exists());
        assert_eq!(
            repo.load().unwrap().unwrap(),
            vec![Entry::new("ratio", "a:b")]
        );
    }

    /// Latin-1 のバイトが混ざっていても他の行は失われない
    #[test]
    fn load_decodes_invalid_utf8_lossily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict.txt");
        fs::write(&path, b"cat:meow\r\ncaf\xe9:coffee\ndog:woof").unwrap();

        let records = TextFileDictRepo::new(&path).load().unwrap().unwrap();
        assert_eq!(
            records,
            vec![
                Entry::new("cat", "meow"),
                Entry::new("caf\u{FFFD}", "coffee"),
                Entry::new("dog", "woof"),
            ]
        );
    }

    /// rename に失敗しても一時ファイルを残さない
    #[test]
    fn failed_save_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict.txt");
        fs::create_dir(&path).unwrap();

        let repo = TextFileDictRepo::new(&path);
        assert!(matches!(
            repo.save(&[Entry::new("a", "b")]),
            Err(DictError::Write { .. })
        ));
        assert!(!path.with_extension("txt.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn save_into_missing_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let repo = TextFileDictRepo::new(dir.path().join("nope").join("dict.txt"));
        assert!(matches!(
            repo.save(&[Entry::new("a", "b")]),
            Err(DictError::Write { .. })
        ));
    }
}
