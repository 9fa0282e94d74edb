//! 統一エラーハンドリング
//!
//! personal_dict 全体で使用するエラー型。
//! どのエラーもプロセスを終了させず、対話ループ側で報告される。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// personal_dict 全体で使用する統一エラー型
#[derive(Debug, Error)]
pub enum DictError {
    // ========================================
    // 永続化関連エラー
    // ========================================
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ========================================
    // 端末入出力エラー
    // ========================================
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input stream closed")]
    InputClosed,
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, DictError>;

impl DictError {
    /// 下層の I/O エラー（ユーザー向けメッセージ用）
    pub fn io_cause(&self) -> Option<&io::Error> {
        match self {
            DictError::Read { source, .. } | DictError::Write { source, .. } => Some(source),
            DictError::Io(e) => Some(e),
            DictError::InputClosed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_mentions_path_and_cause() {
        let err = DictError::Read {
            path: PathBuf::from("personal_dictionary.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("personal_dictionary.txt"));
        assert!(msg.contains("denied"));
        assert_eq!(
            err.io_cause().map(io::Error::kind),
            Some(io::ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn input_closed_has_no_io_cause() {
        assert!(DictError::InputClosed.io_cause().is_none());
    }
}
