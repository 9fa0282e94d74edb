//! # personal_dict
//!
//! 単語と意味の組を平文ファイルに保存する個人用辞書。
//! 対話メニューから追加・検索・削除・一覧を行う。
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::MenuSession;
pub use domain::{dict::Entry, store::DictionaryStore};
pub use error::{DictError, Result};
pub use infrastructure::dict::{DEFAULT_DICT_FILE, TextFileDictRepo};
