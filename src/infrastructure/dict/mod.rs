pub mod text_repo;

pub use text_repo::{DEFAULT_DICT_FILE, TextFileDictRepo, format_line, parse_line};
