//! personal_dict: 個人用辞書の対話メニュー。
//! カレントディレクトリの `personal_dictionary.txt` を読み込み、終了時に書き戻します。
use clap::Parser;
use personal_dict::{DictionaryStore, MenuSession, TextFileDictRepo};
use std::io;

#[derive(Parser)]
#[command(author, version, about = "Personal dictionary manager (interactive menu)")]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    // ユーザー向け出力を汚さないよう既定は warn。RUST_LOG で上書き可
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let store = DictionaryStore::new(TextFileDictRepo::default());
    let mut session = MenuSession::new(store, io::stdin().lock(), io::stdout(), io::stderr());

    if let Err(e) = session.run() {
        log::error!("session aborted: {e}");
        eprintln!("Error: {}", e);
    }
}
