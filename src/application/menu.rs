//! 対話メニュー
//!
//! # 責任
//! - メニュー表示と入力の読み取り
//! - 選択肢から DictionaryStore 操作への委譲
//! - 1 回の操作で起きたエラーを報告してループを継続

use std::io::{BufRead, Write};

use crate::domain::dict::{DictRepository, LoadOutcome, normalize_word};
use crate::domain::store::DictionaryStore;
use crate::error::{DictError, Result};

/// メニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Search,
    Remove,
    List,
    Exit,
}

impl MenuChoice {
    /// `1`〜`5` を選択肢へ。それ以外は `None`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Search),
            "3" => Some(MenuChoice::Remove),
            "4" => Some(MenuChoice::List),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// 1 反復の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// 対話セッション。ストアを所有し、終了時に保存する
pub struct MenuSession<R, I, O, E> {
    store: DictionaryStore<R>,
    input: I,
    out: O,
    err: E,
}

impl<R, I, O, E> MenuSession<R, I, O, E>
where
    R: DictRepository,
    I: BufRead,
    O: Write,
    E: Write,
{
    pub fn new(store: DictionaryStore<R>, input: I, out: O, err: E) -> Self {
        Self {
            store,
            input,
            out,
            err,
        }
    }

    /// セッションを終えてストアを取り出す
    pub fn into_store(self) -> DictionaryStore<R> {
        self.store
    }

    /// 読み込み → メニューループ → 保存。ユーザーが終了を選ぶか入力が閉じるまで戻らない
    pub fn run(&mut self) -> Result<()> {
        self.load_store()?;
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(DictError::InputClosed) => {
                    self.finish()?;
                    return Ok(());
                }
                Err(e) => {
                    if let Err(io) = writeln!(self.out, "An unexpected error occurred: {e}") {
                        // 出力が壊れていても保存だけは試みる
                        self.save_store()?;
                        return Err(io.into());
                    }
                }
            }
        }
    }

    fn load_store(&mut self) -> Result<()> {
        match self.store.load() {
            Ok(LoadOutcome::Loaded { .. }) => writeln!(
                self.out,
                "Dictionary loaded successfully from {}.",
                self.store.repository().location().display()
            )?,
            Ok(LoadOutcome::Missing) => writeln!(
                self.out,
                "Dictionary file not found. Starting with an empty dictionary."
            )?,
            Err(e) => writeln!(self.err, "Error reading dictionary file: {}", cause(&e))?,
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Flow> {
        self.print_menu()?;
        let choice = self.read_line()?;
        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Add) => self.add_entry()?,
            Some(MenuChoice::Search) => self.search_entry()?,
            Some(MenuChoice::Remove) => self.remove_entry()?,
            Some(MenuChoice::List) => self.list_entries()?,
            Some(MenuChoice::Exit) => {
                self.finish()?;
                return Ok(Flow::Exit);
            }
            None => writeln!(self.out, "Invalid choice. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Personal Dictionary Manager ---")?;
        writeln!(self.out, "1. Add Entry")?;
        writeln!(self.out, "2. Search Entry")?;
        writeln!(self.out, "3. Remove Entry")?;
        writeln!(self.out, "4. List All Entries")?;
        writeln!(self.out, "5. Exit")?;
        self.prompt("Enter your choice: ")
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// 改行を除いた 1 行。EOF は `InputClosed`
    fn read_line(&mut self) -> Result<String> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(DictError::InputClosed);
        }
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(buf)
    }

    fn add_entry(&mut self) -> Result<()> {
        self.prompt("Enter word to add: ")?;
        let word = normalize_word(&self.read_line()?);

        if let Some(current) = self.store.lookup(&word) {
            writeln!(self.out, "Word already exists. Current meaning: {current}")?;
            self.prompt("Do you want to update the meaning? (y/n): ")?;
            if self.read_line()?.trim().to_lowercase() != "y" {
                return Ok(());
            }
        }

        self.prompt(&format!("Enter meaning for '{word}': "))?;
        let meaning = self.read_line()?;
        self.store.upsert(&word, &meaning);
        writeln!(self.out, "Entry added/updated successfully.")?;
        Ok(())
    }

    fn search_entry(&mut self) -> Result<()> {
        self.prompt("Enter word to search: ")?;
        let word = normalize_word(&self.read_line()?);
        match self.store.lookup(&word) {
            Some(meaning) => writeln!(self.out, "Meaning of '{word}': {meaning}")?,
            None => writeln!(self.out, "Word '{word}' not found in dictionary.")?,
        }
        Ok(())
    }

    fn remove_entry(&mut self) -> Result<()> {
        self.prompt("Enter word to remove: ")?;
        let word = normalize_word(&self.read_line()?);
        if self.store.remove(&word) {
            writeln!(self.out, "Word '{word}' successfully removed.")?;
        } else {
            writeln!(self.out, "Word '{word}' not found.")?;
        }
        Ok(())
    }

    fn list_entries(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.out, "The dictionary is empty.")?;
            return Ok(());
        }

        writeln!(self.out)?;
        writeln!(self.out, "--- All Dictionary Entries ---")?;
        for entry in self.store.list_sorted() {
            writeln!(self.out, "{entry}")?;
        }
        writeln!(self.out, "Total entries: {}", self.store.len())?;
        Ok(())
    }

    /// 保存して終了メッセージ。保存失敗は報告のみ
    fn finish(&mut self) -> Result<()> {
        self.save_store()?;
        writeln!(self.out, "Dictionary saved. Goodbye!")?;
        Ok(())
    }

    fn save_store(&mut self) -> Result<()> {
        if let Err(e) = self.store.save() {
            writeln!(self.err, "Error saving dictionary file: {}", cause(&e))?;
        }
        Ok(())
    }
}

/// ユーザー向けの原因メッセージ
fn cause(e: &DictError) -> String {
    match e.io_cause() {
        Some(io) => io.to_string(),
        None => e.to_string(),
    }
}
