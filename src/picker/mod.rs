//! ファイル選択ダイアログ
//!
//! 開く・名前を付けて保存の両方で使う、パス入力欄と一覧からなるモーダル。
//! キー入力ごとに状態を進め、確定または取り消しで結果を返す。

pub mod listing;

pub use listing::{common_prefix, list_directory, DirEntry, PARENT_ENTRY};

use crate::file::{default_filters, directory_label, expand_path, FileFilter};
use crate::input::keybinding::{Key, KeyCode};
use std::env;
use std::path::{Path, PathBuf};

/// ダイアログの用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    SaveAs,
}

impl PickerMode {
    /// ダイアログの見出し
    pub fn caption(self) -> &'static str {
        match self {
            PickerMode::Open => "Open File",
            PickerMode::SaveAs => "Save As File",
        }
    }
}

/// キー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// 入力継続
    Pending,
    /// 確定（`None` は取り消し）
    Resolved(Option<PathBuf>),
}

/// ファイル選択ダイアログの状態
#[derive(Debug, Clone)]
pub struct FilePicker {
    mode: PickerMode,
    /// パス入力欄
    input: String,
    /// 入力中ディレクトリの一覧
    entries: Vec<DirEntry>,
    /// 一覧の選択位置（`None` なら入力欄を優先）
    selected: Option<usize>,
    filters: Vec<FileFilter>,
    /// 有効なフィルタ（`None` は全ファイル表示）
    active_filter: Option<usize>,
    /// 一覧取得や入力の問題
    message: Option<String>,
}

impl FilePicker {
    /// `start_dir` を入力欄に置いて開始
    pub fn new(mode: PickerMode, start_dir: &Path, suggested_name: Option<&str>) -> Self {
        let filters = default_filters();
        let active_filter = if filters.is_empty() { None } else { Some(0) };

        let mut picker = Self {
            mode,
            input: format!("{}{}", directory_label(start_dir), suggested_name.unwrap_or("")),
            entries: Vec::new(),
            selected: None,
            filters,
            active_filter,
            message: None,
        };
        picker.refresh();
        picker
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn filters(&self) -> &[FileFilter] {
        &self.filters
    }

    pub fn active_filter(&self) -> Option<&FileFilter> {
        self.active_filter.and_then(|index| self.filters.get(index))
    }

    /// フィルタ欄の表示
    pub fn filter_label(&self) -> String {
        self.active_filter()
            .map(FileFilter::display)
            .unwrap_or_else(|| "All Files (*)".to_string())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// 入力欄を置き換える
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.refresh();
    }

    /// 一覧の項目を選択
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    /// 次のフィルタへ（最後の次は全ファイル表示）
    pub fn cycle_filter(&mut self) {
        self.active_filter = match self.active_filter {
            None if !self.filters.is_empty() => Some(0),
            Some(index) if index + 1 < self.filters.len() => Some(index + 1),
            _ => None,
        };
        self.refresh();
    }

    pub fn handle_key(&mut self, key: &Key) -> PickerEvent {
        if key.is_escape() {
            return PickerEvent::Resolved(None);
        }
        if key.is_enter() {
            return self.confirm();
        }
        if key.modifiers.ctrl {
            if key.code == KeyCode::Char('t') {
                self.cycle_filter();
            }
            return PickerEvent::Pending;
        }

        match key.code {
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Tab => self.complete(),
            KeyCode::Backspace => {
                self.input.pop();
                self.refresh();
            }
            KeyCode::Char(c) if key.is_insertable_char() => {
                self.input.push(c);
                self.refresh();
            }
            _ => {}
        }
        PickerEvent::Pending
    }

    /// 確定操作
    pub fn confirm(&mut self) -> PickerEvent {
        if let Some(entry) = self.selected_entry().cloned() {
            let dir = match self.listing_dir() {
                Some(dir) => dir,
                None => return PickerEvent::Pending,
            };
            if entry.is_parent() {
                let parent = dir.parent().map(Path::to_path_buf).unwrap_or(dir);
                self.enter_directory(&parent);
                return PickerEvent::Pending;
            }
            let target = dir.join(&entry.name);
            if entry.is_dir {
                self.enter_directory(&target);
                return PickerEvent::Pending;
            }
            return PickerEvent::Resolved(Some(target));
        }

        if self.file_part().is_empty() {
            self.message = Some("Enter a file name".to_string());
            return PickerEvent::Pending;
        }

        match expand_path(&self.input) {
            Ok(path) if path.is_dir() => {
                self.enter_directory(&path);
                PickerEvent::Pending
            }
            Ok(path) if self.mode == PickerMode::Open && !path.exists() => {
                self.message = Some(format!("File not found: {}", path.display()));
                PickerEvent::Pending
            }
            Ok(path) => PickerEvent::Resolved(Some(path)),
            Err(err) => {
                self.message = Some(err.to_string());
                PickerEvent::Pending
            }
        }
    }

    fn selected_entry(&self) -> Option<&DirEntry> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.entries.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
        });
    }

    /// Tab 補完
    fn complete(&mut self) {
        if let Some(entry) = self.selected_entry().cloned() {
            if entry.is_parent() {
                if let Some(parent) = self.listing_dir().and_then(|d| d.parent().map(Path::to_path_buf)) {
                    self.enter_directory(&parent);
                }
            } else {
                let completed = format!("{}{}", self.dir_part(), entry.display_name());
                self.set_input(completed);
            }
            return;
        }

        let file_part = self.file_part().to_string();
        let candidates: Vec<&DirEntry> = self
            .entries
            .iter()
            .filter(|entry| !entry.is_parent() && entry.name.starts_with(&file_part))
            .collect();

        if let [only] = candidates.as_slice() {
            let completed = format!("{}{}", self.dir_part(), only.display_name());
            self.set_input(completed);
            return;
        }

        if let Some(prefix) = common_prefix(candidates.iter().map(|entry| entry.name.as_str())) {
            if prefix.len() > file_part.len() {
                let completed = format!("{}{}", self.dir_part(), prefix);
                self.set_input(completed);
            }
        }
    }

    fn enter_directory(&mut self, dir: &Path) {
        self.set_input(directory_label(dir));
    }

    /// 入力欄の最後の区切り文字までを返す
    fn dir_part(&self) -> &str {
        match self.separator_index() {
            Some(index) => &self.input[..=index],
            None => "",
        }
    }

    /// 最後の区切り文字より後ろ
    fn file_part(&self) -> &str {
        match self.separator_index() {
            Some(index) => &self.input[index + 1..],
            None => &self.input,
        }
    }

    fn separator_index(&self) -> Option<usize> {
        self.input
            .rfind(|c| c == '/' || c == std::path::MAIN_SEPARATOR)
    }

    /// 一覧表示するディレクトリ
    fn listing_dir(&self) -> Option<PathBuf> {
        let dir_part = self.dir_part();
        if dir_part.is_empty() {
            env::current_dir().ok()
        } else {
            expand_path(dir_part).ok()
        }
    }

    fn refresh(&mut self) {
        self.selected = None;
        self.message = None;

        let dir = match self.listing_dir() {
            Some(dir) => dir,
            None => {
                self.entries.clear();
                self.message = Some(format!("Invalid directory: {}", self.dir_part()));
                return;
            }
        };

        let filter = self.active_filter.and_then(|index| self.filters.get(index));
        match list_directory(&dir, self.file_part(), filter) {
            Ok(entries) => self.entries = entries,
            Err(err) => {
                log::debug!("cannot list {}: {}", dir.display(), err);
                self.entries.clear();
                self.message = Some(format!("{}: {}", dir.display(), err));
            }
        }
    }
}
