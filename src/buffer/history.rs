//! 編集履歴（Undo/Redo）
//!
//! 連続した1文字挿入・後退削除は1つの履歴エントリにまとめる。

/// コマンド種別（履歴管理用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommandKind {
    InsertChar,
    DeleteBackward,
    Other,
}

/// 最小単位の編集（位置はバイトオフセット）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicEdit {
    Insert { position: usize, text: String },
    Delete { position: usize, text: String },
}

impl AtomicEdit {
    /// 編集をテキストに適用
    pub fn apply(&self, target: &mut String) {
        match self {
            AtomicEdit::Insert { position, text } => target.insert_str(*position, text),
            AtomicEdit::Delete { position, text } => {
                target.replace_range(*position..*position + text.len(), "")
            }
        }
    }

    /// 編集を取り消す
    pub fn revert(&self, target: &mut String) {
        match self {
            AtomicEdit::Insert { position, text } => {
                target.replace_range(*position..*position + text.len(), "")
            }
            AtomicEdit::Delete { position, text } => target.insert_str(*position, text),
        }
    }
}

/// 履歴エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command_kind: HistoryCommandKind,
    pub operations: Vec<AtomicEdit>,
    pub cursor_before: usize,
    pub cursor_after: usize,
}

impl HistoryEntry {
    fn try_merge(&mut self, other: &HistoryEntry) -> bool {
        if self.command_kind != other.command_kind {
            return false;
        }

        match (self.operations.as_mut_slice(), other.operations.as_slice()) {
            (
                [AtomicEdit::Insert { position, text }],
                [AtomicEdit::Insert {
                    position: next_position,
                    text: next_text,
                }],
            ) if self.command_kind == HistoryCommandKind::InsertChar
                && *next_position == *position + text.len()
                && !text.ends_with('\n') =>
            {
                text.push_str(next_text);
            }
            (
                [AtomicEdit::Delete { position, text }],
                [AtomicEdit::Delete {
                    position: next_position,
                    text: next_text,
                }],
            ) if self.command_kind == HistoryCommandKind::DeleteBackward
                && *next_position + next_text.len() == *position =>
            {
                *position = *next_position;
                text.insert_str(0, next_text);
            }
            _ => return false,
        }

        self.cursor_after = other.cursor_after;
        true
    }
}

/// 編集履歴スタック
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// 新しい編集を記録（Redo履歴は破棄）
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        if let Some(last) = self.undo.last_mut() {
            if last.try_merge(&entry) {
                return;
            }
        }
        self.undo.push(entry);
    }

    pub fn take_for_undo(&mut self) -> Option<HistoryEntry> {
        self.undo.pop()
    }

    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo.push(entry);
    }

    pub fn take_for_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    /// Redo後の再登録（Redo履歴を保持したまま積む）
    pub fn push_without_clearing(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
    }

    /// 全履歴を破棄
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
