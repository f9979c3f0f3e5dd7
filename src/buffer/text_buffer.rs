//! テキストバッファ
//!
//! 編集面の本体。カーソル・選択範囲・クリップボード・Undo/Redo を持ち、
//! ドキュメントセッションには `TextSurface` として内容の取得と置換だけを公開する。

use super::clipboard::Clipboard;
use super::history::{AtomicEdit, HistoryCommandKind, HistoryEntry, HistoryStack};
use crate::session::TextSurface;
use std::ops::Range;

/// 行・桁（桁は文字単位、どちらも0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

/// カーソル移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
    PageUp(usize),
    PageDown(usize),
}

impl Movement {
    fn vertical_delta(self) -> Option<isize> {
        match self {
            Movement::Up => Some(-1),
            Movement::Down => Some(1),
            Movement::PageUp(rows) => Some(-(rows.max(1) as isize)),
            Movement::PageDown(rows) => Some(rows.max(1) as isize),
            _ => None,
        }
    }
}

/// テキストバッファ
///
/// 位置は常にUTF-8の文字境界上のバイトオフセット。
#[derive(Debug, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
    preferred_column: Option<usize>,
    history: HistoryStack,
    clipboard: Clipboard,
    modified: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 内容を丸ごと置き換える（カーソル・選択・履歴・変更フラグはリセット）
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
        self.anchor = None;
        self.preferred_column = None;
        self.history.clear();
        self.modified = false;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// 切り取り・コピー・貼り付けに使うクリップボードを差し替える
    pub fn set_clipboard(&mut self, clipboard: Clipboard) {
        self.clipboard = clipboard;
    }

    /// カーソル位置（バイトオフセット）
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// カーソルを任意の位置へ移動
    pub fn set_cursor(&mut self, offset: usize, extend: bool) {
        self.update_anchor(extend);
        self.cursor = self.clamp_offset(offset);
        self.preferred_column = None;
    }

    pub fn cursor_position(&self) -> CursorPosition {
        self.position_of(self.cursor)
    }

    /// オフセットを行・桁に変換
    pub fn position_of(&self, offset: usize) -> CursorPosition {
        let offset = self.clamp_offset(offset);
        let line_start = self.line_start(offset);
        CursorPosition {
            line: self.text[..offset].matches('\n').count(),
            column: self.text[line_start..offset].chars().count(),
        }
    }

    /// 行・桁をオフセットに変換（範囲外は行末・末尾に丸める）
    pub fn offset_at(&self, line: usize, column: usize) -> usize {
        let mut line_start = 0;
        for _ in 0..line {
            match self.text[line_start..].find('\n') {
                Some(index) => line_start += index + 1,
                None => return self.text.len(),
            }
        }

        let line_end = self.line_end(line_start);
        self.text[line_start..line_end]
            .char_indices()
            .nth(column)
            .map(|(index, _)| line_start + index)
            .unwrap_or(line_end)
    }

    /// 論理行数（空バッファは1行）
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// 選択範囲（空範囲は選択なし扱い）
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let range = anchor.min(self.cursor)..anchor.max(self.cursor);
        if range.is_empty() {
            None
        } else {
            Some(range)
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection().map(|range| &self.text[range])
    }

    /// 1文字挿入（選択範囲があれば置き換え）
    pub fn insert_char(&mut self, ch: char) {
        let mut encoded = [0u8; 4];
        self.insert_with_kind(ch.encode_utf8(&mut encoded), HistoryCommandKind::InsertChar);
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// 文字列挿入（選択範囲があれば置き換え）
    pub fn insert_str(&mut self, text: &str) {
        self.insert_with_kind(text, HistoryCommandKind::Other);
    }

    /// カーソル前の1文字、または選択範囲を削除
    pub fn delete_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_boundary(self.cursor);
        self.remove_range(start..self.cursor, HistoryCommandKind::DeleteBackward)
    }

    /// カーソル位置の1文字、または選択範囲を削除
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;
        if self.cursor >= self.text.len() {
            return false;
        }
        let end = self.next_boundary(self.cursor);
        self.remove_range(self.cursor..end, HistoryCommandKind::Other)
    }

    /// カーソル移動（`extend` が真なら選択範囲を伸ばす）
    pub fn move_cursor(&mut self, movement: Movement, extend: bool) {
        if !extend {
            if let Some(range) = self.selection() {
                match movement {
                    Movement::Left => {
                        self.collapse_to(range.start);
                        return;
                    }
                    Movement::Right => {
                        self.collapse_to(range.end);
                        return;
                    }
                    _ => {}
                }
            }
        }

        self.update_anchor(extend);

        if let Some(delta) = movement.vertical_delta() {
            self.cursor = self.vertical_target(delta);
            return;
        }

        self.preferred_column = None;
        self.cursor = match movement {
            Movement::Left => self.prev_boundary(self.cursor),
            Movement::Right => self.next_boundary(self.cursor),
            Movement::LineStart => self.line_start(self.cursor),
            Movement::LineEnd => self.line_end(self.cursor),
            Movement::BufferStart => 0,
            Movement::BufferEnd => self.text.len(),
            Movement::Up | Movement::Down | Movement::PageUp(_) | Movement::PageDown(_) => {
                self.cursor
            }
        };
    }

    /// 全選択
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.text.len();
        self.preferred_column = None;
    }

    /// 選択範囲をクリップボードへコピー
    pub fn copy(&mut self) -> bool {
        match self.selected_text() {
            Some(text) => {
                let text = text.to_string();
                self.clipboard.set(text);
                true
            }
            None => false,
        }
    }

    /// 選択範囲を切り取り
    pub fn cut(&mut self) -> bool {
        self.copy() && self.delete_selection()
    }

    /// クリップボードの内容を貼り付け
    pub fn paste(&mut self) -> bool {
        match self.clipboard.get() {
            Some(text) => {
                self.insert_with_kind(&text, HistoryCommandKind::Other);
                true
            }
            None => false,
        }
    }

    /// 全文を消去（Undo可能）
    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.select_all();
        self.delete_selection()
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.take_for_undo() else {
            return false;
        };

        for edit in entry.operations.iter().rev() {
            edit.revert(&mut self.text);
        }
        self.cursor = entry.cursor_before;
        self.anchor = None;
        self.preferred_column = None;
        self.modified = true;
        self.history.push_redo(entry);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.take_for_redo() else {
            return false;
        };

        for edit in &entry.operations {
            edit.apply(&mut self.text);
        }
        self.cursor = entry.cursor_after;
        self.anchor = None;
        self.preferred_column = None;
        self.modified = true;
        self.history.push_without_clearing(entry);
        true
    }

    fn insert_with_kind(&mut self, text: &str, kind: HistoryCommandKind) {
        if text.is_empty() && !self.has_selection() {
            return;
        }

        let cursor_before = self.cursor;
        let kind = if self.has_selection() {
            HistoryCommandKind::Other
        } else {
            kind
        };

        let mut edits = Vec::new();
        self.delete_selection_into(&mut edits);

        if !text.is_empty() {
            let position = self.cursor;
            self.text.insert_str(position, text);
            edits.push(AtomicEdit::Insert {
                position,
                text: text.to_string(),
            });
            self.cursor = position + text.len();
        }

        self.commit(kind, edits, cursor_before);
    }

    fn delete_selection(&mut self) -> bool {
        let cursor_before = self.cursor;
        let mut edits = Vec::new();
        self.delete_selection_into(&mut edits);
        let changed = !edits.is_empty();
        self.commit(HistoryCommandKind::Other, edits, cursor_before);
        changed
    }

    fn delete_selection_into(&mut self, edits: &mut Vec<AtomicEdit>) {
        if let Some(range) = self.selection() {
            let removed = self.text[range.clone()].to_string();
            self.text.replace_range(range.clone(), "");
            edits.push(AtomicEdit::Delete {
                position: range.start,
                text: removed,
            });
            self.cursor = range.start;
        }
        self.anchor = None;
    }

    fn remove_range(&mut self, range: Range<usize>, kind: HistoryCommandKind) -> bool {
        let cursor_before = self.cursor;
        let removed = self.text[range.clone()].to_string();
        self.text.replace_range(range.clone(), "");
        self.cursor = range.start;
        self.commit(
            kind,
            vec![AtomicEdit::Delete {
                position: range.start,
                text: removed,
            }],
            cursor_before,
        );
        true
    }

    fn commit(&mut self, kind: HistoryCommandKind, edits: Vec<AtomicEdit>, cursor_before: usize) {
        self.preferred_column = None;
        if edits.is_empty() {
            return;
        }
        self.modified = true;
        self.history.push(HistoryEntry {
            command_kind: kind,
            operations: edits,
            cursor_before,
            cursor_after: self.cursor,
        });
    }

    fn update_anchor(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
    }

    fn collapse_to(&mut self, offset: usize) {
        self.cursor = offset;
        self.anchor = None;
        self.preferred_column = None;
    }

    fn vertical_target(&mut self, delta: isize) -> usize {
        let position = self.position_of(self.cursor);
        let column = *self.preferred_column.get_or_insert(position.column);
        let last_line = self.line_count() - 1;
        let target_line = (position.line as isize + delta).clamp(0, last_line as isize) as usize;
        self.offset_at(target_line, column)
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn prev_boundary(&self, offset: usize) -> usize {
        self.text[..offset]
            .char_indices()
            .next_back()
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.text[offset..]
            .chars()
            .next()
            .map(|ch| offset + ch.len_utf8())
            .unwrap_or(offset)
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map(|index| index + 1).unwrap_or(0)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..]
            .find('\n')
            .map(|index| offset + index)
            .unwrap_or(self.text.len())
    }
}

impl TextSurface for TextBuffer {
    fn content(&self) -> String {
        self.text.clone()
    }

    fn replace_content(&mut self, content: String) {
        self.set_text(content);
    }

    fn mark_saved(&mut self) {
        self.modified = false;
    }
}
