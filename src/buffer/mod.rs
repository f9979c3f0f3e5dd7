//! バッファモジュール
//!
//! 編集面（テキストウィジェット相当）の実装

pub mod clipboard;
pub mod history;
pub mod text_buffer;

pub use clipboard::Clipboard;
pub use history::{AtomicEdit, HistoryCommandKind, HistoryEntry, HistoryStack};
pub use text_buffer::{CursorPosition, Movement, TextBuffer};
