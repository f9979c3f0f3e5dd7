//! 入力処理モジュール
//!
//! アクション表とキーマップ

pub mod actions;
pub mod keybinding;

pub use actions::{menu_entries, spec, toolbar_entries, Action, ActionSpec, Menu, ACTIONS};
pub use keybinding::{EditCommand, Key, KeyCode, KeyMap, KeyModifiers, KeyProcessResult};
