//! キーバインドシステム
//!
//! 端末のキーイベントを内部表現に変換し、アクション表から作ったキーマップで
//! アクションまたは編集コマンドへ解決する。

use crate::buffer::Movement;
use crate::input::actions::{Action, ACTIONS};
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;
use std::fmt;

/// キー入力の内部表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
    };
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        alt: false,
        shift: true,
    };
    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
    };
    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
    };
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { modifiers, code }
    }

    /// 修飾キーなし
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CTRL)
    }

    pub const fn ctrl_shift(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CTRL_SHIFT)
    }

    pub const fn alt(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::ALT)
    }

    pub const fn function(n: u8) -> Self {
        Self::plain(KeyCode::F(n))
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// 確認・取り消しキー
    pub fn is_enter(&self) -> bool {
        self.code == KeyCode::Enter
    }

    pub fn is_escape(&self) -> bool {
        self.code == KeyCode::Esc
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }

        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Backspace => f.write_str("Backspace"),
            KeyCode::Delete => f.write_str("Del"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Up => f.write_str("Up"),
            KeyCode::Down => f.write_str("Down"),
            KeyCode::Left => f.write_str("Left"),
            KeyCode::Right => f.write_str("Right"),
            KeyCode::Home => f.write_str("Home"),
            KeyCode::End => f.write_str("End"),
            KeyCode::PageUp => f.write_str("PgUp"),
            KeyCode::PageDown => f.write_str("PgDn"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Unknown => f.write_str("?"),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let ctrl = event.modifiers.contains(CrosstermModifiers::CONTROL);
        let alt = event.modifiers.contains(CrosstermModifiers::ALT);
        let mut shift = event.modifiers.contains(CrosstermModifiers::SHIFT);

        let code = match event.code {
            CrosstermKeyCode::Char(c) if (ctrl || alt) && c.is_ascii_uppercase() => {
                // 端末によって Ctrl+Shift+S は 'S' としても届く
                shift = true;
                KeyCode::Char(c.to_ascii_lowercase())
            }
            CrosstermKeyCode::Char(c) => {
                if !ctrl && !alt {
                    // 通常文字のShiftは文字自体に反映済み
                    shift = false;
                }
                KeyCode::Char(c)
            }
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::BackTab => {
                shift = true;
                KeyCode::Tab
            }
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::PageUp => KeyCode::PageUp,
            CrosstermKeyCode::PageDown => KeyCode::PageDown,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key {
            modifiers: KeyModifiers { ctrl, alt, shift },
            code,
        }
    }
}

/// テキスト編集コマンド（アクション表に載らない基本操作）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Insert(char),
    Newline,
    DeleteBackward,
    DeleteForward,
    /// 移動（第2要素が真なら選択範囲を伸ばす）。ページ移動の行数は表示高さで補う。
    Move(Movement, bool),
}

/// キー処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProcessResult {
    Action(Action),
    Edit(EditCommand),
    NoMatch,
}

/// アクション表から構築したキーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl KeyMap {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        for spec in ACTIONS {
            for shortcut in spec.shortcuts {
                bindings.insert(*shortcut, spec.action);
            }
        }
        Self { bindings }
    }

    /// 登録済みショートカットの検索
    pub fn lookup(&self, key: &Key) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// キーをアクションまたは編集コマンドへ解決
    pub fn resolve(&self, key: &Key) -> KeyProcessResult {
        if let Some(action) = self.lookup(key) {
            return KeyProcessResult::Action(action);
        }

        if key.is_insertable_char() {
            if let KeyCode::Char(c) = key.code {
                return KeyProcessResult::Edit(EditCommand::Insert(c));
            }
        }

        let KeyModifiers { ctrl, alt, shift } = key.modifiers;
        if alt {
            return KeyProcessResult::NoMatch;
        }

        let command = match key.code {
            KeyCode::Enter if !ctrl => EditCommand::Newline,
            KeyCode::Tab if !ctrl && !shift => EditCommand::Insert('\t'),
            KeyCode::Backspace => EditCommand::DeleteBackward,
            KeyCode::Delete => EditCommand::DeleteForward,
            KeyCode::Left => EditCommand::Move(Movement::Left, shift),
            KeyCode::Right => EditCommand::Move(Movement::Right, shift),
            KeyCode::Up => EditCommand::Move(Movement::Up, shift),
            KeyCode::Down => EditCommand::Move(Movement::Down, shift),
            KeyCode::Home if ctrl => EditCommand::Move(Movement::BufferStart, shift),
            KeyCode::End if ctrl => EditCommand::Move(Movement::BufferEnd, shift),
            KeyCode::Home => EditCommand::Move(Movement::LineStart, shift),
            KeyCode::End => EditCommand::Move(Movement::LineEnd, shift),
            KeyCode::PageUp => EditCommand::Move(Movement::PageUp(0), shift),
            KeyCode::PageDown => EditCommand::Move(Movement::PageDown(0), shift),
            _ => return KeyProcessResult::NoMatch,
        };
        KeyProcessResult::Edit(command)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}
