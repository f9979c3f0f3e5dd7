//! アクション定義
//!
//! メニュー・ツールバー・キーマップはすべてこの表から構築する。

use crate::input::keybinding::Key;

/// 利用者が起動できる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    OpenFile,
    SaveFile,
    SaveFileAs,
    PrintFile,
    Quit,
    Undo,
    Redo,
    Clear,
    Cut,
    Copy,
    Paste,
    SelectAll,
    ToggleWrap,
}

/// メニュー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    File,
    Edit,
}

impl Menu {
    pub const ALL: [Menu; 2] = [Menu::File, Menu::Edit];

    pub fn title(self) -> &'static str {
        match self {
            Menu::File => "File",
            Menu::Edit => "Edit",
        }
    }

    /// メニューバー上の順序
    pub fn index(self) -> usize {
        match self {
            Menu::File => 0,
            Menu::Edit => 1,
        }
    }

    pub fn next(self) -> Menu {
        Menu::ALL[(self.index() + 1) % Menu::ALL.len()]
    }

    pub fn previous(self) -> Menu {
        Menu::ALL[(self.index() + Menu::ALL.len() - 1) % Menu::ALL.len()]
    }
}

/// アクション表の1項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub action: Action,
    /// メニュー項目名
    pub label: &'static str,
    /// ステータスバーに表示する説明
    pub status_tip: &'static str,
    /// ツールバー表示名（`None` ならツールバーに載せない）
    pub toolbar_label: Option<&'static str>,
    /// ショートカット（先頭がメニューに表示される）
    pub shortcuts: &'static [Key],
    pub menu: Menu,
    /// メニュー・ツールバーでこの項目の前に区切りを入れる
    pub separator_before: bool,
}

impl ActionSpec {
    /// メニューに表示するショートカット
    pub fn shortcut_label(&self) -> Option<String> {
        self.shortcuts.first().map(|key| key.to_string())
    }
}

pub static ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        action: Action::OpenFile,
        label: "Open File",
        status_tip: "Open File",
        toolbar_label: Some("Open"),
        shortcuts: &[Key::ctrl('o')],
        menu: Menu::File,
        separator_before: false,
    },
    ActionSpec {
        action: Action::SaveFile,
        label: "Save File",
        status_tip: "Save File",
        toolbar_label: Some("Save"),
        shortcuts: &[Key::ctrl('s')],
        menu: Menu::File,
        separator_before: false,
    },
    ActionSpec {
        action: Action::SaveFileAs,
        label: "Save As File",
        status_tip: "Save As File",
        toolbar_label: Some("Save As"),
        shortcuts: &[Key::ctrl_shift('s'), Key::function(12)],
        menu: Menu::File,
        separator_before: false,
    },
    ActionSpec {
        action: Action::PrintFile,
        label: "Print File",
        status_tip: "Print File",
        toolbar_label: Some("Print"),
        shortcuts: &[Key::ctrl('p')],
        menu: Menu::File,
        separator_before: false,
    },
    ActionSpec {
        action: Action::Quit,
        label: "Quit",
        status_tip: "Quit Notepad Dev",
        toolbar_label: None,
        shortcuts: &[Key::ctrl('q')],
        menu: Menu::File,
        separator_before: true,
    },
    ActionSpec {
        action: Action::Undo,
        label: "Undo",
        status_tip: "Undo",
        toolbar_label: Some("Undo"),
        shortcuts: &[Key::ctrl('z')],
        menu: Menu::Edit,
        separator_before: false,
    },
    ActionSpec {
        action: Action::Redo,
        label: "Redo",
        status_tip: "Redo",
        toolbar_label: Some("Redo"),
        shortcuts: &[Key::ctrl('y'), Key::ctrl_shift('z')],
        menu: Menu::Edit,
        separator_before: false,
    },
    ActionSpec {
        action: Action::Clear,
        label: "Clear",
        status_tip: "Clear",
        toolbar_label: Some("Clear"),
        shortcuts: &[],
        menu: Menu::Edit,
        separator_before: false,
    },
    ActionSpec {
        action: Action::Cut,
        label: "Cut",
        status_tip: "Cut",
        toolbar_label: Some("Cut"),
        shortcuts: &[Key::ctrl('x')],
        menu: Menu::Edit,
        separator_before: true,
    },
    ActionSpec {
        action: Action::Copy,
        label: "Copy",
        status_tip: "Copy",
        toolbar_label: Some("Copy"),
        shortcuts: &[Key::ctrl('c')],
        menu: Menu::Edit,
        separator_before: false,
    },
    ActionSpec {
        action: Action::Paste,
        label: "Paste",
        status_tip: "Paste",
        toolbar_label: Some("Paste"),
        shortcuts: &[Key::ctrl('v')],
        menu: Menu::Edit,
        separator_before: false,
    },
    ActionSpec {
        action: Action::SelectAll,
        label: "Select All",
        status_tip: "Select All",
        toolbar_label: Some("Select All"),
        shortcuts: &[Key::ctrl('a')],
        menu: Menu::Edit,
        separator_before: false,
    },
    ActionSpec {
        action: Action::ToggleWrap,
        label: "Wrap Text",
        status_tip: "Wrap Text",
        toolbar_label: Some("Wrap"),
        shortcuts: &[Key::ctrl_shift('w'), Key::alt('z')],
        menu: Menu::Edit,
        separator_before: true,
    },
];

/// アクションの定義を取得
pub fn spec(action: Action) -> Option<&'static ActionSpec> {
    ACTIONS.iter().find(|spec| spec.action == action)
}

/// メニュー項目（表の順序どおり）
pub fn menu_entries(menu: Menu) -> impl Iterator<Item = &'static ActionSpec> {
    ACTIONS.iter().filter(move |spec| spec.menu == menu)
}

/// ツールバー項目（表の順序どおり）
pub fn toolbar_entries() -> impl Iterator<Item = &'static ActionSpec> {
    ACTIONS.iter().filter(|spec| spec.toolbar_label.is_some())
}
