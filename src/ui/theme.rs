//! テーマ
//!
//! UIコンポーネントごとの色設定

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// タイトルバー
    TitleBar,
    /// メニューバー
    MenuBar,
    /// 開いているメニューの見出し
    MenuBarActive,
    /// メニュー項目
    MenuItem,
    /// 選択中のメニュー項目
    MenuItemSelected,
    /// ツールバー
    Toolbar,
    /// ツールバーのボタン
    ToolbarButton,
    /// テキストエリア
    TextArea,
    /// 選択範囲
    Selection,
    /// ステータスライン
    StatusLine,
    /// ダイアログ枠
    DialogBorder,
    /// 一覧の選択項目
    ListSelected,
    /// ディレクトリ項目
    Directory,
    /// エラーメッセージ
    Error,
    /// 補足表示
    Hint,
}

/// カラー設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// 前景色
    pub foreground: Color,
    /// 背景色
    pub background: Color,
    /// 修飾子
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定（16色端末で表示できる色のみ使う）
#[derive(Debug, Clone)]
pub struct Theme {
    colors: HashMap<ComponentType, ColorScheme>,
}

impl Theme {
    pub fn new() -> Self {
        let mut theme = Self {
            colors: HashMap::new(),
        };
        theme.set_default_colors();
        theme
    }

    /// コンポーネントのスタイル（未設定なら端末既定）
    pub fn style(&self, component: ComponentType) -> Style {
        self.colors
            .get(&component)
            .map(ColorScheme::to_style)
            .unwrap_or_default()
    }

    pub fn set_color(&mut self, component: ComponentType, color_scheme: ColorScheme) {
        self.colors.insert(component, color_scheme);
    }

    fn set_default_colors(&mut self) {
        use ComponentType::*;

        self.set_color(
            TitleBar,
            ColorScheme::new(Color::White, Color::Blue).with_modifier(Modifier::BOLD),
        );
        self.set_color(MenuBar, ColorScheme::new(Color::Black, Color::Gray));
        self.set_color(MenuBarActive, ColorScheme::new(Color::White, Color::Blue));
        self.set_color(MenuItem, ColorScheme::new(Color::Black, Color::Gray));
        self.set_color(MenuItemSelected, ColorScheme::new(Color::White, Color::Blue));
        self.set_color(Toolbar, ColorScheme::new(Color::Black, Color::Gray));
        self.set_color(ToolbarButton, ColorScheme::new(Color::Blue, Color::Gray));
        self.set_color(Selection, ColorScheme::new(Color::Black, Color::Cyan));
        self.set_color(StatusLine, ColorScheme::new(Color::Black, Color::Gray));
        self.set_color(DialogBorder, ColorScheme::new(Color::Cyan, Color::Reset));
        self.set_color(ListSelected, ColorScheme::new(Color::Black, Color::Cyan));
        self.set_color(
            Directory,
            ColorScheme::new(Color::Blue, Color::Reset).with_modifier(Modifier::BOLD),
        );
        self.set_color(
            Error,
            ColorScheme::new(Color::Red, Color::Reset).with_modifier(Modifier::BOLD),
        );
        self.set_color(Hint, ColorScheme::new(Color::DarkGray, Color::Reset));
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
