//! メニューバーとドロップダウンメニュー

use crate::input::actions::{menu_entries, Action, ActionSpec, Menu};
use crate::input::keybinding::{Key, KeyCode};
use crate::ui::layout::contains;
use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::ops::Range;

/// メニュー操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Pending,
    Close,
    Run(Action),
}

/// 開いているメニューの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    menu: Menu,
    selected: usize,
}

impl MenuState {
    pub fn new(menu: Menu) -> Self {
        Self { menu, selected: 0 }
    }

    pub fn menu(&self) -> Menu {
        self.menu
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn items(&self) -> Vec<&'static ActionSpec> {
        menu_entries(self.menu).collect()
    }

    /// 別のメニューに切り替える
    pub fn switch_to(&mut self, menu: Menu) {
        self.menu = menu;
        self.selected = 0;
    }

    pub fn handle_key(&mut self, key: &Key) -> MenuEvent {
        let count = self.items().len();
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => MenuEvent::Close,
            KeyCode::Left => {
                self.switch_to(self.menu.previous());
                MenuEvent::Pending
            }
            KeyCode::Right | KeyCode::Tab => {
                self.switch_to(self.menu.next());
                MenuEvent::Pending
            }
            KeyCode::Up if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
                MenuEvent::Pending
            }
            KeyCode::Down if count > 0 => {
                self.selected = (self.selected + 1) % count;
                MenuEvent::Pending
            }
            KeyCode::Enter => self
                .items()
                .get(self.selected)
                .map_or(MenuEvent::Close, |spec| MenuEvent::Run(spec.action)),
            _ => MenuEvent::Pending,
        }
    }

    /// ドロップダウンの各行（`None` は区切り線）
    fn rows(&self) -> Vec<Option<usize>> {
        let mut rows = Vec::new();
        for (index, spec) in self.items().iter().enumerate() {
            if spec.separator_before && index > 0 {
                rows.push(None);
            }
            rows.push(Some(index));
        }
        rows
    }

    /// ドロップダウンの領域
    pub fn dropdown_rect(&self, bar: Rect, screen: Rect) -> Rect {
        let inner_width = self
            .items()
            .iter()
            .map(|spec| item_width(spec))
            .max()
            .unwrap_or(0);
        let x = title_ranges(bar)
            .into_iter()
            .find(|(menu, _)| *menu == self.menu)
            .map_or(bar.x, |(_, range)| range.start);

        let width = (inner_width as u16 + 2).min(screen.width);
        let height = (self.rows().len() as u16 + 2).min(screen.height.saturating_sub(bar.y + 1));
        let x = x.min(screen.x + screen.width - width);
        Rect::new(x, bar.y + 1, width, height)
    }

    /// ドロップダウン内のクリック位置から項目を求める
    pub fn item_at(&self, bar: Rect, screen: Rect, x: u16, y: u16) -> Option<usize> {
        let rect = self.dropdown_rect(bar, screen);
        let inner = Rect::new(
            rect.x + 1,
            rect.y + 1,
            rect.width.saturating_sub(2),
            rect.height.saturating_sub(2),
        );
        if !contains(inner, x, y) {
            return None;
        }
        self.rows()
            .get((y - inner.y) as usize)
            .copied()
            .flatten()
    }

    /// ドロップダウンを描画
    pub fn render(&self, frame: &mut Frame<'_>, bar: Rect, theme: &Theme) {
        let screen = frame.area();
        let rect = self.dropdown_rect(bar, screen);
        if rect.width < 3 || rect.height < 3 {
            return;
        }

        let inner_width = rect.width as usize - 2;
        let items = self.items();
        let lines: Vec<Line<'static>> = self
            .rows()
            .into_iter()
            .map(|row| match row {
                None => Line::styled("─".repeat(inner_width), theme.style(ComponentType::MenuItem)),
                Some(index) => {
                    let style = if index == self.selected {
                        theme.style(ComponentType::MenuItemSelected)
                    } else {
                        theme.style(ComponentType::MenuItem)
                    };
                    Line::styled(item_text(items[index], inner_width), style)
                }
            })
            .collect();

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(theme.style(ComponentType::MenuItem)),
            ),
            rect,
        );
    }
}

fn item_width(spec: &ActionSpec) -> usize {
    let shortcut = spec.shortcut_label().map_or(0, |label| label.len() + 2);
    spec.label.len() + shortcut + 2
}

fn item_text(spec: &ActionSpec, width: usize) -> String {
    let shortcut = spec.shortcut_label().unwrap_or_default();
    let padding = width.saturating_sub(spec.label.len() + shortcut.len() + 2);
    format!(" {}{}{} ", spec.label, " ".repeat(padding), shortcut)
}

/// メニューバー上の各見出しの桁範囲
pub fn title_ranges(bar: Rect) -> Vec<(Menu, Range<u16>)> {
    let mut x = bar.x;
    Menu::ALL
        .iter()
        .map(|menu| {
            let width = menu.title().len() as u16 + 2;
            let range = x..x + width;
            x += width;
            (*menu, range)
        })
        .collect()
}

/// メニューバーのクリック位置から見出しを求める
pub fn menu_at(bar: Rect, x: u16, y: u16) -> Option<Menu> {
    if !contains(bar, x, y) {
        return None;
    }
    title_ranges(bar)
        .into_iter()
        .find(|(_, range)| range.contains(&x))
        .map(|(menu, _)| menu)
}

/// メニューバーを描画
pub fn render_menu_bar(frame: &mut Frame<'_>, bar: Rect, open: Option<Menu>, theme: &Theme) {
    let spans: Vec<Span<'static>> = Menu::ALL
        .iter()
        .map(|menu| {
            let style = if open == Some(*menu) {
                theme.style(ComponentType::MenuBarActive)
            } else {
                theme.style(ComponentType::MenuBar)
            };
            Span::styled(format!(" {} ", menu.title()), style)
        })
        .chain(std::iter::once(Span::styled(
            "  F10: menu",
            theme.style(ComponentType::MenuBar),
        )))
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.style(ComponentType::MenuBar)),
        bar,
    );
}
