//! 確認ダイアログ（印刷・上書き保存）

use crate::input::keybinding::{Key, KeyCode};
use crate::ui::layout::{centered_rect, contains};
use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::Path;

const CANCEL_BUTTON: &str = "[ Cancel ]";
const BUTTON_GAP: u16 = 3;

/// ダイアログ操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    Pending,
    Confirmed,
    Cancelled,
}

/// はい/いいえの確認ダイアログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    title: &'static str,
    prompt: String,
    /// 対象（印刷先・ファイルパス）
    subject: String,
    confirm_label: &'static str,
    /// Enter で確定するか（false なら Enter は取消）
    enter_confirms: bool,
}

impl ConfirmDialog {
    /// 印刷の確認
    pub fn print(target: impl Into<String>, char_count: usize) -> Self {
        Self {
            title: "Print File",
            prompt: format!("Send {} characters to:", char_count),
            subject: target.into(),
            confirm_label: "Print",
            enter_confirms: true,
        }
    }

    /// 既存ファイルの上書き確認（既定は取消）
    pub fn overwrite(path: &Path) -> Self {
        Self {
            title: "Confirm Save As",
            prompt: "File already exists. Replace it?".to_string(),
            subject: path.display().to_string(),
            confirm_label: "Replace",
            enter_confirms: false,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    fn confirm_button(&self) -> String {
        format!("[ {} ]", self.confirm_label)
    }

    /// 確定ボタンのアクセスキー（ラベル先頭の小文字）
    fn access_key(&self) -> Option<char> {
        self.confirm_label
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
    }

    pub fn handle_key(&self, key: &Key) -> DialogEvent {
        match key.code {
            KeyCode::Enter if self.enter_confirms => DialogEvent::Confirmed,
            KeyCode::Enter => DialogEvent::Cancelled,
            KeyCode::Char('y') => DialogEvent::Confirmed,
            KeyCode::Char(c) if Some(c) == self.access_key() => DialogEvent::Confirmed,
            KeyCode::Esc | KeyCode::Char('n') => DialogEvent::Cancelled,
            _ => DialogEvent::Pending,
        }
    }

    pub fn area(&self, screen: Rect) -> Rect {
        let text_width = self.subject.chars().count().max(self.prompt.chars().count()) as u16;
        let width = (text_width + 16).clamp(40, 70);
        centered_rect(width, 7, screen)
    }

    /// ボタン行の位置（確定, 取消）
    fn button_rects(&self, area: Rect) -> (Rect, Rect) {
        // 枠内4行目にボタンを中央揃え
        let confirm_width = self.confirm_button().chars().count() as u16;
        let cancel_width = CANCEL_BUTTON.chars().count() as u16;
        let total = confirm_width + BUTTON_GAP + cancel_width;

        let y = area.y + 4;
        let inner_width = area.width.saturating_sub(2);
        let start = area.x + 1 + inner_width.saturating_sub(total) / 2;
        (
            Rect::new(start, y, confirm_width, 1),
            Rect::new(start + confirm_width + BUTTON_GAP, y, cancel_width, 1),
        )
    }

    /// ボタンのクリック判定
    pub fn handle_click(&self, screen: Rect, x: u16, y: u16) -> DialogEvent {
        let (confirm, cancel) = self.button_rects(self.area(screen));
        if contains(confirm, x, y) {
            DialogEvent::Confirmed
        } else if contains(cancel, x, y) {
            DialogEvent::Cancelled
        } else {
            DialogEvent::Pending
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, theme: &Theme) {
        let area = self.area(frame.area());
        let button = theme.style(ComponentType::ListSelected);

        let lines = vec![
            Line::from(self.prompt.clone()),
            Line::styled(self.subject.clone(), theme.style(ComponentType::Directory)),
            Line::from(""),
            Line::from(vec![
                Span::styled(self.confirm_button(), button),
                Span::raw(" ".repeat(BUTTON_GAP as usize)),
                Span::styled(CANCEL_BUTTON, button),
            ])
            .alignment(Alignment::Center),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.style(ComponentType::DialogBorder))
                    .title(format!(" {} ", self.title)),
            ),
            area,
        );
    }
}
