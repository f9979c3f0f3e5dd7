//! 通知ダイアログ
//!
//! 操作の失敗や完了を伝えるモーダル。確認されるまで他の入力を受け付けない。

use crate::error::NotepadError;
use crate::input::keybinding::{Key, KeyCode};
use crate::ui::layout::centered_rect;
use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// 通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: NotificationKind,
    title: String,
    message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, "Error", message)
    }

    /// エラーから利用者向けの通知を作る
    pub fn from_error(error: &NotepadError) -> Self {
        let title = match error {
            NotepadError::File(_) => "File Error",
            NotepadError::Print(_) => "Print Error",
            NotepadError::Ui(_) | NotepadError::Config(_) => "Error",
        };
        Self::new(NotificationKind::Error, title, error.to_string())
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 閉じるキーか
    pub fn is_dismiss_key(key: &Key) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
    }

    /// ダイアログの領域
    pub fn area(&self, screen: Rect) -> Rect {
        let longest = self
            .message
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.title.chars().count());
        let width = (longest as u16 + 4).clamp(24, 70);
        let inner = width.saturating_sub(4).max(1) as usize;
        let wrapped_rows: usize = self
            .message
            .lines()
            .map(|line| line.chars().count().max(1).div_ceil(inner))
            .sum();
        centered_rect(width, wrapped_rows.max(1) as u16 + 4, screen)
    }

    pub fn render(&self, frame: &mut Frame<'_>, theme: &Theme) {
        let area = self.area(frame.area());
        let title_style = match self.kind {
            NotificationKind::Error => theme.style(ComponentType::Error),
            NotificationKind::Info => theme.style(ComponentType::DialogBorder),
        };

        let mut lines: Vec<Line<'static>> = self
            .message
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::styled("[ OK ]", theme.style(ComponentType::ListSelected)).alignment(Alignment::Center));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.style(ComponentType::DialogBorder))
                    .title(Line::styled(format!(" {} ", self.title), title_style)),
            ),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keybinding::Key;

    #[test]
    fn dismiss_keys() {
        assert!(Notification::is_dismiss_key(&Key::plain(KeyCode::Enter)));
        assert!(Notification::is_dismiss_key(&Key::plain(KeyCode::Esc)));
        assert!(Notification::is_dismiss_key(&Key::plain(KeyCode::Char(' '))));
        assert!(!Notification::is_dismiss_key(&Key::plain(KeyCode::Char('x'))));
    }

    #[test]
    fn file_errors_keep_their_message() {
        let error = NotepadError::File(crate::error::FileError::NotFound {
            path: "/tmp/missing.txt".to_string(),
        });
        let notification = Notification::from_error(&error);
        assert_eq!(notification.kind(), NotificationKind::Error);
        assert_eq!(notification.title(), "File Error");
        assert_eq!(
            notification.message(),
            "No such file or directory: /tmp/missing.txt"
        );
    }

    #[test]
    fn area_grows_with_message() {
        let screen = Rect::new(0, 0, 80, 24);
        let short = Notification::error("oops").area(screen);
        assert_eq!(short.width, 24);
        assert_eq!(short.height, 5);

        let long = Notification::error("x".repeat(200)).area(screen);
        assert_eq!(long.width, 70);
        assert!(long.height > 5);
    }
}
