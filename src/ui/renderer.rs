//! 画面全体の描画

use crate::buffer::CursorPosition;
use crate::picker::FilePicker;
use crate::ui::{
    confirm_dialog::ConfirmDialog,
    layout::{AreaType, LayoutManager},
    menu::{render_menu_bar, MenuState},
    notification::Notification,
    picker_view::render_picker,
    text_area::TextAreaContent,
    theme::{ComponentType, Theme},
    toolbar::render_toolbar,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 前面に表示するモーダル
#[derive(Debug, Clone, Copy)]
pub enum ModalView<'a> {
    None,
    Menu(&'a MenuState),
    Picker(&'a FilePicker),
    Confirm(&'a ConfirmDialog),
}

/// 1フレーム分の描画内容
#[derive(Debug, Clone)]
pub struct RenderView<'a> {
    /// ウィンドウタイトル
    pub title: &'a str,
    pub text: TextAreaContent<'a>,
    pub cursor: CursorPosition,
    pub wrap: bool,
    pub modified: bool,
    /// ステータスラインの左側に出すメッセージ
    pub status: &'a str,
    pub modal: ModalView<'a>,
    pub notification: Option<&'a Notification>,
}

/// レンダラー
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    layout: LayoutManager,
    theme: Theme,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(&self, frame: &mut Frame<'_>, view: &RenderView<'_>) {
        let areas = self.layout.calculate_areas(frame.area());
        let mut cursor = None;

        if let Some(&area) = areas.get(&AreaType::TitleBar) {
            self.render_title_bar(frame, area, view);
        }
        let open_menu = match view.modal {
            ModalView::Menu(state) => Some(state.menu()),
            _ => None,
        };
        if let Some(&area) = areas.get(&AreaType::MenuBar) {
            render_menu_bar(frame, area, open_menu, &self.theme);
        }
        if let Some(&area) = areas.get(&AreaType::Toolbar) {
            render_toolbar(frame, area, &self.theme);
        }
        if let Some(&area) = areas.get(&AreaType::TextArea) {
            cursor = view.text.render(frame, area, &self.theme);
        }
        if let Some(&area) = areas.get(&AreaType::StatusLine) {
            self.render_status_line(frame, area, view);
        }

        match view.modal {
            ModalView::None => {}
            ModalView::Menu(state) => {
                if let Some(&bar) = areas.get(&AreaType::MenuBar) {
                    state.render(frame, bar, &self.theme);
                }
                cursor = None;
            }
            ModalView::Picker(picker) => {
                cursor = render_picker(frame, picker, &self.theme);
            }
            ModalView::Confirm(dialog) => {
                dialog.render(frame, &self.theme);
                cursor = None;
            }
        }

        if let Some(notification) = view.notification {
            notification.render(frame, &self.theme);
            cursor = None;
        }

        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        frame.render_widget(
            Paragraph::new(view.title)
                .alignment(Alignment::Center)
                .style(self.theme.style(ComponentType::TitleBar)),
            area,
        );
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let style = self.theme.style(ComponentType::StatusLine);
        let position = format!(
            "{}Ln {}, Col {}  {}",
            if view.modified { "Modified  " } else { "" },
            view.cursor.line + 1,
            view.cursor.column + 1,
            if view.wrap { "Wrap" } else { "No Wrap" }
        );

        let room = (area.width as usize).saturating_sub(position.len() + 2);
        let status: String = view.status.chars().take(room).collect();
        let padding = room - status.chars().count();

        let line = Line::from(vec![
            Span::styled(format!(" {}", status), style),
            Span::styled(" ".repeat(padding), style),
            Span::styled(format!("{} ", position), style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
