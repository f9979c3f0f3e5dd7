//! ファイル選択ダイアログの描画

use crate::picker::FilePicker;
use crate::ui::layout::{centered_rect, contains};
use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// 一覧より上の行数（入力欄・フィルタ・空行）
const HEADER_ROWS: u16 = 3;
/// 一覧より下の行数（メッセージ・操作説明）
const FOOTER_ROWS: u16 = 2;

/// ダイアログの領域
pub fn picker_area(screen: Rect) -> Rect {
    let width = screen.width.saturating_sub(8).clamp(20, 90);
    let height = screen.height.saturating_sub(4).clamp(8, 30);
    centered_rect(width, height, screen)
}

/// 一覧部分の領域
pub fn list_area(screen: Rect) -> Rect {
    let area = picker_area(screen);
    let inner = inner(area);
    Rect::new(
        inner.x,
        inner.y + HEADER_ROWS,
        inner.width,
        inner.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS),
    )
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// 一覧のスクロール位置（選択項目が見えるように）
fn list_offset(picker: &FilePicker, rows: usize) -> usize {
    match picker.selected() {
        Some(selected) if rows > 0 && selected >= rows => selected + 1 - rows,
        _ => 0,
    }
}

/// クリック位置の一覧項目
pub fn entry_at(picker: &FilePicker, screen: Rect, x: u16, y: u16) -> Option<usize> {
    let list = list_area(screen);
    if !contains(list, x, y) {
        return None;
    }
    let index = list_offset(picker, list.height as usize) + (y - list.y) as usize;
    (index < picker.entries().len()).then_some(index)
}

/// ダイアログを描画してカーソル位置を返す
pub fn render_picker(frame: &mut Frame<'_>, picker: &FilePicker, theme: &Theme) -> Option<(u16, u16)> {
    let screen = frame.area();
    let area = picker_area(screen);
    let inner_area = inner(area);
    let list = list_area(screen);
    let width = inner_area.width as usize;

    // 入力欄は末尾が見えるように左を切る
    let prompt = "Path: ";
    let field_width = width.saturating_sub(prompt.len()).max(1);
    let input = picker.input();
    let mut visible_input = input;
    while visible_input.width() >= field_width {
        let mut chars = visible_input.chars();
        chars.next();
        visible_input = chars.as_str();
    }

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(vec![
            Span::styled(prompt, theme.style(ComponentType::Hint)),
            Span::raw(visible_input.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Filter: ", theme.style(ComponentType::Hint)),
            Span::raw(picker.filter_label()),
        ]),
        Line::from(""),
    ];

    let rows = list.height as usize;
    let offset = list_offset(picker, rows);
    for (index, entry) in picker.entries().iter().enumerate().skip(offset).take(rows) {
        let style = if picker.selected() == Some(index) {
            theme.style(ComponentType::ListSelected)
        } else if entry.is_dir {
            theme.style(ComponentType::Directory)
        } else {
            theme.style(ComponentType::TextArea)
        };
        lines.push(Line::styled(format!(" {}", entry.display_name()), style));
    }
    while lines.len() < (HEADER_ROWS as usize + rows) {
        lines.push(Line::from(""));
    }

    lines.push(match picker.message() {
        Some(message) => Line::styled(message.to_string(), theme.style(ComponentType::Error)),
        None => Line::from(""),
    });
    lines.push(Line::styled(
        "Enter: open  Tab: complete  Ctrl+T: filter  Esc: cancel",
        theme.style(ComponentType::Hint),
    ));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.style(ComponentType::DialogBorder))
                .title(format!(" {} ", picker.mode().caption())),
        ),
        area,
    );

    if inner_area.width == 0 || inner_area.height == 0 {
        return None;
    }
    let cursor_x = prompt.len() + visible_input.width();
    Some((
        inner_area.x + cursor_x.min(width.saturating_sub(1)) as u16,
        inner_area.y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PickerMode;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn list_area_sits_below_header() {
        let screen = Rect::new(0, 0, 80, 24);
        let area = picker_area(screen);
        let list = list_area(screen);
        assert_eq!(list.y, area.y + 1 + HEADER_ROWS);
        assert_eq!(list.height, area.height - 2 - HEADER_ROWS - FOOTER_ROWS);
    }

    #[test]
    fn click_selects_listed_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        let picker = FilePicker::new(PickerMode::Open, dir.path(), None);
        let screen = Rect::new(0, 0, 80, 24);
        let list = list_area(screen);

        // 0: "..", 1: "a.txt"
        assert_eq!(entry_at(&picker, screen, list.x + 1, list.y + 1), Some(1));
        assert_eq!(entry_at(&picker, screen, list.x + 1, list.y + 2), None);
        assert_eq!(entry_at(&picker, screen, 0, 0), None);
    }
}
