//! ツールバー

use crate::input::actions::{toolbar_entries, Action};
use crate::ui::layout::contains;
use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SEPARATOR: &str = " │";

/// ボタンの配置（画面に収まるものだけ）
pub fn button_rects(bar: Rect) -> Vec<(Action, Rect)> {
    let mut buttons = Vec::new();
    let right = bar.x + bar.width;
    let mut x = bar.x;
    let mut previous_menu = None;

    for spec in toolbar_entries() {
        let Some(label) = spec.toolbar_label else {
            continue;
        };
        // メニューの切れ目と区切り指定の位置に区切り線
        let group_changed = previous_menu.map_or(false, |menu| menu != spec.menu);
        if previous_menu.is_some() && (spec.separator_before || group_changed) {
            x += SEPARATOR.chars().count() as u16;
        }
        let width = label.len() as u16 + 2;
        if x + width > right {
            break;
        }
        buttons.push((spec.action, Rect::new(x, bar.y, width, 1)));
        x += width + 1;
        previous_menu = Some(spec.menu);
    }

    buttons
}

/// クリック位置のボタン
pub fn button_at(bar: Rect, x: u16, y: u16) -> Option<Action> {
    button_rects(bar)
        .into_iter()
        .find(|(_, rect)| contains(*rect, x, y))
        .map(|(action, _)| action)
}

/// ツールバーを描画
pub fn render_toolbar(frame: &mut Frame<'_>, bar: Rect, theme: &Theme) {
    let base = theme.style(ComponentType::Toolbar);
    let button = theme.style(ComponentType::ToolbarButton);
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut x = bar.x;

    for (action, rect) in button_rects(bar) {
        let label = toolbar_entries()
            .find(|spec| spec.action == action)
            .and_then(|spec| spec.toolbar_label)
            .unwrap_or_default();
        if rect.x > x {
            let gap = (rect.x - x) as usize;
            let filler = if gap > 1 {
                format!("{}{}", SEPARATOR, " ".repeat(gap - SEPARATOR.chars().count()))
            } else {
                " ".repeat(gap)
            };
            spans.push(Span::styled(filler, base));
        }
        spans.push(Span::styled(format!("[{}]", label), button));
        x = rect.x + rect.width;
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), bar);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_are_laid_out_left_to_right() {
        let bar = Rect::new(0, 2, 200, 1);
        let buttons = button_rects(bar);
        assert_eq!(buttons.len(), 12);
        assert_eq!(buttons[0], (Action::OpenFile, Rect::new(0, 2, 6, 1)));
        assert_eq!(buttons[1], (Action::SaveFile, Rect::new(7, 2, 6, 1)));
        assert!(buttons.iter().all(|(action, _)| *action != Action::Quit));
    }

    #[test]
    fn narrow_toolbar_drops_overflow() {
        let bar = Rect::new(0, 0, 14, 1);
        let buttons = button_rects(bar);
        assert_eq!(buttons.len(), 2);
    }

    #[test]
    fn click_maps_to_action() {
        let bar = Rect::new(0, 2, 200, 1);
        assert_eq!(button_at(bar, 1, 2), Some(Action::OpenFile));
        assert_eq!(button_at(bar, 6, 2), None);
        assert_eq!(button_at(bar, 8, 2), Some(Action::SaveFile));
        assert_eq!(button_at(bar, 8, 3), None);
    }
}
