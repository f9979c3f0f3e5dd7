//! テキストエリア描画
//!
//! 論理行を画面上の表示行へ割り付け、選択範囲とカーソルを含めて描画する。
//! 折り返し有効時は表示幅で行を分割し、無効時は横スクロールする。

use crate::ui::theme::{ComponentType, Theme};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// 文字の表示幅（タブは `tab_width` 桁、制御文字は0）
pub fn char_width(ch: char, tab_width: usize) -> usize {
    match ch {
        '\t' => tab_width,
        c if c.is_control() => 0,
        c => c.width().unwrap_or(0),
    }
}

/// 文字列の表示幅
pub fn display_width(text: &str, tab_width: usize) -> usize {
    text.chars().map(|ch| char_width(ch, tab_width)).sum()
}

/// 画面上の1行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    /// 開始バイトオフセット
    pub start: usize,
    /// 終了バイトオフセット（改行は含まない）
    pub end: usize,
    /// 論理行番号
    pub logical: usize,
    /// 次の表示行が同じ論理行の続きか
    pub continues: bool,
}

/// テキストを表示行へ割り付ける
pub fn layout_lines(text: &str, width: usize, wrap: bool, tab_width: usize) -> Vec<VisualLine> {
    let mut lines = Vec::new();
    let mut line_start = 0;

    for (logical, raw) in text.split('\n').enumerate() {
        let mut segment_start = line_start;

        if wrap && width > 0 {
            let mut column = 0;
            for (index, ch) in raw.char_indices() {
                let w = char_width(ch, tab_width);
                if column > 0 && column + w > width {
                    lines.push(VisualLine {
                        start: segment_start,
                        end: line_start + index,
                        logical,
                        continues: true,
                    });
                    segment_start = line_start + index;
                    column = 0;
                }
                column += w;
            }
        }

        lines.push(VisualLine {
            start: segment_start,
            end: line_start + raw.len(),
            logical,
            continues: false,
        });
        line_start += raw.len() + 1;
    }

    lines
}

/// カーソルの表示行と表示桁
pub fn cursor_location(
    lines: &[VisualLine],
    text: &str,
    cursor: usize,
    tab_width: usize,
) -> (usize, usize) {
    for (row, line) in lines.iter().enumerate() {
        let inside = cursor >= line.start
            && (cursor < line.end || (cursor == line.end && !line.continues));
        if inside {
            return (row, display_width(&text[line.start..cursor], tab_width));
        }
    }
    (lines.len().saturating_sub(1), 0)
}

/// 表示行・表示桁に対応するバイトオフセット（マウス位置の変換）
pub fn offset_at_point(
    lines: &[VisualLine],
    text: &str,
    row: usize,
    column: usize,
    tab_width: usize,
) -> usize {
    let Some(line) = lines.get(row) else {
        return text.len();
    };

    let segment = &text[line.start..line.end];
    let mut x = 0;
    let mut last_start = line.start;
    for (index, ch) in segment.char_indices() {
        let w = char_width(ch, tab_width);
        if x + w > column {
            return line.start + index;
        }
        x += w;
        last_start = line.start + index;
    }

    if line.continues {
        last_start
    } else {
        line.end
    }
}

/// スクロール位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextAreaView {
    /// 先頭の表示行
    pub scroll_row: usize,
    /// 左端の表示桁（折り返し時は常に0）
    pub scroll_col: usize,
}

impl TextAreaView {
    /// カーソル位置が表示されるようにスクロール
    pub fn ensure_visible(&mut self, row: usize, column: usize, area: Rect, wrap: bool) {
        let height = area.height.max(1) as usize;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + height {
            self.scroll_row = row + 1 - height;
        }

        if wrap {
            self.scroll_col = 0;
            return;
        }

        let width = area.width.max(1) as usize;
        if column < self.scroll_col {
            self.scroll_col = column;
        } else if column >= self.scroll_col + width {
            self.scroll_col = column + 1 - width;
        }
    }

    /// 縦スクロール（マウスホイール）
    pub fn scroll_by(&mut self, delta: isize, total_rows: usize) {
        let max = total_rows.saturating_sub(1);
        let target = self.scroll_row as isize + delta;
        self.scroll_row = target.clamp(0, max as isize) as usize;
    }
}

/// テキストエリアの描画内容
#[derive(Debug, Clone)]
pub struct TextAreaContent<'a> {
    pub text: &'a str,
    pub lines: &'a [VisualLine],
    pub selection: Option<Range<usize>>,
    pub cursor: usize,
    pub view: TextAreaView,
    pub tab_width: usize,
}

impl<'a> TextAreaContent<'a> {
    /// 描画してカーソルの画面位置を返す
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) -> Option<(u16, u16)> {
        let lines = self.build_lines(area, theme);
        frame.render_widget(
            Paragraph::new(lines).style(theme.style(ComponentType::TextArea)),
            area,
        );
        self.cursor_screen_position(area)
    }

    /// 表示範囲の行を組み立てる
    pub fn build_lines(&self, area: Rect, theme: &Theme) -> Vec<Line<'static>> {
        let normal = theme.style(ComponentType::TextArea);
        let selected = theme.style(ComponentType::Selection);

        self.lines
            .iter()
            .skip(self.view.scroll_row)
            .take(area.height as usize)
            .map(|line| self.build_line(line, area.width as usize, normal, selected))
            .collect()
    }

    fn is_selected(&self, offset: usize) -> bool {
        self.selection
            .as_ref()
            .map_or(false, |range| range.contains(&offset))
    }

    fn build_line(
        &self,
        line: &VisualLine,
        width: usize,
        normal: Style,
        selected: Style,
    ) -> Line<'static> {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut current_style = normal;
        let left = self.view.scroll_col;
        let right = left + width;
        let mut column = 0;

        for (index, ch) in self.text[line.start..line.end].char_indices() {
            let w = char_width(ch, self.tab_width);
            let char_start = column;
            column += w;
            if w == 0 && ch.is_control() {
                continue;
            }
            if column <= left && w > 0 {
                continue;
            }
            if char_start >= right {
                break;
            }

            let style = if self.is_selected(line.start + index) {
                selected
            } else {
                normal
            };
            if style != current_style && !current.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current), current_style));
            }
            current_style = style;

            let clipped = char_start < left || column > right;
            if ch == '\t' || clipped {
                let visible = column.min(right) - char_start.max(left);
                current.push_str(&" ".repeat(visible));
            } else {
                current.push(ch);
            }
        }

        // 選択範囲に含まれる改行は1桁分の強調で示す
        let newline_selected = !line.continues
            && line.end < self.text.len()
            && self.is_selected(line.end)
            && column >= left
            && column < right;
        if newline_selected {
            if current_style != selected && !current.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current), current_style));
            }
            current_style = selected;
            current.push(' ');
        }

        if !current.is_empty() {
            spans.push(Span::styled(current, current_style));
        }
        Line::from(spans)
    }

    /// カーソルの画面座標（表示範囲外なら `None`）
    pub fn cursor_screen_position(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }

        let (row, column) = cursor_location(self.lines, self.text, self.cursor, self.tab_width);
        if row < self.view.scroll_row || row >= self.view.scroll_row + area.height as usize {
            return None;
        }
        if column < self.view.scroll_col {
            return None;
        }

        let x = (column - self.view.scroll_col).min(area.width as usize - 1);
        let y = row - self.view.scroll_row;
        Some((area.x + x as u16, area.y + y as u16))
    }
}
