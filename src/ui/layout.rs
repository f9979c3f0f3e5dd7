//! 画面レイアウト
//!
//! 上から タイトルバー・メニューバー・ツールバー・テキストエリア・ステータスライン。

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// 画面領域の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaType {
    TitleBar,
    MenuBar,
    Toolbar,
    TextArea,
    StatusLine,
}

/// レイアウトマネージャー
#[derive(Debug, Clone, Copy)]
pub struct LayoutManager {
    /// 装飾行を表示するのに必要な最小の高さ
    min_height: u16,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self { min_height: 5 }
    }

    /// 各領域を計算
    ///
    /// 高さが足りない場合はテキストエリアだけを返す。
    pub fn calculate_areas(&self, area: Rect) -> HashMap<AreaType, Rect> {
        let mut areas = HashMap::new();

        if area.height < self.min_height {
            areas.insert(AreaType::TextArea, area);
            return areas;
        }

        let order = [
            AreaType::TitleBar,
            AreaType::MenuBar,
            AreaType::Toolbar,
            AreaType::TextArea,
            AreaType::StatusLine,
        ];
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        for (area_type, chunk) in order.iter().zip(chunks.iter()) {
            areas.insert(*area_type, *chunk);
        }

        areas
    }

    /// テキストエリアの領域
    pub fn text_area(&self, area: Rect) -> Rect {
        self.calculate_areas(area)
            .get(&AreaType::TextArea)
            .copied()
            .unwrap_or(area)
    }
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 中央に配置したダイアログ領域（画面に収まるよう縮める）
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// 点が領域内にあるか
pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
