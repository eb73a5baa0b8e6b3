//! Layout helpers for the launchpad TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the icon rail on the left edge.
pub const RAIL_WIDTH: u16 = 4;

/// Share of the conversation layout given to the preview panel.
pub const PREVIEW_PERCENT: u16 = 60;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Center a row of `width` columns horizontally at row `y` with `height`.
pub fn centered_row(width: u16, y: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let bottom = area.y.saturating_add(area.height);
    let height = height.min(bottom.saturating_sub(y));
    Rect::new(x, y, width, height)
}

/// Create the main layout with status bar at bottom.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Split off the icon rail: `(rail, content)`.
pub fn rail_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(RAIL_WIDTH), Constraint::Min(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Split the conversation content: `(chat, preview)`.
pub fn conversation_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - PREVIEW_PERCENT),
            Constraint::Percentage(PREVIEW_PERCENT),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(20, 10, area), Rect::new(30, 7, 20, 10));
        // Larger than the parent is clamped.
        assert_eq!(centered_fixed(100, 30, area), Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_centered_row_clamps_to_area() {
        let area = Rect::new(4, 0, 76, 20);
        assert_eq!(centered_row(40, 5, 3, area), Rect::new(22, 5, 40, 3));
        assert_eq!(centered_row(100, 18, 5, area), Rect::new(4, 18, 76, 2));
    }

    #[test]
    fn test_conversation_layout_gives_preview_sixty_percent() {
        let (chat, preview) = conversation_layout(Rect::new(0, 0, 100, 20));
        assert_eq!(chat.width, 40);
        assert_eq!(preview.width, 60);
    }

    #[test]
    fn test_rail_layout() {
        let (rail, content) = rail_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(rail.width, RAIL_WIDTH);
        assert_eq!(content.x, RAIL_WIDTH);
        assert_eq!(content.width, 80 - RAIL_WIDTH);
    }
}
