//! The launchpad logo.

use crate::ui::theme::Styles;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use unicode_width::UnicodeWidthStr;

const ART: [&str; 5] = [
    r"   /\   ",
    r"  /  \  ",
    r" | () | ",
    r" /|__|\ ",
    r"  '  '  ",
];

const TITLE: &str = "launchpad";

/// Rocket art with the product name underneath, centered in its area.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logo;

impl Logo {
    /// Rows the logo needs: art, a gap, then the title.
    #[allow(clippy::cast_possible_truncation)]
    pub const HEIGHT: u16 = ART.len() as u16 + 2;
}

impl Widget for Logo {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 1 || area.height < 1 {
            return;
        }

        let top = area.y + area.height.saturating_sub(Self::HEIGHT) / 2;
        let rows = ART
            .iter()
            .map(|&line| (line, Styles::highlight()))
            .chain([("", Styles::default()), (TITLE, Styles::title())]);

        for (i, (line, style)) in rows.enumerate() {
            let y = top + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let width = (line.width() as u16).min(area.width);
            let x = area.x + (area.width - width) / 2;
            buf.set_stringn(x, y, line, usize::from(width), style);
        }
    }
}
