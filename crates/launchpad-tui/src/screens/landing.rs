//! Landing screen - shown until the first message is sent.

use super::{input_height, render_input, render_rail, render_status, Screen};
use crate::app::{App, Focus};
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::Logo;
use crate::ui::{centered_row, main_layout, rail_layout};
use launchpad_engine::{Suggestion, View};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Widget},
};

/// Widest the centered column gets.
const CONTENT_WIDTH: u16 = 72;

/// Bordered card with a title and a subtitle row.
const CARD_HEIGHT: u16 = 4;

/// The landing screen.
pub struct LandingScreen;

impl Screen for LandingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let View::Landing(view) = app.view() else {
            return;
        };

        let (main_area, status_area) = main_layout(area);
        let (rail, content) = rail_layout(main_area);
        render_rail(rail, buf, true);

        let width = content.width.min(CONTENT_WIDTH);
        let input_h = input_height(app, &view.input, width);
        let total = Logo::HEIGHT + 1 + CARD_HEIGHT + 1 + input_h;
        let mut y = content.y + content.height.saturating_sub(total) / 2;

        Logo.render(centered_row(width, y, Logo::HEIGHT, content), buf);
        y += Logo::HEIGHT + 1;

        render_cards(app, view.suggestions, centered_row(width, y, CARD_HEIGHT, content), buf);
        y += CARD_HEIGHT + 1;

        render_input(
            app,
            &view.input,
            Symbols::SEND_LANDING,
            centered_row(width, y, input_h, content),
            buf,
        );

        render_status(app, None, status_area, buf);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_cards(app: &App, suggestions: &[Suggestion], area: Rect, buf: &mut Buffer) {
    if suggestions.is_empty() || area.height == 0 {
        return;
    }

    let count = suggestions.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(suggestions.iter().map(|_| Constraint::Ratio(1, count)))
        .spacing(1)
        .split(area);

    for (i, (suggestion, &chunk)) in suggestions.iter().zip(chunks.iter()).enumerate() {
        let focused = app.focus == Focus::Suggestion(i);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_for(focused))
            .style(Styles::default());
        let inner = block.inner(chunk);
        block.render(chunk, buf);
        if inner.height == 0 {
            continue;
        }

        let title_style = if focused {
            Styles::highlight()
        } else {
            Styles::default()
        };
        buf.set_stringn(
            inner.x,
            inner.y,
            &suggestion.title,
            usize::from(inner.width),
            title_style,
        );
        if inner.height > 1 {
            buf.set_stringn(
                inner.x,
                inner.y + 1,
                &suggestion.subtitle,
                usize::from(inner.width),
                Styles::dim(),
            );
        }
    }
}
