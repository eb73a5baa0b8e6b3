//! Screen definitions for the launchpad TUI.

pub mod conversation;
pub mod landing;

use crate::app::{App, Focus};
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar};
use launchpad_engine::{InputView, ViewMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Widget},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render whichever screen matches the current view mode.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Styles::default());
    match app.session.controller().view_mode() {
        ViewMode::Landing => landing::LandingScreen.render(app, area, buf),
        ViewMode::Conversation => conversation::ConversationScreen.render(app, area, buf),
    }
}

/// Left icon rail. The settings glyph is only drawn when `settings` is set.
fn render_rail(area: Rect, buf: &mut Buffer, settings: bool) {
    buf.set_style(area, Styles::panel());
    if area.width < 2 || area.height < 2 {
        return;
    }
    let x = area.x + area.width / 2 - 1;
    if settings {
        buf.set_string(x, area.y + 1, Symbols::SETTINGS, Styles::panel());
    }
    buf.set_string(
        x,
        area.y + area.height.saturating_sub(2),
        Symbols::USER,
        Styles::panel(),
    );
}

/// Columns taken by the border and the submit arrow.
const INPUT_CHROME: u16 = 4;

/// Total height of the input box for `width` columns, borders included.
fn input_height(app: &App, input: &InputView<'_>, width: u16) -> u16 {
    let text_width = width.saturating_sub(INPUT_CHROME).max(1);
    app.input.rows(text_width, input.min_rows, input.max_rows) + 2
}

/// Bordered input box with the submit arrow in its bottom-right corner.
fn render_input(app: &App, input: &InputView<'_>, arrow: &str, area: Rect, buf: &mut Buffer) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_for(focused))
        .style(Styles::default());
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width < 3 || inner.height < 1 {
        return;
    }

    let text_area = Rect::new(inner.x, inner.y, inner.width - 2, inner.height);
    app.input
        .widget(input.placeholder)
        .focused(focused)
        .render(text_area, buf);

    let arrow_style = if input.submit_enabled {
        Styles::go(false)
    } else {
        Styles::disabled()
    };
    buf.set_string(
        inner.x + inner.width - 1,
        inner.y + inner.height - 1,
        arrow,
        arrow_style,
    );
}

/// Status bar hints for the current focus.
fn render_status(app: &App, right: Option<&str>, area: Rect, buf: &mut Buffer) {
    let hints = match app.focus {
        Focus::Input => vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("S-Enter", "Newline"),
            KeyHint::new("Tab", "Focus"),
            KeyHint::new("^C", "Quit"),
        ],
        Focus::Suggestion(_) => vec![
            KeyHint::new("Enter", "Use"),
            KeyHint::new("←/→", "Move"),
            KeyHint::new("Esc", "Back"),
        ],
        Focus::Offer { .. } => vec![
            KeyHint::new("y", "Yes"),
            KeyHint::new("n", "No"),
            KeyHint::new("Enter", "Choose"),
            KeyHint::new("Esc", "Back"),
        ],
    };

    let mut status_bar = StatusBar::new(app.mode_label()).hints(hints);
    if let Some(text) = right {
        status_bar = status_bar.right(text);
    }
    status_bar.render(area, buf);
}
