//! Conversation screen - transcript and input on the left, preview on the right.

use super::{input_height, render_input, render_rail, render_status, Screen};
use crate::app::{App, Focus};
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::{Logo, StepLoader, Transcript};
use crate::ui::{centered_fixed, centered_row, conversation_layout, main_layout, rail_layout};
use launchpad_engine::{Preview, View};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Narrowest the loader is drawn, wide enough for its progress line.
const LOADER_MIN_WIDTH: u16 = 28;

/// The conversation screen.
pub struct ConversationScreen;

impl Screen for ConversationScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let View::Conversation(view) = app.view() else {
            return;
        };

        let (main_area, status_area) = main_layout(area);
        let (rail, content) = rail_layout(main_area);
        render_rail(rail, buf, false);

        let (chat, preview) = conversation_layout(content);
        let input_h = input_height(app, &view.input, chat.width);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(input_h)])
            .split(chat);

        let selected = match app.focus {
            Focus::Offer { offer, choice } => Some((offer, choice)),
            _ => None,
        };
        Transcript::new(&view.messages)
            .selected(selected)
            .scroll(app.transcript_scroll)
            .render(
                chunks[0].inner(Margin {
                    horizontal: 1,
                    vertical: 0,
                }),
                buf,
            );

        render_input(app, &view.input, Symbols::SEND_CHAT, chunks[1], buf);
        render_preview(app, &view.preview, preview, buf);

        let count = format!("{} messages", view.messages.len());
        render_status(app, Some(&count), status_area, buf);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_preview(app: &App, preview: &Preview<'_>, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Preview ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::panel());
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width < 1 || inner.height < 1 {
        return;
    }

    match preview {
        Preview::Logo => Logo.render(inner, buf),
        Preview::Loader {
            steps,
            current,
            step_duration,
        } => {
            let loader = StepLoader::new(steps, *current).tick(app.tick);
            let widest = steps.iter().map(|s| s.width()).max().unwrap_or(0) as u16;
            let width = (widest + 4).max(LOADER_MIN_WIDTH);
            let loader_area = centered_fixed(width, loader.height(), inner);

            let caption = format!("Deploying, {}s per step", step_duration.as_secs());
            let caption_y = loader_area.y.saturating_sub(2).max(inner.y);
            if caption_y < loader_area.y {
                let caption_area = centered_row(caption.width() as u16, caption_y, 1, inner);
                buf.set_stringn(
                    caption_area.x,
                    caption_area.y,
                    &caption,
                    usize::from(caption_area.width),
                    Styles::highlight(),
                );
            }
            loader.render(loader_area, buf);
        }
        Preview::Frame { url } => {
            let frame = Block::default()
                .title(format!(" {url} "))
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .style(Styles::default());
            let frame_area = inner.inner(Margin {
                horizontal: 1,
                vertical: 1,
            });
            let body = frame.inner(frame_area);
            frame.render(frame_area, buf);

            let message = "Your project is live";
            let y = body.y + body.height / 2;
            if body.height > 0 {
                let line = centered_row(message.width() as u16, y, 1, body);
                buf.set_stringn(line.x, line.y, message, usize::from(line.width), Styles::success());
            }
            if body.height > 1 && y + 1 < body.y + body.height {
                let line = centered_row(url.width() as u16, y + 1, 1, body);
                buf.set_stringn(line.x, line.y, url, usize::from(line.width), Styles::dim());
            }
        }
    }
}
