//! Transcript widget.
//!
//! User messages are drawn as right-aligned bubbles, assistant messages are
//! left-aligned behind a bot marker, and an open offer gets its action pair
//! on the line below:
//!
//! ```text
//!                       Build me a blog
//!
//! ◆ Thank you for your message! I'll
//!   help you with that.
//!
//!   Yes   No
//! ```

use crate::app::Choice;
use crate::ui::theme::{Styles, Symbols};
use launchpad_engine::{Author, MessageView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Share of the width a user bubble may take, in percent.
const BUBBLE_PERCENT: usize = 75;

/// Scrollable message list.
#[derive(Debug, Clone)]
pub struct Transcript<'a> {
    messages: &'a [MessageView<'a>],
    selected: Option<(usize, Choice)>,
    scroll: usize,
}

impl<'a> Transcript<'a> {
    pub fn new(messages: &'a [MessageView<'a>]) -> Self {
        Self {
            messages,
            selected: None,
            scroll: 0,
        }
    }

    /// Highlight `choice` under offer `offer`.
    #[must_use]
    pub fn selected(mut self, selected: Option<(usize, Choice)>) -> Self {
        self.selected = selected;
        self
    }

    /// Hide the last `scroll` messages.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn lines(&self, width: usize) -> Vec<Line<'a>> {
        let visible = self.messages.len().saturating_sub(self.scroll);
        let mut lines = Vec::new();

        for (i, message) in self.messages[..visible].iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            match message.author {
                Author::User => push_bubble(&mut lines, message.content, width),
                Author::Assistant => push_assistant(&mut lines, message.content, width),
            }
            if let Some(actions) = message.actions {
                let focused = |choice| self.selected == Some((actions.offer, choice));
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("  ", Styles::default()),
                    Span::styled(
                        format!(" {} ", actions.confirm),
                        Styles::go(focused(Choice::Confirm)),
                    ),
                    Span::styled(" ", Styles::default()),
                    Span::styled(
                        format!(" {} ", actions.decline),
                        Styles::stop(focused(Choice::Decline)),
                    ),
                ]));
            }
        }
        lines
    }
}

fn push_bubble<'a>(lines: &mut Vec<Line<'a>>, content: &'a str, width: usize) {
    let inner = (width * BUBBLE_PERCENT / 100).saturating_sub(2).max(1);
    for row in textwrap::wrap(content, inner) {
        lines.push(
            Line::from(Span::styled(format!(" {row} "), Styles::user_bubble()))
                .alignment(Alignment::Right),
        );
    }
}

fn push_assistant<'a>(lines: &mut Vec<Line<'a>>, content: &'a str, width: usize) {
    let inner = width.saturating_sub(2).max(1);
    for (i, row) in textwrap::wrap(content, inner).into_iter().enumerate() {
        let prefix = if i == 0 {
            Span::styled(format!("{} ", Symbols::BOT), Styles::highlight())
        } else {
            Span::styled("  ", Styles::default())
        };
        lines.push(Line::from(vec![prefix, Span::styled(row, Styles::default())]));
    }
}

impl Widget for Transcript<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 1 || area.height < 1 {
            return;
        }

        let lines = self.lines(usize::from(area.width));
        // Stick to the bottom.
        let top = lines.len().saturating_sub(usize::from(area.height));
        Paragraph::new(lines)
            .style(Styles::default())
            .scroll((top.min(usize::from(u16::MAX)) as u16, 0))
            .render(area, buf);
    }
}
