//! Auto-growing multi-line text input widget.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

/// Text laid out into rows of at most `width` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Wrapped {
    lines: Vec<String>,
    /// `(row, column)` of the cursor.
    cursor: (usize, usize),
}

impl Wrapped {
    fn rows(&self) -> usize {
        self.lines.len().max(self.cursor.0 + 1)
    }
}

/// Hard-wrap `text` at `width` columns, honouring explicit newlines, and
/// locate the cursor (a character index) in the result.
fn wrap(text: &str, cursor: usize, width: usize) -> Wrapped {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut col = 0;
    let mut pos = None;

    for (i, ch) in text.chars().enumerate() {
        if ch == '\n' {
            if i == cursor {
                pos = Some((lines.len() - 1, col));
            }
            lines.push(String::new());
            col = 0;
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if col > 0 && col + w > width {
            lines.push(String::new());
            col = 0;
        }
        if i == cursor {
            pos = Some((lines.len() - 1, col));
        }
        let last = lines.len() - 1;
        lines[last].push(ch);
        col += w;
    }

    let cursor = pos.unwrap_or(if col >= width {
        (lines.len(), 0)
    } else {
        (lines.len() - 1, col)
    });
    Wrapped { lines, cursor }
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_len();
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Rows needed to show the content at `width` columns, clamped to
    /// `min..=max`.
    pub fn rows(&self, width: u16, min: u16, max: u16) -> u16 {
        let needed = wrap(&self.content, self.cursor, usize::from(width)).rows();
        u16::try_from(needed).unwrap_or(u16::MAX).clamp(min, max)
    }

    /// Create a widget from this state.
    pub fn widget<'a>(&'a self, placeholder: &'a str) -> TextInput<'a> {
        TextInput {
            state: self,
            placeholder,
            focused: true,
        }
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

/// A multi-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    state: &'a TextInputState,
    placeholder: &'a str,
    focused: bool,
}

impl TextInput<'_> {
    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInput<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        if self.state.is_empty() {
            buf.set_stringn(
                area.x,
                area.y,
                self.placeholder,
                usize::from(area.width),
                Styles::dim(),
            );
            if self.focused {
                if let Some(cell) = buf.cell_mut((area.x, area.y)) {
                    cell.set_style(Styles::default().add_modifier(Modifier::REVERSED));
                }
            }
            return;
        }

        let wrapped = wrap(&self.state.content, self.state.cursor, usize::from(area.width));
        let height = usize::from(area.height);
        // Keep the cursor row on screen.
        let top = wrapped.cursor.0.saturating_sub(height - 1);

        for (row, line) in wrapped.lines.iter().skip(top).take(height).enumerate() {
            buf.set_stringn(
                area.x,
                area.y + row as u16,
                line,
                usize::from(area.width),
                Styles::default(),
            );
        }

        if self.focused {
            let (row, col) = wrapped.cursor;
            if row >= top && row - top < height && col < usize::from(area.width) {
                let x = area.x + col as u16;
                let y = area.y + (row - top) as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(Styles::default().add_modifier(Modifier::REVERSED));
                }
            }
        }
    }
}
