//! Step loader widget.
//!
//! Draws the deployment steps with a marker per step and a progress bar
//! underneath:
//!
//! ```text
//!  ✓ Gathering Project Requirements
//!  / Project Specification Generated
//!  · Project Created
//!
//!  [=======             ] 1/3
//! ```

use crate::ui::theme::{progress_bar, Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// Width of the progress bar, excluding brackets.
const BAR_WIDTH: usize = 20;

/// A step loader widget.
#[derive(Debug, Clone)]
pub struct StepLoader<'a> {
    steps: &'a [&'a str],
    current: usize,
    tick: usize,
}

impl<'a> StepLoader<'a> {
    /// Create a loader showing `steps` with `current` active.
    pub fn new(steps: &'a [&'a str], current: usize) -> Self {
        Self {
            steps,
            current,
            tick: 0,
        }
    }

    /// Animation tick, used for the spinner frame.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Rows the widget needs.
    pub fn height(&self) -> u16 {
        u16::try_from(self.steps.len() + 2).unwrap_or(u16::MAX)
    }

    fn step_line(&self, index: usize, text: &'a str) -> Line<'a> {
        let (marker, marker_style, text_style) = match index.cmp(&self.current) {
            std::cmp::Ordering::Less => (Symbols::DONE, Styles::success(), Styles::default()),
            std::cmp::Ordering::Equal => (
                Symbols::SPINNER[self.tick % Symbols::SPINNER.len()],
                Styles::highlight(),
                Styles::highlight(),
            ),
            std::cmp::Ordering::Greater => (Symbols::PENDING, Styles::dim(), Styles::dim()),
        };
        Line::from(vec![
            Span::styled(" ", Styles::default()),
            Span::styled(marker, marker_style),
            Span::styled(" ", Styles::default()),
            Span::styled(text, text_style),
        ])
    }
}

impl Widget for StepLoader<'_> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let bottom = area.y + area.height;
        for (i, &text) in self.steps.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= bottom {
                return;
            }
            buf.set_line(area.x, y, &self.step_line(i, text), area.width);
        }

        let y = area.y + self.steps.len() as u16 + 1;
        if y >= bottom || self.steps.is_empty() {
            return;
        }
        let done = self.current.min(self.steps.len());
        let bar = format!(
            " {} {done}/{}",
            progress_bar(done as f32 / self.steps.len() as f32, BAR_WIDTH),
            self.steps.len()
        );
        buf.set_stringn(area.x, y, bar, usize::from(area.width), Styles::active());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use insta::assert_snapshot;

    const STEPS: [&str; 3] = [
        "Gathering Project Requirements",
        "Project Specification Generated",
        "Project Created",
    ];

    fn render(loader: StepLoader<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, loader.height());
        let mut buf = Buffer::empty(area);
        loader.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_snapshot_step_loader_midway() {
        let rendered = render(StepLoader::new(&STEPS, 1), 40);
        assert_snapshot!("step_loader_midway", rendered);
    }

    #[test]
    fn test_first_step_active() {
        let rendered = render(StepLoader::new(&STEPS, 0).tick(1), 40);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], " / Gathering Project Requirements");
        assert_eq!(lines[1], " · Project Specification Generated");
        assert!(lines[4].ends_with("0/3"));
    }

    #[test]
    fn test_spinner_cycles_with_tick() {
        let frames: Vec<_> = (0..5)
            .map(|tick| {
                render(StepLoader::new(&STEPS, 2).tick(tick), 40)
                    .lines()
                    .nth(2)
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(frames[0], " | Project Created");
        assert_eq!(frames[1], " / Project Created");
        assert_eq!(frames[4], frames[0]);
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        StepLoader::new(&STEPS, 1).render(area, &mut buf);
        assert_eq!(buffer_to_string(&buf), " ✓ Ga");
    }
}
