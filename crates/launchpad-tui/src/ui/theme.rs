//! Theme and styling definitions for the launchpad TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(130, 170, 255);

    // Chat colors
    pub const USER_BUBBLE: Color = Color::Rgb(58, 58, 72);
    pub const PANEL_BG: Color = Color::Rgb(36, 36, 48);

    // Action colors
    pub const GO: Color = Color::Rgb(34, 197, 94);
    pub const STOP: Color = Color::Rgb(10, 10, 14);
    pub const DISABLED: Color = Color::Rgb(90, 90, 100);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(45, 45, 60);
    pub const STATUS_KEY_BG: Color = Color::Rgb(70, 90, 140);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(130, 220, 130);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(130, 170, 255);
}

/// Glyphs used across widgets.
pub struct Symbols;

impl Symbols {
    pub const DONE: &'static str = "✓";
    pub const PENDING: &'static str = "·";
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
    pub const BOT: &'static str = "◆";
    pub const SETTINGS: &'static str = "⚙";
    pub const USER: &'static str = "◉";
    pub const SEND_LANDING: &'static str = "→";
    pub const SEND_CHAT: &'static str = "↑";
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Success status.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Bubble behind user messages.
    pub fn user_bubble() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::USER_BUBBLE)
    }

    /// Preview panel background.
    pub fn panel() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::PANEL_BG)
    }

    /// The "Yes" action and the live submit arrow.
    pub fn go(focused: bool) -> Style {
        let style = Style::default().fg(Palette::FG).bg(Palette::GO);
        if focused {
            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            style
        }
    }

    /// The "No" action.
    pub fn stop(focused: bool) -> Style {
        let style = Style::default().fg(Palette::FG).bg(Palette::STOP);
        if focused {
            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            style
        }
    }

    /// Greyed-out submit arrow.
    pub fn disabled() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::DISABLED)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }

    /// Border style picked by focus.
    pub fn border_for(focused: bool) -> Style {
        if focused {
            Self::border_active()
        } else {
            Self::border()
        }
    }
}

/// Progress bar rendering.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn progress_bar(progress: f32, width: usize) -> String {
    let filled = ((progress * width as f32).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}
