//! launchpad-tui: Terminal UI for the launchpad chat mock-up
//!
//! This crate provides the TUI layer for launchpad, including:
//! - Landing screen with prompt cards
//! - Conversation screen with the preview panel
//! - Shared widgets (text input, step loader, transcript)
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

pub use app::{App, Choice, Focus};
pub use event::{Action, Event, EventHandler};
pub use launchpad_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use launchpad_engine::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::{debug, info};

/// RAII guard for terminal state restoration.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    // Shift+Enter is only reported once escape codes are disambiguated.
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let _guard = TerminalGuard { keyboard_enhanced };

    let mut stdout = stdout();
    // Without bracketed paste every pasted newline arrives as Enter.
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(keyboard_enhanced, "tui started");
    let mut events = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;
    info!("tui stopped");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render_app(app, area, frame.buffer_mut());
        })?;

        tokio::select! {
            Some(event) = events.next() => handle_event(app, event),
            Some(timer) = app.session.next_timer() => app.on_timer(timer),
            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    app.shutdown();
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        // Terminals with enhanced keyboard reporting also send releases.
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            let action = event::key_to_action(key);
            debug!(?action, "key");
            app.handle_action(action);
        }
        Event::Key(_) | Event::Resize(_, _) => {}
        Event::Mouse(mouse) => app.handle_action(event::mouse_to_action(mouse)),
        Event::Paste(text) => app.paste(&text),
        Event::Tick => app.tick(),
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
