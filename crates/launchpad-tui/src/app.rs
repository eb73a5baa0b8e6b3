//! Application state and update logic for the launchpad TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use launchpad_engine::{
    Config, Deployment, EnterOutcome, OfferState, Session, TimerEvent, View, ViewMode,
};
use tracing::debug;

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    /// A landing suggestion card.
    Suggestion(usize),
    /// The action pair under an open offer.
    Offer { offer: usize, choice: Choice },
}

/// Highlighted button of an offer's action pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    Confirm,
    Decline,
}

impl Choice {
    fn toggled(self) -> Self {
        match self {
            Choice::Confirm => Choice::Decline,
            Choice::Decline => Choice::Confirm,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Controller and timers.
    pub session: Session,

    /// Editing buffer mirrored into the controller's input.
    pub input: TextInputState,

    /// Current keyboard focus.
    pub focus: Focus,

    /// Transcript scroll offset, in messages hidden below the view.
    pub transcript_scroll: usize,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            session: Session::new(config),
            input: TextInputState::new(),
            focus: Focus::Input,
            transcript_scroll: 0,
            tick: 0,
        }
    }

    /// Render tree for the current state.
    pub fn view(&self) -> View<'_> {
        View::of(self.session.controller())
    }

    /// Short label for the status bar.
    pub fn mode_label(&self) -> &'static str {
        let controller = self.session.controller();
        match (controller.view_mode(), controller.deployment()) {
            (ViewMode::Landing, _) => "Launchpad",
            (ViewMode::Conversation, Deployment::Idle) => "Chat",
            (ViewMode::Conversation, Deployment::Building) => "Building",
            (ViewMode::Conversation, Deployment::Deployed) => "Deployed",
        }
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
            Action::Back => self.focus = Focus::Input,
            Action::ScrollUp => {
                let max = self.session.controller().messages().len().saturating_sub(1);
                self.transcript_scroll = (self.transcript_scroll + 1).min(max);
            }
            Action::ScrollDown => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
            }
            Action::None => {}
            _ => match self.focus {
                Focus::Input => self.handle_input_action(action),
                Focus::Suggestion(index) => self.handle_suggestion_action(index, action),
                Focus::Offer { offer, choice } => self.handle_offer_action(offer, choice, action),
            },
        }

        self.sync_input();
        self.sync_focus();
    }

    fn handle_input_action(&mut self, action: Action) {
        match action {
            Action::Submit => match self.session.handle_enter(false) {
                EnterOutcome::Submitted(timers) if !timers.is_empty() => {
                    self.transcript_scroll = 0;
                }
                _ => {}
            },
            Action::Newline => {
                if self.session.handle_enter(true) == EnterOutcome::Newline {
                    self.edit(|input| input.insert('\n'));
                }
            }
            Action::Insert(c) => self.edit(|input| input.insert(c)),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_suggestion_action(&mut self, index: usize, action: Action) {
        let count = self.session.controller().config().suggestions.len();
        match action {
            Action::Submit => {
                if self.session.choose_suggestion(index) {
                    self.focus = Focus::Input;
                }
            }
            Action::Left if index > 0 => self.focus = Focus::Suggestion(index - 1),
            Action::Right if index + 1 < count => self.focus = Focus::Suggestion(index + 1),
            Action::Insert(_) | Action::Backspace | Action::Delete => {
                // Typing goes back to the input.
                self.focus = Focus::Input;
                self.handle_input_action(action);
            }
            _ => {}
        }
    }

    fn handle_offer_action(&mut self, offer: usize, choice: Choice, action: Action) {
        match action {
            Action::Left | Action::Right => {
                self.focus = Focus::Offer {
                    offer,
                    choice: choice.toggled(),
                };
            }
            Action::Insert('y' | 'Y') => self.activate(offer, Choice::Confirm),
            Action::Insert('n' | 'N') => self.activate(offer, Choice::Decline),
            Action::Submit => self.activate(offer, choice),
            Action::Insert(_) | Action::Backspace | Action::Delete => {
                self.focus = Focus::Input;
                self.handle_input_action(action);
            }
            _ => {}
        }
    }

    fn activate(&mut self, offer: usize, choice: Choice) {
        debug!(offer, ?choice, "offer action");
        match choice {
            Choice::Confirm => self.session.confirm_build(offer),
            Choice::Decline => self.session.decline_offer(offer),
        }
        self.focus = Focus::Input;
        self.transcript_scroll = 0;
    }

    /// Apply an edit to the buffer and push the result to the controller.
    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        f(&mut self.input);
        self.session.set_input(self.input.content());
    }

    fn cycle_focus(&mut self, forward: bool) {
        let stops = self.focus_stops();
        let Some(position) = stops.iter().position(|&stop| same_stop(stop, self.focus)) else {
            self.focus = Focus::Input;
            return;
        };
        let len = stops.len();
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        self.focus = stops[next];
    }

    /// Focus targets in tab order, starting with the input.
    fn focus_stops(&self) -> Vec<Focus> {
        let mut stops = vec![Focus::Input];
        match self.view() {
            View::Landing(landing) => {
                stops.extend((0..landing.suggestions.len()).map(Focus::Suggestion));
            }
            View::Conversation(conversation) => {
                if let Some(actions) = conversation.latest_actions() {
                    let offer = actions.offer;
                    let choice = match self.focus {
                        Focus::Offer { offer: o, choice } if o == offer => choice,
                        _ => Choice::Confirm,
                    };
                    stops.push(Focus::Offer { offer, choice });
                }
            }
        }
        stops
    }

    /// Copy the controller's input into the editing buffer when they differ.
    ///
    /// The controller clears the input on submit and fills it when a
    /// suggestion is chosen.
    fn sync_input(&mut self) {
        let value = self.session.controller().input();
        if value != self.input.content() {
            self.input.set_content(value);
        }
    }

    /// Drop focus targets that no longer exist.
    fn sync_focus(&mut self) {
        let controller = self.session.controller();
        let valid = match self.focus {
            Focus::Input => true,
            Focus::Suggestion(index) => {
                controller.view_mode() == ViewMode::Landing
                    && index < controller.config().suggestions.len()
            }
            Focus::Offer { offer, .. } => controller.offer_state(offer) == Some(OfferState::Open),
        };
        if !valid {
            self.focus = Focus::Input;
        }
    }

    /// Apply a fired timer.
    ///
    /// A newly appended reply brings the transcript back to the bottom.
    pub fn on_timer(&mut self, event: TimerEvent) {
        let before = self.session.controller().messages().len();
        self.session.apply(event);
        if self.session.controller().messages().len() > before {
            self.transcript_scroll = 0;
        }
        self.sync_focus();
    }

    /// Insert pasted text into the input as one edit.
    ///
    /// Line breaks stay in the text instead of acting as Enter.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.focus = Focus::Input;
        self.edit(|input| input.insert_str(&text));
    }

    /// Called on each tick for animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Tear down the session before exit.
    pub fn shutdown(&mut self) {
        self.session.dispose();
    }
}

fn same_stop(a: Focus, b: Focus) -> bool {
    match (a, b) {
        (Focus::Offer { offer: x, .. }, Focus::Offer { offer: y, .. }) => x == y,
        _ => a == b,
    }
}
