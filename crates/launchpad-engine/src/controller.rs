//! Conversation view controller.
//!
//! Owns every piece of page state: the input text, the message sequence,
//! offer answers, the deployment state and the step loader. All operations
//! are synchronous and total. Anything that should happen later is returned
//! as a list of [`Scheduled`] timers for the runtime to arm; fired timers
//! come back through [`Controller::apply`].

use crate::config::Config;
use crate::loader::{LoaderSignal, StepLoader};
use crate::message::{Message, OfferState};
use crate::schedule::{Scheduled, TimerEvent};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Which layout to render. Derived from the message count only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// No messages yet.
    Landing,
    /// At least one message exists.
    Conversation,
}

impl ViewMode {
    pub fn from_message_count(count: usize) -> Self {
        if count == 0 {
            Self::Landing
        } else {
            Self::Conversation
        }
    }
}

/// Deployment progress. Replaces the separate `loading` and `show_iframe`
/// flags so they can never both be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deployment {
    /// Nothing confirmed yet; the logo is shown.
    #[default]
    Idle,
    /// The step loader is playing.
    Building,
    /// The preview frame is shown. Terminal.
    Deployed,
}

impl std::fmt::Display for Deployment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Building => write!(f, "building"),
            Self::Deployed => write!(f, "deployed"),
        }
    }
}

/// Result of pressing Enter in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Shift was held; the input widget should insert a line break.
    Newline,
    /// The input was submitted. Blank input yields no timers and no change.
    Submitted(Vec<Scheduled>),
}

/// The conversation view controller.
#[derive(Debug, Clone)]
pub struct Controller {
    config: Config,
    input: String,
    messages: Vec<Message>,
    /// Answer state for each buttoned message, keyed by message index.
    offers: BTreeMap<usize, OfferState>,
    deployment: Deployment,
    loader: StepLoader,
    /// Counts accepted submits; tags the reply timers for logging.
    turn: u64,
    disposed: bool,
}

impl Controller {
    pub fn new(config: Config) -> Self {
        let loader = StepLoader::new(config.steps.clone(), config.step_duration());
        Self {
            config,
            input: String::new(),
            messages: Vec::new(),
            offers: BTreeMap::new(),
            deployment: Deployment::Idle,
            loader,
            turn: 0,
            disposed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input text (the input widget's change callback).
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.input = text.into();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_message_count(self.messages.len())
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Whether the step loader is playing.
    pub fn loading(&self) -> bool {
        self.deployment == Deployment::Building
    }

    /// Whether the preview frame replaces the logo.
    pub fn show_iframe(&self) -> bool {
        self.deployment == Deployment::Deployed
    }

    pub fn loader(&self) -> &StepLoader {
        &self.loader
    }

    /// Answer state of the buttoned message at `index`.
    pub fn offer_state(&self, index: usize) -> Option<OfferState> {
        self.offers.get(&index).copied()
    }

    /// Index of the most recent offer still waiting for an answer.
    pub fn latest_open_offer(&self) -> Option<usize> {
        self.offers
            .iter()
            .rev()
            .find(|(_, state)| state.is_open())
            .map(|(&index, _)| index)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Submit `text` as a user message.
    ///
    /// Blank text (after trimming) is ignored and leaves the input alone.
    /// Otherwise the message is appended as typed, the input is cleared, and
    /// the acknowledgment timer is returned.
    pub fn submit(&mut self, text: &str) -> Vec<Scheduled> {
        if self.disposed || text.trim().is_empty() {
            return Vec::new();
        }

        self.turn += 1;
        self.messages.push(Message::user(text));
        self.input.clear();
        info!(turn = self.turn, messages = self.messages.len(), "user message submitted");

        vec![Scheduled::new(
            self.config.ack_delay(),
            TimerEvent::AssistantAck { turn: self.turn },
        )]
    }

    /// Submit whatever is currently in the input.
    pub fn submit_input(&mut self) -> Vec<Scheduled> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Enter submits; shift+Enter asks for a newline instead.
    pub fn handle_enter(&mut self, shift: bool) -> EnterOutcome {
        if shift {
            EnterOutcome::Newline
        } else {
            EnterOutcome::Submitted(self.submit_input())
        }
    }

    /// Put the prompt of landing suggestion `index` into the input.
    ///
    /// Returns `false` if there is no such suggestion.
    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        if self.disposed {
            return false;
        }
        let Some(suggestion) = self.config.suggestions.get(index) else {
            return false;
        };
        self.input.clone_from(&suggestion.prompt);
        true
    }

    /// The "Yes" action on offer `offer`.
    ///
    /// Starts the step loader and withdraws every other open offer. Ignored
    /// unless the offer is open and nothing has been deployed or is being
    /// built.
    pub fn confirm_build(&mut self, offer: usize) -> Vec<Scheduled> {
        if self.disposed
            || self.deployment != Deployment::Idle
            || !self.offer_state(offer).is_some_and(OfferState::is_open)
        {
            debug!(offer, deployment = %self.deployment, "confirm ignored");
            return Vec::new();
        }

        for (&index, state) in &mut self.offers {
            if index != offer && state.is_open() {
                *state = OfferState::Withdrawn;
                debug!(offer = index, "offer withdrawn");
            }
        }
        self.offers.insert(offer, OfferState::Accepted);
        self.deployment = Deployment::Building;
        info!(
            offer,
            steps = self.loader.steps().len(),
            total_ms = u64::try_from(self.loader.total_duration().as_millis()).unwrap_or(u64::MAX),
            "build confirmed"
        );

        match self.loader.start() {
            LoaderSignal::Advance(timer) => vec![timer],
            LoaderSignal::Finished => {
                self.finish_deployment();
                Vec::new()
            }
            LoaderSignal::Stale => Vec::new(),
        }
    }

    /// The "No" action on offer `offer`.
    ///
    /// Closes the offer and appends the scripted decline reply.
    pub fn decline_offer(&mut self, offer: usize) -> Vec<Scheduled> {
        if self.disposed || !self.offer_state(offer).is_some_and(OfferState::is_open) {
            debug!(offer, "decline ignored");
            return Vec::new();
        }

        self.offers.insert(offer, OfferState::Declined);
        self.messages
            .push(Message::assistant(self.config.decline_message.clone()));
        info!(offer, "offer declined");
        Vec::new()
    }

    /// Apply a fired timer. Returns any follow-up timers.
    pub fn apply(&mut self, event: TimerEvent) -> Vec<Scheduled> {
        if self.disposed {
            debug!(?event, "timer after dispose dropped");
            return Vec::new();
        }

        match event {
            TimerEvent::AssistantAck { turn } => {
                self.messages
                    .push(Message::assistant(self.config.ack_message.clone()));
                debug!(turn, messages = self.messages.len(), "acknowledgment appended");
                vec![Scheduled::new(
                    self.config.offer_delay(),
                    TimerEvent::AssistantOffer { turn },
                )]
            }
            TimerEvent::AssistantOffer { turn } => {
                let index = self.messages.len();
                self.messages
                    .push(Message::offer(self.config.offer_message.clone()));
                // Only one build ever runs, so a late offer has nothing to start.
                let state = if self.deployment == Deployment::Idle {
                    OfferState::Open
                } else {
                    OfferState::Withdrawn
                };
                self.offers.insert(index, state);
                debug!(turn, offer = index, ?state, "offer appended");
                Vec::new()
            }
            TimerEvent::LoaderStep { run, step } => match self.loader.on_step_elapsed(run, step) {
                LoaderSignal::Advance(timer) => {
                    debug!(run, step, "loader step elapsed");
                    vec![timer]
                }
                LoaderSignal::Finished => {
                    self.finish_deployment();
                    Vec::new()
                }
                LoaderSignal::Stale => {
                    debug!(run, step, "stale loader step dropped");
                    Vec::new()
                }
            },
        }
    }

    /// Tear down. No state changes after this.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            info!("controller disposed");
        }
    }

    fn finish_deployment(&mut self) {
        self.deployment = Deployment::Deployed;
        info!(url = %self.config.preview_url, "deployment finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Author;
    use std::time::Duration;

    fn controller() -> Controller {
        Controller::new(Config::default())
    }

    /// Apply timers in firing order up to and including `until`. Returns
    /// the timers that are not due yet.
    fn run_timers(
        controller: &mut Controller,
        mut pending: Vec<(Duration, TimerEvent)>,
        until: Duration,
    ) -> Vec<(Duration, TimerEvent)> {
        loop {
            pending.sort_by_key(|(at, _)| *at);
            let Some(&(at, event)) = pending.first() else {
                return pending;
            };
            if at > until {
                return pending;
            }
            pending.remove(0);
            for next in controller.apply(event) {
                pending.push((at + next.delay, next.event));
            }
        }
    }

    fn at(now: Duration, timers: Vec<Scheduled>) -> Vec<(Duration, TimerEvent)> {
        timers.into_iter().map(|t| (now + t.delay, t.event)).collect()
    }

    /// Submit and let both scripted replies arrive.
    fn submit_and_reply(controller: &mut Controller, text: &str) {
        let timers = controller.submit(text);
        let left = run_timers(controller, at(Duration::ZERO, timers), Duration::MAX);
        assert!(left.is_empty());
    }

    #[test]
    fn test_submit_appends_user_message_and_clears_input() {
        let mut c = controller();
        c.set_input("Build me a blog");

        let timers = c.submit_input();
        assert_eq!(c.messages(), &[Message::user("Build me a blog")]);
        assert_eq!(c.input(), "");
        assert_eq!(
            timers,
            vec![Scheduled::new(
                Duration::from_millis(1000),
                TimerEvent::AssistantAck { turn: 1 }
            )]
        );
    }

    #[test]
    fn test_submit_keeps_text_as_typed() {
        let mut c = controller();
        let _ = c.submit("  spaced out\n");
        assert_eq!(c.messages()[0].content, "  spaced out\n");
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut c = controller();
        c.set_input("   ");

        assert!(c.submit("").is_empty());
        assert!(c.submit("   ").is_empty());
        assert!(c.submit("\n\t").is_empty());
        assert!(c.messages().is_empty());
        assert_eq!(c.input(), "   ");
        assert_eq!(c.view_mode(), ViewMode::Landing);
    }

    #[test]
    fn test_scripted_replies_arrive_in_order() {
        let mut c = controller();
        let timers = c.submit("Build me a blog");

        let pending = run_timers(&mut c, at(Duration::ZERO, timers), Duration::from_millis(999));
        assert_eq!(c.messages().len(), 1);

        let pending = run_timers(&mut c, pending, Duration::from_millis(1000));
        assert_eq!(c.messages().len(), 2);
        assert_eq!(c.messages()[1], Message::assistant(Config::default().ack_message));

        let pending = run_timers(&mut c, pending, Duration::from_millis(1999));
        assert_eq!(c.messages().len(), 2);

        let pending = run_timers(&mut c, pending, Duration::from_millis(2000));
        assert!(pending.is_empty());
        assert_eq!(c.messages().len(), 3);
        assert!(c.messages()[2].show_buttons);
        assert_eq!(c.messages()[2].author(), Author::Assistant);
        assert_eq!(c.offer_state(2), Some(OfferState::Open));
        assert_eq!(c.latest_open_offer(), Some(2));
    }

    #[test]
    fn test_interleaved_submits_never_lose_messages() {
        let mut c = controller();
        let mut pending = at(Duration::ZERO, c.submit("first"));
        pending = run_timers(&mut c, pending, Duration::from_millis(1500));
        // A second submit lands between the first ack and its offer.
        pending.extend(at(Duration::from_millis(1500), c.submit("second")));
        let pending = run_timers(&mut c, pending, Duration::MAX);
        assert!(pending.is_empty());

        let authors: Vec<_> = c.messages().iter().map(Message::author).collect();
        assert_eq!(
            authors,
            vec![
                Author::User,      // first
                Author::Assistant, // ack 1 @1000
                Author::User,      // second @1500
                Author::Assistant, // offer 1 @2000
                Author::Assistant, // ack 2 @2500
                Author::Assistant, // offer 2 @3500
            ]
        );
        assert_eq!(c.messages()[0].content, "first");
        assert_eq!(c.messages()[2].content, "second");
        assert!(c.messages()[3].show_buttons);
        assert!(c.messages()[5].show_buttons);
        assert_eq!(c.latest_open_offer(), Some(5));
    }

    #[test]
    fn test_view_mode_is_one_way() {
        let mut c = controller();
        assert_eq!(c.view_mode(), ViewMode::Landing);
        let _ = c.submit("hello");
        assert_eq!(c.view_mode(), ViewMode::Conversation);
        let _ = c.submit("   ");
        c.set_input("");
        assert_eq!(c.view_mode(), ViewMode::Conversation);
    }

    #[test]
    fn test_enter_submits_and_shift_enter_does_not() {
        let mut c = controller();
        c.set_input("hello");

        assert_eq!(c.handle_enter(true), EnterOutcome::Newline);
        assert!(c.messages().is_empty());
        assert_eq!(c.input(), "hello");

        let EnterOutcome::Submitted(timers) = c.handle_enter(false) else {
            panic!("plain Enter should submit");
        };
        assert_eq!(timers.len(), 1);
        assert_eq!(c.messages(), &[Message::user("hello")]);
    }

    #[test]
    fn test_enter_on_blank_input_changes_nothing() {
        let mut c = controller();
        assert_eq!(c.handle_enter(false), EnterOutcome::Submitted(Vec::new()));
        assert!(c.messages().is_empty());
    }

    #[test]
    fn test_confirm_build_runs_loader_to_deployed() {
        let mut c = controller();
        submit_and_reply(&mut c, "Build me a blog");
        assert!(!c.loading());
        assert!(!c.show_iframe());

        let timers = c.confirm_build(2);
        assert!(c.loading());
        assert!(!c.show_iframe());
        assert_eq!(c.offer_state(2), Some(OfferState::Accepted));
        assert_eq!(c.loader().current(), Some(0));

        let pending = run_timers(&mut c, at(Duration::ZERO, timers), Duration::from_millis(13_999));
        assert!(c.loading());
        assert_eq!(c.loader().current(), Some(6));

        let pending = run_timers(&mut c, pending, Duration::from_millis(14_000));
        assert!(pending.is_empty());
        assert!(!c.loading());
        assert!(c.show_iframe());
        assert_eq!(c.deployment(), Deployment::Deployed);
    }

    #[test]
    fn test_deployed_is_terminal() {
        let mut c = controller();
        submit_and_reply(&mut c, "one");
        let timers = c.confirm_build(2);
        let _ = run_timers(&mut c, at(Duration::ZERO, timers), Duration::MAX);
        assert!(c.show_iframe());

        // A fresh offer arrives closed and cannot restart the build.
        submit_and_reply(&mut c, "two");
        assert_eq!(c.offer_state(5), Some(OfferState::Withdrawn));
        assert_eq!(c.latest_open_offer(), None);
        assert!(c.confirm_build(5).is_empty());
        assert!(c.decline_offer(5).is_empty());
        assert_eq!(c.messages().len(), 6);
        assert!(c.show_iframe());
        assert!(!c.loading());
    }

    #[test]
    fn test_offer_during_build_arrives_withdrawn() {
        let mut c = controller();
        submit_and_reply(&mut c, "one");
        let _ = c.confirm_build(2);
        submit_and_reply(&mut c, "two");
        assert!(c.loading());
        assert_eq!(c.offer_state(5), Some(OfferState::Withdrawn));
        assert_eq!(c.latest_open_offer(), None);
    }

    #[test]
    fn test_confirm_requires_open_offer() {
        let mut c = controller();
        assert!(c.confirm_build(0).is_empty());

        submit_and_reply(&mut c, "hi");
        // Index 1 is the acknowledgment, not an offer.
        assert!(c.confirm_build(1).is_empty());
        assert_eq!(c.deployment(), Deployment::Idle);
    }

    #[test]
    fn test_confirm_withdraws_other_open_offers() {
        let mut c = controller();
        submit_and_reply(&mut c, "one");
        submit_and_reply(&mut c, "two");
        assert_eq!(c.latest_open_offer(), Some(5));

        assert_eq!(c.confirm_build(2).len(), 1);
        assert_eq!(c.offer_state(2), Some(OfferState::Accepted));
        assert_eq!(c.offer_state(5), Some(OfferState::Withdrawn));
        assert_eq!(c.latest_open_offer(), None);

        assert!(c.confirm_build(5).is_empty());
        assert!(c.decline_offer(5).is_empty());
        assert_eq!(c.messages().len(), 6);
    }

    #[test]
    fn test_decline_appends_reply_and_closes_offer() {
        let mut c = controller();
        submit_and_reply(&mut c, "hi");

        assert!(c.decline_offer(2).is_empty());
        assert_eq!(c.offer_state(2), Some(OfferState::Declined));
        assert_eq!(c.messages().len(), 4);
        assert_eq!(
            c.messages()[3],
            Message::assistant(Config::default().decline_message)
        );
        assert_eq!(c.latest_open_offer(), None);

        // Yes after No on the same offer does nothing.
        assert!(c.confirm_build(2).is_empty());
        assert_eq!(c.deployment(), Deployment::Idle);

        // Declining twice does nothing either.
        let _ = c.decline_offer(2);
        assert_eq!(c.messages().len(), 4);
    }

    #[test]
    fn test_offer_message_is_never_mutated() {
        let mut c = controller();
        submit_and_reply(&mut c, "hi");
        let before = c.messages()[2].clone();
        let _ = c.decline_offer(2);
        assert_eq!(c.messages()[2], before);
    }

    #[test]
    fn test_dispose_blocks_every_mutation() {
        let mut c = controller();
        let ack = c.submit("hi");
        c.dispose();
        assert!(c.is_disposed());

        for timer in ack {
            assert!(c.apply(timer.event).is_empty());
        }
        assert!(c.submit("again").is_empty());
        c.set_input("typed");
        assert_eq!(c.messages().len(), 1);
        assert_eq!(c.input(), "");
        assert!(!c.choose_suggestion(0));
    }

    #[test]
    fn test_dispose_during_build_stops_deployment() {
        let mut c = controller();
        submit_and_reply(&mut c, "hi");
        let timers = c.confirm_build(2);
        c.dispose();
        let _ = run_timers(&mut c, at(Duration::ZERO, timers), Duration::MAX);
        assert!(c.loading());
        assert!(!c.show_iframe());
    }

    #[test]
    fn test_empty_steps_deploy_immediately() {
        let mut c = Controller::new(Config {
            steps: Vec::new(),
            ..Config::default()
        });
        submit_and_reply(&mut c, "hi");
        assert!(c.confirm_build(2).is_empty());
        assert!(c.show_iframe());
    }

    #[test]
    fn test_choose_suggestion_fills_input() {
        let mut c = controller();
        assert!(c.choose_suggestion(2));
        assert_eq!(c.input(), "Build me a blog");
        assert!(!c.choose_suggestion(99));
        assert_eq!(c.input(), "Build me a blog");
    }
}
