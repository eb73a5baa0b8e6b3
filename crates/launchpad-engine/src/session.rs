//! A controller wired to a live scheduler.
//!
//! [`Session`] arms every timer the controller asks for and hands fired
//! timers back to it, so callers only deal with user operations and
//! [`Session::next_timer`].

use crate::config::Config;
use crate::controller::{Controller, EnterOutcome};
use crate::schedule::{Scheduler, TimerEvent};
use tokio::sync::mpsc;

/// Controller plus the scheduler that drives it.
#[derive(Debug)]
pub struct Session {
    controller: Controller,
    scheduler: Scheduler,
    timers: mpsc::UnboundedReceiver<TimerEvent>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let (scheduler, timers) = Scheduler::new();
        Self {
            controller: Controller::new(config),
            scheduler,
            timers,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.controller.set_input(text);
    }

    /// Submit `text`. Returns `true` if a message was appended.
    pub fn submit(&mut self, text: &str) -> bool {
        let timers = self.controller.submit(text);
        let accepted = !timers.is_empty();
        self.scheduler.arm_all(timers);
        accepted
    }

    /// Handle Enter in the input. Timers are armed before returning.
    pub fn handle_enter(&mut self, shift: bool) -> EnterOutcome {
        let outcome = self.controller.handle_enter(shift);
        if let EnterOutcome::Submitted(timers) = &outcome {
            self.scheduler.arm_all(timers.iter().copied());
        }
        outcome
    }

    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        self.controller.choose_suggestion(index)
    }

    pub fn confirm_build(&mut self, offer: usize) {
        let timers = self.controller.confirm_build(offer);
        self.scheduler.arm_all(timers);
    }

    pub fn decline_offer(&mut self, offer: usize) {
        let timers = self.controller.decline_offer(offer);
        self.scheduler.arm_all(timers);
    }

    /// Wait for the next timer to fire.
    ///
    /// Returns `None` once the session is disposed.
    pub async fn next_timer(&mut self) -> Option<TimerEvent> {
        if self.scheduler.is_cancelled() {
            return None;
        }
        self.timers.recv().await
    }

    /// Apply a fired timer and arm whatever it chains to.
    pub fn apply(&mut self, event: TimerEvent) {
        let timers = self.controller.apply(event);
        self.scheduler.arm_all(timers);
    }

    /// Tear down: cancel pending timers and freeze the controller.
    pub fn dispose(&mut self) {
        self.scheduler.cancel_all();
        self.controller.dispose();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dispose();
    }
}
