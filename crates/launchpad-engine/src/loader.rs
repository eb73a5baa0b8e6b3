//! Step loader model.
//!
//! Plays an ordered list of labelled steps, one per `step_duration`, and
//! reports [`LoaderSignal::Finished`] once the last step has elapsed. The
//! completion signal is what flips the conversation into its deployed state,
//! so the animation and the state change can never drift apart.

use crate::schedule::{Scheduled, TimerEvent};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One labelled loader step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderStep {
    pub text: String,
}

impl LoaderStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// What the loader wants after a step event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderSignal {
    /// Arm this timer for the next step.
    Advance(Scheduled),
    /// The last step has elapsed.
    Finished,
    /// The event belongs to an older run or is out of sequence.
    Stale,
}

/// Progress state of the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderProgress {
    /// Not started.
    #[default]
    Idle,
    /// Step `index` is currently active.
    Running { index: usize },
    /// All steps elapsed.
    Done,
}

/// Headless step loader.
#[derive(Debug, Clone)]
pub struct StepLoader {
    steps: Vec<LoaderStep>,
    step_duration: Duration,
    progress: LoaderProgress,
    /// Incremented on every `start` so late events from a previous run are
    /// recognisable.
    run: u64,
}

impl StepLoader {
    pub fn new(steps: Vec<LoaderStep>, step_duration: Duration) -> Self {
        Self {
            steps,
            step_duration,
            progress: LoaderProgress::Idle,
            run: 0,
        }
    }

    pub fn steps(&self) -> &[LoaderStep] {
        &self.steps
    }

    pub fn step_duration(&self) -> Duration {
        self.step_duration
    }

    pub fn progress(&self) -> LoaderProgress {
        self.progress
    }

    /// Index of the active step, if running.
    pub fn current(&self) -> Option<usize> {
        match self.progress {
            LoaderProgress::Running { index } => Some(index),
            LoaderProgress::Idle | LoaderProgress::Done => None,
        }
    }

    /// Time from `start` to `Finished`.
    pub fn total_duration(&self) -> Duration {
        self.step_duration
            * u32::try_from(self.steps.len()).unwrap_or(u32::MAX)
    }

    /// Begin a new run from the first step.
    ///
    /// With no steps the loader finishes immediately.
    pub fn start(&mut self) -> LoaderSignal {
        self.run += 1;
        if self.steps.is_empty() {
            self.progress = LoaderProgress::Done;
            return LoaderSignal::Finished;
        }
        self.progress = LoaderProgress::Running { index: 0 };
        LoaderSignal::Advance(self.step_timer(0))
    }

    /// Handle the timer for `step` of run `run` having elapsed.
    pub fn on_step_elapsed(&mut self, run: u64, step: usize) -> LoaderSignal {
        if run != self.run || self.current() != Some(step) {
            return LoaderSignal::Stale;
        }

        let next = step + 1;
        if next >= self.steps.len() {
            self.progress = LoaderProgress::Done;
            LoaderSignal::Finished
        } else {
            self.progress = LoaderProgress::Running { index: next };
            LoaderSignal::Advance(self.step_timer(next))
        }
    }

    fn step_timer(&self, step: usize) -> Scheduled {
        Scheduled::new(
            self.step_duration,
            TimerEvent::LoaderStep {
                run: self.run,
                step,
            },
        )
    }
}
