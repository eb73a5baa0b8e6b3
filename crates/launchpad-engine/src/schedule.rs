//! Timer scheduling.
//!
//! The controller never sleeps. It hands back [`Scheduled`] values and the
//! [`Scheduler`] arms them as tokio tasks that deliver a [`TimerEvent`] on a
//! channel once their delay elapses. All tasks share one cancellation token,
//! so tearing the scheduler down guarantees nothing fires afterwards.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A timer that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Time to acknowledge user turn `turn`.
    AssistantAck { turn: u64 },
    /// Time to send the follow-up offer for user turn `turn`.
    AssistantOffer { turn: u64 },
    /// Loader step `step` of loader run `run` has elapsed.
    LoaderStep { run: u64, step: usize },
}

/// A request to deliver `event` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub event: TimerEvent,
}

impl Scheduled {
    pub fn new(delay: Duration, event: TimerEvent) -> Self {
        Self { delay, event }
    }
}

/// Arms [`Scheduled`] timers on the current tokio runtime.
#[derive(Debug)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<TimerEvent>,
    token: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler and the receiver its timers deliver to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            token: CancellationToken::new(),
        };
        (scheduler, rx)
    }

    /// Arm one timer. Must be called from within a tokio runtime.
    pub fn arm(&self, scheduled: Scheduled) {
        if self.token.is_cancelled() {
            tracing::trace!(event = ?scheduled.event, "scheduler cancelled, timer dropped");
            return;
        }

        let tx = self.tx.clone();
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(scheduled.delay) => {
                    // Receiver gone means the UI loop has exited.
                    let _ = tx.send(scheduled.event);
                }
            }
        });
    }

    /// Arm every timer in `timers`.
    pub fn arm_all(&self, timers: impl IntoIterator<Item = Scheduled>) {
        for scheduled in timers {
            self.arm(scheduled);
        }
    }

    /// Cancel every pending timer. Later `arm` calls are ignored.
    pub fn cancel_all(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("cancelling pending timers");
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
