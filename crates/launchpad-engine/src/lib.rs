//! launchpad-engine: Headless engine for the launchpad chat mock-up
//!
//! This crate provides the state machine behind the launchpad UI, including:
//! - The conversation view controller and its scripted replies
//! - The step loader that plays the simulated deployment
//! - A pure render tree built from controller state
//! - Timer scheduling with cancellation
//! - Configuration loading

pub mod config;
pub mod controller;
pub mod loader;
pub mod message;
pub mod schedule;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError, Suggestion};
pub use controller::{Controller, Deployment, EnterOutcome, ViewMode};
pub use loader::{LoaderProgress, LoaderSignal, LoaderStep, StepLoader};
pub use message::{Author, Message, OfferState};
pub use schedule::{Scheduled, Scheduler, TimerEvent};
pub use session::Session;
pub use view::{ConversationView, InputView, LandingView, MessageView, OfferActions, Preview, View};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
