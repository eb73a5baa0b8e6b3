//! Configuration types for the launchpad engine.
//!
//! This module defines the configuration schema: scripted replies, timing,
//! loader steps, landing suggestions and input sizing. Every field has a
//! default, so a missing or partial file is always usable.

use crate::loader::LoaderStep;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration for launchpad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay before the assistant acknowledges a user message.
    #[serde(default = "default_ack_delay_ms")]
    pub ack_delay_ms: u64,

    /// Delay between the acknowledgment and the follow-up offer.
    #[serde(default = "default_offer_delay_ms")]
    pub offer_delay_ms: u64,

    /// How long each loader step stays active.
    #[serde(default = "default_step_duration_ms")]
    pub step_duration_ms: u64,

    /// Acknowledgment text.
    #[serde(default = "default_ack_message")]
    pub ack_message: String,

    /// Follow-up offer text (rendered with Yes/No actions).
    #[serde(default = "default_offer_message")]
    pub offer_message: String,

    /// Reply appended when the user declines an offer.
    #[serde(default = "default_decline_message")]
    pub decline_message: String,

    /// Deployment steps played by the loader.
    #[serde(default = "default_steps")]
    pub steps: Vec<LoaderStep>,

    /// Address shown in the preview frame once deployed.
    #[serde(default = "default_preview_url")]
    pub preview_url: String,

    /// Placeholder text for the input box.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Prompt cards shown on the landing layout.
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<Suggestion>,

    /// Minimum height of the input box, in rows.
    #[serde(default = "default_min_rows")]
    pub min_rows: u16,

    /// Maximum height the input box grows to, in rows.
    #[serde(default = "default_max_rows")]
    pub max_rows: u16,

    /// UI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

/// A landing-page prompt card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Bold first line.
    pub title: String,
    /// Dimmed second line.
    pub subtitle: String,
    /// Text placed in the input when the card is chosen.
    pub prompt: String,
}

impl Suggestion {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            prompt: prompt.into(),
        }
    }
}

fn default_ack_delay_ms() -> u64 {
    1000
}

fn default_offer_delay_ms() -> u64 {
    1000
}

fn default_step_duration_ms() -> u64 {
    2000
}

fn default_ack_message() -> String {
    "Thank you for your message! I'll help you with that.".into()
}

fn default_offer_message() -> String {
    "Would you like to enable automatic backups for data protection, or any additional monitoring configurations?".into()
}

fn default_decline_message() -> String {
    "No problem. Let me know whenever you're ready to deploy.".into()
}

fn default_steps() -> Vec<LoaderStep> {
    [
        "Gathering Project Requirements",
        "Project Specification Generated",
        "Project Created",
        "Local Cloud Started",
        "Configurations Validated",
        "Deployment Plan Created",
        "Creating Visualisation",
    ]
    .into_iter()
    .map(LoaderStep::new)
    .collect()
}

fn default_preview_url() -> String {
    "https://example.com".into()
}

fn default_placeholder() -> String {
    "What do you want to build?".into()
}

fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new(
            "Build me...",
            "for a graphic designer",
            "Build me a portfolio site for a graphic designer",
        ),
        Suggestion::new(
            "Build me...",
            "for a local bakery",
            "Build me an ordering page for a local bakery",
        ),
        Suggestion::new(
            "Build me...",
            "for a personal blog",
            "Build me a blog",
        ),
    ]
}

fn default_min_rows() -> u16 {
    1
}

fn default_max_rows() -> u16 {
    5
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "step_duration_ms must be greater than zero".into(),
            ));
        }
        if self.min_rows == 0 {
            return Err(ConfigError::Invalid("min_rows must be at least 1".into()));
        }
        if self.max_rows < self.min_rows {
            return Err(ConfigError::Invalid(format!(
                "max_rows ({}) must not be less than min_rows ({})",
                self.max_rows, self.min_rows
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn ack_delay(&self) -> Duration {
        Duration::from_millis(self.ack_delay_ms)
    }

    pub fn offer_delay(&self) -> Duration {
        Duration::from_millis(self.offer_delay_ms)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ack_delay_ms: default_ack_delay_ms(),
            offer_delay_ms: default_offer_delay_ms(),
            step_duration_ms: default_step_duration_ms(),
            ack_message: default_ack_message(),
            offer_message: default_offer_message(),
            decline_message: default_decline_message(),
            steps: default_steps(),
            preview_url: default_preview_url(),
            placeholder: default_placeholder(),
            suggestions: default_suggestions(),
            min_rows: default_min_rows(),
            max_rows: default_max_rows(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
