//! Conversation messages.
//!
//! A conversation is an append-only sequence of [`Message`]s. Once a message
//! is appended its content is never touched again.

use serde::{Deserialize, Serialize};

/// One turn in the simulated conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Text shown to the user.
    pub content: String,

    /// Whether the human authored this message.
    pub is_user: bool,

    /// Whether to render the Yes/No action pair beneath this message.
    #[serde(default)]
    pub show_buttons: bool,
}

impl Message {
    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            show_buttons: false,
        }
    }

    /// A plain scripted assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            show_buttons: false,
        }
    }

    /// A scripted assistant message carrying the Yes/No actions.
    pub fn offer(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            show_buttons: true,
        }
    }

    /// Who wrote this message.
    pub fn author(&self) -> Author {
        if self.is_user {
            Author::User
        } else {
            Author::Assistant
        }
    }
}

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// How an offer (a message with actions) has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferState {
    /// Waiting for Yes or No.
    #[default]
    Open,
    /// The user chose Yes.
    Accepted,
    /// The user chose No.
    Declined,
    /// Closed without an answer because a build was confirmed elsewhere.
    Withdrawn,
}

impl OfferState {
    /// Whether the action pair should still be shown.
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}
