//! Message types for the chat timeline.
//!
//! A [`Message`] is one conversational turn. Real entries and typing
//! placeholders draw their ids from separate spaces so a placeholder can
//! never be confused with a reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The question-answering backend (or the widget speaking for it).
    Assistant,
}

/// Whether a message carries real content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A regular conversational entry.
    #[default]
    Normal,
    /// A transient "assistant is composing" marker.
    Placeholder,
}

/// Identifier of a timeline entry.
///
/// Stable for the lifetime of the entry so it can be targeted by
/// [`Timeline::replace`](crate::Timeline::replace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "space", content = "seq", rename_all = "lowercase")]
pub enum MessageId {
    /// A real message, minted by the timeline.
    Entry(u64),
    /// A typing placeholder, keyed by the submission that owns it.
    Typing(u64),
}

impl MessageId {
    /// Whether this id belongs to the placeholder space.
    pub fn is_typing(self) -> bool {
        matches!(self, Self::Typing(_))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(n) => write!(f, "msg-{n}"),
            Self::Typing(n) => write!(f, "typing-{n}"),
        }
    }
}

/// A single entry in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id within the owning timeline.
    pub id: MessageId,
    /// Display text.
    pub text: String,
    /// Author of the message.
    pub sender: Sender,
    /// Normal entry or typing placeholder.
    #[serde(default)]
    pub kind: MessageKind,
    /// When the message was created (display only).
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a user message.
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            kind: MessageKind::Normal,
            created_at: Utc::now(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            kind: MessageKind::Normal,
            created_at: Utc::now(),
        }
    }

    /// Create a typing placeholder showing `label`.
    pub fn placeholder(id: MessageId, label: impl Into<String>) -> Self {
        Self {
            id,
            text: label.into(),
            sender: Sender::Assistant,
            kind: MessageKind::Placeholder,
            created_at: Utc::now(),
        }
    }

    /// Whether this entry is a typing placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.kind == MessageKind::Placeholder
    }
}
