//! Typing indicator lifecycle.
//!
//! A placeholder goes into the timeline as soon as a question is sent and
//! leaves it only by being replaced with the final reply. There is no
//! timeout that clears it on its own.

use crate::message::{Message, MessageId};
use crate::timeline::Timeline;

/// Tracks the single active typing placeholder.
#[derive(Debug)]
pub struct TypingIndicator {
    label: String,
    active: Option<MessageId>,
}

impl TypingIndicator {
    /// Create an indicator that shows `label` while waiting.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: None,
        }
    }

    /// Id of the placeholder currently in the timeline, if any.
    pub fn active(&self) -> Option<MessageId> {
        self.active
    }

    /// Whether a placeholder is currently showing.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Append a placeholder for submission `ticket`.
    ///
    /// Returns `None` without touching the timeline if another placeholder
    /// is still waiting to be resolved.
    pub fn begin(&mut self, timeline: &mut Timeline, ticket: u64) -> Option<MessageId> {
        if self.active.is_some() {
            return None;
        }
        let id = MessageId::Typing(ticket);
        timeline.append(Message::placeholder(id, self.label.clone()));
        self.active = Some(id);
        Some(id)
    }

    /// Replace placeholder `id` with `message`.
    ///
    /// Only the active placeholder can be resolved. A stale or unknown id
    /// leaves both the indicator and the timeline unchanged.
    pub fn resolve(&mut self, timeline: &mut Timeline, id: MessageId, message: Message) -> bool {
        if self.active != Some(id) {
            return false;
        }
        self.active = None;
        timeline.replace(id, message)
    }
}
