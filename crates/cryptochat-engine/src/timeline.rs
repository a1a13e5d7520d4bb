//! Conversation timeline.
//!
//! Insertion order is display order. Entries are only ever appended or
//! replaced in place; nothing is removed.

use crate::message::{Message, MessageId};

/// Ordered log of chat entries.
#[derive(Debug)]
pub struct Timeline {
    /// Entries in arrival order.
    entries: Vec<Message>,
    /// Next real-entry id to hand out.
    next_id: u64,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Hand out the next id for a real (non-placeholder) entry.
    pub fn mint_id(&mut self) -> MessageId {
        let id = MessageId::Entry(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a message at the end.
    ///
    /// A timestamp earlier than the current last entry is raised to match it.
    pub fn append(&mut self, mut message: Message) {
        if let Some(last) = self.entries.last() {
            message.created_at = message.created_at.max(last.created_at);
        }
        if let MessageId::Entry(n) = message.id {
            self.next_id = self.next_id.max(n + 1);
        }
        self.entries.push(message);
    }

    /// Substitute the entry with `id` in place.
    ///
    /// Returns `false` and leaves the timeline untouched when no entry has
    /// that id (it may already have been replaced).
    pub fn replace(&mut self, id: MessageId, mut message: Message) -> bool {
        let Some(index) = self.entries.iter().position(|m| m.id == id) else {
            return false;
        };
        // Stay between the neighbours so display order keeps timestamps sorted.
        if let Some(next) = self.entries.get(index + 1) {
            message.created_at = message.created_at.min(next.created_at);
        }
        if let Some(prev) = index.checked_sub(1).map(|i| &self.entries[i]) {
            message.created_at = message.created_at.max(prev.created_at);
        }
        if let MessageId::Entry(n) = message.id {
            self.next_id = self.next_id.max(n + 1);
        }
        self.entries[index] = message;
        true
    }

    /// Owned copy of the current entries, for rendering.
    pub fn snapshot(&self) -> Vec<Message> {
        self.entries.clone()
    }

    /// Borrow the entries without copying.
    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// Number of placeholder entries currently present.
    pub fn placeholder_count(&self) -> usize {
        self.entries.iter().filter(|m| m.is_placeholder()).count()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
