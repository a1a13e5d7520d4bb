//! Request dispatcher.
//!
//! Turns accepted questions into backend calls and backend outcomes into
//! timeline entries. One request is in flight at a time: a question asked
//! while another is pending shows up in the timeline straight away and is
//! sent once the earlier one settles. Placeholder ids are per submission,
//! so a settlement can only resolve the placeholder it was issued for.
//!
//! ```text
//! submit ─► Validating ─┬─► Rejected
//!                       └─► Accepted ─┬─► Dispatching ─► Resolved(ok | fallback) ─► Idle
//!                                     └─► Queued ──────► Dispatching ...
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::{BackendError, ChatBackend};
use crate::event::{Settlement, WidgetEvent};
use crate::message::{Message, MessageId};
use crate::timeline::Timeline;
use crate::typing::TypingIndicator;

/// Result of handing a question to [`Dispatcher::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Empty or whitespace-only input; nothing changed.
    Rejected,
    /// Sent to the backend right away.
    Dispatched(u64),
    /// Accepted and waiting behind an earlier request.
    Queued(u64),
}

impl Submission {
    /// Whether the question was accepted.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// Ticket of an accepted submission.
    pub fn ticket(self) -> Option<u64> {
        match self {
            Self::Rejected => None,
            Self::Dispatched(ticket) | Self::Queued(ticket) => Some(ticket),
        }
    }
}

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    placeholder: MessageId,
}

#[derive(Debug)]
struct Queued {
    ticket: u64,
    question: String,
}

/// Sends questions to a [`ChatBackend`] and resolves their placeholders.
pub struct Dispatcher {
    backend: Arc<dyn ChatBackend>,
    events: mpsc::UnboundedSender<WidgetEvent>,
    fallback_reply: String,
    next_ticket: u64,
    in_flight: Option<InFlight>,
    queue: VecDeque<Queued>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("next_ticket", &self.next_ticket)
            .field("in_flight", &self.in_flight)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher reporting settlements on `events`.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        events: mpsc::UnboundedSender<WidgetEvent>,
        fallback_reply: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            events,
            fallback_reply: fallback_reply.into(),
            next_ticket: 1,
            in_flight: None,
            queue: VecDeque::new(),
        }
    }

    /// Whether a request is outstanding or waiting to be sent.
    pub fn is_responding(&self) -> bool {
        self.in_flight.is_some() || !self.queue.is_empty()
    }

    /// Ticket of the request currently in flight.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    /// Number of accepted questions waiting behind the one in flight.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Validate `question` and, if accepted, record it and send it.
    ///
    /// Must be called from within a Tokio runtime when the question is
    /// dispatched immediately.
    pub fn submit(
        &mut self,
        question: &str,
        timeline: &mut Timeline,
        typing: &mut TypingIndicator,
    ) -> Submission {
        if question.trim().is_empty() {
            return Submission::Rejected;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let id = timeline.mint_id();
        timeline.append(Message::user(id, question));

        if self.is_responding() {
            debug!(ticket, queued = self.queue.len() + 1, "queueing question");
            self.queue.push_back(Queued {
                ticket,
                question: question.to_string(),
            });
            return Submission::Queued(ticket);
        }

        self.dispatch(ticket, question.to_string(), timeline, typing);
        Submission::Dispatched(ticket)
    }

    /// Apply a backend outcome.
    ///
    /// Returns the id of the assistant entry that replaced the placeholder,
    /// or `None` if the settlement does not belong to the request in flight.
    pub fn settle(
        &mut self,
        settlement: Settlement,
        timeline: &mut Timeline,
        typing: &mut TypingIndicator,
    ) -> Option<MessageId> {
        let Settlement { ticket, outcome } = settlement;

        let placeholder = match &self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket => in_flight.placeholder,
            _ => {
                debug!(ticket, "discarding settlement for unknown request");
                return None;
            }
        };
        self.in_flight = None;

        let text = match outcome {
            Ok(text) => {
                debug!(ticket, "chat request succeeded");
                text
            }
            Err(error) => {
                warn!(ticket, %error, "chat request failed, using fallback reply");
                self.fallback_reply.clone()
            }
        };

        let reply_id = timeline.mint_id();
        let resolved = typing.resolve(timeline, placeholder, Message::assistant(reply_id, text));

        if let Some(next) = self.queue.pop_front() {
            self.dispatch(next.ticket, next.question, timeline, typing);
        }

        resolved.then_some(reply_id)
    }

    fn dispatch(
        &mut self,
        ticket: u64,
        question: String,
        timeline: &mut Timeline,
        typing: &mut TypingIndicator,
    ) {
        let Some(placeholder) = typing.begin(timeline, ticket) else {
            warn!(ticket, "placeholder still active, holding question");
            self.queue.push_front(Queued { ticket, question });
            return;
        };

        debug!(ticket, %placeholder, "dispatching question");
        self.in_flight = Some(InFlight {
            ticket,
            placeholder,
        });

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let request = tokio::spawn(async move { backend.ask(&question).await });
            // A panicking backend still has to settle, or the placeholder never leaves.
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(BackendError::TaskFailed(join_error.to_string())),
            };
            // Receiver gone means the widget was unmounted; drop the result.
            if events
                .send(WidgetEvent::Settled(Settlement { ticket, outcome }))
                .is_err()
            {
                debug!(ticket, "widget gone, dropping settlement");
            }
        });
    }
}
