//! The chat widget store.
//!
//! [`ChatWidget`] owns one timeline, one session and the input buffer for
//! as long as it is mounted. Background work (the launcher timer and
//! backend calls) reports back through a queue that the owner drains with
//! [`ChatWidget::next_event`] / [`ChatWidget::drain_events`] and applies
//! with [`ChatWidget::handle_event`], all on one task.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::ChatBackend;
use crate::config::WidgetConfig;
use crate::dispatcher::{Dispatcher, Submission};
use crate::event::WidgetEvent;
use crate::message::{Message, MessageId, Sender};
use crate::session::{Session, SessionController};
use crate::timeline::Timeline;
use crate::typing::TypingIndicator;
use crate::view::{project, RenderModel};

/// A mounted chat assistant widget.
#[derive(Debug)]
pub struct ChatWidget {
    timeline: Timeline,
    typing: TypingIndicator,
    session: SessionController,
    dispatcher: Dispatcher,
    input: String,
    events: mpsc::UnboundedReceiver<WidgetEvent>,
}

impl ChatWidget {
    /// Mount a widget: closed session, timeline seeded with the greeting.
    pub fn mount(config: &WidgetConfig, backend: Arc<dyn ChatBackend>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut timeline = Timeline::new();
        let greeting_id = timeline.mint_id();
        timeline.append(Message::assistant(greeting_id, config.greeting.clone()));

        debug!(backend = %config.backend_url, "chat widget mounted");

        Self {
            timeline,
            typing: TypingIndicator::new(config.typing_label.clone()),
            session: SessionController::new(config.launcher_delay(), tx.clone()),
            dispatcher: Dispatcher::new(backend, tx, config.fallback_reply.clone()),
            input: String::new(),
            events: rx,
        }
    }

    /// Open the chat panel.
    pub fn open(&mut self) {
        self.session.open();
    }

    /// Close the chat panel.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        self.session.toggle();
    }

    /// Current visibility state.
    pub fn session(&self) -> Session {
        self.session.session()
    }

    /// The conversation so far.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Whether a reply is being waited on.
    pub fn is_responding(&self) -> bool {
        self.dispatcher.is_responding()
    }

    /// Current input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append a character to the input buffer.
    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Remove the last character from the input buffer.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Submit `question`.
    ///
    /// Rejected without any change when the panel is closed or the question
    /// is blank. On acceptance the input buffer is cleared.
    pub fn submit(&mut self, question: &str) -> Submission {
        if !self.session.is_open() {
            return Submission::Rejected;
        }

        let submission = self
            .dispatcher
            .submit(question, &mut self.timeline, &mut self.typing);
        if submission.is_accepted() {
            self.input.clear();
        }
        submission
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Submission {
        let question = self.input.clone();
        self.submit(&question)
    }

    /// Wait for the next background event.
    pub async fn next_event(&mut self) -> Option<WidgetEvent> {
        self.events.recv().await
    }

    /// Apply one background event. Returns `true` if visible state changed.
    pub fn handle_event(&mut self, event: WidgetEvent) -> bool {
        match event {
            WidgetEvent::LauncherDue { generation } => {
                self.session.handle_launcher_due(generation)
            }
            WidgetEvent::Settled(settlement) => self
                .dispatcher
                .settle(settlement, &mut self.timeline, &mut self.typing)
                .is_some(),
        }
    }

    /// Apply every event already queued, without waiting.
    ///
    /// Returns the number of events applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Process events until no reply is outstanding.
    pub async fn settle_all(&mut self) {
        while self.dispatcher.is_responding() {
            let Some(event) = self.next_event().await else {
                break;
            };
            self.handle_event(event);
        }
    }

    /// Most recent assistant entry that is not a placeholder.
    pub fn last_reply(&self) -> Option<&Message> {
        self.timeline
            .entries()
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Assistant && !m.is_placeholder())
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: MessageId) -> Option<&Message> {
        self.timeline.get(id)
    }

    /// Project the current state for rendering.
    pub fn render_model(&self) -> RenderModel {
        project(
            self.session.session(),
            self.timeline.entries(),
            self.dispatcher.is_responding(),
            &self.input,
        )
    }

    /// Tear the widget down.
    ///
    /// Cancels the launcher timer. Requests still in flight may finish, but
    /// their results have nowhere to go and are dropped.
    pub fn unmount(mut self) {
        self.session.dispose();
        self.events.close();
        debug!(
            pending = self.dispatcher.is_responding(),
            "chat widget unmounted"
        );
    }
}
