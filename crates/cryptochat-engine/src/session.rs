//! Panel visibility and launcher hand-off timing.
//!
//! Opening hides the launcher at once. Closing hides the panel at once but
//! brings the launcher back only after a short delay, so the two never
//! flash on screen together.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::event::WidgetEvent;

/// Widget-level visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Whether the chat panel is showing.
    pub is_open: bool,
    /// Whether the launcher button is showing.
    pub launcher_visible: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            is_open: false,
            launcher_visible: true,
        }
    }
}

/// A scheduled "show launcher" firing.
#[derive(Debug)]
struct PendingLauncher {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Owns the [`Session`] and its launcher timer.
#[derive(Debug)]
pub struct SessionController {
    session: Session,
    delay: Duration,
    generation: u64,
    pending: Option<PendingLauncher>,
    events: mpsc::UnboundedSender<WidgetEvent>,
}

impl SessionController {
    /// Create a closed session whose launcher reappears `delay` after closing.
    pub fn new(delay: Duration, events: mpsc::UnboundedSender<WidgetEvent>) -> Self {
        Self {
            session: Session::default(),
            delay,
            generation: 0,
            pending: None,
            events,
        }
    }

    /// Current visibility state.
    pub fn session(&self) -> Session {
        self.session
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.session.is_open
    }

    /// Whether a launcher firing is scheduled.
    pub fn has_pending_launcher(&self) -> bool {
        self.pending.is_some()
    }

    /// Open the panel. No-op if already open.
    pub fn open(&mut self) {
        if self.session.is_open {
            return;
        }
        self.cancel_pending();
        self.session.is_open = true;
        self.session.launcher_visible = false;
        debug!("chat panel opened");
    }

    /// Close the panel and schedule the launcher. No-op if already closed.
    pub fn close(&mut self) {
        if !self.session.is_open {
            return;
        }
        self.session.is_open = false;
        self.schedule_launcher();
        debug!(delay = ?self.delay, "chat panel closed");
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        if self.session.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Apply a launcher firing. Returns `true` if the launcher became visible.
    pub fn handle_launcher_due(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == generation => {}
            _ => {
                debug!(generation, "ignoring superseded launcher firing");
                return false;
            }
        }
        self.pending = None;
        if self.session.is_open {
            return false;
        }
        self.session.launcher_visible = true;
        true
    }

    /// Cancel any scheduled launcher firing.
    pub fn dispose(&mut self) {
        self.cancel_pending();
    }

    fn schedule_launcher(&mut self) {
        self.cancel_pending();

        if self.delay.is_zero() {
            self.session.launcher_visible = true;
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let delay = self.delay;
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the widget was unmounted.
            let _ = events.send(WidgetEvent::LauncherDue { generation });
        });

        self.pending = Some(PendingLauncher { generation, handle });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
