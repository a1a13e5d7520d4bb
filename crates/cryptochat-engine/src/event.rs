//! Events that re-enter the widget from background tasks.
//!
//! Timer firings and backend settlements are produced off the widget's own
//! task and delivered through one queue, so they are applied in the order
//! they arrive.

use crate::backend::BackendError;

/// An event produced by a background task for the widget to apply.
#[derive(Debug)]
pub enum WidgetEvent {
    /// The launcher hand-off delay scheduled by a `close()` has elapsed.
    LauncherDue {
        /// Schedule this firing belongs to; stale generations are ignored.
        generation: u64,
    },
    /// A backend request finished.
    Settled(Settlement),
}

/// Outcome of one dispatched question.
#[derive(Debug)]
pub struct Settlement {
    /// Submission the request was made for.
    pub ticket: u64,
    /// The answer text, or why there is none.
    pub outcome: Result<String, BackendError>,
}
