//! cryptochat-engine: Headless chat session engine for the crypto assistant widget
//!
//! This crate provides the core logic of the chat widget, including:
//! - The message timeline and typing placeholder lifecycle
//! - The request dispatcher and the backend client it talks to
//! - Panel/launcher session state with its hand-off timer
//! - A pure projection from widget state to a render model
//!
//! Rendering is left to front ends such as `cryptochat-tui`.

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod message;
pub mod session;
pub mod timeline;
pub mod typing;
pub mod view;
pub mod widget;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use backend::{
    BackendError, ChatBackend, ChatReply, ChatRequest, HttpChatBackend, CHAT_ENDPOINT_PATH,
};
pub use config::{ConfigError, WidgetConfig, BACKEND_URL_ENV, CONFIG_DIR, CONFIG_FILE};
pub use dispatcher::{Dispatcher, Submission};
pub use event::{Settlement, WidgetEvent};
pub use message::{Message, MessageId, MessageKind, Sender};
pub use session::{Session, SessionController};
pub use timeline::Timeline;
pub use typing::TypingIndicator;
pub use view::{project, EntryStyle, EntryView, RenderModel, Surface};
pub use widget::ChatWidget;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
