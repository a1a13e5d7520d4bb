//! Render model projection.
//!
//! [`project`] is a pure function of widget state. Front ends draw the
//! [`RenderModel`] and never look at the timeline or session directly.

use serde::Serialize;

use crate::message::{Message, MessageId, Sender};
use crate::session::Session;

/// Which top-level control is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// The collapsed launcher button.
    Launcher,
    /// The open chat panel.
    Panel,
    /// Neither: the panel has closed and the launcher has not come back yet.
    Handoff,
}

/// How an entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "style", content = "sender")]
pub enum EntryStyle {
    /// A speech bubble aligned by sender.
    Bubble(Sender),
    /// The animated "composing" indicator.
    Composing,
}

/// One displayable timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    /// Stable key for the entry.
    pub key: MessageId,
    /// Text to show.
    pub text: String,
    /// Visual treatment.
    pub style: EntryStyle,
}

/// Everything a front end needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    /// Visible top-level control.
    pub surface: Surface,
    /// Entries in display order.
    pub entries: Vec<EntryView>,
    /// Current input buffer.
    pub input: String,
    /// Whether the send control is enabled.
    pub send_enabled: bool,
    /// Whether a reply is being waited on.
    pub responding: bool,
}

/// Map widget state to a [`RenderModel`].
pub fn project(
    session: Session,
    entries: &[Message],
    responding: bool,
    input: &str,
) -> RenderModel {
    let surface = if session.is_open {
        Surface::Panel
    } else if session.launcher_visible {
        Surface::Launcher
    } else {
        Surface::Handoff
    };

    let entries = entries
        .iter()
        .map(|message| EntryView {
            key: message.id,
            text: message.text.clone(),
            style: if message.is_placeholder() {
                EntryStyle::Composing
            } else {
                EntryStyle::Bubble(message.sender)
            },
        })
        .collect();

    RenderModel {
        surface,
        entries,
        input: input.to_string(),
        send_enabled: !input.trim().is_empty(),
        responding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<Message> {
        vec![
            Message::assistant(MessageId::Entry(1), "Hi!"),
            Message::user(MessageId::Entry(2), "price?"),
            Message::placeholder(MessageId::Typing(1), "typing..."),
        ]
    }

    #[test]
    fn test_surface_follows_session() {
        let open = Session {
            is_open: true,
            launcher_visible: false,
        };
        let closed = Session {
            is_open: false,
            launcher_visible: true,
        };
        let handoff = Session {
            is_open: false,
            launcher_visible: false,
        };

        assert_eq!(project(open, &[], false, "").surface, Surface::Panel);
        assert_eq!(project(closed, &[], false, "").surface, Surface::Launcher);
        assert_eq!(project(handoff, &[], false, "").surface, Surface::Handoff);
    }

    #[test]
    fn test_entry_styles() {
        let model = project(Session::default(), &sample_entries(), true, "");

        let styles: Vec<_> = model.entries.iter().map(|e| e.style).collect();
        assert_eq!(
            styles,
            vec![
                EntryStyle::Bubble(Sender::Assistant),
                EntryStyle::Bubble(Sender::User),
                EntryStyle::Composing,
            ]
        );
        assert_eq!(model.entries[2].key, MessageId::Typing(1));
        assert!(model.responding);
    }

    #[test]
    fn test_send_enabled_only_with_text() {
        let session = Session::default();
        assert!(!project(session, &[], false, "").send_enabled);
        assert!(!project(session, &[], false, "  \t").send_enabled);
        assert!(project(session, &[], false, " eth? ").send_enabled);
    }

    #[test]
    fn test_projection_is_pure() {
        let entries = sample_entries();
        let session = Session {
            is_open: true,
            launcher_visible: false,
        };
        assert_eq!(
            project(session, &entries, false, "x"),
            project(session, &entries, false, "x")
        );
    }
}
