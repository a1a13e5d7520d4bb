//! Open chat panel widget.
//!
//! Draws the conversation from a [`RenderModel`] with an input line at the
//! bottom. User bubbles sit on the right, assistant bubbles on the left.

use cryptochat_engine::{EntryStyle, EntryView, RenderModel, Sender};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::line,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{GlyphSet, Theme};

/// Panel title.
pub const PANEL_TITLE: &str = " Crypto Assistant ";

/// Shown in the input line while it is empty.
pub const INPUT_PLACEHOLDER: &str = "Ask about a coin...";

/// Preferred panel size; clamped to the terminal.
const PANEL_WIDTH: u16 = 56;
const PANEL_HEIGHT: u16 = 20;

/// Input line plus the divider above it.
const INPUT_HEIGHT: u16 = 1;
const DIVIDER_HEIGHT: u16 = 1;

/// Prompt in front of the input buffer.
const PROMPT: &str = "> ";

/// The open chat panel.
///
/// ```text
/// ╭─ Crypto Assistant ─────────────────╮
/// │Hi! I'm your crypto assistant.      │
/// │                                    │
/// │                   price of bitcoin?│
/// │                                    │
/// │● ○ ○ typing...                     │
/// │────────────────────────────────────│
/// │> _                                 │
/// ╰──────────── Enter send · Esc close ╯
/// ```
pub struct ChatPanel<'a> {
    model: &'a RenderModel,
    theme: &'a Theme,
    glyphs: &'a GlyphSet,
    tick: usize,
    scroll: usize,
}

impl<'a> ChatPanel<'a> {
    /// Create a panel for `model`.
    pub fn new(model: &'a RenderModel, theme: &'a Theme, glyphs: &'a GlyphSet) -> Self {
        Self {
            model,
            theme,
            glyphs,
            tick: 0,
            scroll: 0,
        }
    }

    /// Animation frame for the composing indicator.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Lines scrolled up from the bottom of the conversation.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Build every conversation line for a pane `width` columns wide.
    fn conversation_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width);
        let bubble_width = (width * 4 / 5).max(10).min(width.max(1));

        let mut lines = Vec::new();
        for (i, entry) in self.model.entries.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            match entry.style {
                EntryStyle::Bubble(sender) => {
                    lines.extend(self.bubble_lines(entry, sender, bubble_width));
                }
                EntryStyle::Composing => lines.push(self.composing_line(entry)),
            }
        }
        lines
    }

    fn bubble_lines(&self, entry: &EntryView, sender: Sender, width: usize) -> Vec<Line<'static>> {
        let (color, alignment) = match sender {
            Sender::User => (self.theme.user, Alignment::Right),
            Sender::Assistant => (self.theme.assistant, Alignment::Left),
        };

        textwrap::wrap(&entry.text, width)
            .into_iter()
            .map(|segment| {
                Line::from(Span::styled(segment.into_owned(), Style::default().fg(color)))
                    .alignment(alignment)
            })
            .collect()
    }

    fn composing_line(&self, entry: &EntryView) -> Line<'static> {
        let (lit, unlit) = self.glyphs.composing_dots();
        let active = self.tick % 3;

        let mut spans: Vec<Span<'static>> = (0..3)
            .map(|i| {
                let dot = if i == active { lit } else { unlit };
                Span::styled(format!("{dot} "), Style::default().fg(self.theme.muted))
            })
            .collect();
        spans.push(Span::styled(
            entry.text.clone(),
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::ITALIC),
        ));
        Line::from(spans)
    }

    fn render_conversation(&self, area: Rect, buf: &mut Buffer) {
        let lines = self.conversation_lines(area.width);
        let visible = usize::from(area.height);
        let end = lines.len().saturating_sub(self.scroll).max(visible.min(lines.len()));
        let start = end.saturating_sub(visible);

        let shown: Vec<Line<'static>> = lines[start..end].to_vec();
        Paragraph::new(shown).render(area, buf);
    }

    fn render_divider(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }
        let divider = line::HORIZONTAL.repeat(usize::from(area.width));
        Paragraph::new(Line::from(Span::styled(
            divider,
            Style::default().fg(self.theme.border),
        )))
        .render(area, buf);
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(PROMPT, Style::default().fg(self.theme.primary))];

        if self.model.input.is_empty() {
            spans.push(Span::styled("_", Style::default().fg(self.theme.text)));
            spans.push(Span::styled(
                INPUT_PLACEHOLDER,
                Style::default().fg(self.theme.muted),
            ));
        } else {
            // Keep the tail (and the cursor) visible when the input is long.
            let room = usize::from(area.width).saturating_sub(PROMPT.len() + 1);
            let tail = tail_within(&self.model.input, room);
            spans.push(Span::styled(tail.to_string(), Style::default().fg(self.theme.text)));
            spans.push(Span::styled("_", Style::default().fg(self.theme.text)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn hint_line(&self) -> Line<'static> {
        let send_style = if self.model.send_enabled {
            Style::default().fg(self.theme.primary)
        } else {
            Style::default().fg(self.theme.muted)
        };

        let mut spans = Vec::new();
        if self.model.responding {
            spans.push(Span::styled(
                " waiting ·",
                Style::default().fg(self.theme.accent),
            ));
        }
        spans.push(Span::styled(" Enter send", send_style));
        spans.push(Span::styled(" · Esc close ", Style::default().fg(self.theme.muted)));
        Line::from(spans).alignment(Alignment::Right)
    }
}

/// Longest suffix of `text` that fits in `width` columns.
fn tail_within(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut start = text.len();
    for (idx, _) in text.char_indices().rev() {
        if text[idx..].width() > width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = super::anchor_bottom_right(area, PANEL_WIDTH, PANEL_HEIGHT);

        let block = Block::default()
            .title(PANEL_TITLE)
            .title_style(
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(self.hint_line())
            .borders(Borders::ALL)
            .border_set(self.glyphs.border())
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height < INPUT_HEIGHT + DIVIDER_HEIGHT + 1 {
            // Not enough space - just show input
            self.render_input(inner, buf);
            return;
        }

        let conversation_height = inner.height - INPUT_HEIGHT - DIVIDER_HEIGHT;
        let divider_y = inner.y + conversation_height;
        let input_y = divider_y + DIVIDER_HEIGHT;

        self.render_conversation(
            Rect::new(inner.x, inner.y, inner.width, conversation_height),
            buf,
        );
        self.render_divider(Rect::new(inner.x, divider_y, inner.width, DIVIDER_HEIGHT), buf);
        self.render_input(Rect::new(inner.x, input_y, inner.width, INPUT_HEIGHT), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_widget_to_string;
    use cryptochat_engine::{MessageId, Surface};

    fn model(entries: Vec<EntryView>, input: &str, responding: bool) -> RenderModel {
        RenderModel {
            surface: Surface::Panel,
            entries,
            input: input.to_string(),
            send_enabled: !input.trim().is_empty(),
            responding,
        }
    }

    fn bubble(n: u64, sender: Sender, text: &str) -> EntryView {
        EntryView {
            key: MessageId::Entry(n),
            text: text.to_string(),
            style: EntryStyle::Bubble(sender),
        }
    }

    fn composing(n: u64) -> EntryView {
        EntryView {
            key: MessageId::Typing(n),
            text: "typing...".into(),
            style: EntryStyle::Composing,
        }
    }

    fn render(model: &RenderModel, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let glyphs = GlyphSet::default();
        render_widget_to_string(ChatPanel::new(model, &theme, &glyphs), width, height)
    }

    #[test]
    fn test_panel_renders_title_and_placeholder() {
        let result = render(&model(vec![], "", false), 40, 10);
        assert!(result.contains("Crypto Assistant"));
        assert!(result.contains(INPUT_PLACEHOLDER));
        assert!(result.contains("Enter send"));
    }

    #[test]
    fn test_user_bubble_right_aligned() {
        let m = model(
            vec![
                bubble(1, Sender::Assistant, "Hello"),
                bubble(2, Sender::User, "price?"),
            ],
            "",
            false,
        );
        let result = render(&m, 40, 10);
        let lines: Vec<&str> = result.lines().collect();

        let greeting = lines.iter().find(|l| l.contains("Hello")).unwrap();
        assert!(greeting.starts_with("│Hello"));

        let question = lines.iter().find(|l| l.contains("price?")).unwrap();
        assert!(question.ends_with("price?│"));
    }

    #[test]
    fn test_composing_indicator_shown() {
        let m = model(
            vec![bubble(1, Sender::User, "price?"), composing(1)],
            "",
            true,
        );
        let result = render(&m, 40, 10);
        assert!(result.contains("● ○ ○ typing..."));
        assert!(result.contains("waiting ·"));
    }

    #[test]
    fn test_composing_animates_with_tick() {
        let m = model(vec![composing(1)], "", true);
        let theme = Theme::default();
        let glyphs = GlyphSet::default();
        let result = render_widget_to_string(ChatPanel::new(&m, &theme, &glyphs).tick(1), 40, 8);
        assert!(result.contains("○ ● ○ typing..."));
    }

    #[test]
    fn test_input_shown_with_cursor() {
        let result = render(&model(vec![], "eth?", false), 40, 8);
        assert!(result.contains("> eth?_"));
        assert!(!result.contains(INPUT_PLACEHOLDER));
    }

    #[test]
    fn test_long_conversation_shows_latest() {
        let entries = (1..=20)
            .map(|n| bubble(n, Sender::Assistant, &format!("message {n}")))
            .collect();
        let result = render(&model(entries, "", false), 40, 10);
        assert!(result.contains("message 20"));
        assert!(!result.contains("message 17"));
    }

    #[test]
    fn test_scroll_reveals_earlier_lines() {
        let entries: Vec<_> = (1..=20)
            .map(|n| bubble(n, Sender::Assistant, &format!("message {n}")))
            .collect();
        let m = model(entries, "", false);
        let theme = Theme::default();
        let glyphs = GlyphSet::default();
        let result =
            render_widget_to_string(ChatPanel::new(&m, &theme, &glyphs).scroll(10), 40, 10);
        assert!(!result.contains("message 20"));
        assert!(result.contains("message 15"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let m = model(vec![bubble(1, Sender::User, "hi")], "typing", false);
        let _ = render(&m, 8, 3);
        let _ = render(&m, 1, 1);
    }

    #[test]
    fn test_tail_within() {
        assert_eq!(tail_within("hello", 10), "hello");
        assert_eq!(tail_within("hello world", 5), "world");
        assert_eq!(tail_within("abc", 0), "");
    }
}
