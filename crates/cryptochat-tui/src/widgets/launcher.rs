//! Launcher button widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{GlyphSet, Theme};

/// Text on the launcher, after the icon.
pub const LAUNCHER_LABEL: &str = "Crypto chat";

/// The collapsed launcher, drawn in the bottom-right corner.
///
/// ```text
/// ╭───────────────╮
/// │ ◆ Crypto chat │
/// ╰───────────────╯
/// ```
pub struct Launcher<'a> {
    theme: &'a Theme,
    glyphs: &'a GlyphSet,
}

impl<'a> Launcher<'a> {
    /// Create a launcher widget.
    pub fn new(theme: &'a Theme, glyphs: &'a GlyphSet) -> Self {
        Self { theme, glyphs }
    }

    fn label(&self) -> String {
        format!("{} {LAUNCHER_LABEL}", self.glyphs.launcher())
    }

    /// Size of the launcher including borders.
    pub fn size(&self) -> (u16, u16) {
        let width = u16::try_from(self.label().width()).unwrap_or(u16::MAX);
        (width.saturating_add(4), 3)
    }
}

impl Widget for Launcher<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.size();
        let rect = super::anchor_bottom_right(area, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(self.glyphs.border())
            .border_style(Style::default().fg(self.theme.border_focused));
        let inner = block.inner(rect);
        block.render(rect, buf);

        Paragraph::new(Line::from(self.label()))
            .style(
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_widget_to_string;
    use insta::assert_snapshot;

    #[test]
    fn test_launcher_size() {
        let theme = Theme::default();
        let glyphs = GlyphSet::default();
        assert_eq!(Launcher::new(&theme, &glyphs).size(), (17, 3));
    }

    #[test]
    fn test_launcher_renders() {
        let theme = Theme::default();
        let glyphs = GlyphSet::default();
        let result = render_widget_to_string(Launcher::new(&theme, &glyphs), 17, 3);
        assert_snapshot!(result, @r"
        ╭───────────────╮
        │ ◆ Crypto chat │
        ╰───────────────╯
        ");
    }

    #[test]
    fn test_launcher_anchored_bottom_right() {
        let theme = Theme::default();
        let glyphs = GlyphSet::default();
        let result = render_widget_to_string(Launcher::new(&theme, &glyphs), 40, 6);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[4].ends_with("│ ◆ Crypto chat │"));
        assert!(lines[0].is_empty());
    }
}
