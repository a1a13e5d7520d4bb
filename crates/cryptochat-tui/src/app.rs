//! Application state and update logic for the chat TUI.

use cryptochat_engine::{ChatWidget, Submission, Surface};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::event::Action;
use crate::theme::{GlyphSet, Theme};
use crate::widgets::{ChatPanel, Launcher};

/// Lines moved by a page scroll.
const PAGE_SCROLL: usize = 5;

/// The TUI application: a mounted widget plus view-only state.
#[derive(Debug)]
pub struct App {
    /// The chat widget being driven.
    pub widget: ChatWidget,
    /// Set when the user asked to leave.
    pub should_quit: bool,
    /// Animation frame counter.
    pub tick: usize,
    /// Conversation lines scrolled up from the bottom.
    pub scroll: usize,
    theme: Theme,
    glyphs: GlyphSet,
}

impl App {
    /// Wrap a mounted widget, picking colors and glyphs from the environment.
    pub fn new(widget: ChatWidget) -> Self {
        Self::with_theme(widget, Theme::from_env(), GlyphSet::from_env())
    }

    /// Wrap a mounted widget with an explicit theme.
    pub fn with_theme(widget: ChatWidget, theme: Theme, glyphs: GlyphSet) -> Self {
        Self {
            widget,
            should_quit: false,
            tick: 0,
            scroll: 0,
            theme,
            glyphs,
        }
    }

    /// Whether the chat panel is open.
    pub fn panel_open(&self) -> bool {
        self.widget.session().is_open
    }

    /// Handle a user action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Open => self.widget.open(),
            Action::Close => self.widget.close(),
            Action::Submit => match self.widget.submit_input() {
                Submission::Rejected => {}
                submission => {
                    debug!(?submission, "question submitted");
                    self.scroll = 0;
                }
            },
            Action::Input(ch) => self.widget.push_char(ch),
            Action::Backspace => self.widget.backspace(),
            Action::ScrollUp => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_sub(1),
            Action::PageUp => self.scroll = self.scroll.saturating_add(PAGE_SCROLL),
            Action::PageDown => self.scroll = self.scroll.saturating_sub(PAGE_SCROLL),
            Action::None => {}
        }
    }

    /// Advance animations and apply finished background work.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.widget.drain_events() > 0 {
            // Jump to the newest reply.
            self.scroll = 0;
        }
    }

    /// Draw the current surface.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let model = self.widget.render_model();
        match model.surface {
            Surface::Launcher => Launcher::new(&self.theme, &self.glyphs).render(area, buf),
            Surface::Panel => ChatPanel::new(&model, &self.theme, &self.glyphs)
                .tick(self.tick)
                .scroll(self.scroll)
                .render(area, buf),
            Surface::Handoff => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, EchoBackend, TEST_HEIGHT, TEST_WIDTH};
    use crate::theme::GlyphMode;
    use crate::widgets::{INPUT_PLACEHOLDER, LAUNCHER_LABEL};
    use cryptochat_engine::WidgetConfig;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_app() -> App {
        let widget = ChatWidget::mount(&WidgetConfig::default(), Arc::new(EchoBackend));
        App::with_theme(widget, Theme::plain(), GlyphSet::new(GlyphMode::Unicode))
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_action(Action::Input(ch));
        }
    }

    #[tokio::test]
    async fn test_starts_on_launcher() {
        let app = test_app();
        assert!(!app.panel_open());
        assert!(render(&app).contains(LAUNCHER_LABEL));
    }

    #[tokio::test]
    async fn test_open_shows_panel() {
        let mut app = test_app();
        app.handle_action(Action::Open);

        assert!(app.panel_open());
        let screen = render(&app);
        assert!(!screen.contains(LAUNCHER_LABEL));
        assert!(screen.contains(INPUT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_submit_and_reply() {
        let mut app = test_app();
        app.handle_action(Action::Open);
        type_text(&mut app, "btc?");
        assert_eq!(app.widget.input(), "btc?");

        app.scroll = 3;
        app.handle_action(Action::Submit);
        assert_eq!(app.widget.input(), "");
        assert_eq!(app.scroll, 0);
        assert!(app.widget.is_responding());

        app.widget.settle_all().await;
        assert_eq!(app.widget.last_reply().unwrap().text, "echo: btc?");
        assert!(render(&app).contains("echo: btc?"));
    }

    #[tokio::test]
    async fn test_blank_submit_ignored() {
        let mut app = test_app();
        app.handle_action(Action::Open);
        type_text(&mut app, "  ");
        app.handle_action(Action::Submit);

        assert_eq!(app.widget.input(), "  ");
        assert!(!app.widget.is_responding());
        assert_eq!(app.widget.timeline().len(), 1);
    }

    #[tokio::test]
    async fn test_backspace_edits_input() {
        let mut app = test_app();
        app.handle_action(Action::Open);
        type_text(&mut app, "eth");
        app.handle_action(Action::Backspace);
        assert_eq!(app.widget.input(), "et");
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_hands_off_to_launcher() {
        let mut app = test_app();
        app.handle_action(Action::Open);
        app.handle_action(Action::Close);

        // Neither surface during the hand-off.
        let screen = render(&app);
        assert!(!screen.contains(LAUNCHER_LABEL));
        assert!(!screen.contains(INPUT_PLACEHOLDER));

        tokio::time::sleep(Duration::from_millis(600)).await;
        app.tick();
        assert!(render(&app).contains(LAUNCHER_LABEL));
    }

    #[tokio::test]
    async fn test_scroll_saturates() {
        let mut app = test_app();
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.scroll, 0);
        app.handle_action(Action::PageUp);
        app.handle_action(Action::ScrollUp);
        assert_eq!(app.scroll, PAGE_SCROLL + 1);
        app.handle_action(Action::PageDown);
        assert_eq!(app.scroll, 1);
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = test_app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
