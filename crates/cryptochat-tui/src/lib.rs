//! cryptochat-tui: Terminal front end for the crypto assistant chat widget
//!
//! This crate draws a mounted [`cryptochat_engine::ChatWidget`] in the
//! terminal:
//! - A launcher button in the bottom-right corner while the chat is closed
//! - A chat panel with speech bubbles and an input line while it is open

mod app;
mod event;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use cryptochat_engine;
pub use event::{key_to_action, Action, Event, EventHandler};

use cryptochat_engine::{ChatBackend, ChatWidget, WidgetConfig};
use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;

/// Tick interval; drives the composing animation and event draining.
const TICK_RATE_MS: u64 = 100;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Mounts a widget for `config`, runs the event loop until the user quits,
/// then unmounts the widget and restores the terminal.
pub async fn run_tui(
    config: WidgetConfig,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(ChatWidget::mount(&config, backend));
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.widget.unmount();
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(area, frame.buffer_mut());
        })?;

        match events.next().await {
            Some(Event::Key(key)) => {
                let action = key_to_action(key, app.panel_open());
                app.handle_action(action);
            }
            Some(Event::Tick) => app.tick(),
            // Redrawn on the next pass
            Some(Event::Resize(_, _)) => {}
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
