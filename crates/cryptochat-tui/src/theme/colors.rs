//! Catppuccin Mocha color palette for the chat widget.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Background
    pub base: Color,

    // Foregrounds
    pub text: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub accent: Color,

    // Bubbles
    pub user: Color,
    pub assistant: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46), // #1e1e2e

            text: Color::Rgb(205, 214, 244), // #cdd6f4
            muted: Color::Rgb(108, 112, 134), // #6c7086

            primary: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            accent: Color::Rgb(250, 179, 135),  // #fab387 (peach)

            user: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
            assistant: Color::Rgb(205, 214, 244), // #cdd6f4

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(249, 226, 175), // #f9e2af
        }
    }

    /// Monochrome palette used when `NO_COLOR` is set.
    pub fn plain() -> Self {
        Self {
            base: Color::Reset,
            text: Color::Reset,
            muted: Color::DarkGray,
            primary: Color::Reset,
            accent: Color::Reset,
            user: Color::Reset,
            assistant: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
        }
    }

    /// Pick the palette for the current environment.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::plain()
        } else {
            Self::mocha()
        }
    }
}
