//! Borders and indicator glyphs for Unicode and ASCII fallback.
//!
//! Supports `NO_COLOR` environment variable by using ASCII glyphs.

use ratatui::symbols::border;

/// Glyph mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// Standard Unicode symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback.
    Ascii,
}

/// Glyph set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    mode: GlyphMode,
}

impl GlyphSet {
    /// Create a glyph set with the specified mode.
    pub fn new(mode: GlyphMode) -> Self {
        Self { mode }
    }

    /// Pick the mode for the current environment.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::new(GlyphMode::Ascii)
        } else {
            Self::default()
        }
    }

    /// Get the current mode.
    pub fn mode(&self) -> GlyphMode {
        self.mode
    }

    /// Borders for the launcher and an unfocused panel.
    pub fn border(&self) -> border::Set {
        match self.mode {
            GlyphMode::Unicode => border::ROUNDED,
            GlyphMode::Ascii => border::PLAIN,
        }
    }

    /// Icon shown on the launcher button.
    pub fn launcher(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "◆",
            GlyphMode::Ascii => "*",
        }
    }

    /// Lit and unlit dots of the composing indicator.
    pub fn composing_dots(&self) -> (&'static str, &'static str) {
        match self.mode {
            GlyphMode::Unicode => ("●", "○"),
            GlyphMode::Ascii => ("o", "."),
        }
    }
}
