//! Theme components for the chat front end.
//!
//! This module provides:
//! - [`Theme`] - Color palette
//! - [`GlyphSet`] - Borders and indicator glyphs with a `NO_COLOR`/ASCII fallback

mod colors;
mod glyphs;

pub use colors::Theme;
pub use glyphs::{GlyphMode, GlyphSet};
