//! Widgets that draw the engine's render model.
//!
//! - [`Launcher`] - the collapsed button shown while the panel is closed
//! - [`ChatPanel`] - the open conversation panel

mod launcher;
mod panel;

pub use launcher::{Launcher, LAUNCHER_LABEL};
pub use panel::{ChatPanel, INPUT_PLACEHOLDER, PANEL_TITLE};

use ratatui::layout::Rect;

/// A `width` x `height` rect in the bottom-right corner of `area`, clamped to fit.
pub fn anchor_bottom_right(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    )
}
