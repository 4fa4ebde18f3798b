//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::style::Argb;

/// Central theme.  Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── switch ─────────────────────────────────────────────────
    /// Backdrop the switch is painted on; translucent text is blended
    /// against it since terminals have no alpha.
    pub const BACKDROP: (u8, u8, u8) = (0x14, 0x14, 0x18);

    pub fn backdrop() -> Color {
        let (r, g, b) = Self::BACKDROP;
        Color::Rgb(r, g, b)
    }

    /// Resolve a widget colour (plus an extra alpha) to a terminal colour.
    pub fn blend(color: Argb, alpha: u8) -> Color {
        let a = (color.alpha() as u32 * alpha as u32) / 255;
        let (br, bg, bb) = Self::BACKDROP;
        let mix = |c: u8, b: u8| ((c as u32 * a + b as u32 * (255 - a)) / 255) as u8;
        Color::Rgb(
            mix(color.red(), br),
            mix(color.green(), bg),
            mix(color.blue(), bb),
        )
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn toast_style() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}
