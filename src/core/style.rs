//! Colours, display density and the resolved style of a switch.

use std::fmt;

// ───────────────────────────────────────── colour ────────────

/// A packed `0xAARRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same colour with its alpha channel replaced.
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// RGBA byte order, as used by `image::Rgba`.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional).
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self(0xFF00_0000 | value)),
            8 => Some(Self(value)),
            _ => None,
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

// ───────────────────────────────────────── density ───────────

/// Host display metrics used to turn device-independent units into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Pixels per dp.
    pub density: f32,
    /// Pixels per sp (density × user font scale).
    pub scaled_density: f32,
}

impl DisplayMetrics {
    pub fn new(density: f32, scaled_density: f32) -> Self {
        Self {
            density,
            scaled_density,
        }
    }

    pub fn dp_to_px(&self, dp: f32) -> i32 {
        (dp * self.density + 0.5) as i32
    }

    pub fn sp_to_px(&self, sp: f32) -> i32 {
        (sp * self.scaled_density + 0.5) as i32
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

// ───────────────────────────────────────── style ─────────────

pub const DEFAULT_NORMAL_COLOR: Argb = Argb(0xFF88_8888);
pub const DEFAULT_SELECTED_COLOR: Argb = Argb(0xFF00_00FF);
/// sp
pub const DEFAULT_TEXT_SIZE: f32 = 16.0;
/// dp
pub const DEFAULT_DRAG_OUT_DIST: f32 = 10.0;
pub const DEFAULT_SHOW_RELATIVE: bool = false;
/// dp
pub const DRAG_THRESHOLD_DP: f32 = 5.0;

/// Reference to the image drawn behind the selected label.
///
/// Resolved by an [`ImageLoader`](super::background::ImageLoader): first as a
/// raw bitmap, then as a drawable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundRef(pub String);

impl BackgroundRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Style of a switch with every dimension already converted to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStyle {
    pub normal_color: Argb,
    pub selected_color: Argb,
    pub text_size: f32,
    pub selected_background: Option<BackgroundRef>,
    pub drag_out_dist: i32,
    pub show_relative: bool,
}

impl SwitchStyle {
    /// All defaults, resolved against `metrics`.
    pub fn with_metrics(metrics: &DisplayMetrics) -> Self {
        Self {
            normal_color: DEFAULT_NORMAL_COLOR,
            selected_color: DEFAULT_SELECTED_COLOR,
            text_size: metrics.sp_to_px(DEFAULT_TEXT_SIZE) as f32,
            selected_background: None,
            drag_out_dist: metrics.dp_to_px(DEFAULT_DRAG_OUT_DIST),
            show_relative: DEFAULT_SHOW_RELATIVE,
        }
    }
}

impl Default for SwitchStyle {
    fn default() -> Self {
        Self::with_metrics(&DisplayMetrics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_argb() {
        assert_eq!(Argb::parse("#888888"), Some(DEFAULT_NORMAL_COLOR));
        assert_eq!(Argb::parse("800000FF"), Some(Argb(0x8000_00FF)));
        assert_eq!(Argb::parse("#12345"), None);
        assert_eq!(Argb::parse("#zzzzzz"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for c in [DEFAULT_SELECTED_COLOR, Argb(0x4011_2233)] {
            assert_eq!(Argb::parse(&c.to_string()), Some(c));
        }
    }

    #[test]
    fn channels_and_alpha() {
        let c = Argb::from_rgb(0x11, 0x22, 0x33);
        assert_eq!(c.to_rgba(), [0x11, 0x22, 0x33, 0xFF]);
        assert_eq!(c.with_alpha(0x7F).alpha(), 0x7F);
        assert_eq!(c.with_alpha(0x7F).red(), 0x11);
    }

    #[test]
    fn unit_conversion_rounds_half_up() {
        let m = DisplayMetrics::new(2.0, 2.5);
        assert_eq!(m.dp_to_px(5.0), 10);
        assert_eq!(m.sp_to_px(16.0), 40);
        let tui = DisplayMetrics::new(0.2, 0.0625);
        assert_eq!(tui.dp_to_px(DRAG_THRESHOLD_DP), 1);
        assert_eq!(tui.dp_to_px(DEFAULT_DRAG_OUT_DIST), 2);
    }

    #[test]
    fn defaults_resolve_against_metrics() {
        let style = SwitchStyle::with_metrics(&DisplayMetrics::new(3.0, 3.0));
        assert_eq!(style.text_size, 48.0);
        assert_eq!(style.drag_out_dist, 30);
        assert!(!style.show_relative);
        assert!(style.selected_background.is_none());
    }
}
