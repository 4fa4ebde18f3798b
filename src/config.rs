//! Style attributes and configuration persistence.
//!
//! Attributes mirror what a layout file would declare on the widget; each is
//! optional and falls back to its default independently.  The demo stores
//! them as a simple key-value text file at
//! `$XDG_CONFIG_HOME/label-switch/config.toml` (default
//! `~/.config/label-switch/config.toml`).

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::style::{
    Argb, BackgroundRef, DisplayMetrics, SwitchStyle, DEFAULT_DRAG_OUT_DIST, DEFAULT_NORMAL_COLOR,
    DEFAULT_SELECTED_COLOR, DEFAULT_SHOW_RELATIVE, DEFAULT_TEXT_SIZE,
};

#[derive(Debug, Error, PartialEq)]
pub enum AttrError {
    #[error("invalid colour `{0}` (expected #RRGGBB or #AARRGGBB)")]
    Color(String),
    #[error("invalid dimension `{0}` (expected a number with px, dp or sp)")]
    Dimension(String),
    #[error("invalid boolean `{0}`")]
    Bool(String),
    #[error("invalid number `{0}`")]
    Number(String),
    #[error("unknown attribute `{0}`")]
    Unknown(String),
}

// ───────────────────────────────────────── dimension ─────────

/// A length with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Px(f32),
    Dp(f32),
    Sp(f32),
}

impl Dimension {
    /// Parse `"16sp"`, `"10dp"`, `"3px"` or a bare pixel count.
    pub fn parse(s: &str) -> Result<Self, AttrError> {
        let t = s.trim().to_lowercase();
        let (number, ctor): (&str, fn(f32) -> Self) = if let Some(n) = t.strip_suffix("sp") {
            (n, Self::Sp)
        } else if let Some(n) = t.strip_suffix("dip") {
            (n, Self::Dp)
        } else if let Some(n) = t.strip_suffix("dp") {
            (n, Self::Dp)
        } else if let Some(n) = t.strip_suffix("px") {
            (n, Self::Px)
        } else {
            (t.as_str(), Self::Px)
        };
        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| AttrError::Dimension(s.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(AttrError::Dimension(s.to_string()));
        }
        Ok(ctor(value))
    }

    pub fn to_px(self, metrics: &DisplayMetrics) -> i32 {
        match self {
            Self::Px(v) => (v + 0.5) as i32,
            Self::Dp(v) => metrics.dp_to_px(v),
            Self::Sp(v) => metrics.sp_to_px(v),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Dp(v) => write!(f, "{v}dp"),
            Self::Sp(v) => write!(f, "{v}sp"),
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, AttrError> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(AttrError::Bool(s.to_string())),
    }
}

/// Split a comma-separated label list, dropping blank entries.
pub fn parse_labels(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().trim_matches('"').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// ───────────────────────────────────────── attributes ────────

/// Declared widget attributes; `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitchAttrs {
    pub normal_color: Option<Argb>,
    pub selected_color: Option<Argb>,
    pub label_text_size: Option<Dimension>,
    pub selected_background: Option<BackgroundRef>,
    pub drag_out_dist: Option<Dimension>,
    pub show_swipe_relative: Option<bool>,
    pub labels: Option<Vec<String>>,
}

impl SwitchAttrs {
    /// Keys accepted by [`SwitchAttrs::set`].
    pub const KEYS: &[&str] = &[
        "normal_color",
        "selected_color",
        "label_text_size",
        "selected_background",
        "drag_out_dist",
        "show_swipe_relative",
        "labels",
    ];

    /// Apply one `key = value` attribute.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        let value = value.trim().trim_matches('"');
        match key {
            "normal_color" => {
                self.normal_color =
                    Some(Argb::parse(value).ok_or_else(|| AttrError::Color(value.into()))?);
            }
            "selected_color" => {
                self.selected_color =
                    Some(Argb::parse(value).ok_or_else(|| AttrError::Color(value.into()))?);
            }
            "label_text_size" => self.label_text_size = Some(Dimension::parse(value)?),
            "selected_background" => {
                self.selected_background =
                    (!value.is_empty()).then(|| BackgroundRef(value.to_string()));
            }
            "drag_out_dist" => self.drag_out_dist = Some(Dimension::parse(value)?),
            "show_swipe_relative" => self.show_swipe_relative = Some(parse_bool(value)?),
            "labels" => self.labels = Some(parse_labels(value)),
            other => return Err(AttrError::Unknown(other.to_string())),
        }
        Ok(())
    }

    /// Resolve into a pixel style, filling in defaults.
    pub fn resolve(&self, metrics: &DisplayMetrics) -> SwitchStyle {
        SwitchStyle {
            normal_color: self.normal_color.unwrap_or(DEFAULT_NORMAL_COLOR),
            selected_color: self.selected_color.unwrap_or(DEFAULT_SELECTED_COLOR),
            text_size: self
                .label_text_size
                .unwrap_or(Dimension::Sp(DEFAULT_TEXT_SIZE))
                .to_px(metrics) as f32,
            selected_background: self.selected_background.clone(),
            drag_out_dist: self
                .drag_out_dist
                .unwrap_or(Dimension::Dp(DEFAULT_DRAG_OUT_DIST))
                .to_px(metrics),
            show_relative: self.show_swipe_relative.unwrap_or(DEFAULT_SHOW_RELATIVE),
        }
    }

    /// Overlay every attribute `other` declares.
    pub fn merge(&mut self, other: SwitchAttrs) {
        if other.normal_color.is_some() {
            self.normal_color = other.normal_color;
        }
        if other.selected_color.is_some() {
            self.selected_color = other.selected_color;
        }
        if other.label_text_size.is_some() {
            self.label_text_size = other.label_text_size;
        }
        if other.selected_background.is_some() {
            self.selected_background = other.selected_background;
        }
        if other.drag_out_dist.is_some() {
            self.drag_out_dist = other.drag_out_dist;
        }
        if other.show_swipe_relative.is_some() {
            self.show_swipe_relative = other.show_swipe_relative;
        }
        if other.labels.is_some() {
            self.labels = other.labels;
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// Terminal cells are coarse: one column per 5dp, text sizes irrelevant.
pub const TERMINAL_DENSITY: f32 = 0.2;
pub const TERMINAL_SCALED_DENSITY: f32 = 0.0625;

/// Demo configuration: widget attributes plus host settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub attrs: SwitchAttrs,
    /// Pixels (columns) per dp.
    pub density: f32,
    /// Pixels per sp.
    pub scaled_density: f32,
    /// How long the selection toast stays up.
    pub toast_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            attrs: SwitchAttrs::default(),
            density: TERMINAL_DENSITY,
            scaled_density: TERMINAL_SCALED_DENSITY,
            toast_ms: 2000,
        }
    }
}

impl AppConfig {
    pub fn metrics(&self) -> DisplayMetrics {
        DisplayMetrics::new(self.density, self.scaled_density)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path` (or the default location), falling back to
    /// defaults when the file is missing.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Self::parse_config(&contents))
    }

    /// Persist current config to `path` (or the default location).
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    /// Parse the key-value format.  Bad lines are logged and skipped.
    pub fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "config line without `=`, ignored");
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Host settings.
            match key {
                "density" | "scaled_density" => {
                    match value.parse::<f32>() {
                        Ok(v) if v.is_finite() && v > 0.0 => {
                            if key == "density" {
                                config.density = v;
                            } else {
                                config.scaled_density = v;
                            }
                        }
                        _ => tracing::warn!(
                            line = lineno + 1,
                            error = %AttrError::Number(value.to_string()),
                            "config value ignored"
                        ),
                    }
                    continue;
                }
                "toast_ms" => {
                    match value.parse::<u64>() {
                        Ok(v) => config.toast_ms = v.clamp(250, 10_000),
                        Err(_) => tracing::warn!(
                            line = lineno + 1,
                            error = %AttrError::Number(value.to_string()),
                            "config value ignored"
                        ),
                    }
                    continue;
                }
                _ => {}
            }

            if let Err(e) = config.attrs.set(key, value) {
                tracing::warn!(line = lineno + 1, error = %e, "config value ignored");
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let a = &self.attrs;
        let mut lines = vec![
            "# label-switch configuration".to_string(),
            String::new(),
            "# Host".to_string(),
            format!("density = {}", self.density),
            format!("scaled_density = {}", self.scaled_density),
            format!("toast_ms = {}", self.toast_ms),
            String::new(),
            "# Widget attributes (omit a key to use its default)".to_string(),
            "# Dimensions take px, dp or sp; colours #RRGGBB or #AARRGGBB.".to_string(),
        ];
        if let Some(c) = a.normal_color {
            lines.push(format!("normal_color = {c}"));
        }
        if let Some(c) = a.selected_color {
            lines.push(format!("selected_color = {c}"));
        }
        if let Some(d) = a.label_text_size {
            lines.push(format!("label_text_size = {d}"));
        }
        if let Some(bg) = &a.selected_background {
            lines.push(format!("selected_background = {}", bg.as_str()));
        }
        if let Some(d) = a.drag_out_dist {
            lines.push(format!("drag_out_dist = {d}"));
        }
        if let Some(b) = a.show_swipe_relative {
            lines.push(format!("show_swipe_relative = {b}"));
        }
        if let Some(labels) = &a.labels {
            lines.push(format!("labels = {}", labels.join(", ")));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/label-switch/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("label-switch").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_units() {
        let m = DisplayMetrics::new(2.0, 3.0);
        assert_eq!(Dimension::parse("10dp").map(|d| d.to_px(&m)), Ok(20));
        assert_eq!(Dimension::parse("10dip").map(|d| d.to_px(&m)), Ok(20));
        assert_eq!(Dimension::parse("16SP").map(|d| d.to_px(&m)), Ok(48));
        assert_eq!(Dimension::parse(" 7px ").map(|d| d.to_px(&m)), Ok(7));
        assert_eq!(Dimension::parse("7").map(|d| d.to_px(&m)), Ok(7));
        assert!(Dimension::parse("ten dp").is_err());
        assert!(Dimension::parse("-3dp").is_err());
    }

    #[test]
    fn every_attribute_defaults_independently() {
        let m = DisplayMetrics::default();
        let mut attrs = SwitchAttrs::default();
        attrs.set("selected_color", "#ff0000").expect("colour");
        let style = attrs.resolve(&m);
        assert_eq!(style.selected_color, Argb(0xFFFF_0000));
        assert_eq!(style.normal_color, DEFAULT_NORMAL_COLOR);
        assert_eq!(style.text_size, 16.0);
        assert_eq!(style.drag_out_dist, 10);
        assert!(!style.show_relative);
    }

    #[test]
    fn bad_values_are_typed_errors() {
        let mut attrs = SwitchAttrs::default();
        assert_eq!(
            attrs.set("normal_color", "blue"),
            Err(AttrError::Color("blue".into()))
        );
        assert_eq!(
            attrs.set("show_swipe_relative", "maybe"),
            Err(AttrError::Bool("maybe".into()))
        );
        assert_eq!(attrs.set("nope", "1"), Err(AttrError::Unknown("nope".into())));
        assert_eq!(attrs, SwitchAttrs::default());
    }

    #[test]
    fn labels_are_split_and_trimmed() {
        assert_eq!(parse_labels(" Day, \"Week\" ,,Month "), vec!["Day", "Week", "Month"]);
        assert!(parse_labels("").is_empty());
    }

    #[test]
    fn parse_skips_bad_lines_and_keeps_good_ones() {
        let cfg = AppConfig::parse_config(
            "# comment\n[switch]\nlabels = A, B, C\nnormal_color = nope\ndensity = 0.5\n\
             toast_ms = 5\nshow_swipe_relative = true\ngarbage\n",
        );
        assert_eq!(cfg.attrs.labels, Some(vec!["A".into(), "B".into(), "C".into()]));
        assert_eq!(cfg.attrs.normal_color, None);
        assert_eq!(cfg.attrs.show_swipe_relative, Some(true));
        assert_eq!(cfg.density, 0.5);
        assert_eq!(cfg.toast_ms, 250);
    }

    #[test]
    fn serialise_then_parse_preserves_config() {
        let mut cfg = AppConfig::default();
        for (k, v) in [
            ("normal_color", "#80112233"),
            ("selected_color", "#0000ff"),
            ("label_text_size", "18sp"),
            ("selected_background", "gradient:#112233,#445566"),
            ("drag_out_dist", "4dp"),
            ("show_swipe_relative", "on"),
            ("labels", "Day, Week, Month"),
        ] {
            cfg.attrs.set(k, v).expect("valid attribute");
        }
        cfg.toast_ms = 1500;
        assert_eq!(AppConfig::parse_config(&cfg.serialise()), cfg);
    }

    #[test]
    fn merge_prefers_declared_values() {
        let mut base = SwitchAttrs::default();
        base.set("labels", "A, B").expect("labels");
        base.set("normal_color", "#111111").expect("colour");
        let mut overlay = SwitchAttrs::default();
        overlay.set("labels", "X, Y, Z").expect("labels");
        base.merge(overlay);
        assert_eq!(base.labels.as_ref().map(Vec::len), Some(3));
        assert_eq!(base.normal_color, Some(Argb(0xFF11_1111)));
    }
}
