//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use label_switch::LabelSwitch;
use ratatui::layout::Rect;

/// A transient message shown in place of the status hint.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub until: Instant,
}

/// Top-level application state.
pub struct AppState {
    /// The widget under demonstration.
    pub switch: LabelSwitch,
    /// Full terminal area as of the last draw; used for hit-testing.
    pub terminal_area: Rect,
    /// A pointer session started on the switch and has not been released.
    /// Moves and releases are delivered even outside the widget.
    pub pointer_captured: bool,
    pub toast: Option<Toast>,
    pub toast_duration: Duration,
    /// Something outside the switch changed and the screen must be redrawn.
    pub dirty: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(switch: LabelSwitch, toast_duration: Duration) -> Self {
        Self {
            switch,
            terminal_area: Rect::default(),
            pointer_captured: false,
            toast: None,
            toast_duration,
            dirty: true,
            should_quit: false,
        }
    }

    pub fn show_toast(&mut self, message: String, now: Instant) {
        self.toast = Some(Toast {
            message,
            until: now + self.toast_duration,
        });
        self.dirty = true;
    }

    /// Drop the toast once it has been up long enough.
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.until) {
            self.toast = None;
            self.dirty = true;
        }
    }

    pub fn status_hint(&self) -> &'static str {
        "drag the thumb or click a label | ←/→ Home/End 1-9: select | q: quit"
    }
}
