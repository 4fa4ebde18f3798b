//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer binds the toolkit-independent switch in [`crate::core`] to a
//! Ratatui buffer.  No input handling happens here.

pub mod layout;
pub mod switch_widget;
pub mod theme;

pub use switch_widget::{BufferCanvas, LabelSwitchWidget};
