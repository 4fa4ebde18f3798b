//! Core widget logic – geometry, gestures, settle animation and drawing.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Hosts bind
//! it through the [`draw::Canvas`] and [`background::ImageLoader`] traits.

pub mod background;
pub mod draw;
pub mod geometry;
pub mod gesture;
pub mod settle;
pub mod style;
pub mod switch;

pub use switch::{IndexChangeListener, LabelSwitch};
