//! A horizontally swipeable label switch.
//!
//! Pick one label from a fixed set by dragging the thumb or tapping a label;
//! on release the thumb settles onto its slot with a decelerating animation.
//!
//! [`core`] holds the toolkit-independent widget, [`ui`] binds it to Ratatui,
//! and [`config`] turns style attributes into a [`core::style::SwitchStyle`].

pub mod config;
pub mod core;
pub mod ui;

pub use crate::core::{
    geometry::{Bounds, Insets},
    gesture::{PointerEvent, PointerKind},
    style::{Argb, DisplayMetrics, SwitchStyle},
    LabelSwitch,
};
