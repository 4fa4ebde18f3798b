//! Render pipeline.
//!
//! Back to front: every label at home in the normal colour, the selected
//! background at the thumb offset, the optional relative labels, and the
//! selected label on top of the thumb.

use image::RgbaImage;

use super::geometry::SlotLayout;
use super::style::{Argb, SwitchStyle};

/// Text attributes for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Argb,
    pub alpha: u8,
    pub text_size: f32,
}

impl Paint {
    pub fn new(color: Argb, text_size: f32) -> Self {
        Self {
            color,
            alpha: 0xFF,
            text_size,
        }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Host 2D drawing surface.
///
/// Text is positioned by its left edge and baseline, in view pixels.
pub trait Canvas {
    fn measure_text(&self, text: &str, text_size: f32) -> f32;

    /// Font ascent (usually negative, as on most text stacks).
    fn font_ascent(&self, text_size: f32) -> f32;

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &Paint);

    fn draw_bitmap(&mut self, bitmap: &RgbaImage, left: f32, top: f32);
}

/// Everything one frame depends on.
pub struct Frame<'a> {
    pub labels: &'a [String],
    pub selected_index: usize,
    pub offset: i32,
    pub layout: &'a SlotLayout,
    pub padding_left: i32,
    pub padding_top: i32,
    pub baseline: i32,
    pub style: &'a SwitchStyle,
    pub background: Option<&'a RgbaImage>,
}

pub fn render(frame: &Frame<'_>, canvas: &mut dyn Canvas) {
    if frame.labels.is_empty() {
        return;
    }
    draw_labels(frame, canvas);
    if let Some(bitmap) = frame.background {
        canvas.draw_bitmap(
            bitmap,
            (frame.offset + frame.padding_left) as f32,
            frame.padding_top as f32,
        );
    }
    if frame.style.show_relative {
        draw_relative(frame, Side::Left, canvas);
        draw_relative(frame, Side::Right, canvas);
    }
    draw_selected(frame, canvas);
}

fn draw_labels(frame: &Frame<'_>, canvas: &mut dyn Canvas) {
    let ew = frame.layout.element_width as f32;
    let paint = Paint::new(frame.style.normal_color, frame.style.text_size);
    for (i, text) in frame.labels.iter().enumerate() {
        let width = canvas.measure_text(text, paint.text_size);
        let x = ew * i as f32 + (ew - width) / 2.0 + frame.padding_left as f32;
        canvas.draw_text(text, x.max(0.0), frame.baseline as f32, &paint);
    }
}

fn draw_selected(frame: &Frame<'_>, canvas: &mut dyn Canvas) {
    let Some(text) = frame.labels.get(frame.selected_index) else {
        return;
    };
    let paint = Paint::new(frame.style.selected_color, frame.style.text_size);
    let width = canvas.measure_text(text, paint.text_size);
    let ew = frame.layout.element_width as f32;
    let x = frame.offset as f32 + (ew - width) / 2.0 + frame.padding_left as f32;
    canvas.draw_text(text, x, frame.baseline as f32, &paint);
}

// ───────────────────────────────────────── relative labels ───

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Which label is revealed on `side` of the thumb.
pub fn relative_label<'a>(frame: &Frame<'a>, side: Side) -> &'a str {
    let sel = frame.selected_index;
    let last = frame.labels.len().saturating_sub(1);
    let thumb_left_of_home = frame.layout.slot_offset(sel) > frame.offset;
    let index = match (side, thumb_left_of_home) {
        (Side::Left, true) => sel.saturating_sub(1),
        (Side::Left, false) => sel,
        (Side::Right, true) => sel,
        (Side::Right, false) => (sel + 1).min(last),
    };
    frame.labels.get(index).map(String::as_str).unwrap_or("")
}

/// Slot-relative x of a relative label of width `text_width`, or `None` when
/// the thumb is pulled past the first or last slot.
pub fn relative_offset(frame: &Frame<'_>, side: Side, text_width: f32) -> Option<f32> {
    let sel = frame.selected_index;
    let home = frame.layout.slot_offset(sel);
    let ew = frame.layout.element_width as f32;
    if ew <= 0.0 {
        return None;
    }
    let mut on_left = false;
    if home > frame.offset {
        if sel == 0 {
            return None;
        }
        on_left = true;
    }
    if home < frame.offset && sel + 1 >= frame.labels.len() {
        return None;
    }
    let rate = ((frame.offset - home) as f32 / ew).abs();
    let centred = (ew - text_width) / 2.0;
    let shift = match (side, on_left) {
        (Side::Left, true) => -text_width * (1.0 - rate),
        (Side::Left, false) => -text_width * rate,
        (Side::Right, true) => text_width * rate,
        (Side::Right, false) => text_width * (1.0 - rate),
    };
    Some(centred + shift)
}

/// `|1 - rate| * 255 / 2`, clamped.
pub fn relative_alpha(rate: f32) -> u8 {
    let alpha = ((1.0 - rate) * 255.0).abs() as i32 / 2;
    alpha.clamp(0, 255) as u8
}

fn draw_relative(frame: &Frame<'_>, side: Side, canvas: &mut dyn Canvas) {
    let text = relative_label(frame, side);
    if text.is_empty() {
        return;
    }
    let text_size = frame.style.text_size;
    let width = canvas.measure_text(text, text_size);
    if width <= 0.0 {
        return;
    }
    let Some(rel) = relative_offset(frame, side, width) else {
        return;
    };
    let centred = (frame.layout.element_width as f32 - width) / 2.0;
    let rate = ((centred - rel) / width).abs();
    if rate == 0.0 {
        // thumb at rest
        return;
    }
    let alpha = relative_alpha(rate);
    if alpha == 0 {
        return;
    }
    let paint = Paint::new(frame.style.selected_color, text_size).with_alpha(alpha);
    let x = frame.offset as f32 + rel + frame.padding_left as f32;
    canvas.draw_text(text, x, frame.baseline as f32, &paint);
}
