//! Slot geometry: element width, clamp range and index mapping.
//!
//! Everything here is derived from the view bounds and the label count, and
//! is recomputed only when one of those changes.

/// Padding around the track, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

/// Size of the view as assigned by the host's layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub padding: Insets,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Insets::default(),
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Width available to the labels.
    pub fn track_width(&self) -> i32 {
        self.width - self.padding.left - self.padding.right
    }

    /// Height available to the thumb.
    pub fn content_height(&self) -> i32 {
        self.height - self.padding.top - self.padding.bottom
    }
}

/// Per-layout slot measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub track_width: i32,
    pub element_width: i32,
    pub label_count: usize,
    pub drag_out_dist: i32,
}

impl SlotLayout {
    pub fn compute(bounds: &Bounds, label_count: usize, drag_out_dist: i32) -> Self {
        let track_width = bounds.track_width();
        let element_width = if label_count == 0 {
            track_width
        } else {
            track_width / label_count as i32
        };
        Self {
            track_width,
            element_width,
            label_count,
            drag_out_dist,
        }
    }

    /// Home offset of slot `index`.
    pub fn slot_offset(&self, index: usize) -> i32 {
        self.element_width * index as i32
    }

    /// Rightmost resting offset (the last slot).
    pub fn max_rest_offset(&self) -> i32 {
        self.track_width - self.element_width
    }

    /// Clamp an offset into `[-dragOut, trackWidth - elementWidth + dragOut]`.
    pub fn clamp_offset(&self, offset: i32) -> i32 {
        let low = -self.drag_out_dist;
        let high = self.max_rest_offset() + self.drag_out_dist;
        if high < low {
            return low;
        }
        offset.clamp(low, high)
    }

    pub fn can_scroll_left(&self, offset: i32) -> bool {
        offset > 0
    }

    pub fn can_scroll_right(&self, offset: i32) -> bool {
        offset < self.max_rest_offset()
    }

    pub fn clamp_index(&self, index: i64) -> usize {
        if self.label_count == 0 {
            return 0;
        }
        index.clamp(0, self.label_count as i64 - 1) as usize
    }

    /// Slot under a track-relative x coordinate (truncating).
    pub fn index_at(&self, x: f32) -> usize {
        if self.label_count == 0 || self.element_width <= 0 {
            return 0;
        }
        let raw = (x / self.element_width as f32).max(0.0);
        self.clamp_index(raw as i64)
    }

    /// Slot the thumb would snap to from `offset` (rounds half up).
    pub fn index_for_offset(&self, offset: i32) -> usize {
        if self.element_width <= 0 {
            return 0;
        }
        let touch = (offset as f32 / self.element_width as f32 + 0.5) as i64;
        self.clamp_index(touch)
    }
}

/// Text baseline: vertically centres one line of text of the given ascent.
pub fn text_baseline(bounds: &Bounds, ascent: f32) -> i32 {
    ((bounds.content_height() as f32 + ascent.abs()) / 2.0 + bounds.padding.top as f32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: i32, count: usize) -> SlotLayout {
        SlotLayout::compute(&Bounds::new(width, 40), count, 10)
    }

    #[test]
    fn element_width_floors_track_over_count() {
        assert_eq!(layout(300, 3).element_width, 100);
        assert_eq!(layout(301, 3).element_width, 100);
        assert_eq!(layout(299, 3).element_width, 99);
    }

    #[test]
    fn empty_label_set_uses_full_track() {
        assert_eq!(layout(300, 0).element_width, 300);
    }

    #[test]
    fn padding_shrinks_track() {
        let bounds = Bounds::new(320, 40).with_padding(Insets::symmetric(10, 4));
        let l = SlotLayout::compute(&bounds, 3, 0);
        assert_eq!(l.track_width, 300);
        assert_eq!(l.element_width, 100);
        assert_eq!(bounds.content_height(), 32);
    }

    #[test]
    fn clamp_range_includes_drag_out() {
        let l = layout(300, 3);
        assert_eq!(l.clamp_offset(-50), -10);
        assert_eq!(l.clamp_offset(500), 210);
        assert_eq!(l.clamp_offset(120), 120);
    }

    #[test]
    fn scroll_blocking_at_edges() {
        let l = layout(300, 3);
        assert!(!l.can_scroll_left(0));
        assert!(l.can_scroll_left(1));
        assert!(l.can_scroll_right(199));
        assert!(!l.can_scroll_right(200));
    }

    #[test]
    fn tap_index_truncates_and_clamps() {
        let l = layout(300, 3);
        assert_eq!(l.index_at(150.0), 1);
        assert_eq!(l.index_at(99.9), 0);
        assert_eq!(l.index_at(-20.0), 0);
        assert_eq!(l.index_at(1000.0), 2);
    }

    #[test]
    fn offset_index_rounds_half_up() {
        let l = layout(300, 3);
        assert_eq!(l.index_for_offset(49), 0);
        assert_eq!(l.index_for_offset(50), 1);
        assert_eq!(l.index_for_offset(60), 1);
        assert_eq!(l.index_for_offset(-10), 0);
        assert_eq!(l.index_for_offset(210), 2);
    }

    #[test]
    fn zero_width_never_divides() {
        let l = layout(0, 3);
        assert_eq!(l.element_width, 0);
        assert_eq!(l.index_at(5.0), 0);
        assert_eq!(l.index_for_offset(5), 0);
    }

    #[test]
    fn baseline_centres_ascent() {
        let bounds = Bounds::new(300, 40).with_padding(Insets::symmetric(0, 5));
        // (30 + 12) / 2 + 5
        assert_eq!(text_baseline(&bounds, -12.0), 26);
        assert_eq!(text_baseline(&Bounds::new(10, 1), 1.0), 1);
    }
}
