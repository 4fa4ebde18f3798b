//! The label switch itself.
//!
//! [`LabelSwitch`] composes the slot geometry, the gesture tracker, the
//! settle animator and the render pipeline.  It never talks to a toolkit
//! directly: the host feeds it bounds, pointer events and frame ticks, polls
//! [`LabelSwitch::take_redraw_request`], and hands it a [`Canvas`] to draw on.

use std::time::Instant;

use super::background::{BackgroundCache, FsImageLoader, ImageLoader};
use super::draw::{self, Canvas, Frame};
use super::geometry::{self, Bounds, SlotLayout};
use super::gesture::{Gesture, GesturePhase, GestureTracker, PointerEvent};
use super::settle::SettleAnimator;
use super::style::{DisplayMetrics, SwitchStyle, DRAG_THRESHOLD_DP};

/// Callback invoked with `(old_index, new_index)`.
pub type IndexChangeListener = Box<dyn FnMut(usize, usize)>;

pub struct LabelSwitch {
    labels: Vec<String>,
    selected_index: usize,
    /// Thumb position relative to the first slot.
    offset: i32,
    style: SwitchStyle,

    bounds: Bounds,
    layout: SlotLayout,
    baseline: Option<i32>,
    background: BackgroundCache,
    loader: Box<dyn ImageLoader>,

    tracker: GestureTracker,
    /// The current session started on the selected slot.
    thumb_in_touch: bool,
    settle: SettleAnimator,

    listener: Option<IndexChangeListener>,
    redraw_requested: bool,
}

impl LabelSwitch {
    pub fn new(style: SwitchStyle, metrics: &DisplayMetrics) -> Self {
        let bounds = Bounds::default();
        let layout = SlotLayout::compute(&bounds, 0, style.drag_out_dist);
        Self {
            labels: Vec::new(),
            selected_index: 0,
            offset: 0,
            style,
            bounds,
            layout,
            baseline: None,
            background: BackgroundCache::default(),
            loader: Box::new(FsImageLoader),
            tracker: GestureTracker::new(metrics.dp_to_px(DRAG_THRESHOLD_DP) as f32),
            thumb_in_touch: false,
            settle: SettleAnimator::new(),
            listener: None,
            redraw_requested: false,
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_labels(labels);
        self
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.labels.get(self.selected_index).map(String::as_str)
    }

    pub fn current_offset(&self) -> i32 {
        self.offset
    }

    pub fn element_width(&self) -> i32 {
        self.layout.element_width
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn style(&self) -> &SwitchStyle {
        &self.style
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.tracker.phase()
    }

    pub fn is_settling(&self) -> bool {
        !self.settle.is_finished()
    }

    // ── configuration ──────────────────────────────────────────

    /// Replace the whole label set.  The selection is clamped into the new
    /// range without notifying, and the thumb is parked on its slot.
    pub fn set_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self.selected_index = self.selected_index.min(self.labels.len().saturating_sub(1));
        self.invalidate_geometry();
    }

    /// Layout pass.  Geometry is recomputed only when the bounds change.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.invalidate_geometry();
        }
    }

    pub fn set_image_loader(&mut self, loader: Box<dyn ImageLoader>) {
        self.loader = loader;
        self.background.invalidate();
    }

    pub fn set_on_index_change(&mut self, listener: impl FnMut(usize, usize) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_on_index_change(&mut self) {
        self.listener = None;
    }

    fn invalidate_geometry(&mut self) {
        self.layout = SlotLayout::compute(&self.bounds, self.labels.len(), self.style.drag_out_dist);
        self.baseline = None;
        self.background.invalidate();
        self.settle.abort();
        self.offset = self.layout.slot_offset(self.selected_index);
        tracing::debug!(
            element_width = self.layout.element_width,
            track_width = self.layout.track_width,
            labels = self.labels.len(),
            "geometry invalidated"
        );
        self.request_redraw();
    }

    // ── selection ──────────────────────────────────────────────

    /// Select `index` (clamped), settle the thumb and notify on change.
    pub fn set_selected_index(&mut self, index: usize) {
        let clamped = index.min(self.labels.len().saturating_sub(1));
        self.change_index(clamped, true);
    }

    fn change_index(&mut self, new_index: usize, notify: bool) {
        let old = self.selected_index;
        self.selected_index = new_index;
        self.ensure_adjust_thumb();
        if notify && old != new_index {
            self.notify_index_changed(old, new_index);
        }
    }

    fn notify_index_changed(&mut self, old: usize, new: usize) {
        tracing::debug!(old, new, "selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(old, new);
        }
    }

    /// Start settling towards the selected slot.  Returns whether an
    /// animation was started.
    fn ensure_adjust_thumb(&mut self) -> bool {
        let delta = self.layout.slot_offset(self.selected_index) - self.offset;
        if delta == 0 {
            self.settle.abort();
            return false;
        }
        tracing::debug!(delta, from = self.offset, "settle started");
        self.settle.start(delta, Instant::now());
        self.request_redraw();
        true
    }

    // ── input ──────────────────────────────────────────────────

    /// Feed one pointer event.  Returns whether the switch consumed it.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        let Some(gesture) = self.tracker.on_event(event) else {
            return self.tracker.phase() != GesturePhase::Idle;
        };
        let padding_left = self.bounds.padding.left as f32;
        match gesture {
            Gesture::Down { x } => {
                self.settle.abort();
                self.thumb_in_touch = self.selected_index == self.layout.index_at(x - padding_left);
            }
            Gesture::Scroll { distance_x } => {
                if !self.thumb_in_touch {
                    return false;
                }
                if (distance_x < 0.0 && self.layout.can_scroll_right(self.offset))
                    || (distance_x > 0.0 && self.layout.can_scroll_left(self.offset))
                {
                    self.touch_move(-distance_x);
                }
            }
            Gesture::Tap { x } => {
                let index = self.layout.index_at(x - padding_left);
                self.thumb_in_touch = false;
                self.change_index(index, true);
            }
            Gesture::Release { dragged } => {
                tracing::trace!(dragged, "pointer released");
                self.thumb_in_touch = false;
                self.ensure_adjust_thumb();
            }
        }
        true
    }

    fn touch_move(&mut self, dx: f32) {
        self.offset = self.layout.clamp_offset((self.offset as f32 + dx) as i32);
        let touch_index = self.layout.index_for_offset(self.offset);
        if touch_index != self.selected_index {
            let old = self.selected_index;
            self.selected_index = touch_index;
            self.notify_index_changed(old, touch_index);
        }
        self.request_redraw();
    }

    // ── animation ──────────────────────────────────────────────

    /// Per-frame settle tick.  Returns whether another tick is needed; a
    /// redraw is requested whenever the offset moved.
    pub fn compute_scroll(&mut self, now: Instant) -> bool {
        let Some(increment) = self.settle.step(now) else {
            return false;
        };
        let before = self.offset;
        self.offset = self.layout.clamp_offset(self.offset + increment);
        let finished = self.settle.is_finished();
        if finished {
            let home = self.layout.slot_offset(self.selected_index);
            if self.offset != home {
                tracing::debug!(offset = self.offset, home, "settle snapped");
                self.offset = home;
            }
            tracing::debug!(offset = self.offset, "settle finished");
        }
        if self.offset != before {
            self.request_redraw();
        }
        !finished
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Whether something changed since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // ── drawing ────────────────────────────────────────────────

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        if self.labels.is_empty() {
            return;
        }
        let baseline = match self.baseline {
            Some(b) => b,
            None => {
                let b = geometry::text_baseline(&self.bounds, canvas.font_ascent(self.style.text_size));
                self.baseline = Some(b);
                b
            }
        };
        let background = match &self.style.selected_background {
            Some(source) => self.background.get_or_resolve(
                self.loader.as_ref(),
                source,
                self.layout.element_width,
                self.bounds.content_height(),
            ),
            None => None,
        };
        let frame = Frame {
            labels: &self.labels,
            selected_index: self.selected_index,
            offset: self.offset,
            layout: &self.layout,
            padding_left: self.bounds.padding.left,
            padding_top: self.bounds.padding.top,
            baseline,
            style: &self.style,
            background,
        };
        draw::render(&frame, canvas);
    }
}

impl std::fmt::Debug for LabelSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelSwitch")
            .field("labels", &self.labels)
            .field("selected_index", &self.selected_index)
            .field("offset", &self.offset)
            .field("layout", &self.layout)
            .field("phase", &self.tracker.phase())
            .field("settling", &self.is_settling())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::draw::tests::RecordingCanvas;
    use crate::core::geometry::Insets;
    use crate::core::gesture::PointerKind;
    use crate::core::settle::SETTLE_DURATION;
    use crate::core::style::BackgroundRef;

    type Changes = Rc<RefCell<Vec<(usize, usize)>>>;

    fn switch() -> (LabelSwitch, Changes) {
        let mut s = LabelSwitch::new(SwitchStyle::default(), &DisplayMetrics::default())
            .with_labels(["A", "B", "C"]);
        s.set_bounds(Bounds::new(300, 40));
        let changes: Changes = Rc::default();
        let sink = Rc::clone(&changes);
        s.set_on_index_change(move |old, new| sink.borrow_mut().push((old, new)));
        (s, changes)
    }

    fn settle(s: &mut LabelSwitch) {
        let done = Instant::now() + SETTLE_DURATION;
        while s.compute_scroll(done) {}
    }

    fn pointer(s: &mut LabelSwitch, kind: PointerKind, x: f32) -> bool {
        s.on_pointer_event(&PointerEvent::at(kind, x, 20.0))
    }

    #[test]
    fn tap_selects_and_settles() {
        let (mut s, changes) = switch();
        pointer(&mut s, PointerKind::Down, 150.0);
        pointer(&mut s, PointerKind::Up, 150.0);
        assert_eq!(s.selected_index(), 1);
        assert_eq!(*changes.borrow(), vec![(0, 1)]);
        assert!(s.is_settling());
        assert_eq!(s.current_offset(), 0);
        settle(&mut s);
        assert_eq!(s.current_offset(), 100);
        assert!(!s.is_settling());
    }

    #[test]
    fn tap_accounts_for_left_padding() {
        let (mut s, _) = switch();
        s.set_bounds(Bounds::new(320, 40).with_padding(Insets::symmetric(10, 0)));
        pointer(&mut s, PointerKind::Down, 105.0);
        pointer(&mut s, PointerKind::Up, 105.0);
        assert_eq!(s.selected_index(), 0);
        pointer(&mut s, PointerKind::Down, 115.0);
        pointer(&mut s, PointerKind::Up, 115.0);
        assert_eq!(s.selected_index(), 1);
    }

    #[test]
    fn drag_changes_and_reverts_selection_mid_gesture() {
        let (mut s, changes) = switch();
        pointer(&mut s, PointerKind::Down, 50.0);
        pointer(&mut s, PointerKind::Move, 110.0);
        assert_eq!(s.current_offset(), 60);
        assert_eq!(s.selected_index(), 1);
        pointer(&mut s, PointerKind::Move, 90.0);
        assert_eq!(s.current_offset(), 40);
        assert_eq!(s.selected_index(), 0);
        assert_eq!(*changes.borrow(), vec![(0, 1), (1, 0)]);
        pointer(&mut s, PointerKind::Up, 90.0);
        assert!(s.is_settling());
        settle(&mut s);
        assert_eq!(s.current_offset(), 0);
    }

    #[test]
    fn drag_starting_off_thumb_does_not_move_it() {
        let (mut s, changes) = switch();
        pointer(&mut s, PointerKind::Down, 250.0);
        assert!(!pointer(&mut s, PointerKind::Move, 150.0));
        assert_eq!(s.current_offset(), 0);
        pointer(&mut s, PointerKind::Up, 150.0);
        assert_eq!(s.selected_index(), 0);
        assert!(changes.borrow().is_empty());
        assert!(!s.is_settling());
    }

    #[test]
    fn drag_out_is_limited() {
        let (mut s, _) = switch();
        pointer(&mut s, PointerKind::Down, 50.0);
        // blocked: already at the left edge
        pointer(&mut s, PointerKind::Move, 40.0);
        assert_eq!(s.current_offset(), 0);
        pointer(&mut s, PointerKind::Move, 45.0);
        assert_eq!(s.current_offset(), 5);
        pointer(&mut s, PointerKind::Move, -100.0);
        assert_eq!(s.current_offset(), -10);
    }

    #[test]
    fn setting_same_index_twice_notifies_once() {
        let (mut s, changes) = switch();
        s.set_selected_index(2);
        s.set_selected_index(2);
        assert_eq!(*changes.borrow(), vec![(0, 2)]);
        settle(&mut s);
        assert_eq!(s.current_offset(), 200);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let (mut s, changes) = switch();
        s.set_selected_index(99);
        assert_eq!(s.selected_index(), 2);
        s.set_selected_index(usize::MAX);
        assert_eq!(s.selected_index(), 2);
        assert_eq!(*changes.borrow(), vec![(0, 2)]);
    }

    #[test]
    fn settle_ticks_request_redraws_until_done() {
        let (mut s, _) = switch();
        s.set_selected_index(1);
        s.take_redraw_request();
        let done = Instant::now() + SETTLE_DURATION;
        assert!(!s.compute_scroll(done));
        assert!(s.take_redraw_request());
        assert!(!s.compute_scroll(done));
        assert!(!s.take_redraw_request());
    }

    #[test]
    fn no_animation_when_already_home() {
        let (mut s, _) = switch();
        s.take_redraw_request();
        s.set_selected_index(0);
        assert!(!s.is_settling());
        assert!(!s.take_redraw_request());
    }

    #[test]
    fn listener_is_replaced_not_stacked() {
        let (mut s, first) = switch();
        let second: Changes = Rc::default();
        let sink = Rc::clone(&second);
        s.set_on_index_change(move |o, n| sink.borrow_mut().push((o, n)));
        s.set_selected_index(1);
        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec![(0, 1)]);
        s.clear_on_index_change();
        s.set_selected_index(2);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn new_session_supersedes_settle() {
        let (mut s, _) = switch();
        s.set_selected_index(2);
        assert!(s.is_settling());
        pointer(&mut s, PointerKind::Down, 10.0);
        assert!(!s.is_settling());
        pointer(&mut s, PointerKind::Cancel, 10.0);
        assert!(s.is_settling());
        settle(&mut s);
        assert_eq!(s.current_offset(), 200);
    }

    #[test]
    fn resize_parks_thumb_on_new_slot() {
        let (mut s, _) = switch();
        s.set_selected_index(1);
        settle(&mut s);
        s.set_bounds(Bounds::new(600, 40));
        assert_eq!(s.element_width(), 200);
        assert_eq!(s.current_offset(), 200);
    }

    #[test]
    fn shrinking_label_set_clamps_selection() {
        let (mut s, changes) = switch();
        s.set_selected_index(2);
        s.set_labels(["X", "Y"]);
        assert_eq!(s.selected_index(), 1);
        assert_eq!(s.element_width(), 150);
        assert_eq!(s.current_offset(), 150);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn empty_switch_draws_nothing() {
        let mut s = LabelSwitch::new(SwitchStyle::default(), &DisplayMetrics::default());
        s.set_bounds(Bounds::new(300, 40));
        let mut canvas = RecordingCanvas::default();
        s.draw(&mut canvas);
        assert!(canvas.texts.is_empty());
        assert_eq!(s.element_width(), 300);
        pointer(&mut s, PointerKind::Down, 10.0);
        pointer(&mut s, PointerKind::Up, 10.0);
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn draws_resolved_background_at_offset() {
        let style = SwitchStyle {
            selected_background: Some(BackgroundRef("#3366ff".into())),
            ..SwitchStyle::default()
        };
        let mut s = LabelSwitch::new(style, &DisplayMetrics::default()).with_labels(["A", "B"]);
        s.set_bounds(Bounds::new(200, 30).with_padding(Insets::symmetric(0, 5)));
        let mut canvas = RecordingCanvas::default();
        s.draw(&mut canvas);
        assert_eq!(canvas.bitmaps, vec![(100, 20, 0.0, 5.0)]);
        // (20 + 12) / 2 + 5
        assert!(canvas.texts.iter().all(|t| t.2 == 21.0));
    }
}
