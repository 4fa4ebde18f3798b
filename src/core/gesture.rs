//! Pointer-session interpreter.
//!
//! Turns the host's raw down/move/up/cancel stream into higher-level
//! gestures.  A session is ARMED on touch-down and becomes DRAGGING once the
//! horizontal travel (in raw screen coordinates) exceeds the threshold.  A
//! session released while still ARMED is a tap.

/// Kind of pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer event.
///
/// `x`/`y` are relative to the view; `raw_x`/`raw_y` are screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub raw_x: f32,
    pub raw_y: f32,
}

impl PointerEvent {
    /// Event whose view and screen coordinates coincide.
    pub fn at(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            raw_x: x,
            raw_y: y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Armed,
    Dragging,
}

/// Interpreted gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Session started at view-relative `x`.
    Down { x: f32 },
    /// Incremental scroll while dragging.  Positive means the pointer moved
    /// left since the previous event (`previous_x - current_x`).
    Scroll { distance_x: f32 },
    /// Released without exceeding the drag threshold.
    Tap { x: f32 },
    /// Session ended without a tap.  `dragged` is true when the threshold was
    /// exceeded during the session.
    Release { dragged: bool },
}

/// Tracks one pointer session at a time.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    phase: GesturePhase,
    /// Raw down position.
    anchor: (f32, f32),
    /// View-relative x of the last delivered event.
    last_x: f32,
    threshold: f32,
}

impl GestureTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: GesturePhase::Idle,
            anchor: (0.0, 0.0),
            last_x: 0.0,
            threshold,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Feed one event; returns the gesture it completes, if any.
    pub fn on_event(&mut self, event: &PointerEvent) -> Option<Gesture> {
        match event.kind {
            PointerKind::Down => {
                self.phase = GesturePhase::Armed;
                self.anchor = (event.raw_x, event.raw_y);
                self.last_x = event.x;
                Some(Gesture::Down { x: event.x })
            }
            PointerKind::Move => match self.phase {
                GesturePhase::Idle => None,
                GesturePhase::Armed => {
                    let dx = (event.raw_x - self.anchor.0).abs();
                    let dy = (event.raw_y - self.anchor.1).abs();
                    if dx > self.threshold {
                        tracing::trace!(dx, dy, "drag armed");
                        self.phase = GesturePhase::Dragging;
                        Some(self.scroll_to(event.x))
                    } else {
                        None
                    }
                }
                GesturePhase::Dragging => Some(self.scroll_to(event.x)),
            },
            PointerKind::Up => {
                let gesture = match self.phase {
                    GesturePhase::Idle => None,
                    GesturePhase::Armed => Some(Gesture::Tap { x: event.x }),
                    GesturePhase::Dragging => Some(Gesture::Release { dragged: true }),
                };
                self.reset();
                gesture
            }
            PointerKind::Cancel => {
                let gesture = match self.phase {
                    GesturePhase::Idle => None,
                    phase => Some(Gesture::Release {
                        dragged: phase == GesturePhase::Dragging,
                    }),
                };
                self.reset();
                gesture
            }
        }
    }

    fn scroll_to(&mut self, x: f32) -> Gesture {
        let distance_x = self.last_x - x;
        self.last_x = x;
        Gesture::Scroll { distance_x }
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.anchor = (0.0, 0.0);
        self.last_x = 0.0;
    }
}
