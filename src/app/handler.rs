//! Input handling: maps key/mouse events to switch operations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use label_switch::ui::layout::AppLayout;
use label_switch::{PointerEvent, PointerKind};

use super::event::IndexChange;
use super::state::AppState;

// ── Keys ────────────────────────────────────────────────────────

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let selected = state.switch.selected_index();
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Esc => {
            if state.pointer_captured {
                cancel_pointer(state);
            } else {
                state.should_quit = true;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.switch.set_selected_index(selected.saturating_sub(1));
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.switch.set_selected_index(selected.saturating_add(1));
        }
        KeyCode::Home => state.switch.set_selected_index(0),
        KeyCode::End => state.switch.set_selected_index(usize::MAX),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            state.switch.set_selected_index(index);
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  A left press on the switch captures the pointer
/// until release.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = AppLayout::from_area(state.terminal_area);
            if !AppLayout::contains(layout.switch_inner, mouse.column, mouse.row) {
                return;
            }
            state.pointer_captured = true;
            PointerKind::Down
        }
        MouseEventKind::Drag(MouseButton::Left) if state.pointer_captured => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) if state.pointer_captured => {
            state.pointer_captured = false;
            PointerKind::Up
        }
        _ => return,
    };
    let event = pointer_event(state, kind, mouse.column, mouse.row);
    state.switch.on_pointer_event(&event);
}

/// Abort the captured pointer session (focus loss, Esc mid-drag).
pub fn cancel_pointer(state: &mut AppState) {
    if !state.pointer_captured {
        return;
    }
    state.pointer_captured = false;
    let event = PointerEvent::at(PointerKind::Cancel, 0.0, 0.0);
    state.switch.on_pointer_event(&event);
}

/// Translate terminal cell coordinates into a switch-relative pointer event.
fn pointer_event(state: &AppState, kind: PointerKind, col: u16, row: u16) -> PointerEvent {
    let inner = AppLayout::from_area(state.terminal_area).switch_inner;
    PointerEvent {
        kind,
        x: col as f32 - inner.x as f32,
        y: row as f32 - inner.y as f32,
        raw_x: col as f32,
        raw_y: row as f32,
    }
}

// ── Notifications ───────────────────────────────────────────────

/// Show a toast for a selection change reported by the switch.
pub fn handle_index_change(state: &mut AppState, change: IndexChange, now: Instant) {
    let label = state
        .switch
        .labels()
        .get(change.new)
        .cloned()
        .unwrap_or_default();
    state.show_toast(
        format!("Selected: {label} ({} → {})", change.old, change.new),
        now,
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyEventState, MouseEventKind};
    use label_switch::{DisplayMetrics, LabelSwitch, SwitchStyle};
    use ratatui::layout::Rect;

    use super::*;

    /// 100×25 terminal: the switch's inner area starts at (11, 11) and is
    /// 78 columns wide, so with three labels each slot is 26 columns.
    fn state() -> AppState {
        let switch = LabelSwitch::new(SwitchStyle::default(), &DisplayMetrics::new(0.2, 0.0625))
            .with_labels(["Day", "Week", "Month"]);
        let mut state = AppState::new(switch, Duration::from_secs(2));
        state.terminal_area = Rect::new(0, 0, 100, 25);
        let inner = AppLayout::from_area(state.terminal_area).switch_inner;
        state.switch.set_bounds(label_switch::Bounds::new(
            inner.width as i32,
            inner.height as i32,
        ));
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn click_on_label_selects_it() {
        let mut s = state();
        let row = AppLayout::from_area(s.terminal_area).switch_inner.y;
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 11 + 30, row));
        assert!(s.pointer_captured);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 11 + 30, row));
        assert!(!s.pointer_captured);
        assert_eq!(s.switch.selected_index(), 1);
    }

    #[test]
    fn clicks_outside_the_switch_are_ignored() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 50, 0));
        assert!(!s.pointer_captured);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 50, 0));
        assert_eq!(s.switch.selected_index(), 0);
    }

    #[test]
    fn captured_drag_continues_outside_the_switch() {
        let mut s = state();
        let row = AppLayout::from_area(s.terminal_area).switch_inner.y;
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 20, row));
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 0));
        assert_eq!(s.switch.current_offset(), 20);
        assert_eq!(s.switch.selected_index(), 1);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 40, 0));
        assert!(s.switch.is_settling());
    }

    #[test]
    fn escape_cancels_a_drag_before_quitting() {
        let mut s = state();
        let row = AppLayout::from_area(s.terminal_area).switch_inner.y;
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 20, row));
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 30, row));
        handle_key(&mut s, key(KeyCode::Esc));
        assert!(!s.should_quit);
        assert!(!s.pointer_captured);
        assert!(s.switch.is_settling());
        handle_key(&mut s, key(KeyCode::Esc));
        assert!(s.should_quit);
    }

    #[test]
    fn keys_select_programmatically() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Right));
        assert_eq!(s.switch.selected_index(), 1);
        handle_key(&mut s, key(KeyCode::End));
        assert_eq!(s.switch.selected_index(), 2);
        handle_key(&mut s, key(KeyCode::Right));
        assert_eq!(s.switch.selected_index(), 2);
        handle_key(&mut s, key(KeyCode::Char('1')));
        assert_eq!(s.switch.selected_index(), 0);
        handle_key(&mut s, key(KeyCode::Left));
        assert_eq!(s.switch.selected_index(), 0);
    }

    #[test]
    fn index_change_shows_toast_until_expiry() {
        let mut s = state();
        let now = Instant::now();
        handle_index_change(&mut s, IndexChange { old: 0, new: 2 }, now);
        let toast = s.toast.as_ref().expect("toast shown");
        assert_eq!(toast.message, "Selected: Month (0 → 2)");
        s.expire_toast(now + Duration::from_secs(1));
        assert!(s.toast.is_some());
        s.expire_toast(now + Duration::from_secs(2));
        assert!(s.toast.is_none());
    }
}
