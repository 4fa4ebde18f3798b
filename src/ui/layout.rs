//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Rows the switch block occupies, borders included.
const SWITCH_HEIGHT: u16 = 5;

/// Primary screen layout with the switch centred and a bottom status bar.
pub struct AppLayout {
    /// Bordered block around the switch.
    pub switch_area: Rect,
    /// Drawable area of the switch (inside the border).
    pub switch_inner: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(SWITCH_HEIGHT),
                Constraint::Fill(1),
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(rows[1]);

        let switch_area = columns[1];
        Self {
            switch_area,
            switch_inner: Self::switch_block().inner(switch_area),
            status_area: rows[3],
        }
    }

    /// The block drawn around the switch; shared with hit-testing so both
    /// agree on the inner area.
    pub fn switch_block<'a>() -> Block<'a> {
        Block::default().borders(Borders::ALL)
    }

    pub fn contains(area: Rect, col: u16, row: u16) -> bool {
        col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
    }
}
