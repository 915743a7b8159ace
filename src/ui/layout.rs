//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: nav bar, progress line, scrolling page, status bar.
pub struct AppLayout {
    pub nav_area: Rect,
    pub progress_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // navigation
                Constraint::Length(1), // scroll progress
                Constraint::Min(3),    // page viewport
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            progress_area: chunks[1],
            page_area: chunks[2],
            status_area: chunks[3],
        }
    }
}
