//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: header, carousel, pagination dots, status bar.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header_area: Rect,
    pub carousel_area: Rect,
    pub dots_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title + subtitle
                Constraint::Min(5),    // carousel (takes all remaining space)
                Constraint::Length(1), // pagination dots
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            carousel_area: chunks[1],
            dots_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Is the cell `(col, row)` inside `area`?
pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_top_to_bottom() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header_area.height, 2);
        assert_eq!(layout.carousel_area.y, 2);
        assert_eq!(layout.carousel_area.height, 20);
        assert_eq!(layout.dots_area.y, 22);
        assert_eq!(layout.status_area.y, 23);
    }

    #[test]
    fn contains_is_half_open() {
        let area = Rect::new(2, 2, 10, 5);
        assert!(contains(area, 2, 2));
        assert!(contains(area, 11, 6));
        assert!(!contains(area, 12, 6));
        assert!(!contains(area, 5, 7));
    }
}
