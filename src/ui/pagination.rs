//! Pagination dots under the carousel, one per clip.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;

const ACTIVE_DOT: &str = "●";
const DOT: &str = "○";

/// A centred row of dots; the selected clip's dot is filled.
pub struct PaginationDots {
    pub count: usize,
    pub selected: usize,
}

/// Column of the first dot, when the row fits at all.
fn first_dot_x(area: Rect, count: usize) -> Option<u16> {
    if count == 0 || area.height == 0 {
        return None;
    }
    let total = u16::try_from(count * 2 - 1).ok()?;
    if total > area.width {
        return None;
    }
    Some(area.x + (area.width - total) / 2)
}

/// Which dot (if any) sits at column `col` of the dots row.
pub fn dot_at(area: Rect, count: usize, col: u16) -> Option<usize> {
    let x0 = first_dot_x(area, count)?;
    let rel = col.checked_sub(x0)? as usize;
    (rel % 2 == 0 && rel / 2 < count).then_some(rel / 2)
}

impl Widget for PaginationDots {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(x0) = first_dot_x(area, self.count) else {
            return;
        };
        for i in 0..self.count {
            let active = i == self.selected;
            let symbol = if active { ACTIVE_DOT } else { DOT };
            buf.set_string(x0 + (i as u16) * 2, area.y, symbol, Theme::dot_style(active));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_each_dot() {
        // 3 dots = 5 columns centred in 11 → first dot at x=3.
        let area = Rect::new(0, 10, 11, 1);
        assert_eq!(dot_at(area, 3, 3), Some(0));
        assert_eq!(dot_at(area, 3, 4), None);
        assert_eq!(dot_at(area, 3, 5), Some(1));
        assert_eq!(dot_at(area, 3, 7), Some(2));
        assert_eq!(dot_at(area, 3, 8), None);
        assert_eq!(dot_at(area, 3, 1), None);
    }

    #[test]
    fn renders_selected_dot_filled() {
        let area = Rect::new(0, 0, 11, 1);
        let mut buf = Buffer::empty(area);
        PaginationDots { count: 3, selected: 1 }.render(area, &mut buf);
        assert_eq!(buf[(3, 0)].symbol(), DOT);
        assert_eq!(buf[(5, 0)].symbol(), ACTIVE_DOT);
        assert_eq!(buf[(7, 0)].symbol(), DOT);
    }

    #[test]
    fn too_narrow_renders_nothing() {
        let area = Rect::new(0, 0, 3, 1);
        assert_eq!(dot_at(area, 3, 0), None);
    }
}
