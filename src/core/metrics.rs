//! Carousel math: side padding, opacity fade, nearest item, centering offset.
//!
//! Pure functions over a [`GeometryProvider`].  Anything that cannot be
//! measured yields `None` (or an empty vector) so callers can skip the frame.

use super::geometry::GeometryProvider;

/// Opacity of an item whose center is one item-width or more from the
/// viewport center.
pub const MIN_OPACITY: f64 = 0.2;

/// Padding applied to both ends of the strip so the first and last items
/// can be centered.  Never negative.
pub fn side_padding(viewport_width: f64, item_width: f64) -> f64 {
    ((viewport_width - item_width) / 2.0).max(0.0)
}

/// Padding derived from the viewport and the first item.
pub fn side_padding_for(geom: &dyn GeometryProvider) -> Option<f64> {
    let viewport = geom.viewport_width()?;
    let item = geom.item_width(0)?;
    Some(side_padding(viewport, item))
}

/// Horizontal position of the viewport's center, in content coordinates.
pub fn center_point(geom: &dyn GeometryProvider) -> Option<f64> {
    Some(geom.scroll_offset()? + geom.viewport_width()? / 2.0)
}

/// Fade for a single item: 1.0 when centered, linear down to
/// [`MIN_OPACITY`] at one item-width away.
pub fn opacity_at(center_point: f64, item_offset: f64, item_width: f64) -> f64 {
    if item_width <= 0.0 {
        return MIN_OPACITY;
    }
    let item_center = item_offset + item_width / 2.0;
    let distance = (center_point - item_center).abs();
    let normalized = (distance / item_width).min(1.0);
    (1.0 - normalized * 0.8).max(MIN_OPACITY)
}

/// Opacity for every item, in index order.
///
/// Empty when there are no items or the viewport is not measurable.  An
/// individual item that cannot be measured gets the floor value.
pub fn opacities(geom: &dyn GeometryProvider) -> Vec<f64> {
    let Some(center) = center_point(geom) else {
        return Vec::new();
    };
    (0..geom.item_count())
        .map(|i| match (geom.item_offset(i), geom.item_width(i)) {
            (Some(offset), Some(width)) => opacity_at(center, offset, width),
            _ => MIN_OPACITY,
        })
        .collect()
}

/// Opacities used before the first geometry read: the selected item fully
/// visible, everything else at the floor.
pub fn initial_opacities(count: usize, selected: usize) -> Vec<f64> {
    (0..count)
        .map(|i| if i == selected { 1.0 } else { MIN_OPACITY })
        .collect()
}

/// Index of the item whose center is closest to the viewport center.
///
/// Ties go to the lowest index.
pub fn nearest_item(geom: &dyn GeometryProvider) -> Option<usize> {
    let center = center_point(geom)?;
    let mut best: Option<(usize, f64)> = None;
    for i in 0..geom.item_count() {
        let (Some(offset), Some(width)) = (geom.item_offset(i), geom.item_width(i)) else {
            continue;
        };
        let distance = (center - (offset + width / 2.0)).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Scroll offset that puts item `index` in the middle of the viewport.
pub fn centered_offset(geom: &dyn GeometryProvider, index: usize) -> Option<f64> {
    let offset = geom.item_offset(index)?;
    let width = geom.item_width(index)?;
    let viewport = geom.viewport_width()?;
    Some(offset - (viewport - width) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::StripLayout;

    /// Three 300-wide items in a 320-wide viewport, padded to center.
    fn scenario_layout() -> StripLayout {
        let mut layout = StripLayout::new(3, 300.0, 0.0);
        layout.set_viewport_width(320.0);
        layout.set_side_padding(side_padding(320.0, 300.0));
        layout
    }

    #[test]
    fn padding_is_half_the_leftover() {
        assert_eq!(side_padding(320.0, 300.0), 10.0);
        assert_eq!(side_padding(80.0, 30.0), 25.0);
    }

    #[test]
    fn padding_is_never_negative() {
        for viewport in [0.0, 10.0, 99.0, 100.0, 250.0] {
            for item in [0.0, 50.0, 100.0, 400.0] {
                assert!(side_padding(viewport, item) >= 0.0);
            }
        }
        assert_eq!(side_padding(100.0, 400.0), 0.0);
    }

    #[test]
    fn padding_needs_a_first_item() {
        let mut layout = StripLayout::new(0, 30.0, 0.0);
        layout.set_viewport_width(80.0);
        assert_eq!(side_padding_for(&layout), None);
    }

    #[test]
    fn centered_item_is_fully_opaque() {
        let mut layout = scenario_layout();
        layout.set_scroll_offset(300.0);
        let ops = opacities(&layout);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1], 1.0);
        assert!((ops[0] - MIN_OPACITY).abs() < 1e-9);
        assert!((ops[2] - MIN_OPACITY).abs() < 1e-9);
    }

    #[test]
    fn opacity_stays_in_range_for_all_offsets() {
        let mut layout = scenario_layout();
        let mut offset = 0.0;
        while offset <= 600.0 {
            layout.set_scroll_offset(offset);
            for o in opacities(&layout) {
                assert!((MIN_OPACITY..=1.0).contains(&o), "opacity {o} at {offset}");
            }
            offset += 7.5;
        }
    }

    #[test]
    fn opacity_is_non_increasing_with_distance() {
        let mut prev = f64::INFINITY;
        for step in 0..100 {
            let center = 150.0 + step as f64 * 5.0;
            let o = opacity_at(center, 0.0, 300.0);
            assert!(o <= prev);
            prev = o;
        }
        assert_eq!(prev, MIN_OPACITY);
    }

    #[test]
    fn half_width_away_is_sixty_percent() {
        let o = opacity_at(300.0, 0.0, 300.0);
        assert!((o - 0.6).abs() < 1e-9);
    }

    #[test]
    fn unmeasured_viewport_gives_no_opacities() {
        let layout = StripLayout::new(3, 30.0, 0.0);
        assert!(opacities(&layout).is_empty());
        assert_eq!(nearest_item(&layout), None);
    }

    #[test]
    fn initial_vector_highlights_selection() {
        assert_eq!(initial_opacities(3, 1), vec![MIN_OPACITY, 1.0, MIN_OPACITY]);
        assert!(initial_opacities(0, 0).is_empty());
    }

    #[test]
    fn nearest_follows_scroll() {
        let mut layout = scenario_layout();
        assert_eq!(nearest_item(&layout), Some(0));
        layout.set_scroll_offset(300.0);
        assert_eq!(nearest_item(&layout), Some(1));
        layout.set_scroll_offset(600.0);
        assert_eq!(nearest_item(&layout), Some(2));
    }

    #[test]
    fn tie_goes_to_lowest_index() {
        let mut layout = scenario_layout();
        // Center point 310 sits exactly between item 0 (160) and item 1 (460).
        layout.set_scroll_offset(150.0);
        assert_eq!(nearest_item(&layout), Some(0));
    }

    #[test]
    fn centered_offset_matches_padding_math() {
        let layout = scenario_layout();
        assert_eq!(centered_offset(&layout, 0), Some(0.0));
        assert_eq!(centered_offset(&layout, 1), Some(300.0));
        assert_eq!(centered_offset(&layout, 2), Some(600.0));
        assert_eq!(centered_offset(&layout, 3), None);
    }
}
