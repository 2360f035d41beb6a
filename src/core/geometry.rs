//! Viewport and item geometry as seen by the carousel controller.
//!
//! The controller never owns layout.  It asks a [`GeometryProvider`] for the
//! live numbers every time it needs them, and every read may come back
//! `None` when the surface is not mounted (or not laid out) yet.
//!
//! [`StripLayout`] is the concrete provider used by the terminal surface and
//! by the tests: a single row of equal-width items with symmetric padding.

// ───────────────────────────────────────── provider trait ────

/// Read-only access to the render surface's current layout.
///
/// All offsets are measured from the start of the scrollable content, in
/// layout units (terminal columns for the TUI).
pub trait GeometryProvider {
    /// Visible width of the scroll container.
    fn viewport_width(&self) -> Option<f64>;
    /// Current horizontal scroll offset.
    fn scroll_offset(&self) -> Option<f64>;
    /// Number of items laid out in the container.
    fn item_count(&self) -> usize;
    /// Left edge of item `index`, padding included.
    fn item_offset(&self, index: usize) -> Option<f64>;
    /// Rendered width of item `index`.
    fn item_width(&self, index: usize) -> Option<f64>;
}

// ───────────────────────────────────────── strip layout ──────

/// A horizontal strip of equal-width items separated by a fixed gap.
#[derive(Debug, Clone, PartialEq)]
pub struct StripLayout {
    item_count: usize,
    item_width: f64,
    gap: f64,
    side_padding: f64,
    viewport_width: f64,
    scroll_offset: f64,
    /// `false` until the surface has been given a real area.
    laid_out: bool,
}

impl StripLayout {
    pub fn new(item_count: usize, item_width: f64, gap: f64) -> Self {
        Self {
            item_count,
            item_width: item_width.max(1.0),
            gap: gap.max(0.0),
            side_padding: 0.0,
            viewport_width: 0.0,
            scroll_offset: 0.0,
            laid_out: false,
        }
    }

    /// Resize the viewport.  The scroll offset is re-clamped to the new range.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width.max(0.0);
        self.laid_out = self.viewport_width > 0.0;
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
    }

    pub fn set_side_padding(&mut self, padding: f64) {
        self.side_padding = padding.max(0.0);
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
    }

    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
    }

    /// Set the scroll offset, clamped to `[0, max_scroll]`.
    /// Returns `true` when the stored offset actually changed.
    pub fn set_scroll_offset(&mut self, offset: f64) -> bool {
        let clamped = self.clamp_scroll(offset);
        let changed = (clamped - self.scroll_offset).abs() > f64::EPSILON;
        self.scroll_offset = clamped;
        changed
    }

    pub fn side_padding(&self) -> f64 {
        self.side_padding
    }

    pub fn item_width_uniform(&self) -> f64 {
        self.item_width
    }

    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Total scrollable width: both paddings plus items and the gaps between them.
    pub fn content_width(&self) -> f64 {
        let n = self.item_count as f64;
        let gaps = (self.item_count.saturating_sub(1)) as f64 * self.gap;
        self.side_padding * 2.0 + n * self.item_width + gaps
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    fn clamp_scroll(&self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll())
    }
}

impl GeometryProvider for StripLayout {
    fn viewport_width(&self) -> Option<f64> {
        self.laid_out.then_some(self.viewport_width)
    }

    fn scroll_offset(&self) -> Option<f64> {
        self.laid_out.then_some(self.scroll_offset)
    }

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn item_offset(&self, index: usize) -> Option<f64> {
        if !self.laid_out || index >= self.item_count {
            return None;
        }
        Some(self.side_padding + index as f64 * (self.item_width + self.gap))
    }

    fn item_width(&self, index: usize) -> Option<f64> {
        if !self.laid_out || index >= self.item_count {
            return None;
        }
        Some(self.item_width)
    }
}
