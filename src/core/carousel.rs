//! The clip carousel controller.
//!
//! A headless state machine: every input is a [`CarouselEvent`] (or a call
//! to [`CarouselController::advance`] when time passes), every output is a
//! list of [`Effect`]s for the render surface to apply in order.  Geometry
//! is read through a [`GeometryProvider`] at the moment it is needed and is
//! never cached here.
//!
//! Selection is owned by the caller.  The controller only *requests* a new
//! selection with [`Effect::SelectClip`]; the caller reports the outcome
//! back with [`CarouselEvent::SelectionChanged`].

use std::time::Duration;

use super::geometry::GeometryProvider;
use super::metrics;
use super::timer::Timer;

/// Pointer travel (layout units) before a press turns into a drag.
pub const DRAG_THRESHOLD: f64 = 8.0;
/// Quiet period after the last scroll event before the carousel settles.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);
/// Deferred layout pass after mount / item changes / resize.
pub const LAYOUT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub drag_threshold: f64,
    pub settle_delay: Duration,
    pub layout_settle_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            settle_delay: SETTLE_DELAY,
            layout_settle_delay: LAYOUT_SETTLE_DELAY,
        }
    }
}

// ───────────────────────────────────────── inputs / outputs ──

/// Everything the render surface or the caller can tell the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    Mount,
    Resize,
    /// The item sequence was replaced or changed length.
    ItemsChanged,
    /// The viewport's scroll offset changed, for any reason.
    Scroll,
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    PointerLeave,
    /// The caller's selected index is now this value.
    SelectionChanged(usize),
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump straight to the offset (used while dragging).
    Instant,
    /// Animate towards the offset.
    Smooth,
}

/// A change the render surface (or the caller) must apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetSidePadding(f64),
    SetOpacities(Vec<f64>),
    ScrollTo { offset: f64, behavior: ScrollBehavior },
    /// Enable or disable native snap-to-item scrolling.
    SetSnap(bool),
    /// Ask the caller to select this item.
    SelectClip(usize),
}

// ───────────────────────────────────────── drag session ──────

/// Where a press started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin_x: f64,
    pub origin_scroll: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down but has not moved past the threshold.
    Armed(DragSession),
    /// Pointer is down and drives the scroll offset directly.
    Dragging(DragSession),
}

impl DragPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging(_))
    }
}

// ───────────────────────────────────────── controller ────────

#[derive(Debug)]
pub struct CarouselController {
    config: ControllerConfig,
    /// Last selection reported by the caller.
    selected: usize,
    drag: DragPhase,
    settle_timer: Timer,
    layout_timer: Timer,
    mounted: bool,
}

impl CarouselController {
    pub fn new(config: ControllerConfig, selected: usize) -> Self {
        Self {
            config,
            selected,
            drag: DragPhase::Idle,
            settle_timer: Timer::new(),
            layout_timer: Timer::new(),
            mounted: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_settle_pending(&self) -> bool {
        self.settle_timer.is_pending()
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        [self.layout_timer.pending(), self.settle_timer.pending()]
            .into_iter()
            .flatten()
            .map(|h| h.deadline)
            .min()
    }

    /// The item that would be selected if the carousel settled right now.
    pub fn settle(&self, geom: &dyn GeometryProvider) -> Option<usize> {
        metrics::nearest_item(geom)
    }

    /// Feed one event.  Returns the effects to apply, in order.
    pub fn handle(
        &mut self,
        event: CarouselEvent,
        geom: &dyn GeometryProvider,
        now: Duration,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();

        if !self.mounted && !matches!(event, CarouselEvent::Mount) {
            if let CarouselEvent::SelectionChanged(index) = event {
                self.record_selection(index, geom);
            }
            return effects;
        }

        match event {
            CarouselEvent::Mount => self.mount(geom, now, &mut effects),
            CarouselEvent::Resize => self.resize(geom, now, &mut effects),
            CarouselEvent::ItemsChanged => self.items_changed(geom, now, &mut effects),
            CarouselEvent::Scroll => self.on_scroll(geom, now, &mut effects),
            CarouselEvent::PointerDown { x } => self.pointer_down(x, geom),
            CarouselEvent::PointerMove { x } => self.pointer_move(x, &mut effects),
            CarouselEvent::PointerUp | CarouselEvent::PointerLeave => {
                self.release(geom, &mut effects);
            }
            CarouselEvent::SelectionChanged(index) => {
                self.selection_changed(index, geom, &mut effects);
            }
            CarouselEvent::Unmount => self.unmount(),
        }

        effects
    }

    /// Fire every timer whose deadline is at or before `now`.
    pub fn advance(&mut self, geom: &dyn GeometryProvider, now: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.mounted {
            return effects;
        }

        let layout_first = match (self.layout_timer.pending(), self.settle_timer.pending()) {
            (Some(l), Some(s)) => l.deadline <= s.deadline,
            _ => true,
        };

        if layout_first {
            self.fire_layout(geom, now, &mut effects);
            self.fire_settle(geom, now, &mut effects);
        } else {
            self.fire_settle(geom, now, &mut effects);
            self.fire_layout(geom, now, &mut effects);
        }

        effects
    }

    // ── lifecycle ───────────────────────────────────────────────

    fn mount(&mut self, geom: &dyn GeometryProvider, now: Duration, effects: &mut Vec<Effect>) {
        self.mounted = true;
        self.drag = DragPhase::Idle;
        self.settle_timer.cancel();

        let count = geom.item_count();
        if count > 0 {
            effects.push(Effect::SetOpacities(metrics::initial_opacities(
                count,
                self.selected,
            )));
        }
        self.refresh_layout(geom, now, effects);
        tracing::debug!(items = count, selected = self.selected, "carousel mounted");
    }

    fn resize(&mut self, geom: &dyn GeometryProvider, now: Duration, effects: &mut Vec<Effect>) {
        self.refresh_layout(geom, now, effects);
        let opacities = metrics::opacities(geom);
        if !opacities.is_empty() {
            effects.push(Effect::SetOpacities(opacities));
        }
    }

    fn items_changed(
        &mut self,
        geom: &dyn GeometryProvider,
        now: Duration,
        effects: &mut Vec<Effect>,
    ) {
        self.settle_timer.cancel();
        self.layout_timer.cancel();
        if std::mem::take(&mut self.drag).is_dragging() {
            effects.push(Effect::SetSnap(true));
        }
        self.refresh_layout(geom, now, effects);
        tracing::debug!(items = geom.item_count(), "carousel items changed");
    }

    fn unmount(&mut self) {
        self.settle_timer.cancel();
        self.layout_timer.cancel();
        self.drag = DragPhase::Idle;
        self.mounted = false;
        tracing::debug!("carousel unmounted");
    }

    /// Padding now, opacities after the deferred layout pass.
    fn refresh_layout(
        &mut self,
        geom: &dyn GeometryProvider,
        now: Duration,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(padding) = metrics::side_padding_for(geom) {
            effects.push(Effect::SetSidePadding(padding));
        }
        self.layout_timer.schedule(now, self.config.layout_settle_delay);
    }

    fn fire_layout(&mut self, geom: &dyn GeometryProvider, now: Duration, effects: &mut Vec<Effect>) {
        if self.layout_timer.take_due(now).is_none() {
            return;
        }

        let opacities = metrics::opacities(geom);
        if !opacities.is_empty() {
            effects.push(Effect::SetOpacities(opacities));
        }

        // Line the viewport up on the selection once padding is in place.
        // The resulting scroll event refreshes the opacities above.
        if self.drag == DragPhase::Idle && !self.settle_timer.is_pending() {
            if let (Some(target), Some(current)) = (
                metrics::centered_offset(geom, self.selected),
                geom.scroll_offset(),
            ) {
                if (target - current).abs() > 0.5 {
                    effects.push(Effect::ScrollTo {
                        offset: target,
                        behavior: ScrollBehavior::Instant,
                    });
                }
            }
        }
    }

    // ── scrolling ───────────────────────────────────────────────

    fn on_scroll(&mut self, geom: &dyn GeometryProvider, now: Duration, effects: &mut Vec<Effect>) {
        let opacities = metrics::opacities(geom);
        if !opacities.is_empty() {
            effects.push(Effect::SetOpacities(opacities));
        }

        if !self.drag.is_dragging() {
            self.settle_timer.schedule(now, self.config.settle_delay);
        }
        tracing::trace!(offset = ?geom.scroll_offset(), "scroll");
    }

    fn fire_settle(&mut self, geom: &dyn GeometryProvider, now: Duration, effects: &mut Vec<Effect>) {
        if self.settle_timer.take_due(now).is_none() {
            return;
        }
        if let Some(index) = self.settle(geom) {
            if index != self.selected {
                tracing::debug!(from = self.selected, to = index, "scroll settled on new clip");
                effects.push(Effect::SelectClip(index));
            }
        }
    }

    // ── selection ───────────────────────────────────────────────

    /// Store the caller's selection.  Returns `false` for an index that
    /// does not name an item.
    fn record_selection(&mut self, index: usize, geom: &dyn GeometryProvider) -> bool {
        if index >= geom.item_count() {
            tracing::warn!(index, items = geom.item_count(), "ignoring out-of-range selection");
            return false;
        }
        self.selected = index;
        true
    }

    fn selection_changed(
        &mut self,
        index: usize,
        geom: &dyn GeometryProvider,
        effects: &mut Vec<Effect>,
    ) {
        let previous = self.selected;
        if !self.record_selection(index, geom) || index == previous {
            return;
        }
        // A pending settle or an active press means the user is the one
        // moving the viewport.
        if self.drag != DragPhase::Idle || self.settle_timer.is_pending() {
            return;
        }
        if let Some(offset) = metrics::centered_offset(geom, index) {
            effects.push(Effect::ScrollTo {
                offset,
                behavior: ScrollBehavior::Smooth,
            });
        }
    }

    // ── pointer drag ────────────────────────────────────────────

    fn pointer_down(&mut self, x: f64, geom: &dyn GeometryProvider) {
        if self.drag != DragPhase::Idle {
            tracing::debug!("ignoring pointer-down during an active press");
            return;
        }
        let Some(origin_scroll) = geom.scroll_offset() else {
            return;
        };
        self.drag = DragPhase::Armed(DragSession {
            origin_x: x,
            origin_scroll,
        });
    }

    fn pointer_move(&mut self, x: f64, effects: &mut Vec<Effect>) {
        let session = match self.drag {
            DragPhase::Idle => return,
            DragPhase::Armed(session) => {
                if (x - session.origin_x).abs() <= self.config.drag_threshold {
                    return;
                }
                self.drag = DragPhase::Dragging(session);
                self.settle_timer.cancel();
                effects.push(Effect::SetSnap(false));
                tracing::debug!(origin_x = session.origin_x, "drag started");
                session
            }
            DragPhase::Dragging(session) => session,
        };

        let delta = x - session.origin_x;
        effects.push(Effect::ScrollTo {
            offset: session.origin_scroll - delta,
            behavior: ScrollBehavior::Instant,
        });
    }

    fn release(&mut self, geom: &dyn GeometryProvider, effects: &mut Vec<Effect>) {
        match std::mem::take(&mut self.drag) {
            DragPhase::Idle => {}
            DragPhase::Armed(_) => tracing::trace!("tap"),
            DragPhase::Dragging(_) => {
                effects.push(Effect::SetSnap(true));
                let Some(index) = self.settle(geom) else {
                    return;
                };
                if let Some(offset) = metrics::centered_offset(geom, index) {
                    effects.push(Effect::ScrollTo {
                        offset,
                        behavior: ScrollBehavior::Smooth,
                    });
                }
                tracing::debug!(index, "drag released");
                if index != self.selected {
                    effects.push(Effect::SelectClip(index));
                }
            }
        }
    }
}
