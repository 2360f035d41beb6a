//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The carousel controller and its render surface are wired together here:
//! controller effects go to the surface, and whatever the surface reports
//! back (scroll changes, selection requests) is fed into the controller
//! again until the queue runs dry.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::carousel::{CarouselController, CarouselEvent, DragPhase, Effect};
use crate::core::clip::Clip;
use crate::ui::layout::AppLayout;

use super::surface::{Applied, CarouselSurface};

/// Upper bound on controller round-trips per input.  The feedback loop
/// always converges in a handful of steps; this only stops a runaway.
const MAX_ROUND_TRIPS: usize = 64;

/// Top-level application state.
pub struct AppState {
    pub clips: Vec<Clip>,
    /// The caller-owned selection the controller reports to.
    pub selected: usize,
    pub controller: CarouselController,
    pub surface: CarouselSurface,
    /// User configuration.
    pub config: AppConfig,
    /// Full terminal area from the last resize.
    pub terminal_area: Rect,
    /// `true` while the left button went down inside the carousel and has
    /// not been released or dragged out yet.
    pub pointer_down: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Set when the user confirms a clip; printed on exit.
    pub chosen: Option<usize>,
    started: Instant,
}

impl AppState {
    pub fn new(clips: Vec<Clip>, selected: usize, config: AppConfig) -> Self {
        let selected = selected.min(clips.len().saturating_sub(1));
        let controller = CarouselController::new(config.controller_config(), selected);
        let surface = CarouselSurface::new(
            clips.len(),
            config.card_width,
            config.card_gap,
            config.scroll_speed,
        );
        Self {
            clips,
            selected,
            controller,
            surface,
            config,
            terminal_area: Rect::default(),
            pointer_down: false,
            should_quit: false,
            chosen: None,
            started: Instant::now(),
        }
    }

    /// Monotonic time since start, the controller's clock.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Measure the initial terminal and mount the carousel.
    pub fn mount(&mut self, area: Rect) {
        self.terminal_area = area;
        let width = self.layout().carousel_area.width;
        self.surface.set_viewport_width(width);
        self.send(CarouselEvent::Mount);
    }

    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        let width = self.layout().carousel_area.width;
        if self.surface.set_viewport_width(width) {
            self.send(CarouselEvent::Resize);
        }
    }

    pub fn unmount(&mut self) {
        self.pointer_down = false;
        self.send(CarouselEvent::Unmount);
    }

    // ── selection ───────────────────────────────────────────────

    /// Caller-side selection change (keys or pagination dots).
    pub fn select(&mut self, index: usize) {
        if index >= self.clips.len() || index == self.selected {
            return;
        }
        self.selected = index;
        self.send(CarouselEvent::SelectionChanged(index));
        // The controller holds off while a settle is pending, and that settle
        // would land on the card the viewport is passing.  Steer the surface
        // to the requested card so the settle agrees with it.
        if self.controller.drag_phase() == DragPhase::Idle && self.controller.is_settle_pending() {
            tracing::debug!(index, "retargeting in-flight scroll");
            self.surface.glide_to(index);
        }
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.clips.get(self.selected)
    }

    // ── event plumbing ──────────────────────────────────────────

    /// Feed one event to the controller and settle all feedback.
    pub fn send(&mut self, event: CarouselEvent) {
        self.drain(VecDeque::from([event]));
    }

    /// Native wheel scroll on the surface.
    pub fn scroll_by(&mut self, delta: f64) {
        let now = self.now();
        if self.surface.scroll_by(delta, now) == Applied::Scrolled {
            self.send(CarouselEvent::Scroll);
        }
    }

    /// Per-frame work: step the animation, then fire due timers.
    pub fn tick(&mut self) {
        let now = self.now();
        let mut queue = VecDeque::new();
        if self.surface.tick(now) == Applied::Scrolled {
            queue.push_back(CarouselEvent::Scroll);
        }
        self.drain(queue);

        let now = self.now();
        let effects = self.controller.advance(self.surface.layout(), now);
        let mut queue = VecDeque::new();
        self.apply_effects(effects, &mut queue);
        self.drain(queue);
    }

    fn drain(&mut self, mut queue: VecDeque<CarouselEvent>) {
        let mut trips = 0;
        while let Some(event) = queue.pop_front() {
            trips += 1;
            if trips > MAX_ROUND_TRIPS {
                tracing::warn!(pending = queue.len(), "dropping carousel feedback events");
                break;
            }
            let now = self.now();
            let effects = self.controller.handle(event, self.surface.layout(), now);
            self.apply_effects(effects, &mut queue);
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, queue: &mut VecDeque<CarouselEvent>) {
        for effect in effects {
            match self.surface.apply(effect) {
                Applied::Nothing => {}
                Applied::Scrolled => queue.push_back(CarouselEvent::Scroll),
                Applied::SelectClip(index) => {
                    if index < self.clips.len() && index != self.selected {
                        self.selected = index;
                        queue.push_back(CarouselEvent::SelectionChanged(index));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clip::sample_clips;
    use crate::core::geometry::GeometryProvider;

    fn mounted(start: usize) -> AppState {
        let mut config = AppConfig::default();
        config.card_width = 20;
        config.card_gap = 0;
        config.layout_settle_ms = 0;
        let mut state = AppState::new(sample_clips(), start, config);
        // 40 columns wide, tall enough for every region.
        state.mount(Rect::new(0, 0, 40, 20));
        state.tick();
        state
    }

    fn run_until_idle(state: &mut AppState) {
        for _ in 0..400 {
            state.tick();
            if state.surface.is_idle() && state.controller.next_deadline().is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("carousel never settled");
    }

    #[test]
    fn mount_pads_viewport() {
        let state = mounted(0);
        assert_eq!(state.surface.layout().side_padding(), 10.0);
        assert_eq!(state.surface.layout().scroll_offset(), Some(0.0));
    }

    #[test]
    fn start_index_is_aligned_after_layout_pass() {
        let mut state = mounted(2);
        run_until_idle(&mut state);
        assert_eq!(state.surface.layout().scroll_offset(), Some(40.0));
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn select_animates_to_clip() {
        let mut state = mounted(0);
        state.select(1);
        run_until_idle(&mut state);
        assert_eq!(state.surface.layout().scroll_offset(), Some(20.0));
        assert_eq!(state.selected, 1);
        assert_eq!(state.surface.opacities()[1], 1.0);
    }

    #[test]
    fn wheel_scroll_settles_and_snaps() {
        let mut state = mounted(0);
        state.scroll_by(14.0);
        run_until_idle(&mut state);
        assert_eq!(state.selected, 1);
        assert_eq!(state.surface.layout().scroll_offset(), Some(20.0));
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let mut state = mounted(0);
        state.select(9);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn small_wheel_nudge_snaps_back() {
        let mut state = mounted(0);
        state.scroll_by(4.0);
        run_until_idle(&mut state);
        assert_eq!(state.selected, 0);
        assert_eq!(state.surface.layout().scroll_offset(), Some(0.0));
    }

    #[test]
    fn repeated_select_during_animation_reaches_last_clip() {
        let mut state = mounted(0);
        state.select(1);
        state.tick();
        state.select(2);
        run_until_idle(&mut state);
        assert_eq!(state.selected, 2);
        assert_eq!(state.surface.layout().scroll_offset(), Some(40.0));
    }
}
