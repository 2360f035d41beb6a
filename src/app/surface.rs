//! The terminal render surface the carousel controller drives.
//!
//! Owns the strip geometry, the per-card opacities, the snap flag, and the
//! smooth-scroll animator.  With snapping on, a native (wheel) scroll that
//! goes quiet glides back to the nearest card.  Controller effects are applied here; anything
//! that concerns the caller (a selection request) or must be reported back
//! (a scroll offset change) is returned as an [`Applied`] value.

use std::time::Duration;

use crate::core::carousel::{Effect, ScrollBehavior};
use crate::core::geometry::{GeometryProvider, StripLayout};
use crate::core::metrics;
use crate::core::timer::Timer;
use crate::ui::smooth_scroll::SmoothScroll;

/// Quiet period after the last native scroll before snapping to a card.
pub const SNAP_DELAY: Duration = Duration::from_millis(80);

/// What applying one effect did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Nothing,
    /// The scroll offset moved; the controller must hear about it.
    Scrolled,
    /// Forwarded selection request.
    SelectClip(usize),
}

#[derive(Debug)]
pub struct CarouselSurface {
    layout: StripLayout,
    opacities: Vec<f64>,
    snap: bool,
    snap_timer: Timer,
    anim: SmoothScroll,
}

impl CarouselSurface {
    pub fn new(item_count: usize, card_width: u16, gap: u16, scroll_speed: f64) -> Self {
        Self {
            layout: StripLayout::new(item_count, f64::from(card_width), f64::from(gap)),
            opacities: Vec::new(),
            snap: true,
            snap_timer: Timer::new(),
            anim: SmoothScroll::new(scroll_speed),
        }
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    pub fn opacities(&self) -> &[f64] {
        &self.opacities
    }

    /// `false` while a drag has native snapping switched off.
    pub fn snap_enabled(&self) -> bool {
        self.snap
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_animating()
    }

    /// No animation running and no snap waiting to start.
    pub fn is_idle(&self) -> bool {
        !self.anim.is_animating() && !self.snap_timer.is_pending()
    }

    /// New viewport width from the terminal layout.  Returns `true` when it
    /// actually changed.
    pub fn set_viewport_width(&mut self, width: u16) -> bool {
        let width = f64::from(width);
        if self.layout.is_laid_out() && self.layout.viewport_width() == Some(width) {
            return false;
        }
        self.layout.set_viewport_width(width);
        true
    }

    pub fn apply(&mut self, effect: Effect) -> Applied {
        match effect {
            Effect::SetSidePadding(padding) => {
                self.layout.set_side_padding(padding);
                Applied::Nothing
            }
            Effect::SetOpacities(opacities) => {
                self.opacities = opacities;
                Applied::Nothing
            }
            Effect::ScrollTo { offset, behavior } => match behavior {
                ScrollBehavior::Instant => {
                    self.anim.cancel();
                    self.snap_timer.cancel();
                    scrolled(self.layout.set_scroll_offset(offset))
                }
                ScrollBehavior::Smooth => {
                    self.snap_timer.cancel();
                    self.anim.set_target(offset.clamp(0.0, self.layout.max_scroll()));
                    Applied::Nothing
                }
            },
            Effect::SetSnap(on) => {
                self.snap = on;
                if !on {
                    self.snap_timer.cancel();
                }
                Applied::Nothing
            }
            Effect::SelectClip(index) => Applied::SelectClip(index),
        }
    }

    /// Native scroll (mouse wheel): moves immediately, interrupting any
    /// animation, and re-arms the snap.
    pub fn scroll_by(&mut self, delta: f64, now: Duration) -> Applied {
        self.anim.cancel();
        let current = self.layout.scroll_offset().unwrap_or(0.0);
        let applied = scrolled(self.layout.set_scroll_offset(current + delta));
        if self.snap && applied == Applied::Scrolled {
            self.snap_timer.schedule(now, SNAP_DELAY);
        }
        applied
    }

    /// Animate to center card `index`, dropping any pending snap.
    pub fn glide_to(&mut self, index: usize) {
        self.snap_timer.cancel();
        if let Some(offset) = metrics::centered_offset(&self.layout, index) {
            self.anim.set_target(offset.clamp(0.0, self.layout.max_scroll()));
        }
    }

    /// Start a due snap, then advance the animation by one frame.
    pub fn tick(&mut self, now: Duration) -> Applied {
        if self.snap_timer.take_due(now).is_some() && self.snap {
            if let Some(index) = metrics::nearest_item(&self.layout) {
                self.glide_to(index);
            }
        }
        let Some(current) = self.layout.scroll_offset() else {
            self.anim.cancel();
            return Applied::Nothing;
        };
        match self.anim.tick(current) {
            Some(next) => scrolled(self.layout.set_scroll_offset(next)),
            None => Applied::Nothing,
        }
    }
}

fn scrolled(changed: bool) -> Applied {
    if changed {
        Applied::Scrolled
    } else {
        Applied::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> CarouselSurface {
        let mut s = CarouselSurface::new(3, 20, 0, 0.5);
        s.set_viewport_width(40);
        s.apply(Effect::SetSidePadding(10.0));
        s
    }

    #[test]
    fn instant_scroll_reports_change() {
        let mut s = surface();
        let applied = s.apply(Effect::ScrollTo {
            offset: 20.0,
            behavior: ScrollBehavior::Instant,
        });
        assert_eq!(applied, Applied::Scrolled);
        assert_eq!(s.layout().scroll_offset(), Some(20.0));

        let again = s.apply(Effect::ScrollTo {
            offset: 20.0,
            behavior: ScrollBehavior::Instant,
        });
        assert_eq!(again, Applied::Nothing);
    }

    #[test]
    fn smooth_scroll_moves_on_ticks() {
        let mut s = surface();
        let applied = s.apply(Effect::ScrollTo {
            offset: 40.0,
            behavior: ScrollBehavior::Smooth,
        });
        assert_eq!(applied, Applied::Nothing);
        assert_eq!(s.layout().scroll_offset(), Some(0.0));

        let mut frames = 0;
        while s.is_animating() {
            assert_eq!(s.tick(Duration::ZERO), Applied::Scrolled);
            frames += 1;
            assert!(frames < 50);
        }
        assert_eq!(s.layout().scroll_offset(), Some(40.0));
        assert_eq!(s.tick(Duration::ZERO), Applied::Nothing);
    }

    #[test]
    fn smooth_target_is_clamped() {
        let mut s = surface();
        s.apply(Effect::ScrollTo {
            offset: 1000.0,
            behavior: ScrollBehavior::Smooth,
        });
        while s.is_animating() {
            s.tick(Duration::ZERO);
        }
        assert_eq!(s.layout().scroll_offset(), Some(s.layout().max_scroll()));
    }

    #[test]
    fn wheel_interrupts_animation() {
        let mut s = surface();
        s.apply(Effect::ScrollTo {
            offset: 40.0,
            behavior: ScrollBehavior::Smooth,
        });
        assert_eq!(s.scroll_by(4.0, Duration::ZERO), Applied::Scrolled);
        assert!(!s.is_animating());
        assert_eq!(s.layout().scroll_offset(), Some(4.0));
    }

    #[test]
    fn quiet_wheel_scroll_snaps_back_to_nearest_card() {
        let mut s = surface();
        s.scroll_by(4.0, Duration::ZERO);
        assert!(!s.is_idle());

        assert_eq!(s.tick(SNAP_DELAY / 2), Applied::Nothing);
        assert_eq!(s.layout().scroll_offset(), Some(4.0));

        let mut frames = 0;
        let mut now = SNAP_DELAY;
        while !s.is_idle() {
            s.tick(now);
            now += Duration::from_millis(16);
            frames += 1;
            assert!(frames < 50);
        }
        assert_eq!(s.layout().scroll_offset(), Some(0.0));
    }

    #[test]
    fn wheel_scroll_does_not_snap_while_snap_is_off() {
        let mut s = surface();
        s.apply(Effect::SetSnap(false));
        s.scroll_by(4.0, Duration::ZERO);
        assert!(s.is_idle());
        s.tick(SNAP_DELAY);
        assert_eq!(s.layout().scroll_offset(), Some(4.0));
    }

    #[test]
    fn glide_to_centers_card() {
        let mut s = surface();
        s.glide_to(2);
        while s.is_animating() {
            s.tick(Duration::ZERO);
        }
        assert_eq!(s.layout().scroll_offset(), Some(40.0));
    }

    #[test]
    fn selection_and_snap_pass_through() {
        let mut s = surface();
        assert_eq!(s.apply(Effect::SelectClip(2)), Applied::SelectClip(2));
        s.apply(Effect::SetSnap(false));
        assert!(!s.snap_enabled());
    }

    #[test]
    fn same_width_is_not_a_resize() {
        let mut s = surface();
        assert!(!s.set_viewport_width(40));
        assert!(s.set_viewport_width(60));
    }
}
