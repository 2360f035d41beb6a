//! Horizontal smooth scroll with exponential ease-out.
//!
//! When a smooth scroll is requested the animator remembers the target
//! offset.  Each tick closes a fixed fraction of the remaining distance,
//! so the strip slides quickly at first and decelerates into place.

/// Column-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset we are easing towards, `None` when idle.
    target: Option<f64>,
    /// Fraction of the remaining distance covered per tick.
    /// Good range: 0.25–0.45 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            target: None,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start (or retarget) an animation.
    pub fn set_target(&mut self, target: f64) {
        self.target = Some(target);
    }

    /// Stop animating; the current offset stays where it is.
    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Advance one frame from `current`.  Returns the next offset, or `None`
    /// when there is nothing to animate.
    pub fn tick(&mut self, current: f64) -> Option<f64> {
        let target = self.target?;
        let next = current + (target - current) * self.speed;
        if (target - next).abs() < 0.4 {
            self.target = None;
            return Some(target);
        }
        Some(next)
    }

    /// True while an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_target() {
        let mut anim = SmoothScroll::new(0.3);
        anim.set_target(100.0);
        let mut offset = 0.0;
        let mut frames = 0;
        while let Some(next) = anim.tick(offset) {
            assert!(next >= offset);
            offset = next;
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(offset, 100.0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn idle_animator_does_nothing() {
        let mut anim = SmoothScroll::new(0.3);
        assert_eq!(anim.tick(12.0), None);
        anim.set_target(50.0);
        anim.cancel();
        assert_eq!(anim.tick(12.0), None);
    }
}
