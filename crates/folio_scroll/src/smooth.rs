//! Smooth scroll to an anchor
//!
//! A time-based tween of the scroll offset, started by navigation clicks.
//! Starting a new scroll replaces the one in flight; the tween itself is
//! not interrupted by user scroll events.

use folio_animation::{Easing, Interpolate};

/// Default smooth-scroll duration (ms)
pub const DEFAULT_SCROLL_DURATION_MS: u32 = 800;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    elapsed_ms: f32,
}

/// Scroll-offset animator
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    duration_ms: u32,
    easing: Easing,
    tween: Option<Tween>,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DURATION_MS, Easing::CubicInOut)
    }
}

impl SmoothScroll {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            tween: None,
        }
    }

    /// Start scrolling from `from` to `to`, replacing any scroll in flight
    pub fn start(&mut self, from: f32, to: f32) {
        self.tween = Some(Tween {
            from,
            to,
            elapsed_ms: 0.0,
        });
    }

    pub fn cancel(&mut self) {
        self.tween = None;
    }

    pub fn is_active(&self) -> bool {
        self.tween.is_some()
    }

    /// Destination of the scroll in flight
    pub fn target(&self) -> Option<f32> {
        self.tween.map(|t| t.to)
    }

    /// Advance the tween; returns the offset to scroll to this frame
    ///
    /// Yields the exact destination on the final frame, then `None`.
    pub fn tick(&mut self, dt_ms: f32) -> Option<f32> {
        let tween = self.tween.as_mut()?;
        tween.elapsed_ms += dt_ms.max(0.0);

        let progress = if self.duration_ms == 0 {
            1.0
        } else {
            (tween.elapsed_ms / self.duration_ms as f32).min(1.0)
        };

        if progress >= 1.0 {
            let to = tween.to;
            self.tween = None;
            return Some(to);
        }

        Some(tween.from.lerp(&tween.to, self.easing.apply(progress)))
    }
}
