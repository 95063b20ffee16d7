//! Entrance animations
//!
//! An [`EntranceAnimation`] is a declared, time-bounded interpolation from a
//! start [`StylePatch`] to an end patch. A [`KeyframeAnimation`] is the
//! running instance that the scheduler ticks.

use crate::easing::Easing;
use crate::style::StylePatch;
use crate::values::Interpolate;

/// Declared from → to interpolation
///
/// ```
/// use folio_animation::{Easing, EntranceAnimation, StylePatch};
///
/// let fade_up = EntranceAnimation::new(800)
///     .from(StylePatch::new().opacity(0.0).y(50.0))
///     .easing(Easing::ExpoOut);
/// assert_eq!(fade_up.sample(0.0).get(folio_animation::VisualProperty::Opacity), Some(0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EntranceAnimation {
    from: StylePatch,
    to: StylePatch,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
}

impl EntranceAnimation {
    /// Animation of `duration_ms` from identity to identity; set `from`/`to`
    pub fn new(duration_ms: u32) -> Self {
        Self {
            from: StylePatch::new(),
            to: StylePatch::new(),
            duration_ms,
            delay_ms: 0,
            easing: Easing::Linear,
        }
    }

    /// Start keyframe
    pub fn from(mut self, patch: StylePatch) -> Self {
        self.from = patch;
        self
    }

    /// End keyframe. Properties missing here end at their identity value.
    pub fn to(mut self, patch: StylePatch) -> Self {
        self.to = patch;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }

    pub fn easing_curve(&self) -> Easing {
        self.easing
    }

    pub fn start_patch(&self) -> &StylePatch {
        &self.from
    }

    /// Final state, covering every property the animation touches
    pub fn end_patch(&self) -> StylePatch {
        self.from.lerp(&self.to, 1.0)
    }

    /// Linear (un-eased) progress at `elapsed_ms` since the animation was scheduled
    pub fn progress_at(&self, elapsed_ms: f32) -> f32 {
        let active = elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (active / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Visual state at `elapsed_ms`; the start keyframe is held during the delay
    pub fn sample(&self, elapsed_ms: f32) -> StylePatch {
        let t = self.easing.apply(self.progress_at(elapsed_ms));
        self.from.lerp(&self.to, t)
    }
}

/// A running entrance animation
#[derive(Clone, Debug)]
pub struct KeyframeAnimation {
    animation: EntranceAnimation,
    /// Time since start in milliseconds, including delay
    elapsed_ms: f32,
    playing: bool,
}

impl KeyframeAnimation {
    pub fn new(animation: EntranceAnimation) -> Self {
        Self {
            animation,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// Start (or restart) from the beginning
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Reached the end keyframe
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.animation.total_ms() as f32
    }

    /// Linear progress (0.0 to 1.0), excluding the delay
    pub fn progress(&self) -> f32 {
        self.animation.progress_at(self.elapsed_ms)
    }

    /// Current interpolated style
    pub fn value(&self) -> StylePatch {
        self.animation.sample(self.elapsed_ms)
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.elapsed_ms += dt_ms.max(0.0);

        let total = self.animation.total_ms() as f32;
        if self.elapsed_ms >= total {
            self.elapsed_ms = total;
            self.playing = false;
        }
    }
}

/// Per-item start offsets for a group of targets sharing one animation
///
/// Items start first to last, `delay_ms` apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay between each item's animation start (ms)
    pub delay_ms: u32,
}

impl StaggerConfig {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }

    /// No offset between items
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Delay for item `index`
    pub fn delay_for_index(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay_ms.saturating_mul(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::VisualProperty;

    fn fade_up() -> EntranceAnimation {
        EntranceAnimation::new(1000).from(StylePatch::new().opacity(0.0).y(100.0))
    }

    #[test]
    fn test_sample_linear() {
        let anim = fade_up();
        let mid = anim.sample(500.0);
        assert!((mid.get(VisualProperty::Opacity).unwrap() - 0.5).abs() < 1e-4);
        assert!((mid.get(VisualProperty::TranslateY).unwrap() - 50.0).abs() < 1e-4);

        let end = anim.sample(5000.0);
        assert_eq!(end, anim.end_patch());
        assert_eq!(end.get(VisualProperty::Opacity), Some(1.0));
        assert_eq!(end.get(VisualProperty::TranslateY), Some(0.0));
    }

    #[test]
    fn test_delay_holds_start_keyframe() {
        let anim = fade_up().delay(200);
        assert_eq!(anim.total_ms(), 1200);
        assert_eq!(anim.sample(150.0).get(VisualProperty::Opacity), Some(0.0));
        assert_eq!(anim.progress_at(700.0), 0.5);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let anim = EntranceAnimation::new(0).from(StylePatch::new().opacity(0.0));
        assert_eq!(anim.sample(0.0).get(VisualProperty::Opacity), Some(0.0));
        assert_eq!(anim.sample(0.1).get(VisualProperty::Opacity), Some(1.0));
    }

    #[test]
    fn test_keyframe_animation_runs_to_end() {
        let mut anim = KeyframeAnimation::new(fade_up().easing(Easing::ExpoOut));
        assert!(!anim.is_playing());

        anim.start();
        anim.tick(500.0);
        assert!(anim.is_playing());
        let opacity = anim.value().get(VisualProperty::Opacity).unwrap();
        assert!(opacity > 0.5, "expo.out is ahead of linear at the midpoint");

        anim.tick(600.0);
        assert!(!anim.is_playing());
        assert!(anim.is_finished());
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.value().get(VisualProperty::Opacity), Some(1.0));
    }

    #[test]
    fn test_stopped_animation_does_not_advance() {
        let mut anim = KeyframeAnimation::new(fade_up());
        anim.tick(500.0);
        assert_eq!(anim.progress(), 0.0);
    }

    #[test]
    fn test_stagger_delay_forward() {
        let config = StaggerConfig::new(150);
        assert_eq!(config.delay_for_index(0), 0);
        assert_eq!(config.delay_for_index(1), 150);
        assert_eq!(config.delay_for_index(3), 450);
        assert_eq!(StaggerConfig::none().delay_for_index(5), 0);
    }

    #[test]
    fn test_stagger_delay_saturates() {
        let config = StaggerConfig::new(u32::MAX / 2);
        assert_eq!(config.delay_for_index(3), u32::MAX);
    }
}
