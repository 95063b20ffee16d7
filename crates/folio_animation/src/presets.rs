//! Animation presets
//!
//! The entrance animations the portfolio sections play, plus a few generic
//! building blocks. Each preset pairs an animation with the stagger applied
//! when it runs over a group of targets.

use crate::easing::Easing;
use crate::keyframe::{EntranceAnimation, StaggerConfig};
use crate::style::StylePatch;

/// Entrance animation plus group stagger
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPreset {
    pub animation: EntranceAnimation,
    pub stagger: StaggerConfig,
}

impl AnimationPreset {
    pub fn new(animation: EntranceAnimation) -> Self {
        Self {
            animation,
            stagger: StaggerConfig::none(),
        }
    }

    pub fn stagger(mut self, delay_ms: u32) -> Self {
        self.stagger = StaggerConfig::new(delay_ms);
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.animation = self.animation.delay(delay_ms);
        self
    }

    /// Animation for item `index` of a group, delayed by its stagger slot
    pub fn for_index(&self, index: usize) -> EntranceAnimation {
        let offset = self.stagger.delay_for_index(index);
        let base = self.animation.delay_ms();
        self.animation.clone().delay(base.saturating_add(offset))
    }

    // ========================================================================
    // Generic
    // ========================================================================

    /// Fade in from transparent
    pub fn fade_in(duration_ms: u32) -> Self {
        Self::new(
            EntranceAnimation::new(duration_ms)
                .from(StylePatch::new().opacity(0.0))
                .easing(Easing::ExpoOut),
        )
    }

    /// Fade in while rising `distance` px
    pub fn fade_up(duration_ms: u32, distance: f32) -> Self {
        Self::new(
            EntranceAnimation::new(duration_ms)
                .from(StylePatch::new().opacity(0.0).y(distance))
                .easing(Easing::ExpoOut),
        )
    }

    // ========================================================================
    // Hero (played on mount)
    // ========================================================================

    /// Title flips up out of the baseline
    pub fn hero_title() -> Self {
        Self::new(
            EntranceAnimation::new(1200)
                .from(StylePatch::new().y(100.0).opacity(0.0).rotate_x(90.0))
                .delay(200)
                .easing(Easing::ExpoOut),
        )
    }

    pub fn hero_subtitle() -> Self {
        Self::fade_up(800, 50.0).delay(600)
    }

    /// Portrait revealed by an expanding circular clip
    pub fn hero_portrait() -> Self {
        Self::new(
            EntranceAnimation::new(1400)
                .from(StylePatch::new().clip_reveal(0.0).scale(1.2))
                .to(StylePatch::new().clip_reveal(1.0).scale(1.0))
                .delay(400)
                .easing(Easing::ExpoOut),
        )
    }

    // ========================================================================
    // Scroll-triggered sections
    // ========================================================================

    pub fn about_image() -> Self {
        Self::new(
            EntranceAnimation::new(1000)
                .from(StylePatch::new().scale(0.8).opacity(0.0).blur(10.0))
                .easing(Easing::ExpoOut),
        )
    }

    pub fn about_content() -> Self {
        Self::fade_up(800, 50.0).stagger(150)
    }

    /// Skill chips pop in with overshoot
    pub fn about_chips() -> Self {
        Self::new(
            EntranceAnimation::new(500)
                .from(StylePatch::new().scale(0.0).opacity(0.0))
                .easing(Easing::BackOut(1.7)),
        )
        .stagger(100)
    }

    pub fn project_cards() -> Self {
        Self::new(
            EntranceAnimation::new(800)
                .from(StylePatch::new().y(100.0).opacity(0.0).scale(0.9))
                .easing(Easing::ExpoOut),
        )
        .stagger(200)
    }

    /// Slide in from the left
    pub fn experience_cards() -> Self {
        Self::new(
            EntranceAnimation::new(800)
                .from(StylePatch::new().x(-50.0).opacity(0.0))
                .easing(Easing::ExpoOut),
        )
        .stagger(200)
    }

    pub fn award_cards() -> Self {
        Self::new(
            EntranceAnimation::new(600)
                .from(StylePatch::new().y(60.0).opacity(0.0).scale(0.95))
                .easing(Easing::ExpoOut),
        )
        .stagger(150)
    }

    pub fn contact_blocks() -> Self {
        Self::fade_up(800, 50.0).stagger(150)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Mobile menu links rise into place one after another
    pub fn mobile_menu_items() -> Self {
        Self::new(
            EntranceAnimation::new(300)
                .from(StylePatch::new().opacity(0.0).y(20.0))
                .easing(Easing::CubicOut),
        )
        .stagger(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::VisualProperty;

    #[test]
    fn test_for_index_adds_stagger_to_base_delay() {
        let preset = AnimationPreset::fade_up(800, 50.0).delay(100).stagger(150);
        assert_eq!(preset.for_index(0).delay_ms(), 100);
        assert_eq!(preset.for_index(2).delay_ms(), 400);
        assert_eq!(preset.for_index(2).duration_ms(), 800);
    }

    #[test]
    fn test_presets_end_fully_visible() {
        let all = [
            AnimationPreset::hero_title(),
            AnimationPreset::hero_subtitle(),
            AnimationPreset::hero_portrait(),
            AnimationPreset::about_image(),
            AnimationPreset::about_content(),
            AnimationPreset::about_chips(),
            AnimationPreset::project_cards(),
            AnimationPreset::experience_cards(),
            AnimationPreset::award_cards(),
            AnimationPreset::contact_blocks(),
            AnimationPreset::mobile_menu_items(),
        ];
        for preset in all {
            let end = preset.animation.end_patch();
            for (property, value) in end.iter() {
                assert!(
                    (value - property.identity()).abs() < 1e-6,
                    "{:?} ends at {} for {:?}",
                    property,
                    value,
                    preset
                );
            }
        }
    }

    #[test]
    fn test_hero_portrait_starts_clipped() {
        let start = AnimationPreset::hero_portrait().animation.sample(0.0);
        assert_eq!(start.get(VisualProperty::ClipReveal), Some(0.0));
        assert_eq!(start.get(VisualProperty::Scale), Some(1.2));
    }
}
