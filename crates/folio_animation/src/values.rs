//! Animatable value types
//!
//! Linear interpolation for the value types an entrance animation moves
//! between: plain scalars and whole style patches.

use crate::style::StylePatch;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    ///
    /// `t` is not clamped: overshooting curves (back.out) push past 1.0.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// StylePatch Implementation
// ============================================================================

/// Property-wise interpolation
///
/// A property present on only one side is interpolated against its
/// identity value, so `{opacity: 0}` → `{}` fades in to fully opaque.
impl Interpolate for StylePatch {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut out = StylePatch::new();
        for property in self.properties().chain(other.properties()) {
            if out.get(property).is_some() {
                continue;
            }
            let a = self.get(property).unwrap_or_else(|| property.identity());
            let b = other.get(property).unwrap_or_else(|| property.identity());
            out.set(property, a.lerp(&b, t));
        }
        out
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.properties().chain(other.properties()).all(|property| {
            let a = self.get(property).unwrap_or_else(|| property.identity());
            let b = other.get(property).unwrap_or_else(|| property.identity());
            a.approx_eq(&b, epsilon)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::VisualProperty;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_patch_interpolates_against_identity() {
        let from = StylePatch::new().opacity(0.0).y(100.0);
        let to = StylePatch::new();
        let mid = from.lerp(&to, 0.5);

        assert_eq!(mid.get(VisualProperty::Opacity), Some(0.5));
        assert_eq!(mid.get(VisualProperty::TranslateY), Some(50.0));
        assert!(from.lerp(&to, 1.0).approx_eq(&StylePatch::new(), 1e-6));
    }

    #[test]
    fn test_patch_union_of_properties() {
        let from = StylePatch::new().scale(0.8);
        let to = StylePatch::new().blur(4.0);
        let start = from.lerp(&to, 0.0);

        assert_eq!(start.len(), 2);
        assert_eq!(start.get(VisualProperty::Scale), Some(0.8));
        assert_eq!(start.get(VisualProperty::Blur), Some(0.0));
    }
}
