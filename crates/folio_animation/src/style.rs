//! Visual style model
//!
//! Animations never touch layout. They produce a [`StylePatch`]: a sparse
//! set of visual-only property values (opacity, translation, scale, blur,
//! rotation, clip reveal) layered over an element's identity state.

use smallvec::SmallVec;

/// A visual-only, animatable property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualProperty {
    Opacity,
    /// Horizontal translation (px)
    TranslateX,
    /// Vertical translation (px)
    TranslateY,
    /// Uniform scale
    Scale,
    /// Vertical-only scale (timeline fill bars)
    ScaleY,
    /// Rotation about the z axis (degrees)
    Rotate,
    /// 3-D rotation about the x axis (degrees)
    RotateX,
    /// 3-D rotation about the y axis (degrees)
    RotateY,
    /// Gaussian blur radius (px)
    Blur,
    /// Circular clip reveal, 0.0 = fully clipped, 1.0 = fully revealed
    ClipReveal,
}

impl VisualProperty {
    pub const ALL: [VisualProperty; 10] = [
        VisualProperty::Opacity,
        VisualProperty::TranslateX,
        VisualProperty::TranslateY,
        VisualProperty::Scale,
        VisualProperty::ScaleY,
        VisualProperty::Rotate,
        VisualProperty::RotateX,
        VisualProperty::RotateY,
        VisualProperty::Blur,
        VisualProperty::ClipReveal,
    ];

    /// Value of this property when the element is untouched
    pub fn identity(self) -> f32 {
        match self {
            VisualProperty::Opacity
            | VisualProperty::Scale
            | VisualProperty::ScaleY
            | VisualProperty::ClipReveal => 1.0,
            VisualProperty::TranslateX
            | VisualProperty::TranslateY
            | VisualProperty::Rotate
            | VisualProperty::RotateX
            | VisualProperty::RotateY
            | VisualProperty::Blur => 0.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Sparse set of property values
///
/// Setting a property twice keeps the last value. Patches are absolute,
/// never additive: applying the same patch twice yields the same state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StylePatch {
    values: SmallVec<[(VisualProperty, f32); 4]>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch with every property at its identity value
    pub fn identity_for(properties: impl IntoIterator<Item = VisualProperty>) -> Self {
        let mut patch = Self::new();
        for property in properties {
            patch.set(property, property.identity());
        }
        patch
    }

    /// Builder-style setter
    pub fn with(mut self, property: VisualProperty, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: VisualProperty, value: f32) {
        match self.values.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.values.push((property, value)),
        }
    }

    pub fn get(&self, property: VisualProperty) -> Option<f32> {
        self.values
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn remove(&mut self, property: VisualProperty) -> Option<f32> {
        let pos = self.values.iter().position(|(p, _)| *p == property)?;
        Some(self.values.remove(pos).1)
    }

    pub fn properties(&self) -> impl Iterator<Item = VisualProperty> + '_ {
        self.values.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualProperty, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Overlay `other` on top of this patch (other wins on conflicts)
    pub fn merge(&mut self, other: &StylePatch) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    // Shorthand constructors used by the section presets

    pub fn opacity(mut self, value: f32) -> Self {
        self.set(VisualProperty::Opacity, value);
        self
    }

    pub fn x(mut self, value: f32) -> Self {
        self.set(VisualProperty::TranslateX, value);
        self
    }

    pub fn y(mut self, value: f32) -> Self {
        self.set(VisualProperty::TranslateY, value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.set(VisualProperty::Scale, value);
        self
    }

    pub fn scale_y(mut self, value: f32) -> Self {
        self.set(VisualProperty::ScaleY, value);
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.set(VisualProperty::Rotate, degrees);
        self
    }

    pub fn rotate_x(mut self, degrees: f32) -> Self {
        self.set(VisualProperty::RotateX, degrees);
        self
    }

    pub fn rotate_y(mut self, degrees: f32) -> Self {
        self.set(VisualProperty::RotateY, degrees);
        self
    }

    pub fn blur(mut self, radius: f32) -> Self {
        self.set(VisualProperty::Blur, radius);
        self
    }

    pub fn clip_reveal(mut self, value: f32) -> Self {
        self.set(VisualProperty::ClipReveal, value);
        self
    }
}

/// Fully resolved visual state of one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    values: [f32; 10],
}

impl Default for VisualState {
    fn default() -> Self {
        Self::identity()
    }
}

impl VisualState {
    /// Untransformed, fully visible
    pub fn identity() -> Self {
        let mut values = [0.0; 10];
        for property in VisualProperty::ALL {
            values[property.index()] = property.identity();
        }
        Self { values }
    }

    pub fn get(&self, property: VisualProperty) -> f32 {
        self.values[property.index()]
    }

    pub fn set(&mut self, property: VisualProperty, value: f32) {
        self.values[property.index()] = value;
    }

    /// Write every property in `patch` into this state
    pub fn apply(&mut self, patch: &StylePatch) {
        for (property, value) in patch.iter() {
            self.set(property, value);
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn opacity(&self) -> f32 {
        self.get(VisualProperty::Opacity)
    }

    /// Content is readable: not fully transparent and not fully clipped
    pub fn is_visible(&self) -> bool {
        self.get(VisualProperty::Opacity) > 0.0 && self.get(VisualProperty::ClipReveal) > 0.0
    }
}
