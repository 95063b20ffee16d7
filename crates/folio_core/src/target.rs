//! Renderable targets and layout queries
//!
//! A `TargetId` is an opaque handle to a renderable region of the page
//! (a section, a card, a heading). Its live bounds are obtained through
//! the [`Geometry`] trait, which stands in for a bounding-box measurement
//! of the rendered tree and may be arbitrarily expensive.

use slotmap::new_key_type;

use crate::geometry::Rect;

new_key_type! {
    /// Opaque handle to a renderable region
    pub struct TargetId;
}

/// Live layout query
pub trait Geometry {
    /// Current bounds of `target` in document coordinates.
    ///
    /// Returns `None` if the target is no longer part of the rendered tree.
    fn measure(&self, target: TargetId) -> Option<Rect>;
}

impl<G: Geometry + ?Sized> Geometry for &G {
    fn measure(&self, target: TargetId) -> Option<Rect> {
        (**self).measure(target)
    }
}
