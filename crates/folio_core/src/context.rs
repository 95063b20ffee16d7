//! Shared page context
//!
//! The scroll offset and the pointer position are the only values shared
//! between independent consumers (progress bar, triggers, section tracker,
//! particle field). Each has exactly one writer, the page's event handler,
//! and consumers read a copied [`FrameSnapshot`] taken once per tick so
//! every evaluation within a tick sees the same values.

use crate::geometry::{Point, Size};

/// Current scroll position and the extents it is measured against
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Vertical scroll offset in document pixels
    pub offset_y: f32,
    /// Visible viewport size
    pub viewport: Size,
    /// Full document (content) height
    pub document_height: f32,
}

impl ScrollState {
    pub fn new(offset_y: f32, viewport: Size, document_height: f32) -> Self {
        Self {
            offset_y,
            viewport,
            document_height,
        }
    }

    /// Height of the scrollable range (`document - viewport`), never negative
    pub fn scrollable_range(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Clamp an offset into the scrollable range
    pub fn clamp_offset(&self, offset_y: f32) -> f32 {
        offset_y.clamp(0.0, self.scrollable_range())
    }

    /// Global scroll progress in 0.0..=1.0
    ///
    /// `clamp(offset / max(1, document - viewport), 0, 1)`; a document that
    /// does not overflow the viewport always reports 0.
    pub fn progress(&self) -> f32 {
        let range = self.document_height - self.viewport.height;
        if range <= 0.0 || !range.is_finite() {
            return 0.0;
        }
        let ratio = self.offset_y / range.max(1.0);
        if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Global scroll progress in percent (progress bar width)
    pub fn progress_percent(&self) -> f32 {
        self.progress() * 100.0
    }
}

/// Read-only view of the shared state for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub scroll: ScrollState,
    /// Last known pointer position (viewport coordinates), if any
    pub pointer: Option<Point>,
}

impl FrameSnapshot {
    /// Pointer position converted to document coordinates
    pub fn pointer_in_document(&self) -> Option<Point> {
        self.pointer
            .map(|p| Point::new(p.x, p.y + self.scroll.offset_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(offset: f32, viewport_h: f32, doc_h: f32) -> ScrollState {
        ScrollState::new(offset, Size::new(1280.0, viewport_h), doc_h)
    }

    #[test]
    fn test_progress_scenario() {
        assert_eq!(state(800.0, 800.0, 2400.0).progress_percent(), 50.0);
        assert_eq!(state(1600.0, 800.0, 2400.0).progress_percent(), 100.0);
        assert_eq!(state(0.0, 800.0, 2400.0).progress_percent(), 0.0);
    }

    #[test]
    fn test_progress_degenerate_document() {
        // Content height equals viewport height: denominator is zero
        assert_eq!(state(0.0, 800.0, 800.0).progress(), 0.0);
        assert_eq!(state(25.0, 800.0, 800.0).progress(), 0.0);
        // Content shorter than viewport
        assert_eq!(state(0.0, 800.0, 400.0).progress(), 0.0);
    }

    #[test]
    fn test_progress_clamps_overscroll() {
        assert_eq!(state(-50.0, 800.0, 2400.0).progress(), 0.0);
        assert_eq!(state(5000.0, 800.0, 2400.0).progress(), 1.0);
    }

    #[test]
    fn test_progress_matches_formula() {
        for offset in [0.0_f32, 1.0, 123.0, 799.0, 1000.0, 1599.0, 1600.0] {
            let s = state(offset, 800.0, 2400.0);
            let expected = (offset / (2400.0_f32 - 800.0).max(1.0)).clamp(0.0, 1.0) * 100.0;
            assert!((s.progress_percent() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_pointer_in_document() {
        let snapshot = FrameSnapshot {
            scroll: state(300.0, 800.0, 2400.0),
            pointer: Some(Point::new(10.0, 20.0)),
        };
        assert_eq!(snapshot.pointer_in_document(), Some(Point::new(10.0, 320.0)));
    }
}
