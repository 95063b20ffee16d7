//! Activation edges
//!
//! An activation edge pairs a point on the element (`top`, `center`,
//! `bottom`) with a position in the viewport (`80%`, `top`, `center`,
//! `bottom`). The edge is crossed once the element point has scrolled up
//! to (or past) the viewport position.
//!
//! ```
//! use folio_core::Rect;
//! use folio_scroll::ActivationEdge;
//!
//! let edge: ActivationEdge = "top 80%".parse().unwrap();
//! let card = Rect::new(0.0, 1200.0, 300.0, 400.0);
//! assert_eq!(edge.scroll_offset_for(&card, 800.0), 560.0);
//! ```

use std::fmt;
use std::str::FromStr;

use folio_core::{FolioError, Rect};
use serde::Deserialize;

/// Point on the observed element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementEdge {
    #[default]
    Top,
    Center,
    Bottom,
}

impl ElementEdge {
    /// Document y of this edge
    pub fn y_of(self, rect: &Rect) -> f32 {
        match self {
            ElementEdge::Top => rect.top(),
            ElementEdge::Center => rect.top() + rect.height() / 2.0,
            ElementEdge::Bottom => rect.bottom(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ElementEdge::Top => "top",
            ElementEdge::Center => "center",
            ElementEdge::Bottom => "bottom",
        }
    }
}

/// Element edge + viewport position
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct ActivationEdge {
    pub element: ElementEdge,
    /// Viewport position as a fraction of viewport height from the top
    pub viewport_fraction: f32,
}

impl ActivationEdge {
    pub const fn new(element: ElementEdge, viewport_fraction: f32) -> Self {
        Self {
            element,
            viewport_fraction,
        }
    }

    /// `top <pct>%`
    pub const fn top_at(viewport_fraction: f32) -> Self {
        Self::new(ElementEdge::Top, viewport_fraction)
    }

    /// `bottom <pct>%`
    pub const fn bottom_at(viewport_fraction: f32) -> Self {
        Self::new(ElementEdge::Bottom, viewport_fraction)
    }

    /// Scroll offset at which this edge is crossed for an element at `rect`
    pub fn scroll_offset_for(&self, rect: &Rect, viewport_height: f32) -> f32 {
        self.element.y_of(rect) - self.viewport_fraction * viewport_height
    }

    /// Whether the edge has been crossed at `scroll_offset`
    pub fn is_crossed(&self, rect: &Rect, scroll_offset: f32, viewport_height: f32) -> bool {
        scroll_offset >= self.scroll_offset_for(rect, viewport_height)
    }
}

impl FromStr for ActivationEdge {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FolioError::InvalidEdge(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let element = match element {
            "top" => ElementEdge::Top,
            "center" => ElementEdge::Center,
            "bottom" => ElementEdge::Bottom,
            _ => return Err(invalid()),
        };

        let viewport_fraction = match viewport {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => {
                let number = pct.strip_suffix('%').ok_or_else(invalid)?;
                let value: f32 = number.parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                value / 100.0
            }
        };

        Ok(Self::new(element, viewport_fraction))
    }
}

impl TryFrom<String> for ActivationEdge {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ActivationEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}%",
            self.element.as_str(),
            self.viewport_fraction * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_and_keywords() {
        let edge: ActivationEdge = "top 80%".parse().unwrap();
        assert_eq!(edge, ActivationEdge::top_at(0.8));

        let edge: ActivationEdge = "bottom top".parse().unwrap();
        assert_eq!(edge, ActivationEdge::bottom_at(0.0));

        let edge: ActivationEdge = "  center   center ".parse().unwrap();
        assert_eq!(edge, ActivationEdge::new(ElementEdge::Center, 0.5));

        let edge: ActivationEdge = "top bottom".parse().unwrap();
        assert_eq!(edge.viewport_fraction, 1.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "top", "top 80", "left 80%", "top 80% extra", "top abc%", "top inf%"] {
            assert!(bad.parse::<ActivationEdge>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_crossing_offset() {
        // Section top at 1200, viewport 800: "top 80%" crosses at 560
        let rect = Rect::new(0.0, 1200.0, 1280.0, 600.0);
        let edge = ActivationEdge::top_at(0.8);
        assert_eq!(edge.scroll_offset_for(&rect, 800.0), 560.0);
        assert!(!edge.is_crossed(&rect, 559.0, 800.0));
        assert!(edge.is_crossed(&rect, 560.0, 800.0));

        let end = ActivationEdge::bottom_at(0.3);
        assert_eq!(end.scroll_offset_for(&rect, 800.0), 1560.0);
    }

    #[test]
    fn test_display_round_trips() {
        let edge = ActivationEdge::top_at(0.75);
        assert_eq!(edge.to_string(), "top 75%");
        assert_eq!(edge.to_string().parse::<ActivationEdge>().unwrap(), edge);
    }
}
