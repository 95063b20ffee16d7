//! Active-section tracking
//!
//! Decides which page section is "current" for navigation highlighting.
//! Every tick a probe point is placed at `offset + probe_fraction *
//! viewport_height`; the active section is the first section, in document
//! order, whose `[top, top + height)` span contains it. When no section
//! contains the probe the previous answer is kept.

use std::fmt;
use std::str::FromStr;

use folio_core::{FolioError, Geometry, ScrollState, TargetId};
use smallvec::SmallVec;
use tracing::debug;

/// Default probe position, as a fraction of viewport height
pub const DEFAULT_PROBE_FRACTION: f32 = 0.35;

/// Stable anchor names of the page sections, in document order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionAnchor {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Awards,
    Contact,
}

impl SectionAnchor {
    pub const ALL: [SectionAnchor; 7] = [
        SectionAnchor::Home,
        SectionAnchor::About,
        SectionAnchor::Skills,
        SectionAnchor::Projects,
        SectionAnchor::Experience,
        SectionAnchor::Awards,
        SectionAnchor::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionAnchor::Home => "home",
            SectionAnchor::About => "about",
            SectionAnchor::Skills => "skills",
            SectionAnchor::Projects => "projects",
            SectionAnchor::Experience => "experience",
            SectionAnchor::Awards => "awards",
            SectionAnchor::Contact => "contact",
        }
    }
}

impl FromStr for SectionAnchor {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('#');
        SectionAnchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == name)
            .ok_or_else(|| FolioError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for SectionAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical extent of one section, measured this tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBoundary {
    pub anchor: SectionAnchor,
    pub top: f32,
    pub height: f32,
}

impl SectionBoundary {
    /// Half-open span test
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// First boundary containing `probe`, else `previous`
pub fn resolve_active(
    boundaries: &[SectionBoundary],
    probe: f32,
    previous: SectionAnchor,
) -> SectionAnchor {
    boundaries
        .iter()
        .find(|b| b.contains(probe))
        .map(|b| b.anchor)
        .unwrap_or(previous)
}

/// Tracks the section under the probe point
#[derive(Debug)]
pub struct ActiveSectionTracker {
    sections: SmallVec<[(SectionAnchor, TargetId); 8]>,
    active: Option<SectionAnchor>,
    probe_fraction: f32,
}

impl Default for ActiveSectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_FRACTION)
    }
}

impl ActiveSectionTracker {
    pub fn new(probe_fraction: f32) -> Self {
        Self {
            sections: SmallVec::new(),
            active: None,
            probe_fraction,
        }
    }

    /// Add a section, kept in document order whatever the call order.
    /// Tracking an anchor again replaces its element.
    pub fn track(&mut self, anchor: SectionAnchor, target: TargetId) {
        match self.sections.binary_search_by_key(&anchor, |(a, _)| *a) {
            Ok(index) => self.sections[index].1 = target,
            Err(index) => self.sections.insert(index, (anchor, target)),
        }
    }

    /// Stop tracking a section; returns whether it was tracked
    pub fn untrack(&mut self, anchor: SectionAnchor) -> bool {
        let before = self.sections.len();
        self.sections.retain(|(a, _)| *a != anchor);
        self.sections.len() != before
    }

    pub fn target_of(&self, anchor: SectionAnchor) -> Option<TargetId> {
        self.sections
            .iter()
            .find(|(a, _)| *a == anchor)
            .map(|(_, t)| *t)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Current section; before any match this is the first tracked section
    pub fn active(&self) -> SectionAnchor {
        self.active
            .or_else(|| self.sections.first().map(|(a, _)| *a))
            .unwrap_or_default()
    }

    /// Document y of the probe point
    pub fn probe_point(&self, scroll: &ScrollState) -> f32 {
        scroll.offset_y + self.probe_fraction * scroll.viewport.height
    }

    /// Live section extents; sections without bounds are left out
    pub fn boundaries<G: Geometry + ?Sized>(&self, geometry: &G) -> SmallVec<[SectionBoundary; 8]> {
        self.sections
            .iter()
            .filter_map(|(anchor, target)| {
                geometry.measure(*target).map(|rect| SectionBoundary {
                    anchor: *anchor,
                    top: rect.top(),
                    height: rect.height(),
                })
            })
            .collect()
    }

    /// Recompute the active section. Returns the new section if it changed.
    pub fn update<G: Geometry + ?Sized>(
        &mut self,
        geometry: &G,
        scroll: &ScrollState,
    ) -> Option<SectionAnchor> {
        let boundaries = self.boundaries(geometry);
        let previous = self.active();
        let next = resolve_active(&boundaries, self.probe_point(scroll), previous);
        self.active = Some(next);

        if next != previous {
            debug!("ActiveSectionTracker: {} -> {}", previous, next);
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::tests::{scroll_at, FakeLayout};
    use folio_core::Rect;

    fn page() -> (FakeLayout, ActiveSectionTracker) {
        let mut layout = FakeLayout::default();
        let mut tracker = ActiveSectionTracker::default();
        // home 0..800, about 800..1400, gap 1400..1500, skills 1500..2400
        tracker.track(SectionAnchor::Home, layout.add(Rect::new(0.0, 0.0, 1280.0, 800.0)));
        tracker.track(SectionAnchor::About, layout.add(Rect::new(0.0, 800.0, 1280.0, 600.0)));
        tracker.track(SectionAnchor::Skills, layout.add(Rect::new(0.0, 1500.0, 1280.0, 900.0)));
        (layout, tracker)
    }

    #[test]
    fn test_defaults_to_first_section() {
        let (_, tracker) = page();
        assert_eq!(tracker.active(), SectionAnchor::Home);
        assert_eq!(ActiveSectionTracker::default().active(), SectionAnchor::Home);
    }

    #[test]
    fn test_probe_at_35_percent() {
        let (layout, mut tracker) = page();
        // probe = 520 + 280 = 800: exactly the top of about
        assert_eq!(tracker.update(&layout, &scroll_at(520.0)), Some(SectionAnchor::About));
        // probe = 519 + 280 = 799: still home
        assert_eq!(tracker.update(&layout, &scroll_at(519.0)), Some(SectionAnchor::Home));
        assert_eq!(tracker.update(&layout, &scroll_at(0.0)), None);
    }

    #[test]
    fn test_gap_retains_previous() {
        let (layout, mut tracker) = page();
        tracker.update(&layout, &scroll_at(900.0));
        assert_eq!(tracker.active(), SectionAnchor::About);

        // probe = 1170 + 280 = 1450, inside the gap
        assert_eq!(tracker.update(&layout, &scroll_at(1170.0)), None);
        assert_eq!(tracker.active(), SectionAnchor::About);

        tracker.update(&layout, &scroll_at(1300.0));
        assert_eq!(tracker.active(), SectionAnchor::Skills);
    }

    #[test]
    fn test_layout_changes_are_picked_up() {
        let (mut layout, mut tracker) = page();
        let home = tracker.target_of(SectionAnchor::Home).unwrap();
        let about = tracker.target_of(SectionAnchor::About).unwrap();
        layout.rects[home] = Rect::new(0.0, 0.0, 1280.0, 300.0);
        layout.rects[about] = Rect::new(0.0, 300.0, 1280.0, 1100.0);

        tracker.update(&layout, &scroll_at(100.0));
        assert_eq!(tracker.active(), SectionAnchor::About);
    }

    #[test]
    fn test_overlap_resolves_in_document_order_after_retrack() {
        let (mut layout, mut tracker) = page();
        let home = tracker.target_of(SectionAnchor::Home).unwrap();
        // home 0..1000 overlaps about 800..1400; probe = 620 + 280 = 900
        layout.rects[home] = Rect::new(0.0, 0.0, 1280.0, 1000.0);
        tracker.update(&layout, &scroll_at(620.0));
        assert_eq!(tracker.active(), SectionAnchor::Home);

        assert!(tracker.untrack(SectionAnchor::Home));
        tracker.track(SectionAnchor::Home, home);
        tracker.update(&layout, &scroll_at(620.0));
        assert_eq!(tracker.active(), SectionAnchor::Home);
    }

    #[test]
    fn test_track_keeps_document_order() {
        let mut layout = FakeLayout::default();
        let mut tracker = ActiveSectionTracker::default();
        let contact = layout.add(Rect::new(0.0, 1600.0, 1280.0, 800.0));
        let about = layout.add(Rect::new(0.0, 800.0, 1280.0, 800.0));
        tracker.track(SectionAnchor::Contact, contact);
        tracker.track(SectionAnchor::About, about);

        assert_eq!(tracker.active(), SectionAnchor::About);
        let order: Vec<SectionAnchor> =
            tracker.boundaries(&layout).iter().map(|b| b.anchor).collect();
        assert_eq!(order, [SectionAnchor::About, SectionAnchor::Contact]);
    }

    #[test]
    fn test_anchor_names() {
        assert_eq!("projects".parse::<SectionAnchor>().unwrap(), SectionAnchor::Projects);
        assert_eq!("#contact".parse::<SectionAnchor>().unwrap(), SectionAnchor::Contact);
        assert!(matches!(
            "blog".parse::<SectionAnchor>(),
            Err(FolioError::UnknownSection(_))
        ));
        for anchor in SectionAnchor::ALL {
            assert_eq!(anchor.to_string().parse::<SectionAnchor>().unwrap(), anchor);
        }
    }
}
