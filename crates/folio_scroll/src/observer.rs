//! Viewport observer
//!
//! Tracks (target, activation edge) observations and reports, per tick,
//! whether each edge is crossed. Bounding-box measurement goes through the
//! [`Geometry`] trait and is cached for the duration of one tick, so a
//! target observed by several edges (or also queried by the trigger
//! registry) is measured at most once per tick.

use std::cell::{Cell, RefCell};

use folio_core::{Geometry, Rect, ScrollState, TargetId};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::edge::ActivationEdge;

new_key_type! {
    /// Handle returned by [`ViewportObserver::observe`]
    pub struct ObservationId;
}

#[derive(Clone, Copy, Debug)]
struct Observation {
    target: TargetId,
    edge: ActivationEdge,
    crossed: bool,
}

/// Result of evaluating one observation in the current tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeState {
    /// Bounds measured this tick
    pub rect: Rect,
    /// Scroll offset at which the edge is crossed
    pub crossing_offset: f32,
    /// Edge is crossed at the current scroll offset
    pub crossed: bool,
    /// Edge was not crossed at the previous evaluation
    pub newly_crossed: bool,
}

/// Per-tick measurement cache
///
/// Interior mutability lets read-only queries share one cache within a tick.
#[derive(Debug, Default)]
pub struct MeasurementCache {
    rects: RefCell<FxHashMap<TargetId, Option<Rect>>>,
    measurements: Cell<u64>,
}

impl MeasurementCache {
    /// Measure `target`, hitting the geometry query only on first use this tick
    pub fn measure<G: Geometry + ?Sized>(&self, geometry: &G, target: TargetId) -> Option<Rect> {
        if let Some(cached) = self.rects.borrow().get(&target) {
            return *cached;
        }
        let rect = geometry.measure(target);
        self.measurements.set(self.measurements.get() + 1);
        self.rects.borrow_mut().insert(target, rect);
        rect
    }

    /// Drop every cached rect; call at the start of a tick
    pub fn clear(&mut self) {
        self.rects.get_mut().clear();
    }

    /// Geometry queries issued since creation
    pub fn measurement_count(&self) -> u64 {
        self.measurements.get()
    }
}

/// Observer of activation-edge crossings
#[derive(Debug, Default)]
pub struct ViewportObserver {
    observations: SlotMap<ObservationId, Observation>,
    cache: MeasurementCache,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `edge` on `target`
    pub fn observe(&mut self, target: TargetId, edge: ActivationEdge) -> ObservationId {
        let id = self.observations.insert(Observation {
            target,
            edge,
            crossed: false,
        });
        trace!("ViewportObserver: observing {:?} at '{}' as {:?}", target, edge, id);
        id
    }

    /// Stop observing. Unobserving twice is a no-op.
    pub fn unobserve(&mut self, id: ObservationId) -> bool {
        self.observations.remove(id).is_some()
    }

    pub fn is_observing(&self, id: ObservationId) -> bool {
        self.observations.contains_key(id)
    }

    pub fn target_of(&self, id: ObservationId) -> Option<TargetId> {
        self.observations.get(id).map(|o| o.target)
    }

    /// Number of live observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Start a new tick: cached measurements from the previous tick are dropped
    pub fn begin_tick(&mut self) {
        self.cache.clear();
    }

    /// Cached measurement of any target for the current tick
    pub fn measure<G: Geometry + ?Sized>(&self, geometry: &G, target: TargetId) -> Option<Rect> {
        self.cache.measure(geometry, target)
    }

    /// Evaluate one observation against the current scroll state
    ///
    /// Returns `None` for unknown observations and for targets that are no
    /// longer in the rendered tree.
    pub fn evaluate<G: Geometry + ?Sized>(
        &mut self,
        id: ObservationId,
        geometry: &G,
        scroll: &ScrollState,
    ) -> Option<EdgeState> {
        let observation = self.observations.get_mut(id)?;
        let Some(rect) = self.cache.measure(geometry, observation.target) else {
            trace!("ViewportObserver: {:?} has no bounds, skipping", observation.target);
            return None;
        };

        let viewport_height = scroll.viewport.height;
        let crossing_offset = observation.edge.scroll_offset_for(&rect, viewport_height);
        let crossed = scroll.offset_y >= crossing_offset;
        let newly_crossed = crossed && !observation.crossed;
        observation.crossed = crossed;

        Some(EdgeState {
            rect,
            crossing_offset,
            crossed,
            newly_crossed,
        })
    }

    /// Evaluate every observation; one batched pass per tick
    pub fn sample<G: Geometry + ?Sized>(
        &mut self,
        geometry: &G,
        scroll: &ScrollState,
    ) -> Vec<(ObservationId, EdgeState)> {
        self.begin_tick();
        let ids: Vec<ObservationId> = self.observations.keys().collect();
        ids.into_iter()
            .filter_map(|id| self.evaluate(id, geometry, scroll).map(|state| (id, state)))
            .collect()
    }

    /// Geometry queries issued so far
    pub fn measurement_count(&self) -> u64 {
        self.cache.measurement_count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use folio_core::Size;

    /// Layout stand-in that counts measurement calls
    #[derive(Default)]
    pub(crate) struct FakeLayout {
        pub(crate) rects: SlotMap<TargetId, Rect>,
        pub(crate) calls: Cell<usize>,
    }

    impl FakeLayout {
        pub(crate) fn add(&mut self, rect: Rect) -> TargetId {
            self.rects.insert(rect)
        }

        pub(crate) fn remove(&mut self, target: TargetId) {
            self.rects.remove(target);
        }
    }

    impl Geometry for FakeLayout {
        fn measure(&self, target: TargetId) -> Option<Rect> {
            self.calls.set(self.calls.get() + 1);
            self.rects.get(target).copied()
        }
    }

    pub(crate) fn scroll_at(offset: f32) -> ScrollState {
        ScrollState::new(offset, Size::new(1280.0, 800.0), 2400.0)
    }

    #[test]
    fn test_measures_each_target_once_per_tick() {
        let mut layout = FakeLayout::default();
        let card = layout.add(Rect::new(0.0, 1200.0, 300.0, 400.0));
        let mut observer = ViewportObserver::new();
        observer.observe(card, ActivationEdge::top_at(0.8));
        observer.observe(card, ActivationEdge::bottom_at(0.3));
        observer.observe(card, ActivationEdge::top_at(0.5));

        observer.sample(&layout, &scroll_at(0.0));
        assert_eq!(layout.calls.get(), 1);

        observer.sample(&layout, &scroll_at(10.0));
        assert_eq!(layout.calls.get(), 2);
        assert_eq!(observer.measurement_count(), 2);
    }

    #[test]
    fn test_newly_crossed_only_on_transition() {
        let mut layout = FakeLayout::default();
        let card = layout.add(Rect::new(0.0, 1200.0, 300.0, 400.0));
        let mut observer = ViewportObserver::new();
        let id = observer.observe(card, ActivationEdge::top_at(0.8));

        let state = |observer: &mut ViewportObserver, offset: f32| {
            observer.begin_tick();
            observer.evaluate(id, &layout, &scroll_at(offset)).unwrap()
        };

        assert!(!state(&mut observer, 500.0).crossed);
        let first = state(&mut observer, 600.0);
        assert!(first.crossed && first.newly_crossed);
        assert_eq!(first.crossing_offset, 560.0);
        assert!(!state(&mut observer, 700.0).newly_crossed);
        assert!(!state(&mut observer, 100.0).crossed);
        assert!(state(&mut observer, 600.0).newly_crossed);
    }

    #[test]
    fn test_unobserve_is_idempotent() {
        let mut layout = FakeLayout::default();
        let card = layout.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut observer = ViewportObserver::new();
        let id = observer.observe(card, ActivationEdge::top_at(0.8));

        assert!(observer.unobserve(id));
        assert!(!observer.unobserve(id));
        assert!(observer.is_empty());
        assert!(observer.evaluate(id, &layout, &scroll_at(0.0)).is_none());
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let mut layout = FakeLayout::default();
        let gone = layout.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        let kept = layout.add(Rect::new(0.0, 100.0, 10.0, 10.0));
        let mut observer = ViewportObserver::new();
        observer.observe(gone, ActivationEdge::top_at(0.8));
        let kept_id = observer.observe(kept, ActivationEdge::top_at(0.8));
        layout.remove(gone);

        let states = observer.sample(&layout, &scroll_at(0.0));
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].0, kept_id);
    }
}
