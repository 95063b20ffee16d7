//! Scroll trigger registry
//!
//! A trigger pairs an activation condition on an observed element with a
//! visual effect on one or more targets:
//!
//! - `FireOnce` triggers play an entrance animation the first time their
//!   start edge is crossed and are then skipped for the rest of their life,
//!   however often the edge is re-crossed.
//! - `Continuous` triggers map the scroll position between a start and an
//!   end edge to a progress ratio in `[0, 1]` and write the effect's style
//!   patch every tick. No easing or history is involved, so re-evaluation
//!   with the same scroll position always yields the same visual state.
//!
//! Animations are handed to the [`AnimationScheduler`](folio_animation::AnimationScheduler)
//! and run without blocking the tick. Unregistering a trigger cancels any
//! animation it started that is still running.
//!
//! A pending trigger whose observed element has left the tree is
//! unregistered by the tick that notices it, and the scheduler forgets every
//! element of that trigger that is gone.

use folio_animation::{AnimationId, AnimationPreset, SchedulerHandle, StylePatch};
use folio_core::{FolioError, Geometry, Result, ScrollState, TargetId};
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use crate::edge::ActivationEdge;
use crate::observer::{ObservationId, ViewportObserver};

new_key_type! {
    /// Handle to a registered trigger
    pub struct TriggerId;
}

/// How often a trigger's effect is applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerMode {
    /// Applied once, the first time the start edge is crossed
    FireOnce,
    /// Recomputed every tick from scroll progress
    Continuous,
}

/// Progress → style function
pub type ProgressEffect = Box<dyn Fn(f32) -> StylePatch + Send>;

/// What a trigger does to its targets
pub enum TriggerEffect {
    /// Entrance animation, staggered across the targets
    Entrance(AnimationPreset),
    /// Style patch computed from progress
    Progress(ProgressEffect),
}

impl std::fmt::Debug for TriggerEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerEffect::Entrance(preset) => f.debug_tuple("Entrance").field(preset).finish(),
            TriggerEffect::Progress(_) => f.write_str("Progress(..)"),
        }
    }
}

/// Trigger definition
///
/// ```
/// use folio_animation::{AnimationPreset, StylePatch};
/// use folio_core::TargetId;
/// use folio_scroll::{ActivationEdge, Trigger, TriggerMode};
///
/// let section = TargetId::default();
/// let reveal = Trigger::once(section, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(800));
/// assert_eq!(reveal.mode(), TriggerMode::FireOnce);
///
/// let fill = Trigger::continuous(
///     section,
///     ActivationEdge::top_at(0.7),
///     ActivationEdge::bottom_at(0.3),
///     |progress| StylePatch::new().scale_y(progress),
/// );
/// assert_eq!(fill.mode(), TriggerMode::Continuous);
/// ```
#[derive(Debug)]
pub struct Trigger {
    observed: TargetId,
    targets: SmallVec<[TargetId; 4]>,
    start: ActivationEdge,
    end: Option<ActivationEdge>,
    mode: TriggerMode,
    effect: TriggerEffect,
}

impl Trigger {
    /// Play `preset` on `observed` once its `start` edge is crossed
    pub fn once(observed: TargetId, start: ActivationEdge, preset: AnimationPreset) -> Self {
        Self {
            observed,
            targets: smallvec![observed],
            start,
            end: None,
            mode: TriggerMode::FireOnce,
            effect: TriggerEffect::Entrance(preset),
        }
    }

    /// Apply `effect(progress)` to `observed` while scrolling from `start` to `end`
    pub fn continuous<F>(
        observed: TargetId,
        start: ActivationEdge,
        end: ActivationEdge,
        effect: F,
    ) -> Self
    where
        F: Fn(f32) -> StylePatch + Send + 'static,
    {
        Self {
            observed,
            targets: smallvec![observed],
            start,
            end: Some(end),
            mode: TriggerMode::Continuous,
            effect: TriggerEffect::Progress(Box::new(effect)),
        }
    }

    /// Fully specified trigger; checked by [`TriggerRegistry::register`]
    pub fn new(
        observed: TargetId,
        start: ActivationEdge,
        end: Option<ActivationEdge>,
        mode: TriggerMode,
        effect: TriggerEffect,
    ) -> Self {
        Self {
            observed,
            targets: smallvec![observed],
            start,
            end,
            mode,
            effect,
        }
    }

    /// Apply the effect to `targets` instead of the observed element
    pub fn targets(mut self, targets: impl IntoIterator<Item = TargetId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn observed(&self) -> TargetId {
        self.observed
    }

    fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(FolioError::InvalidTrigger("no effect targets".into()));
        }
        match (self.mode, &self.effect) {
            (TriggerMode::Continuous, TriggerEffect::Entrance(_)) => Err(
                FolioError::InvalidTrigger("continuous trigger needs a progress effect".into()),
            ),
            (TriggerMode::Continuous, _) if self.end.is_none() => Err(
                FolioError::InvalidTrigger("continuous trigger needs an end edge".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Progress of `offset` between two crossing offsets, clamped to `[0, 1]`
///
/// A zero or negative span degenerates to a step at `start`.
pub fn progress_between(offset: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if offset >= start { 1.0 } else { 0.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

struct RegisteredTrigger {
    trigger: Trigger,
    start_observation: ObservationId,
    end_observation: Option<ObservationId>,
    has_fired: bool,
    animations: SmallVec<[AnimationId; 4]>,
    last_progress: Option<f32>,
}

/// Outcome of one registry tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// FireOnce triggers that fired this tick
    pub fired: usize,
    /// Continuous triggers whose style changed this tick
    pub updated: usize,
    /// Triggers unregistered because their observed element left the tree
    pub retired: usize,
}

/// Registry of scroll triggers, evaluated once per scroll/resize tick
pub struct TriggerRegistry {
    triggers: SlotMap<TriggerId, RegisteredTrigger>,
    observer: ViewportObserver,
    scheduler: SchedulerHandle,
}

impl TriggerRegistry {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self {
            triggers: SlotMap::with_key(),
            observer: ViewportObserver::new(),
            scheduler,
        }
    }

    /// Register a trigger; it is first evaluated on the next tick
    pub fn register(&mut self, trigger: Trigger) -> Result<TriggerId> {
        trigger.validate()?;

        let start_observation = self.observer.observe(trigger.observed, trigger.start);
        let end_observation = match (trigger.mode, trigger.end) {
            (TriggerMode::Continuous, Some(end)) => {
                Some(self.observer.observe(trigger.observed, end))
            }
            _ => None,
        };
        let mode = trigger.mode;

        let id = self.triggers.insert(RegisteredTrigger {
            trigger,
            start_observation,
            end_observation,
            has_fired: false,
            animations: SmallVec::new(),
            last_progress: None,
        });
        debug!("TriggerRegistry: registered {:?} trigger {:?}", mode, id);
        Ok(id)
    }

    /// Remove a trigger and cancel any animation it started that is still
    /// running. Unregistering twice is a no-op.
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        if self.remove_entry(id).is_none() {
            return false;
        }
        debug!("TriggerRegistry: unregistered trigger {:?}", id);
        true
    }

    fn remove_entry(&mut self, id: TriggerId) -> Option<RegisteredTrigger> {
        let entry = self.triggers.remove(id)?;
        self.observer.unobserve(entry.start_observation);
        if let Some(end) = entry.end_observation {
            self.observer.unobserve(end);
        }
        for animation in &entry.animations {
            self.scheduler.cancel(*animation);
        }
        Some(entry)
    }

    /// Drop `target`'s visual state and cancel its animations
    ///
    /// Continuous triggers writing to `target` rewrite it on the next tick
    /// even when their progress has not moved.
    pub fn forget_target(&mut self, target: TargetId) {
        self.scheduler.forget_target(target);
        for entry in self.triggers.values_mut() {
            if entry.trigger.targets.contains(&target) {
                entry.last_progress = None;
            }
        }
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.triggers.contains_key(id)
    }

    /// Whether a FireOnce trigger has fired; false for unknown ids
    pub fn has_fired(&self, id: TriggerId) -> bool {
        self.triggers.get(id).is_some_and(|t| t.has_fired)
    }

    /// Last progress applied by a Continuous trigger
    pub fn progress_of(&self, id: TriggerId) -> Option<f32> {
        self.triggers.get(id).and_then(|t| t.last_progress)
    }

    /// Number of registered triggers
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Number of live edge observations
    pub fn observation_count(&self) -> usize {
        self.observer.len()
    }

    /// Geometry queries issued so far
    pub fn measurement_count(&self) -> u64 {
        self.observer.measurement_count()
    }

    /// Evaluate every trigger against one scroll snapshot
    ///
    /// Each element is measured at most once per tick. Triggers whose
    /// observed element is missing are unregistered without affecting the
    /// rest.
    pub fn tick<G: Geometry + ?Sized>(&mut self, geometry: &G, scroll: &ScrollState) -> TickReport {
        self.observer.begin_tick();
        let mut report = TickReport::default();
        let mut retired: SmallVec<[TriggerId; 4]> = SmallVec::new();
        let mut vanished: SmallVec<[TargetId; 4]> = SmallVec::new();

        for (id, entry) in self.triggers.iter_mut() {
            if entry.trigger.mode == TriggerMode::FireOnce && entry.has_fired {
                continue;
            }

            let Some(start) = self
                .observer
                .evaluate(entry.start_observation, geometry, scroll)
            else {
                retired.push(id);
                continue;
            };

            match entry.trigger.mode {
                TriggerMode::FireOnce => {
                    if !start.crossed {
                        continue;
                    }
                    entry.has_fired = true;
                    report.fired += 1;
                    debug!(
                        "TriggerRegistry: trigger {:?} fired at offset {}",
                        id, scroll.offset_y
                    );
                    Self::fire(entry, &self.observer, &self.scheduler, geometry);
                }
                TriggerMode::Continuous => {
                    let end = entry
                        .end_observation
                        .and_then(|end| self.observer.evaluate(end, geometry, scroll));
                    let Some(end) = end else {
                        retired.push(id);
                        continue;
                    };

                    let observer = &self.observer;
                    entry.trigger.targets.retain(|target| {
                        let present = observer.measure(geometry, *target).is_some();
                        if !present {
                            vanished.push(*target);
                        }
                        present
                    });
                    if entry.trigger.targets.is_empty() {
                        retired.push(id);
                        continue;
                    }

                    let progress =
                        progress_between(scroll.offset_y, start.crossing_offset, end.crossing_offset);
                    if entry.last_progress == Some(progress) {
                        continue;
                    }
                    entry.last_progress = Some(progress);
                    report.updated += 1;
                    trace!("TriggerRegistry: trigger {:?} progress {}", id, progress);

                    if let TriggerEffect::Progress(effect) = &entry.trigger.effect {
                        let patch = effect(progress);
                        for target in &entry.trigger.targets {
                            self.scheduler.set_style(*target, &patch);
                        }
                    }
                }
            }
        }

        for target in vanished {
            self.forget_target(target);
        }
        report.retired = retired.len();
        for id in retired {
            self.retire(id, geometry);
        }

        report
    }

    fn retire<G: Geometry + ?Sized>(&mut self, id: TriggerId, geometry: &G) {
        let Some(entry) = self.remove_entry(id) else {
            return;
        };
        debug!("TriggerRegistry: trigger {:?} retired, its element left the tree", id);
        let gone: SmallVec<[TargetId; 4]> = std::iter::once(entry.trigger.observed)
            .chain(entry.trigger.targets.iter().copied())
            .filter(|target| self.observer.measure(geometry, *target).is_none())
            .collect();
        for target in gone {
            self.forget_target(target);
        }
    }

    fn fire<G: Geometry + ?Sized>(
        entry: &mut RegisteredTrigger,
        observer: &ViewportObserver,
        scheduler: &SchedulerHandle,
        geometry: &G,
    ) {
        // Targets that left the tree never receive the effect
        let present: SmallVec<[TargetId; 4]> = entry
            .trigger
            .targets
            .iter()
            .copied()
            .filter(|target| observer.measure(geometry, *target).is_some())
            .collect();

        match &entry.trigger.effect {
            TriggerEffect::Entrance(preset) => {
                for (index, target) in present.into_iter().enumerate() {
                    if let Some(animation) = scheduler.schedule(target, preset.for_index(index)) {
                        entry.animations.push(animation);
                    }
                }
            }
            TriggerEffect::Progress(effect) => {
                let patch = effect(1.0);
                for target in present {
                    scheduler.set_style(target, &patch);
                }
            }
        }
    }
}

impl std::fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("triggers", &self.triggers.len())
            .field("observations", &self.observer.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::tests::{scroll_at, FakeLayout};
    use folio_animation::{AnimationScheduler, VisualProperty};
    use folio_core::Rect;

    fn setup() -> (AnimationScheduler, TriggerRegistry, FakeLayout) {
        let scheduler = AnimationScheduler::new();
        let registry = TriggerRegistry::new(scheduler.handle());
        (scheduler, registry, FakeLayout::default())
    }

    #[test]
    fn test_fire_once_crosses_at_560() {
        let (scheduler, mut registry, mut layout) = setup();
        let card = layout.add(Rect::new(0.0, 1200.0, 1280.0, 400.0));
        let id = registry
            .register(Trigger::once(
                card,
                ActivationEdge::top_at(0.8),
                AnimationPreset::fade_up(800, 50.0),
            ))
            .unwrap();

        assert_eq!(registry.tick(&layout, &scroll_at(559.0)).fired, 0);
        assert!(!registry.has_fired(id));
        // Content stays untouched until the trigger fires
        assert!(scheduler.style_of(card).is_identity());

        assert_eq!(registry.tick(&layout, &scroll_at(560.0)).fired, 1);
        assert!(registry.has_fired(id));
        assert_eq!(scheduler.animation_count(), 1);

        scheduler.tick(1000.0);
        assert!(scheduler.style_of(card).is_identity());

        // Re-crossing never fires again
        for offset in [1600.0, 0.0, 1600.0, 100.0, 900.0] {
            assert_eq!(registry.tick(&layout, &scroll_at(offset)).fired, 0);
        }
        assert!(registry.has_fired(id));
        assert_eq!(scheduler.animation_count(), 0);
    }

    #[test]
    fn test_already_past_edge_fires_on_first_tick() {
        let (_scheduler, mut registry, mut layout) = setup();
        let card = layout.add(Rect::new(0.0, 1200.0, 1280.0, 400.0));
        let id = registry
            .register(Trigger::once(card, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(100)))
            .unwrap();

        registry.tick(&layout, &scroll_at(1600.0));
        assert!(registry.has_fired(id));
    }

    #[test]
    fn test_continuous_progress_is_exact_and_idempotent() {
        let (scheduler, mut registry, mut layout) = setup();
        // Timeline 1000..2000; "top 70%" crosses at 440, "bottom 30%" at 1760
        let timeline = layout.add(Rect::new(0.0, 1000.0, 1280.0, 1000.0));
        let fill = layout.add(Rect::new(0.0, 1000.0, 4.0, 1000.0));
        let id = registry
            .register(
                Trigger::continuous(
                    timeline,
                    ActivationEdge::top_at(0.7),
                    ActivationEdge::bottom_at(0.3),
                    |progress| StylePatch::new().scale_y(progress),
                )
                .targets([fill]),
            )
            .unwrap();

        registry.tick(&layout, &scroll_at(1100.0));
        let expected = (1100.0 - 440.0) / (1760.0 - 440.0);
        assert_eq!(registry.progress_of(id), Some(expected));
        assert_eq!(scheduler.style_of(fill).get(VisualProperty::ScaleY), expected);

        let report = registry.tick(&layout, &scroll_at(1100.0));
        assert_eq!(report.updated, 0);
        assert_eq!(scheduler.style_of(fill).get(VisualProperty::ScaleY), expected);

        registry.tick(&layout, &scroll_at(0.0));
        assert_eq!(scheduler.style_of(fill).get(VisualProperty::ScaleY), 0.0);
        registry.tick(&layout, &scroll_at(5000.0));
        assert_eq!(scheduler.style_of(fill).get(VisualProperty::ScaleY), 1.0);
    }

    #[test]
    fn test_unregister_before_fire_never_applies() {
        let (scheduler, mut registry, mut layout) = setup();
        let card = layout.add(Rect::new(0.0, 1200.0, 1280.0, 400.0));
        let id = registry
            .register(Trigger::once(card, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(800)))
            .unwrap();

        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        registry.tick(&layout, &scroll_at(1600.0));

        assert_eq!(scheduler.animation_count(), 0);
        assert!(scheduler.style_of(card).is_identity());
        assert_eq!(registry.observation_count(), 0);
    }

    #[test]
    fn test_unregister_cancels_running_animations() {
        let (scheduler, mut registry, mut layout) = setup();
        let section = layout.add(Rect::new(0.0, 1200.0, 1280.0, 400.0));
        let cards: Vec<TargetId> = (0..3)
            .map(|i| layout.add(Rect::new(i as f32 * 300.0, 1300.0, 280.0, 200.0)))
            .collect();
        let id = registry
            .register(
                Trigger::once(section, ActivationEdge::top_at(0.7), AnimationPreset::project_cards())
                    .targets(cards.iter().copied()),
            )
            .unwrap();

        registry.tick(&layout, &scroll_at(1600.0));
        assert_eq!(scheduler.animation_count(), 3);

        registry.unregister(id);
        assert_eq!(scheduler.animation_count(), 0);
    }

    #[test]
    fn test_missing_targets_are_unregistered() {
        let (scheduler, mut registry, mut layout) = setup();
        let gone = layout.add(Rect::new(0.0, 100.0, 10.0, 10.0));
        let kept = layout.add(Rect::new(0.0, 100.0, 10.0, 10.0));
        let gone_trigger = registry
            .register(Trigger::once(gone, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(10)))
            .unwrap();
        registry
            .register(Trigger::once(kept, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(10)))
            .unwrap();
        layout.remove(gone);

        let report = registry.tick(&layout, &scroll_at(0.0));
        assert_eq!(report, TickReport { fired: 1, updated: 0, retired: 1 });
        assert!(!registry.contains(gone_trigger));
        assert!(!registry.has_fired(gone_trigger));
        assert_eq!(scheduler.animation_count_for(gone), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.observation_count(), 1);
    }

    #[test]
    fn test_removed_target_is_not_measured_again() {
        let (scheduler, mut registry, mut layout) = setup();
        let card = layout.add(Rect::new(0.0, 1200.0, 1280.0, 400.0));
        let id = registry
            .register(Trigger::once(card, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(10)))
            .unwrap();
        layout.remove(card);

        for _ in 0..100 {
            registry.tick(&layout, &scroll_at(1600.0));
        }
        assert!(!registry.contains(id));
        assert_eq!(layout.calls.get(), 1);
        assert_eq!(scheduler.styled_target_count(), 0);
        // The lifecycle ledger may still unregister it
        assert!(!registry.unregister(id));
    }

    #[test]
    fn test_continuous_drops_effect_targets_that_left_the_tree() {
        let (scheduler, mut registry, mut layout) = setup();
        let timeline = layout.add(Rect::new(0.0, 1000.0, 1280.0, 1000.0));
        let fill = layout.add(Rect::new(0.0, 1000.0, 4.0, 1000.0));
        let marker = layout.add(Rect::new(0.0, 1000.0, 8.0, 8.0));
        let id = registry
            .register(
                Trigger::continuous(
                    timeline,
                    ActivationEdge::top_at(0.7),
                    ActivationEdge::bottom_at(0.3),
                    |progress| StylePatch::new().scale_y(progress),
                )
                .targets([fill, marker]),
            )
            .unwrap();

        registry.tick(&layout, &scroll_at(1100.0));
        assert_eq!(scheduler.styled_target_count(), 2);

        layout.remove(marker);
        registry.tick(&layout, &scroll_at(1200.0));
        assert!(registry.contains(id));
        assert_eq!(scheduler.styled_target_count(), 1);
        assert!(scheduler.style_of(marker).is_identity());

        layout.remove(fill);
        let report = registry.tick(&layout, &scroll_at(1300.0));
        assert_eq!(report.retired, 1);
        assert!(!registry.contains(id));
        assert_eq!(scheduler.styled_target_count(), 0);
    }

    #[test]
    fn test_forgotten_target_is_rewritten_at_same_progress() {
        let (scheduler, mut registry, mut layout) = setup();
        let timeline = layout.add(Rect::new(0.0, 1000.0, 1280.0, 1000.0));
        let fill = layout.add(Rect::new(0.0, 1000.0, 4.0, 1000.0));
        let id = registry
            .register(
                Trigger::continuous(
                    timeline,
                    ActivationEdge::top_at(0.7),
                    ActivationEdge::bottom_at(0.3),
                    |progress| StylePatch::new().scale_y(progress),
                )
                .targets([fill]),
            )
            .unwrap();

        registry.tick(&layout, &scroll_at(5000.0));
        assert_eq!(scheduler.style_of(fill).get(VisualProperty::ScaleY), 1.0);

        registry.forget_target(fill);
        assert_eq!(registry.progress_of(id), None);
        assert!(scheduler.style_of(fill).is_identity());

        let report = registry.tick(&layout, &scroll_at(5000.0));
        assert_eq!(report.updated, 1);
        assert_eq!(scheduler.style_of(fill).get(VisualProperty::ScaleY), 1.0);
    }

    #[test]
    fn test_effect_targets_that_left_the_tree_are_not_animated() {
        let (scheduler, mut registry, mut layout) = setup();
        let section = layout.add(Rect::new(0.0, 0.0, 1280.0, 400.0));
        let a = layout.add(Rect::new(0.0, 10.0, 10.0, 10.0));
        let b = layout.add(Rect::new(0.0, 20.0, 10.0, 10.0));
        registry
            .register(
                Trigger::once(section, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(10))
                    .targets([a, b]),
            )
            .unwrap();
        layout.remove(b);

        registry.tick(&layout, &scroll_at(0.0));
        assert_eq!(scheduler.animation_count_for(a), 1);
        assert_eq!(scheduler.animation_count_for(b), 0);
    }

    #[test]
    fn test_shared_observed_element_measured_once() {
        let (_scheduler, mut registry, mut layout) = setup();
        let skills = layout.add(Rect::new(0.0, 800.0, 1280.0, 800.0));
        for factor in [180.0, -120.0] {
            registry
                .register(Trigger::continuous(
                    skills,
                    "top bottom".parse().unwrap(),
                    "bottom top".parse().unwrap(),
                    move |p| StylePatch::new().rotate(p * factor),
                ))
                .unwrap();
        }

        registry.tick(&layout, &scroll_at(400.0));
        assert_eq!(layout.calls.get(), 1);
        registry.tick(&layout, &scroll_at(500.0));
        assert_eq!(layout.calls.get(), 2);
    }

    #[test]
    fn test_register_rejects_inconsistent_triggers() {
        let (_scheduler, mut registry, mut layout) = setup();
        let card = layout.add(Rect::new(0.0, 0.0, 10.0, 10.0));

        let no_end = Trigger::new(
            card,
            ActivationEdge::top_at(0.8),
            None,
            TriggerMode::Continuous,
            TriggerEffect::Progress(Box::new(|p| StylePatch::new().opacity(p))),
        );
        assert!(matches!(registry.register(no_end), Err(FolioError::InvalidTrigger(_))));

        let entrance = Trigger::new(
            card,
            ActivationEdge::top_at(0.8),
            Some(ActivationEdge::bottom_at(0.2)),
            TriggerMode::Continuous,
            TriggerEffect::Entrance(AnimationPreset::fade_in(10)),
        );
        assert!(registry.register(entrance).is_err());

        let no_targets = Trigger::once(card, ActivationEdge::top_at(0.8), AnimationPreset::fade_in(10))
            .targets([]);
        assert!(registry.register(no_targets).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_progress_between() {
        assert_eq!(progress_between(50.0, 0.0, 100.0), 0.5);
        assert_eq!(progress_between(-10.0, 0.0, 100.0), 0.0);
        assert_eq!(progress_between(200.0, 0.0, 100.0), 1.0);
        // Degenerate span steps at start
        assert_eq!(progress_between(99.0, 100.0, 100.0), 0.0);
        assert_eq!(progress_between(100.0, 100.0, 50.0), 1.0);
    }
}
