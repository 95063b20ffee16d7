//! Animation scheduler
//!
//! Owns every running entrance animation and the resolved visual state of
//! each animated target. Triggers hand animations to the scheduler and move
//! on immediately; the page ticks the scheduler once per frame.
//!
//! Components that need to schedule work from event callbacks hold a
//! [`SchedulerHandle`], a weak reference that silently no-ops once the
//! scheduler is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use folio_core::TargetId;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::easing::Easing;
use crate::keyframe::{EntranceAnimation, KeyframeAnimation};
use crate::style::{StylePatch, VisualState};

new_key_type! {
    /// Handle to a scheduled animation
    pub struct AnimationId;
}

/// How an animation relates to others on the same target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AnimationKind {
    /// One-shot entrance; runs alongside anything else on the target
    Entrance,
    /// Retargetable tween; a new tween on the target replaces the old one
    Tween,
}

struct ActiveAnimation {
    target: TargetId,
    kind: AnimationKind,
    keyframes: KeyframeAnimation,
}

/// Internal state of the animation scheduler
#[derive(Default)]
struct SchedulerInner {
    animations: SlotMap<AnimationId, ActiveAnimation>,
    styles: FxHashMap<TargetId, VisualState>,
    frames: u64,
}

impl SchedulerInner {
    fn schedule(
        &mut self,
        target: TargetId,
        kind: AnimationKind,
        animation: EntranceAnimation,
    ) -> AnimationId {
        // Start keyframe is rendered as soon as the animation is scheduled
        let start = animation.sample(0.0);
        self.styles.entry(target).or_default().apply(&start);

        let mut keyframes = KeyframeAnimation::new(animation);
        keyframes.start();
        self.animations.insert(ActiveAnimation {
            target,
            kind,
            keyframes,
        })
    }

    fn animate_to(
        &mut self,
        target: TargetId,
        to: StylePatch,
        duration_ms: u32,
        easing: Easing,
    ) -> AnimationId {
        let replaced: Vec<AnimationId> = self
            .animations
            .iter()
            .filter(|(_, a)| a.target == target && a.kind == AnimationKind::Tween)
            .map(|(id, _)| id)
            .collect();
        for id in replaced {
            self.animations.remove(id);
        }

        let current = self.styles.get(&target).copied().unwrap_or_default();
        let mut from = StylePatch::new();
        for property in to.properties() {
            from.set(property, current.get(property));
        }

        let animation = EntranceAnimation::new(duration_ms)
            .from(from)
            .to(to)
            .easing(easing);
        self.schedule(target, AnimationKind::Tween, animation)
    }

    fn cancel_target(&mut self, target: TargetId) -> usize {
        let before = self.animations.len();
        self.animations.retain(|_, a| a.target != target);
        before - self.animations.len()
    }

    fn tick(&mut self, dt_ms: f32) -> bool {
        self.frames += 1;

        let styles = &mut self.styles;
        self.animations.retain(|_, active| {
            active.keyframes.tick(dt_ms);
            styles
                .entry(active.target)
                .or_default()
                .apply(&active.keyframes.value());
            active.keyframes.is_playing()
        });

        !self.animations.is_empty()
    }
}

/// The animation scheduler that ticks all running animations
///
/// ```
/// use folio_animation::{AnimationPreset, AnimationScheduler, VisualProperty};
/// use folio_core::TargetId;
///
/// let scheduler = AnimationScheduler::new();
/// let target = TargetId::default();
/// scheduler.schedule(target, AnimationPreset::fade_in(100).animation);
/// assert_eq!(scheduler.style_of(target).get(VisualProperty::Opacity), 0.0);
///
/// scheduler.tick(100.0);
/// assert_eq!(scheduler.style_of(target).get(VisualProperty::Opacity), 1.0);
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner::default())),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance all animations by `dt_ms` and write their values to the targets
    ///
    /// Finished animations are dropped after their final value is applied.
    /// Returns true if any animations are still running.
    pub fn tick(&self, dt_ms: f32) -> bool {
        self.lock().tick(dt_ms)
    }

    /// Start a one-shot entrance animation on `target`
    pub fn schedule(&self, target: TargetId, animation: EntranceAnimation) -> AnimationId {
        let id = self
            .lock()
            .schedule(target, AnimationKind::Entrance, animation);
        trace!("scheduled entrance {:?} on {:?}", id, target);
        id
    }

    /// Tween `target` from its current values to `to`, replacing any
    /// previous tween on the same target
    pub fn animate_to(
        &self,
        target: TargetId,
        to: StylePatch,
        duration_ms: u32,
        easing: Easing,
    ) -> AnimationId {
        self.lock().animate_to(target, to, duration_ms, easing)
    }

    /// Cancel one animation. The target keeps its current visual state.
    /// Cancelling an unknown or finished animation is a no-op.
    pub fn cancel(&self, id: AnimationId) -> bool {
        let removed = self.lock().animations.remove(id).is_some();
        if removed {
            trace!("cancelled animation {:?}", id);
        }
        removed
    }

    /// Cancel every animation on `target`; returns how many were running
    pub fn cancel_target(&self, target: TargetId) -> usize {
        self.lock().cancel_target(target)
    }

    /// Cancel everything on `target` and drop its visual state
    pub fn forget_target(&self, target: TargetId) {
        let mut inner = self.lock();
        inner.cancel_target(target);
        inner.styles.remove(&target);
    }

    /// Write `patch` directly to `target` (progress-linked effects)
    pub fn set_style(&self, target: TargetId, patch: &StylePatch) {
        self.lock().styles.entry(target).or_default().apply(patch);
    }

    /// Resolved visual state; identity for targets never animated
    pub fn style_of(&self, target: TargetId) -> VisualState {
        self.lock().styles.get(&target).copied().unwrap_or_default()
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.lock().animations.contains_key(id)
    }

    pub fn has_active_animations(&self) -> bool {
        !self.lock().animations.is_empty()
    }

    /// Number of running animations
    pub fn animation_count(&self) -> usize {
        self.lock().animations.len()
    }

    /// Number of running animations on `target`
    pub fn animation_count_for(&self, target: TargetId) -> usize {
        self.lock()
            .animations
            .values()
            .filter(|a| a.target == target)
            .count()
    }

    /// Number of targets carrying a visual state
    pub fn styled_target_count(&self) -> usize {
        self.lock().styles.len()
    }

    /// Ticks run so far
    pub fn frame_count(&self) -> u64 {
        self.lock().frames
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("AnimationScheduler")
            .field("animations", &inner.animations.len())
            .field("styled_targets", &inner.styles.len())
            .finish()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to start animations from event
/// callbacks. It won't prevent the scheduler from being dropped.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    fn with<R>(&self, f: impl FnOnce(&mut SchedulerInner) -> R) -> Option<R> {
        let inner = self.inner.upgrade()?;
        let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut guard))
    }

    /// Start a one-shot entrance animation
    pub fn schedule(&self, target: TargetId, animation: EntranceAnimation) -> Option<AnimationId> {
        self.with(|inner| inner.schedule(target, AnimationKind::Entrance, animation))
    }

    /// Retargetable tween from the current values to `to`
    pub fn animate_to(
        &self,
        target: TargetId,
        to: StylePatch,
        duration_ms: u32,
        easing: Easing,
    ) -> Option<AnimationId> {
        self.with(|inner| inner.animate_to(target, to, duration_ms, easing))
    }

    pub fn cancel(&self, id: AnimationId) -> bool {
        self.with(|inner| inner.animations.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn cancel_target(&self, target: TargetId) -> usize {
        self.with(|inner| inner.cancel_target(target)).unwrap_or(0)
    }

    pub fn forget_target(&self, target: TargetId) {
        self.with(|inner| {
            inner.cancel_target(target);
            inner.styles.remove(&target);
        });
    }

    pub fn set_style(&self, target: TargetId, patch: &StylePatch) {
        self.with(|inner| inner.styles.entry(target).or_default().apply(patch));
    }

    pub fn style_of(&self, target: TargetId) -> VisualState {
        self.with(|inner| inner.styles.get(&target).copied())
            .flatten()
            .unwrap_or_default()
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
