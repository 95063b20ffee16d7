//! Section lifecycle
//!
//! Sections register triggers, listeners and frame callbacks while they are
//! mounted. Everything goes through a [`MountContext`], which records each
//! handle in the section's [`SectionLifecycle`]; unmounting releases the
//! whole ledger so repeated mount/unmount cycles never accumulate work.

use folio_animation::{
    AnimationId, AnimationPreset, AnimationScheduler, EntranceAnimation, SchedulerHandle, StylePatch,
};
use folio_core::{
    Event, EventDispatcher, EventType, FrameControl, FrameInfo, FrameLoop, FrameRequestId,
    FrameSnapshot, ListenerId, Result, TargetId,
};
use folio_scroll::{
    ActivationEdge, ActiveSectionTracker, SectionAnchor, Trigger, TriggerId, TriggerRegistry,
};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::config::FolioConfig;
use crate::document::{lock, SharedDocument};

/// The page's shared schedulers and registries
#[derive(Debug)]
pub struct Runtime {
    pub events: EventDispatcher,
    pub frames: FrameLoop,
    pub scheduler: AnimationScheduler,
    pub triggers: TriggerRegistry,
    pub tracker: ActiveSectionTracker,
}

impl Runtime {
    pub fn new(probe_fraction: f32) -> Self {
        let scheduler = AnimationScheduler::new();
        let triggers = TriggerRegistry::new(scheduler.handle());
        Self {
            events: EventDispatcher::new(),
            frames: FrameLoop::new(),
            scheduler,
            triggers,
            tracker: ActiveSectionTracker::new(probe_fraction),
        }
    }
}

/// Counts of what an unmount released
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    pub triggers: usize,
    pub listeners: usize,
    pub frames: usize,
    pub targets: usize,
}

/// Every handle a mounted section owns
#[derive(Debug, Default)]
pub struct SectionLifecycle {
    triggers: SmallVec<[TriggerId; 8]>,
    listeners: SmallVec<[ListenerId; 4]>,
    frames: SmallVec<[FrameRequestId; 2]>,
    targets: SmallVec<[TargetId; 16]>,
    anchors: SmallVec<[SectionAnchor; 1]>,
}

impl SectionLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    fn own_target(&mut self, target: TargetId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn targets(&self) -> &[TargetId] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
            && self.listeners.is_empty()
            && self.frames.is_empty()
            && self.targets.is_empty()
            && self.anchors.is_empty()
    }

    /// Release everything recorded; the ledger is left empty
    ///
    /// Animated targets are forgotten so a later mount starts from their
    /// identity state.
    pub fn release(&mut self, runtime: &mut Runtime) -> ReleaseReport {
        let report = ReleaseReport {
            triggers: self.triggers.len(),
            listeners: self.listeners.len(),
            frames: self.frames.len(),
            targets: self.targets.len(),
        };

        for id in self.triggers.drain(..) {
            runtime.triggers.unregister(id);
        }
        for id in self.listeners.drain(..) {
            runtime.events.remove_listener(id);
        }
        for id in self.frames.drain(..) {
            runtime.frames.cancel(id);
        }
        for anchor in self.anchors.drain(..) {
            runtime.tracker.untrack(anchor);
        }
        for target in self.targets.drain(..) {
            runtime.triggers.forget_target(target);
        }

        report
    }
}

/// Registration surface handed to a section while it mounts
pub struct MountContext<'a> {
    runtime: &'a mut Runtime,
    lifecycle: &'a mut SectionLifecycle,
    document: &'a SharedDocument,
    config: &'a FolioConfig,
    snapshot: FrameSnapshot,
}

impl<'a> MountContext<'a> {
    pub fn new(
        runtime: &'a mut Runtime,
        lifecycle: &'a mut SectionLifecycle,
        document: &'a SharedDocument,
        config: &'a FolioConfig,
        snapshot: FrameSnapshot,
    ) -> Self {
        Self {
            runtime,
            lifecycle,
            document,
            config,
            snapshot,
        }
    }

    pub fn config(&self) -> &FolioConfig {
        self.config
    }

    /// Shared state at mount time
    pub fn snapshot(&self) -> FrameSnapshot {
        self.snapshot
    }

    pub fn document(&self) -> SharedDocument {
        self.document.clone()
    }

    pub fn scheduler(&self) -> SchedulerHandle {
        self.runtime.scheduler.handle()
    }

    /// Region by key, if present
    pub fn target(&self, key: &str) -> Option<TargetId> {
        let target = lock(self.document).get(key);
        if target.is_none() {
            warn!("Mount: no region '{}', skipping its animation", key);
        }
        target
    }

    /// Region by key; absence is an error
    pub fn require(&self, key: &str) -> Result<TargetId> {
        lock(self.document).lookup(key)
    }

    /// Numbered regions under `prefix`
    pub fn group(&self, prefix: &str) -> Vec<TargetId> {
        lock(self.document).group(prefix)
    }

    /// Register a trigger; its effect targets are owned by this section
    pub fn register(&mut self, trigger: Trigger, targets: &[TargetId]) -> Result<TriggerId> {
        let id = self.runtime.triggers.register(trigger)?;
        self.lifecycle.triggers.push(id);
        for &target in targets {
            self.lifecycle.own_target(target);
        }
        Ok(id)
    }

    /// Play `preset` over `targets` once `observed` crosses `start`
    ///
    /// An empty group registers nothing.
    pub fn once(
        &mut self,
        observed: TargetId,
        start: ActivationEdge,
        preset: AnimationPreset,
        targets: &[TargetId],
    ) -> Result<Option<TriggerId>> {
        if targets.is_empty() {
            return Ok(None);
        }
        let trigger = Trigger::once(observed, start, preset).targets(targets.iter().copied());
        self.register(trigger, targets).map(Some)
    }

    /// Drive `target` from scroll progress between two edges of `observed`
    pub fn continuous<F>(
        &mut self,
        observed: TargetId,
        start: ActivationEdge,
        end: ActivationEdge,
        target: TargetId,
        effect: F,
    ) -> Result<TriggerId>
    where
        F: Fn(f32) -> StylePatch + Send + 'static,
    {
        let trigger = Trigger::continuous(observed, start, end, effect).targets([target]);
        self.register(trigger, &[target])
    }

    /// Start an animation right away (not scroll-driven)
    pub fn play(&mut self, target: TargetId, animation: EntranceAnimation) -> AnimationId {
        self.lifecycle.own_target(target);
        self.runtime.scheduler.schedule(target, animation)
    }

    /// Record a target animated from a callback (tilt, hover)
    pub fn own(&mut self, target: TargetId) {
        self.lifecycle.own_target(target);
    }

    pub fn listen<F>(&mut self, event_type: EventType, callback: F) -> ListenerId
    where
        F: FnMut(&Event) + Send + 'static,
    {
        let id = self.runtime.events.add_listener(event_type, callback);
        self.lifecycle.listeners.push(id);
        id
    }

    pub fn request_frame<F>(&mut self, callback: F) -> FrameRequestId
    where
        F: FnMut(&FrameInfo) -> FrameControl + Send + 'static,
    {
        let id = self.runtime.frames.request(callback);
        self.lifecycle.frames.push(id);
        id
    }

    /// Feed this section's element to the active-section tracker
    pub fn track_section(&mut self, anchor: SectionAnchor, target: TargetId) {
        self.runtime.tracker.track(anchor, target);
        if !self.lifecycle.anchors.contains(&anchor) {
            self.lifecycle.anchors.push(anchor);
        }
        debug!("Mount: tracking section '{}'", anchor);
    }
}
