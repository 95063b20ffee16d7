//! The portfolio page
//!
//! Owns the shared scroll/pointer snapshot (its only writer), the runtime
//! registries and the mounted sections. The embedder feeds input through
//! [`Page::handle_event`] and drives time through [`Page::frame`]:
//!
//! 1. input events update the snapshot immediately and mark triggers dirty,
//! 2. the next frame advances the smooth scroll, evaluates triggers and the
//!    active section once against one snapshot, ticks animations, then runs
//!    the frame callbacks (particles, tilt).
//!
//! Several scroll events between two frames cost one evaluation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_animation::{AnimationPreset, AnimationScheduler, VisualState};
use folio_core::{
    Event, FrameSnapshot, Geometry, RecordingContext, Result, ScrollState, Size,
};
use folio_scroll::{SectionAnchor, SmoothScroll, TickReport};
use tracing::{debug, trace, warn};

use crate::config::FolioConfig;
use crate::cursor::{progress_bar_width, Cursor};
use crate::document::{lock, Document, PortfolioLayout, SharedDocument};
use crate::form::ContactForm;
use crate::lifecycle::{MountContext, ReleaseReport, Runtime, SectionLifecycle};
use crate::nav::{NavBar, NavLink, NavSurface, NavTarget};
use crate::sections::{standard_sections, Section, SharedCanvas};

struct Slot {
    section: Box<dyn Section>,
    lifecycle: SectionLifecycle,
    mounted: bool,
}

/// The animated single-page portfolio
pub struct Page {
    config: FolioConfig,
    document: SharedDocument,
    runtime: Runtime,
    snapshot: FrameSnapshot,
    nav: NavBar,
    cursor: Cursor,
    smooth: SmoothScroll,
    canvas: SharedCanvas,
    form: ContactForm,
    slots: Vec<Slot>,
    dirty: bool,
}

impl Page {
    /// Page with the standard sections over `document`
    pub fn new(config: FolioConfig, document: Document, viewport: Size) -> Self {
        let canvas = Arc::new(Mutex::new(RecordingContext::new(viewport)));
        let sections = standard_sections(Arc::clone(&canvas));
        Self::build(config, document, viewport, canvas, sections)
    }

    /// Standard sections over the default stacked layout
    pub fn standard(config: FolioConfig, viewport: Size) -> Self {
        Self::new(config, PortfolioLayout::new(viewport).build(), viewport)
    }

    /// Page with a custom section list
    pub fn with_sections(
        config: FolioConfig,
        document: Document,
        viewport: Size,
        sections: Vec<Box<dyn Section>>,
    ) -> Self {
        let canvas = Arc::new(Mutex::new(RecordingContext::new(viewport)));
        Self::build(config, document, viewport, canvas, sections)
    }

    fn build(
        config: FolioConfig,
        document: Document,
        viewport: Size,
        canvas: SharedCanvas,
        sections: Vec<Box<dyn Section>>,
    ) -> Self {
        let snapshot = FrameSnapshot {
            scroll: ScrollState::new(0.0, viewport, document.height()),
            pointer: None,
        };
        Self {
            runtime: Runtime::new(config.scroll.probe_fraction),
            nav: NavBar::new(config.scroll.scrolled_threshold),
            smooth: SmoothScroll::new(
                config.scroll.smooth_scroll_ms,
                config.scroll.smooth_scroll_easing,
            ),
            form: ContactForm::from_config(&config.contact),
            document: document.into_shared(),
            cursor: Cursor::default(),
            slots: sections
                .into_iter()
                .map(|section| Slot {
                    section,
                    lifecycle: SectionLifecycle::new(),
                    mounted: false,
                })
                .collect(),
            dirty: true,
            config,
            snapshot,
            canvas,
        }
    }

    // ========================================================================
    // Mounting
    // ========================================================================

    /// Mount every section that is not mounted yet; returns how many mounted
    ///
    /// A section that fails to mount is skipped; its content stays static.
    pub fn mount_all(&mut self) -> usize {
        let anchors: Vec<SectionAnchor> = self
            .slots
            .iter()
            .filter(|slot| !slot.mounted)
            .map(|slot| slot.section.anchor())
            .collect();
        anchors
            .into_iter()
            .filter(|anchor| match self.mount(*anchor) {
                Ok(()) => true,
                Err(err) => {
                    warn!("Page: section '{}' not mounted: {}", anchor, err);
                    false
                }
            })
            .count()
    }

    /// Mount one section; mounting a mounted section is a no-op
    pub fn mount(&mut self, anchor: SectionAnchor) -> Result<()> {
        let Some(slot) = self.slots.iter_mut().find(|s| s.section.anchor() == anchor) else {
            return Err(folio_core::FolioError::UnknownSection(anchor.to_string()));
        };
        if slot.mounted {
            return Ok(());
        }

        let outcome = {
            let mut ctx = MountContext::new(
                &mut self.runtime,
                &mut slot.lifecycle,
                &self.document,
                &self.config,
                self.snapshot,
            );
            slot.section.mount(&mut ctx)
        };

        match outcome {
            Ok(()) => {
                slot.mounted = true;
                self.dirty = true;
                debug!(
                    "Page: mounted '{}' ({} triggers, {} listeners, {} frame callbacks)",
                    anchor,
                    slot.lifecycle.trigger_count(),
                    slot.lifecycle.listener_count(),
                    slot.lifecycle.frame_count()
                );
                Ok(())
            }
            Err(err) => {
                slot.lifecycle.release(&mut self.runtime);
                Err(err)
            }
        }
    }

    /// Unmount one section, releasing everything it registered
    pub fn unmount(&mut self, anchor: SectionAnchor) -> Option<ReleaseReport> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.section.anchor() == anchor && s.mounted)?;
        let report = slot.lifecycle.release(&mut self.runtime);
        slot.section.unmount();
        slot.mounted = false;
        debug!("Page: unmounted '{}' ({:?})", anchor, report);
        Some(report)
    }

    pub fn unmount_all(&mut self) {
        for anchor in SectionAnchor::ALL {
            self.unmount(anchor);
        }
    }

    pub fn is_mounted(&self, anchor: SectionAnchor) -> bool {
        self.slots
            .iter()
            .any(|s| s.section.anchor() == anchor && s.mounted)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Apply an input event to the shared snapshot and notify listeners
    pub fn handle_event(&mut self, event: Event) {
        let event = match event {
            Event::Scroll { offset_y } => {
                if self.nav.is_scroll_locked() {
                    trace!("Page: scroll ignored while the menu is open");
                    return;
                }
                Event::Scroll {
                    offset_y: self.set_scroll(offset_y),
                }
            }
            Event::Resize { size } => {
                self.snapshot.scroll.viewport = size;
                self.refresh_document_height();
                let offset = self.snapshot.scroll.offset_y;
                self.set_scroll(offset);
                event
            }
            Event::PointerMove { position } => {
                self.snapshot.pointer = Some(position);
                self.cursor.handle(&event);
                event
            }
            Event::PointerOver { .. } => {
                self.cursor.handle(&event);
                event
            }
            Event::KeyDown { key } => {
                if self.nav.handle_key(key) {
                    self.hide_menu_items();
                }
                event
            }
        };
        self.runtime.events.dispatch(&event);
    }

    fn set_scroll(&mut self, offset_y: f32) -> f32 {
        let offset = self.snapshot.scroll.clamp_offset(offset_y);
        self.snapshot.scroll.offset_y = offset;
        self.nav.on_scroll(offset);
        self.dirty = true;
        offset
    }

    fn refresh_document_height(&mut self) {
        self.snapshot.scroll.document_height = lock(&self.document).height();
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advance one rendered frame
    ///
    /// Returns the trigger report when scroll or layout changed since the
    /// previous frame.
    pub fn frame(&mut self, dt_ms: f32) -> Option<TickReport> {
        if let Some(offset) = self.smooth.tick(dt_ms) {
            let offset = self.set_scroll(offset);
            self.runtime.events.dispatch(&Event::Scroll { offset_y: offset });
        }

        let report = if self.dirty {
            self.dirty = false;
            Some(self.evaluate())
        } else {
            None
        };

        self.runtime.scheduler.tick(dt_ms);
        self.runtime.frames.run_frame(dt_ms, self.snapshot);
        report
    }

    /// Evaluate triggers and the active section against the current snapshot
    fn evaluate(&mut self) -> TickReport {
        let doc = lock(&self.document);
        self.snapshot.scroll.document_height = doc.height();
        let report = self.runtime.triggers.tick(&*doc, &self.snapshot.scroll);
        if let Some(anchor) = self.runtime.tracker.update(&*doc, &self.snapshot.scroll) {
            self.nav.set_active(anchor);
        }
        report
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigation click from any surface
    ///
    /// Closes the mobile menu and starts a smooth scroll; returns the
    /// destination offset, or `None` when the anchor has no region.
    pub fn click(&mut self, link: NavLink, surface: NavSurface) -> Option<f32> {
        let was_open = self.nav.is_menu_open();
        let target = self.nav.click(link, surface);
        if was_open {
            self.hide_menu_items();
        }

        let destination = match target {
            NavTarget::Top => 0.0,
            NavTarget::Section(anchor) => lock(&self.document).rect_of(anchor.as_str())?.top(),
        };
        let destination = self.snapshot.scroll.clamp_offset(destination);
        self.smooth.start(self.snapshot.scroll.offset_y, destination);
        Some(destination)
    }

    /// Mobile menu button; returns whether the menu is now open
    pub fn toggle_menu(&mut self) -> bool {
        let open = self.nav.toggle_menu();
        if open {
            self.show_menu_items();
        } else {
            self.hide_menu_items();
        }
        open
    }

    fn show_menu_items(&mut self) {
        let items = lock(&self.document).group("nav.mobile");
        let preset = AnimationPreset::mobile_menu_items();
        for (index, item) in items.iter().enumerate() {
            self.runtime.scheduler.cancel_target(*item);
            self.runtime
                .scheduler
                .schedule(*item, preset.for_index(index));
        }
    }

    fn hide_menu_items(&mut self) {
        let items = lock(&self.document).group("nav.mobile");
        let hidden = AnimationPreset::mobile_menu_items().animation.sample(0.0);
        for item in items {
            self.runtime.scheduler.cancel_target(item);
            self.runtime.scheduler.set_style(item, &hidden);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.snapshot
    }

    pub fn scroll_offset(&self) -> f32 {
        self.snapshot.scroll.offset_y
    }

    /// Width of the progress bar, in percent
    pub fn progress_percent(&self) -> f32 {
        progress_bar_width(&self.snapshot.scroll)
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn active_section(&self) -> SectionAnchor {
        self.nav.active()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.nav.is_scroll_locked()
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth.is_active()
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.form
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.runtime.scheduler
    }

    /// Particle canvas of the hero section
    pub fn canvas(&self) -> MutexGuard<'_, RecordingContext> {
        self.canvas.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn document(&self) -> MutexGuard<'_, Document> {
        lock(&self.document)
    }

    /// Change the layout; triggers re-measure on the next frame
    pub fn with_document<R>(&mut self, f: impl FnOnce(&mut Document) -> R) -> R {
        let result = f(&mut lock(&self.document));
        self.refresh_document_height();
        let offset = self.snapshot.scroll.offset_y;
        self.set_scroll(offset);
        result
    }

    /// Rendered visual state of a region
    pub fn style_of(&self, key: &str) -> Option<VisualState> {
        let doc = lock(&self.document);
        let id = doc.get(key)?;
        doc.measure(id)?;
        Some(self.runtime.scheduler.style_of(id))
    }

    pub fn listener_count(&self) -> usize {
        self.runtime.events.listener_count()
    }

    pub fn trigger_count(&self) -> usize {
        self.runtime.triggers.len()
    }

    pub fn frame_callback_count(&self) -> usize {
        self.runtime.frames.len()
    }

    /// Edge observations held by the trigger registry
    pub fn observation_count(&self) -> usize {
        self.runtime.triggers.observation_count()
    }

    pub fn tracked_section_count(&self) -> usize {
        self.runtime.tracker.len()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("snapshot", &self.snapshot)
            .field("nav", &self.nav)
            .field("runtime", &self.runtime)
            .field(
                "mounted",
                &self
                    .slots
                    .iter()
                    .filter(|s| s.mounted)
                    .map(|s| s.section.anchor())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
