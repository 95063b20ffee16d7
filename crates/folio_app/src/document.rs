//! Page document
//!
//! The live layout the page animates: named regions with document-space
//! bounds. Regions are addressed by dotted keys (`"about.image"`,
//! `"projects.card.1"`); numbered groups use a `.{index}` suffix.
//!
//! The embedder owns layout and keeps the rects current; everything else
//! only measures through [`Geometry`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_core::{FolioError, Geometry, Rect, Result, Size, TargetId};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tracing::trace;

/// Document shared between the page and section callbacks
pub type SharedDocument = Arc<Mutex<Document>>;

/// Lock a shared document, recovering from poisoning
pub fn lock(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug)]
struct Region {
    key: String,
    rect: Rect,
}

/// Named regions with live bounds
#[derive(Debug, Default)]
pub struct Document {
    regions: SlotMap<TargetId, Region>,
    by_key: FxHashMap<String, TargetId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    /// Add a region, or move an existing one; the id is stable per key
    pub fn insert(&mut self, key: impl Into<String>, rect: Rect) -> TargetId {
        let key = key.into();
        if let Some(&id) = self.by_key.get(&key) {
            self.regions[id].rect = rect;
            return id;
        }
        let id = self.regions.insert(Region {
            key: key.clone(),
            rect,
        });
        self.by_key.insert(key, id);
        id
    }

    /// Remove a region; later measurements of its id return `None`
    pub fn remove(&mut self, key: &str) -> Option<TargetId> {
        let id = self.by_key.remove(key)?;
        self.regions.remove(id);
        trace!("Document: removed '{}'", key);
        Some(id)
    }

    /// Remove a region and every region nested under it (`key.*`)
    pub fn remove_subtree(&mut self, key: &str) -> usize {
        let prefix = format!("{key}.");
        let doomed: Vec<String> = self
            .by_key
            .keys()
            .filter(|k| k.as_str() == key || k.starts_with(&prefix))
            .cloned()
            .collect();
        for k in &doomed {
            self.remove(k);
        }
        doomed.len()
    }

    /// Update the bounds of an existing region
    pub fn set_rect(&mut self, key: &str, rect: Rect) -> Result<()> {
        let id = self.lookup(key)?;
        self.regions[id].rect = rect;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<TargetId> {
        self.by_key.get(key).copied()
    }

    pub fn lookup(&self, key: &str) -> Result<TargetId> {
        self.get(key)
            .ok_or_else(|| FolioError::UnknownTarget(key.to_string()))
    }

    /// Regions `prefix.0`, `prefix.1`, ... up to the first gap
    pub fn group(&self, prefix: &str) -> Vec<TargetId> {
        (0usize..)
            .map_while(|i| self.get(&format!("{prefix}.{i}")))
            .collect()
    }

    pub fn key_of(&self, id: TargetId) -> Option<&str> {
        self.regions.get(id).map(|r| r.key.as_str())
    }

    pub fn rect_of(&self, key: &str) -> Option<Rect> {
        self.get(key).and_then(|id| self.measure(id))
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.regions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Bottom of the lowest region
    pub fn height(&self) -> f32 {
        self.regions
            .values()
            .map(|r| r.rect.bottom())
            .fold(0.0, f32::max)
    }
}

impl Geometry for Document {
    fn measure(&self, target: TargetId) -> Option<Rect> {
        self.regions.get(target).map(|r| r.rect)
    }
}

// ============================================================================
// Default layout
// ============================================================================

/// Region counts of the standard page
pub mod counts {
    pub const ABOUT_CONTENT: usize = 3;
    pub const ABOUT_CHIPS: usize = 4;
    pub const PROJECTS: usize = 2;
    pub const EXPERIENCE: usize = 4;
    pub const AWARDS: usize = 4;
    pub const CONTACT_BLOCKS: usize = 4;
    pub const NAV_ITEMS: usize = 7;
}

/// Stacks the standard portfolio regions top to bottom
///
/// Section heights are fixed; the hero fills the first viewport. Useful for
/// headless runs and tests; a real embedder inserts measured rects instead.
#[derive(Clone, Debug)]
pub struct PortfolioLayout {
    pub viewport: Size,
    pub section_heights: [f32; 7],
    pub footer_height: f32,
}

impl PortfolioLayout {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            section_heights: [viewport.height, 900.0, 900.0, 1100.0, 1200.0, 1000.0, 900.0],
            footer_height: 300.0,
        }
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::new();
        let w = self.viewport.width;
        let [home, about, skills, projects, experience, awards, contact] = self.section_heights;
        let mut top = 0.0;

        doc.insert("home", Rect::new(0.0, top, w, home));
        doc.insert("hero.title", Rect::new(80.0, top + 200.0, w * 0.5, 120.0));
        doc.insert("hero.subtitle", Rect::new(80.0, top + 340.0, w * 0.5, 60.0));
        doc.insert("hero.portrait", Rect::new(w * 0.6, top + 120.0, 400.0, 500.0));
        top += home;

        doc.insert("about", Rect::new(0.0, top, w, about));
        doc.insert("about.image", Rect::new(80.0, top + 100.0, 400.0, 500.0));
        doc.insert("about.content", Rect::new(w * 0.5, top + 100.0, w * 0.4, 500.0));
        for i in 0..counts::ABOUT_CONTENT {
            let y = top + 100.0 + i as f32 * 160.0;
            doc.insert(format!("about.content.{i}"), Rect::new(w * 0.5, y, w * 0.4, 140.0));
        }
        doc.insert("about.chips", Rect::new(80.0, top + 620.0, 400.0, 60.0));
        for i in 0..counts::ABOUT_CHIPS {
            let x = 80.0 + i as f32 * 100.0;
            doc.insert(format!("about.chip.{i}"), Rect::new(x, top + 620.0, 90.0, 40.0));
        }
        top += about;

        doc.insert("skills", Rect::new(0.0, top, w, skills));
        doc.insert("skills.orbit", Rect::new(w * 0.5 - 200.0, top + 250.0, 400.0, 400.0));
        doc.insert("skills.ring.0", Rect::new(w * 0.5 - 150.0, top + 300.0, 300.0, 300.0));
        doc.insert("skills.ring.1", Rect::new(w * 0.5 - 200.0, top + 250.0, 400.0, 400.0));
        top += skills;

        doc.insert("projects", Rect::new(0.0, top, w, projects));
        for i in 0..counts::PROJECTS {
            let y = top + 200.0 + i as f32 * 440.0;
            doc.insert(format!("projects.card.{i}"), Rect::new(80.0, y, w - 160.0, 400.0));
        }
        top += projects;

        doc.insert("experience", Rect::new(0.0, top, w, experience));
        doc.insert("experience.timeline", Rect::new(96.0, top + 200.0, 4.0, 900.0));
        doc.insert("experience.fill", Rect::new(96.0, top + 200.0, 4.0, 900.0));
        for i in 0..counts::EXPERIENCE {
            let y = top + 200.0 + i as f32 * 225.0;
            doc.insert(format!("experience.card.{i}"), Rect::new(140.0, y, w - 220.0, 200.0));
        }
        top += experience;

        doc.insert("awards", Rect::new(0.0, top, w, awards));
        doc.insert("awards.grid", Rect::new(80.0, top + 200.0, w - 160.0, 600.0));
        for i in 0..counts::AWARDS {
            let x = 80.0 + (i % 2) as f32 * (w - 160.0) * 0.5;
            let y = top + 200.0 + (i / 2) as f32 * 300.0;
            doc.insert(format!("awards.card.{i}"), Rect::new(x, y, (w - 180.0) * 0.5, 280.0));
        }
        top += awards;

        doc.insert("contact", Rect::new(0.0, top, w, contact));
        for i in 0..counts::CONTACT_BLOCKS {
            let y = top + 150.0 + i as f32 * 160.0;
            doc.insert(format!("contact.block.{i}"), Rect::new(80.0, y, w - 160.0, 140.0));
        }
        top += contact;

        doc.insert("footer", Rect::new(0.0, top, w, self.footer_height));

        // Mobile menu overlay links; fixed to the viewport, outside the flow
        for i in 0..counts::NAV_ITEMS {
            let y = 160.0 + i as f32 * 64.0;
            doc.insert(format!("nav.mobile.{i}"), Rect::new(0.0, y, w, 48.0));
        }

        doc
    }
}
