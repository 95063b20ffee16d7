use folio_animation::AnimationPreset;
use folio_core::{FrameControl, Geometry, Result};
use folio_scroll::{ActivationEdge, SectionAnchor};

use super::{track_root, Section};
use crate::document::lock;
use crate::lifecycle::MountContext;
use crate::tilt::Tilt;

/// Project cards; each card tilts toward the pointer
#[derive(Debug, Default)]
pub struct ProjectsSection;

impl Section for ProjectsSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::Projects
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        let root = track_root(ctx, SectionAnchor::Projects)?;
        let cards = ctx.group("projects.card");
        ctx.once(root, ActivationEdge::top_at(0.7), AnimationPreset::project_cards(), &cards)?;

        if cards.is_empty() {
            return Ok(());
        }

        let mut tilts: Vec<Tilt> = cards.iter().map(|&card| Tilt::card(card)).collect();
        let document = ctx.document();
        let scheduler = ctx.scheduler();
        ctx.request_frame(move |info| {
            let pointer = info.snapshot.pointer_in_document();
            let doc = lock(&document);
            for tilt in &mut tilts {
                tilt.update(doc.measure(tilt.target()), pointer, &scheduler);
            }
            FrameControl::Continue
        });
        Ok(())
    }
}
