use folio_animation::AnimationPreset;
use folio_core::Result;
use folio_scroll::{ActivationEdge, SectionAnchor};

use super::{track_root, Section};
use crate::lifecycle::MountContext;

#[derive(Debug, Default)]
pub struct AwardsSection;

impl Section for AwardsSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::Awards
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        track_root(ctx, SectionAnchor::Awards)?;

        if let Some(grid) = ctx.target("awards.grid") {
            let cards = ctx.group("awards.card");
            ctx.once(grid, ActivationEdge::top_at(0.75), AnimationPreset::award_cards(), &cards)?;
        }
        Ok(())
    }
}
