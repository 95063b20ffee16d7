use folio_animation::{AnimationPreset, StylePatch};
use folio_core::Result;
use folio_scroll::{ActivationEdge, SectionAnchor};

use super::{track_root, Section};
use crate::lifecycle::MountContext;

/// Work history timeline
///
/// The fill bar grows from the top of the timeline in step with scroll
/// progress (`scale_y == progress`, origin at the top edge); the cards
/// slide in once.
#[derive(Debug, Default)]
pub struct ExperienceSection;

impl Section for ExperienceSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::Experience
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        let root = track_root(ctx, SectionAnchor::Experience)?;

        if let (Some(timeline), Some(fill)) =
            (ctx.target("experience.timeline"), ctx.target("experience.fill"))
        {
            ctx.continuous(
                timeline,
                ActivationEdge::top_at(0.7),
                ActivationEdge::bottom_at(0.3),
                fill,
                |progress| StylePatch::new().scale_y(progress),
            )?;
        }

        let cards = ctx.group("experience.card");
        ctx.once(root, ActivationEdge::top_at(0.7), AnimationPreset::experience_cards(), &cards)?;
        Ok(())
    }
}
