use folio_animation::AnimationPreset;
use folio_core::Result;
use folio_scroll::{ActivationEdge, SectionAnchor};

use super::{track_root, Section};
use crate::lifecycle::MountContext;

/// Portrait, biography paragraphs and skill chips
#[derive(Debug, Default)]
pub struct AboutSection;

impl Section for AboutSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::About
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        track_root(ctx, SectionAnchor::About)?;

        if let Some(image) = ctx.target("about.image") {
            ctx.once(image, ActivationEdge::top_at(0.8), AnimationPreset::about_image(), &[image])?;
        }

        if let Some(content) = ctx.target("about.content") {
            let paragraphs = ctx.group("about.content");
            ctx.once(content, ActivationEdge::top_at(0.8), AnimationPreset::about_content(), &paragraphs)?;
        }

        if let Some(chips) = ctx.target("about.chips") {
            let items = ctx.group("about.chip");
            ctx.once(chips, ActivationEdge::top_at(0.85), AnimationPreset::about_chips(), &items)?;
        }

        Ok(())
    }
}
