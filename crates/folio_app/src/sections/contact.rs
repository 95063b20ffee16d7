use folio_animation::AnimationPreset;
use folio_core::Result;
use folio_scroll::{ActivationEdge, SectionAnchor};

use super::{track_root, Section};
use crate::lifecycle::MountContext;

/// Contact details and the message form
#[derive(Debug, Default)]
pub struct ContactSection;

impl Section for ContactSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::Contact
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        let root = track_root(ctx, SectionAnchor::Contact)?;
        let blocks = ctx.group("contact.block");
        ctx.once(root, ActivationEdge::top_at(0.7), AnimationPreset::contact_blocks(), &blocks)?;
        Ok(())
    }
}
