//! Skills orbit
//!
//! Two decorative rings counter-rotate with scroll progress across the
//! whole time the orbit is on screen.

use folio_animation::StylePatch;
use folio_core::Result;
use folio_scroll::{ActivationEdge, ElementEdge, SectionAnchor};

use super::{track_root, Section};
use crate::lifecycle::MountContext;

/// Degrees each ring turns over the full progress range
const RING_TURNS: [f32; 2] = [180.0, -120.0];

#[derive(Debug, Default)]
pub struct SkillsSection;

impl Section for SkillsSection {
    fn anchor(&self) -> SectionAnchor {
        SectionAnchor::Skills
    }

    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()> {
        track_root(ctx, SectionAnchor::Skills)?;

        let Some(orbit) = ctx.target("skills.orbit") else {
            return Ok(());
        };
        // "top bottom" .. "bottom top"
        let start = ActivationEdge::new(ElementEdge::Top, 1.0);
        let end = ActivationEdge::new(ElementEdge::Bottom, 0.0);

        for (ring, degrees) in ctx.group("skills.ring").into_iter().zip(RING_TURNS) {
            ctx.continuous(orbit, start, end, ring, move |progress| {
                StylePatch::new().rotate(progress * degrees)
            })?;
        }
        Ok(())
    }
}
