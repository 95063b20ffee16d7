//! Page sections
//!
//! Each section declares its animations against the regions of the
//! document when mounted. All registration goes through the
//! [`MountContext`], so the page can tear a section down completely.

mod about;
mod awards;
mod contact;
mod experience;
mod hero;
mod projects;
mod skills;

pub use about::AboutSection;
pub use awards::AwardsSection;
pub use contact::ContactSection;
pub use experience::ExperienceSection;
pub use hero::{HeroSection, SharedCanvas};
pub use projects::ProjectsSection;
pub use skills::SkillsSection;

use folio_core::Result;
use folio_scroll::SectionAnchor;

use crate::lifecycle::MountContext;

/// A mountable page section
pub trait Section: Send {
    /// Anchor the section is addressed by
    fn anchor(&self) -> SectionAnchor;

    /// Register animations, listeners and frame callbacks
    ///
    /// Fails only when the section's own region is missing; absent child
    /// regions just lose their animation.
    fn mount(&mut self, ctx: &mut MountContext<'_>) -> Result<()>;

    /// Drop section-local state after the page released the section's handles
    fn unmount(&mut self) {}
}

/// Register the section element with the active-section tracker
pub(crate) fn track_root(ctx: &mut MountContext<'_>, anchor: SectionAnchor) -> Result<folio_core::TargetId> {
    let root = ctx.require(anchor.as_str())?;
    ctx.track_section(anchor, root);
    Ok(root)
}

/// The seven sections of the portfolio, in document order
pub fn standard_sections(canvas: SharedCanvas) -> Vec<Box<dyn Section>> {
    vec![
        Box::new(HeroSection::new(canvas)),
        Box::new(AboutSection),
        Box::new(SkillsSection),
        Box::new(ProjectsSection),
        Box::new(ExperienceSection),
        Box::new(AwardsSection),
        Box::new(ContactSection),
    ]
}
