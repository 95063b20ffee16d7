//! Folio Application
//!
//! The animated single-page portfolio: the seven sections and their scroll
//! animations, the navigation bar with its mobile menu, the custom cursor
//! and progress bar, and the contact form.
//!
//! # Example
//!
//! ```rust
//! use folio_app::prelude::*;
//!
//! let viewport = Size::new(1280.0, 800.0);
//! let mut page = Page::standard(FolioConfig::default(), viewport);
//! page.mount_all();
//!
//! page.handle_event(Event::Scroll { offset_y: 900.0 });
//! page.frame(16.0);
//! assert_eq!(page.active_section(), SectionAnchor::About);
//!
//! page.unmount_all();
//! assert_eq!(page.trigger_count(), 0);
//! ```

pub mod config;
pub mod cursor;
pub mod document;
pub mod form;
pub mod lifecycle;
pub mod nav;
pub mod page;
pub mod sections;
pub mod tilt;


pub use config::FolioConfig;
pub use document::{Document, PortfolioLayout, SharedDocument};
pub use form::{Acknowledgement, ContactForm, ContactMessage, Field, SimulatedRelay, Submitter};
pub use lifecycle::{MountContext, ReleaseReport, Runtime, SectionLifecycle};
pub use nav::{NavBar, NavLink, NavSurface, NavTarget};
pub use page::Page;
pub use sections::Section;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::FolioConfig;
    pub use crate::document::{Document, PortfolioLayout};
    pub use crate::form::{ContactForm, Field};
    pub use crate::lifecycle::MountContext;
    pub use crate::nav::{NavLink, NavSurface};
    pub use crate::page::Page;
    pub use crate::sections::Section;

    // Core types
    pub use folio_core::{Event, FolioError, KeyCode, Point, Rect, Result, Size};

    // Scroll
    pub use folio_scroll::{ActivationEdge, SectionAnchor};

    // Animation
    pub use folio_animation::{AnimationPreset, VisualProperty};
}
