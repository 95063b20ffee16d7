//! Folio Scroll
//!
//! Scroll-driven orchestration for the portfolio page:
//!
//! - **Activation edges**: `"top 80%"`-style thresholds
//! - **Viewport observer**: edge crossings with per-tick batched measurement
//! - **Trigger registry**: FireOnce entrance animations and Continuous
//!   progress-linked effects, with cancellable registration
//! - **Active-section tracker**: probe-point navigation highlighting
//! - **Smooth scroll**: eased scroll-to-anchor tween

pub mod edge;
pub mod observer;
pub mod section;
pub mod smooth;
pub mod trigger;

pub use edge::{ActivationEdge, ElementEdge};
pub use observer::{EdgeState, MeasurementCache, ObservationId, ViewportObserver};
pub use section::{
    resolve_active, ActiveSectionTracker, SectionAnchor, SectionBoundary, DEFAULT_PROBE_FRACTION,
};
pub use smooth::{SmoothScroll, DEFAULT_SCROLL_DURATION_MS};
pub use trigger::{
    progress_between, ProgressEffect, TickReport, Trigger, TriggerEffect, TriggerId,
    TriggerMode, TriggerRegistry,
};
