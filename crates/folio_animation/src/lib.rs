//! Folio Animation System
//!
//! Visual-only entrance animations and the scheduler that runs them.
//!
//! # Features
//!
//! - **Easing**: Penner curves addressed by `family.direction` names
//! - **Style Patches**: sparse opacity / translation / scale / blur / rotation values
//! - **Entrance Animations**: from → to interpolation with delay and easing
//! - **Stagger**: per-item start offsets for groups of targets
//! - **Presets**: the entrance animations each portfolio section plays
//! - **Scheduler**: cancellable, non-blocking animations ticked once per frame

pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod scheduler;
pub mod style;
pub mod values;

pub use easing::{Easing, DEFAULT_BACK_OVERSHOOT};
pub use keyframe::{EntranceAnimation, KeyframeAnimation, StaggerConfig};
pub use presets::AnimationPreset;
pub use scheduler::{AnimationId, AnimationScheduler, SchedulerHandle};
pub use style::{StylePatch, VisualProperty, VisualState};
pub use values::Interpolate;
