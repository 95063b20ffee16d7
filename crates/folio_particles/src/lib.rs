//! Folio Particles
//!
//! The ambient particle field drawn behind the hero section. Independent of
//! the scroll trigger system; the only shared input is the pointer position.

pub mod config;
pub mod field;

pub use config::ParticleConfig;
pub use field::{Particle, ParticleField};
