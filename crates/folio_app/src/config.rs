//! Page configuration
//!
//! Every tuning value of the page, grouped by concern. Defaults reproduce
//! the site exactly; a TOML document may override any subset:
//!
//! ```toml
//! [scroll]
//! probe_fraction = 0.35
//! smooth_scroll_easing = "power2.inOut"
//!
//! [particles]
//! max_count = 60
//!
//! [contact]
//! submit_delay_ms = 1500
//! ```

use folio_animation::Easing;
use folio_core::Result;
use folio_particles::ParticleConfig;
use folio_scroll::{DEFAULT_PROBE_FRACTION, DEFAULT_SCROLL_DURATION_MS};
use serde::Deserialize;

/// Completion notice shown after the contact form is sent
pub const DEFAULT_ACKNOWLEDGEMENT: &str = "感谢您的留言！我会尽快回复您。";

/// Full page configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub scroll: ScrollConfig,
    pub particles: ParticleConfig,
    pub hero: HeroConfig,
    pub contact: ContactConfig,
}

impl FolioConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

/// Scroll tracking and navigation
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Active-section probe, as a fraction of viewport height
    pub probe_fraction: f32,
    /// Offset past which the navigation bar switches to its compact style
    pub scrolled_threshold: f32,
    pub smooth_scroll_ms: u32,
    pub smooth_scroll_easing: Easing,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            probe_fraction: DEFAULT_PROBE_FRACTION,
            scrolled_threshold: 100.0,
            smooth_scroll_ms: DEFAULT_SCROLL_DURATION_MS,
            smooth_scroll_easing: Easing::CubicInOut,
        }
    }
}

/// Hero section
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Fixed seed for particle placement; random when unset
    pub particle_seed: Option<u64>,
    /// Pointer tilt on the portrait
    pub portrait_tilt: bool,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            particle_seed: None,
            portrait_tilt: true,
        }
    }
}

/// Contact form
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Duration of the simulated submission
    pub submit_delay_ms: u64,
    pub acknowledgement: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            acknowledgement: DEFAULT_ACKNOWLEDGEMENT.to_string(),
        }
    }
}
