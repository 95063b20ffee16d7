//! Particle field tuning

use folio_core::Color;
use serde::{Deserialize, Deserializer};

/// Tuning values for the particle field
///
/// Defaults reproduce the page's look. Velocities and the repulsion
/// factor are per frame, not per second.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Hard cap on the particle count
    pub max_count: usize,
    /// One particle per `spacing` px of viewport width
    pub spacing: f32,
    /// Pointer repulsion only acts within this distance
    pub interaction_radius: f32,
    /// Velocity change per px of pointer offset, per frame
    pub repulsion: f32,
    /// Particles closer than this are linked
    pub link_distance: f32,
    /// Link alpha at zero distance; falls off linearly to 0 at `link_distance`
    pub link_alpha: f32,
    pub link_width: f32,
    /// Initial velocity components are uniform in `±speed / 2`
    pub speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub alpha_min: f32,
    pub alpha_max: f32,
    #[serde(deserialize_with = "deserialize_hex_color")]
    pub color: Color,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_count: 80,
            spacing: 20.0,
            interaction_radius: 150.0,
            repulsion: 0.0003,
            link_distance: 100.0,
            link_alpha: 0.15,
            link_width: 0.5,
            speed: 0.3,
            radius_min: 1.0,
            radius_max: 3.0,
            alpha_min: 0.2,
            alpha_max: 0.7,
            color: Color::from_hex(0xD0FF59),
        }
    }
}

impl ParticleConfig {
    /// `clamp(floor(width / spacing), 0, max_count)`; 0 for non-finite widths
    pub fn particle_count(&self, width: f32) -> usize {
        if !width.is_finite() || width <= 0.0 || self.spacing <= 0.0 {
            return 0;
        }
        let count = (width / self.spacing).floor();
        if count >= self.max_count as f32 {
            self.max_count
        } else {
            count as usize
        }
    }
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Color::parse_hex(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{s}', expected #rrggbb")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_clamps() {
        let config = ParticleConfig::default();
        assert_eq!(config.particle_count(0.0), 0);
        assert_eq!(config.particle_count(19.9), 0);
        assert_eq!(config.particle_count(375.0), 18);
        assert_eq!(config.particle_count(1600.0), 80);
        assert_eq!(config.particle_count(100_000.0), 80);
        assert_eq!(config.particle_count(-50.0), 0);
        assert_eq!(config.particle_count(f32::NAN), 0);
        assert_eq!(config.particle_count(f32::INFINITY), 0);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ParticleConfig =
            toml::from_str("max_count = 40\ncolor = \"#ff0000\"").unwrap();
        assert_eq!(config.max_count, 40);
        assert_eq!(config.color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(config.link_distance, 100.0);

        assert!(toml::from_str::<ParticleConfig>("color = \"red\"").is_err());
    }
}
