//! Easing curves
//!
//! Standard Penner-style curves, addressed by the `family.direction` names
//! the page's animation definitions use (`"expo.out"`, `"power2.out"`,
//! `"back.out(1.7)"`). The `powerN` families map onto polynomial curves of
//! degree N + 1.

use std::f32::consts::PI;
use std::str::FromStr;

use folio_core::FolioError;
use serde::Deserialize;

/// Default overshoot for the back family
pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

/// Easing function for keyframe interpolation
#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// power1 / quadratic
    QuadIn,
    QuadOut,
    QuadInOut,
    /// power2 / cubic
    CubicIn,
    CubicOut,
    CubicInOut,
    /// power3 / quartic
    QuartIn,
    QuartOut,
    QuartInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Overshoots the start by the given amount
    BackIn(f32),
    /// Overshoots the end by the given amount
    BackOut(f32),
    BackInOut(f32),
}

impl Easing {
    /// Evaluate the curve at `t`, clamped to 0.0..=1.0.
    ///
    /// Curves are pinned at the endpoints: `ease(0) == 0`, `ease(1) == 1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -(t * PI).cos() / 2.0 + 0.5,
            Easing::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0f32.powf(10.0 * t - 10.0)
                }
            }
            Easing::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2.0f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::BackIn(s) => (s + 1.0) * t * t * t - s * t * t,
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::BackInOut(s) => {
                let c = s * 1.525;
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((c + 1.0) * 2.0 * t - c)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c + 1.0) * (t * 2.0 - 2.0) + c) + 2.0) / 2.0
                }
            }
        }
    }
}

impl FromStr for Easing {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let invalid = || FolioError::InvalidEasing(s.to_string());

        if matches!(name, "linear" | "none") {
            return Ok(Easing::Linear);
        }

        // Optional "(param)" suffix, only meaningful for back.*
        let (head, param) = match name.find('(') {
            Some(open) => {
                let close = name.strip_suffix(')').ok_or_else(invalid)?;
                let value: f32 = close[open + 1..].trim().parse().map_err(|_| invalid())?;
                (&name[..open], Some(value))
            }
            None => (name, None),
        };

        let (family, direction) = head.split_once('.').unwrap_or((head, "out"));
        let overshoot = param.unwrap_or(DEFAULT_BACK_OVERSHOOT);
        if param.is_some() && family != "back" {
            return Err(invalid());
        }

        let easing = match (family, direction) {
            ("power1" | "quad", "in") => Easing::QuadIn,
            ("power1" | "quad", "out") => Easing::QuadOut,
            ("power1" | "quad", "inOut") => Easing::QuadInOut,
            ("power2" | "cubic", "in") => Easing::CubicIn,
            ("power2" | "cubic", "out") => Easing::CubicOut,
            ("power2" | "cubic", "inOut") => Easing::CubicInOut,
            ("power3" | "quart", "in") => Easing::QuartIn,
            ("power3" | "quart", "out") => Easing::QuartOut,
            ("power3" | "quart", "inOut") => Easing::QuartInOut,
            ("sine", "in") => Easing::SineIn,
            ("sine", "out") => Easing::SineOut,
            ("sine", "inOut") => Easing::SineInOut,
            ("expo", "in") => Easing::ExpoIn,
            ("expo", "out") => Easing::ExpoOut,
            ("expo", "inOut") => Easing::ExpoInOut,
            ("back", "in") => Easing::BackIn(overshoot),
            ("back", "out") => Easing::BackOut(overshoot),
            ("back", "inOut") => Easing::BackInOut(overshoot),
            _ => return Err(invalid()),
        };
        Ok(easing)
    }
}

impl TryFrom<String> for Easing {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 18] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::BackOut(1.7),
        Easing::BackInOut(DEFAULT_BACK_OVERSHOOT),
    ];

    #[test]
    fn test_endpoints_are_pinned() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-3, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::BackOut(1.7).apply(i as f32 / 100.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("expo.out".parse::<Easing>().unwrap(), Easing::ExpoOut);
        assert_eq!("power2.out".parse::<Easing>().unwrap(), Easing::CubicOut);
        assert_eq!("power1.inOut".parse::<Easing>().unwrap(), Easing::QuadInOut);
        assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("back.out(1.7)".parse::<Easing>().unwrap(), Easing::BackOut(1.7));
        assert_eq!(
            "back.out".parse::<Easing>().unwrap(),
            Easing::BackOut(DEFAULT_BACK_OVERSHOOT)
        );
        // Bare family defaults to .out
        assert_eq!("expo".parse::<Easing>().unwrap(), Easing::ExpoOut);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("wobble.out".parse::<Easing>().is_err());
        assert!("expo.sideways".parse::<Easing>().is_err());
        assert!("expo.out(2)".parse::<Easing>().is_err());
        assert!("back.out(abc)".parse::<Easing>().is_err());
        assert!("back.out(1.7".parse::<Easing>().is_err());
    }

    #[test]
    fn test_deserialize_from_name() {
        #[derive(Deserialize)]
        struct Cfg {
            easing: Easing,
        }
        let cfg: Cfg = toml::from_str("easing = \"back.out(1.7)\"").unwrap();
        assert_eq!(cfg.easing, Easing::BackOut(1.7));
        assert!(toml::from_str::<Cfg>("easing = \"nope\"").is_err());
    }
}
