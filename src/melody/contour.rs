// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melodic contour shapes.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NameKind, UnknownTemplateError};

/// Overall shape of a melodic line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contour {
    Ascending,
    Descending,
    /// Rise to the middle, then fall
    #[default]
    Arch,
    /// Fall to the middle, then rise
    InvertedArch,
    /// Two rise-and-fall cycles
    Wave,
    Static,
}

impl Contour {
    pub const ALL: [Contour; 6] = [
        Contour::Ascending,
        Contour::Descending,
        Contour::Arch,
        Contour::InvertedArch,
        Contour::Wave,
        Contour::Static,
    ];

    /// Parse a contour name ("arch", "inverted-arch", ...)
    pub fn from_str(s: &str) -> Result<Self, UnknownTemplateError> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "ascending" | "up" | "rising" => Ok(Contour::Ascending),
            "descending" | "down" | "falling" => Ok(Contour::Descending),
            "arch" => Ok(Contour::Arch),
            "invertedarch" | "bowl" | "valley" => Ok(Contour::InvertedArch),
            "wave" => Ok(Contour::Wave),
            "static" | "flat" => Ok(Contour::Static),
            _ => Err(UnknownTemplateError::new(NameKind::Contour, s)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Contour::Ascending => "ascending",
            Contour::Descending => "descending",
            Contour::Arch => "arch",
            Contour::InvertedArch => "inverted-arch",
            Contour::Wave => "wave",
            Contour::Static => "static",
        }
    }

    /// Directional bias in [-1, 1] at `position` (0.0 - 1.0 through the line).
    /// Positive favours upward motion.
    pub fn bias(self, position: f64) -> f64 {
        let p = position.clamp(0.0, 1.0);
        match self {
            Contour::Ascending => 1.0,
            Contour::Descending => -1.0,
            Contour::Arch => (PI * p).cos(),
            Contour::InvertedArch => -(PI * p).cos(),
            Contour::Wave => (4.0 * PI * p).cos(),
            Contour::Static => 0.0,
        }
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_bounds() {
        for contour in Contour::ALL {
            for step in 0..=20 {
                let b = contour.bias(step as f64 / 20.0);
                assert!((-1.0..=1.0).contains(&b), "{} at {}: {}", contour, step, b);
            }
        }
    }

    #[test]
    fn test_arch_shape() {
        assert!(Contour::Arch.bias(0.1) > 0.5);
        assert!(Contour::Arch.bias(0.5).abs() < 1e-9);
        assert!(Contour::Arch.bias(0.9) < -0.5);
        assert!(Contour::InvertedArch.bias(0.1) < -0.5);
        assert!(Contour::InvertedArch.bias(0.9) > 0.5);
    }

    #[test]
    fn test_wave_turns_twice() {
        assert!(Contour::Wave.bias(0.0) > 0.9);
        assert!(Contour::Wave.bias(0.25) < -0.9);
        assert!(Contour::Wave.bias(0.5) > 0.9);
        assert!(Contour::Wave.bias(0.75) < -0.9);
    }

    #[test]
    fn test_constant_contours() {
        assert_eq!(Contour::Ascending.bias(0.7), 1.0);
        assert_eq!(Contour::Descending.bias(0.2), -1.0);
        assert_eq!(Contour::Static.bias(0.4), 0.0);
        // Out-of-range positions clamp
        assert_eq!(Contour::Arch.bias(-3.0), 1.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Contour::from_str("Inverted Arch").unwrap(), Contour::InvertedArch);
        assert_eq!(Contour::from_str("inverted_arch").unwrap(), Contour::InvertedArch);
        assert_eq!(Contour::from_str("WAVE").unwrap(), Contour::Wave);
        for contour in Contour::ALL {
            assert_eq!(Contour::from_str(contour.name()).unwrap(), contour);
        }
        let err = Contour::from_str("zigzag").unwrap_err();
        assert_eq!(err.kind, NameKind::Contour);
    }
}
