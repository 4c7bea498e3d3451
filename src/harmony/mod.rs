// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmony: Roman numerals, progressions, cadences and key changes.

pub mod cadence;
pub mod functional;
pub mod modulation;
pub mod progression;
pub mod roman;
pub mod templates;

pub use cadence::{Cadence, HarmonicFunction};
pub use functional::functional;
pub use modulation::{find_pivots, modulate, Modulation, ModulationMethod, PivotChord};
pub use progression::Progression;
pub use roman::{resolve, QualityGlyph, RomanNumeral};
pub use templates::Template;
