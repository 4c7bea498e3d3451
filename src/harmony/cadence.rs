// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic functions and cadence classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NameKind, UnknownTemplateError};
use crate::music::scale::PitchClass;

/// Functional role of a chord in its key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    /// Function of a scale degree (1-7)
    pub fn of_degree(degree: u8) -> Option<Self> {
        match degree {
            1 | 3 | 6 => Some(HarmonicFunction::Tonic),
            2 | 4 => Some(HarmonicFunction::Subdominant),
            5 | 7 => Some(HarmonicFunction::Dominant),
            _ => None,
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarmonicFunction::Tonic => write!(f, "tonic"),
            HarmonicFunction::Subdominant => write!(f, "subdominant"),
            HarmonicFunction::Dominant => write!(f, "dominant"),
        }
    }
}

/// Cadence types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Dominant to tonic
    Authentic,
    /// Subdominant to tonic
    Plagal,
    /// Dominant to submediant
    Deceptive,
    /// Ends on the dominant
    Half,
    /// The ending is not a cadence
    None,
    /// Too few chords to tell
    Indeterminate,
}

impl Cadence {
    /// Parse a cadence name
    pub fn from_str(s: &str) -> Result<Self, UnknownTemplateError> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "authentic" | "perfect" | "pac" => Ok(Cadence::Authentic),
            "plagal" | "amen" => Ok(Cadence::Plagal),
            "deceptive" | "interrupted" => Ok(Cadence::Deceptive),
            "half" | "imperfect" => Ok(Cadence::Half),
            _ => Err(UnknownTemplateError::new(NameKind::Cadence, s)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cadence::Authentic => "authentic",
            Cadence::Plagal => "plagal",
            Cadence::Deceptive => "deceptive",
            Cadence::Half => "half",
            Cadence::None => "none",
            Cadence::Indeterminate => "indeterminate",
        }
    }

    /// Relative sense of closure (0 = none)
    pub fn strength(self) -> u8 {
        match self {
            Cadence::Authentic => 3,
            Cadence::Plagal => 2,
            Cadence::Half | Cadence::Deceptive => 1,
            Cadence::None | Cadence::Indeterminate => 0,
        }
    }

    /// Whether the cadence ends on the tonic
    pub fn is_conclusive(self) -> bool {
        matches!(self, Cadence::Authentic | Cadence::Plagal)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What cadence detection needs to know about a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CadenceChord {
    pub degree: Option<u8>,
    pub root: PitchClass,
    pub inversion: u8,
}

/// Classify the ending of a chord sequence from its last two chords.
/// Earlier chords in `tail` are ignored.
pub(crate) fn detect(tail: &[CadenceChord]) -> Cadence {
    if tail.len() < 2 {
        return Cadence::Indeterminate;
    }
    let last = tail[tail.len() - 1];
    let penult = tail[tail.len() - 2];

    let (Some(last_degree), Some(penult_degree)) = (last.degree, penult.degree) else {
        return Cadence::None;
    };
    let penult_function = HarmonicFunction::of_degree(penult_degree);
    let root_motion = penult.root.interval_to(last.root);

    // A second-inversion tonic is a dominant embellishment, not an arrival
    let tonic_arrival = last_degree == 1 && last.inversion != 2;

    if tonic_arrival && penult_function == Some(HarmonicFunction::Dominant) {
        // V-I moves up a fourth; vii-I moves up a step
        if (penult_degree == 5 && root_motion == 5) || penult_degree == 7 {
            return Cadence::Authentic;
        }
    }
    if tonic_arrival && penult_degree == 4 && root_motion == 7 {
        return Cadence::Plagal;
    }
    if penult_function == Some(HarmonicFunction::Dominant) && last_degree == 6 {
        return Cadence::Deceptive;
    }
    if last_degree == 5 {
        return Cadence::Half;
    }
    Cadence::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(degree: u8, root: PitchClass) -> CadenceChord {
        CadenceChord {
            degree: Some(degree),
            root,
            inversion: 0,
        }
    }

    #[test]
    fn test_functions() {
        assert_eq!(HarmonicFunction::of_degree(1), Some(HarmonicFunction::Tonic));
        assert_eq!(HarmonicFunction::of_degree(2), Some(HarmonicFunction::Subdominant));
        assert_eq!(HarmonicFunction::of_degree(7), Some(HarmonicFunction::Dominant));
        assert_eq!(HarmonicFunction::of_degree(0), None);
    }

    #[test]
    fn test_detect_basic_cadences() {
        let i = chord(1, PitchClass::C);
        let iv = chord(4, PitchClass::F);
        let v = chord(5, PitchClass::G);
        let vi = chord(6, PitchClass::A);

        assert_eq!(detect(&[iv, v, i]), Cadence::Authentic);
        assert_eq!(detect(&[i, iv, i]), Cadence::Plagal);
        assert_eq!(detect(&[i, v, vi]), Cadence::Deceptive);
        assert_eq!(detect(&[i, iv, v]), Cadence::Half);
        assert_eq!(detect(&[v, iv]), Cadence::None);
    }

    #[test]
    fn test_detect_needs_two_chords() {
        assert_eq!(detect(&[]), Cadence::Indeterminate);
        assert_eq!(detect(&[chord(1, PitchClass::C)]), Cadence::Indeterminate);
    }

    #[test]
    fn test_leading_tone_chord_is_authentic() {
        let vii = chord(7, PitchClass::B);
        assert_eq!(detect(&[vii, chord(1, PitchClass::C)]), Cadence::Authentic);
    }

    #[test]
    fn test_cadential_six_four_is_not_an_arrival() {
        let i64 = CadenceChord {
            degree: Some(1),
            root: PitchClass::C,
            inversion: 2,
        };
        assert_eq!(detect(&[chord(5, PitchClass::G), i64]), Cadence::None);
        assert_eq!(detect(&[i64, chord(5, PitchClass::G)]), Cadence::Half);
    }

    #[test]
    fn test_unknown_degree() {
        let chromatic = CadenceChord {
            degree: None,
            root: PitchClass::Fs,
            inversion: 0,
        };
        assert_eq!(detect(&[chromatic, chord(1, PitchClass::C)]), Cadence::None);
    }

    #[test]
    fn test_cadence_names() {
        assert_eq!(Cadence::from_str("Authentic").unwrap(), Cadence::Authentic);
        assert_eq!(Cadence::from_str("half").unwrap(), Cadence::Half);
        assert!(Cadence::from_str("sideways").is_err());
        assert!(Cadence::Authentic.strength() > Cadence::Half.strength());
        assert_eq!(Cadence::Deceptive.to_string(), "deceptive");
    }
}
