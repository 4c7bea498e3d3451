// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Absolute pitches.
//!
//! A [`Pitch`] is a semitone number using MIDI numbering (middle C = C4 = 60).
//! Its display name is the pitch-class name; `Display` adds the octave.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scale::PitchClass;

/// Semitone offset type
pub type Semitones = i32;

/// An absolute pitch in semitones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pitch(i32);

impl Pitch {
    /// Middle C (C4)
    pub const MIDDLE_C: Pitch = Pitch(60);

    /// Create a pitch from a semitone value
    pub const fn new(semitone: i32) -> Self {
        Pitch(semitone)
    }

    /// Create a pitch from a pitch class and octave (C4 = 60)
    pub fn from_parts(pitch_class: PitchClass, octave: i32) -> Self {
        Pitch((octave + 1) * 12 + pitch_class.pitch_class() as i32)
    }

    /// Absolute semitone value
    pub fn semitone(self) -> i32 {
        self.0
    }

    pub fn pitch_class(self) -> PitchClass {
        PitchClass::from_pitch_class(self.0.rem_euclid(12) as u8)
    }

    /// Octave number in scientific pitch notation
    pub fn octave(self) -> i32 {
        self.0.div_euclid(12) - 1
    }

    /// Pitch-class name without octave ("C", "F#")
    pub fn name(self) -> &'static str {
        self.pitch_class().name()
    }

    /// Equality modulo octave
    pub fn same_class(self, other: Pitch) -> bool {
        self.0.rem_euclid(12) == other.0.rem_euclid(12)
    }

    /// Shift by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        Pitch(self.0 + semitones)
    }

    /// Signed interval to another pitch (positive = other is higher)
    pub fn interval_to(self, other: Pitch) -> Semitones {
        other.0 - self.0
    }

    /// The pitch of the given class closest to `self`. Ties resolve upward.
    pub fn nearest_of_class(self, pitch_class: PitchClass) -> Pitch {
        let up = (pitch_class.pitch_class() as i32 - self.0).rem_euclid(12);
        if up <= 6 {
            Pitch(self.0 + up)
        } else {
            Pitch(self.0 + up - 12)
        }
    }

    /// Every pitch of the given class within `low..=high`, ascending
    pub fn all_of_class(pitch_class: PitchClass, low: Pitch, high: Pitch) -> Vec<Pitch> {
        let first = low.0 + (pitch_class.pitch_class() as i32 - low.0).rem_euclid(12);
        (first..=high.0).step_by(12).map(Pitch).collect()
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Pitch::MIDDLE_C
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

/// Move a pitch by whole octaves until it lies within `low..=high`.
///
/// Ranges narrower than an octave may not contain the pitch class at all;
/// the result is then the octave placement nearest to the range.
pub fn clamp_to_range(pitch: Pitch, low: Pitch, high: Pitch) -> Pitch {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let mut result = pitch;
    while result < low {
        result = result.transpose(12);
    }
    while result > high {
        result = result.transpose(-12);
    }
    if result < low && (low.0 - result.0) > (result.0 + 12 - high.0) {
        result = result.transpose(12);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_parts() {
        let c4 = Pitch::from_parts(PitchClass::C, 4);
        assert_eq!(c4, Pitch::MIDDLE_C);
        assert_eq!(c4.octave(), 4);
        assert_eq!(c4.name(), "C");

        let a3 = Pitch::new(57);
        assert_eq!(a3.pitch_class(), PitchClass::A);
        assert_eq!(a3.to_string(), "A3");
    }

    #[test]
    fn test_same_class() {
        assert!(Pitch::new(60).same_class(Pitch::new(72)));
        assert!(Pitch::new(60).same_class(Pitch::new(48)));
        assert!(!Pitch::new(60).same_class(Pitch::new(61)));
    }

    #[test]
    fn test_nearest_of_class() {
        let e4 = Pitch::new(64);
        assert_eq!(e4.nearest_of_class(PitchClass::F), Pitch::new(65));
        assert_eq!(e4.nearest_of_class(PitchClass::C), Pitch::new(60));
        // Tritone ties go up
        assert_eq!(Pitch::new(60).nearest_of_class(PitchClass::Fs), Pitch::new(66));
    }

    #[test]
    fn test_all_of_class() {
        let gs = Pitch::all_of_class(PitchClass::G, Pitch::new(40), Pitch::new(70));
        assert_eq!(gs, vec![Pitch::new(43), Pitch::new(55), Pitch::new(67)]);
        assert!(Pitch::all_of_class(PitchClass::C, Pitch::new(61), Pitch::new(70)).is_empty());
    }

    #[test]
    fn test_clamp_to_range() {
        let low = Pitch::new(60);
        let high = Pitch::new(79);
        assert_eq!(clamp_to_range(Pitch::new(40), low, high), Pitch::new(64));
        assert_eq!(clamp_to_range(Pitch::new(96), low, high), Pitch::new(72));
        assert_eq!(clamp_to_range(Pitch::new(65), low, high), Pitch::new(65));
        // Reversed bounds are accepted
        assert_eq!(clamp_to_range(Pitch::new(40), high, low), Pitch::new(64));
    }
}
