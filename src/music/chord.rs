// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord descriptors.
//!
//! A [`Chord`] is a root pitch class, a quality from the closed
//! [`ChordQuality`] set and an inversion. Chords built from Roman numerals
//! remember their source numeral so progressions can re-resolve them in
//! another key.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::Pitch;
use super::scale::PitchClass;
use crate::harmony::roman::RomanNumeral;

/// Closed set of chord qualities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    HalfDiminishedSeventh,
    DiminishedSeventh,
    MinorMajorSeventh,
    AugmentedMajorSeventh,
}

impl ChordQuality {
    /// All qualities
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::DominantSeventh,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::HalfDiminishedSeventh,
        ChordQuality::DiminishedSeventh,
        ChordQuality::MinorMajorSeventh,
        ChordQuality::AugmentedMajorSeventh,
    ];

    /// Semitones above the root, in stacking order
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::DominantSeventh => &[0, 4, 7, 10],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
            ChordQuality::MinorSeventh => &[0, 3, 7, 10],
            ChordQuality::HalfDiminishedSeventh => &[0, 3, 6, 10],
            ChordQuality::DiminishedSeventh => &[0, 3, 6, 9],
            ChordQuality::MinorMajorSeventh => &[0, 3, 7, 11],
            ChordQuality::AugmentedMajorSeventh => &[0, 4, 8, 11],
        }
    }

    /// Find the quality whose stacked intervals match exactly
    pub fn from_intervals(intervals: &[u8]) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.intervals() == intervals)
    }

    pub fn is_seventh(self) -> bool {
        self.intervals().len() == 4
    }

    /// True when the third above the root is major
    pub fn has_major_third(self) -> bool {
        self.intervals()[1] == 4
    }

    /// The triad underneath a seventh chord
    pub fn triad(self) -> Self {
        match self {
            ChordQuality::DominantSeventh | ChordQuality::MajorSeventh => ChordQuality::Major,
            ChordQuality::MinorSeventh | ChordQuality::MinorMajorSeventh => ChordQuality::Minor,
            ChordQuality::HalfDiminishedSeventh | ChordQuality::DiminishedSeventh => {
                ChordQuality::Diminished
            }
            ChordQuality::AugmentedMajorSeventh => ChordQuality::Augmented,
            triad => triad,
        }
    }

    /// Add a seventh `seventh` semitones above the root of this triad
    pub fn with_seventh(self, seventh: u8) -> Option<Self> {
        let triad = self.triad().intervals();
        Self::from_intervals(&[triad[0], triad[1], triad[2], seventh])
    }

    /// Maximum inversion index (2 for triads, 3 for sevenths)
    pub fn max_inversion(self) -> u8 {
        self.intervals().len() as u8 - 1
    }

    /// Suffix used in lead-sheet symbols
    fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "°",
            ChordQuality::Augmented => "+",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::HalfDiminishedSeventh => "ø7",
            ChordQuality::DiminishedSeventh => "°7",
            ChordQuality::MinorMajorSeventh => "mM7",
            ChordQuality::AugmentedMajorSeventh => "+M7",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::DominantSeventh => "dominant seventh",
            ChordQuality::MajorSeventh => "major seventh",
            ChordQuality::MinorSeventh => "minor seventh",
            ChordQuality::HalfDiminishedSeventh => "half-diminished seventh",
            ChordQuality::DiminishedSeventh => "diminished seventh",
            ChordQuality::MinorMajorSeventh => "minor-major seventh",
            ChordQuality::AugmentedMajorSeventh => "augmented-major seventh",
        };
        write!(f, "{}", name)
    }
}

/// A chord: root, quality, inversion and optional realization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    root: PitchClass,
    quality: ChordQuality,
    inversion: u8,
    /// Numeral this chord was resolved from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    numeral: Option<RomanNumeral>,
    /// Concrete pitches, bass first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voicing: Option<Vec<Pitch>>,
}

impl Chord {
    /// Create a root-position chord
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self {
            root,
            quality,
            inversion: 0,
            numeral: None,
            voicing: None,
        }
    }

    /// Return this chord in another inversion, or `None` if the quality
    /// has no such inversion
    pub fn inverted(mut self, inversion: u8) -> Option<Self> {
        if inversion > self.quality.max_inversion() {
            return None;
        }
        self.inversion = inversion;
        Some(self)
    }

    /// Attach the numeral this chord was resolved from
    pub fn with_numeral(mut self, numeral: RomanNumeral) -> Self {
        self.numeral = Some(numeral);
        self
    }

    /// Attach a concrete voicing (bass first)
    pub fn with_voicing(mut self, pitches: Vec<Pitch>) -> Self {
        self.voicing = Some(pitches);
        self
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn inversion(&self) -> u8 {
        self.inversion
    }

    pub fn numeral(&self) -> Option<&RomanNumeral> {
        self.numeral.as_ref()
    }

    pub fn voicing(&self) -> Option<&[Pitch]> {
        self.voicing.as_deref()
    }

    /// Chord tones in stacking order (root, third, fifth, seventh)
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.quality
            .intervals()
            .iter()
            .map(|&i| self.root.transpose(i as i8))
            .collect()
    }

    /// The tone in the bass for this inversion
    pub fn bass(&self) -> PitchClass {
        self.root
            .transpose(self.quality.intervals()[self.inversion as usize] as i8)
    }

    /// Check whether a pitch class belongs to the chord
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes().contains(&pitch_class)
    }

    /// Check whether a pitch's class belongs to the chord
    pub fn contains_pitch(&self, pitch: Pitch) -> bool {
        self.contains(pitch.pitch_class())
    }

    /// Same chord shifted by semitones (numeral kept, voicing dropped)
    pub fn transpose(&self, semitones: i8) -> Self {
        Self {
            root: self.root.transpose(semitones),
            quality: self.quality,
            inversion: self.inversion,
            numeral: self.numeral.clone(),
            voicing: None,
        }
    }

    /// Same root pitch class and quality, ignoring inversion and voicing
    pub fn same_harmony(&self, other: &Chord) -> bool {
        self.root == other.root && self.quality == other.quality
    }

    /// Lead-sheet symbol, e.g. "Am", "G7", "C/E"
    pub fn symbol(&self) -> String {
        let mut symbol = format!("{}{}", self.root, self.quality.suffix());
        if self.inversion > 0 {
            symbol.push('/');
            symbol.push_str(&self.bass().to_string());
        }
        symbol
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_intervals() {
        assert_eq!(ChordQuality::Major.intervals(), &[0, 4, 7]);
        assert_eq!(ChordQuality::DominantSeventh.intervals(), &[0, 4, 7, 10]);
        assert_eq!(
            ChordQuality::from_intervals(&[0, 3, 6, 10]),
            Some(ChordQuality::HalfDiminishedSeventh)
        );
        assert_eq!(ChordQuality::from_intervals(&[0, 5, 7]), None);
    }

    #[test]
    fn test_quality_seventh_helpers() {
        assert_eq!(
            ChordQuality::Major.with_seventh(10),
            Some(ChordQuality::DominantSeventh)
        );
        assert_eq!(
            ChordQuality::Diminished.with_seventh(9),
            Some(ChordQuality::DiminishedSeventh)
        );
        assert_eq!(ChordQuality::MinorSeventh.triad(), ChordQuality::Minor);
        assert!(ChordQuality::MajorSeventh.is_seventh());
        assert!(!ChordQuality::Augmented.is_seventh());
    }

    #[test]
    fn test_chord_tones_and_bass() {
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        assert_eq!(
            c.pitch_classes(),
            vec![PitchClass::C, PitchClass::E, PitchClass::G]
        );
        assert_eq!(c.bass(), PitchClass::C);

        let c6 = c.clone().inverted(1).unwrap();
        assert_eq!(c6.bass(), PitchClass::E);
        assert_eq!(c6.symbol(), "C/E");

        assert!(c.clone().inverted(3).is_none());
    }

    #[test]
    fn test_seventh_inversions() {
        let g7 = Chord::new(PitchClass::G, ChordQuality::DominantSeventh);
        let g42 = g7.clone().inverted(3).unwrap();
        assert_eq!(g42.bass(), PitchClass::F);
        assert_eq!(g7.symbol(), "G7");
    }

    #[test]
    fn test_chord_symbols() {
        assert_eq!(Chord::new(PitchClass::A, ChordQuality::Minor).symbol(), "Am");
        assert_eq!(Chord::new(PitchClass::B, ChordQuality::Diminished).symbol(), "B°");
        assert_eq!(
            Chord::new(PitchClass::D, ChordQuality::MinorSeventh).to_string(),
            "Dm7"
        );
    }

    #[test]
    fn test_chord_transpose() {
        let c = Chord::new(PitchClass::C, ChordQuality::Major).with_voicing(vec![Pitch::new(48)]);
        let d = c.transpose(2);
        assert_eq!(d.root(), PitchClass::D);
        assert!(d.voicing().is_none());
        assert!(c.same_harmony(&Chord::new(PitchClass::C, ChordQuality::Major)));
    }
}
