// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes, diatonic scales and keys.
//!
//! Provides diatonic scale definitions, pitch-to-scale-degree mapping,
//! transposition within scales, diatonic chord tables and key relationships.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chord::{Chord, ChordQuality};
use super::pitch::Pitch;
use crate::error::NotationError;

/// Pitch classes, spelled with sharps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Get the pitch class number (0-11)
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get pitch class from a number, wrapping at 12
    pub fn from_pitch_class(pc: u8) -> Self {
        PitchClass::ALL[(pc % 12) as usize]
    }

    /// Parse from string (e.g., "C", "C#", "Db", "F#")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" | "B#" => Some(PitchClass::C),
            "C#" | "CS" | "DB" => Some(PitchClass::Cs),
            "D" => Some(PitchClass::D),
            "D#" | "DS" | "EB" => Some(PitchClass::Ds),
            "E" | "FB" => Some(PitchClass::E),
            "F" | "E#" | "ES" => Some(PitchClass::F),
            "F#" | "FS" | "GB" => Some(PitchClass::Fs),
            "G" => Some(PitchClass::G),
            "G#" | "GS" | "AB" => Some(PitchClass::Gs),
            "A" => Some(PitchClass::A),
            "A#" | "AS" | "BB" => Some(PitchClass::As),
            "B" | "CB" => Some(PitchClass::B),
            _ => None,
        }
    }

    /// Moves by `semitones`, wrapping within the octave
    pub fn transpose(self, semitones: i8) -> Self {
        let new_pc = (self.pitch_class() as i16 + semitones as i16).rem_euclid(12) as u8;
        PitchClass::from_pitch_class(new_pc)
    }

    /// Get interval in semitones to another pitch class (ascending)
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.pitch_class() as i16 - self.pitch_class() as i16).rem_euclid(12) as u8
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Diatonic scale types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    NaturalMinor,
    Locrian,

    HarmonicMinor,
    /// Ascending form
    MelodicMinor,
}

/// Triad qualities of the major scale, degrees I-VII
const MAJOR_TRIADS: [ChordQuality; 7] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
];

/// Triad qualities of the natural minor scale
const NATURAL_MINOR_TRIADS: [ChordQuality; 7] = [
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
];

/// Triad qualities of the harmonic minor scale
const HARMONIC_MINOR_TRIADS: [ChordQuality; 7] = [
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Augmented,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Diminished,
];

impl ScaleType {
    /// All supported scale types
    pub const ALL: [ScaleType; 9] = [
        ScaleType::Major,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::NaturalMinor,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
    ];

    /// Semitones above the root for each of the seven degrees
    pub fn intervals(self) -> [u8; 7] {
        match self {
            ScaleType::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleType::Dorian => [0, 2, 3, 5, 7, 9, 10],
            ScaleType::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            ScaleType::Lydian => [0, 2, 4, 6, 7, 9, 11],
            ScaleType::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            ScaleType::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            ScaleType::Locrian => [0, 1, 3, 5, 6, 8, 10],
            ScaleType::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => [0, 2, 3, 5, 7, 9, 11],
        }
    }

    /// Accepts mode names, ignoring case, spaces, dashes and underscores
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" | "maj" => Some(ScaleType::Major),
            "dorian" => Some(ScaleType::Dorian),
            "phrygian" => Some(ScaleType::Phrygian),
            "lydian" => Some(ScaleType::Lydian),
            "mixolydian" => Some(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" | "min" => Some(ScaleType::NaturalMinor),
            "locrian" => Some(ScaleType::Locrian),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            _ => None,
        }
    }

    /// Display name, e.g. "Harmonic Minor"
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
        }
    }

    /// Major maps to natural minor and back; other modes have no parallel
    pub fn parallel(self) -> Option<Self> {
        match self {
            ScaleType::Major => Some(ScaleType::NaturalMinor),
            ScaleType::NaturalMinor | ScaleType::HarmonicMinor | ScaleType::MelodicMinor => {
                Some(ScaleType::Major)
            }
            _ => None,
        }
    }

    /// True when the third above the tonic is minor
    pub fn is_minor(self) -> bool {
        self.intervals()[2] == 3
    }

    /// Canonical triad qualities for degrees I-VII
    pub fn triad_qualities(self) -> [ChordQuality; 7] {
        match self {
            ScaleType::Major => MAJOR_TRIADS,
            ScaleType::NaturalMinor => NATURAL_MINOR_TRIADS,
            ScaleType::HarmonicMinor => HARMONIC_MINOR_TRIADS,
            _ => {
                let mut qualities = MAJOR_TRIADS;
                for (degree, quality) in qualities.iter_mut().enumerate() {
                    let stack = self.stacked_thirds(degree, 3);
                    *quality = ChordQuality::from_intervals(&stack).unwrap_or(ChordQuality::Major);
                }
                qualities
            }
        }
    }

    /// Seventh-chord quality built on a degree (0-based) from scale tones
    pub fn seventh_quality(self, degree_index: usize) -> ChordQuality {
        let stack = self.stacked_thirds(degree_index, 4);
        ChordQuality::from_intervals(&stack).unwrap_or(ChordQuality::DominantSeventh)
    }

    /// Semitones above the degree's root for `count` stacked scale thirds
    fn stacked_thirds(self, degree_index: usize, count: usize) -> Vec<u8> {
        let intervals = self.intervals();
        let root = intervals[degree_index % 7];
        (0..count)
            .map(|i| {
                let tone = intervals[(degree_index + 2 * i) % 7];
                (tone + 12 - root) % 12
            })
            .collect()
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Seven ordered pitch classes built from a root and a scale type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    root: PitchClass,
    scale_type: ScaleType,
    notes: Vec<PitchClass>,
}

impl Scale {
    pub fn new(root: PitchClass, scale_type: ScaleType) -> Self {
        let notes: Vec<PitchClass> = scale_type
            .intervals()
            .iter()
            .map(|&i| root.transpose(i as i8))
            .collect();

        Self {
            root,
            scale_type,
            notes,
        }
    }

    /// Builds a scale from a root name and a mode name
    pub fn parse(root_str: &str, scale_str: &str) -> Option<Self> {
        let root = PitchClass::from_str(root_str)?;
        let scale_type = ScaleType::from_str(scale_str)?;
        Some(Scale::new(root, scale_type))
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Get the pitch classes in this scale
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// Always 7 for the supported scale types
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a pitch class is in this scale
    pub fn contains(&self, note: PitchClass) -> bool {
        self.notes.contains(&note)
    }

    /// Check if a pitch is in this scale
    pub fn contains_pitch(&self, pitch: Pitch) -> bool {
        self.contains(pitch.pitch_class())
    }

    /// Get the scale degree (1-based) for a pitch class, if it's in the scale
    pub fn degree_of(&self, note: PitchClass) -> Option<usize> {
        self.notes.iter().position(|&n| n == note).map(|i| i + 1)
    }

    /// Pitch class of a 1-based degree
    pub fn note_at_degree(&self, degree: usize) -> Option<PitchClass> {
        if degree == 0 || degree > self.len() {
            return None;
        }
        Some(self.notes[degree - 1])
    }

    /// Get the pitch at a given scale degree (1-based) and octave (C4 = 60)
    pub fn pitch_at(&self, degree: usize, octave: i32) -> Option<Pitch> {
        let note = self.note_at_degree(degree)?;
        Some(Pitch::from_parts(note, octave))
    }

    /// Every scale pitch within `low..=high`, ascending
    pub fn pitches_between(&self, low: Pitch, high: Pitch) -> Vec<Pitch> {
        (low.semitone()..=high.semitone())
            .map(Pitch::new)
            .filter(|p| self.contains_pitch(*p))
            .collect()
    }

    /// Transpose a pitch by scale degrees (positive = up, negative = down).
    /// Pitches outside the scale are quantized first.
    pub fn transpose_in_scale(&self, pitch: Pitch, degrees: i32) -> Pitch {
        if self.is_empty() {
            return pitch;
        }

        let pitch = self.quantize(pitch);
        let current_degree = self
            .notes
            .iter()
            .position(|&n| n == pitch.pitch_class())
            .unwrap_or(0);

        // Root of the scale at or below the pitch
        let intervals = self.scale_type.intervals();
        let base = pitch.semitone() - intervals[current_degree] as i32;

        let scale_len = self.len() as i32;
        let new_pos = current_degree as i32 + degrees;
        let new_degree = new_pos.rem_euclid(scale_len) as usize;
        let octave_change = new_pos.div_euclid(scale_len);

        Pitch::new(base + octave_change * 12 + intervals[new_degree] as i32)
    }

    /// Signed number of scale steps from `from` to `to`, both quantized
    pub fn steps_between(&self, from: Pitch, to: Pitch) -> i32 {
        let (from, to) = (self.quantize(from), self.quantize(to));
        if from <= to {
            self.pitches_between(from, to).len().saturating_sub(1) as i32
        } else {
            -(self.pitches_between(to, from).len().saturating_sub(1) as i32)
        }
    }

    /// Quantize a pitch to the nearest pitch in the scale (ties go down)
    pub fn quantize(&self, pitch: Pitch) -> Pitch {
        if self.is_empty() || self.contains_pitch(pitch) {
            return pitch;
        }
        for distance in 1..=6 {
            let below = pitch.transpose(-distance);
            if self.contains_pitch(below) {
                return below;
            }
            let above = pitch.transpose(distance);
            if self.contains_pitch(above) {
                return above;
            }
        }
        pitch
    }

    /// Canonical triad quality on a 1-based degree
    pub fn triad_quality(&self, degree: usize) -> Option<ChordQuality> {
        if degree == 0 || degree > 7 {
            return None;
        }
        Some(self.scale_type.triad_qualities()[degree - 1])
    }

    /// The seven diatonic triads in root position
    pub fn diatonic_triads(&self) -> Vec<Chord> {
        self.notes
            .iter()
            .zip(self.scale_type.triad_qualities())
            .map(|(&root, quality)| Chord::new(root, quality))
            .collect()
    }

    /// Same root, parallel mode
    pub fn parallel(&self) -> Option<Scale> {
        self.scale_type.parallel().map(|st| Scale::new(self.root, st))
    }

    /// Relative major or minor sharing the same pitch classes
    pub fn relative(&self) -> Option<Scale> {
        match self.scale_type {
            ScaleType::Major => {
                let relative_root = self.root.transpose(-3);
                Some(Scale::new(relative_root, ScaleType::NaturalMinor))
            }
            ScaleType::NaturalMinor => {
                let relative_root = self.root.transpose(3);
                Some(Scale::new(relative_root, ScaleType::Major))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

/// Tonal center: a tonic and the scale built on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    root: PitchClass,
    scale: Scale,
}

impl Key {
    /// Create a new key
    pub fn new(root: PitchClass, scale_type: ScaleType) -> Self {
        Self {
            root,
            scale: Scale::new(root, scale_type),
        }
    }

    /// Builds a key from separate root and mode names
    pub fn parse(root_str: &str, scale_str: &str) -> Option<Self> {
        let root = PitchClass::from_str(root_str)?;
        let scale_type = ScaleType::from_str(scale_str)?;
        Some(Key::new(root, scale_type))
    }

    /// Parse a key name such as "C", "F# minor" or "Bb harmonic minor".
    /// A bare tonic means major.
    pub fn from_name(name: &str) -> Result<Self, NotationError> {
        let mut parts = name.split_whitespace();
        let root = parts
            .next()
            .and_then(PitchClass::from_str)
            .ok_or_else(|| NotationError::UnknownKey(name.to_string()))?;
        let mode: Vec<&str> = parts.collect();
        let scale_type = if mode.is_empty() {
            ScaleType::Major
        } else {
            ScaleType::from_str(&mode.join(" "))
                .ok_or_else(|| NotationError::UnknownKey(name.to_string()))?
        };
        Ok(Key::new(root, scale_type))
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Get the scale
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale.scale_type()
    }

    /// Pitch class a semitone below the tonic
    pub fn leading_tone(&self) -> PitchClass {
        self.root.transpose(-1)
    }

    /// Same mode, tonic moved by `semitones`
    pub fn transpose(&self, semitones: i8) -> Self {
        let new_root = self.root.transpose(semitones);
        Key::new(new_root, self.scale.scale_type())
    }

    /// Relative major or minor key
    pub fn relative(&self) -> Option<Key> {
        self.scale.relative().map(|s| Key {
            root: s.root(),
            scale: s,
        })
    }

    /// Same tonic, parallel mode
    pub fn parallel(&self) -> Option<Key> {
        self.scale.parallel().map(|s| Key {
            root: s.root(),
            scale: s,
        })
    }

    /// Key a fifth above
    pub fn dominant(&self) -> Key {
        Key::new(self.root.transpose(7), self.scale.scale_type())
    }

    /// Key a fifth below
    pub fn subdominant(&self) -> Key {
        Key::new(self.root.transpose(5), self.scale.scale_type())
    }

    /// `count` keys moving clockwise round the circle of fifths, starting here
    pub fn circle_of_fifths(&self, count: usize) -> Vec<Key> {
        let mut keys = Vec::with_capacity(count);
        let mut key = self.clone();
        for _ in 0..count {
            let next = key.dominant();
            keys.push(key);
            key = next;
        }
        keys
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scale)
    }
}
