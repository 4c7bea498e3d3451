// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! SATB voice types and their pitch ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::pitch::{clamp_to_range, Pitch};

/// One of the four chorale voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceType {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl VoiceType {
    /// Top to bottom, matching the pitch order inside a voicing
    pub const ALL: [VoiceType; 4] = [
        VoiceType::Soprano,
        VoiceType::Alto,
        VoiceType::Tenor,
        VoiceType::Bass,
    ];

    /// Position in a voicing (soprano = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            VoiceType::Soprano => "soprano",
            VoiceType::Alto => "alto",
            VoiceType::Tenor => "tenor",
            VoiceType::Bass => "bass",
        }
    }

    /// Largest allowed distance to the next voice down
    pub fn max_spacing_below(self) -> Option<i32> {
        match self {
            VoiceType::Soprano | VoiceType::Alto => Some(12),
            VoiceType::Tenor => Some(24),
            VoiceType::Bass => None,
        }
    }
}

impl fmt::Display for VoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hard bounds plus a narrower comfortable sub-range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRange {
    pub low: Pitch,
    pub high: Pitch,
    pub comfortable_low: Pitch,
    pub comfortable_high: Pitch,
}

impl VoiceRange {
    pub fn new(low: i32, high: i32, comfortable_low: i32, comfortable_high: i32) -> Self {
        Self {
            low: Pitch::new(low),
            high: Pitch::new(high),
            comfortable_low: Pitch::new(comfortable_low),
            comfortable_high: Pitch::new(comfortable_high),
        }
    }

    /// Default range for a voice
    pub fn for_voice(voice: VoiceType) -> Self {
        match voice {
            VoiceType::Soprano => VoiceRange::new(60, 79, 64, 76),
            VoiceType::Alto => VoiceRange::new(55, 74, 57, 72),
            VoiceType::Tenor => VoiceRange::new(48, 67, 50, 64),
            VoiceType::Bass => VoiceRange::new(40, 60, 43, 57),
        }
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        pitch >= self.low && pitch <= self.high
    }

    pub fn is_comfortable(&self, pitch: Pitch) -> bool {
        pitch >= self.comfortable_low && pitch <= self.comfortable_high
    }

    /// Move a pitch by octaves into the hard range
    pub fn clamp(&self, pitch: Pitch) -> Pitch {
        clamp_to_range(pitch, self.low, self.high)
    }

    /// Middle of the comfortable range
    pub fn center(&self) -> Pitch {
        Pitch::new((self.comfortable_low.semitone() + self.comfortable_high.semitone()) / 2)
    }

    /// Bounds are ordered and the comfortable range sits inside the hard one
    pub fn is_well_formed(&self) -> bool {
        self.low <= self.comfortable_low
            && self.comfortable_low <= self.comfortable_high
            && self.comfortable_high <= self.high
    }
}

/// The four ranges used by the voice-leading engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRanges {
    #[serde(default = "default_soprano")]
    pub soprano: VoiceRange,
    #[serde(default = "default_alto")]
    pub alto: VoiceRange,
    #[serde(default = "default_tenor")]
    pub tenor: VoiceRange,
    #[serde(default = "default_bass")]
    pub bass: VoiceRange,
}

fn default_soprano() -> VoiceRange {
    VoiceRange::for_voice(VoiceType::Soprano)
}
fn default_alto() -> VoiceRange {
    VoiceRange::for_voice(VoiceType::Alto)
}
fn default_tenor() -> VoiceRange {
    VoiceRange::for_voice(VoiceType::Tenor)
}
fn default_bass() -> VoiceRange {
    VoiceRange::for_voice(VoiceType::Bass)
}

impl Default for VoiceRanges {
    fn default() -> Self {
        Self {
            soprano: default_soprano(),
            alto: default_alto(),
            tenor: default_tenor(),
            bass: default_bass(),
        }
    }
}

impl VoiceRanges {
    pub fn get(&self, voice: VoiceType) -> &VoiceRange {
        match voice {
            VoiceType::Soprano => &self.soprano,
            VoiceType::Alto => &self.alto,
            VoiceType::Tenor => &self.tenor,
            VoiceType::Bass => &self.bass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let ranges = VoiceRanges::default();
        assert_eq!(ranges.soprano.low, Pitch::new(60));
        assert_eq!(ranges.bass.high, Pitch::new(60));
        for voice in VoiceType::ALL {
            assert!(ranges.get(voice).is_well_formed(), "{}", voice);
        }
    }

    #[test]
    fn test_contains_and_comfortable() {
        let tenor = VoiceRange::for_voice(VoiceType::Tenor);
        assert!(tenor.contains(Pitch::new(48)));
        assert!(!tenor.contains(Pitch::new(68)));
        assert!(tenor.is_comfortable(Pitch::new(55)));
        assert!(!tenor.is_comfortable(Pitch::new(49)));
        assert_eq!(tenor.center(), Pitch::new(57));
    }

    #[test]
    fn test_clamp_moves_by_octaves() {
        let alto = VoiceRange::for_voice(VoiceType::Alto);
        let clamped = alto.clamp(Pitch::new(81));
        assert_eq!(clamped, Pitch::new(69));
        assert!(clamped.same_class(Pitch::new(81)));
    }

    #[test]
    fn test_voice_order() {
        assert_eq!(VoiceType::Soprano.index(), 0);
        assert_eq!(VoiceType::Bass.index(), 3);
        assert_eq!(VoiceType::Tenor.max_spacing_below(), Some(24));
        assert_eq!(VoiceType::Bass.max_spacing_below(), None);
        assert_eq!(VoiceType::Alto.to_string(), "alto");
    }
}
