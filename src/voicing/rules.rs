// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Motion classification and the voice-leading rule set.
//!
//! Rules never fail a search. They produce [`Violation`] values that the
//! search counts when scoring candidates and that are handed back to the
//! caller alongside the chosen voicings.

use std::fmt;

use serde::Serialize;

use super::range::{VoiceRanges, VoiceType};
use super::voicing::Voicing;
use crate::music::pitch::Pitch;
use crate::music::scale::Key;

/// Relative motion of two voices across a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Same direction, same interval
    Parallel,
    /// Same direction, different interval
    Similar,
    /// Opposite directions
    Contrary,
    /// One voice holds
    Oblique,
    /// Neither voice moves
    Static,
}

impl Motion {
    /// Classify the motion of an upper and a lower voice, each given as
    /// (before, after)
    pub fn classify(upper: (Pitch, Pitch), lower: (Pitch, Pitch)) -> Motion {
        let upper_step = upper.0.interval_to(upper.1);
        let lower_step = lower.0.interval_to(lower.1);
        match (upper_step.signum(), lower_step.signum()) {
            (0, 0) => Motion::Static,
            (0, _) | (_, 0) => Motion::Oblique,
            (a, b) if a != b => Motion::Contrary,
            _ if upper_step == lower_step => Motion::Parallel,
            _ => Motion::Similar,
        }
    }
}

/// A broken voice-leading rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    /// Two moving voices keep a perfect fifth (or compound fifth)
    ParallelFifths { upper: VoiceType, lower: VoiceType },
    /// Two moving voices keep an octave or unison
    ParallelOctaves { upper: VoiceType, lower: VoiceType },
    /// Outer voices reach a fifth in similar motion with a soprano leap
    HiddenFifths,
    /// Outer voices reach an octave in similar motion with a soprano leap
    HiddenOctaves,
    /// A voice moves past where its neighbour just was
    VoiceCrossing { upper: VoiceType, lower: VoiceType },
    /// Leading tone of a dominant chord does not rise to the tonic
    UnresolvedLeadingTone { voice: VoiceType },
    /// Adjacent voices too far apart
    Spacing {
        upper: VoiceType,
        lower: VoiceType,
        semitones: i32,
    },
    /// Pitch outside the hard range of its voice
    OutOfRange { voice: VoiceType, pitch: Pitch },
}

impl Violation {
    /// Whether this is a range violation
    pub fn is_range(&self) -> bool {
        matches!(self, Violation::OutOfRange { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ParallelFifths { upper, lower } => {
                write!(f, "parallel fifths between {} and {}", upper, lower)
            }
            Violation::ParallelOctaves { upper, lower } => {
                write!(f, "parallel octaves between {} and {}", upper, lower)
            }
            Violation::HiddenFifths => write!(f, "hidden fifths in the outer voices"),
            Violation::HiddenOctaves => write!(f, "hidden octaves in the outer voices"),
            Violation::VoiceCrossing { upper, lower } => {
                write!(f, "{} and {} cross", upper, lower)
            }
            Violation::UnresolvedLeadingTone { voice } => {
                write!(f, "leading tone in the {} does not resolve", voice)
            }
            Violation::Spacing {
                upper,
                lower,
                semitones,
            } => write!(
                f,
                "{} and {} are {} semitones apart",
                upper, lower, semitones
            ),
            Violation::OutOfRange { voice, pitch } => {
                write!(f, "{} out of {} range", pitch, voice)
            }
        }
    }
}

/// Applies the rule set to voicings and transitions
#[derive(Debug, Clone, Default)]
pub struct RuleChecker {
    ranges: VoiceRanges,
}

impl RuleChecker {
    pub fn new(ranges: VoiceRanges) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &VoiceRanges {
        &self.ranges
    }

    /// Spacing and range rules for a single voicing
    pub fn check_voicing(&self, voicing: &Voicing) -> Vec<Violation> {
        let mut violations = Vec::new();

        for pair in VoiceType::ALL.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            let semitones = voicing.pitch(lower).interval_to(voicing.pitch(upper));
            if let Some(max) = upper.max_spacing_below() {
                if semitones > max {
                    violations.push(Violation::Spacing {
                        upper,
                        lower,
                        semitones,
                    });
                }
            }
        }

        for voice in VoiceType::ALL {
            let pitch = voicing.pitch(voice);
            if !self.ranges.get(voice).contains(pitch) {
                violations.push(Violation::OutOfRange { voice, pitch });
            }
        }

        violations
    }

    /// Motion rules between two successive voicings. `key` is the key the
    /// destination chord is heard in.
    pub fn check_transition(&self, from: &Voicing, to: &Voicing, key: &Key) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.check_parallels(from, to, &mut violations);
        self.check_hidden(from, to, &mut violations);
        self.check_crossing(from, to, &mut violations);
        self.check_leading_tone(from, to, key, &mut violations);
        violations
    }

    fn check_parallels(&self, from: &Voicing, to: &Voicing, violations: &mut Vec<Violation>) {
        for (i, &upper) in VoiceType::ALL.iter().enumerate() {
            for &lower in &VoiceType::ALL[i + 1..] {
                let (u0, u1) = (from.pitch(upper), to.pitch(upper));
                let (l0, l1) = (from.pitch(lower), to.pitch(lower));
                // Both voices must move; contrary fifths and octaves count too
                if u0 == u1 || l0 == l1 {
                    continue;
                }
                let before = l0.interval_to(u0).rem_euclid(12);
                let after = l1.interval_to(u1).rem_euclid(12);
                if before != after {
                    continue;
                }
                match after {
                    7 => violations.push(Violation::ParallelFifths { upper, lower }),
                    0 => violations.push(Violation::ParallelOctaves { upper, lower }),
                    _ => {}
                }
            }
        }
    }

    fn check_hidden(&self, from: &Voicing, to: &Voicing, violations: &mut Vec<Violation>) {
        let soprano = (from.soprano(), to.soprano());
        let bass = (from.bass(), to.bass());
        if Motion::classify(soprano, bass) != Motion::Similar {
            return;
        }
        if soprano.0.interval_to(soprano.1).abs() <= 2 {
            return;
        }
        match bass.1.interval_to(soprano.1).rem_euclid(12) {
            7 => violations.push(Violation::HiddenFifths),
            0 => violations.push(Violation::HiddenOctaves),
            _ => {}
        }
    }

    fn check_crossing(&self, from: &Voicing, to: &Voicing, violations: &mut Vec<Violation>) {
        for pair in VoiceType::ALL.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if to.pitch(upper) < from.pitch(lower) || to.pitch(lower) > from.pitch(upper) {
                violations.push(Violation::VoiceCrossing { upper, lower });
            }
        }
    }

    fn check_leading_tone(
        &self,
        from: &Voicing,
        to: &Voicing,
        key: &Key,
        violations: &mut Vec<Violation>,
    ) {
        if !to.chord().contains(key.root()) {
            return;
        }
        let leading_tone = key.leading_tone();
        for voice in VoiceType::ALL {
            let before = from.pitch(voice);
            if before.pitch_class() == leading_tone && to.pitch(voice) != before.transpose(1) {
                violations.push(Violation::UnresolvedLeadingTone { voice });
            }
        }
    }
}
