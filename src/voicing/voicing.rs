// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Four-part chord realizations.

use std::fmt;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::range::{VoiceRange, VoiceRanges, VoiceType};
use crate::music::chord::Chord;
use crate::music::pitch::Pitch;
use crate::music::scale::PitchClass;

/// Which triad tone sounds twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Doubling {
    #[default]
    Root,
    Third,
    Fifth,
}

impl Doubling {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "root" => Some(Doubling::Root),
            "third" => Some(Doubling::Third),
            "fifth" => Some(Doubling::Fifth),
            _ => None,
        }
    }
}

/// The pitch classes a four-part realization needs: the bass tone and the
/// three upper tones. Triads double one tone, sevenths sound all four.
pub fn chord_tones(chord: &Chord, doubling: Doubling) -> (PitchClass, [PitchClass; 3]) {
    let tones = chord.pitch_classes();
    let mut all: Vec<PitchClass> = tones.iter().copied().take(4).collect();
    if all.len() < 4 {
        let index = match doubling {
            Doubling::Root => 0,
            Doubling::Third => 1,
            Doubling::Fifth => 2,
        };
        all.push(tones.get(index).copied().unwrap_or(chord.root()));
    }
    while all.len() < 4 {
        all.push(chord.root());
    }

    let bass = chord.bass();
    let position = all.iter().position(|&pc| pc == bass).unwrap_or(all.len() - 1);
    all.remove(position);
    (bass, [all[0], all[1], all[2]])
}

/// Four pitches, soprano down to bass, realizing one chord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voicing {
    pitches: [Pitch; 4],
    chord: Chord,
}

impl Voicing {
    /// Pitches in soprano, alto, tenor, bass order. Returns `None` unless
    /// they are non-increasing.
    pub fn new(pitches: [Pitch; 4], chord: Chord) -> Option<Self> {
        if pitches.windows(2).all(|w| w[0] >= w[1]) {
            Some(Self { pitches, chord })
        } else {
            None
        }
    }

    pub fn pitch(&self, voice: VoiceType) -> Pitch {
        self.pitches[voice.index()]
    }

    pub fn soprano(&self) -> Pitch {
        self.pitches[0]
    }

    pub fn alto(&self) -> Pitch {
        self.pitches[1]
    }

    pub fn tenor(&self) -> Pitch {
        self.pitches[2]
    }

    pub fn bass(&self) -> Pitch {
        self.pitches[3]
    }

    pub fn pitches(&self) -> &[Pitch; 4] {
        &self.pitches
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    /// Signed movement of each voice into `next`
    pub fn moves_to(&self, next: &Voicing) -> [i32; 4] {
        let mut moves = [0; 4];
        for (i, slot) in moves.iter_mut().enumerate() {
            *slot = self.pitches[i].interval_to(next.pitches[i]);
        }
        moves
    }

    /// Total semitone motion of all four voices into `next`
    pub fn motion_to(&self, next: &Voicing) -> i32 {
        self.moves_to(next).iter().map(|m| m.abs()).sum()
    }

    /// Every chord tone is present and the bass carries the inversion's tone
    pub fn spells_chord(&self) -> bool {
        self.bass().pitch_class() == self.chord.bass()
            && self
                .chord
                .pitch_classes()
                .iter()
                .all(|&pc| self.pitches.iter().any(|p| p.pitch_class() == pc))
    }

    /// The source chord with these pitches attached, bass first
    pub fn to_chord(&self) -> Chord {
        let mut pitches = self.pitches.to_vec();
        pitches.reverse();
        self.chord.clone().with_voicing(pitches)
    }
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {} {}",
            self.chord.symbol(),
            self.pitches[0],
            self.pitches[1],
            self.pitches[2],
            self.pitches[3]
        )
    }
}

/// Pick a pitch of `pitch_class` for a voice sitting above `floor` (at most
/// `max_gap` semitones above it), favouring the comfortable range
fn place<R: Rng + ?Sized>(
    pitch_class: PitchClass,
    range: &VoiceRange,
    floor: Option<(Pitch, i32)>,
    rng: &mut R,
) -> Option<Pitch> {
    let candidates: Vec<Pitch> = Pitch::all_of_class(pitch_class, range.low, range.high)
        .into_iter()
        .filter(|&p| match floor {
            Some((below, max_gap)) => p >= below && below.interval_to(p) <= max_gap,
            None => true,
        })
        .collect();
    let weights = candidates
        .iter()
        .map(|&p| if range.is_comfortable(p) { 3.0 } else { 1.0 });
    let dist = WeightedIndex::new(weights).ok()?;
    Some(candidates[dist.sample(rng)])
}

/// Realize a chord from the bass upward at random, within ranges and
/// spacing. Returns `None` when the random placement paints itself into a
/// corner.
pub fn realize<R: Rng + ?Sized>(
    chord: &Chord,
    doubling: Doubling,
    ranges: &VoiceRanges,
    rng: &mut R,
) -> Option<Voicing> {
    let (bass_pc, mut upper) = chord_tones(chord, doubling);
    upper.shuffle(rng);

    let bass = place(bass_pc, &ranges.bass, None, rng)?;
    let tenor = place(upper[0], &ranges.tenor, Some((bass, 24)), rng)?;
    let alto = place(upper[1], &ranges.alto, Some((tenor, 12)), rng)?;
    let soprano = place(upper[2], &ranges.soprano, Some((alto, 12)), rng)?;

    Voicing::new([soprano, alto, tenor, bass], chord.clone())
}

/// Distance from the comfortable middle of each voice
pub(crate) fn comfort_distance(voicing: &Voicing, ranges: &VoiceRanges) -> i32 {
    VoiceType::ALL
        .iter()
        .map(|&v| ranges.get(v).center().interval_to(voicing.pitch(v)).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::chord::ChordQuality;
    use crate::voicing::rules::RuleChecker;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chord_tones_double_root() {
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        let (bass, mut upper) = chord_tones(&c, Doubling::Root);
        assert_eq!(bass, PitchClass::C);
        upper.sort();
        assert_eq!(upper, [PitchClass::C, PitchClass::E, PitchClass::G]);
    }

    #[test]
    fn test_chord_tones_inversion_and_doubling() {
        let c6 = Chord::new(PitchClass::C, ChordQuality::Major).inverted(1).unwrap();
        let (bass, mut upper) = chord_tones(&c6, Doubling::Fifth);
        assert_eq!(bass, PitchClass::E);
        upper.sort();
        assert_eq!(upper, [PitchClass::C, PitchClass::G, PitchClass::G]);
    }

    #[test]
    fn test_chord_tones_seventh_uses_all_four() {
        let g7 = Chord::new(PitchClass::G, ChordQuality::DominantSeventh);
        let (bass, mut upper) = chord_tones(&g7, Doubling::Root);
        assert_eq!(bass, PitchClass::G);
        upper.sort();
        assert_eq!(upper, [PitchClass::D, PitchClass::F, PitchClass::B]);
    }

    #[test]
    fn test_voicing_rejects_disorder() {
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        let pitches = [72, 76, 67, 48].map(Pitch::new);
        assert!(Voicing::new(pitches, c.clone()).is_none());
        let ok = Voicing::new([76, 72, 67, 48].map(Pitch::new), c).unwrap();
        assert_eq!(ok.soprano(), Pitch::new(76));
        assert_eq!(ok.pitch(VoiceType::Tenor), Pitch::new(67));
        assert!(ok.spells_chord());
    }

    #[test]
    fn test_to_chord_attaches_bass_first() {
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        let v = Voicing::new([76, 72, 67, 48].map(Pitch::new), c).unwrap();
        let chord = v.to_chord();
        assert_eq!(chord.voicing().unwrap()[0], Pitch::new(48));
        assert_eq!(chord.voicing().unwrap().len(), 4);
    }

    #[test]
    fn test_motion() {
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        let g = Chord::new(PitchClass::G, ChordQuality::Major);
        let a = Voicing::new([72, 67, 64, 48].map(Pitch::new), c).unwrap();
        let b = Voicing::new([71, 67, 62, 43].map(Pitch::new), g).unwrap();
        assert_eq!(a.moves_to(&b), [-1, 0, -2, -5]);
        assert_eq!(a.motion_to(&b), 8);
    }

    #[test]
    fn test_realize_respects_ranges_and_spacing() {
        let ranges = VoiceRanges::default();
        let checker = RuleChecker::new(ranges);
        let mut rng = StdRng::seed_from_u64(5);
        let chord = Chord::new(PitchClass::D, ChordQuality::Minor);
        let mut realized = 0;
        for _ in 0..50 {
            if let Some(v) = realize(&chord, Doubling::Root, &ranges, &mut rng) {
                realized += 1;
                assert!(v.spells_chord(), "{}", v);
                assert!(checker.check_voicing(&v).is_empty(), "{}", v);
            }
        }
        assert!(realized > 0);
    }
}
