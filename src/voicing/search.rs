// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bounded candidate search for single chords and transitions.
//!
//! A transition search first tries every assignment of the upper chord
//! tones to soprano, alto and tenor with each voice moving to the nearest
//! pitch of its tone, smallest total motion first. Remaining attempts
//! perturb those candidates by octaves or realize the chord afresh. The
//! first candidate without violations wins; otherwise the lowest
//! (violation count, total motion) seen within the budget. A candidate with
//! a pitch outside its voice's hard range is never usable.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::range::VoiceType;
use super::rules::{RuleChecker, Violation};
use super::voicing::{chord_tones, comfort_distance, realize, Doubling, Voicing};
use crate::music::chord::Chord;
use crate::music::pitch::Pitch;
use crate::music::scale::{Key, PitchClass};

/// Chance that a perturbed attempt moves a given voice by an octave
const OCTAVE_JITTER: f64 = 0.25;
/// Chance that a perturbed attempt ignores the previous voicing entirely
const FRESH_REALIZATION: f64 = 0.1;

/// Best voicing found for one chord
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub voicing: Voicing,
    pub violations: Vec<Violation>,
    pub motion: i32,
}

/// Search settings shared by every call
pub(crate) struct Search<'a> {
    pub checker: &'a RuleChecker,
    pub doubling: Doubling,
    pub attempts: usize,
}

/// Distinct orderings of the three upper tones
fn assignments(tones: [PitchClass; 3]) -> Vec<[PitchClass; 3]> {
    const ORDERS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut result: Vec<[PitchClass; 3]> = Vec::with_capacity(6);
    for order in ORDERS {
        let assignment = [tones[order[0]], tones[order[1]], tones[order[2]]];
        if !result.contains(&assignment) {
            result.push(assignment);
        }
    }
    result
}

impl Search<'_> {
    /// Voice a chord with no predecessor
    pub fn first<R: Rng + ?Sized>(&self, chord: &Chord, rng: &mut R) -> Option<Candidate> {
        let ranges = self.checker.ranges();
        let mut best: Option<(usize, i32, Candidate)> = None;

        for attempt in 0..self.attempts {
            let Some(voicing) = realize(chord, self.doubling, ranges, rng) else {
                continue;
            };
            let violations = self.checker.check_voicing(&voicing);
            let distance = comfort_distance(&voicing, ranges);
            trace!(attempt, distance, voicing = %voicing, "opening candidate");
            let score = (violations.len(), distance);
            if best.as_ref().map_or(true, |(v, d, _)| score < (*v, *d)) {
                best = Some((
                    score.0,
                    score.1,
                    Candidate {
                        voicing,
                        violations,
                        motion: 0,
                    },
                ));
            }
        }

        best.map(|(_, _, candidate)| candidate)
            .or_else(|| self.centered(chord))
    }

    /// Each voice on the nearest chord tone to the middle of its range.
    /// Used when random realization never succeeded.
    fn centered(&self, chord: &Chord) -> Option<Candidate> {
        let ranges = self.checker.ranges();
        let (bass_pc, upper) = chord_tones(chord, self.doubling);
        let mut pitches = [Pitch::default(); 4];
        for voice in VoiceType::ALL {
            let pitch_class = match voice {
                VoiceType::Bass => bass_pc,
                _ => upper[voice.index()],
            };
            let range = ranges.get(voice);
            pitches[voice.index()] = range.clamp(range.center().nearest_of_class(pitch_class));
        }
        pitches.sort_by(|a, b| b.cmp(a));
        let voicing = Voicing::new(pitches, chord.clone())?;
        // Sorting may have pushed an upper tone below the bass
        if !voicing.spells_chord() {
            return None;
        }
        let violations = self.checker.check_voicing(&voicing);
        if violations.iter().any(Violation::is_range) {
            return None;
        }
        Some(Candidate {
            voicing,
            violations,
            motion: 0,
        })
    }

    /// Voice `chord` after `previous`; `key` is the key `chord` is heard in
    pub fn next<R: Rng + ?Sized>(
        &self,
        previous: &Voicing,
        chord: &Chord,
        key: &Key,
        rng: &mut R,
    ) -> Option<Candidate> {
        let ranges = self.checker.ranges();
        let (bass_pc, upper) = chord_tones(chord, self.doubling);
        let orders = assignments(upper);

        let lead = |assignment: &[PitchClass; 3], jitter: [i32; 4]| -> Option<Voicing> {
            let mut pitches = [Pitch::default(); 4];
            for voice in VoiceType::ALL {
                let i = voice.index();
                let pitch_class = match voice {
                    VoiceType::Bass => bass_pc,
                    _ => assignment[i],
                };
                let target = previous
                    .pitch(voice)
                    .nearest_of_class(pitch_class)
                    .transpose(jitter[i]);
                pitches[i] = ranges.get(voice).clamp(target);
            }
            Voicing::new(pitches, chord.clone())
        };

        let mut seeded: Vec<Voicing> = orders.iter().filter_map(|a| lead(a, [0; 4])).collect();
        seeded.sort_by_key(|v| previous.motion_to(v));
        let mut seeded = seeded.into_iter();

        let mut best: Option<Candidate> = None;
        for attempt in 0..self.attempts {
            let voicing = match seeded.next() {
                Some(voicing) => Some(voicing),
                None if rng.gen_bool(FRESH_REALIZATION) => {
                    realize(chord, self.doubling, ranges, rng)
                }
                None => {
                    let mut jitter = [0; 4];
                    for shift in jitter.iter_mut() {
                        if rng.gen_bool(OCTAVE_JITTER) {
                            *shift = if rng.gen_bool(0.5) { 12 } else { -12 };
                        }
                    }
                    orders.choose(rng).and_then(|a| lead(a, jitter))
                }
            };
            let Some(voicing) = voicing else {
                continue;
            };

            let mut violations = self.checker.check_transition(previous, &voicing, key);
            violations.extend(self.checker.check_voicing(&voicing));
            if violations.iter().any(Violation::is_range) {
                continue;
            }
            let motion = previous.motion_to(&voicing);
            trace!(
                attempt,
                violations = violations.len(),
                motion,
                voicing = %voicing,
                "transition candidate"
            );

            let improves = best.as_ref().map_or(true, |b| {
                (violations.len(), motion) < (b.violations.len(), b.motion)
            });
            if improves {
                let clean = violations.is_empty();
                best = Some(Candidate {
                    voicing,
                    violations,
                    motion,
                });
                if clean {
                    break;
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::chord::ChordQuality;
    use crate::music::scale::ScaleType;
    use crate::voicing::range::VoiceRanges;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn search(checker: &RuleChecker) -> Search<'_> {
        Search {
            checker,
            doubling: Doubling::Root,
            attempts: 100,
        }
    }

    #[test]
    fn test_assignments_are_distinct() {
        let all = assignments([PitchClass::C, PitchClass::E, PitchClass::G]);
        assert_eq!(all.len(), 6);
        let doubled = assignments([PitchClass::C, PitchClass::C, PitchClass::G]);
        assert_eq!(doubled.len(), 3);
    }

    #[test]
    fn test_centered_keeps_inversion() {
        let checker = RuleChecker::new(VoiceRanges::default());
        let search = Search {
            checker: &checker,
            doubling: Doubling::Root,
            attempts: 1,
        };
        let c64 = Chord::new(PitchClass::C, ChordQuality::Major)
            .inverted(2)
            .unwrap();
        let candidate = search.centered(&c64).unwrap();
        assert_eq!(candidate.voicing.bass().pitch_class(), PitchClass::G);
        assert!(candidate.voicing.spells_chord());

        // Doubling the third puts the tenor's E under the bass's G
        let search = Search {
            doubling: Doubling::Third,
            ..search
        };
        assert!(search.centered(&c64).is_none());
    }

    #[test]
    fn test_first_voicing_is_clean() {
        let checker = RuleChecker::new(VoiceRanges::default());
        let mut rng = StdRng::seed_from_u64(9);
        let chord = Chord::new(PitchClass::F, ChordQuality::Major);
        let candidate = search(&checker).first(&chord, &mut rng).unwrap();
        assert!(candidate.violations.is_empty());
        assert!(candidate.voicing.spells_chord());
    }

    #[test]
    fn test_dominant_to_tonic_is_clean() {
        let checker = RuleChecker::new(VoiceRanges::default());
        let key = Key::new(PitchClass::C, ScaleType::Major);
        let g = Chord::new(PitchClass::G, ChordQuality::Major);
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        let previous = Voicing::new([71, 67, 62, 55].map(Pitch::new), g).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let candidate = search(&checker).next(&previous, &c, &key, &mut rng).unwrap();
        assert!(candidate.violations.is_empty(), "{:?}", candidate.violations);
        assert_eq!(candidate.voicing.soprano(), Pitch::new(72));
        assert!(candidate.motion <= 8);
    }

    #[test]
    fn test_repeated_chord_holds_still() {
        let checker = RuleChecker::new(VoiceRanges::default());
        let key = Key::new(PitchClass::C, ScaleType::Major);
        let c = Chord::new(PitchClass::C, ChordQuality::Major);
        let previous = Voicing::new([72, 67, 64, 48].map(Pitch::new), c.clone()).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let candidate = search(&checker).next(&previous, &c, &key, &mut rng).unwrap();
        assert_eq!(candidate.motion, 0);
        assert_eq!(candidate.voicing.pitches(), previous.pitches());
    }
}
