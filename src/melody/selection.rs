// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Weighted note selection and the cadence-approach state machine.
//!
//! Every candidate scale pitch within an octave of the previous note gets a
//! weight built from scale-degree stability, chord membership, the contour's
//! directional bias and a penalty for leaps wider than a fifth. After a leap
//! wider than a minor third the step back in the opposite direction is
//! strongly preferred. The last two events of a phrase follow the cadence
//! instead.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::trace;

use crate::config::MelodyConfig;
use crate::harmony::Cadence;
use crate::music::chord::Chord;
use crate::music::pitch::Pitch;
use crate::music::scale::Key;

/// Intervals above this (in semitones) call for a step back
const RESOLVE_AFTER: i32 = 3;
/// Largest interval counted as a step
const STEP: i32 = 2;
/// Multiplier for everything except the resolving step
const RESOLUTION_DAMPING: f64 = 0.05;
/// Floor for the contour factor so no direction is ruled out
const CONTOUR_FLOOR: f64 = 0.05;

/// Where an event sits relative to the phrase ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceState {
    Interior,
    /// Second to last event
    Approaching,
    /// Final event
    Cadential,
}

impl CadenceState {
    /// State of event `index` in a phrase of `length` events
    pub fn at(index: usize, length: usize) -> Self {
        if length == 0 || index + 1 > length {
            CadenceState::Interior
        } else if index + 1 == length {
            CadenceState::Cadential
        } else if index + 2 == length {
            CadenceState::Approaching
        } else {
            CadenceState::Interior
        }
    }
}

/// Scale degrees (1-based) that lead into a cadence and the degree it lands on
pub fn cadence_degrees(cadence: Cadence) -> (&'static [usize], usize) {
    match cadence {
        Cadence::Half => (&[6, 4], 5),
        Cadence::Plagal => (&[6, 4], 1),
        Cadence::Deceptive => (&[5], 6),
        Cadence::Authentic | Cadence::None | Cadence::Indeterminate => (&[7, 2], 1),
    }
}

/// What the selector knows about the event being chosen
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub key: &'a Key,
    /// Previous pitched event
    pub previous: Option<Pitch>,
    /// Interval that arrived at `previous`
    pub last_interval: Option<i32>,
    /// Chord sounding under the event
    pub chord: Option<&'a Chord>,
    /// The event starts a new chord
    pub boundary: bool,
    /// Contour bias at this position
    pub bias: f64,
    pub state: CadenceState,
    pub cadence: Cadence,
}

impl<'a> SelectionContext<'a> {
    pub fn new(key: &'a Key) -> Self {
        Self {
            key,
            previous: None,
            last_interval: None,
            chord: None,
            boundary: false,
            bias: 0.0,
            state: CadenceState::Interior,
            cadence: Cadence::Authentic,
        }
    }
}

/// Weighted random choice of the next melody pitch
#[derive(Debug, Clone, Copy)]
pub struct NoteSelector<'a> {
    config: &'a MelodyConfig,
}

impl<'a> NoteSelector<'a> {
    pub fn new(config: &'a MelodyConfig) -> Self {
        Self { config }
    }

    fn center(&self) -> Pitch {
        Pitch::new((self.config.low.semitone() + self.config.high.semitone()) / 2)
    }

    /// Scale pitches within an octave of the previous note and inside the
    /// melody range
    pub fn candidates(&self, key: &Key, previous: Option<Pitch>) -> Vec<Pitch> {
        let (low, high) = (self.config.low, self.config.high);
        let reference = previous.unwrap_or_else(|| self.center());
        let window_low = reference.transpose(-12).max(low);
        let window_high = reference.transpose(12).min(high);
        let window = key.scale().pitches_between(window_low, window_high);
        if window.is_empty() {
            key.scale().pitches_between(low, high)
        } else {
            window
        }
    }

    fn stability(&self, key: &Key, pitch: Pitch) -> f64 {
        match key.scale().degree_of(pitch.pitch_class()) {
            Some(1) => self.config.tonic_weight,
            Some(5) => self.config.dominant_weight,
            _ => 1.0,
        }
    }

    /// Interior weight of each candidate
    pub fn weights(&self, context: &SelectionContext<'_>, candidates: &[Pitch]) -> Vec<f64> {
        let resolving = context
            .last_interval
            .filter(|interval| interval.abs() > RESOLVE_AFTER);

        candidates
            .iter()
            .map(|&pitch| {
                let mut weight = self.stability(context.key, pitch);

                if let Some(chord) = context.chord {
                    if chord.contains_pitch(pitch) {
                        weight *= if context.boundary {
                            self.config.boundary_chord_tone_weight
                        } else {
                            self.config.chord_tone_weight
                        };
                    }
                }

                let Some(previous) = context.previous else {
                    return weight;
                };
                let interval = previous.interval_to(pitch);

                if interval.abs() > 7 {
                    weight *= self.config.leap_penalty;
                }

                match resolving {
                    Some(leap) => {
                        let opposite_step = interval != 0
                            && interval.abs() <= STEP
                            && interval.signum() == -leap.signum();
                        weight *= if opposite_step {
                            self.config.resolution_boost
                        } else {
                            RESOLUTION_DAMPING
                        };
                    }
                    None => {
                        let pull =
                            context.bias * interval.signum() as f64 * self.config.contour_strength;
                        weight *= (1.0 + pull).max(CONTOUR_FLOOR);
                    }
                }
                weight
            })
            .collect()
    }

    /// Choose a pitch for the event described by `context`
    pub fn select<R: Rng + ?Sized>(&self, context: &SelectionContext<'_>, rng: &mut R) -> Pitch {
        let candidates = self.candidates(context.key, context.previous);
        let reference = context.previous.unwrap_or_else(|| self.center());
        if candidates.is_empty() {
            return context.key.scale().quantize(reference);
        }

        let (approach, target) = cadence_degrees(context.cadence);
        match context.state {
            CadenceState::Cadential => {
                if let Some(pitch) = self.nearest_of_degree(context.key, reference, target) {
                    trace!(pitch = %pitch, degree = target, "cadential pitch");
                    return pitch;
                }
            }
            CadenceState::Approaching => {
                let approaching: Vec<Pitch> = candidates
                    .iter()
                    .copied()
                    .filter(|p| {
                        context
                            .key
                            .scale()
                            .degree_of(p.pitch_class())
                            .is_some_and(|d| approach.contains(&d))
                    })
                    .collect();
                let weights = approaching
                    .iter()
                    .map(|p| 1.0 / (1.0 + reference.interval_to(*p).abs() as f64));
                if let Ok(dist) = WeightedIndex::new(weights) {
                    let pitch = approaching[dist.sample(rng)];
                    trace!(pitch = %pitch, "approach pitch");
                    return pitch;
                }
            }
            CadenceState::Interior => {}
        }

        let weights = self.weights(context, &candidates);
        for (pitch, weight) in candidates.iter().zip(&weights) {
            trace!(pitch = %pitch, weight, "candidate");
        }
        match WeightedIndex::new(&weights) {
            Ok(dist) => candidates[dist.sample(rng)],
            Err(_) => context.key.scale().quantize(reference),
        }
    }

    /// Pitch of scale degree `degree` nearest `reference` inside the melody
    /// range; ties go down
    pub fn nearest_of_degree(&self, key: &Key, reference: Pitch, degree: usize) -> Option<Pitch> {
        let pitch_class = key.scale().note_at_degree(degree)?;
        Pitch::all_of_class(pitch_class, self.config.low, self.config.high)
            .into_iter()
            .min_by_key(|p| (reference.interval_to(*p).abs(), p.semitone()))
    }
}

/// Nearest pitch to `pitch` whose class belongs to `chord`, inside
/// `low..=high`; ties go down
pub fn nearest_chord_tone(pitch: Pitch, chord: &Chord, low: Pitch, high: Pitch) -> Pitch {
    chord
        .pitch_classes()
        .iter()
        .flat_map(|&pc| Pitch::all_of_class(pc, low, high))
        .min_by_key(|p| (pitch.interval_to(*p).abs(), p.semitone()))
        .unwrap_or(pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::chord::ChordQuality;
    use crate::music::scale::{PitchClass, ScaleType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c_major() -> Key {
        Key::new(PitchClass::C, ScaleType::Major)
    }

    #[test]
    fn test_cadence_states() {
        assert_eq!(CadenceState::at(0, 8), CadenceState::Interior);
        assert_eq!(CadenceState::at(6, 8), CadenceState::Approaching);
        assert_eq!(CadenceState::at(7, 8), CadenceState::Cadential);
        assert_eq!(CadenceState::at(0, 1), CadenceState::Cadential);
        assert_eq!(CadenceState::at(9, 8), CadenceState::Interior);
    }

    #[test]
    fn test_candidates_stay_in_window() {
        let config = MelodyConfig::default();
        let selector = NoteSelector::new(&config);
        let key = c_major();
        let candidates = selector.candidates(&key, Some(Pitch::new(64)));
        assert_eq!(candidates.first(), Some(&Pitch::new(60)));
        assert_eq!(candidates.last(), Some(&Pitch::new(76)));
        assert!(candidates.iter().all(|p| key.scale().contains_pitch(*p)));
    }

    #[test]
    fn test_stability_and_chord_weights() {
        let config = MelodyConfig::default();
        let selector = NoteSelector::new(&config);
        let key = c_major();
        let g = Chord::new(PitchClass::G, ChordQuality::Major);
        let mut context = SelectionContext::new(&key);
        context.chord = Some(&g);

        let pitches = [60, 62, 65, 67].map(Pitch::new);
        let w = selector.weights(&context, &pitches);
        assert_eq!(w[0], 3.0); // tonic
        assert_eq!(w[1], 2.5); // chord tone D
        assert_eq!(w[2], 1.0); // F
        assert_eq!(w[3], 5.0); // dominant and chord tone

        context.boundary = true;
        let w = selector.weights(&context, &pitches);
        assert_eq!(w[1], 6.0);
    }

    #[test]
    fn test_contour_and_leap_penalty() {
        let config = MelodyConfig::default();
        let selector = NoteSelector::new(&config);
        let key = c_major();
        let mut context = SelectionContext::new(&key);
        context.previous = Some(Pitch::new(64));
        context.bias = 1.0;

        let pitches = [62, 65, 76].map(Pitch::new);
        let w = selector.weights(&context, &pitches);
        assert!(w[1] > w[0], "upward favoured: {:?}", w);
        // An octave leap up is penalized despite the upward pull
        assert!(w[2] < w[1]);
    }

    #[test]
    fn test_leap_resolution_weights() {
        let config = MelodyConfig::default();
        let selector = NoteSelector::new(&config);
        let key = c_major();
        let mut context = SelectionContext::new(&key);
        context.previous = Some(Pitch::new(72));
        context.last_interval = Some(5);
        context.bias = 1.0;

        let candidates = selector.candidates(&key, context.previous);
        let w = selector.weights(&context, &candidates);
        let step_back = candidates.iter().position(|p| p.semitone() == 71).unwrap();
        let total: f64 = w.iter().sum();
        assert!(w[step_back] / total > 0.5, "{:?}", w);
    }

    #[test]
    fn test_cadential_forces_target() {
        let config = MelodyConfig::default();
        let selector = NoteSelector::new(&config);
        let key = c_major();
        let mut rng = StdRng::seed_from_u64(3);

        let mut context = SelectionContext::new(&key);
        context.previous = Some(Pitch::new(71));
        context.state = CadenceState::Cadential;
        assert_eq!(selector.select(&context, &mut rng), Pitch::new(72));

        context.cadence = Cadence::Half;
        assert_eq!(selector.select(&context, &mut rng), Pitch::new(67));

        context.cadence = Cadence::Deceptive;
        context.previous = Some(Pitch::new(67));
        assert_eq!(selector.select(&context, &mut rng), Pitch::new(69));
    }

    #[test]
    fn test_approach_degrees() {
        let config = MelodyConfig::default();
        let selector = NoteSelector::new(&config);
        let key = c_major();
        let mut rng = StdRng::seed_from_u64(11);
        let mut context = SelectionContext::new(&key);
        context.previous = Some(Pitch::new(64));
        context.state = CadenceState::Approaching;

        for _ in 0..20 {
            let pitch = selector.select(&context, &mut rng);
            assert!(matches!(pitch.name(), "B" | "D"), "{}", pitch);
        }
    }

    #[test]
    fn test_nearest_chord_tone() {
        let f = Chord::new(PitchClass::F, ChordQuality::Major);
        let (low, high) = (Pitch::new(60), Pitch::new(79));
        assert_eq!(nearest_chord_tone(Pitch::new(64), &f, low, high), Pitch::new(65));
        assert_eq!(nearest_chord_tone(Pitch::new(67), &f, low, high), Pitch::new(65));
        // Equidistant C and E: the lower wins
        let a_minor = Chord::new(PitchClass::A, ChordQuality::Minor);
        assert_eq!(nearest_chord_tone(Pitch::new(74), &a_minor, low, high), Pitch::new(72));
    }
}
