// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody generation over a progression.
//!
//! A melody is assembled motif by motif. Each motif is either fresh material
//! from the weighted [`NoteSelector`] or, with probability `motivic_unity`,
//! a development of the opening motif (repeat, diatonic sequence, diatonic
//! inversion or retrograde). The last two events are then chosen by the
//! cadence-approach state machine, and events that start a new chord are
//! snapped onto that chord.
//!
//! Chords are spread evenly across the events: event `i` of `n` sounds over
//! chord `i * chords / n`.

pub mod contour;
pub mod motif;
pub mod phrase;
pub mod selection;

pub use contour::Contour;
pub use motif::Motif;
pub use phrase::{Period, Phrase, PhraseRole};
pub use selection::{CadenceState, NoteSelector, SelectionContext};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use self::selection::nearest_chord_tone;
use crate::config::MelodyConfig;
use crate::error::{NameKind, Result, UnknownTemplateError};
use crate::harmony::{Cadence, Progression};
use crate::music::chord::Chord;
use crate::music::event::MelodicEvent;
use crate::music::pitch::{clamp_to_range, Pitch};
use crate::music::scale::{Key, Scale};

/// Chance that a period's antecedent ends deceptively instead of on a half
/// cadence
const DECEPTIVE_ANTECEDENT: f64 = 0.25;

/// Where a phrase sits inside a melody
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhraseSpan {
    pub start: usize,
    pub len: usize,
    pub role: PhraseRole,
    pub cadence: Cadence,
}

/// A generated single line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Melody {
    events: Vec<MelodicEvent>,
    key: Key,
    contour: Contour,
    phrases: Vec<PhraseSpan>,
}

impl Melody {
    pub fn new(events: Vec<MelodicEvent>, key: Key, contour: Contour) -> Self {
        Self {
            events,
            key,
            contour,
            phrases: Vec::new(),
        }
    }

    /// A melody made of the two phrases of a period
    pub fn from_period(period: &Period, key: Key, contour: Contour) -> Self {
        let phrases = vec![
            PhraseSpan {
                start: 0,
                len: period.antecedent.len(),
                role: period.antecedent.role(),
                cadence: period.antecedent.cadence(),
            },
            PhraseSpan {
                start: period.antecedent.len(),
                len: period.consequent.len(),
                role: period.consequent.role(),
                cadence: period.consequent.cadence(),
            },
        ];
        Self {
            events: period.events(),
            key,
            contour,
            phrases,
        }
    }

    pub fn events(&self) -> &[MelodicEvent] {
        &self.events
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn scale(&self) -> &Scale {
        self.key.scale()
    }

    pub fn contour(&self) -> Contour {
        self.contour
    }

    pub fn phrases(&self) -> &[PhraseSpan] {
        &self.phrases
    }

    /// Events of one phrase
    pub fn phrase(&self, index: usize) -> Option<Phrase> {
        let span = self.phrases.get(index)?;
        let events = self.events.get(span.start..span.start + span.len)?;
        Some(Phrase::new(events.to_vec(), span.role, span.cadence))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pitches of the pitched events, in order
    pub fn pitches(&self) -> Vec<Pitch> {
        self.events.iter().filter_map(MelodicEvent::pitch).collect()
    }

    /// Length in quarter notes
    pub fn total_duration(&self) -> f64 {
        self.events.iter().map(MelodicEvent::duration).sum()
    }

    /// Motif from `len` events starting at `start`
    pub fn motif(&self, start: usize, len: usize) -> Motif {
        Motif::extract(&self.events, start, len)
    }

    /// Copy with every pitch moved by octaves into `low..=high`
    pub fn clamp_to_range(&self, low: Pitch, high: Pitch) -> Melody {
        let events = self
            .events
            .iter()
            .map(|e| match e.pitch() {
                Some(p) => e.with_pitch(clamp_to_range(p, low, high)),
                None => *e,
            })
            .collect();
        Melody {
            events,
            ..self.clone()
        }
    }
}

/// Last pitch of a line and the interval that reached it
#[derive(Debug, Clone, Copy, Default)]
struct LineState {
    previous: Option<Pitch>,
    last_interval: Option<i32>,
}

impl LineState {
    fn advance(&mut self, event: &MelodicEvent) {
        if let Some(pitch) = event.pitch() {
            self.last_interval = self.previous.map(|p| p.interval_to(pitch));
            self.previous = Some(pitch);
        }
    }

    fn through(events: &[MelodicEvent]) -> Self {
        let mut state = Self::default();
        for event in events {
            state.advance(event);
        }
        state
    }
}

/// Chords spread evenly across `length` events
struct HarmonicRhythm<'a> {
    progression: &'a Progression,
    length: usize,
}

impl HarmonicRhythm<'_> {
    fn chord_index(&self, index: usize) -> Option<usize> {
        let chords = self.progression.len();
        if chords == 0 || self.length == 0 {
            return None;
        }
        Some((index * chords / self.length).min(chords - 1))
    }

    fn chord(&self, index: usize) -> Option<&Chord> {
        self.chord_index(index)
            .and_then(|c| self.progression.get(c))
    }

    fn key(&self, index: usize) -> &Key {
        self.progression.key_at(self.chord_index(index).unwrap_or(0))
    }

    /// The event starts a new chord
    fn is_boundary(&self, index: usize) -> bool {
        match self.chord_index(index) {
            None => false,
            Some(_) if index == 0 => true,
            Some(chord) => self.chord_index(index - 1) != Some(chord),
        }
    }
}

/// Everything fixed for one phrase
struct Plan<'a> {
    rhythm: HarmonicRhythm<'a>,
    contour: Contour,
    unity: f64,
    cadence: Cadence,
    /// Motif that opens the phrase verbatim
    restate: Option<&'a Motif>,
    /// Pitches forced onto chord boundaries, one per chord
    anchors: &'a [Pitch],
}

impl Plan<'_> {
    fn position(&self, index: usize) -> f64 {
        index as f64 / self.rhythm.length.saturating_sub(1).max(1) as f64
    }
}

/// Melody generator
#[derive(Debug, Clone, Default)]
pub struct MelodyGenerator {
    config: MelodyConfig,
}

impl MelodyGenerator {
    pub fn new(config: MelodyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MelodyConfig {
        &self.config
    }

    fn selector(&self) -> NoteSelector<'_> {
        NoteSelector::new(&self.config)
    }

    fn duration<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.config.durations.choose(rng).copied().unwrap_or(1.0)
    }

    fn final_duration(&self) -> f64 {
        self.config.durations.iter().copied().fold(1.0_f64, f64::max)
    }

    fn in_range(&self, pitch: Pitch) -> Pitch {
        clamp_to_range(pitch, self.config.low, self.config.high)
    }

    /// A fresh motif of `length` notes over `chord`, starting near `start`
    pub fn generate_motif<R: Rng + ?Sized>(
        &self,
        key: &Key,
        chord: Option<&Chord>,
        contour: Contour,
        length: usize,
        start: Option<Pitch>,
        rng: &mut R,
    ) -> Motif {
        let selector = self.selector();
        let mut line = LineState {
            previous: start,
            last_interval: None,
        };
        let mut events = Vec::with_capacity(length);
        for index in 0..length {
            let mut context = SelectionContext::new(key);
            context.previous = line.previous;
            context.last_interval = line.last_interval;
            context.chord = chord;
            context.boundary = index == 0;
            context.bias = contour.bias(index as f64 / length.saturating_sub(1).max(1) as f64);
            let event = MelodicEvent::note(selector.select(&context, rng), self.duration(rng));
            line.advance(&event);
            events.push(event);
        }
        Motif::new(events)
    }

    /// A single phrase of `length` events ending on `cadence`
    pub fn generate_phrase<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        contour: Contour,
        cadence: Cadence,
        motivic_unity: f64,
        length: usize,
        rng: &mut R,
    ) -> Result<Phrase> {
        if matches!(cadence, Cadence::None | Cadence::Indeterminate) {
            return Err(UnknownTemplateError::new(NameKind::Cadence, cadence.name()).into());
        }
        let events = self.phrase_events(
            progression,
            contour,
            motivic_unity,
            cadence,
            length,
            None,
            &[],
            rng,
        );
        Ok(Phrase::new(events, PhraseRole::Independent, cadence))
    }

    /// Antecedent over the first half of `progression` ending on a half (or
    /// occasionally deceptive) cadence, answered by a consequent over the
    /// second half that restates the opening motif and ends authentically.
    /// Each phrase has `length` events.
    pub fn generate_period<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        contour: Contour,
        motivic_unity: f64,
        length: usize,
        rng: &mut R,
    ) -> Period {
        info!(chords = progression.len(), length, %contour, "generating period");
        let (first, second) = split(progression);

        let weak = if rng.gen_bool(DECEPTIVE_ANTECEDENT) {
            Cadence::Deceptive
        } else {
            Cadence::Half
        };
        let antecedent = Phrase::new(
            self.phrase_events(&first, contour, motivic_unity, weak, length, None, &[], rng),
            PhraseRole::Antecedent,
            weak,
        );

        let opening = antecedent.opening_motif(self.config.motif_length.max(1));
        let consequent = Phrase::new(
            self.phrase_events(
                &second,
                contour,
                motivic_unity,
                Cadence::Authentic,
                length,
                Some(&opening),
                &[],
                rng,
            ),
            PhraseRole::Consequent,
            Cadence::Authentic,
        );
        debug!(antecedent = %weak, "period cadences chosen");

        Period {
            antecedent,
            consequent,
        }
    }

    /// A melody of `length` events over `progression`.
    ///
    /// `motivic_unity` (0.0 - 1.0) is the chance that each motif after the
    /// first develops the opening motif instead of new material. The melody
    /// ends on the cadence the progression itself makes, or authentic when
    /// it makes none.
    pub fn generate_melody<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        contour: Contour,
        motivic_unity: f64,
        length: usize,
        rng: &mut R,
    ) -> Melody {
        self.generate_melody_over(progression, &[], contour, motivic_unity, length, rng)
    }

    /// Like [`generate_melody`](Self::generate_melody), with `soprano[c]`
    /// placed on the first event over chord `c` (for example a voice-led
    /// soprano line)
    pub fn generate_melody_over<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        soprano: &[Pitch],
        contour: Contour,
        motivic_unity: f64,
        length: usize,
        rng: &mut R,
    ) -> Melody {
        info!(
            chords = progression.len(),
            length,
            %contour,
            motivic_unity,
            anchors = soprano.len(),
            "generating melody"
        );
        let cadence = match progression.cadence() {
            Cadence::None | Cadence::Indeterminate => Cadence::Authentic,
            cadence => cadence,
        };
        let events = self.phrase_events(
            progression,
            contour,
            motivic_unity,
            cadence,
            length,
            None,
            soprano,
            rng,
        );

        let mut melody = Melody::new(events, progression.key().clone(), contour);
        if !melody.is_empty() {
            melody.phrases.push(PhraseSpan {
                start: 0,
                len: melody.len(),
                role: PhraseRole::Independent,
                cadence,
            });
        }
        melody
    }

    #[allow(clippy::too_many_arguments)]
    fn phrase_events<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        contour: Contour,
        motivic_unity: f64,
        cadence: Cadence,
        length: usize,
        restate: Option<&Motif>,
        anchors: &[Pitch],
        rng: &mut R,
    ) -> Vec<MelodicEvent> {
        let unity = if motivic_unity.is_nan() {
            0.0
        } else {
            motivic_unity.clamp(0.0, 1.0)
        };
        let plan = Plan {
            rhythm: HarmonicRhythm {
                progression,
                length,
            },
            contour,
            unity,
            cadence,
            restate,
            anchors,
        };

        let mut events = self.compose(&plan, rng);
        self.close_phrase(&plan, &mut events, rng);
        self.align_to_harmony(&plan, &mut events);
        self.apply_anchors(&plan, &mut events);
        events
    }

    /// Motif-by-motif assembly
    fn compose<R: Rng + ?Sized>(&self, plan: &Plan<'_>, rng: &mut R) -> Vec<MelodicEvent> {
        let length = plan.rhythm.length;
        let motif_length = self.config.motif_length.max(1);
        let mut events: Vec<MelodicEvent> = Vec::with_capacity(length);
        let mut line = LineState::default();
        let mut opening: Option<Motif> = plan.restate.cloned();

        while events.len() < length {
            let start = events.len();
            let span = motif_length.min(length - start);

            let reused = match (&opening, plan.restate) {
                (Some(motif), Some(_)) if start == 0 => Some(motif.clone()),
                (Some(motif), _) if rng.gen_bool(plan.unity) => {
                    Some(self.develop(motif, plan.rhythm.key(start), line.previous, rng))
                }
                _ => None,
            };
            if let Some(motif) = reused {
                let scale = plan.rhythm.key(start).scale();
                for event in motif.fragment(0, span).events() {
                    let event = match event.pitch() {
                        Some(p) => event.with_pitch(self.in_range(scale.quantize(p))),
                        None => *event,
                    };
                    line.advance(&event);
                    events.push(event);
                }
            }

            while events.len() < start + span {
                let event = self.fresh_event(plan, events.len(), &line, rng);
                line.advance(&event);
                events.push(event);
            }

            if opening.is_none() {
                opening = Some(Motif::extract(&events, start, span));
            }
        }
        events
    }

    /// Repeat, sequence, invert or reverse `motif`, then move it by octaves
    /// next to the line's last pitch
    fn develop<R: Rng + ?Sized>(
        &self,
        motif: &Motif,
        key: &Key,
        previous: Option<Pitch>,
        rng: &mut R,
    ) -> Motif {
        let scale = key.scale();
        let (name, variant) = match rng.gen_range(0..4) {
            0 => ("repeat", motif.clone()),
            1 => {
                let degrees = [-2, -1, 1, 2].choose(rng).copied().unwrap_or(1);
                ("sequence", motif.transpose_in_scale(scale, degrees))
            }
            2 => ("inversion", motif.invert_in_scale(scale, None)),
            _ => ("retrograde", motif.retrograde()),
        };
        debug!(transform = name, "developing opening motif");
        match previous {
            Some(pitch) => variant.anchored_near(pitch),
            None => variant,
        }
    }

    fn context<'p>(
        &self,
        plan: &'p Plan<'_>,
        index: usize,
        line: &LineState,
        state: CadenceState,
    ) -> SelectionContext<'p> {
        SelectionContext {
            key: plan.rhythm.key(index),
            previous: line.previous,
            last_interval: line.last_interval,
            chord: plan.rhythm.chord(index),
            boundary: plan.rhythm.is_boundary(index),
            bias: plan.contour.bias(plan.position(index)),
            state,
            cadence: plan.cadence,
        }
    }

    fn fresh_event<R: Rng + ?Sized>(
        &self,
        plan: &Plan<'_>,
        index: usize,
        line: &LineState,
        rng: &mut R,
    ) -> MelodicEvent {
        let length = plan.rhythm.length;
        let duration = if index + 1 == length {
            self.final_duration()
        } else {
            self.duration(rng)
        };

        let rest_allowed = index > 0 && index + 2 < length && self.config.rest_probability > 0.0;
        if rest_allowed && rng.gen_bool(self.config.rest_probability.min(1.0)) {
            return MelodicEvent::Rest(duration);
        }

        let context = self.context(plan, index, line, CadenceState::Interior);
        MelodicEvent::note(self.selector().select(&context, rng), duration)
    }

    /// Re-choose the last two events for the cadence
    fn close_phrase<R: Rng + ?Sized>(
        &self,
        plan: &Plan<'_>,
        events: &mut [MelodicEvent],
        rng: &mut R,
    ) {
        let length = events.len();
        let selector = self.selector();
        for index in length.saturating_sub(2)..length {
            let state = CadenceState::at(index, length);
            let line = LineState::through(&events[..index]);
            let context = self.context(plan, index, &line, state);
            let pitch = selector.select(&context, rng);
            debug!(index, ?state, pitch = %pitch, cadence = %plan.cadence, "cadence note");
            let duration = if state == CadenceState::Cadential {
                self.final_duration()
            } else {
                events[index].duration()
            };
            events[index] = MelodicEvent::note(pitch, duration);
        }
    }

    /// Snap events that start a chord onto its nearest tone. The cadence
    /// notes keep the degrees the cadence asked for.
    fn align_to_harmony(&self, plan: &Plan<'_>, events: &mut [MelodicEvent]) {
        let length = events.len();
        for (index, event) in events.iter_mut().enumerate() {
            if !plan.rhythm.is_boundary(index)
                || CadenceState::at(index, length) != CadenceState::Interior
            {
                continue;
            }
            let (Some(chord), Some(pitch)) = (plan.rhythm.chord(index), event.pitch()) else {
                continue;
            };
            if !chord.contains_pitch(pitch) {
                let snapped = nearest_chord_tone(pitch, chord, self.config.low, self.config.high);
                debug!(index, from = %pitch, to = %snapped, chord = %chord.symbol(), "snapped to chord tone");
                *event = event.with_pitch(snapped);
            }
        }
    }

    fn apply_anchors(&self, plan: &Plan<'_>, events: &mut [MelodicEvent]) {
        if plan.anchors.is_empty() {
            return;
        }
        for (index, event) in events.iter_mut().enumerate() {
            if !plan.rhythm.is_boundary(index) {
                continue;
            }
            let anchor = plan
                .rhythm
                .chord_index(index)
                .and_then(|c| plan.anchors.get(c));
            if let Some(&pitch) = anchor {
                *event = MelodicEvent::note(pitch, event.duration());
            }
        }
    }
}

/// First and second halves of a progression, each in its own key
fn split(progression: &Progression) -> (Progression, Progression) {
    let chords = progression.chords();
    if chords.len() < 2 {
        return (progression.clone(), progression.clone());
    }
    let mid = chords.len().div_ceil(2);
    (
        Progression::from_chords(progression.key().clone(), chords[..mid].to_vec()),
        Progression::from_chords(progression.key_at(mid).clone(), chords[mid..].to_vec()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::{PitchClass, ScaleType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c_major() -> Key {
        Key::new(PitchClass::C, ScaleType::Major)
    }

    fn basic() -> Progression {
        Progression::from_roman("I-IV-V-I", &c_major()).unwrap()
    }

    #[test]
    fn test_harmonic_rhythm() {
        let progression = basic();
        let rhythm = HarmonicRhythm {
            progression: &progression,
            length: 8,
        };
        let indices: Vec<_> = (0..8).map(|i| rhythm.chord_index(i).unwrap()).collect();
        assert_eq!(indices, vec![0, 0, 1, 1, 2, 2, 3, 3]);
        let boundaries: Vec<_> = (0..8).filter(|&i| rhythm.is_boundary(i)).collect();
        assert_eq!(boundaries, vec![0, 2, 4, 6]);

        let empty = Progression::new(c_major());
        let rhythm = HarmonicRhythm {
            progression: &empty,
            length: 4,
        };
        assert!(rhythm.chord(0).is_none());
        assert!(!rhythm.is_boundary(0));
    }

    #[test]
    fn test_melody_shape() {
        let generator = MelodyGenerator::default();
        let progression = basic();
        let mut rng = StdRng::seed_from_u64(42);
        let melody = generator.generate_melody(&progression, Contour::Arch, 0.5, 12, &mut rng);

        assert_eq!(melody.len(), 12);
        assert_eq!(melody.contour(), Contour::Arch);
        assert_eq!(melody.phrases().len(), 1);
        assert_eq!(melody.phrases()[0].cadence, Cadence::Authentic);
        let config = generator.config();
        for pitch in melody.pitches() {
            assert!(pitch >= config.low && pitch <= config.high, "{}", pitch);
            assert!(melody.scale().contains_pitch(pitch));
        }
        // Ends on the tonic with the longest duration
        let last = melody.events().last().unwrap();
        assert_eq!(last.pitch().unwrap().name(), "C");
        assert_eq!(last.duration(), 2.0);
    }

    #[test]
    fn test_boundaries_are_chord_tones() {
        let generator = MelodyGenerator::default();
        let progression = Progression::from_template("pop", &c_major()).unwrap();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let melody = generator.generate_melody(&progression, Contour::Wave, 0.3, 16, &mut rng);
            for (index, chord) in [(0, 0), (4, 1), (8, 2), (12, 3)] {
                let pitch = melody.events()[index].pitch().unwrap();
                assert!(
                    progression.chords()[chord].contains_pitch(pitch),
                    "seed {} event {} = {}",
                    seed,
                    index,
                    pitch
                );
            }
        }
    }

    #[test]
    fn test_full_unity_restates_opening() {
        let generator = MelodyGenerator::default();
        let progression = Progression::from_roman("I-I-I-I", &c_major()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let melody = generator.generate_melody(&progression, Contour::Static, 1.0, 12, &mut rng);
        let opening = melody.motif(0, 4);
        let second = melody.motif(4, 4);
        assert_eq!(second.len(), 4);
        // Every development keeps the rhythm as a multiset
        let mut a = opening.rhythm().to_vec();
        let mut b = second.rhythm().to_vec();
        a.sort_by(|x, y| x.partial_cmp(y).unwrap());
        b.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_anchors_override_boundaries() {
        let generator = MelodyGenerator::default();
        let progression = basic();
        let soprano = [72, 69, 71, 72].map(Pitch::new);
        let mut rng = StdRng::seed_from_u64(5);
        let melody =
            generator.generate_melody_over(&progression, &soprano, Contour::Arch, 0.0, 8, &mut rng);
        for (index, pitch) in [(0, 72), (2, 69), (4, 71), (6, 72)] {
            assert_eq!(melody.events()[index].pitch(), Some(Pitch::new(pitch)));
        }
    }

    #[test]
    fn test_phrase_rejects_open_cadence() {
        let generator = MelodyGenerator::default();
        let mut rng = StdRng::seed_from_u64(0);
        let result =
            generator.generate_phrase(&basic(), Contour::Arch, Cadence::None, 0.5, 8, &mut rng);
        assert!(result.is_err());

        let phrase = generator
            .generate_phrase(&basic(), Contour::Arch, Cadence::Half, 0.5, 8, &mut rng)
            .unwrap();
        assert_eq!(phrase.len(), 8);
        assert_eq!(phrase.cadence(), Cadence::Half);
        assert_eq!(phrase.pitches().last().unwrap().name(), "G");
    }

    #[test]
    fn test_cadence_notes_survive_chord_changes() {
        let generator = MelodyGenerator::default();
        let key = c_major();
        // The final event starts IV, which has no G
        let progression = Progression::from_roman("I-IV", &key).unwrap();
        for seed in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed);
            let phrase = generator
                .generate_phrase(&progression, Contour::Arch, Cadence::Half, 0.0, 2, &mut rng)
                .unwrap();
            assert_eq!(phrase.cadence(), Cadence::Half);
            assert_eq!(phrase.pitches().last().unwrap().name(), "G", "seed {}", seed);
        }

        // V has no C, yet an authentic ending still lands on the tonic
        let progression = Progression::from_roman("ii-V", &key).unwrap();
        for seed in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed);
            let phrase = generator
                .generate_phrase(
                    &progression,
                    Contour::Wave,
                    Cadence::Authentic,
                    0.5,
                    3,
                    &mut rng,
                )
                .unwrap();
            assert_eq!(phrase.pitches().last().unwrap().name(), "C", "seed {}", seed);
        }
    }

    #[test]
    fn test_period() {
        let generator = MelodyGenerator::default();
        let progression = Progression::from_template("circle", &c_major()).unwrap();
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let period = generator.generate_period(&progression, Contour::Arch, 0.5, 8, &mut rng);
            assert!(period.is_well_formed());
            assert_eq!(period.len(), 16);
            assert_eq!(period.consequent.pitches().last().unwrap().name(), "C");

            let melody = Melody::from_period(&period, c_major(), Contour::Arch);
            assert_eq!(melody.phrases().len(), 2);
            assert_eq!(melody.phrase(1).unwrap(), period.consequent);
        }
    }

    #[test]
    fn test_generate_motif() {
        let generator = MelodyGenerator::default();
        let key = c_major();
        let chord = crate::harmony::resolve("V", &key).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let motif = generator.generate_motif(
            &key,
            Some(&chord),
            Contour::Ascending,
            4,
            Some(Pitch::new(67)),
            &mut rng,
        );
        assert_eq!(motif.len(), 4);
        assert_eq!(motif.intervals().len(), 3);
        assert!(motif.pitches().iter().all(|p| key.scale().contains_pitch(*p)));
    }

    #[test]
    fn test_zero_length_and_empty_progression() {
        let generator = MelodyGenerator::default();
        let mut rng = StdRng::seed_from_u64(1);
        let melody = generator.generate_melody(&basic(), Contour::Arch, 0.5, 0, &mut rng);
        assert!(melody.is_empty());
        assert!(melody.phrases().is_empty());

        let empty = Progression::new(c_major());
        let melody = generator.generate_melody(&empty, Contour::Descending, 0.5, 6, &mut rng);
        assert_eq!(melody.len(), 6);
        assert_eq!(melody.pitches().last().unwrap().name(), "C");
    }

    #[test]
    fn test_clamp_to_range() {
        let generator = MelodyGenerator::default();
        let mut rng = StdRng::seed_from_u64(3);
        let melody = generator.generate_melody(&basic(), Contour::Arch, 0.5, 8, &mut rng);
        let low = melody.clamp_to_range(Pitch::new(48), Pitch::new(59));
        for (a, b) in melody.pitches().iter().zip(low.pitches()) {
            assert!(a.same_class(b));
            assert!(b.semitone() >= 48 && b.semitone() <= 59);
        }
        assert_eq!(low.total_duration(), melody.total_duration());
    }
}
