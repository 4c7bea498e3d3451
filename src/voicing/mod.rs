// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Four-part (SATB) voice leading.
//!
//! [`VoiceLeader`] turns chords into [`Voicing`]s one transition at a time.
//! Each transition is a bounded search scored by rule violations and then by
//! total motion. Difficult transitions keep their violations and the pass
//! continues; only a chord that cannot be placed at all stops it.

pub mod range;
pub mod rules;
mod search;
#[allow(clippy::module_inception)]
pub mod voicing;

pub use range::{VoiceRange, VoiceRanges, VoiceType};
pub use rules::{Motion, RuleChecker, Violation};
pub use voicing::{chord_tones, realize, Doubling, Voicing};

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use self::search::{Candidate, Search};
use crate::config::VoiceLeadingConfig;
use crate::harmony::progression::Progression;
use crate::music::chord::Chord;
use crate::music::event::MelodicEvent;
use crate::music::pitch::Pitch;
use crate::music::scale::Key;

/// A violation and the index of the chord where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexedViolation {
    pub index: usize,
    pub violation: Violation,
}

/// Two voiced chords and what it cost to connect them
#[derive(Debug, Clone)]
pub struct TransitionVoicing {
    pub from: Voicing,
    pub to: Voicing,
    pub violations: Vec<Violation>,
    pub motion: i32,
}

/// A voiced progression
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgressionVoicing {
    pub voicings: Vec<Voicing>,
    pub violations: Vec<IndexedViolation>,
    pub total_motion: i32,
}

impl ProgressionVoicing {
    pub fn len(&self) -> usize {
        self.voicings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voicings.is_empty()
    }

    /// Pitches of one voice, chord by chord
    pub fn line(&self, voice: VoiceType) -> Vec<Pitch> {
        self.voicings.iter().map(|v| v.pitch(voice)).collect()
    }

    /// One voice as melodic events, each chord lasting `duration` quarters
    pub fn part(&self, voice: VoiceType, duration: f64) -> Vec<MelodicEvent> {
        self.line(voice)
            .into_iter()
            .map(|pitch| MelodicEvent::note(pitch, duration))
            .collect()
    }

    /// All four parts, soprano first
    pub fn parts(&self, duration: f64) -> [Vec<MelodicEvent>; 4] {
        VoiceType::ALL.map(|voice| self.part(voice, duration))
    }

    /// Copy of `progression` with each chord carrying its voicing
    pub fn apply_to(&self, progression: &Progression) -> Progression {
        let mut voiced = progression.clone();
        for (chord, voicing) in voiced.chords_mut().iter_mut().zip(&self.voicings) {
            *chord = voicing.to_chord();
        }
        voiced
    }
}

/// The voice-leading search could not place a chord at all
#[derive(Debug, Clone, Error)]
#[error("no usable voicing for chord {transition} within {attempts} attempts")]
pub struct VoiceLeadingFailure {
    /// Index of the chord that could not be voiced
    pub transition: usize,
    pub attempts: usize,
    /// Everything voiced before the failure
    pub partial: ProgressionVoicing,
}

/// SATB voice-leading engine
#[derive(Debug, Clone, Default)]
pub struct VoiceLeader {
    config: VoiceLeadingConfig,
    checker: RuleChecker,
}

impl VoiceLeader {
    pub fn new(config: VoiceLeadingConfig) -> Self {
        let checker = RuleChecker::new(config.ranges);
        Self { config, checker }
    }

    pub fn config(&self) -> &VoiceLeadingConfig {
        &self.config
    }

    pub fn checker(&self) -> &RuleChecker {
        &self.checker
    }

    fn search(&self) -> Search<'_> {
        Search {
            checker: &self.checker,
            doubling: self.config.doubling,
            attempts: self.config.attempts.max(1),
        }
    }

    fn failure(&self, transition: usize, partial: ProgressionVoicing) -> VoiceLeadingFailure {
        warn!(transition, attempts = self.config.attempts, "voice-leading budget exhausted");
        VoiceLeadingFailure {
            transition,
            attempts: self.config.attempts,
            partial,
        }
    }

    /// Realize a single chord
    pub fn voice_chord<R: Rng + ?Sized>(
        &self,
        chord: &Chord,
        rng: &mut R,
    ) -> Result<Voicing, VoiceLeadingFailure> {
        self.search()
            .first(chord, rng)
            .map(|c| c.voicing)
            .ok_or_else(|| self.failure(0, ProgressionVoicing::default()))
    }

    /// Voice `a` and lead it into `b`
    pub fn voice_lead<R: Rng + ?Sized>(
        &self,
        a: &Chord,
        b: &Chord,
        key: &Key,
        rng: &mut R,
    ) -> Result<TransitionVoicing, VoiceLeadingFailure> {
        let search = self.search();
        let first = search
            .first(a, rng)
            .ok_or_else(|| self.failure(0, ProgressionVoicing::default()))?;
        let Some(next) = search.next(&first.voicing, b, key, rng) else {
            let partial = ProgressionVoicing {
                voicings: vec![first.voicing],
                violations: Vec::new(),
                total_motion: 0,
            };
            return Err(self.failure(1, partial));
        };

        let mut violations = first.violations;
        violations.extend(next.violations);
        Ok(TransitionVoicing {
            from: first.voicing,
            to: next.voicing,
            violations,
            motion: next.motion,
        })
    }

    /// Voice a whole progression greedily, chord by chord
    pub fn voice_lead_progression<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        rng: &mut R,
    ) -> Result<ProgressionVoicing, VoiceLeadingFailure> {
        info!(
            chords = progression.len(),
            key = %progression.key(),
            "voice leading progression"
        );
        let search = self.search();
        let mut result = ProgressionVoicing::default();

        for (index, chord) in progression.chords().iter().enumerate() {
            let candidate: Option<Candidate> = match result.voicings.last() {
                None => search.first(chord, rng),
                Some(previous) => search.next(previous, chord, progression.key_at(index), rng),
            };
            let Some(candidate) = candidate else {
                return Err(self.failure(index, result));
            };

            debug!(
                index,
                motion = candidate.motion,
                violations = candidate.violations.len(),
                voicing = %candidate.voicing,
                "voiced chord"
            );
            if !candidate.violations.is_empty() {
                warn!(
                    index,
                    violations = ?candidate.violations,
                    "keeping best candidate with violations"
                );
            }

            result.total_motion += candidate.motion;
            result.violations.extend(
                candidate
                    .violations
                    .into_iter()
                    .map(|violation| IndexedViolation { index, violation }),
            );
            result.voicings.push(candidate.voicing);
        }

        Ok(result)
    }
}
