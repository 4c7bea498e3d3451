// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Motifs and their transformations.
//!
//! A motif is immutable: every transformation returns a new one. The
//! interval pattern (semitone steps between consecutive pitched events) and
//! the rhythm pattern (event durations) are computed once on construction.

use serde::Serialize;

use crate::music::event::MelodicEvent;
use crate::music::pitch::Pitch;
use crate::music::scale::Scale;

/// Smallest leap that `ornament` fills with a passing tone
const ORNAMENT_LEAP: i32 = 4;

/// A short melodic idea
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Motif {
    events: Vec<MelodicEvent>,
    intervals: Vec<i32>,
    rhythm: Vec<f64>,
}

impl Motif {
    pub fn new(events: Vec<MelodicEvent>) -> Self {
        let pitches: Vec<Pitch> = events.iter().filter_map(MelodicEvent::pitch).collect();
        let intervals = pitches.windows(2).map(|w| w[0].interval_to(w[1])).collect();
        let rhythm = events.iter().map(MelodicEvent::duration).collect();
        Self {
            events,
            intervals,
            rhythm,
        }
    }

    /// Notes of equal duration
    pub fn from_pitches(pitches: &[Pitch], duration: f64) -> Self {
        Self::new(
            pitches
                .iter()
                .map(|&p| MelodicEvent::note(p, duration))
                .collect(),
        )
    }

    /// Copy `len` events of a line starting at `start`; clipped to the line
    pub fn extract(line: &[MelodicEvent], start: usize, len: usize) -> Self {
        let start = start.min(line.len());
        let end = start.saturating_add(len).min(line.len());
        Self::new(line[start..end].to_vec())
    }

    pub fn events(&self) -> &[MelodicEvent] {
        &self.events
    }

    /// Semitone steps between consecutive pitched events
    pub fn intervals(&self) -> &[i32] {
        &self.intervals
    }

    /// Event durations in quarter notes
    pub fn rhythm(&self) -> &[f64] {
        &self.rhythm
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn pitches(&self) -> Vec<Pitch> {
        self.events.iter().filter_map(MelodicEvent::pitch).collect()
    }

    pub fn first_pitch(&self) -> Option<Pitch> {
        self.events.iter().find_map(MelodicEvent::pitch)
    }

    pub fn last_pitch(&self) -> Option<Pitch> {
        self.events.iter().rev().find_map(MelodicEvent::pitch)
    }

    pub fn total_duration(&self) -> f64 {
        self.rhythm.iter().sum()
    }

    fn map_pitches(&self, f: impl Fn(Pitch) -> Pitch) -> Self {
        Self::new(
            self.events
                .iter()
                .map(|e| match e.pitch() {
                    Some(p) => e.with_pitch(f(p)),
                    None => *e,
                })
                .collect(),
        )
    }

    fn map_durations(&self, factor: f64) -> Self {
        Self::new(
            self.events
                .iter()
                .map(|e| e.with_duration(e.duration() * factor))
                .collect(),
        )
    }

    /// Shift every pitch by `semitones`
    pub fn transpose(&self, semitones: i32) -> Self {
        self.map_pitches(|p| p.transpose(semitones))
    }

    /// Mirror pitches around `axis`, or around the first pitch when `None`
    pub fn invert(&self, axis: Option<Pitch>) -> Self {
        let Some(axis) = axis.or_else(|| self.first_pitch()) else {
            return self.clone();
        };
        self.map_pitches(|p| Pitch::new(2 * axis.semitone() - p.semitone()))
    }

    /// Events in reverse order
    pub fn retrograde(&self) -> Self {
        Self::new(self.events.iter().rev().copied().collect())
    }

    /// Durations doubled
    pub fn augment(&self) -> Self {
        self.map_durations(2.0)
    }

    /// Durations halved
    pub fn diminish(&self) -> Self {
        self.map_durations(0.5)
    }

    /// Sub-motif of `len` events from `start`
    pub fn fragment(&self, start: usize, len: usize) -> Self {
        Self::extract(&self.events, start, len)
    }

    /// Fill each leap of a major third or more with a passing tone at the
    /// scale pitch nearest the midpoint. The note before the leap gives up
    /// half its duration to the passing tone.
    pub fn ornament(&self, scale: &Scale) -> Self {
        let mut events = Vec::with_capacity(self.events.len() * 2);
        for (i, event) in self.events.iter().enumerate() {
            let next_pitch = self.events[i + 1..].first().and_then(MelodicEvent::pitch);
            match (event.pitch(), next_pitch) {
                (Some(from), Some(to)) if from.interval_to(to).abs() >= ORNAMENT_LEAP => {
                    let half = event.duration() / 2.0;
                    let midpoint = scale.quantize(from.transpose(from.interval_to(to) / 2));
                    events.push(event.with_duration(half));
                    events.push(MelodicEvent::note(midpoint, half));
                }
                _ => events.push(*event),
            }
        }
        Self::new(events)
    }

    /// Same interval pattern, or its exact mirror, at the same length
    pub fn related_to(&self, other: &Motif) -> bool {
        if self.intervals.len() != other.intervals.len() {
            return false;
        }
        let same = self.intervals == other.intervals;
        let mirrored = self
            .intervals
            .iter()
            .zip(&other.intervals)
            .all(|(a, b)| *a == -*b);
        same || mirrored
    }

    /// Move every pitch `degrees` scale steps; off-scale pitches quantize first
    pub fn transpose_in_scale(&self, scale: &Scale, degrees: i32) -> Self {
        self.map_pitches(|p| scale.transpose_in_scale(p, degrees))
    }

    /// Mirror pitches in scale steps around `axis` (default first pitch)
    pub fn invert_in_scale(&self, scale: &Scale, axis: Option<Pitch>) -> Self {
        let Some(axis) = axis.or_else(|| self.first_pitch()) else {
            return self.clone();
        };
        let axis = scale.quantize(axis);
        self.map_pitches(|p| scale.transpose_in_scale(axis, -scale.steps_between(axis, p)))
    }

    /// Shift by octaves so the first pitch lands as close to `target` as
    /// possible
    pub fn anchored_near(&self, target: Pitch) -> Self {
        let Some(first) = self.first_pitch() else {
            return self.clone();
        };
        let octaves = (first.interval_to(target) as f64 / 12.0).round() as i32;
        self.transpose(octaves * 12)
    }
}
