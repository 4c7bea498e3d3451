// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melodic events: pitched notes and rests.

use serde::{Deserialize, Serialize};

use super::pitch::{clamp_to_range, Pitch};

/// A pitched note with duration in quarter notes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: Pitch,
    /// Duration in quarter notes
    pub duration: f64,
    /// Velocity (1-127), if specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<u8>,
}

impl Note {
    /// Create a note without velocity
    pub fn new(pitch: Pitch, duration: f64) -> Self {
        Self {
            pitch,
            duration,
            velocity: None,
        }
    }

    /// Set the velocity for this note
    pub fn with_velocity(mut self, velocity: u8) -> Self {
        self.velocity = Some(velocity.clamp(1, 127));
        self
    }

    /// Move this note by octaves into `low..=high`
    pub fn clamp_to_range(self, low: Pitch, high: Pitch) -> Self {
        Self {
            pitch: clamp_to_range(self.pitch, low, high),
            ..self
        }
    }
}

/// One event of a melodic line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MelodicEvent {
    Pitched(Note),
    /// Silence for a duration in quarter notes
    Rest(f64),
}

impl MelodicEvent {
    /// Shorthand for a pitched event
    pub fn note(pitch: Pitch, duration: f64) -> Self {
        MelodicEvent::Pitched(Note::new(pitch, duration))
    }

    pub fn duration(&self) -> f64 {
        match self {
            MelodicEvent::Pitched(note) => note.duration,
            MelodicEvent::Rest(duration) => *duration,
        }
    }

    pub fn pitch(&self) -> Option<Pitch> {
        match self {
            MelodicEvent::Pitched(note) => Some(note.pitch),
            MelodicEvent::Rest(_) => None,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, MelodicEvent::Rest(_))
    }

    /// Same event with a different duration
    pub fn with_duration(self, duration: f64) -> Self {
        match self {
            MelodicEvent::Pitched(note) => MelodicEvent::Pitched(Note { duration, ..note }),
            MelodicEvent::Rest(_) => MelodicEvent::Rest(duration),
        }
    }

    /// Same event with a different pitch; rests are unchanged
    pub fn with_pitch(self, pitch: Pitch) -> Self {
        match self {
            MelodicEvent::Pitched(note) => MelodicEvent::Pitched(Note { pitch, ..note }),
            rest @ MelodicEvent::Rest(_) => rest,
        }
    }
}
