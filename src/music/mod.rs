// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory foundation.
//!
//! This module provides pitches, scale definitions, key management,
//! chord descriptors and melodic events used by the composition engine.

pub mod chord;
pub mod event;
pub mod pitch;
pub mod scale;

pub use chord::{Chord, ChordQuality};
pub use event::{MelodicEvent, Note};
pub use pitch::{clamp_to_range, Pitch, Semitones};
pub use scale::{Key, PitchClass, Scale, ScaleType};
