// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tonal composition engine.
//!
//! - [`harmony`]: Roman-numeral progressions, templates, cadences,
//!   functional generation and modulation
//! - [`voicing`]: four-part (SATB) voice leading
//! - [`melody`]: contour-driven melody generation with motif development
//!
//! All randomness comes from the `rand::Rng` passed into each call, so a
//! seeded generator reproduces its output exactly.

pub mod config;
pub mod error;
pub mod harmony;
pub mod melody;
pub mod music;
pub mod voicing;

pub use config::{EngineConfig, MelodyConfig, VoiceLeadingConfig};
pub use error::{Error, NameKind, NotationError, Result, UnknownTemplateError};
pub use harmony::{Cadence, Modulation, ModulationMethod, Progression, RomanNumeral};
pub use melody::{Contour, Melody, MelodyGenerator, Motif, Period, Phrase, PhraseRole};
pub use music::{Chord, ChordQuality, Key, MelodicEvent, Note, Pitch, PitchClass, Scale, ScaleType};
pub use voicing::{
    ProgressionVoicing, TransitionVoicing, VoiceLeader, VoiceLeadingFailure, VoiceType, Violation,
    Voicing,
};
