// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Functional-harmony progression generator.
//!
//! Chords are drawn by cycling tonic, subdominant, dominant and back to
//! tonic, picking among functionally equivalent chords by weight. The last
//! one or two chords are then overwritten to land the requested cadence.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use super::cadence::{Cadence, HarmonicFunction};
use super::progression::Progression;
use super::roman::resolve;
use crate::error::{NameKind, Result, UnknownTemplateError};
use crate::music::scale::Key;

/// A weighted chord choice: numeral in major keys, numeral in minor keys
struct Choice {
    major: &'static str,
    minor: &'static str,
    weight: f64,
}

const TONIC: [Choice; 3] = [
    Choice { major: "I", minor: "i", weight: 0.6 },
    Choice { major: "vi", minor: "VI", weight: 0.25 },
    Choice { major: "iii", minor: "III", weight: 0.15 },
];

const SUBDOMINANT: [Choice; 2] = [
    Choice { major: "IV", minor: "iv", weight: 0.55 },
    Choice { major: "ii", minor: "ii°", weight: 0.45 },
];

const DOMINANT: [Choice; 3] = [
    Choice { major: "V", minor: "V", weight: 0.7 },
    Choice { major: "V7", minor: "V7", weight: 0.2 },
    Choice { major: "vii°", minor: "vii°", weight: 0.1 },
];

fn choices(function: HarmonicFunction) -> &'static [Choice] {
    match function {
        HarmonicFunction::Tonic => &TONIC,
        HarmonicFunction::Subdominant => &SUBDOMINANT,
        HarmonicFunction::Dominant => &DOMINANT,
    }
}

fn next_function(function: HarmonicFunction) -> HarmonicFunction {
    match function {
        HarmonicFunction::Tonic => HarmonicFunction::Subdominant,
        HarmonicFunction::Subdominant => HarmonicFunction::Dominant,
        HarmonicFunction::Dominant => HarmonicFunction::Tonic,
    }
}

fn pick<R: Rng + ?Sized>(table: &'static [Choice], minor: bool, rng: &mut R) -> &'static str {
    let index = WeightedIndex::new(table.iter().map(|c| c.weight))
        .map(|dist| dist.sample(rng))
        .unwrap_or(0);
    let choice = &table[index];
    if minor {
        choice.minor
    } else {
        choice.major
    }
}

/// Numerals that end a progression with `cadence`, in order
fn cadence_tail(
    cadence: Cadence,
    minor: bool,
) -> std::result::Result<&'static [&'static str], UnknownTemplateError> {
    let tail: &'static [&'static str] = match (cadence, minor) {
        (Cadence::Authentic, false) => &["V", "I"],
        (Cadence::Authentic, true) => &["V", "i"],
        (Cadence::Plagal, false) => &["IV", "I"],
        (Cadence::Plagal, true) => &["iv", "i"],
        (Cadence::Deceptive, false) => &["V", "vi"],
        (Cadence::Deceptive, true) => &["V", "VI"],
        (Cadence::Half, _) => &["V"],
        (Cadence::None | Cadence::Indeterminate, _) => {
            return Err(UnknownTemplateError::new(NameKind::Cadence, cadence.name()))
        }
    };
    Ok(tail)
}

/// Generate `length` chords in `key` ending with `cadence`.
///
/// The first chord is always the tonic (unless the cadence needs every
/// slot). Requesting [`Cadence::None`] or [`Cadence::Indeterminate`] is an
/// error: neither names an ending that can be written.
pub fn functional<R: Rng + ?Sized>(
    key: &Key,
    length: usize,
    cadence: Cadence,
    rng: &mut R,
) -> Result<Progression> {
    let minor = key.scale_type().is_minor();
    let tail = cadence_tail(cadence, minor)?;

    let mut numerals: Vec<&'static str> = Vec::with_capacity(length);
    let mut function = HarmonicFunction::Tonic;
    for i in 0..length {
        let numeral = if i == 0 {
            if minor {
                "i"
            } else {
                "I"
            }
        } else {
            pick(choices(function), minor, rng)
        };
        numerals.push(numeral);
        function = next_function(function);
    }

    // Overwrite the ending; short progressions keep only the last chords
    let forced = tail.len().min(length);
    let start = length - forced;
    numerals[start..].copy_from_slice(&tail[tail.len() - forced..]);

    debug!(key = %key, length, cadence = %cadence, numerals = ?numerals, "functional progression");

    let mut progression = Progression::new(key.clone());
    for numeral in numerals {
        progression.add(resolve(numeral, key)?);
    }
    Ok(progression)
}

impl Progression {
    /// See [`functional`]
    pub fn functional<R: Rng + ?Sized>(
        key: &Key,
        length: usize,
        cadence: Cadence,
        rng: &mut R,
    ) -> Result<Progression> {
        functional(key, length, cadence, rng)
    }
}
