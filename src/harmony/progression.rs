// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord progressions.
//!
//! A [`Progression`] is an ordered list of chords in a home key. Chords may
//! move to other keys only through recorded [`Modulation`]s; every chord
//! therefore has exactly one key context, found with [`Progression::key_at`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cadence::{self, Cadence, CadenceChord, HarmonicFunction};
use super::modulation::{Modulation, ModulationMethod};
use super::roman::{resolve, RomanNumeral};
use super::templates;
use crate::error::{NotationError, Result};
use crate::music::chord::Chord;
use crate::music::scale::Key;

/// Characters that separate chord symbols in Roman-numeral text
fn is_separator(c: char) -> bool {
    c == '-' || c == '|' || c == ',' || c.is_whitespace()
}

/// An ordered sequence of chords with key context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    key: Key,
    chords: Vec<Chord>,
    #[serde(default)]
    modulations: Vec<Modulation>,
}

impl Progression {
    /// Create an empty progression
    pub fn new(key: Key) -> Self {
        Self {
            key,
            chords: Vec::new(),
            modulations: Vec::new(),
        }
    }

    /// Create a progression from already-built chords
    pub fn from_chords(key: Key, chords: Vec<Chord>) -> Self {
        Self {
            key,
            chords,
            modulations: Vec::new(),
        }
    }

    /// Parse Roman-numeral text such as "I-IV-V-I"
    pub fn from_roman(text: &str, key: &Key) -> std::result::Result<Self, NotationError> {
        let chords = text
            .split(is_separator)
            .filter(|token| !token.is_empty())
            .map(|token| resolve(token, key))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(key = %key, chords = chords.len(), "parsed progression");
        Ok(Self::from_chords(key.clone(), chords))
    }

    /// Build a progression from a named template
    pub fn from_template(name: &str, key: &Key) -> Result<Self> {
        let template = templates::lookup(name)?;
        Ok(Self::from_roman(template.roman, key)?)
    }

    /// Home key
    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn modulations(&self) -> &[Modulation] {
        &self.modulations
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chord> {
        self.chords.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chord> {
        self.chords.iter()
    }

    /// Append a chord
    pub fn add(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    /// Resolve a chord symbol in the key at the end and append it
    pub fn add_roman(&mut self, notation: &str) -> std::result::Result<(), NotationError> {
        let key = self.key_at(self.chords.len()).clone();
        self.chords.push(resolve(notation, &key)?);
        Ok(())
    }

    /// Insert a chord before `index` (clamped to the end)
    pub fn insert(&mut self, index: usize, chord: Chord) {
        let index = index.min(self.chords.len());
        self.chords.insert(index, chord);
        for modulation in &mut self.modulations {
            if modulation.index >= index {
                modulation.index += 1;
            }
        }
    }

    /// Remove and return the chord at `index`
    pub fn remove(&mut self, index: usize) -> Option<Chord> {
        if index >= self.chords.len() {
            return None;
        }
        let chord = self.chords.remove(index);
        for modulation in &mut self.modulations {
            if modulation.index > index {
                modulation.index -= 1;
            }
        }
        let len = self.chords.len();
        self.modulations.retain(|m| m.index < len);
        Some(chord)
    }

    /// Key context of the chord at `index`
    pub fn key_at(&self, index: usize) -> &Key {
        self.modulations
            .iter()
            .filter(|m| m.index <= index)
            .last()
            .map(|m| &m.to)
            .unwrap_or(&self.key)
    }

    /// Key context after the last chord
    pub fn final_key(&self) -> &Key {
        self.key_at(self.chords.len().saturating_sub(1))
    }

    /// Scale degree of the chord at `index` in its own key
    pub fn degree_at(&self, index: usize) -> Option<u8> {
        let chord = self.chords.get(index)?;
        self.degree_in(chord, index, self.key_at(index))
    }

    /// Harmonic function of the chord at `index`
    pub fn function_at(&self, index: usize) -> Option<HarmonicFunction> {
        self.degree_at(index).and_then(HarmonicFunction::of_degree)
    }

    fn degree_in(&self, chord: &Chord, index: usize, key: &Key) -> Option<u8> {
        match chord.numeral() {
            Some(numeral) if self.key_at(index) == key => Some(numeral.degree()),
            _ => RomanNumeral::from_chord(chord, key).map(|n| n.degree()),
        }
    }

    fn numeral_at(&self, index: usize) -> Option<RomanNumeral> {
        let chord = &self.chords[index];
        chord
            .numeral()
            .cloned()
            .or_else(|| RomanNumeral::from_chord(chord, self.key_at(index)))
    }

    /// Re-resolve every chord in a new key, keeping each chord's degree role
    pub fn transpose(&self, new_key: &Key) -> Progression {
        let interval = self.key.root().interval_to(new_key.root()) as i8;
        let map_key = |key: &Key| -> Key {
            if key == &self.key {
                new_key.clone()
            } else {
                key.transpose(interval)
            }
        };

        let chords = self
            .chords
            .iter()
            .enumerate()
            .map(|(i, chord)| match chord.numeral() {
                Some(numeral) => numeral.resolve(&map_key(self.key_at(i))),
                None => chord.transpose(interval),
            })
            .collect();

        let modulations = self
            .modulations
            .iter()
            .map(|m| m.remapped(map_key(&m.from), map_key(&m.to)))
            .collect();

        Progression {
            key: new_key.clone(),
            chords,
            modulations,
        }
    }

    /// Append another progression. A key change at the join is recorded as
    /// a direct modulation.
    pub fn extend(&mut self, other: &Progression) {
        let offset = self.chords.len();
        let end_key = self.key_at(offset).clone();
        if !other.is_empty() && other.key != end_key {
            self.modulations.push(Modulation {
                index: offset,
                from: end_key,
                to: other.key.clone(),
                method: ModulationMethod::Direct,
                pivot: None,
            });
        }
        self.chords.extend(other.chords.iter().cloned());
        self.modulations.extend(other.modulations.iter().map(|m| Modulation {
            index: m.index + offset,
            ..m.clone()
        }));
    }

    /// This progression played `times` times in a row
    pub fn repeat(&self, times: usize) -> Progression {
        let mut result = Progression::new(self.key.clone());
        for _ in 0..times {
            result.extend(self);
        }
        result
    }

    /// Roman-numeral text, chords joined by "-"
    pub fn to_roman(&self) -> String {
        (0..self.chords.len())
            .map(|i| match self.numeral_at(i) {
                Some(numeral) => numeral.to_string(),
                None => self.chords[i].symbol(),
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Classify the final cadence, measured in the key the progression ends in
    pub fn cadence(&self) -> Cadence {
        let len = self.chords.len();
        let key = self.final_key();
        let tail: Vec<CadenceChord> = (len.saturating_sub(2)..len)
            .map(|i| {
                let chord = &self.chords[i];
                CadenceChord {
                    degree: self.degree_in(chord, i, key),
                    root: chord.root(),
                    inversion: chord.inversion(),
                }
            })
            .collect();
        cadence::detect(&tail)
    }

    pub(crate) fn chords_mut(&mut self) -> &mut [Chord] {
        &mut self.chords
    }

    pub(crate) fn push_modulation(&mut self, modulation: Modulation) {
        self.modulations.push(modulation);
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.to_roman(), self.key)
    }
}
