// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key changes by pivot chord or direct dominant.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::progression::Progression;
use super::roman::RomanNumeral;
use crate::error::{NameKind, UnknownTemplateError};
use crate::music::chord::Chord;
use crate::music::scale::Key;

/// How a modulation reaches the new key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulationMethod {
    /// Through a chord common to both keys
    Pivot,
    /// Straight to the new key's dominant
    Direct,
}

impl ModulationMethod {
    pub fn from_str(s: &str) -> Result<Self, UnknownTemplateError> {
        match s.trim().to_lowercase().as_str() {
            "pivot" | "common_chord" | "common chord" => Ok(ModulationMethod::Pivot),
            "direct" | "abrupt" => Ok(ModulationMethod::Direct),
            _ => Err(UnknownTemplateError::new(NameKind::ModulationMethod, s)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModulationMethod::Pivot => "pivot",
            ModulationMethod::Direct => "direct",
        }
    }
}

impl fmt::Display for ModulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chord shared by two keys, with its numeral in each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotChord {
    pub chord: Chord,
    pub from_numeral: RomanNumeral,
    pub to_numeral: RomanNumeral,
}

impl fmt::Display for PivotChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} = {})",
            self.chord.symbol(),
            self.from_numeral,
            self.to_numeral
        )
    }
}

/// A recorded key change. Chords from `index` onward belong to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modulation {
    pub index: usize,
    pub from: Key,
    pub to: Key,
    pub method: ModulationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<PivotChord>,
}

impl Modulation {
    /// Same modulation between other keys, pivot re-resolved by its numerals
    pub(crate) fn remapped(&self, from: Key, to: Key) -> Self {
        let pivot = self.pivot.as_ref().map(|p| PivotChord {
            chord: p.to_numeral.resolve(&to),
            from_numeral: p.from_numeral.clone(),
            to_numeral: p.to_numeral.clone(),
        });
        Self {
            index: self.index,
            from,
            to,
            method: self.method,
            pivot,
        }
    }
}

/// Preference order for pivots, by function in the new key
fn pivot_rank(pivot: &PivotChord) -> u8 {
    match pivot.to_numeral.degree() {
        2 => 0,
        4 => 1,
        6 => 2,
        1 | 3 => 3,
        _ => 4,
    }
}

/// Every diatonic triad the two keys share, best pivot first
pub fn find_pivots(from: &Key, to: &Key) -> Vec<PivotChord> {
    let targets = to.scale().diatonic_triads();
    let mut pivots: Vec<PivotChord> = from
        .scale()
        .diatonic_triads()
        .into_iter()
        .enumerate()
        .filter_map(|(i, chord)| {
            let j = targets.iter().position(|t| t.same_harmony(&chord))?;
            let from_numeral = RomanNumeral::diatonic(i as u8 + 1, from)?;
            let to_numeral = RomanNumeral::diatonic(j as u8 + 1, to)?;
            Some(PivotChord {
                chord: chord.with_numeral(to_numeral.clone()),
                from_numeral,
                to_numeral,
            })
        })
        .collect();
    pivots.sort_by_key(pivot_rank);
    pivots
}

/// Continue `progression` into `new_key`.
///
/// Pivot appends the shared chord, then V and I of the new key. If the keys
/// share no triad the call falls back to direct, which appends V and I only.
pub fn modulate(progression: &Progression, new_key: &Key, method: ModulationMethod) -> Progression {
    let from = progression.final_key().clone();
    let mut result = progression.clone();
    let index = result.len();

    let pivot = match method {
        ModulationMethod::Pivot => find_pivots(&from, new_key).into_iter().next(),
        ModulationMethod::Direct => None,
    };
    let method = if pivot.is_some() {
        ModulationMethod::Pivot
    } else {
        ModulationMethod::Direct
    };
    debug!(
        from = %from,
        to = %new_key,
        method = %method,
        pivot = ?pivot.as_ref().map(|p| p.to_string()),
        "modulating"
    );

    if let Some(pivot) = &pivot {
        result.add(pivot.chord.clone());
    }
    for degree in [5, 1] {
        if let Some(numeral) = RomanNumeral::diatonic(degree, new_key) {
            // The dominant is major even in minor keys
            let numeral = if degree == 5 {
                RomanNumeral::parse("V").unwrap_or(numeral)
            } else {
                numeral
            };
            result.add(numeral.resolve(new_key));
        }
    }

    result.push_modulation(Modulation {
        index,
        from,
        to: new_key.clone(),
        method,
        pivot,
    });
    result
}

impl Progression {
    /// See [`modulate`]
    pub fn modulate(&self, new_key: &Key, method: ModulationMethod) -> Progression {
        modulate(self, new_key, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::cadence::Cadence;
    use crate::music::chord::ChordQuality;
    use crate::music::scale::{PitchClass, ScaleType};

    fn key(root: PitchClass, scale_type: ScaleType) -> Key {
        Key::new(root, scale_type)
    }

    #[test]
    fn test_method_names() {
        assert_eq!(ModulationMethod::from_str("Pivot").unwrap(), ModulationMethod::Pivot);
        assert_eq!(ModulationMethod::from_str("direct").unwrap(), ModulationMethod::Direct);
        let err = ModulationMethod::from_str("teleport").unwrap_err();
        assert_eq!(err.kind, NameKind::ModulationMethod);
    }

    #[test]
    fn test_pivots_between_c_and_g() {
        let c = key(PitchClass::C, ScaleType::Major);
        let g = key(PitchClass::G, ScaleType::Major);
        let pivots = find_pivots(&c, &g);

        // C, e, G, a are shared
        assert_eq!(pivots.len(), 4);
        for pivot in &pivots {
            assert!(c.scale().diatonic_triads().iter().any(|t| t.same_harmony(&pivot.chord)));
            assert!(g.scale().diatonic_triads().iter().any(|t| t.same_harmony(&pivot.chord)));
        }
        // a minor is ii in G, the preferred pre-dominant pivot
        assert_eq!(pivots[0].chord.root(), PitchClass::A);
        assert_eq!(pivots[0].to_numeral.to_string(), "ii");
        assert_eq!(pivots[0].from_numeral.to_string(), "vi");
    }

    #[test]
    fn test_pivot_modulation() {
        let c = key(PitchClass::C, ScaleType::Major);
        let g = key(PitchClass::G, ScaleType::Major);
        let p = Progression::from_roman("I-IV-V-I", &c).unwrap();
        let m = p.modulate(&g, ModulationMethod::Pivot);

        assert_eq!(m.len(), 7);
        assert_eq!(m.modulations().len(), 1);
        let record = &m.modulations()[0];
        assert_eq!(record.index, 4);
        assert_eq!(record.method, ModulationMethod::Pivot);
        assert!(record.pivot.is_some());

        assert_eq!(m.key_at(3), &c);
        assert_eq!(m.key_at(4), &g);
        assert_eq!(m.get(5).unwrap().root(), PitchClass::D);
        assert_eq!(m.get(6).unwrap().root(), PitchClass::G);
        assert_eq!(m.cadence(), Cadence::Authentic);
        assert_eq!(m.to_roman(), "I-IV-V-I-ii-V-I");
    }

    #[test]
    fn test_no_pivot_falls_back_to_direct() {
        let c = key(PitchClass::C, ScaleType::Major);
        let fs = key(PitchClass::Fs, ScaleType::Major);
        assert!(find_pivots(&c, &fs).is_empty());

        let p = Progression::from_roman("I-V-I", &c).unwrap();
        let m = modulate(&p, &fs, ModulationMethod::Pivot);
        assert_eq!(m.len(), 5);
        assert_eq!(m.modulations()[0].method, ModulationMethod::Direct);
        assert_eq!(m.get(3).unwrap().root(), PitchClass::Cs);
        assert_eq!(m.get(4).unwrap().root(), PitchClass::Fs);
    }

    #[test]
    fn test_minor_target_gets_major_dominant() {
        let c = key(PitchClass::C, ScaleType::Major);
        let a_minor = key(PitchClass::A, ScaleType::NaturalMinor);
        let m = Progression::from_roman("I", &c)
            .unwrap()
            .modulate(&a_minor, ModulationMethod::Direct);
        let dominant = m.get(1).unwrap();
        assert_eq!(dominant.root(), PitchClass::E);
        assert_eq!(dominant.quality(), ChordQuality::Major);
        assert_eq!(m.get(2).unwrap().quality(), ChordQuality::Minor);
    }

    #[test]
    fn test_transpose_moves_modulations() {
        let c = key(PitchClass::C, ScaleType::Major);
        let g = key(PitchClass::G, ScaleType::Major);
        let d = key(PitchClass::D, ScaleType::Major);
        let a = key(PitchClass::A, ScaleType::Major);
        let m = Progression::from_roman("I-V-I", &c)
            .unwrap()
            .modulate(&g, ModulationMethod::Pivot);
        let t = m.transpose(&d);

        assert_eq!(t.modulations()[0].from, d);
        assert_eq!(t.modulations()[0].to, a);
        assert_eq!(t.final_key(), &a);
        assert_eq!(t.chords().last().unwrap().root(), PitchClass::A);
        assert_eq!(t.to_roman(), m.to_roman());
    }
}
