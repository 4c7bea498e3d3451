// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman-numeral parsing and resolution.
//!
//! A numeral names a scale degree (I-VII), signals major or minor quality by
//! case, may carry a quality glyph (`°` or `o` diminished, `ø` half
//! diminished, `+` augmented) and a figured-bass suffix:
//!
//! | Figure | Meaning                    |
//! |--------|----------------------------|
//! | none   | triad, root position       |
//! | `6`    | triad, first inversion     |
//! | `64`   | triad, second inversion    |
//! | `7`    | seventh, root position     |
//! | `65`   | seventh, first inversion   |
//! | `43`   | seventh, second inversion  |
//! | `42`   | seventh, third inversion   |
//!
//! Resolution against a [`Key`] consults the scale's diatonic quality table,
//! so `vii` in C major is diminished and `V` in A minor is major.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::music::chord::{Chord, ChordQuality};
use crate::music::scale::Key;

/// Explicit quality glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGlyph {
    Diminished,
    HalfDiminished,
    Augmented,
}

impl QualityGlyph {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '°' | 'o' => Some(QualityGlyph::Diminished),
            'ø' => Some(QualityGlyph::HalfDiminished),
            '+' => Some(QualityGlyph::Augmented),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            QualityGlyph::Diminished => "°",
            QualityGlyph::HalfDiminished => "ø",
            QualityGlyph::Augmented => "+",
        }
    }
}

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// A parsed Roman numeral, independent of key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RomanNumeral {
    /// Scale degree, 1-7
    degree: u8,
    /// Upper case (major-like) numeral
    upper: bool,
    glyph: Option<QualityGlyph>,
    seventh: bool,
    inversion: u8,
}

impl RomanNumeral {
    /// Parse a single chord symbol such as "V7", "vii°6" or "ii65"
    pub fn parse(notation: &str) -> Result<Self, NotationError> {
        let token = notation.trim();
        if token.is_empty() {
            return Err(NotationError::Empty);
        }

        let numeral_len = token
            .char_indices()
            .find(|(_, c)| !matches!(c, 'I' | 'V' | 'i' | 'v'))
            .map(|(i, _)| i)
            .unwrap_or(token.len());
        let (numeral, rest) = token.split_at(numeral_len);
        if numeral.is_empty() {
            return Err(NotationError::MissingDegree {
                token: token.to_string(),
            });
        }

        let upper = numeral.chars().all(|c| c.is_ascii_uppercase());
        if !upper && !numeral.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(NotationError::MixedCase {
                token: token.to_string(),
            });
        }

        let numeral_upper = numeral.to_ascii_uppercase();
        let degree = NUMERALS
            .iter()
            .position(|&n| n == numeral_upper)
            .map(|i| i as u8 + 1)
            .ok_or_else(|| NotationError::DegreeOutOfRange {
                token: token.to_string(),
            })?;

        let mut chars = rest.chars().peekable();
        let glyph = match chars.peek().copied().and_then(QualityGlyph::from_char) {
            Some(glyph) => {
                chars.next();
                Some(glyph)
            }
            None => None,
        };

        let figure: String = chars.collect();
        if let Some(bad) = figure.chars().find(|c| !c.is_ascii_digit()) {
            return Err(NotationError::UnknownGlyph {
                token: token.to_string(),
                glyph: bad,
            });
        }

        let (seventh, inversion) = match figure.as_str() {
            "" => (false, 0),
            "6" => (false, 1),
            "64" => (false, 2),
            "7" => (true, 0),
            "65" => (true, 1),
            "43" => (true, 2),
            "42" | "2" => (true, 3),
            _ => {
                return Err(NotationError::BadFigure {
                    token: token.to_string(),
                    figure,
                })
            }
        };

        if glyph == Some(QualityGlyph::HalfDiminished) && !seventh {
            return Err(NotationError::HalfDiminishedTriad {
                token: token.to_string(),
            });
        }

        Ok(Self {
            degree,
            upper,
            glyph,
            seventh,
            inversion,
        })
    }

    /// The canonical root-position triad numeral of a degree in a key
    pub fn diatonic(degree: u8, key: &Key) -> Option<Self> {
        let quality = key.scale().triad_quality(degree as usize)?;
        Some(Self {
            degree,
            upper: quality.has_major_third(),
            glyph: glyph_for(quality),
            seventh: false,
            inversion: 0,
        })
    }

    /// Describe an arbitrary chord relative to a key. Returns `None` when
    /// the root is not a scale degree (or the raised leading tone of a
    /// minor key).
    pub fn from_chord(chord: &Chord, key: &Key) -> Option<Self> {
        let degree = match key.scale().degree_of(chord.root()) {
            Some(degree) => degree as u8,
            None if chord.root() == key.leading_tone() => 7,
            None => return None,
        };
        let quality = chord.quality();
        Some(Self {
            degree,
            upper: quality.has_major_third(),
            glyph: glyph_for(quality),
            seventh: quality.is_seventh(),
            inversion: chord.inversion(),
        })
    }

    /// Same numeral with a seventh added
    pub fn with_seventh(mut self) -> Self {
        self.seventh = true;
        self
    }

    /// Same numeral in another inversion, if the chord has one
    pub fn with_inversion(mut self, inversion: u8) -> Option<Self> {
        let max = if self.seventh { 3 } else { 2 };
        if inversion > max {
            return None;
        }
        self.inversion = inversion;
        Some(self)
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    pub fn is_upper(&self) -> bool {
        self.upper
    }

    pub fn glyph(&self) -> Option<QualityGlyph> {
        self.glyph
    }

    pub fn has_seventh(&self) -> bool {
        self.seventh
    }

    pub fn inversion(&self) -> u8 {
        self.inversion
    }

    /// Resolve to a concrete chord in a key
    pub fn resolve(&self, key: &Key) -> Chord {
        let scale = key.scale();
        let index = (self.degree - 1) as usize;
        let table_quality = scale.scale_type().triad_qualities()[index];
        let mut root = scale.notes()[index];

        // Minor keys borrow the raised leading tone for vii and vii°
        let raised = key.scale_type().is_minor()
            && self.degree == 7
            && root != key.leading_tone()
            && (!self.upper
                || matches!(
                    self.glyph,
                    Some(QualityGlyph::Diminished | QualityGlyph::HalfDiminished)
                ));
        if raised {
            root = key.leading_tone();
        }

        let triad = match self.glyph {
            Some(QualityGlyph::Diminished | QualityGlyph::HalfDiminished) => {
                ChordQuality::Diminished
            }
            Some(QualityGlyph::Augmented) => ChordQuality::Augmented,
            None if raised => ChordQuality::Diminished,
            None if table_quality.has_major_third() == self.upper => table_quality,
            None if self.upper => ChordQuality::Major,
            None => ChordQuality::Minor,
        };

        let quality = if !self.seventh {
            triad
        } else {
            match self.glyph {
                Some(QualityGlyph::Diminished) => ChordQuality::DiminishedSeventh,
                Some(QualityGlyph::HalfDiminished) => ChordQuality::HalfDiminishedSeventh,
                Some(QualityGlyph::Augmented) => ChordQuality::AugmentedMajorSeventh,
                None if triad == table_quality && !raised => {
                    scale.scale_type().seventh_quality(index)
                }
                None => match triad {
                    ChordQuality::Major => ChordQuality::DominantSeventh,
                    ChordQuality::Minor => ChordQuality::MinorSeventh,
                    ChordQuality::Augmented => ChordQuality::AugmentedMajorSeventh,
                    _ => ChordQuality::DiminishedSeventh,
                },
            }
        };

        let chord = Chord::new(root, quality);
        chord
            .clone()
            .inverted(self.inversion)
            .unwrap_or(chord)
            .with_numeral(self.clone())
    }
}

fn glyph_for(quality: ChordQuality) -> Option<QualityGlyph> {
    match quality {
        ChordQuality::Diminished | ChordQuality::DiminishedSeventh => {
            Some(QualityGlyph::Diminished)
        }
        ChordQuality::HalfDiminishedSeventh => Some(QualityGlyph::HalfDiminished),
        ChordQuality::Augmented | ChordQuality::AugmentedMajorSeventh => {
            Some(QualityGlyph::Augmented)
        }
        _ => None,
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = NUMERALS[(self.degree - 1) as usize];
        if self.upper {
            write!(f, "{}", numeral)?;
        } else {
            write!(f, "{}", numeral.to_ascii_lowercase())?;
        }
        if let Some(glyph) = self.glyph {
            write!(f, "{}", glyph.symbol())?;
        }
        let figure = match (self.seventh, self.inversion) {
            (false, 0) => "",
            (false, 1) => "6",
            (false, _) => "64",
            (true, 0) => "7",
            (true, 1) => "65",
            (true, 2) => "43",
            (true, _) => "42",
        };
        write!(f, "{}", figure)
    }
}

/// Parse and resolve a chord symbol in a key
pub fn resolve(notation: &str, key: &Key) -> Result<Chord, NotationError> {
    Ok(RomanNumeral::parse(notation)?.resolve(key))
}
