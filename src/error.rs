// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error taxonomy for the composition engine.
//!
//! Malformed input (notation, keys, vocabulary names) fails immediately.
//! Search-quality problems are not errors: they are collected as
//! [`Violation`](crate::voicing::Violation) values next to the output.
//! Only an unusable voice-leading search surfaces as [`VoiceLeadingFailure`].

use std::fmt;

use thiserror::Error;

pub use crate::voicing::VoiceLeadingFailure;

/// Malformed Roman-numeral, key or note-name input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Nothing to parse
    #[error("empty chord symbol")]
    Empty,
    /// Token does not start with a Roman numeral
    #[error("'{token}' has no Roman numeral degree")]
    MissingDegree { token: String },
    /// Degree outside I-VII
    #[error("'{token}' names a degree outside I-VII")]
    DegreeOutOfRange { token: String },
    /// Mixed-case numeral like "Iv"
    #[error("'{token}' mixes upper and lower case numerals")]
    MixedCase { token: String },
    /// Character not understood in a chord symbol
    #[error("unknown glyph '{glyph}' in '{token}'")]
    UnknownGlyph { token: String, glyph: char },
    /// Figured-bass suffix not understood
    #[error("unknown figure '{figure}' in '{token}'")]
    BadFigure { token: String, figure: String },
    /// Half-diminished glyph on a triad
    #[error("'{token}' uses a half-diminished glyph without a seventh")]
    HalfDiminishedTriad { token: String },
    /// Unparsable key or note name
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// What kind of name failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Template,
    Cadence,
    ModulationMethod,
    Contour,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Template => write!(f, "template"),
            NameKind::Cadence => write!(f, "cadence"),
            NameKind::ModulationMethod => write!(f, "modulation method"),
            NameKind::Contour => write!(f, "contour"),
        }
    }
}

/// A name outside one of the closed vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownTemplateError {
    pub kind: NameKind,
    pub name: String,
}

impl UnknownTemplateError {
    pub fn new(kind: NameKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Crate-wide error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    UnknownTemplate(#[from] UnknownTemplateError),
    #[error(transparent)]
    VoiceLeading(#[from] Box<VoiceLeadingFailure>),
}

impl From<VoiceLeadingFailure> for Error {
    fn from(failure: VoiceLeadingFailure) -> Self {
        Error::VoiceLeading(Box::new(failure))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_error_messages() {
        let err = NotationError::UnknownGlyph {
            token: "V#".to_string(),
            glyph: '#',
        };
        assert_eq!(err.to_string(), "unknown glyph '#' in 'V#'");
        assert_eq!(NotationError::Empty.to_string(), "empty chord symbol");
    }

    #[test]
    fn test_unknown_template_message() {
        let err = UnknownTemplateError::new(NameKind::Template, "polka");
        assert_eq!(err.to_string(), "unknown template 'polka'");

        let err = UnknownTemplateError::new(NameKind::ModulationMethod, "sideways");
        assert_eq!(err.to_string(), "unknown modulation method 'sideways'");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = NotationError::Empty.into();
        assert!(matches!(err, Error::Notation(NotationError::Empty)));
    }
}
