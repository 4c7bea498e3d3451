// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Library of named progression templates.
//!
//! Every template is written in canonical Roman-numeral form so that
//! resolving and re-printing it returns the same text.

use crate::error::{NameKind, UnknownTemplateError};

/// A named progression pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub roman: &'static str,
    pub description: &'static str,
}

/// The closed template vocabulary
pub const TEMPLATES: [Template; 8] = [
    Template {
        name: "basic",
        roman: "I-IV-V-I",
        description: "Basic cadential pattern",
    },
    Template {
        name: "pop",
        roman: "I-V-vi-IV",
        description: "Pop loop",
    },
    Template {
        name: "doo_wop",
        roman: "I-vi-IV-V",
        description: "Fifties doo-wop loop",
    },
    Template {
        name: "jazz",
        roman: "ii7-V7-I",
        description: "ii-V-I turnaround",
    },
    Template {
        name: "circle",
        roman: "I-IV-vii°-iii-vi-ii-V-I",
        description: "Diatonic root walk in descending fifths",
    },
    Template {
        name: "descending_bass",
        roman: "I-V6-vi-iii6-IV-I6-ii6-V",
        description: "Stepwise descending bass line",
    },
    Template {
        name: "blues",
        roman: "I-I-I-I-IV-IV-I-I-V-IV-I-V",
        description: "Twelve-bar blues",
    },
    Template {
        name: "andalusian",
        roman: "i-VII-VI-V",
        description: "Andalusian cadence (minor keys)",
    },
];

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Look up a template by name (case, spaces, dashes and underscores ignored)
pub fn lookup(name: &str) -> Result<&'static Template, UnknownTemplateError> {
    let wanted = normalize(name);
    TEMPLATES
        .iter()
        .find(|t| normalize(t.name) == wanted)
        .ok_or_else(|| UnknownTemplateError::new(NameKind::Template, name))
}

/// Names of all templates
pub fn available() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("basic").unwrap().roman, "I-IV-V-I");
        assert_eq!(lookup("Doo-Wop").unwrap().name, "doo_wop");
        assert_eq!(lookup("descending bass").unwrap().name, "descending_bass");
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("polka").unwrap_err();
        assert_eq!(err.kind, NameKind::Template);
        assert_eq!(err.name, "polka");
    }

    #[test]
    fn test_available() {
        let names = available();
        assert_eq!(names.len(), TEMPLATES.len());
        assert!(names.contains(&"circle"));
    }
}
