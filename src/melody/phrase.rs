// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Phrases and periods.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::motif::Motif;
use crate::harmony::Cadence;
use crate::music::event::MelodicEvent;
use crate::music::pitch::Pitch;

/// Role of a phrase inside a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseRole {
    /// Opening phrase ending on a weak cadence
    Antecedent,
    /// Answering phrase ending conclusively
    Consequent,
    Independent,
}

impl PhraseRole {
    pub fn name(self) -> &'static str {
        match self {
            PhraseRole::Antecedent => "antecedent",
            PhraseRole::Consequent => "consequent",
            PhraseRole::Independent => "independent",
        }
    }
}

impl fmt::Display for PhraseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A melodic phrase and the cadence it ends on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phrase {
    events: Vec<MelodicEvent>,
    role: PhraseRole,
    cadence: Cadence,
}

impl Phrase {
    pub fn new(events: Vec<MelodicEvent>, role: PhraseRole, cadence: Cadence) -> Self {
        Self {
            events,
            role,
            cadence,
        }
    }

    pub fn events(&self) -> &[MelodicEvent] {
        &self.events
    }

    pub fn role(&self) -> PhraseRole {
        self.role
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
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

    pub fn total_duration(&self) -> f64 {
        self.events.iter().map(MelodicEvent::duration).sum()
    }

    /// The first `len` events as a motif
    pub fn opening_motif(&self, len: usize) -> Motif {
        Motif::extract(&self.events, 0, len)
    }

    /// Whether `self` as antecedent and `other` as consequent form a
    /// period: the consequent closes on the tonic, more strongly than the
    /// antecedent does
    pub fn is_period_partner(&self, other: &Phrase) -> bool {
        self.role == PhraseRole::Antecedent
            && other.role == PhraseRole::Consequent
            && other.cadence.is_conclusive()
            && other.cadence.strength() > self.cadence.strength()
    }

    pub fn into_events(self) -> Vec<MelodicEvent> {
        self.events
    }
}

/// Antecedent and consequent phrases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub antecedent: Phrase,
    pub consequent: Phrase,
}

impl Period {
    /// Both phrases answer each other
    pub fn is_well_formed(&self) -> bool {
        self.antecedent.is_period_partner(&self.consequent)
    }

    /// All events, antecedent first
    pub fn events(&self) -> Vec<MelodicEvent> {
        let mut events = self.antecedent.events().to_vec();
        events.extend_from_slice(self.consequent.events());
        events
    }

    pub fn len(&self) -> usize {
        self.antecedent.len() + self.consequent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(role: PhraseRole, cadence: Cadence) -> Phrase {
        let events = [60, 62, 64, 60]
            .iter()
            .map(|&p| MelodicEvent::note(Pitch::new(p), 1.0))
            .collect();
        Phrase::new(events, role, cadence)
    }

    #[test]
    fn test_period_partner() {
        let antecedent = phrase(PhraseRole::Antecedent, Cadence::Half);
        let consequent = phrase(PhraseRole::Consequent, Cadence::Authentic);
        assert!(antecedent.is_period_partner(&consequent));
        assert!(!consequent.is_period_partner(&antecedent));

        let deceptive = phrase(PhraseRole::Antecedent, Cadence::Deceptive);
        assert!(deceptive.is_period_partner(&consequent));

        // Consequent must close on the tonic
        let weak = phrase(PhraseRole::Consequent, Cadence::Half);
        assert!(!antecedent.is_period_partner(&weak));

        // An authentic antecedent leaves nothing stronger to answer it
        let strong = phrase(PhraseRole::Antecedent, Cadence::Authentic);
        assert!(!strong.is_period_partner(&consequent));

        let loose = phrase(PhraseRole::Independent, Cadence::Half);
        assert!(!loose.is_period_partner(&consequent));
    }

    #[test]
    fn test_period_events() {
        let period = Period {
            antecedent: phrase(PhraseRole::Antecedent, Cadence::Half),
            consequent: phrase(PhraseRole::Consequent, Cadence::Plagal),
        };
        assert!(period.is_well_formed());
        assert_eq!(period.len(), 8);
        assert_eq!(period.events().len(), 8);
        assert_eq!(period.antecedent.total_duration(), 4.0);
        assert_eq!(period.antecedent.opening_motif(2).pitches().len(), 2);
    }
}
