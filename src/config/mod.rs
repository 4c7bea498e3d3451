// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Engine configuration.
//!
//! Settings for the voice-leading search and the melody generator, loadable
//! from YAML or TOML. Every field has a default, so a file only needs the
//! values it changes.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::pitch::Pitch;
use crate::voicing::{Doubling, VoiceRanges, VoiceType};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EngineConfig {
    /// Voice-leading search settings
    #[serde(default)]
    pub voice_leading: VoiceLeadingConfig,
    /// Melody generator settings
    #[serde(default)]
    pub melody: MelodyConfig,
}

impl EngineConfig {
    /// Load from a file, choosing TOML for `.toml` and YAML otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check ranges, budgets and probabilities
    pub fn validate(&self) -> Result<()> {
        self.voice_leading.validate()?;
        self.melody.validate()
    }
}

/// Voice-leading search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceLeadingConfig {
    /// Candidate attempts per chord
    #[serde(default = "default_attempts")]
    pub attempts: usize,
    /// Tone doubled in triads
    #[serde(default)]
    pub doubling: Doubling,
    /// Voice ranges
    #[serde(default)]
    pub ranges: VoiceRanges,
}

fn default_attempts() -> usize {
    100
}

impl Default for VoiceLeadingConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            doubling: Doubling::default(),
            ranges: VoiceRanges::default(),
        }
    }
}

impl VoiceLeadingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            bail!("voice_leading.attempts must be at least 1");
        }
        for voice in VoiceType::ALL {
            let range = self.ranges.get(voice);
            if !range.is_well_formed() {
                bail!(
                    "{} range {}..{} (comfortable {}..{}) is not ordered",
                    voice,
                    range.low,
                    range.high,
                    range.comfortable_low,
                    range.comfortable_high
                );
            }
        }
        Ok(())
    }
}

/// Melody generator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MelodyConfig {
    /// Lowest melody pitch
    #[serde(default = "default_low")]
    pub low: Pitch,
    /// Highest melody pitch
    #[serde(default = "default_high")]
    pub high: Pitch,
    /// Events per motif
    #[serde(default = "default_motif_length")]
    pub motif_length: usize,
    /// Note durations to draw from, in quarter notes
    #[serde(default = "default_durations")]
    pub durations: Vec<f64>,
    /// Chance of a rest inside a fresh motif (0.0 - 1.0)
    #[serde(default)]
    pub rest_probability: f64,
    /// Stability weight of the tonic
    #[serde(default = "default_tonic_weight")]
    pub tonic_weight: f64,
    /// Stability weight of the dominant
    #[serde(default = "default_dominant_weight")]
    pub dominant_weight: f64,
    /// Multiplier for tones of the sounding chord
    #[serde(default = "default_chord_tone_weight")]
    pub chord_tone_weight: f64,
    /// Chord-tone multiplier on the first event of a new chord
    #[serde(default = "default_boundary_weight")]
    pub boundary_chord_tone_weight: f64,
    /// How strongly the contour pulls the direction (0.0 - 1.0)
    #[serde(default = "default_contour_strength")]
    pub contour_strength: f64,
    /// Multiplier for intervals wider than a perfect fifth
    #[serde(default = "default_leap_penalty")]
    pub leap_penalty: f64,
    /// Multiplier for the step that recovers a leap
    #[serde(default = "default_resolution_boost")]
    pub resolution_boost: f64,
}

fn default_low() -> Pitch {
    Pitch::new(60)
}
fn default_high() -> Pitch {
    Pitch::new(79)
}
fn default_motif_length() -> usize {
    4
}
fn default_durations() -> Vec<f64> {
    vec![0.5, 1.0, 1.0, 2.0]
}
fn default_tonic_weight() -> f64 {
    3.0
}
fn default_dominant_weight() -> f64 {
    2.0
}
fn default_chord_tone_weight() -> f64 {
    2.5
}
fn default_boundary_weight() -> f64 {
    6.0
}
fn default_contour_strength() -> f64 {
    0.8
}
fn default_leap_penalty() -> f64 {
    0.1
}
fn default_resolution_boost() -> f64 {
    8.0
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            low: default_low(),
            high: default_high(),
            motif_length: default_motif_length(),
            durations: default_durations(),
            rest_probability: 0.0,
            tonic_weight: default_tonic_weight(),
            dominant_weight: default_dominant_weight(),
            chord_tone_weight: default_chord_tone_weight(),
            boundary_chord_tone_weight: default_boundary_weight(),
            contour_strength: default_contour_strength(),
            leap_penalty: default_leap_penalty(),
            resolution_boost: default_resolution_boost(),
        }
    }
}

impl MelodyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.high.semitone() - self.low.semitone() < 12 {
            bail!(
                "melody range {}..{} must span at least an octave",
                self.low,
                self.high
            );
        }
        if self.motif_length == 0 {
            bail!("melody.motif_length must be at least 1");
        }
        if self.durations.is_empty() || self.durations.iter().any(|d| *d <= 0.0) {
            bail!("melody.durations must be non-empty and positive");
        }
        for (name, p) in [
            ("rest_probability", self.rest_probability),
            ("contour_strength", self.contour_strength),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("melody.{} must be between 0 and 1, got {}", name, p);
            }
        }
        for (name, w) in [
            ("tonic_weight", self.tonic_weight),
            ("dominant_weight", self.dominant_weight),
            ("chord_tone_weight", self.chord_tone_weight),
            ("boundary_chord_tone_weight", self.boundary_chord_tone_weight),
            ("leap_penalty", self.leap_penalty),
            ("resolution_boost", self.resolution_boost),
        ] {
            if w <= 0.0 {
                bail!("melody.{} must be positive, got {}", name, w);
            }
        }
        Ok(())
    }
}
