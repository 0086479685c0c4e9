//! Terrain hint classification.
//!
//! Maps a parameter vector to one of five terrain archetypes with an ordered
//! rule chain: the first matching rule wins. The thresholds line up with the
//! parameter ranges biome selection uses, so shape and biome tend to agree
//! without the height generator knowing about biomes.

use serde::{Deserialize, Serialize};

use crate::parameters::MultiNoiseParameters;

const MESA_MIN_TEMPERATURE: f32 = 0.6;
const MESA_MAX_HUMIDITY: f32 = 0.3;
const MESA_MIN_WEIRDNESS: f32 = 0.7;

const PEAKS_MAX_TEMPERATURE: f32 = 0.4;
const PEAKS_MAX_EROSION: f32 = -0.5;
const PEAKS_MIN_PEAKS_VALLEYS: f32 = 0.3;

const PLAINS_MIN_EROSION: f32 = 0.7;

const HILLS_MIN_EROSION: f32 = 0.4;
const HILLS_MAX_ABS_PEAKS_VALLEYS: f32 = 0.3;

/// Discrete terrain archetype selecting a height-shaping strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainHint {
    /// Hot, dry, weird: terraced plateaus
    Mesa,
    /// Cold, low erosion, high peaks/valleys: jagged spires
    SharpPeaks,
    /// Moderately eroded, near-neutral peaks/valleys
    GentleHills,
    /// Heavily eroded, nearly flat
    FlatPlains,
    Normal,
}

impl TerrainHint {
    pub fn all() -> &'static [Self] {
        &[
            Self::Mesa,
            Self::SharpPeaks,
            Self::GentleHills,
            Self::FlatPlains,
            Self::Normal,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Mesa => "Terraced plateaus",
            Self::SharpPeaks => "Jagged mountain spires",
            Self::GentleHills => "Rolling low hills",
            Self::FlatPlains => "Flattened lowlands",
            Self::Normal => "Unmodified terrain",
        }
    }
}

impl std::fmt::Display for TerrainHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mesa => write!(f, "mesa"),
            Self::SharpPeaks => write!(f, "sharp_peaks"),
            Self::GentleHills => write!(f, "gentle_hills"),
            Self::FlatPlains => write!(f, "flat_plains"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Classify a parameter vector into a terrain archetype.
///
/// FlatPlains is checked before GentleHills: extreme erosion would otherwise be
/// swallowed by the broader hills rule.
pub fn classify_terrain(params: &MultiNoiseParameters) -> TerrainHint {
    if params.temperature > MESA_MIN_TEMPERATURE
        && params.humidity < MESA_MAX_HUMIDITY
        && params.weirdness > MESA_MIN_WEIRDNESS
    {
        return TerrainHint::Mesa;
    }

    if params.temperature < PEAKS_MAX_TEMPERATURE
        && params.erosion < PEAKS_MAX_EROSION
        && params.peaks_valleys > PEAKS_MIN_PEAKS_VALLEYS
    {
        return TerrainHint::SharpPeaks;
    }

    if params.erosion > PLAINS_MIN_EROSION {
        return TerrainHint::FlatPlains;
    }

    if params.erosion > HILLS_MIN_EROSION && params.peaks_valleys.abs() < HILLS_MAX_ABS_PEAKS_VALLEYS {
        return TerrainHint::GentleHills;
    }

    TerrainHint::Normal
}
