//! Detail layer parameters and configuration

use serde::{Deserialize, Serialize};

/// Detail layer intensity preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErosionPreset {
    /// No micro-variation - perfectly smooth shaped surface
    None,
    /// Subtle roughness
    Minimal,
    /// Balanced (5% variation)
    #[default]
    Normal,
    /// Rough, noticeably broken-up surfaces
    Dramatic,
}

impl ErosionPreset {
    pub fn all() -> &'static [Self] {
        &[Self::None, Self::Minimal, Self::Normal, Self::Dramatic]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "No detail (smooth shaped terrain)",
            Self::Minimal => "Subtle roughness",
            Self::Normal => "Balanced micro-variation",
            Self::Dramatic => "Rough, broken-up surfaces",
        }
    }

    /// Multiplicative variation factor applied to the detail noise
    pub fn factor(&self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Minimal => 0.025,
            Self::Normal => DEFAULT_DETAIL_FACTOR,
            Self::Dramatic => 0.10,
        }
    }
}

impl std::fmt::Display for ErosionPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Minimal => write!(f, "minimal"),
            Self::Normal => write!(f, "normal"),
            Self::Dramatic => write!(f, "dramatic"),
        }
    }
}

impl std::str::FromStr for ErosionPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.to_string() == s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown erosion preset '{}'", s))
    }
}

/// Default variation factor (5%)
pub const DEFAULT_DETAIL_FACTOR: f32 = 0.05;

/// Detail noise `[-1, 1]` is scaled to this amplitude before use
pub const DETAIL_AMPLITUDE: f32 = 0.3;

/// Parameters of the multiplicative detail pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErosionParams {
    /// Variation factor used when a call does not override it
    pub detail_factor: f32,
    /// Peak magnitude of the scaled detail noise
    pub detail_amplitude: f32,
}

impl Default for ErosionParams {
    fn default() -> Self {
        Self {
            detail_factor: DEFAULT_DETAIL_FACTOR,
            detail_amplitude: DETAIL_AMPLITUDE,
        }
    }
}

impl ErosionParams {
    /// Create parameters from a preset
    pub fn from_preset(preset: ErosionPreset) -> Self {
        Self {
            detail_factor: preset.factor(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_factors_increase() {
        let factors: Vec<f32> = ErosionPreset::all().iter().map(|p| p.factor()).collect();
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ErosionPreset::default().factor(), 0.05);
    }

    #[test]
    fn test_preset_parse_roundtrip() {
        for preset in ErosionPreset::all() {
            assert_eq!(preset.to_string().parse::<ErosionPreset>(), Ok(*preset));
        }
        assert!("extreme".parse::<ErosionPreset>().is_err());
        assert_eq!("Dramatic".parse::<ErosionPreset>(), Ok(ErosionPreset::Dramatic));
    }

    #[test]
    fn test_from_preset() {
        let params = ErosionParams::from_preset(ErosionPreset::None);
        assert_eq!(params.detail_factor, 0.0);
        assert_eq!(params.detail_amplitude, DETAIL_AMPLITUDE);
    }
}
