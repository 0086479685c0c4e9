//! Terrain generator configuration.
//!
//! Everything here is baked into a generator at construction time and never
//! mutated afterwards. Configs can be loaded from and saved to JSON; missing
//! fields take their defaults.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::channels::NoiseConfig;
use crate::erosion::{ErosionParams, ErosionPreset};
use crate::spline::{MultiDimensionalSpline, SplineError};
use crate::world::{SEA_LEVEL, WORLD_HEIGHT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid spline: {0}")]
    Spline(#[from] SplineError),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub sea_level: i32,
    pub world_height: i32,

    // Classification channels
    pub continentalness: NoiseConfig,
    pub erosion: NoiseConfig,
    pub peaks_valleys: NoiseConfig,
    pub weirdness: NoiseConfig,
    pub temperature: NoiseConfig,
    pub humidity: NoiseConfig,

    // Shaping channels
    pub detail: NoiseConfig,
    pub plateau: NoiseConfig,
    pub spire: NoiseConfig,

    /// Strength of the multiplicative detail layer
    pub erosion_preset: ErosionPreset,
    /// Overrides the preset's detail factor when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_factor: Option<f32>,

    /// Replaces the built-in continentalness → base height spline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_spline: Option<MultiDimensionalSpline>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            sea_level: SEA_LEVEL,
            world_height: WORLD_HEIGHT,
            continentalness: NoiseConfig::continentalness(),
            erosion: NoiseConfig::erosion(),
            peaks_valleys: NoiseConfig::peaks_valleys(),
            weirdness: NoiseConfig::weirdness(),
            temperature: NoiseConfig::temperature(),
            humidity: NoiseConfig::humidity(),
            detail: NoiseConfig::detail(),
            plateau: NoiseConfig::plateau(),
            spire: NoiseConfig::spire(),
            erosion_preset: ErosionPreset::Normal,
            detail_factor: None,
            primary_spline: None,
        }
    }
}

impl TerrainConfig {
    /// Shaped terrain without the detail layer
    pub fn smooth() -> Self {
        Self {
            erosion_preset: ErosionPreset::None,
            ..Default::default()
        }
    }

    /// Larger continents and climate zones, rougher surfaces
    pub fn large_features() -> Self {
        let widen = |mut config: NoiseConfig| {
            config.scale *= 2.0;
            config
        };
        let base = Self::default();
        Self {
            continentalness: widen(base.continentalness),
            erosion: widen(base.erosion),
            temperature: widen(base.temperature),
            humidity: widen(base.humidity),
            erosion_preset: ErosionPreset::Dramatic,
            ..base
        }
    }

    /// Parameters for the detail layer after applying the override
    pub fn erosion_params(&self) -> ErosionParams {
        let mut params = ErosionParams::from_preset(self.erosion_preset);
        if let Some(factor) = self.detail_factor {
            params.detail_factor = factor;
        }
        params
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_height < 2 {
            return Err(ConfigError::Invalid(format!(
                "world_height must be at least 2, got {}",
                self.world_height
            )));
        }
        // Chunk storage is fixed at WORLD_HEIGHT layers
        if self.world_height > WORLD_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "world_height {} exceeds chunk height {}",
                self.world_height, WORLD_HEIGHT
            )));
        }
        if self.sea_level < 1 || self.sea_level > self.world_height - 1 {
            return Err(ConfigError::Invalid(format!(
                "sea_level {} outside [1, {}]",
                self.sea_level,
                self.world_height - 1
            )));
        }

        let channels = [
            ("continentalness", &self.continentalness),
            ("erosion", &self.erosion),
            ("peaks_valleys", &self.peaks_valleys),
            ("weirdness", &self.weirdness),
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
            ("detail", &self.detail),
            ("plateau", &self.plateau),
            ("spire", &self.spire),
        ];
        for (name, noise) in channels {
            validate_noise(name, noise)?;
        }

        if let Some(factor) = self.detail_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "detail_factor must be a non-negative number, got {}",
                    factor
                )));
            }
        }

        if let Some(spline) = &self.primary_spline {
            if spline.is_empty() {
                return Err(SplineError::Empty.into());
            }
        }

        Ok(())
    }

    /// Load and validate a JSON config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

fn validate_noise(name: &str, noise: &NoiseConfig) -> Result<(), ConfigError> {
    if !noise.scale.is_finite() || noise.scale <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{}.scale must be positive, got {}",
            name, noise.scale
        )));
    }
    if noise.octaves == 0 {
        return Err(ConfigError::Invalid(format!("{}.octaves must be at least 1", name)));
    }
    if !noise.persistence.is_finite() || noise.persistence <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{}.persistence must be positive, got {}",
            name, noise.persistence
        )));
    }
    if !noise.lacunarity.is_finite() || noise.lacunarity <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{}.lacunarity must be positive, got {}",
            name, noise.lacunarity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
        assert!(TerrainConfig::smooth().validate().is_ok());
        assert!(TerrainConfig::large_features().validate().is_ok());
    }

    #[test]
    fn test_sea_level_out_of_range() {
        let config = TerrainConfig {
            sea_level: 300,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let mut config = TerrainConfig::default();
        config.weirdness.octaves = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("weirdness.octaves"));
    }

    #[test]
    fn test_empty_primary_spline_rejected() {
        let config = TerrainConfig {
            primary_spline: Some(MultiDimensionalSpline::new()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Spline(SplineError::Empty))));
    }

    #[test]
    fn test_world_height_capped_at_chunk_height() {
        let lower = TerrainConfig {
            world_height: 128,
            sea_level: 40,
            ..Default::default()
        };
        assert!(lower.validate().is_ok());

        let taller = TerrainConfig {
            world_height: WORLD_HEIGHT + 1,
            ..Default::default()
        };
        assert!(matches!(taller.validate(), Err(ConfigError::Invalid(_))));
        assert!(crate::heightmap::HeightMapGenerator::try_new(1, &taller).is_err());
    }

    #[test]
    fn test_detail_factor_override() {
        let config = TerrainConfig {
            erosion_preset: ErosionPreset::Dramatic,
            detail_factor: Some(0.01),
            ..Default::default()
        };
        assert_eq!(config.erosion_params().detail_factor, 0.01);
        assert_eq!(TerrainConfig::smooth().erosion_params().detail_factor, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TerrainConfig =
            serde_json::from_str(r#"{ "sea_level": 70, "erosion_preset": "minimal" }"#).unwrap();
        assert_eq!(config.sea_level, 70);
        assert_eq!(config.erosion_preset, ErosionPreset::Minimal);
        assert_eq!(config.world_height, WORLD_HEIGHT);
        assert_eq!(config.continentalness, NoiseConfig::continentalness());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("terrain_config_{}.json", std::process::id()));
        let config = TerrainConfig {
            primary_spline: Some(
                MultiDimensionalSpline::new()
                    .with_constant(-1.0, 30.0, 0.0)
                    .with_constant(1.0, 150.0, 0.0),
            ),
            ..TerrainConfig::large_features()
        };
        config.save(&path).unwrap();
        let loaded = TerrainConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TerrainConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
