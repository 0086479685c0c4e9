//! Multi-noise parameter sampling.

use serde::{Deserialize, Serialize};

use crate::channels::{ChannelKind, NoiseChannel};
use crate::config::TerrainConfig;
use crate::seeds::ChannelSeeds;

/// Every classification channel sampled at one column.
///
/// Values are conventionally in `[-1, 1]`. Two samples with equal fields are
/// interchangeable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiNoiseParameters {
    pub continentalness: f32,
    pub erosion: f32,
    pub peaks_valleys: f32,
    pub weirdness: f32,
    pub temperature: f32,
    pub humidity: f32,
}

impl MultiNoiseParameters {
    pub fn new(
        continentalness: f32,
        erosion: f32,
        peaks_valleys: f32,
        weirdness: f32,
        temperature: f32,
        humidity: f32,
    ) -> Self {
        Self {
            continentalness,
            erosion,
            peaks_valleys,
            weirdness,
            temperature,
            humidity,
        }
    }

    /// Value of a single classification channel
    pub fn get(&self, kind: ChannelKind) -> Option<f32> {
        match kind {
            ChannelKind::Continentalness => Some(self.continentalness),
            ChannelKind::Erosion => Some(self.erosion),
            ChannelKind::PeaksValleys => Some(self.peaks_valleys),
            ChannelKind::Weirdness => Some(self.weirdness),
            ChannelKind::Temperature => Some(self.temperature),
            ChannelKind::Humidity => Some(self.humidity),
            ChannelKind::Detail | ChannelKind::Plateau | ChannelKind::Spire => None,
        }
    }
}

impl std::fmt::Display for MultiNoiseParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "C={:+.3} E={:+.3} PV={:+.3} W={:+.3} T={:+.3} H={:+.3}",
            self.continentalness,
            self.erosion,
            self.peaks_valleys,
            self.weirdness,
            self.temperature,
            self.humidity,
        )
    }
}

/// Samples all six classification channels at a column.
///
/// Pure: no caching, no side effects. Callers may cache per column but
/// nothing here depends on it.
#[derive(Clone, Debug)]
pub struct ParameterSampler {
    continentalness: NoiseChannel,
    erosion: NoiseChannel,
    peaks_valleys: NoiseChannel,
    weirdness: NoiseChannel,
    temperature: NoiseChannel,
    humidity: NoiseChannel,
}

impl ParameterSampler {
    pub fn new(seeds: &ChannelSeeds, config: &TerrainConfig) -> Self {
        let channel = |kind, noise| NoiseChannel::from_seeds(kind, seeds, noise);
        Self {
            continentalness: channel(ChannelKind::Continentalness, config.continentalness),
            erosion: channel(ChannelKind::Erosion, config.erosion),
            peaks_valleys: channel(ChannelKind::PeaksValleys, config.peaks_valleys),
            weirdness: channel(ChannelKind::Weirdness, config.weirdness),
            temperature: channel(ChannelKind::Temperature, config.temperature),
            humidity: channel(ChannelKind::Humidity, config.humidity),
        }
    }

    /// Continentalness alone, for callers that only need the base height
    pub fn continentalness(&self, x: f32, z: f32) -> f32 {
        self.continentalness.sample(x, z)
    }

    pub fn sample(&self, x: f32, z: f32) -> MultiNoiseParameters {
        MultiNoiseParameters {
            continentalness: self.continentalness.sample(x, z),
            erosion: self.erosion.sample(x, z),
            peaks_valleys: self.peaks_valleys.sample(x, z),
            weirdness: self.weirdness.sample(x, z),
            temperature: self.temperature.sample(x, z),
            humidity: self.humidity.sample(x, z),
        }
    }
}
