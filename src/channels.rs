//! Noise channel generators.
//!
//! Each channel is a thin typed wrapper around the scalar noise field that owns
//! a seed and a frequency/octave configuration and yields one named physical
//! quantity in `[-1, 1]`.

use serde::{Deserialize, Serialize};

use crate::noise_field::{fbm, PerlinField};
use crate::seeds::{noise_seed, ChannelSeeds};

/// Frequency/octave configuration of one channel.
///
/// `scale` is the number of world blocks per noise unit: a channel is sampled
/// at `(x / scale, z / scale)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub scale: f32,
    pub octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
}

impl NoiseConfig {
    pub const fn new(scale: f32, octaves: u32, persistence: f32, lacunarity: f32) -> Self {
        Self {
            scale,
            octaves,
            persistence,
            lacunarity,
        }
    }

    pub const fn continentalness() -> Self {
        Self::new(1024.0, 4, 0.5, 2.0)
    }

    pub const fn erosion() -> Self {
        Self::new(768.0, 3, 0.5, 2.0)
    }

    pub const fn peaks_valleys() -> Self {
        Self::new(256.0, 3, 0.5, 2.0)
    }

    pub const fn weirdness() -> Self {
        Self::new(384.0, 2, 0.5, 2.0)
    }

    pub const fn temperature() -> Self {
        Self::new(2048.0, 2, 0.5, 2.0)
    }

    pub const fn humidity() -> Self {
        Self::new(2048.0, 2, 0.5, 2.0)
    }

    /// High frequency, feeds the multiplicative detail layer
    pub const fn detail() -> Self {
        Self::new(24.0, 2, 0.5, 2.0)
    }

    pub const fn plateau() -> Self {
        Self::new(96.0, 1, 0.5, 2.0)
    }

    pub const fn spire() -> Self {
        Self::new(12.0, 2, 0.55, 2.0)
    }
}

/// The physical quantity a channel encodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Continentalness,
    Erosion,
    PeaksValleys,
    Weirdness,
    Temperature,
    Humidity,
    Detail,
    Plateau,
    Spire,
}

impl ChannelKind {
    pub fn all() -> &'static [Self] {
        &[
            Self::Continentalness,
            Self::Erosion,
            Self::PeaksValleys,
            Self::Weirdness,
            Self::Temperature,
            Self::Humidity,
            Self::Detail,
            Self::Plateau,
            Self::Spire,
        ]
    }

    /// Seed this channel uses for a given set of channel seeds
    pub fn seed(&self, seeds: &ChannelSeeds) -> u64 {
        match self {
            Self::Continentalness => seeds.continentalness,
            Self::Erosion => seeds.erosion,
            Self::PeaksValleys => seeds.peaks_valleys,
            Self::Weirdness => seeds.weirdness,
            Self::Temperature => seeds.temperature,
            Self::Humidity => seeds.humidity,
            Self::Detail => seeds.detail,
            Self::Plateau => seeds.plateau,
            Self::Spire => seeds.spire,
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continentalness => write!(f, "continentalness"),
            Self::Erosion => write!(f, "erosion"),
            Self::PeaksValleys => write!(f, "peaks_valleys"),
            Self::Weirdness => write!(f, "weirdness"),
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Detail => write!(f, "detail"),
            Self::Plateau => write!(f, "plateau"),
            Self::Spire => write!(f, "spire"),
        }
    }
}

/// One seeded, configured noise channel.
///
/// Holds no mutable state after construction, so a single instance can be
/// shared by any number of worker threads.
#[derive(Clone, Debug)]
pub struct NoiseChannel {
    kind: ChannelKind,
    config: NoiseConfig,
    field: PerlinField,
}

impl NoiseChannel {
    pub fn new(kind: ChannelKind, seed: u64, config: NoiseConfig) -> Self {
        Self {
            kind,
            config,
            field: PerlinField::new(noise_seed(seed)),
        }
    }

    /// Build a channel seeded from the world's channel seeds.
    pub fn from_seeds(kind: ChannelKind, seeds: &ChannelSeeds, config: NoiseConfig) -> Self {
        Self::new(kind, kind.seed(seeds), config)
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Sample the channel at a world-space column. Always in `[-1, 1]`.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let scale = self.config.scale;
        fbm(
            &self.field,
            x / scale,
            z / scale,
            self.config.octaves,
            self.config.persistence,
            self.config.lacunarity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_deterministic() {
        let seeds = ChannelSeeds::from_world(42);
        let a = NoiseChannel::from_seeds(ChannelKind::Erosion, &seeds, NoiseConfig::erosion());
        let b = NoiseChannel::from_seeds(ChannelKind::Erosion, &seeds, NoiseConfig::erosion());
        for i in -50..50 {
            let x = i as f32 * 37.0;
            let z = i as f32 * -11.0;
            assert_eq!(a.sample(x, z).to_bits(), b.sample(x, z).to_bits());
        }
    }

    #[test]
    fn test_every_channel_bounded() {
        let seeds = ChannelSeeds::from_world(9001);
        let configs = [
            NoiseConfig::continentalness(),
            NoiseConfig::erosion(),
            NoiseConfig::peaks_valleys(),
            NoiseConfig::weirdness(),
            NoiseConfig::temperature(),
            NoiseConfig::humidity(),
            NoiseConfig::detail(),
            NoiseConfig::plateau(),
            NoiseConfig::spire(),
        ];
        for (kind, config) in ChannelKind::all().iter().zip(configs) {
            let channel = NoiseChannel::from_seeds(*kind, &seeds, config);
            for i in 0..400 {
                let x = (i % 20) as f32 * 53.0 - 500.0;
                let z = (i / 20) as f32 * 71.0 - 700.0;
                let v = channel.sample(x, z);
                assert!((-1.0..=1.0).contains(&v), "{} out of range: {}", kind, v);
            }
        }
    }

    #[test]
    fn test_seed_offsets_decorrelate_channels() {
        let seeds = ChannelSeeds::from_world(42);
        let config = NoiseConfig::new(64.0, 1, 0.5, 2.0);
        let temperature = NoiseChannel::from_seeds(ChannelKind::Temperature, &seeds, config);
        let humidity = NoiseChannel::from_seeds(ChannelKind::Humidity, &seeds, config);
        let differs = (1..40).any(|i| {
            let x = i as f32 * 13.7;
            temperature.sample(x, x * 0.3) != humidity.sample(x, x * 0.3)
        });
        assert!(differs);
    }
}
