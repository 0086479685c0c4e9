//! Erosion/detail noise layer
//!
//! A one-shot multiplicative micro-variation applied on top of the shaped
//! height so surfaces are never perfectly smooth. It samples its own
//! high-frequency channel and is independent of the terrain hint.

pub mod params;

pub use params::{ErosionParams, ErosionPreset, DEFAULT_DETAIL_FACTOR, DETAIL_AMPLITUDE};

use crate::channels::{ChannelKind, NoiseChannel, NoiseConfig};
use crate::seeds::ChannelSeeds;

#[derive(Clone, Debug)]
pub struct ErosionLayer {
    channel: NoiseChannel,
    params: ErosionParams,
}

impl ErosionLayer {
    pub fn new(seeds: &ChannelSeeds, config: NoiseConfig, params: ErosionParams) -> Self {
        Self {
            channel: NoiseChannel::from_seeds(ChannelKind::Detail, seeds, config),
            params,
        }
    }

    pub fn params(&self) -> &ErosionParams {
        &self.params
    }

    /// Detail noise at a column, scaled to `±detail_amplitude`
    pub fn detail(&self, x: f32, z: f32) -> f32 {
        self.channel.sample(x, z) * self.params.detail_amplitude
    }

    /// Apply the layer with the configured default factor.
    pub fn apply(&self, base_height: i32, x: f32, z: f32) -> i32 {
        self.apply_with_factor(base_height, x, z, self.params.detail_factor)
    }

    /// `round(base * (1 + detail * factor))`
    pub fn apply_with_factor(&self, base_height: i32, x: f32, z: f32, factor: f32) -> i32 {
        let detail = self.detail(x, z);
        (base_height as f32 * (1.0 + detail * factor)).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(seed: u64) -> ErosionLayer {
        ErosionLayer::new(
            &ChannelSeeds::from_world(seed),
            NoiseConfig::detail(),
            ErosionParams::default(),
        )
    }

    #[test]
    fn test_zero_factor_is_identity() {
        let layer = layer(42);
        for i in 0..100 {
            let x = i as f32 * 7.3;
            assert_eq!(layer.apply_with_factor(87, x, -x, 0.0), 87);
        }
    }

    #[test]
    fn test_variation_is_bounded() {
        let layer = layer(42);
        for i in 0..500 {
            let x = i as f32 * 3.1 - 700.0;
            let z = i as f32 * 1.7;
            let h = layer.apply(200, x, z);
            // 200 * 0.3 * 0.05 = 3 blocks at most
            assert!((197..=203).contains(&h), "h = {}", h);
            assert!(layer.detail(x, z).abs() <= DETAIL_AMPLITUDE);
        }
    }

    #[test]
    fn test_factor_override_scales_variation() {
        let layer = layer(5);
        let (x, z) = (0..150)
            .map(|i| (i as f32 * 13.0, i as f32 * 6.5))
            .find(|&(x, z)| layer.detail(x, z).abs() > 0.1)
            .expect("some column with visible detail");
        let small = (layer.apply_with_factor(150, x, z, 0.05) - 150).abs();
        let large = (layer.apply_with_factor(150, x, z, 1.0) - 150).abs();
        assert!(large > small);
    }

    #[test]
    fn test_deterministic() {
        let a = layer(77);
        let b = layer(77);
        for i in 0..50 {
            let x = i as f32 * 11.0;
            assert_eq!(a.apply(120, x, x), b.apply(120, x, x));
        }
    }
}
