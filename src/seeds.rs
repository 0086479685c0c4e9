//! Seed management for the noise channels.
//!
//! Every channel samples the same noise primitive, so each one is offset from
//! the world seed by a fixed constant to decorrelate them. The offsets are part
//! of the seed-compatibility contract: changing one changes every world.

pub const CONTINENTALNESS_SEED_OFFSET: u64 = 2;
pub const EROSION_SEED_OFFSET: u64 = 4;
pub const PEAKS_VALLEYS_SEED_OFFSET: u64 = 8;
pub const WEIRDNESS_SEED_OFFSET: u64 = 16;
pub const TEMPERATURE_SEED_OFFSET: u64 = 1000;
pub const HUMIDITY_SEED_OFFSET: u64 = 2000;
/// Detail layer, kept well away from the classification channels
pub const DETAIL_SEED_OFFSET: u64 = 3000;
pub const PLATEAU_SEED_OFFSET: u64 = 4000;
pub const SPIRE_SEED_OFFSET: u64 = 5000;
pub const ORE_SEED_OFFSET: u64 = 6000;

/// Seeds for all noise channels of one world.
///
/// Derived from the world seed by default. Individual seeds can be overridden
/// for experimentation through [`ChannelSeeds::builder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSeeds {
    /// World seed the channels were derived from (display/reference only)
    pub world: u64,
    pub continentalness: u64,
    pub erosion: u64,
    pub peaks_valleys: u64,
    pub weirdness: u64,
    pub temperature: u64,
    pub humidity: u64,
    pub detail: u64,
    /// Extra-layer check for mesa terraces
    pub plateau: u64,
    /// High-frequency perturbation on sharp peaks
    pub spire: u64,
    /// Positional random source for ore placement
    pub ore: u64,
}

impl ChannelSeeds {
    /// Derive every channel seed by adding its fixed offset to the world seed.
    pub fn from_world(world: u64) -> Self {
        Self {
            world,
            continentalness: world.wrapping_add(CONTINENTALNESS_SEED_OFFSET),
            erosion: world.wrapping_add(EROSION_SEED_OFFSET),
            peaks_valleys: world.wrapping_add(PEAKS_VALLEYS_SEED_OFFSET),
            weirdness: world.wrapping_add(WEIRDNESS_SEED_OFFSET),
            temperature: world.wrapping_add(TEMPERATURE_SEED_OFFSET),
            humidity: world.wrapping_add(HUMIDITY_SEED_OFFSET),
            detail: world.wrapping_add(DETAIL_SEED_OFFSET),
            plateau: world.wrapping_add(PLATEAU_SEED_OFFSET),
            spire: world.wrapping_add(SPIRE_SEED_OFFSET),
            ore: world.wrapping_add(ORE_SEED_OFFSET),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(world: u64) -> ChannelSeedsBuilder {
        ChannelSeedsBuilder::new(world)
    }
}

/// Builder for overriding individual channel seeds while deriving the others
pub struct ChannelSeedsBuilder {
    seeds: ChannelSeeds,
}

impl ChannelSeedsBuilder {
    pub fn new(world: u64) -> Self {
        Self {
            seeds: ChannelSeeds::from_world(world),
        }
    }

    pub fn continentalness(mut self, seed: u64) -> Self {
        self.seeds.continentalness = seed;
        self
    }

    pub fn erosion(mut self, seed: u64) -> Self {
        self.seeds.erosion = seed;
        self
    }

    pub fn peaks_valleys(mut self, seed: u64) -> Self {
        self.seeds.peaks_valleys = seed;
        self
    }

    pub fn weirdness(mut self, seed: u64) -> Self {
        self.seeds.weirdness = seed;
        self
    }

    pub fn temperature(mut self, seed: u64) -> Self {
        self.seeds.temperature = seed;
        self
    }

    pub fn humidity(mut self, seed: u64) -> Self {
        self.seeds.humidity = seed;
        self
    }

    pub fn detail(mut self, seed: u64) -> Self {
        self.seeds.detail = seed;
        self
    }

    pub fn plateau(mut self, seed: u64) -> Self {
        self.seeds.plateau = seed;
        self
    }

    pub fn spire(mut self, seed: u64) -> Self {
        self.seeds.spire = seed;
        self
    }

    pub fn ore(mut self, seed: u64) -> Self {
        self.seeds.ore = seed;
        self
    }

    pub fn build(self) -> ChannelSeeds {
        self.seeds
    }
}

/// Fold a 64-bit channel seed into the 32-bit seed the noise primitive takes.
///
/// Folding instead of truncating keeps seeds that differ only in their high
/// bits apart.
pub fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

impl std::fmt::Display for ChannelSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ChannelSeeds {{ world: {}, continentalness: {}, erosion: {}, peaks_valleys: {}, \
             weirdness: {}, temperature: {}, humidity: {}, detail: {}, plateau: {}, spire: {}, ore: {} }}",
            self.world,
            self.continentalness,
            self.erosion,
            self.peaks_valleys,
            self.weirdness,
            self.temperature,
            self.humidity,
            self.detail,
            self.plateau,
            self.spire,
            self.ore,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_applied_verbatim() {
        let seeds = ChannelSeeds::from_world(42);
        assert_eq!(seeds.continentalness, 44);
        assert_eq!(seeds.erosion, 46);
        assert_eq!(seeds.temperature, 1042);
        assert_eq!(seeds.humidity, 2042);
    }

    #[test]
    fn test_channels_get_distinct_seeds() {
        let s = ChannelSeeds::from_world(12345);
        let all = [
            s.continentalness,
            s.erosion,
            s.peaks_valleys,
            s.weirdness,
            s.temperature,
            s.humidity,
            s.detail,
            s.plateau,
            s.spire,
            s.ore,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_builder_override() {
        let seeds = ChannelSeeds::builder(12345).erosion(99999).build();
        assert_eq!(seeds.erosion, 99999);

        let default_seeds = ChannelSeeds::from_world(12345);
        assert_eq!(seeds.continentalness, default_seeds.continentalness);
        assert_eq!(seeds.detail, default_seeds.detail);
    }

    #[test]
    fn test_builder_overrides_every_field() {
        let seeds = ChannelSeeds::builder(1)
            .continentalness(10)
            .erosion(11)
            .peaks_valleys(12)
            .weirdness(13)
            .temperature(14)
            .humidity(15)
            .detail(16)
            .plateau(17)
            .spire(18)
            .ore(19)
            .build();
        let expected = ChannelSeeds {
            world: 1,
            continentalness: 10,
            erosion: 11,
            peaks_valleys: 12,
            weirdness: 13,
            temperature: 14,
            humidity: 15,
            detail: 16,
            plateau: 17,
            spire: 18,
            ore: 19,
        };
        assert_eq!(seeds, expected);
    }

    #[test]
    fn test_display_lists_every_seed() {
        let text = ChannelSeeds::builder(1).plateau(4242).spire(5353).build().to_string();
        assert!(text.contains("plateau: 4242"));
        assert!(text.contains("spire: 5353"));
        assert!(text.contains("ore: 6001"));
    }

    #[test]
    fn test_seed_42_golden() {
        let expected = ChannelSeeds {
            world: 42,
            continentalness: 44,
            erosion: 46,
            peaks_valleys: 50,
            weirdness: 58,
            temperature: 1042,
            humidity: 2042,
            detail: 3042,
            plateau: 4042,
            spire: 5042,
            ore: 6042,
        };
        assert_eq!(ChannelSeeds::from_world(42), expected);
        assert_eq!(noise_seed(expected.continentalness), 44);
        assert_eq!(noise_seed((1 << 40) + 5), 261);
    }

    #[test]
    fn test_wrapping_near_max() {
        let seeds = ChannelSeeds::from_world(u64::MAX);
        assert_eq!(seeds.continentalness, 1);
    }

    #[test]
    fn test_noise_seed_folds_high_bits() {
        assert_ne!(noise_seed(1), noise_seed(1 | (1 << 40)));
        assert_eq!(noise_seed(7), 7);
    }
}
