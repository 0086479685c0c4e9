//! Ore placement.
//!
//! Runs after column heights are known. Every block under a column is decided
//! independently from a position-keyed random source, so the pass gives the
//! same result whatever order chunks are generated in.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunk::{BlockStorage, BlockType};
use crate::classifier::TerrainHint;
use crate::heightmap::{ColumnHeights, HeightMapGenerator};
use crate::seeds::ChannelSeeds;
use crate::world::chunk_origin;

pub const COAL_PROBABILITY: f32 = 0.015;
pub const IRON_PROBABILITY: f32 = 0.008;
pub const CRYSTAL_PROBABILITY: f32 = 0.02;

/// Iron only below this layer
pub const IRON_MAX_Y: i32 = 50;
/// Crystal only above this layer
pub const CRYSTAL_MIN_Y: i32 = 20;

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Deterministic boolean keyed by block position and a label.
///
/// Same inputs, same answer, on every call and every platform.
pub trait PositionalRandom {
    fn should_generate_3d(&self, x: i32, y: i32, z: i32, label: &str, probability: f32) -> bool;
}

/// Splitmix-hashes `(seed, x, y, z, label)` into a ChaCha8 seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededPositionalRandom {
    seed: u64,
}

impl SeededPositionalRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn position_seed(&self, x: i32, y: i32, z: i32, label: &str) -> u64 {
        let mut hash = self.seed;

        hash = hash.wrapping_add(x as i64 as u64);
        hash ^= hash >> 30;
        hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);

        hash = hash.wrapping_add(y as i64 as u64);
        hash ^= hash >> 27;
        hash = hash.wrapping_mul(0x94d049bb133111eb);

        hash = hash.wrapping_add(z as i64 as u64);
        hash ^= hash >> 31;
        hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);

        // Label bytes so different ores never share a draw
        for byte in label.bytes() {
            hash = hash.wrapping_add(byte as u64);
            hash = hash.wrapping_mul(0x94d049bb133111eb);
        }

        hash ^= hash >> 33;
        hash
    }
}

impl PositionalRandom for SeededPositionalRandom {
    fn should_generate_3d(&self, x: i32, y: i32, z: i32, label: &str, probability: f32) -> bool {
        if probability <= 0.0 {
            return false;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.position_seed(x, y, z, label));
        rng.gen_bool(probability.min(1.0) as f64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeTag {
    Ocean,
    Plains,
    Forest,
    Desert,
    /// Hot and dry; the only biome that grows crystal
    Volcanic,
    Mountains,
    Snowy,
}

impl std::fmt::Display for BiomeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiomeTag::Ocean => write!(f, "ocean"),
            BiomeTag::Plains => write!(f, "plains"),
            BiomeTag::Forest => write!(f, "forest"),
            BiomeTag::Desert => write!(f, "desert"),
            BiomeTag::Volcanic => write!(f, "volcanic"),
            BiomeTag::Mountains => write!(f, "mountains"),
            BiomeTag::Snowy => write!(f, "snowy"),
        }
    }
}

/// Biome lookup by column.
pub trait BiomeSource {
    fn current_biome(&self, x: i32, z: i32) -> BiomeTag;
}

/// Biomes from the same climate channels the terrain classifier reads.
pub struct ClimateBiomeSource<'a> {
    generator: &'a HeightMapGenerator,
}

impl<'a> ClimateBiomeSource<'a> {
    pub fn new(generator: &'a HeightMapGenerator) -> Self {
        Self { generator }
    }
}

impl BiomeSource for ClimateBiomeSource<'_> {
    fn current_biome(&self, x: i32, z: i32) -> BiomeTag {
        let params = self.generator.sample_parameters(x, z);
        let info = self.generator.debug_info(x, z, &params);
        let sea_level = self.generator.sea_level();

        if info.final_height < sea_level {
            BiomeTag::Ocean
        } else if params.temperature > 0.6 && params.humidity < 0.3 {
            BiomeTag::Volcanic
        } else if params.temperature > 0.3 && params.humidity < 0.0 {
            BiomeTag::Desert
        } else if info.hint == TerrainHint::SharpPeaks || info.final_height > sea_level + 80 {
            BiomeTag::Mountains
        } else if params.temperature < -0.5 {
            BiomeTag::Snowy
        } else if params.humidity > 0.3 {
            BiomeTag::Forest
        } else {
            BiomeTag::Plains
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Blocks converted by one ore pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OreCounts {
    pub coal: usize,
    pub iron: usize,
    pub crystal: usize,
}

impl OreCounts {
    pub fn total(&self) -> usize {
        self.coal + self.iron + self.crystal
    }
}

/// Places ores under already-generated columns; owns no state between calls.
#[derive(Clone, Debug)]
pub struct OreGenerator<R = SeededPositionalRandom> {
    random: R,
}

impl OreGenerator<SeededPositionalRandom> {
    /// Generator drawing from the world's ore seed
    pub fn from_seeds(seeds: &ChannelSeeds) -> Self {
        Self::new(SeededPositionalRandom::new(seeds.ore))
    }
}

impl<R: PositionalRandom> OreGenerator<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Overwrite blocks under each column with ores.
    ///
    /// Visits `y` in `1..=surface-2` for every column of the chunk. Coal and
    /// iron replace stone, iron only below `IRON_MAX_Y`. In a volcanic chunk,
    /// sand, stone or magma above `CRYSTAL_MIN_Y` may become crystal. The rules
    /// read the original block, so a later rule overwrites an earlier one.
    pub fn generate_ores<S: BlockStorage>(
        &self,
        chunk: &mut S,
        biome: BiomeTag,
        chunk_x: i32,
        chunk_z: i32,
        surface_heights: &ColumnHeights,
    ) -> OreCounts {
        let origin_x = chunk_origin(chunk_x);
        let origin_z = chunk_origin(chunk_z);
        let volcanic = biome == BiomeTag::Volcanic;
        let mut placed: Vec<(i32, i32, i32, BlockType)> = Vec::new();

        for (lx, lz, surface) in surface_heights.iter() {
            let x = origin_x + lx as i32;
            let z = origin_z + lz as i32;

            for y in 1..surface - 1 {
                let current = chunk.get_block(x, y, z);
                let mut ore = None;

                if current == BlockType::Stone {
                    if self.random.should_generate_3d(x, y, z, "coal", COAL_PROBABILITY) {
                        ore = Some(BlockType::CoalOre);
                    }
                    if y < IRON_MAX_Y && self.random.should_generate_3d(x, y, z, "iron", IRON_PROBABILITY) {
                        ore = Some(BlockType::IronOre);
                    }
                }

                if volcanic
                    && y > CRYSTAL_MIN_Y
                    && matches!(current, BlockType::Sand | BlockType::Stone | BlockType::Magma)
                    && self.random.should_generate_3d(x, y, z, "crystal", CRYSTAL_PROBABILITY)
                {
                    ore = Some(BlockType::CrystalOre);
                }

                if let Some(block) = ore {
                    placed.push((x, y, z, block));
                }
            }
        }

        let mut counts = OreCounts::default();
        for (x, y, z, block) in placed {
            chunk.set_block(x, y, z, block);
            match block {
                BlockType::CoalOre => counts.coal += 1,
                BlockType::IronOre => counts.iron += 1,
                BlockType::CrystalOre => counts.crystal += 1,
                _ => {}
            }
        }

        debug!(
            chunk_x,
            chunk_z,
            %biome,
            coal = counts.coal,
            iron = counts.iron,
            crystal = counts.crystal,
            "ore pass complete"
        );
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::world::CHUNK_SIZE;

    struct Always;

    impl PositionalRandom for Always {
        fn should_generate_3d(&self, _: i32, _: i32, _: i32, _: &str, _: f32) -> bool {
            true
        }
    }

    fn stone_chunk(chunk_x: i32, chunk_z: i32, height: i32) -> (Chunk, ColumnHeights) {
        let heights = ColumnHeights {
            chunk_x,
            chunk_z,
            heights: [[height; CHUNK_SIZE]; CHUNK_SIZE],
        };
        let mut chunk = Chunk::new(chunk_x, chunk_z);
        let origin_x = chunk_origin(chunk_x);
        let origin_z = chunk_origin(chunk_z);
        for lx in 0..CHUNK_SIZE as i32 {
            for lz in 0..CHUNK_SIZE as i32 {
                for y in 0..height {
                    chunk.set_block(origin_x + lx, y, origin_z + lz, BlockType::Stone);
                }
            }
        }
        (chunk, heights)
    }

    #[test]
    fn test_iron_never_at_or_above_50() {
        let (mut chunk, heights) = stone_chunk(0, 0, 90);
        let generator = OreGenerator::new(Always);
        generator.generate_ores(&mut chunk, BiomeTag::Plains, 0, 0, &heights);

        for (_, y, _) in chunk.positions_of(BlockType::IronOre) {
            assert!(y < IRON_MAX_Y);
        }
        for (_, y, _) in chunk.positions_of(BlockType::CoalOre) {
            assert!(y >= IRON_MAX_Y);
        }
        assert_eq!(chunk.count(BlockType::CrystalOre), 0);
    }

    #[test]
    fn test_iteration_bounds() {
        let (mut chunk, heights) = stone_chunk(1, -1, 60);
        let counts = OreGenerator::new(Always).generate_ores(&mut chunk, BiomeTag::Plains, 1, -1, &heights);

        // y = 0 and the top stone layer (height - 1) are never touched
        assert_eq!(chunk.get_block(16, 0, -16), BlockType::Stone);
        assert_eq!(chunk.get_block(16, 59, -16), BlockType::Stone);
        assert_eq!(chunk.get_block(16, 58, -16), BlockType::CoalOre);
        assert_eq!(counts.total(), CHUNK_SIZE * CHUNK_SIZE * 58);
    }

    #[test]
    fn test_crystal_only_high_in_volcanic() {
        let (mut chunk, heights) = stone_chunk(0, 0, 80);
        let counts = OreGenerator::new(Always).generate_ores(&mut chunk, BiomeTag::Volcanic, 0, 0, &heights);

        let crystals = chunk.positions_of(BlockType::CrystalOre);
        assert!(!crystals.is_empty());
        assert!(crystals.iter().all(|(_, y, _)| *y > CRYSTAL_MIN_Y));
        assert_eq!(counts.crystal, crystals.len());
        assert_eq!(chunk.get_block(0, 20, 0), BlockType::IronOre);
    }

    #[test]
    fn test_crystal_replaces_sand_and_magma() {
        let (mut chunk, heights) = stone_chunk(0, 0, 40);
        chunk.set_block(2, 30, 2, BlockType::Sand);
        chunk.set_block(3, 30, 3, BlockType::Magma);
        chunk.set_block(4, 30, 4, BlockType::Dirt);
        OreGenerator::new(Always).generate_ores(&mut chunk, BiomeTag::Volcanic, 0, 0, &heights);

        assert_eq!(chunk.get_block(2, 30, 2), BlockType::CrystalOre);
        assert_eq!(chunk.get_block(3, 30, 3), BlockType::CrystalOre);
        assert_eq!(chunk.get_block(4, 30, 4), BlockType::Dirt);
    }

    #[test]
    fn test_seeded_pass_is_deterministic_and_sparse() {
        let seeds = ChannelSeeds::from_world(42);
        let (mut a, heights) = stone_chunk(3, 4, 100);
        let (mut b, _) = stone_chunk(3, 4, 100);
        let counts_a = OreGenerator::from_seeds(&seeds).generate_ores(&mut a, BiomeTag::Plains, 3, 4, &heights);
        let counts_b = OreGenerator::from_seeds(&seeds).generate_ores(&mut b, BiomeTag::Plains, 3, 4, &heights);

        assert_eq!(counts_a, counts_b);
        assert_eq!(a.positions_of(BlockType::CoalOre), b.positions_of(BlockType::CoalOre));
        assert_eq!(a.positions_of(BlockType::IronOre), b.positions_of(BlockType::IronOre));

        // 256 columns × 98 layers at 1.5%, expect ~376 coal
        let stone_layers = CHUNK_SIZE * CHUNK_SIZE * 98;
        assert!(counts_a.coal > 0 && counts_a.coal < stone_layers / 20, "coal = {}", counts_a.coal);
        assert!(counts_a.iron > 0);
    }

    #[test]
    fn test_position_seed_golden() {
        let random = SeededPositionalRandom::new(ChannelSeeds::from_world(42).ore);
        assert_eq!(random.seed(), 6042);
        assert_eq!(random.position_seed(3, 10, -7, "coal"), 14988131188508325004);
        assert_eq!(random.position_seed(0, 0, 0, "iron"), 133564881530609404);
    }

    #[test]
    fn test_positional_random_keys() {
        let random = SeededPositionalRandom::new(9);
        let draw = |x, label| random.should_generate_3d(x, 10, 0, label, 0.5);
        let coal: Vec<bool> = (0..64).map(|x| draw(x, "coal")).collect();
        let again: Vec<bool> = (0..64).map(|x| draw(x, "coal")).collect();
        let iron: Vec<bool> = (0..64).map(|x| draw(x, "iron")).collect();
        assert_eq!(coal, again);
        assert_ne!(coal, iron);
        assert!(!random.should_generate_3d(0, 0, 0, "coal", 0.0));
        assert!(random.should_generate_3d(0, 0, 0, "coal", 1.5));
    }

    #[test]
    fn test_climate_biomes() {
        let generator = HeightMapGenerator::new(42);
        let source = ClimateBiomeSource::new(&generator);
        for i in 0..40 {
            let (x, z) = (i * 211, i * -97);
            let biome = source.current_biome(x, z);
            let params = generator.sample_parameters(x, z);
            if biome == BiomeTag::Volcanic {
                assert!(params.temperature > 0.6 && params.humidity < 0.3);
            }
            if biome == BiomeTag::Ocean {
                assert!(generator.height_at(x, z) < generator.sea_level());
            }
            assert_eq!(biome, source.current_biome(x, z));
        }
    }
}
