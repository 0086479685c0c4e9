//! Block storage.
//!
//! The height and ore passes only need `get_block`/`set_block` in world
//! coordinates; `Chunk` is a plain in-memory implementation used by the
//! tools and tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::heightmap::ColumnHeights;
use crate::world::{chunk_origin, CHUNK_SIZE, WORLD_HEIGHT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Air,
    Bedrock,
    Stone,
    Dirt,
    Grass,
    Sand,
    Magma,
    Water,
    CoalOre,
    IronOre,
    CrystalOre,
}

impl BlockType {
    pub fn is_ore(&self) -> bool {
        matches!(self, BlockType::CoalOre | BlockType::IronOre | BlockType::CrystalOre)
    }

    pub fn is_solid(&self) -> bool {
        !matches!(self, BlockType::Air | BlockType::Water)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockType::Air => "air",
            BlockType::Bedrock => "bedrock",
            BlockType::Stone => "stone",
            BlockType::Dirt => "dirt",
            BlockType::Grass => "grass",
            BlockType::Sand => "sand",
            BlockType::Magma => "magma",
            BlockType::Water => "water",
            BlockType::CoalOre => "coal_ore",
            BlockType::IronOre => "iron_ore",
            BlockType::CrystalOre => "crystal_ore",
        };
        write!(f, "{}", name)
    }
}

/// Block access in world coordinates.
///
/// Reads outside the storage return `Air`; writes outside it are ignored.
pub trait BlockStorage {
    fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType;
    fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType);
}

/// Dirt layers between the stone and the surface block
const SOIL_DEPTH: i32 = 3;
/// Columns this close to sea level get a sand surface
const BEACH_RANGE: i32 = 2;

/// One `CHUNK_SIZE × WORLD_HEIGHT × CHUNK_SIZE` column of blocks
///
/// `TerrainConfig::validate` keeps configured world heights within this.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
    blocks: Vec<BlockType>,
}

impl Chunk {
    pub fn new(chunk_x: i32, chunk_z: i32) -> Self {
        Self {
            chunk_x,
            chunk_z,
            blocks: vec![BlockType::Air; CHUNK_SIZE * CHUNK_SIZE * WORLD_HEIGHT as usize],
        }
    }

    /// Chunk filled with stone/soil/water for the given column heights.
    pub fn from_heights(heights: &ColumnHeights, sea_level: i32) -> Self {
        let mut chunk = Self::new(heights.chunk_x, heights.chunk_z);
        chunk.fill_terrain(heights, sea_level);
        chunk
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let lx = x - chunk_origin(self.chunk_x);
        let lz = z - chunk_origin(self.chunk_z);
        let size = CHUNK_SIZE as i32;
        if !(0..size).contains(&lx) || !(0..size).contains(&lz) || !(0..WORLD_HEIGHT).contains(&y) {
            return None;
        }
        Some((y as usize * CHUNK_SIZE + lz as usize) * CHUNK_SIZE + lx as usize)
    }

    /// Lay bedrock, stone, soil and water under each column.
    ///
    /// The surface block sits at `height - 1`; columns near sea level get
    /// sand, columns below it are flooded up to `sea_level - 1`.
    pub fn fill_terrain(&mut self, heights: &ColumnHeights, sea_level: i32) {
        let origin_x = chunk_origin(self.chunk_x);
        let origin_z = chunk_origin(self.chunk_z);

        for (lx, lz, height) in heights.iter() {
            let x = origin_x + lx as i32;
            let z = origin_z + lz as i32;
            let surface = height - 1;
            let beach = (surface - sea_level).abs() <= BEACH_RANGE;

            for y in 0..WORLD_HEIGHT {
                let block = if y == 0 {
                    BlockType::Bedrock
                } else if y < surface - SOIL_DEPTH {
                    BlockType::Stone
                } else if y < surface {
                    if beach {
                        BlockType::Sand
                    } else {
                        BlockType::Dirt
                    }
                } else if y == surface {
                    if beach || surface < sea_level {
                        BlockType::Sand
                    } else {
                        BlockType::Grass
                    }
                } else if y < sea_level {
                    BlockType::Water
                } else {
                    BlockType::Air
                };
                self.set_block(x, y, z, block);
            }
        }
    }

    /// Occurrences of `block` in the chunk
    pub fn count(&self, block: BlockType) -> usize {
        self.blocks.iter().filter(|b| **b == block).count()
    }

    /// World-space positions holding `block`
    pub fn positions_of(&self, block: BlockType) -> Vec<(i32, i32, i32)> {
        let origin_x = chunk_origin(self.chunk_x);
        let origin_z = chunk_origin(self.chunk_z);
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == block)
            .map(|(idx, _)| {
                let lx = idx % CHUNK_SIZE;
                let lz = (idx / CHUNK_SIZE) % CHUNK_SIZE;
                let y = idx / (CHUNK_SIZE * CHUNK_SIZE);
                (origin_x + lx as i32, y as i32, origin_z + lz as i32)
            })
            .collect()
    }
}

impl BlockStorage for Chunk {
    fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.index(x, y, z)
            .map(|idx| self.blocks[idx])
            .unwrap_or(BlockType::Air)
    }

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if let Some(idx) = self.index(x, y, z) {
            self.blocks[idx] = block;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_heights(chunk_x: i32, chunk_z: i32, height: i32) -> ColumnHeights {
        ColumnHeights {
            chunk_x,
            chunk_z,
            heights: [[height; CHUNK_SIZE]; CHUNK_SIZE],
        }
    }

    #[test]
    fn test_world_coordinates() {
        let mut chunk = Chunk::new(-1, 2);
        chunk.set_block(-16, 10, 32, BlockType::Magma);
        chunk.set_block(-1, 10, 47, BlockType::Sand);
        assert_eq!(chunk.get_block(-16, 10, 32), BlockType::Magma);
        assert_eq!(chunk.get_block(-1, 10, 47), BlockType::Sand);
        assert_eq!(chunk.positions_of(BlockType::Magma), vec![(-16, 10, 32)]);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(16, 10, 0, BlockType::Stone);
        chunk.set_block(0, WORLD_HEIGHT, 0, BlockType::Stone);
        chunk.set_block(0, -1, 0, BlockType::Stone);
        assert_eq!(chunk.count(BlockType::Stone), 0);
        assert_eq!(chunk.get_block(-1, 10, 0), BlockType::Air);
    }

    #[test]
    fn test_fill_highland_column() {
        let chunk = Chunk::from_heights(&flat_heights(0, 0, 100), 64);
        assert_eq!(chunk.get_block(3, 0, 3), BlockType::Bedrock);
        assert_eq!(chunk.get_block(3, 50, 3), BlockType::Stone);
        assert_eq!(chunk.get_block(3, 97, 3), BlockType::Dirt);
        assert_eq!(chunk.get_block(3, 99, 3), BlockType::Grass);
        assert_eq!(chunk.get_block(3, 100, 3), BlockType::Air);
        assert_eq!(chunk.count(BlockType::Water), 0);
    }

    #[test]
    fn test_fill_ocean_column() {
        let chunk = Chunk::from_heights(&flat_heights(0, 0, 40), 64);
        assert_eq!(chunk.get_block(0, 39, 0), BlockType::Sand);
        assert_eq!(chunk.get_block(0, 40, 0), BlockType::Water);
        assert_eq!(chunk.get_block(0, 63, 0), BlockType::Water);
        assert_eq!(chunk.get_block(0, 64, 0), BlockType::Air);
    }

    #[test]
    fn test_block_predicates() {
        assert!(BlockType::IronOre.is_ore());
        assert!(!BlockType::Stone.is_ore());
        assert!(!BlockType::Water.is_solid());
        assert_eq!(BlockType::CrystalOre.to_string(), "crystal_ore");
    }
}
