//! Terrain height and classification engine
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod channels;
pub mod chunk;
pub mod classifier;
pub mod config;
pub mod erosion;
pub mod export;
pub mod heightmap;
pub mod logging;
pub mod noise_field;
pub mod ores;
pub mod parameters;
pub mod seeds;
pub mod spline;
pub mod tilemap;
pub mod world;

pub use chunk::{BlockStorage, BlockType, Chunk};
pub use classifier::{classify_terrain, TerrainHint};
pub use config::{ConfigError, TerrainConfig};
pub use heightmap::{ColumnHeights, HeightCalculationDebugInfo, HeightField, HeightMapGenerator};
pub use ores::{BiomeSource, BiomeTag, OreGenerator, PositionalRandom};
pub use parameters::MultiNoiseParameters;
pub use spline::{MultiDimensionalSpline, SplinePoint, SplineValue};
