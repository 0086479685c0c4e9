//! Column height generation.
//!
//! `(seed, x, z)` → parameter vector → {base height from the primary spline,
//! terrain hint} → archetype shaping → detail layer → clamp. Every step is a
//! pure function of the coordinate, so columns can be generated in any order
//! and on any number of threads.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::channels::{ChannelKind, NoiseChannel};
use crate::classifier::{classify_terrain, TerrainHint};
use crate::config::{ConfigError, TerrainConfig};
use crate::erosion::ErosionLayer;
use crate::parameters::{MultiNoiseParameters, ParameterSampler};
use crate::seeds::ChannelSeeds;
use crate::spline::MultiDimensionalSpline;
use crate::tilemap::Tilemap;
use crate::world::{chunk_origin, clamp_surface, CHUNK_SIZE};

// =============================================================================
// SHAPING CONSTANTS
// =============================================================================

// Erosion factor quadratic: 1.60 at e=-1, 0.70 at e=0, 0.25 at e=+1
const EROSION_FACTOR_BASE: f32 = 0.70;
const EROSION_FACTOR_LINEAR: f32 = 0.675;
const EROSION_FACTOR_QUADRATIC: f32 = 0.225;

/// Columns within this many blocks of sea level ignore peaks/valleys
pub const PV_MIN_RELIEF: i32 = 20;

const MESA_WEIRDNESS_THRESHOLD: f32 = 0.7;
const MESA_BASE_LAYER: i32 = 16;
const MESA_MAX_LAYER: i32 = 24;
const MESA_LAYER_SPREAD: f32 = 27.0;
const PLATEAU_THRESHOLD: f32 = 0.4;

const SPIRE_MIN_ABOVE_SEA: i32 = 30;
const SPIRE_AMPLITUDE: f32 = 15.0;

const NORMAL_TERRACE_LAYER: i32 = 8;
const NORMAL_TERRACE_WEIRDNESS: f32 = 0.7;

impl TerrainHint {
    /// Peaks/valleys amplification strength for this archetype
    pub fn pv_strength(&self) -> f32 {
        match self {
            TerrainHint::SharpPeaks => 50.0,
            TerrainHint::Normal => 30.0,
            TerrainHint::GentleHills => 20.0,
            TerrainHint::Mesa => 15.0,
            TerrainHint::FlatPlains => 0.0,
        }
    }
}

// =============================================================================
// SHAPING PRIMITIVES
// =============================================================================

/// Height multiplier relative to sea level for an erosion value.
///
/// Not neutral at zero: resting erosion still flattens to 0.70×.
pub fn calculate_erosion_factor(erosion: f32) -> f32 {
    EROSION_FACTOR_BASE - EROSION_FACTOR_LINEAR * erosion + EROSION_FACTOR_QUADRATIC * erosion * erosion
}

/// Scale relief around sea level by the erosion factor.
///
/// Saturates instead of overflowing for out-of-range spline heights.
pub fn apply_erosion(height: i32, erosion: f32, sea_level: i32) -> i32 {
    let relief = (height as i64 - sea_level as i64) as f32;
    sea_level.saturating_add((relief * calculate_erosion_factor(erosion)).round() as i32)
}

/// Delta added by peaks/valleys; zero close to sea level
pub fn peaks_valleys_delta(height: i32, peaks_valleys: f32, strength: f32, sea_level: i32) -> i32 {
    let relief = height as i64 - sea_level as i64;
    if relief.abs() <= PV_MIN_RELIEF as i64 {
        return 0;
    }
    (peaks_valleys * relief as f32 / 100.0 * strength).round() as i32
}

pub fn apply_peaks_valleys(height: i32, peaks_valleys: f32, strength: f32, sea_level: i32) -> i32 {
    height.saturating_add(peaks_valleys_delta(height, peaks_valleys, strength, sea_level))
}

/// Quantize down to a multiple of `layer`.
pub fn terrace(height: i32, layer: i32) -> i32 {
    if layer <= 1 {
        return height;
    }
    height.div_euclid(layer).saturating_mul(layer)
}

/// Mesa terrace thickness, 16 blocks at the threshold growing to 24
pub fn mesa_layer_size(weirdness: f32) -> i32 {
    let extra = ((weirdness - MESA_WEIRDNESS_THRESHOLD) * MESA_LAYER_SPREAD).round() as i32;
    (MESA_BASE_LAYER + extra).clamp(MESA_BASE_LAYER, MESA_MAX_LAYER)
}

/// Continentalness → base height, deep ocean to high peaks.
///
/// Slopes are in blocks per unit of continentalness. Zero slopes at the ends
/// keep the ocean floor and the highest peaks flat.
pub fn default_primary_spline() -> MultiDimensionalSpline {
    MultiDimensionalSpline::new()
        .with_constant(-1.0, 24.0, 0.0) // deep ocean
        .with_constant(-0.6, 30.0, 0.0) // ocean floor
        .with_constant(-0.35, 44.0, 60.0) // shelf
        .with_constant(-0.15, 60.0, 50.0) // coast
        .with_constant(0.0, 75.0, 60.0) // lowlands
        .with_constant(0.3, 95.0, 60.0) // inland
        .with_constant(0.6, 140.0, 200.0) // highlands
        .with_constant(1.0, 190.0, 0.0) // peaks
}

// =============================================================================
// RESULTS
// =============================================================================

/// Every intermediate value of one column's height calculation
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HeightCalculationDebugInfo {
    pub x: i32,
    pub z: i32,
    pub parameters: MultiNoiseParameters,
    pub base_height: i32,
    pub hint: TerrainHint,
    pub after_erosion: i32,
    pub pv_delta: i32,
    pub after_weirdness: i32,
    pub final_height: i32,
}

/// Surface heights of one 16×16 chunk, indexed `[local_x][local_z]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnHeights {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub heights: [[i32; CHUNK_SIZE]; CHUNK_SIZE],
}

impl ColumnHeights {
    pub fn get(&self, local_x: usize, local_z: usize) -> i32 {
        self.heights[local_x][local_z]
    }

    /// `(local_x, local_z, height)` for every column
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.heights
            .iter()
            .enumerate()
            .flat_map(|(lx, row)| row.iter().enumerate().map(move |(lz, &h)| (lx, lz, h)))
    }

    pub fn max(&self) -> i32 {
        self.iter().map(|(_, _, h)| h).max().unwrap_or(0)
    }
}

/// Heights and hints over a rectangular region
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    pub heights: Tilemap<i32>,
    pub hints: Tilemap<TerrainHint>,
}

impl HeightField {
    pub fn width(&self) -> usize {
        self.heights.width
    }

    pub fn depth(&self) -> usize {
        self.heights.depth
    }

    /// Number of columns per terrain hint, in `TerrainHint::all()` order
    pub fn hint_counts(&self) -> Vec<(TerrainHint, usize)> {
        TerrainHint::all()
            .iter()
            .map(|hint| (*hint, self.hints.values().iter().filter(|h| *h == hint).count()))
            .collect()
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Deterministic column height generator for one world seed.
///
/// Immutable after construction; share it by reference across threads.
#[derive(Clone, Debug)]
pub struct HeightMapGenerator {
    seeds: ChannelSeeds,
    sea_level: i32,
    world_height: i32,
    sampler: ParameterSampler,
    primary_spline: MultiDimensionalSpline,
    erosion_layer: ErosionLayer,
    plateau: NoiseChannel,
    spire: NoiseChannel,
}

impl HeightMapGenerator {
    /// Generator with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::build(ChannelSeeds::from_world(seed), &TerrainConfig::default())
    }

    pub fn try_new(seed: u64, config: &TerrainConfig) -> Result<Self, ConfigError> {
        Self::with_seeds(ChannelSeeds::from_world(seed), config)
    }

    /// Generator with explicit per-channel seeds.
    pub fn with_seeds(seeds: ChannelSeeds, config: &TerrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(spline) = &config.primary_spline {
            spline.validate_arity(0)?;
        }
        Ok(Self::build(seeds, config))
    }

    fn build(seeds: ChannelSeeds, config: &TerrainConfig) -> Self {
        let primary_spline = config
            .primary_spline
            .clone()
            .unwrap_or_else(default_primary_spline);
        let erosion_params = config.erosion_params();

        info!(
            world_seed = seeds.world,
            sea_level = config.sea_level,
            world_height = config.world_height,
            spline_points = primary_spline.len(),
            detail_factor = erosion_params.detail_factor,
            "created height map generator"
        );

        Self {
            sampler: ParameterSampler::new(&seeds, config),
            erosion_layer: ErosionLayer::new(&seeds, config.detail, erosion_params),
            plateau: NoiseChannel::from_seeds(ChannelKind::Plateau, &seeds, config.plateau),
            spire: NoiseChannel::from_seeds(ChannelKind::Spire, &seeds, config.spire),
            seeds,
            sea_level: config.sea_level,
            world_height: config.world_height,
            primary_spline,
        }
    }

    pub fn seeds(&self) -> &ChannelSeeds {
        &self.seeds
    }

    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    pub fn world_height(&self) -> i32 {
        self.world_height
    }

    pub fn primary_spline(&self) -> &MultiDimensionalSpline {
        &self.primary_spline
    }

    pub fn sample_parameters(&self, x: i32, z: i32) -> MultiNoiseParameters {
        self.sampler.sample(x as f32, z as f32)
    }

    /// Unclamped spline height for a continentalness value
    pub fn base_height_for(&self, continentalness: f32) -> i32 {
        self.primary_spline.sample(continentalness, &[]).round() as i32
    }

    /// Height from continentalness alone, no classification or shaping.
    pub fn generate_base_height(&self, x: i32, z: i32) -> i32 {
        let continentalness = self.sampler.continentalness(x as f32, z as f32);
        clamp_surface(self.base_height_for(continentalness), self.world_height)
    }

    pub fn classify(&self, params: &MultiNoiseParameters) -> TerrainHint {
        classify_terrain(params)
    }

    /// Full pipeline for one column.
    pub fn generate_height(&self, x: i32, z: i32, params: &MultiNoiseParameters) -> i32 {
        self.debug_info(x, z, params).final_height
    }

    /// Sample parameters and run the full pipeline.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let params = self.sample_parameters(x, z);
        self.generate_height(x, z, &params)
    }

    pub fn height_and_hint_at(&self, x: i32, z: i32) -> (i32, TerrainHint) {
        let info = self.debug_info(x, z, &self.sample_parameters(x, z));
        (info.final_height, info.hint)
    }

    /// Run the pipeline and keep every intermediate value.
    pub fn debug_info(&self, x: i32, z: i32, params: &MultiNoiseParameters) -> HeightCalculationDebugInfo {
        let base_height = self.base_height_for(params.continentalness);
        let hint = classify_terrain(params);

        let after_erosion = apply_erosion(base_height, params.erosion, self.sea_level);
        let pv_delta = peaks_valleys_delta(
            after_erosion,
            params.peaks_valleys,
            hint.pv_strength(),
            self.sea_level,
        );
        let after_pv = after_erosion.saturating_add(pv_delta);
        let after_weirdness = self.shape_weirdness(hint, after_pv, x, z, params);

        let detailed = self.erosion_layer.apply(after_weirdness, x as f32, z as f32);
        let final_height = clamp_surface(detailed, self.world_height);

        HeightCalculationDebugInfo {
            x,
            z,
            parameters: *params,
            base_height,
            hint,
            after_erosion,
            pv_delta,
            after_weirdness,
            final_height,
        }
    }

    fn shape_weirdness(
        &self,
        hint: TerrainHint,
        height: i32,
        x: i32,
        z: i32,
        params: &MultiNoiseParameters,
    ) -> i32 {
        match hint {
            TerrainHint::Mesa => {
                if params.weirdness <= MESA_WEIRDNESS_THRESHOLD {
                    return height;
                }
                let layer = mesa_layer_size(params.weirdness);
                let stepped = terrace(height, layer);
                if self.plateau.sample(x as f32, z as f32) > PLATEAU_THRESHOLD {
                    stepped.saturating_add(layer)
                } else {
                    stepped
                }
            }
            TerrainHint::SharpPeaks => {
                if height <= self.sea_level.saturating_add(SPIRE_MIN_ABOVE_SEA) {
                    return height;
                }
                let spire = self.spire.sample(x as f32, z as f32);
                height.saturating_add((spire * SPIRE_AMPLITUDE).round() as i32)
            }
            TerrainHint::Normal => {
                if params.weirdness.abs() > NORMAL_TERRACE_WEIRDNESS {
                    terrace(height, NORMAL_TERRACE_LAYER)
                } else {
                    height
                }
            }
            TerrainHint::GentleHills | TerrainHint::FlatPlains => height,
        }
    }

    /// Heights for every column of a chunk.
    pub fn generate_chunk_heights(&self, chunk_x: i32, chunk_z: i32) -> ColumnHeights {
        let origin_x = chunk_origin(chunk_x);
        let origin_z = chunk_origin(chunk_z);
        let mut heights = [[0; CHUNK_SIZE]; CHUNK_SIZE];
        for (lx, row) in heights.iter_mut().enumerate() {
            for (lz, height) in row.iter_mut().enumerate() {
                *height = self.height_at(origin_x + lx as i32, origin_z + lz as i32);
            }
        }
        debug!(chunk_x, chunk_z, "generated chunk heights");
        ColumnHeights {
            chunk_x,
            chunk_z,
            heights,
        }
    }

    /// Heights and hints for a region, one row per rayon task.
    pub fn generate_region(&self, origin_x: i32, origin_z: i32, width: usize, depth: usize) -> HeightField {
        let rows: Vec<Vec<(i32, TerrainHint)>> = (0..depth)
            .into_par_iter()
            .map(|row| {
                let z = origin_z + row as i32;
                (0..width)
                    .map(|col| self.height_and_hint_at(origin_x + col as i32, z))
                    .collect()
            })
            .collect();

        debug!(origin_x, origin_z, width, depth, "generated region");
        split_rows(origin_x, origin_z, width, rows)
    }

    /// Same as [`generate_region`](Self::generate_region) on the calling thread
    pub fn generate_region_sequential(
        &self,
        origin_x: i32,
        origin_z: i32,
        width: usize,
        depth: usize,
    ) -> HeightField {
        let rows = (0..depth)
            .map(|row| {
                let z = origin_z + row as i32;
                (0..width)
                    .map(|col| self.height_and_hint_at(origin_x + col as i32, z))
                    .collect()
            })
            .collect();
        split_rows(origin_x, origin_z, width, rows)
    }
}

fn split_rows(origin_x: i32, origin_z: i32, width: usize, rows: Vec<Vec<(i32, TerrainHint)>>) -> HeightField {
    let mut heights = Vec::with_capacity(rows.len());
    let mut hints = Vec::with_capacity(rows.len());
    for row in rows {
        let (row_heights, row_hints): (Vec<i32>, Vec<TerrainHint>) = row.into_iter().unzip();
        heights.push(row_heights);
        hints.push(row_hints);
    }
    HeightField {
        heights: Tilemap::from_rows(origin_x, origin_z, width, heights),
        hints: Tilemap::from_rows(origin_x, origin_z, width, hints),
    }
}
