//! PNG and JSON export of generated regions.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;
use thiserror::Error;

use crate::classifier::TerrainHint;
use crate::heightmap::{HeightCalculationDebugInfo, HeightField};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Heights as an RGB image: blue shades below sea level, spectral above.
pub fn render_height_map(field: &HeightField, sea_level: i32, world_height: i32) -> RgbImage {
    let heights = &field.heights;
    let mut img: RgbImage = ImageBuffer::new(heights.width as u32, heights.depth as u32);

    for (x, z, &h) in heights.iter() {
        let color = if h < sea_level {
            let depth = (sea_level - h) as f32 / sea_level.max(1) as f32;
            lerp_color([70, 130, 200], [10, 30, 90], depth.clamp(0.0, 1.0))
        } else {
            let range = (world_height - 1 - sea_level).max(1) as f32;
            spectral_colormap(((h - sea_level) as f32 / range).clamp(0.0, 1.0))
        };
        img.put_pixel(x as u32, z as u32, Rgb(color));
    }

    img
}

pub fn hint_color(hint: TerrainHint) -> [u8; 3] {
    match hint {
        TerrainHint::Mesa => [200, 110, 60],
        TerrainHint::SharpPeaks => [235, 235, 245],
        TerrainHint::GentleHills => [110, 170, 80],
        TerrainHint::FlatPlains => [190, 210, 120],
        TerrainHint::Normal => [120, 120, 120],
    }
}

pub fn render_hint_map(field: &HeightField) -> RgbImage {
    let hints = &field.hints;
    let mut img: RgbImage = ImageBuffer::new(hints.width as u32, hints.depth as u32);
    for (x, z, &hint) in hints.iter() {
        img.put_pixel(x as u32, z as u32, Rgb(hint_color(hint)));
    }
    img
}

/// Export the height map as a PNG.
pub fn export_height_map(
    field: &HeightField,
    sea_level: i32,
    world_height: i32,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    render_height_map(field, sea_level, world_height).save(path)?;
    Ok(())
}

pub fn export_hint_map(field: &HeightField, path: impl AsRef<Path>) -> Result<(), ExportError> {
    render_hint_map(field).save(path)?;
    Ok(())
}

/// Pretty-printed JSON of any serialisable value
pub fn export_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Debug snapshots of a set of columns as a JSON array.
pub fn export_debug_info(infos: &[HeightCalculationDebugInfo], path: impl AsRef<Path>) -> Result<(), ExportError> {
    export_json(infos, path)
}

/// Upper half of the spectral colormap: teal -> yellow -> orange -> dark red
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 6] = [
        [0.40, 0.76, 0.65],
        [0.67, 0.87, 0.64],
        [0.90, 0.96, 0.60],
        [1.00, 0.88, 0.55],
        [0.96, 0.43, 0.26],
        [0.62, 0.00, 0.26],
    ];

    let t_scaled = t * 5.0;
    let idx = (t_scaled as usize).min(4);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}
