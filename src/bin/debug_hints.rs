//! Debug script to output terrain hints and heights as ASCII

use std::fs::File;
use std::io::{BufWriter, Write};

use terrain_engine::ascii::{height_char, hint_char, hint_legend};
use terrain_engine::classifier::TerrainHint;
use terrain_engine::heightmap::HeightMapGenerator;
use terrain_engine::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let width = 128;
    let depth = 64;
    let step = 8;
    let seed = 12345u64;

    let generator = HeightMapGenerator::new(seed);
    let sea_level = generator.sea_level();
    let mut file = BufWriter::new(File::create("hint_debug.txt")?);

    // Write header
    writeln!(
        file,
        "=== TERRAIN HINT DEBUG MAP ({}x{}, {} blocks/char) seed={} ===",
        width, depth, step, seed
    )?;
    writeln!(file)?;
    write!(file, "{}", hint_legend())?;
    writeln!(file)?;

    let mut counts = [0usize; 5];
    let mut hint_rows = Vec::with_capacity(depth);
    let mut height_rows = Vec::with_capacity(depth);

    for row in 0..depth {
        let z = (row as i32 - depth as i32 / 2) * step;
        let mut hints = String::with_capacity(width);
        let mut heights = String::with_capacity(width);
        for col in 0..width {
            let x = (col as i32 - width as i32 / 2) * step;
            let (height, hint) = generator.height_and_hint_at(x, z);
            hints.push(hint_char(hint));
            heights.push(height_char(height, sea_level));
            if let Some(idx) = TerrainHint::all().iter().position(|h| *h == hint) {
                counts[idx] += 1;
            }
        }
        hint_rows.push(hints);
        height_rows.push(heights);
    }

    writeln!(file, "=== HINTS ===")?;
    for row in &hint_rows {
        writeln!(file, "{}", row)?;
    }
    writeln!(file)?;
    writeln!(file, "=== HEIGHTS ===")?;
    for row in &height_rows {
        writeln!(file, "{}", row)?;
    }
    writeln!(file)?;

    writeln!(file, "=== HINT DISTRIBUTION ===")?;
    let total = (width * depth) as f64;
    for (hint, count) in TerrainHint::all().iter().zip(counts) {
        writeln!(file, "  {:13} {:>6} ({:>5.1}%)", hint.to_string(), count, 100.0 * count as f64 / total)?;
    }
    file.flush()?;

    println!("Wrote hint_debug.txt");
    for (hint, count) in TerrainHint::all().iter().zip(counts) {
        println!("  {}: {}", hint, count);
    }
    Ok(())
}
