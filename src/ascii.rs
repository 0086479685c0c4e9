//! ASCII rendering and export of generated regions
//!
//! Renders hint and height maps as text for terminals and plain-text reports.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::classifier::TerrainHint;
use crate::heightmap::HeightField;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsciiMode {
    /// One character per terrain hint
    Hint,
    /// Elevation gradient relative to sea level
    Height,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Hint => "Hint",
            AsciiMode::Height => "Height",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Hint, AsciiMode::Height]
    }
}

pub fn hint_char(hint: TerrainHint) -> char {
    match hint {
        TerrainHint::Mesa => 'M',
        TerrainHint::SharpPeaks => '^',
        TerrainHint::GentleHills => 'n',
        TerrainHint::FlatPlains => '_',
        TerrainHint::Normal => '.',
    }
}

/// Elevation character: water below sea level, then rising land bands
pub fn height_char(height: i32, sea_level: i32) -> char {
    let relief = height - sea_level;
    match relief {
        r if r < -24 => '~',
        r if r < 0 => '-',
        r if r < 8 => ',',
        r if r < 24 => ':',
        r if r < 48 => '+',
        r if r < 96 => '#',
        _ => '@',
    }
}

pub fn render_ascii_map(field: &HeightField, sea_level: i32, mode: AsciiMode) -> String {
    let width = field.width();
    let depth = field.depth();
    let mut result = String::with_capacity((width + 1) * depth);

    for z in 0..depth {
        for x in 0..width {
            let ch = match mode {
                AsciiMode::Hint => hint_char(*field.hints.get(x, z)),
                AsciiMode::Height => height_char(*field.heights.get(x, z), sea_level),
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

pub fn hint_legend() -> String {
    let mut legend = String::from("=== HINT LEGEND ===\n");
    for hint in TerrainHint::all() {
        legend.push_str(&format!("  {} {:13} {}\n", hint_char(*hint), hint.to_string(), hint.description()));
    }
    legend
}

pub fn height_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== HEIGHT LEGEND (relative to sea level) ===\n");
    legend.push_str("  ~ < -24    - < 0    , < 8    : < 24\n");
    legend.push_str("  + < 48     # < 96   @ >= 96\n");
    legend
}

/// Write a plain-text report: header, both maps, legends and statistics.
pub fn export_report(field: &HeightField, seed: u64, sea_level: i32, path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let total = field.width() * field.depth();

    // Header
    writeln!(file, "=== TERRAIN ENGINE REGION REPORT ===")?;
    writeln!(file, "Seed: {}", seed)?;
    writeln!(
        file,
        "Region: {}x{} at ({}, {})",
        field.width(),
        field.depth(),
        field.heights.origin_x,
        field.heights.origin_z
    )?;
    writeln!(file, "Sea level: {}", sea_level)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    for mode in AsciiMode::all() {
        writeln!(file, "=== MAP ({} View) ===", mode.name())?;
        write!(file, "{}", render_ascii_map(field, sea_level, *mode))?;
        writeln!(file)?;
    }

    write!(file, "{}", hint_legend())?;
    writeln!(file)?;
    write!(file, "{}", height_legend())?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    writeln!(file, "Total columns: {}", total)?;
    let submerged = field.heights.values().iter().filter(|h| **h < sea_level).count();
    let pct = |count: usize| 100.0 * count as f64 / total.max(1) as f64;
    writeln!(file, "Land: {} ({:.1}%)", total - submerged, pct(total - submerged))?;
    writeln!(file, "Water: {} ({:.1}%)", submerged, pct(submerged))?;
    writeln!(file)?;

    writeln!(file, "Hint Distribution:")?;
    let mut counts = field.hint_counts();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (hint, count) in counts {
        writeln!(file, "  {:13} {} {:>6} ({:>5.1}%)", hint.to_string(), hint_char(hint), count, pct(count))?;
    }
    writeln!(file)?;

    if let Some((min_h, max_h)) = field.heights.min_max() {
        let sum: i64 = field.heights.values().iter().map(|h| *h as i64).sum();
        writeln!(file, "Height:")?;
        writeln!(
            file,
            "  Min: {}  Max: {}  Mean: {:.1}",
            min_h,
            max_h,
            sum as f64 / total.max(1) as f64
        )?;
    }

    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::HeightMapGenerator;

    #[test]
    fn test_height_chars() {
        assert_eq!(height_char(10, 64), '~');
        assert_eq!(height_char(63, 64), '-');
        assert_eq!(height_char(64, 64), ',');
        assert_eq!(height_char(100, 64), '+');
        assert_eq!(height_char(250, 64), '@');
    }

    #[test]
    fn test_hint_chars_unique() {
        let mut chars: Vec<char> = TerrainHint::all().iter().map(|h| hint_char(*h)).collect();
        chars.sort();
        chars.dedup();
        assert_eq!(chars.len(), TerrainHint::all().len());
    }

    #[test]
    fn test_render_shape() {
        let generator = HeightMapGenerator::new(1);
        let field = generator.generate_region(100, -50, 20, 6);
        let map = render_ascii_map(&field, generator.sea_level(), AsciiMode::Hint);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.chars().count() == 20));
        assert_eq!(lines[2].chars().nth(4), Some(hint_char(*field.hints.get(4, 2))));
    }

    #[test]
    fn test_export_report() {
        let generator = HeightMapGenerator::new(3);
        let field = generator.generate_region(0, 0, 16, 8);
        let path = std::env::temp_dir().join(format!("terrain_report_{}.txt", std::process::id()));
        export_report(&field, 3, generator.sea_level(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("Seed: 3"));
        assert!(text.contains("Total columns: 128"));
        assert!(text.contains("=== MAP (Hint View) ==="));
    }
}
