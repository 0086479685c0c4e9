use std::error::Error;

use clap::Parser;
use tracing::info;

use terrain_engine::ascii::{self, AsciiMode};
use terrain_engine::chunk::Chunk;
use terrain_engine::config::TerrainConfig;
use terrain_engine::erosion::ErosionPreset;
use terrain_engine::export;
use terrain_engine::heightmap::HeightMapGenerator;
use terrain_engine::logging;
use terrain_engine::ores::{BiomeSource, ClimateBiomeSource, OreGenerator};
use terrain_engine::world::{chunk_origin, CHUNK_SIZE};

#[derive(Parser, Debug)]
#[command(name = "terrain_engine")]
#[command(about = "Sample deterministic terrain heights, hints and ores")]
struct Args {
    /// World seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// World X of the region origin (or the inspected column)
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    x: i32,

    /// World Z of the region origin (or the inspected column)
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    z: i32,

    /// Region width in columns
    #[arg(short = 'W', long, default_value = "128")]
    width: usize,

    /// Region depth in columns
    #[arg(short = 'D', long, default_value = "64")]
    depth: usize,

    /// JSON config file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the detail layer preset (none, minimal, normal, dramatic)
    #[arg(long)]
    erosion: Option<ErosionPreset>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<String>,

    /// Print the full calculation for the column at (x, z)
    #[arg(long)]
    inspect: bool,

    /// Export the region height map as PNG
    #[arg(long)]
    export_heights: Option<String>,

    /// Export the region hint map as PNG
    #[arg(long)]
    export_hints: Option<String>,

    /// Dump debug info for every column of the region as JSON
    #[arg(long)]
    debug_json: Option<String>,

    /// Print the region as ASCII (hint or height)
    #[arg(long)]
    ascii: Option<String>,

    /// Write a plain-text region report
    #[arg(long)]
    report: Option<String>,

    /// Run the ore pass on the chunk containing (x, z) and print counts
    #[arg(long)]
    ores: bool,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_with_default(if args.verbose { "debug" } else { "info" });

    let seed = args.seed.unwrap_or_else(rand::random);

    let mut config = match &args.config {
        Some(path) => TerrainConfig::load(path)?,
        None => TerrainConfig::default(),
    };
    if let Some(preset) = args.erosion {
        config.erosion_preset = preset;
    }
    if let Some(path) = &args.write_config {
        config.save(path)?;
        println!("Wrote config to {}", path);
        return Ok(());
    }

    let generator = HeightMapGenerator::try_new(seed, &config)?;
    println!("Terrain seed: {}", seed);

    if args.inspect {
        let params = generator.sample_parameters(args.x, args.z);
        let info = generator.debug_info(args.x, args.z, &params);
        println!("Column ({}, {})", args.x, args.z);
        println!("  Parameters:   {}", params);
        println!("  Base height:  {}", info.base_height);
        if let Some((lo, hi)) = generator.primary_spline().value_range() {
            println!("  Spline range: {:.0} to {:.0}", lo, hi);
        }
        println!("  Hint:         {} ({})", info.hint, info.hint.description());
        println!("  After erosion:   {}", info.after_erosion);
        println!("  PV delta:        {:+}", info.pv_delta);
        println!("  After weirdness: {}", info.after_weirdness);
        println!("  Final height:    {}", info.final_height);
    }

    if args.ores {
        let chunk_x = args.x.div_euclid(CHUNK_SIZE as i32);
        let chunk_z = args.z.div_euclid(CHUNK_SIZE as i32);
        let heights = generator.generate_chunk_heights(chunk_x, chunk_z);
        let mut chunk = Chunk::from_heights(&heights, generator.sea_level());

        let centre = CHUNK_SIZE as i32 / 2;
        let biome = ClimateBiomeSource::new(&generator)
            .current_biome(chunk_origin(chunk_x) + centre, chunk_origin(chunk_z) + centre);
        let counts = OreGenerator::from_seeds(generator.seeds())
            .generate_ores(&mut chunk, biome, chunk_x, chunk_z, &heights);

        println!("Chunk ({}, {}) biome {}, max height {}", chunk_x, chunk_z, biome, heights.max());
        println!("  Coal:    {}", counts.coal);
        println!("  Iron:    {}", counts.iron);
        println!("  Crystal: {}", counts.crystal);
    }

    let wants_region = args.export_heights.is_some()
        || args.export_hints.is_some()
        || args.debug_json.is_some()
        || args.ascii.is_some()
        || args.report.is_some();
    if !wants_region {
        return Ok(());
    }

    info!(width = args.width, depth = args.depth, "generating region");
    let field = generator.generate_region(args.x, args.z, args.width, args.depth);
    if let Some((min_h, max_h)) = field.heights.min_max() {
        println!("Region height range: {} to {}", min_h, max_h);
    }

    if let Some(path) = &args.export_heights {
        export::export_height_map(&field, generator.sea_level(), generator.world_height(), path)?;
        println!("Saved height map to {}", path);
    }
    if let Some(path) = &args.export_hints {
        export::export_hint_map(&field, path)?;
        println!("Saved hint map to {}", path);
    }
    if let Some(path) = &args.debug_json {
        let infos: Vec<_> = field
            .heights
            .iter()
            .map(|(x, z, _)| {
                let (wx, wz) = field.heights.world_coord(x, z);
                generator.debug_info(wx, wz, &generator.sample_parameters(wx, wz))
            })
            .collect();
        export::export_debug_info(&infos, path)?;
        println!("Saved {} debug snapshots to {}", infos.len(), path);
    }
    if let Some(mode) = &args.ascii {
        let mode = match mode.as_str() {
            "height" => AsciiMode::Height,
            "hint" => AsciiMode::Hint,
            other => return Err(format!("unknown ascii mode '{}' (expected hint or height)", other).into()),
        };
        print!("{}", ascii::render_ascii_map(&field, generator.sea_level(), mode));
        if mode == AsciiMode::Hint {
            print!("{}", ascii::hint_legend());
        } else {
            print!("{}", ascii::height_legend());
        }
    }
    if let Some(path) = &args.report {
        ascii::export_report(&field, seed, generator.sea_level(), path)?;
        println!("Saved report to {}", path);
    }

    Ok(())
}
