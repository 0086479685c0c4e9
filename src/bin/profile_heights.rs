//! Profiling tool for column height generation

use std::time::Instant;

use terrain_engine::heightmap::HeightMapGenerator;
use terrain_engine::chunk::Chunk;
use terrain_engine::ores::{BiomeTag, OreGenerator};

fn main() {
    let width = 512;
    let depth = 512;
    let seed = 1337u64;

    println!("=== Performance Profiling ===");
    println!("Region size: {}x{} ({} columns)", width, depth, width * depth);
    println!("Rayon threads: {}", rayon::current_num_threads());
    println!();

    let start = Instant::now();
    let generator = HeightMapGenerator::new(seed);
    let setup_time = start.elapsed();
    println!("Generator setup: {:?}", setup_time);

    // Parameter sampling alone
    let start = Instant::now();
    let mut checksum = 0.0f64;
    for z in 0..depth as i32 {
        for x in 0..width as i32 {
            checksum += generator.sample_parameters(x, z).continentalness as f64;
        }
    }
    let sample_time = start.elapsed();
    println!("Parameter sampling: {:?} (checksum {:.3})", sample_time, checksum);

    let start = Instant::now();
    let sequential = generator.generate_region_sequential(0, 0, width, depth);
    let sequential_time = start.elapsed();
    println!("Sequential region: {:?}", sequential_time);

    let start = Instant::now();
    let parallel = generator.generate_region(0, 0, width, depth);
    let parallel_time = start.elapsed();
    println!("Parallel region:   {:?}", parallel_time);
    println!("Outputs identical: {}", sequential == parallel);

    // Chunk heights + ore pass
    let chunks = 64;
    let ores = OreGenerator::from_seeds(generator.seeds());
    let start = Instant::now();
    let mut ore_total = 0;
    for i in 0..chunks {
        let heights = generator.generate_chunk_heights(i % 8, i / 8);
        let mut chunk = Chunk::from_heights(&heights, generator.sea_level());
        ore_total += ores
            .generate_ores(&mut chunk, BiomeTag::Volcanic, i % 8, i / 8, &heights)
            .total();
    }
    let chunk_time = start.elapsed();
    println!("{} chunks with ore pass: {:?} ({} ores)", chunks, chunk_time, ore_total);

    // Summary
    let total = sample_time + sequential_time + parallel_time + chunk_time;
    println!("\n=== Summary ===");
    println!("Sampling:   {:>8.2}% ({:?})", 100.0 * sample_time.as_secs_f64() / total.as_secs_f64(), sample_time);
    println!("Sequential: {:>8.2}% ({:?})", 100.0 * sequential_time.as_secs_f64() / total.as_secs_f64(), sequential_time);
    println!("Parallel:   {:>8.2}% ({:?})", 100.0 * parallel_time.as_secs_f64() / total.as_secs_f64(), parallel_time);
    println!("Chunks:     {:>8.2}% ({:?})", 100.0 * chunk_time.as_secs_f64() / total.as_secs_f64(), chunk_time);
    if parallel_time.as_secs_f64() > 0.0 {
        println!("Speedup:    {:.2}x", sequential_time.as_secs_f64() / parallel_time.as_secs_f64());
    }
}
