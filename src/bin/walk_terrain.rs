//! Terrain walker binary — drives the streaming manager along a straight
//! walk and reports the load/unload traffic.
//!
//! Usage: cargo run --release --bin walk_terrain -- [OPTIONS]
//!
//! Options:
//!   --ticks <N>        Number of ticks to simulate (default: 600)
//!   --speed <UNITS>    World units moved per tick (default: 8.0)
//!   --heading <DEG>    Walk direction in degrees from +X (default: 30)
//!   --config <FILE>    JSON file with GridConfig overrides

use glam::Vec3;

use terratile::chunk::ChunkCoord;
use terratile::config::GridConfig;
use terratile::core::types::Result;
use terratile::streaming::ChunkStreamingManager;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    let ticks = parse_usize_arg(&args, "--ticks").unwrap_or(600);
    let speed = parse_f32_arg(&args, "--speed").unwrap_or(8.0);
    let heading = parse_f32_arg(&args, "--heading").unwrap_or(30.0).to_radians();
    let config = match parse_str_arg(&args, "--config") {
        Some(path) => load_config(&path).expect("Failed to load config file"),
        None => GridConfig::default(),
    };

    println!("=== Terratile Walker ===");
    println!("Grid:   {}x{} cells, {}x{} units/cell", config.size_x, config.size_z, config.scale_x, config.scale_z);
    println!("Window: load distance {} ({} chunks)", config.load_distance, (2 * config.load_distance + 1).pow(2));
    println!("Walk:   {} ticks at {} units/tick", ticks, speed);
    println!();

    let start = std::time::Instant::now();
    let mut manager = ChunkStreamingManager::new(config, Vec3::ZERO)
        .expect("Invalid grid configuration");
    println!(
        "Seeded {} chunks in {:.1?}",
        manager.loaded_count(),
        start.elapsed()
    );

    let direction = Vec3::new(heading.cos(), 0.0, heading.sin());
    let mut pos = Vec3::ZERO;
    let mut loads = 0usize;
    let mut unloads = 0usize;
    let mut prop_count: usize = manager.chunks().map(|c| c.props.len()).sum();

    let start = std::time::Instant::now();
    for tick in 0..ticks {
        pos += direction * speed;
        let delta = manager.tick(pos);
        if let Some(coord) = delta.loaded {
            loads += 1;
            prop_count += manager
                .get(coord)
                .map(|chunk| chunk.props.len())
                .unwrap_or(0);
            log::debug!("tick {}: loaded {}", tick, coord);
        }
        unloads += delta.unloaded.len();
    }
    let elapsed = start.elapsed();

    let reference = manager.reference();
    println!();
    println!("Walked to chunk {} in {:.1?} ({:.0} ticks/s)", reference, elapsed, ticks as f64 / elapsed.as_secs_f64());
    println!("Loads:   {}", loads);
    println!("Unloads: {}", unloads);
    println!("Resident: {} chunks, {} props placed in total", manager.loaded_count(), prop_count);

    // Sanity: the window invariant must hold wherever the walk ended.
    let d = manager.config().load_distance;
    let outside = manager
        .chunks()
        .filter(|c| c.coord.chebyshev_distance(reference) > d)
        .count();
    assert_eq!(outside, 0, "window invariant violated");
    sample_heights(&manager, reference);
}

/// Print a few terrain heights around the final reference chunk.
fn sample_heights(manager: &ChunkStreamingManager, reference: ChunkCoord) {
    if let Some(chunk) = manager.get(reference) {
        let mid = chunk.mesh.vertices.len() / 2;
        println!(
            "Terrain height at window center: {:.2}",
            chunk.mesh.vertices[mid].y
        );
    }
}

fn load_config(path: &str) -> Result<GridConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: GridConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

fn parse_f32_arg(args: &[String], name: &str) -> Option<f32> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn parse_usize_arg(args: &[String], name: &str) -> Option<usize> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn parse_str_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
