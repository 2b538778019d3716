//! Tick-driven chunk streaming.
//!
//! The manager owns the authoritative mapping from chunk coordinate to
//! generated chunk. Each tick it derives the reference point's chunk
//! coordinate, evicts everything outside the square load window, and loads
//! at most one missing chunk inside it. Unloads are unbounded per tick;
//! loads are rate-limited to one so per-tick cost stays bounded.

use std::collections::HashMap;

use glam::Vec3;
use log::{debug, info};
use rayon::prelude::*;

use crate::chunk::{Chunk, ChunkCoord};
use crate::config::GridConfig;
use crate::core::types::Result;

/// Set-membership delta produced by one tick.
///
/// The host mirrors these transitions onto its own renderable and
/// collidable representations, keyed by coordinate.
#[derive(Clone, Debug, Default)]
pub struct TickDelta {
    /// Coordinate loaded this tick, if any (at most one per tick).
    pub loaded: Option<ChunkCoord>,
    /// Coordinates unloaded this tick. Unbounded; a large reference jump
    /// can evict the whole window at once. Order unspecified.
    pub unloaded: Vec<ChunkCoord>,
}

/// Streams fixed-size terrain chunks in and out of a loaded working set as
/// the reference point moves.
///
/// Invariant: after any tick, every loaded coordinate lies within Chebyshev
/// distance `load_distance` of the current reference chunk coordinate. The
/// opposite direction is transient: a chunk inside the window may be
/// briefly missing while the one-load-per-tick rate limit catches up.
pub struct ChunkStreamingManager {
    config: GridConfig,
    loaded: HashMap<ChunkCoord, Chunk>,
    reference: ChunkCoord,
}

impl ChunkStreamingManager {
    /// Create the manager and synchronously seed the full load window
    /// around the starting position, so the reference point is never
    /// surrounded by empty space on the first tick.
    ///
    /// Validates the config once; misconfiguration is reported here and
    /// never rechecked per tick.
    pub fn new(config: GridConfig, reference_pos: Vec3) -> Result<Self> {
        config.validate()?;
        let reference = ChunkCoord::from_world(reference_pos, &config);
        let mut manager = Self {
            config,
            loaded: HashMap::new(),
            reference,
        };
        manager.seed_window();
        Ok(manager)
    }

    /// Generate every chunk in the current window and publish them.
    ///
    /// Generation is pure and runs in parallel; publishing into the loaded
    /// set stays on the caller thread, which remains the sole mutator.
    fn seed_window(&mut self) {
        let d = self.config.load_distance;
        let mut coords = Vec::with_capacity(((2 * d + 1) * (2 * d + 1)) as usize);
        for dx in -d..=d {
            for dz in -d..=d {
                coords.push(ChunkCoord::new(self.reference.x + dx, self.reference.z + dz));
            }
        }

        let chunks: Vec<Chunk> = coords
            .par_iter()
            .map(|&coord| Chunk::generate(coord, &self.config))
            .collect();
        for chunk in chunks {
            self.loaded.insert(chunk.coord, chunk);
        }

        info!(
            "seeded {} chunks around {} (load distance {})",
            self.loaded.len(),
            self.reference,
            d
        );
    }

    /// Advance one tick for the given reference world position.
    ///
    /// 1. Derive the current reference chunk coordinate.
    /// 2. On a reference change, unload every chunk whose Chebyshev
    ///    distance from the new reference exceeds the load distance.
    /// 3. Scan the window in fixed order (x outer, z inner, ascending) and
    ///    load the first missing chunk, if any.
    pub fn tick(&mut self, reference_pos: Vec3) -> TickDelta {
        let current = ChunkCoord::from_world(reference_pos, &self.config);
        let mut delta = TickDelta::default();

        if current != self.reference {
            let d = self.config.load_distance;
            delta.unloaded = self
                .loaded
                .keys()
                .copied()
                .filter(|coord| coord.chebyshev_distance(current) > d)
                .collect();
            for coord in &delta.unloaded {
                self.loaded.remove(coord);
                debug!("unloaded chunk {}", coord);
            }
            self.reference = current;
        }

        delta.loaded = self.load_next_missing();
        delta
    }

    /// Load the first unloaded coordinate in the window, scanning in
    /// row-major order. At most one load per tick.
    fn load_next_missing(&mut self) -> Option<ChunkCoord> {
        let d = self.config.load_distance;
        for dx in -d..=d {
            for dz in -d..=d {
                let coord = ChunkCoord::new(self.reference.x + dx, self.reference.z + dz);
                if self.loaded.contains_key(&coord) {
                    continue;
                }
                let chunk = Chunk::generate(coord, &self.config);
                self.loaded.insert(coord, chunk);
                debug!("loaded chunk {}", coord);
                return Some(coord);
            }
        }
        None
    }

    /// Current reference chunk coordinate.
    pub fn reference(&self) -> ChunkCoord {
        self.reference
    }

    /// Whether `coord` is currently loaded. Coordinates never seen are
    /// simply unloaded.
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.loaded.contains_key(&coord)
    }

    /// Get a loaded chunk.
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.loaded.get(&coord)
    }

    /// Number of currently loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Iterate over the loaded chunks.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.loaded.values()
    }

    /// The grid configuration this manager was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}
