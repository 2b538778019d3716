//! Chunk identity and generation.
//!
//! A chunk is a fixed-size terrain tile addressed by an integer coordinate
//! pair. Its geometry is a pure function of the coordinate and the grid
//! config: regenerating the same coordinate yields bit-identical data.

use glam::Vec3;
use std::fmt;

use crate::config::GridConfig;
use crate::props::{PropPlacement, place_props};
use crate::terrain::mesh::{ChunkMesh, build_chunk_mesh};

/// Integer coordinate identifying a chunk in the world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert a world position to the containing chunk coordinate.
    ///
    /// Per axis, the result is the greatest integer `c` such that
    /// `c * (size * scale) <= position` - a true mathematical floor, for
    /// both signs of the position, not truncation toward zero.
    pub fn from_world(pos: Vec3, config: &GridConfig) -> Self {
        Self {
            x: (pos.x / config.chunk_span_x()).floor() as i32,
            z: (pos.z / config.chunk_span_z()).floor() as i32,
        }
    }

    /// World-space origin (minimum corner) of this chunk.
    pub fn world_origin(&self, config: &GridConfig) -> Vec3 {
        Vec3::new(
            self.x as f32 * config.chunk_span_x(),
            0.0,
            self.z as f32 * config.chunk_span_z(),
        )
    }

    /// Chebyshev distance: max of the per-axis absolute deltas. Defines the
    /// square load window.
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A generated terrain tile: mesh data plus prop placement requests.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub mesh: ChunkMesh,
    pub props: Vec<PropPlacement>,
}

impl Chunk {
    /// Generate the chunk at `coord`: vertex grid, index buffer, colors,
    /// and prop placements.
    pub fn generate(coord: ChunkCoord, config: &GridConfig) -> Self {
        let mesh = build_chunk_mesh(coord, config);
        let props = place_props(coord, &mesh, config);
        Self { coord, mesh, props }
    }
}
