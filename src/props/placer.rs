//! Noise-gated prop placement.
//!
//! Scans the already-computed vertex grid of a chunk and emits placement
//! requests where a domain-shifted white-noise sample clears the rarity
//! threshold on sufficiently high terrain. The sampling domain is offset
//! from the terrain noise domain so placement is not correlated with
//! height-noise phase. Instantiating and tracking the resulting objects is
//! the host's concern; the contract ends at the emitted requests.

use glam::Vec3;
use log::trace;

use crate::chunk::ChunkCoord;
use crate::config::GridConfig;
use crate::terrain::mesh::ChunkMesh;
use crate::terrain::noise::white_noise;

/// Request to place one decorative prop at a world-space position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropPlacement {
    pub position: Vec3,
}

/// Scan the chunk's vertex grid and emit placement requests.
///
/// Deterministic: the same coordinate, mesh, and config always yield the
/// same placements, in grid scan order (z outer, x inner).
pub fn place_props(coord: ChunkCoord, mesh: &ChunkMesh, config: &GridConfig) -> Vec<PropPlacement> {
    let params = &config.props;
    let mut placements = Vec::new();

    for z in 0..=config.size_z {
        for x in 0..=config.size_x {
            let gx = coord.x.wrapping_mul(config.size_x as i32).wrapping_add(x as i32);
            let gz = coord.z.wrapping_mul(config.size_z as i32).wrapping_add(z as i32);
            let sample_x = (gx as f32 * config.scale_x) as i32 + params.domain_offset;
            let sample_z = (gz as f32 * config.scale_z) as i32 + params.domain_offset;
            if white_noise(sample_x, sample_z) <= params.rarity_threshold {
                continue;
            }

            let vertex = mesh.vertices[ChunkMesh::vertex_index(config, x, z)];
            let h01 = vertex.y / config.height_multiplier;
            if h01 <= params.height_threshold {
                continue;
            }

            placements.push(PropPlacement {
                position: Vec3::new(
                    gx as f32 * config.scale_x,
                    vertex.y + params.vertical_offset,
                    gz as f32 * config.scale_z,
                ),
            });
        }
    }

    trace!("chunk {}: {} prop placements", coord, placements.len());
    placements
}
