//! Chunk mesh construction.
//!
//! Turns a chunk coordinate plus the grid config into three parallel
//! arrays: a vertex grid with fractal-noise heights, a two-triangles-per-
//! cell index buffer, and a per-vertex height-banded color array. Heights
//! are sampled in world-space noise coordinates, so adjacent chunks
//! evaluate the same values along their shared edge and the surface is
//! continuous across borders.

use glam::Vec3;

use crate::chunk::ChunkCoord;
use crate::config::GridConfig;
use crate::terrain::gradient::{Gradient, Rgba};
use crate::terrain::noise::fractal_noise;

/// Sand below, grass in the middle, rock on top.
pub const SAND: Rgba = Rgba::rgb8(250, 242, 120);
pub const GRASS: Rgba = Rgba::rgb8(100, 230, 0);
pub const ROCK: Rgba = Rgba::rgb8(128, 128, 128);

/// Normalized height where the grass->rock band takes over from sand->grass.
const ROCK_BAND_START: f32 = 0.75;
/// Normalized height where the sand->grass band is centered.
const GRASS_BAND_START: f32 = 0.45;
/// Maps a normalized-height offset into the gradient's [0, 1] key span.
const BAND_SHARPNESS: f32 = 16.0;

/// Mesh data for one terrain chunk: parallel vertex, index, and color
/// arrays ready for upload by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    /// `(size_x + 1) * (size_z + 1)` positions, row-major with x fastest,
    /// local to the chunk origin.
    pub vertices: Vec<Vec3>,
    /// `size_x * size_z * 6` indices, two triangles per grid cell.
    pub triangles: Vec<u32>,
    /// One color per vertex.
    pub colors: Vec<Rgba>,
}

impl ChunkMesh {
    /// Index of the vertex at grid position (x, z).
    pub fn vertex_index(config: &GridConfig, x: u32, z: u32) -> usize {
        (z * (config.size_x + 1) + x) as usize
    }
}

/// Build the full mesh for a chunk.
pub fn build_chunk_mesh(coord: ChunkCoord, config: &GridConfig) -> ChunkMesh {
    let vertices = make_vertices(coord, config);
    let triangles = make_triangles(config);
    let colors = make_colors(&vertices, config);
    ChunkMesh { vertices, triangles, colors }
}

fn make_vertices(coord: ChunkCoord, config: &GridConfig) -> Vec<Vec3> {
    let mut vertices = Vec::with_capacity(config.vertex_count());
    for z in 0..=config.size_z {
        for x in 0..=config.size_x {
            // World-space noise coordinate: shared grid lines between
            // adjacent chunks evaluate identically.
            let gx = coord.x.wrapping_mul(config.size_x as i32).wrapping_add(x as i32);
            let gz = coord.z.wrapping_mul(config.size_z as i32).wrapping_add(z as i32);
            let noise_x = gx as f32 * config.scale_x * config.noise.base_scale;
            let noise_z = gz as f32 * config.scale_z * config.noise.base_scale;
            let h = fractal_noise(noise_x, noise_z, &config.noise);
            vertices.push(Vec3::new(
                x as f32 * config.scale_x,
                h * config.height_multiplier,
                z as f32 * config.scale_z,
            ));
        }
    }
    vertices
}

fn make_triangles(config: &GridConfig) -> Vec<u32> {
    let mut triangles = Vec::with_capacity(config.index_count());
    let stride = config.size_x + 1;
    let mut v = 0u32;
    for _z in 0..config.size_z {
        for _x in 0..config.size_x {
            triangles.extend_from_slice(&[
                v,
                v + stride,
                v + 1,
                v + 1,
                v + stride,
                v + stride + 1,
            ]);
            v += 1;
        }
        // Skip the last vertex of the row; it starts no cell.
        v += 1;
    }
    triangles
}

fn make_colors(vertices: &[Vec3], config: &GridConfig) -> Vec<Rgba> {
    let sand_to_grass = Gradient::band(SAND, GRASS);
    let grass_to_rock = Gradient::band(GRASS, ROCK);

    vertices
        .iter()
        .map(|vertex| {
            let h01 = vertex.y / config.height_multiplier;
            if h01 < ROCK_BAND_START {
                sand_to_grass.sample((h01 - GRASS_BAND_START) * BAND_SHARPNESS)
            } else {
                grass_to_rock.sample((h01 - ROCK_BAND_START) * BAND_SHARPNESS)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_sizing() {
        let config = GridConfig::default();
        let mesh = build_chunk_mesh(ChunkCoord::new(0, 0), &config);
        assert_eq!(mesh.vertices.len(), 4225);
        assert_eq!(mesh.colors.len(), 4225);
        assert_eq!(mesh.triangles.len(), 24576);
        assert!(mesh.triangles.iter().all(|&i| i < 4225));
    }

    #[test]
    fn test_mesh_deterministic() {
        let config = GridConfig::default();
        let coord = ChunkCoord::new(-7, 13);
        let a = build_chunk_mesh(coord, &config);
        let b = build_chunk_mesh(coord, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_cell_triangle_pattern() {
        let config = GridConfig::default();
        let mesh = build_chunk_mesh(ChunkCoord::new(0, 0), &config);
        let stride = config.size_x + 1;
        assert_eq!(
            &mesh.triangles[..6],
            &[0, stride, 1, 1, stride, stride + 1]
        );
    }

    #[test]
    fn test_border_continuity_x() {
        let config = GridConfig::default();
        let left = build_chunk_mesh(ChunkCoord::new(0, 0), &config);
        let right = build_chunk_mesh(ChunkCoord::new(1, 0), &config);
        for z in 0..=config.size_z {
            let a = left.vertices[ChunkMesh::vertex_index(&config, config.size_x, z)].y;
            let b = right.vertices[ChunkMesh::vertex_index(&config, 0, z)].y;
            assert_eq!(a, b, "height mismatch at shared edge, z = {}", z);
        }
    }

    #[test]
    fn test_border_continuity_z() {
        let config = GridConfig::default();
        let near = build_chunk_mesh(ChunkCoord::new(-3, -1), &config);
        let far = build_chunk_mesh(ChunkCoord::new(-3, 0), &config);
        for x in 0..=config.size_x {
            let a = near.vertices[ChunkMesh::vertex_index(&config, x, config.size_z)].y;
            let b = far.vertices[ChunkMesh::vertex_index(&config, x, 0)].y;
            assert_eq!(a, b, "height mismatch at shared edge, x = {}", x);
        }
    }

    #[test]
    fn test_winding_faces_up() {
        // A heightfield triangle wound counter-clockwise seen from above
        // has a positive-y normal regardless of the vertex heights.
        let config = GridConfig::default();
        let mesh = build_chunk_mesh(ChunkCoord::new(2, -5), &config);
        for tri in mesh.triangles.chunks_exact(3) {
            let p0 = mesh.vertices[tri[0] as usize];
            let p1 = mesh.vertices[tri[1] as usize];
            let p2 = mesh.vertices[tri[2] as usize];
            let normal = (p1 - p0).cross(p2 - p0);
            assert!(normal.y > 0.0, "downward-facing triangle {:?}", tri);
        }
    }

    #[test]
    fn test_vertex_positions_local_to_chunk() {
        let config = GridConfig::default();
        let mesh = build_chunk_mesh(ChunkCoord::new(5, 7), &config);
        let first = mesh.vertices[0];
        assert_eq!(first.x, 0.0);
        assert_eq!(first.z, 0.0);
        let last = mesh.vertices[mesh.vertices.len() - 1];
        assert_eq!(last.x, config.chunk_span_x());
        assert_eq!(last.z, config.chunk_span_z());
    }

    #[test]
    fn test_heights_within_multiplier() {
        let config = GridConfig::default();
        let mesh = build_chunk_mesh(ChunkCoord::new(0, 0), &config);
        for v in &mesh.vertices {
            assert!(v.y >= 0.0 && v.y <= config.height_multiplier);
        }
    }

    #[test]
    fn test_low_vertices_tinted_sand() {
        // Below the sand->grass span the gradient clamps to pure sand.
        let config = GridConfig::default();
        let mesh = build_chunk_mesh(ChunkCoord::new(0, 0), &config);
        for (v, c) in mesh.vertices.iter().zip(&mesh.colors) {
            let h01 = v.y / config.height_multiplier;
            if h01 < GRASS_BAND_START {
                assert_eq!(c.rgb(), SAND.rgb());
            }
        }
    }
}
