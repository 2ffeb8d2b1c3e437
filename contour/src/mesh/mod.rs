//! Terrain mesh: a subdivided square plane displaced along Z by a heightmap.
//!
//! The plane lies in XY centred on the origin with +Y as north, so row 0 of
//! the lattice is the northern edge and matches row 0 of the heightmap.
//! Vertices are row-major, `(segments + 1)²` of them.
//!
//! ```text
//!   a ── d      a = (ix,     iy)
//!   │  ╱ │      b = (ix,     iy + 1)
//!   │ ╱  │      c = (ix + 1, iy + 1)
//!   b ── c      d = (ix + 1, iy)
//! ```
//!
//! Each cell emits triangles `(a, b, d)` and `(b, c, d)`, both facing +Z.

mod displace;

pub use displace::{displace, recompute_normals};

use thiserror::Error;

/// Errors from mesh displacement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Scale was negative, NaN or infinite
    #[error("invalid displacement scale {0}: must be a finite number >= 0")]
    InvalidScale(f32),

    /// Vertex count is not `w²` for some `w >= 2`
    #[error("mesh with {vertices} vertices is not a square grid")]
    NotSquareGrid { vertices: usize },
}

/// Vertex and index buffers of a square grid mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGrid {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshGrid {
    /// Builds a flat `size` × `size` plane with `segments` subdivisions per
    /// side. A segment count of 0 is treated as 1.
    pub fn plane(size: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let side = segments + 1;
        let vertex_count = side as usize * side as usize;
        let index_count = segments as usize * segments as usize * 6;
        let step = size / segments as f32;
        let half = size / 2.0;

        let mut mesh = Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        };

        for iy in 0..side {
            let v = iy as f32 / segments as f32;
            for ix in 0..side {
                let u = ix as f32 / segments as f32;
                mesh.positions
                    .push([ix as f32 * step - half, half - iy as f32 * step, 0.0]);
                mesh.normals.push([0.0, 0.0, 1.0]);
                mesh.uvs.push([u, 1.0 - v]);
            }
        }

        for iy in 0..segments {
            for ix in 0..segments {
                let a = ix + side * iy;
                let b = ix + side * (iy + 1);
                let c = (ix + 1) + side * (iy + 1);
                let d = (ix + 1) + side * iy;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertices per side, if the vertex count is a perfect square of at
    /// least 2×2.
    pub fn grid_width(&self) -> Option<usize> {
        let n = self.positions.len();
        let w = (n as f64).sqrt().round() as usize;
        (w >= 2 && w * w == n).then_some(w)
    }

    /// Lowest and highest Z over all vertices.
    pub fn z_range(&self) -> Option<(f32, f32)> {
        self.positions.iter().map(|p| p[2]).fold(None, |acc, z| match acc {
            Some((lo, hi)) => Some((f32::min(lo, z), f32::max(hi, z))),
            None => Some((z, z)),
        })
    }
}
