//! Heightmap displacement with normal recomputation.

use super::{MeshError, MeshGrid};
use crate::heightmap::Heightmap;
use tracing::debug;

/// Sets every vertex Z from `heightmap`, then recomputes normals.
///
/// Vertex `i` of a `w × w` grid reads pixel
/// `(floor(u · (imgW − 1)), floor(v · (imgH − 1)))` with `u = (i % w) / (w − 1)`
/// and `v = (i / w) / (w − 1)`, and gets `z = gray / 255 · scale`. Without a
/// heightmap every Z is 0. Previous Z values are always overwritten, so the
/// call can be repeated with a different scale.
pub fn displace(
    mesh: &mut MeshGrid,
    heightmap: Option<&Heightmap>,
    scale: f32,
) -> Result<(), MeshError> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(MeshError::InvalidScale(scale));
    }
    let width = mesh.grid_width().ok_or(MeshError::NotSquareGrid {
        vertices: mesh.vertex_count(),
    })?;

    match heightmap {
        Some(heightmap) => {
            let last = (width - 1) as u64;
            let max_px = heightmap.width().saturating_sub(1) as u64;
            let max_py = heightmap.height().saturating_sub(1) as u64;

            for (i, position) in mesh.positions.iter_mut().enumerate() {
                let gx = (i % width) as u64;
                let gy = (i / width) as u64;
                // floor(u * max) computed exactly in integers
                let px = (gx * max_px / last) as u32;
                let py = (gy * max_py / last) as u32;
                let height = heightmap.value_at(px, py) as f32 / 255.0;
                position[2] = height * scale;
            }
        }
        None => {
            for position in mesh.positions.iter_mut() {
                position[2] = 0.0;
            }
        }
    }

    recompute_normals(mesh);

    debug!(
        vertices = mesh.vertex_count(),
        scale,
        has_heightmap = heightmap.is_some(),
        "Mesh displaced"
    );

    Ok(())
}

/// Recomputes vertex normals by accumulating area-weighted face normals.
///
/// Vertices with no non-degenerate incident face get `[0, 0, 1]`.
pub fn recompute_normals(mesh: &mut MeshGrid) {
    mesh.normals.clear();
    mesh.normals.resize(mesh.positions.len(), [0.0, 0.0, 0.0]);

    for tri in mesh.indices.chunks_exact(3) {
        let (Some(&a), Some(&b), Some(&c)) = (
            mesh.positions.get(tri[0] as usize),
            mesh.positions.get(tri[1] as usize),
            mesh.positions.get(tri[2] as usize),
        ) else {
            continue;
        };

        let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        // Unnormalized cross product; its length is twice the face area
        let face = [
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ];

        for &vid in tri {
            let n = &mut mesh.normals[vid as usize];
            n[0] += face[0];
            n[1] += face[1];
            n[2] += face[2];
        }
    }

    for n in mesh.normals.iter_mut() {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        *n = if len > 0.0 && len.is_finite() {
            [n[0] / len, n[1] / len, n[2] / len]
        } else {
            [0.0, 0.0, 1.0]
        };
    }
}
