// src/mesh.rs

use nalgebra::{Point3, Vector2};

use crate::color::Rgba;
use crate::error::{Result, TerrainError};
use crate::heightmap::HeightRange;

/// Indexed triangle grid produced for one terrain tile.
///
/// `vertices`, `uvs` and `colors` are parallel arrays in row-major grid order
/// (`z` outer, `x` inner). `indices` holds three entries per triangle, two
/// triangles per quad. Normals are left to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    pub width: usize,
    pub depth: usize,
    pub vertices: Vec<Point3<f32>>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Vector2<f32>>,
    pub colors: Vec<Rgba>,
    /// Range the vertex colors were normalized against.
    pub height_range: HeightRange,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Interleaved `x, y, z` position buffer.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }

    pub fn colors_rgba8(&self) -> Vec<[u8; 4]> {
        self.colors.iter().map(Rgba::to_rgba8).collect()
    }

    pub fn check_invariants(&self) -> Result<()> {
        let expected_vertices = (self.width + 1) * (self.depth + 1);
        if self.vertices.len() != expected_vertices {
            return Err(TerrainError::MeshInvariant(format!(
                "expected {} vertices, found {}",
                expected_vertices,
                self.vertices.len()
            )));
        }
        if self.uvs.len() != expected_vertices || self.colors.len() != expected_vertices {
            return Err(TerrainError::MeshInvariant(format!(
                "attribute length mismatch: {} vertices, {} uvs, {} colors",
                self.vertices.len(),
                self.uvs.len(),
                self.colors.len()
            )));
        }

        let expected_indices = self.width * self.depth * 6;
        if self.indices.len() != expected_indices {
            return Err(TerrainError::MeshInvariant(format!(
                "expected {} indices, found {}",
                expected_indices,
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= self.vertices.len()) {
            return Err(TerrainError::MeshInvariant(format!(
                "index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }
}
