// src/coords.rs

use serde::{Deserialize, Serialize};

/// Placement of a tile on the XZ plane.
///
/// Only offsets where the noise is sampled; generated vertices stay in grid-local
/// space and the host positions the mesh itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridOrigin {
    pub x: f32,
    pub z: f32,
}

impl GridOrigin {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn to_world_pos(&self, local_x: usize, local_z: usize) -> (f64, f64) {
        (
            self.x as f64 + local_x as f64,
            self.z as f64 + local_z as f64,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

/// Row-major index of grid point `(x, z)` in a grid `width` quads wide.
#[inline]
pub fn vertex_index(width: usize, x: usize, z: usize) -> usize {
    z * (width + 1) + x
}

/// Number of grid points for a `width` x `depth` quad grid, if it fits in a `u32` index.
pub fn vertex_count(width: usize, depth: usize) -> Option<usize> {
    let count = width.checked_add(1)?.checked_mul(depth.checked_add(1)?)?;
    (count <= u32::MAX as usize).then_some(count)
}
