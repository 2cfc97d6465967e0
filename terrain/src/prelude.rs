// src/prelude.rs
//! A convenient prelude re-exporting common terrain types.

pub use crate::color::{terrain_gradient, ColorGradient, Rgba};
pub use crate::config::TerrainConfig;
pub use crate::coords::GridOrigin;
pub use crate::error::{Result, TerrainError};
pub use crate::generator::{
    build_mesh, HeightmapGenerator, NoiseGenerator, NoiseParameters, NoiseSource,
    TerrainMeshBuilder,
};
pub use crate::heightmap::{HeightField, HeightNormalization, HeightRange};
pub use crate::mesh::TerrainMesh;
