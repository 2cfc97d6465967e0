// src/lib.rs

//! Procedural terrain tiles: fractal noise height fields, triangulated into an
//! indexed grid mesh with UVs and height-graded vertex colors.
//!
//! Rendering, normals, materials and colliders are left to the host; it receives a
//! [`TerrainMesh`] and does what its engine needs with the buffers.

pub mod coords;
pub mod color;
pub mod config;
pub mod error;
pub mod heightmap;
pub mod mesh;
pub mod generator;
pub mod prelude;

pub use color::{ColorGradient, Rgba};
pub use config::TerrainConfig;
pub use error::{Result, TerrainError};
pub use heightmap::{HeightField, HeightNormalization, HeightRange};
pub use mesh::TerrainMesh;
