mod fractal;
mod heightmap;
mod mesh;

pub use fractal::{NoiseGenerator, NoiseParameters, NoiseSource};
pub use heightmap::HeightmapGenerator;
pub use mesh::{
    build_mesh,
    triangulate,
    TerrainMeshBuilder,
};

#[cfg(test)]
mod tests;
