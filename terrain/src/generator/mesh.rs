use log::debug;
use nalgebra::{Point3, Vector2};
use noise::Perlin;

use crate::color::ColorGradient;
use crate::config::TerrainConfig;
use crate::coords::GridOrigin;
use crate::error::Result;
use crate::generator::{HeightmapGenerator, NoiseGenerator, NoiseParameters, NoiseSource};
use crate::heightmap::{HeightField, HeightNormalization};
use crate::mesh::TerrainMesh;

/// Builds a colored triangle grid over a fractal noise height field.
#[derive(Clone, Debug)]
pub struct TerrainMeshBuilder<S = Perlin> {
    heightmap: HeightmapGenerator<S>,
}

impl<S: NoiseSource> TerrainMeshBuilder<S> {
    pub fn new(noise: NoiseGenerator<S>) -> Self {
        Self {
            heightmap: HeightmapGenerator::new(noise),
        }
    }

    pub fn with_normalization(mut self, normalization: HeightNormalization) -> Self {
        self.heightmap = self.heightmap.with_normalization(normalization);
        self
    }

    pub fn heightmap(&self) -> &HeightmapGenerator<S> {
        &self.heightmap
    }

    pub fn build<G>(
        &self,
        origin: GridOrigin,
        width: usize,
        depth: usize,
        height_scale: f32,
        gradient: &G,
    ) -> Result<TerrainMesh>
    where
        G: ColorGradient + ?Sized,
    {
        let field = self.heightmap.generate(origin, width, depth, height_scale)?;
        Ok(self.assemble(field, gradient))
    }

    /// Like [`build`](Self::build) but samples heights across the rayon pool.
    /// Coloring starts only after every row is in.
    pub fn build_parallel<G>(
        &self,
        origin: GridOrigin,
        width: usize,
        depth: usize,
        height_scale: f32,
        gradient: &G,
    ) -> Result<TerrainMesh>
    where
        G: ColorGradient + ?Sized,
    {
        let field = self
            .heightmap
            .generate_parallel(origin, width, depth, height_scale)?;
        Ok(self.assemble(field, gradient))
    }

    fn assemble<G>(&self, field: HeightField, gradient: &G) -> TerrainMesh
    where
        G: ColorGradient + ?Sized,
    {
        let (width, depth) = (field.width(), field.depth());

        let vertices: Vec<Point3<f32>> = field
            .iter()
            .map(|(x, z, h)| Point3::new(x as f32, h, z as f32))
            .collect();

        let uvs: Vec<Vector2<f32>> = field
            .iter()
            .map(|(x, z, _)| Vector2::new(x as f32 / width as f32, z as f32 / depth as f32))
            .collect();

        let height_range = self.heightmap.normalization().resolve(field.range());
        let colors = vertices
            .iter()
            .map(|v| gradient.evaluate(height_range.inverse_lerp(v.y)))
            .collect();

        debug!(
            "built {}x{} terrain mesh: {} vertices, heights {:.3}..{:.3}, colored over {:.3}..{:.3}",
            width,
            depth,
            vertices.len(),
            field.range().min,
            field.range().max,
            height_range.min,
            height_range.max
        );

        TerrainMesh {
            width,
            depth,
            vertices,
            indices: triangulate(width, depth),
            uvs,
            colors,
            height_range,
        }
    }
}

impl TerrainMeshBuilder<Perlin> {
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(config.noise_generator()).with_normalization(config.normalization)
    }

    pub fn build_from_config<G>(config: &TerrainConfig, gradient: &G) -> Result<TerrainMesh>
    where
        G: ColorGradient + ?Sized,
    {
        Self::from_config(config).build(
            config.origin,
            config.width,
            config.depth,
            config.height_scale,
            gradient,
        )
    }
}

/// Two triangles per quad, always split along the same diagonal.
///
/// With the lower-left corner of a cell at `vert`, emits `(vert, vert+w+1, vert+1)`
/// and `(vert+1, vert+w+1, vert+w+2)`. Both wind counter-clockwise seen from +Y, so
/// normals derived from the winding point up.
pub fn triangulate(width: usize, depth: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(width * depth * 6);
    let row = width as u32 + 1;

    let mut vert = 0u32;
    for _ in 0..depth {
        for _ in 0..width {
            indices.extend([
                vert,
                vert + row,
                vert + 1,
                vert + 1,
                vert + row,
                vert + row + 1,
            ]);
            vert += 1;
        }
        // skip the last point of the row, it starts no cell
        vert += 1;
    }

    indices
}

/// One-shot build with a default-seeded Perlin source.
pub fn build_mesh<G>(
    origin: GridOrigin,
    width: usize,
    depth: usize,
    params: NoiseParameters,
    height_scale: f32,
    gradient: &G,
) -> Result<TerrainMesh>
where
    G: ColorGradient + ?Sized,
{
    TerrainMeshBuilder::new(NoiseGenerator::new(0, params)).build(
        origin,
        width,
        depth,
        height_scale,
        gradient,
    )
}
