use log::{trace, warn};
use noise::Perlin;
use rayon::prelude::*;

use crate::coords::{vertex_count, GridOrigin};
use crate::error::{Result, TerrainError};
use crate::generator::{NoiseGenerator, NoiseSource};
use crate::heightmap::{HeightField, HeightNormalization, HeightRange};

/// Samples fractal noise over a grid of corner points.
#[derive(Clone, Debug)]
pub struct HeightmapGenerator<S = Perlin> {
    noise: NoiseGenerator<S>,
    normalization: HeightNormalization,
}

impl<S: NoiseSource> HeightmapGenerator<S> {
    pub fn new(noise: NoiseGenerator<S>) -> Self {
        Self {
            noise,
            normalization: HeightNormalization::default(),
        }
    }

    pub fn with_normalization(mut self, normalization: HeightNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn noise(&self) -> &NoiseGenerator<S> {
        &self.noise
    }

    pub fn normalization(&self) -> HeightNormalization {
        self.normalization
    }

    /// Samples `(width + 1) * (depth + 1)` heights, `z` outer and `x` inner.
    pub fn generate(
        &self,
        origin: GridOrigin,
        width: usize,
        depth: usize,
        height_scale: f32,
    ) -> Result<HeightField> {
        let count = self.validate(origin, width, depth, height_scale)?;

        let mut heights = Vec::with_capacity(count);
        let mut range: Option<HeightRange> = None;

        for z in 0..=depth {
            for x in 0..=width {
                let height = self.sample_height(origin, x, z, height_scale);
                range = Some(match range {
                    Some(r) => r.including(height),
                    None => HeightRange::point(height),
                });
                heights.push(height);
            }
        }

        // the grid always has at least 2x2 points, so a range was recorded
        let range = range.unwrap_or(HeightRange::point(0.0));
        Ok(HeightField::new(width, depth, heights, range))
    }

    /// Same result as [`generate`](Self::generate), with rows sampled on the rayon pool.
    /// Each row keeps its own extremes; they are merged once every row has finished.
    pub fn generate_parallel(
        &self,
        origin: GridOrigin,
        width: usize,
        depth: usize,
        height_scale: f32,
    ) -> Result<HeightField> {
        let count = self.validate(origin, width, depth, height_scale)?;
        trace!("sampling {} rows of {} points in parallel", depth + 1, width + 1);

        let rows: Vec<(Vec<f32>, HeightRange)> = (0..=depth)
            .into_par_iter()
            .map(|z| {
                let row: Vec<f32> = (0..=width)
                    .map(|x| self.sample_height(origin, x, z, height_scale))
                    .collect();
                let range = row
                    .iter()
                    .skip(1)
                    .fold(HeightRange::point(row[0]), |r, &h| r.including(h));
                (row, range)
            })
            .collect();

        let range = rows
            .iter()
            .map(|(_, r)| *r)
            .reduce(HeightRange::merge)
            .unwrap_or(HeightRange::point(0.0));

        let mut heights = Vec::with_capacity(count);
        for (row, _) in rows {
            heights.extend(row);
        }

        Ok(HeightField::new(width, depth, heights, range))
    }

    fn sample_height(&self, origin: GridOrigin, x: usize, z: usize, height_scale: f32) -> f32 {
        let (world_x, world_z) = origin.to_world_pos(x, z);
        height_scale * self.noise.fractal_noise(world_x, world_z) as f32
    }

    /// Rejects bad input before anything is allocated; returns the vertex count.
    fn validate(
        &self,
        origin: GridOrigin,
        width: usize,
        depth: usize,
        height_scale: f32,
    ) -> Result<usize> {
        if width == 0 {
            return Err(TerrainError::invalid("width", "must be at least 1 quad"));
        }
        if depth == 0 {
            return Err(TerrainError::invalid("depth", "must be at least 1 quad"));
        }
        if !height_scale.is_finite() {
            return Err(TerrainError::invalid(
                "height_scale",
                format!("must be finite, got {height_scale}"),
            ));
        }
        if !origin.is_finite() {
            return Err(TerrainError::invalid(
                "origin",
                format!("must be finite, got ({}, {})", origin.x, origin.z),
            ));
        }
        self.normalization.validate()?;

        let params = self.noise.params();
        if !params.is_well_behaved() {
            warn!(
                "noise parameters outside the expected range (gain {}, lacunarity {}); terrain may diverge",
                params.gain(),
                params.lacunarity()
            );
        }

        vertex_count(width, depth).ok_or(TerrainError::GridTooLarge { width, depth })
    }
}
