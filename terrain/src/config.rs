// src/config.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coords::GridOrigin;
use crate::error::{Result, TerrainError};
use crate::generator::{NoiseGenerator, NoiseParameters};
use crate::heightmap::HeightNormalization;

/// Everything needed to generate one tile.
///
/// Fields missing from a config file fall back to [`TerrainConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub origin: GridOrigin,
    /// Quads along X.
    pub width: usize,
    /// Quads along Z.
    pub depth: usize,
    /// Multiplier applied to the fractal noise to get vertex heights.
    pub height_scale: f32,
    pub seed: u32,
    pub noise: NoiseParameters,
    pub normalization: HeightNormalization,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            origin: GridOrigin::default(),
            width: 21,
            depth: 21,
            height_scale: 4.3,
            seed: 0,
            // gain in [0, 1] so each octave contributes less than the last
            noise: NoiseParameters::new(5, 1.0, 0.391, 0.15),
            normalization: HeightNormalization::FirstSample,
        }
    }
}

impl TerrainConfig {
    pub fn from_ron_str(src: &str) -> Result<Self> {
        ron::from_str(src).map_err(|e| TerrainError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .map_err(|e| TerrainError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&src)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| TerrainError::Config(e.to_string()))
    }

    pub fn noise_generator(&self) -> NoiseGenerator {
        NoiseGenerator::new(self.seed, self.noise)
    }
}
