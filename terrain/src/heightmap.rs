// src/heightmap.rs

use serde::{Deserialize, Serialize};

use crate::coords::vertex_index;
use crate::error::{Result, TerrainError};

/// Smallest and largest height seen over a field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl HeightRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range covering a single height.
    pub fn point(height: f32) -> Self {
        Self { min: height, max: height }
    }

    pub fn including(self, height: f32) -> Self {
        Self {
            min: self.min.min(height),
            max: self.max.max(height),
        }
    }

    /// Associative union of two ranges; the join step of a parallel scan.
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }

    /// Maps `value` onto [0, 1] across the range, clamped at both ends.
    /// A flat range maps everything to 0.
    pub fn inverse_lerp(&self, value: f32) -> f32 {
        if self.is_flat() {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Which range the color pass normalizes heights against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum HeightNormalization {
    /// The observed extremes of the field.
    #[default]
    FirstSample,
    /// The observed extremes widened to include 0, so an all-positive field never
    /// reaches t = 0 and an all-negative one never reaches t = 1.
    ZeroSeeded,
    /// A caller-chosen range independent of what was sampled.
    Fixed { min: f32, max: f32 },
}

impl HeightNormalization {
    pub fn validate(&self) -> Result<()> {
        if let HeightNormalization::Fixed { min, max } = *self {
            if !min.is_finite() || !max.is_finite() {
                return Err(TerrainError::invalid(
                    "normalization",
                    format!("fixed range bounds must be finite, got {min}..{max}"),
                ));
            }
            if min > max {
                return Err(TerrainError::invalid(
                    "normalization",
                    format!("fixed range is inverted: {min} > {max}"),
                ));
            }
        }
        Ok(())
    }

    pub fn resolve(&self, observed: HeightRange) -> HeightRange {
        match *self {
            HeightNormalization::FirstSample => observed,
            HeightNormalization::ZeroSeeded => observed.merge(HeightRange::point(0.0)),
            HeightNormalization::Fixed { min, max } => HeightRange::new(min, max),
        }
    }
}

/// Row-major grid of `(width + 1) * (depth + 1)` heights.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    depth: usize,
    heights: Vec<f32>,
    range: HeightRange,
}

impl HeightField {
    pub(crate) fn new(width: usize, depth: usize, heights: Vec<f32>, range: HeightRange) -> Self {
        debug_assert_eq!(heights.len(), (width + 1) * (depth + 1));
        Self { width, depth, heights, range }
    }

    /// Quads along X.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Quads along Z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Observed extremes of the sampled heights.
    pub fn range(&self) -> HeightRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn index(&self, x: usize, z: usize) -> usize {
        vertex_index(self.width, x, z)
    }

    pub fn get(&self, x: usize, z: usize) -> Option<f32> {
        if x > self.width || z > self.depth {
            return None;
        }
        self.heights.get(self.index(x, z)).copied()
    }

    /// Iterates `(x, z, height)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let row = self.width + 1;
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| (i % row, i / row, h))
    }
}
