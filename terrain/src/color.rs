// src/color.rs

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Linear RGBA color with components nominally in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }
}

impl From<colorgrad::Color> for Rgba {
    fn from(c: colorgrad::Color) -> Self {
        Self::new(c.r as f32, c.g as f32, c.b as f32, c.a as f32)
    }
}

/// Host-supplied mapping from normalized height to vertex color.
pub trait ColorGradient {
    /// `t` is in [0, 1].
    fn evaluate(&self, t: f32) -> Rgba;
}

impl ColorGradient for colorgrad::Gradient {
    fn evaluate(&self, t: f32) -> Rgba {
        self.at(t as f64).into()
    }
}

impl<F> ColorGradient for F
where
    F: Fn(f32) -> Rgba,
{
    fn evaluate(&self, t: f32) -> Rgba {
        self(t)
    }
}

/// Water to snow palette keyed on normalized height.
pub fn terrain_gradient() -> Result<colorgrad::Gradient> {
    colorgrad::CustomGradient::new()
        .colors(&[
            colorgrad::Color::new(0.0, 0.0, 0.5, 1.0),   // Deep water
            colorgrad::Color::new(0.0, 0.0, 1.0, 1.0),   // Shallow water
            colorgrad::Color::new(0.9, 0.9, 0.2, 1.0),   // Beach
            colorgrad::Color::new(0.0, 0.6, 0.0, 1.0),   // Grass
            colorgrad::Color::new(0.5, 0.3, 0.0, 1.0),   // Mountain
            colorgrad::Color::new(1.0, 1.0, 1.0, 1.0),   // Snow
        ])
        .domain(&[0.0, 0.3, 0.35, 0.4, 0.8, 1.0])
        .build()
        .map_err(|e| TerrainError::Gradient(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_terrain_gradient_endpoints() {
        let gradient = terrain_gradient().unwrap();

        let low = gradient.evaluate(0.0);
        assert_relative_eq!(low.b, 0.5, epsilon = 1e-6);
        assert_relative_eq!(low.r, 0.0, epsilon = 1e-6);

        let high = gradient.evaluate(1.0);
        assert_eq!(high.to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_closure_gradient() {
        let grey = |t: f32| Rgba::new(t, t, t, 1.0);
        assert_eq!(grey.evaluate(0.25), Rgba::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn test_to_rgba8_clamps() {
        let c = Rgba::new(-0.5, 0.5, 2.0, 1.0);
        assert_eq!(c.to_rgba8(), [0, 128, 255, 255]);
    }
}
