use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Deterministic base 2D noise with output in [0, 1].
pub trait NoiseSource: Send + Sync {
    fn sample01(&self, x: f64, z: f64) -> f64;
}

/// Perlin's permutation table hashes lattice corners with `& 0xff`, so the noise
/// repeats every 256 units along each axis.
const PERLIN_PERIOD: f64 = 256.0;

impl NoiseSource for Perlin {
    fn sample01(&self, x: f64, z: f64) -> f64 {
        if !x.is_finite() || !z.is_finite() {
            return 0.5;
        }
        // keep lattice coordinates small enough to floor into an isize
        let x = x.rem_euclid(PERLIN_PERIOD);
        let z = z.rem_euclid(PERLIN_PERIOD);

        // Perlin is roughly [-1, 1]; remap and pin to the unit interval
        (self.get([x, z]) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn sample01(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// Fractal noise settings.
///
/// `gain` is expected in [0, 1] so each octave contributes less than the one before,
/// and `lacunarity` above 1 so octave frequencies spread apart. Values outside those
/// ranges are accepted but give divergent or degenerate terrain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    octaves: u32,
    lacunarity: f64,
    gain: f64,
    scale: f64,
}

impl NoiseParameters {
    pub fn new(octaves: u32, lacunarity: f64, gain: f64, scale: f64) -> Self {
        Self { octaves, lacunarity, gain, scale }
    }

    /// Number of summed noise layers.
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Per-octave frequency multiplier.
    pub fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    /// Per-octave amplitude multiplier.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Input coordinate scale applied before every lookup.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether `gain` and `lacunarity` sit in their expected ranges.
    pub fn is_well_behaved(&self) -> bool {
        (0.0..=1.0).contains(&self.gain) && self.lacunarity > 0.0
    }
}

/// Sums octaves of a [`NoiseSource`]. Pure, so one instance can be shared across
/// threads.
#[derive(Clone, Debug)]
pub struct NoiseGenerator<S = Perlin> {
    source: S,
    params: NoiseParameters,
}

impl NoiseGenerator<Perlin> {
    pub fn new(seed: u32, params: NoiseParameters) -> Self {
        Self::with_source(Perlin::new(seed), params)
    }
}

impl<S: NoiseSource> NoiseGenerator<S> {
    pub fn with_source(source: S, params: NoiseParameters) -> Self {
        Self { source, params }
    }

    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    /// Base noise remapped to [-1, 1].
    pub fn signed_noise(&self, x: f64, z: f64) -> f64 {
        2.0 * self.source.sample01(x, z) - 1.0
    }

    pub fn fractal_noise(&self, x: f64, z: f64) -> f64 {
        let mut result = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..self.params.octaves {
            let sample_x = x * frequency * self.params.scale;
            let sample_z = z * frequency * self.params.scale;

            result += amplitude * self.signed_noise(sample_x, sample_z);

            frequency *= self.params.lacunarity;
            amplitude *= self.params.gain;
        }

        result
    }
}
