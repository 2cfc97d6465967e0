use crate::generator::{NoiseGenerator, NoiseParameters};
use approx::assert_relative_eq;
use test_case::test_case;

fn default_params() -> NoiseParameters {
    NoiseParameters::new(5, 1.0, 0.391, 0.15)
}

#[test]
fn test_signed_noise_range() {
    let generator = NoiseGenerator::new(42, default_params());

    for z in -40..40 {
        for x in -40..40 {
            let v = generator.signed_noise(x as f64 * 0.173, z as f64 * 0.291);
            assert!((-1.0..=1.0).contains(&v), "signed noise {} out of range at ({}, {})", v, x, z);
        }
    }
}

#[test]
fn test_signed_noise_remaps_unit_interval() {
    let low = NoiseGenerator::with_source(|_: f64, _: f64| 0.0, default_params());
    let mid = NoiseGenerator::with_source(|_: f64, _: f64| 0.5, default_params());
    let high = NoiseGenerator::with_source(|_: f64, _: f64| 1.0, default_params());

    assert_eq!(low.signed_noise(3.0, 4.0), -1.0);
    assert_eq!(mid.signed_noise(3.0, 4.0), 0.0);
    assert_eq!(high.signed_noise(3.0, 4.0), 1.0);
}

#[test_case(0.0, 0.0)]
#[test_case(1.5, -2.25)]
#[test_case(17.0, 3.0)]
#[test_case(-101.3, 55.7)]
fn test_single_octave_is_scaled_signed_noise(x: f64, z: f64) {
    let params = NoiseParameters::new(1, 2.0, 0.5, 0.15);
    let generator = NoiseGenerator::new(7, params);

    assert_eq!(
        generator.fractal_noise(x, z),
        generator.signed_noise(x * params.scale(), z * params.scale())
    );
}

#[test_case(0.0, 0.0)]
#[test_case(4.2, 9.9)]
#[test_case(-13.0, 2.5)]
fn test_zero_octaves_is_zero(x: f64, z: f64) {
    let generator = NoiseGenerator::new(42, NoiseParameters::new(0, 2.0, 0.5, 0.15));
    assert_eq!(generator.fractal_noise(x, z), 0.0);
}

#[test]
fn test_octaves_sum_with_gain() {
    // a constant source makes every octave contribute `amplitude * 1.0`
    let params = NoiseParameters::new(3, 2.0, 0.5, 0.15);
    let generator = NoiseGenerator::with_source(|_: f64, _: f64| 1.0, params);

    assert_relative_eq!(generator.fractal_noise(10.0, 20.0), 1.0 + 0.5 + 0.25, epsilon = 1e-12);
}

#[test]
fn test_octave_frequencies_grow_by_lacunarity() {
    use std::sync::Mutex;

    let seen = Mutex::new(Vec::new());
    let params = NoiseParameters::new(3, 2.0, 0.5, 0.5);
    let generator = NoiseGenerator::with_source(
        |x: f64, z: f64| {
            seen.lock().unwrap().push((x, z));
            0.5
        },
        params,
    );

    generator.fractal_noise(3.0, 5.0);

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen, vec![(1.5, 2.5), (3.0, 5.0), (6.0, 10.0)]);
}

#[test]
fn test_fractal_noise_determinism() {
    let generator1 = NoiseGenerator::new(42, default_params());
    let generator2 = NoiseGenerator::new(42, default_params());

    for i in 0..100 {
        let (x, z) = (i as f64 * 0.37, i as f64 * -1.13);
        assert_eq!(generator1.fractal_noise(x, z), generator2.fractal_noise(x, z));
        assert_eq!(generator1.fractal_noise(x, z), generator1.fractal_noise(x, z));
    }
}

#[test_case(0.391, 1.0, true)]
#[test_case(1.5, 2.0, false)]
#[test_case(-0.1, 2.0, false)]
#[test_case(0.5, 0.0, false)]
fn test_well_behaved_parameters(gain: f64, lacunarity: f64, expected: bool) {
    let params = NoiseParameters::new(4, lacunarity, gain, 0.1);
    assert_eq!(params.is_well_behaved(), expected);
}

#[test_case(1.0e30, 3.5)]
#[test_case(-9.3e18, 0.25)]
#[test_case(2.5, f64::MAX)]
#[test_case(-f64::MAX, -f64::MAX)]
fn test_huge_coordinates_stay_in_range(x: f64, z: f64) {
    let generator = NoiseGenerator::new(0, NoiseParameters::new(1, 2.0, 0.5, 1.0));

    let v = generator.fractal_noise(x, z);
    assert!((-1.0..=1.0).contains(&v), "fractal noise {} out of range at ({}, {})", v, x, z);
}

#[test]
fn test_huge_lacunarity_stays_finite() {
    let generator = NoiseGenerator::new(0, NoiseParameters::new(8, 1.0e60, 0.5, 0.15));

    for &(x, z) in &[(3.3, 4.1), (0.0, 0.0), (-7.9, 12.6)] {
        let v = generator.fractal_noise(x, z);
        assert!(v.is_finite(), "fractal noise {} not finite at ({}, {})", v, x, z);
        assert!(v.abs() <= 2.0, "fractal noise {} exceeds the summed amplitudes", v);
    }
}

#[test]
fn test_perlin_repeats_every_256_units() {
    let generator = NoiseGenerator::new(42, NoiseParameters::new(1, 2.0, 0.5, 1.0));

    for i in 0..20 {
        let (x, z) = (i as f64 * 1.37 + 0.1, i as f64 * -0.83 + 0.4);
        assert_relative_eq!(
            generator.signed_noise(x, z),
            generator.signed_noise(x + 256.0, z - 512.0),
            epsilon = 1e-9
        );
    }
}
