//! Scalar noise primitive consumed by every noise channel.
//!
//! The generator only relies on two properties of the field: it is a pure
//! function of `(seed, x, y)` and its output stays inside `[-1, 1]`. The
//! algorithm behind it is swappable through [`ScalarField`].

use noise::{NoiseFn, Perlin};

/// A deterministic, bounded 2D scalar field.
///
/// Implementations must be pure: the same `(x, y)` always yields the same
/// value for the lifetime of the instance, and the value lies in `[-1, 1]`.
pub trait ScalarField: Send + Sync {
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Perlin noise from the `noise` crate, clamped to `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinField {
    seed: u32,
    perlin: Perlin,
}

impl PerlinField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl ScalarField for PerlinField {
    fn sample(&self, x: f32, y: f32) -> f32 {
        // Perlin can overshoot the unit range by a hair near lattice diagonals
        (self.perlin.get([x as f64, y as f64]) as f32).clamp(-1.0, 1.0)
    }
}

/// Fractal Brownian motion over any scalar field, normalised back to `[-1, 1]`.
pub fn fbm<F: ScalarField + ?Sized>(
    field: &F,
    x: f32,
    y: f32,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
) -> f32 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * field.sample(x * frequency, y * frequency);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        (total / max_value).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_is_deterministic() {
        let a = PerlinField::new(42);
        let b = PerlinField::new(42);
        for i in 0..64 {
            let x = i as f32 * 0.37 - 5.0;
            let y = i as f32 * -0.61 + 2.5;
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_perlin_is_bounded() {
        let field = PerlinField::new(7);
        for i in 0..2000 {
            let x = (i % 50) as f32 * 0.173;
            let y = (i / 50) as f32 * 0.291;
            let v = field.sample(x, y);
            assert!((-1.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PerlinField::new(1);
        let b = PerlinField::new(2);
        let differs = (0..32).any(|i| {
            let x = i as f32 * 0.45 + 0.1;
            a.sample(x, x * 0.5) != b.sample(x, x * 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_fbm_bounded_and_zero_octaves() {
        let field = PerlinField::new(99);
        for i in 0..500 {
            let x = i as f32 * 0.13;
            let v = fbm(&field, x, -x, 6, 0.5, 2.0);
            assert!((-1.0..=1.0).contains(&v));
        }
        assert_eq!(fbm(&field, 1.5, 2.5, 0, 0.5, 2.0), 0.0);
    }
}
