//! Deterministic 2D scalar field.
use std::fmt;

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Seeded OpenSimplex2 field. Callers pre-scale coordinates; the field's
/// own frequency is fixed at 1 so `sample(x, z)` is a function of `(x, z)`
/// and the seed only.
pub struct NoiseField {
    seed: i32,
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { seed, noise }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Continuous value in `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}
