//! Perturbation sources for forecast jitter.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Zero-mean perturbation source.
///
/// The forecast engine takes one of these at construction instead of
/// reaching for ambient randomness: production supplies an entropy-seeded
/// generator, tests substitute a deterministic one and get reproducible
/// forecasts.
pub trait NoiseSource {
    /// Draw one perturbation with the given standard deviation.
    fn sample(&mut self, std_dev: f64) -> f64;
}

/// Gaussian noise backed by a seedable rng.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Entropy-seeded source for production use.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Explicitly seeded source for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self, std_dev: f64) -> f64 {
        // A degenerate sigma means no jitter, not an error.
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return 0.0;
        }
        match Normal::new(0.0, std_dev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }
}

/// No-op source: forecasts become fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self, _std_dev: f64) -> f64 {
        0.0
    }
}
