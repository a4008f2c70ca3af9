use anyhow::Context;
use arithkernel::prelude::Element;
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Integers are drawn from `-INTEGER_BOUND..=INTEGER_BOUND` so that chained
/// products stay far from `i64` overflow.
pub const INTEGER_BOUND: i64 = 9;
pub const FLOAT_BOUND: f64 = 100.0;

/// Element types the generator can draw.
pub trait Sampled: Element {
    fn sample(rng: &mut StdRng) -> Self;

    /// A nonzero scalar suitable for scaling and division checks.
    fn sample_scalar(rng: &mut StdRng) -> Self;
}

impl Sampled for i64 {
    fn sample(rng: &mut StdRng) -> Self {
        rng.gen_range(-INTEGER_BOUND..=INTEGER_BOUND)
    }

    fn sample_scalar(rng: &mut StdRng) -> Self {
        let magnitude = rng.gen_range(1..=4);
        if rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }
}

impl Sampled for f64 {
    fn sample(rng: &mut StdRng) -> Self {
        rng.gen_range(-FLOAT_BOUND..FLOAT_BOUND)
    }

    fn sample_scalar(rng: &mut StdRng) -> Self {
        let magnitude = rng.gen_range(0.25..4.0);
        if rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }
}

/// Deterministic source of random operands.
pub struct OperandGenerator {
    rng: StdRng,
}

impl OperandGenerator {
    /// Derives an independent stream per trial from the workflow seed.
    pub fn for_trial(seed: u64, trial: usize) -> Self {
        let stream = seed ^ (trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            rng: StdRng::seed_from_u64(stream),
        }
    }

    /// Picks one of `options` uniformly.
    pub fn choose<U: Copy>(&mut self, options: &[U]) -> U {
        options[self.rng.gen_range(0..options.len())]
    }

    pub fn scalar<T: Sampled>(&mut self) -> T {
        T::sample_scalar(&mut self.rng)
    }

    pub fn vector<T: Sampled>(&mut self, len: usize) -> Array1<T> {
        (0..len).map(|_| T::sample(&mut self.rng)).collect()
    }

    pub fn matrix<T: Sampled>(&mut self, rows: usize, cols: usize) -> anyhow::Result<Array2<T>> {
        let count = rows
            .checked_mul(cols)
            .context("overflow computing matrix element count")?;
        let data = (0..count).map(|_| T::sample(&mut self.rng)).collect();
        Array2::from_shape_vec((rows, cols), data)
            .with_context(|| format!("building {}x{} operand matrix", rows, cols))
    }
}
