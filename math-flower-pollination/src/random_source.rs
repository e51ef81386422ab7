use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of every random draw consumed by a run.
///
/// A run is reproducible exactly when the sequence of values returned here is,
/// so the engine never reaches for a global generator.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
    /// Uniform index in `0..bound`. `bound` is always > 0.
    fn next_index(&mut self, bound: usize) -> usize;
    /// Standard normal sample, N(0, 1).
    fn next_normal(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }

    fn next_normal(&mut self) -> f64 {
        (**self).next_normal()
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Deterministic source seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        let mut thread_rng = rand::rng();
        Self {
            rng: StdRng::from_rng(&mut thread_rng),
        }
    }

    /// Seeded source when `seed` is set, entropy-seeded otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }

    fn next_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Replays a fixed script of values, cycling when it runs out.
///
/// Every kind of draw consumes the next value: uniforms and normals return it
/// as is, index draws map it to `floor(value * bound)` clamped into range.
/// Useful for pinning a run to hand-computed values.
///
/// Local pollination redraws an index that collides with the member or the
/// first pollinator. A script that keeps producing the same index, such as
/// [`ScriptedSource::constant`], cannot get past that: after a bounded number
/// of redraws the run returns `FpaError::DegenerateIndexDraws`. Scripts meant
/// to reach local pollination must vary their index values.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a source replaying `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "script must hold at least one value");
        Self { values, cursor: 0 }
    }

    /// Source returning `value` for every draw.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        self.next_value()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        let v = self.next_value().clamp(0.0, 1.0);
        ((v * bound as f64) as usize).min(bound - 1)
    }

    fn next_normal(&mut self) -> f64 {
        self.next_value()
    }
}
