//! Flower Pollination Algorithm optimization library.
//!
//! This crate provides a Rust implementation of the Flower Pollination
//! Algorithm (FPA), a population-based metaheuristic for continuous,
//! box-bounded global minimization. Each member of the population either
//! performs a long-range *global* move toward the best known solution, scaled
//! by a heavy-tailed Lévy flight step, or a short-range *local* move
//! interpolated between two other members.
//!
//! # Features
//!
//! - Lévy flight steps with Mantegna-style sampling and a cached scale
//! - Greedy per-member replacement and a monotone global incumbent
//! - Explicit, injectable random source for fully reproducible runs
//! - Optional deferred updating with parallel candidate evaluation
//! - Per-iteration callback and a cancellation flag
//!
//! # Example
//!
//! ```rust
//! use math_audio_flower_pollination::{flower_pollination, FpaConfigBuilder, SearchSpace};
//! use ndarray::Array1;
//!
//! // Minimize the sphere function: f(x) = sum(x_i^2)
//! let space = SearchSpace::new(1.5, 2, 5.0, -5.0).expect("valid search space");
//! let config = FpaConfigBuilder::new()
//!     .iterations(200)
//!     .popsize(20)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//!
//! let report = flower_pollination(
//!     &|x: &Array1<f64>| x.iter().map(|&xi| xi * xi).sum::<f64>(),
//!     space,
//!     config,
//! )
//! .expect("optimization should succeed");
//!
//! assert!(report.fun < 1e-3);
//! ```
#![doc = include_str!("../README.md")]
#![doc = include_str!("../REFERENCES.md")]
#![warn(missing_docs)]

pub mod error;
pub use error::{FpaError, Result};

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::{Array1, Array2};

/// Index of the best member of a fitness vector.
pub(crate) mod argmin;
/// Rejection sampling of the two pollinators used by local pollination.
pub(crate) mod distinct_indices;
/// Lanczos approximation of the Gamma function.
pub(crate) mod gamma;
/// Uniform random initialization of the population.
pub(crate) mod init_random;

/// Lévy flight step generator.
pub mod levy_flight;
/// Global pollination: Lévy-scaled move toward the incumbent.
pub(crate) mod pollinate_global;
/// Local pollination: interpolation between two other members.
pub(crate) mod pollinate_local;

/// Main flower pollination entry point.
pub mod flower_pollination;
/// Internal helper functions for the engine.
pub(crate) mod impl_helpers;
/// Reference objective functions.
pub mod objective;
/// Parallel population evaluation support.
pub mod parallel_eval;
/// Property-based tests.
#[cfg(test)]
mod proptests;
/// Random sources feeding every draw of a run.
pub mod random_source;

pub use flower_pollination::flower_pollination;
pub use levy_flight::LevyFlight;
pub use objective::{Objective, ObjectiveFn};
pub use parallel_eval::ParallelConfig;
pub use random_source::{RandomSource, RngSource, ScriptedSource};

use argmin::argmin;
use impl_helpers::PopulationState;
use init_random::init_random;

/// Callback function type
pub type CallbackFn = Box<dyn FnMut(&FpaIntermediate) -> CallbackAction>;

/// Axis-aligned search box and Lévy exponent.
///
/// Every coordinate shares the same `[lower_bound, upper_bound]` interval.
/// Setters do not validate, so several can be applied in any order; the
/// space is checked again when a run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    lambda: f64,
    dimensions: usize,
    upper_bound: f64,
    lower_bound: f64,
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            lambda: 1.5,
            dimensions: 3,
            upper_bound: 2.0,
            lower_bound: -2.0,
        }
    }
}

impl SearchSpace {
    /// Creates a validated search space.
    ///
    /// # Errors
    ///
    /// Returns `FpaError::InvalidBounds` unless both bounds are finite and
    /// `lower_bound < upper_bound`, `FpaError::ZeroDimensions` if
    /// `dimensions == 0`, and `FpaError::InvalidLambda` for an unusable Lévy
    /// exponent.
    pub fn new(lambda: f64, dimensions: usize, upper_bound: f64, lower_bound: f64) -> Result<Self> {
        let space = Self {
            lambda,
            dimensions,
            upper_bound,
            lower_bound,
        };
        space.validate()?;
        Ok(space)
    }

    /// Checks the invariants listed on [`SearchSpace::new`].
    pub fn validate(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(FpaError::ZeroDimensions);
        }
        if !self.lower_bound.is_finite()
            || !self.upper_bound.is_finite()
            || self.lower_bound >= self.upper_bound
        {
            return Err(FpaError::InvalidBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        LevyFlight::new(self.lambda)?;
        Ok(())
    }

    /// Lévy exponent.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
    /// Number of coordinates of a candidate.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
    /// Upper bound shared by every coordinate.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }
    /// Lower bound shared by every coordinate.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Sets the Lévy exponent.
    pub fn set_lambda(&mut self, lambda: f64) -> &mut Self {
        self.lambda = lambda;
        self
    }
    /// Sets the number of dimensions.
    pub fn set_dimensions(&mut self, dimensions: usize) -> &mut Self {
        self.dimensions = dimensions;
        self
    }
    /// Sets the upper bound.
    pub fn set_upper_bound(&mut self, upper_bound: f64) -> &mut Self {
        self.upper_bound = upper_bound;
        self
    }
    /// Sets the lower bound.
    pub fn set_lower_bound(&mut self, lower_bound: f64) -> &mut Self {
        self.lower_bound = lower_bound;
        self
    }
}

/// When replacements become visible to the rest of the population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Updating {
    /// Each member sees the replacements made earlier in the same iteration.
    #[default]
    Immediate,
    /// Candidates are built against the population at the start of the
    /// iteration, evaluated together (in parallel when enabled), then selected
    /// in index order.
    Deferred,
}

/// Configuration for a Flower Pollination run.
pub struct FpaConfig {
    /// Number of iterations; every member is visited once per iteration.
    pub iterations: usize,
    /// Population size (>= 3).
    pub popsize: usize,
    /// Probability of local pollination; a draw above it triggers global pollination.
    pub switch_probability: f64,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
    /// Update timing.
    pub updating: Updating,
    /// Parallel evaluation configuration.
    pub parallel: ParallelConfig,
    /// Optional per-iteration callback (may stop early).
    pub callback: Option<CallbackFn>,
    /// Optional cancellation flag, checked before each iteration.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Optional initial guess, written over the best member when it improves on it.
    pub x0: Option<Array1<f64>>,
    /// Log progress every `print_interval` iterations (0 disables).
    pub print_interval: usize,
}

impl Default for FpaConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            popsize: 20,
            switch_probability: 0.8,
            seed: None,
            updating: Updating::default(),
            parallel: ParallelConfig::default(),
            callback: None,
            cancel: None,
            x0: None,
            print_interval: 0,
        }
    }
}

impl FpaConfig {
    /// Checks iteration count, population size and switch probability.
    ///
    /// # Errors
    ///
    /// Returns `FpaError::InsufficientPopulation` if `popsize < 3`,
    /// `FpaError::InvalidIterations` if `iterations == 0` and
    /// `FpaError::InvalidSwitchProbability` outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.popsize < 3 {
            return Err(FpaError::InsufficientPopulation {
                pop_size: self.popsize,
            });
        }
        if self.iterations == 0 {
            return Err(FpaError::InvalidIterations);
        }
        if !(0.0..=1.0).contains(&self.switch_probability) {
            return Err(FpaError::InvalidSwitchProbability {
                probability: self.switch_probability,
            });
        }
        Ok(())
    }
}

/// Fluent builder for `FpaConfig`.
///
/// # Example
///
/// ```rust
/// use math_audio_flower_pollination::{FpaConfigBuilder, Updating};
///
/// let config = FpaConfigBuilder::new()
///     .iterations(500)
///     .popsize(25)
///     .switch_probability(0.8)
///     .updating(Updating::Deferred)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.popsize, 25);
/// ```
pub struct FpaConfigBuilder {
    cfg: FpaConfig,
}
impl Default for FpaConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FpaConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: FpaConfig::default(),
        }
    }
    /// Sets the number of iterations.
    pub fn iterations(mut self, v: usize) -> Self {
        self.cfg.iterations = v;
        self
    }
    /// Sets the population size.
    pub fn popsize(mut self, v: usize) -> Self {
        self.cfg.popsize = v;
        self
    }
    /// Sets the switch probability.
    pub fn switch_probability(mut self, v: f64) -> Self {
        self.cfg.switch_probability = v;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Sets the update timing.
    pub fn updating(mut self, v: Updating) -> Self {
        self.cfg.updating = v;
        self
    }
    /// Sets the parallel evaluation configuration.
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.cfg.parallel = parallel;
        self
    }
    /// Enables/disables parallel evaluation.
    pub fn enable_parallel(mut self, enable: bool) -> Self {
        self.cfg.parallel.enabled = enable;
        self
    }
    /// Sets the number of parallel threads.
    pub fn parallel_threads(mut self, num_threads: usize) -> Self {
        self.cfg.parallel.num_threads = Some(num_threads);
        self
    }
    /// Sets a per-iteration callback function.
    pub fn callback(mut self, cb: CallbackFn) -> Self {
        self.cfg.callback = Some(cb);
        self
    }
    /// Sets a cancellation flag; raising it stops the run at the next iteration boundary.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cfg.cancel = Some(flag);
        self
    }
    /// Sets an initial guess to seed the population.
    pub fn x0(mut self, v: Array1<f64>) -> Self {
        self.cfg.x0 = Some(v);
        self
    }
    /// Logs progress every `v` iterations.
    pub fn print_interval(mut self, v: usize) -> Self {
        self.cfg.print_interval = v;
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// See [`FpaConfig::validate`].
    pub fn build(self) -> Result<FpaConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All configured iterations ran.
    MaxIterations,
    /// The callback returned [`CallbackAction::Stop`].
    Callback,
    /// The cancellation flag was raised.
    Cancelled,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::MaxIterations => write!(f, "maximum iterations reached"),
            Termination::Callback => write!(f, "stopped by callback"),
            Termination::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result/report of an FPA run.
#[derive(Clone)]
pub struct FpaReport {
    /// Best solution vector found.
    pub x: Array1<f64>,
    /// Objective value at `x` (fmin).
    pub fun: f64,
    /// Number of iterations completed.
    pub nit: usize,
    /// Number of objective evaluations performed.
    pub nfev: usize,
    /// Why the run ended.
    pub termination: Termination,
    /// Final population matrix (popsize x dimensions).
    pub population: Array2<f64>,
    /// Fitness of each population member.
    pub population_fitness: Array1<f64>,
}

impl fmt::Debug for FpaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FpaReport")
            .field("x", &self.x)
            .field("fun", &self.fun)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field("termination", &self.termination)
            .field(
                "population",
                &format!("{}x{}", self.population.nrows(), self.population.ncols()),
            )
            .field(
                "population_fitness",
                &format!("len={}", self.population_fitness.len()),
            )
            .finish()
    }
}

/// Renders `Fmin` followed by one `D<k>` line per coordinate.
impl fmt::Display for FpaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fmin: {}", self.fun)?;
        write!(f, "\n--------------------------")?;
        for (i, v) in self.x.iter().enumerate() {
            write!(f, "\nD{}: {}", i + 1, v)?;
        }
        Ok(())
    }
}

/// Information passed to the callback after each iteration.
#[derive(Debug, Clone)]
pub struct FpaIntermediate {
    /// Current best solution vector.
    pub x: Array1<f64>,
    /// Current best objective value.
    pub fun: f64,
    /// Iteration just completed (1-based).
    pub iter: usize,
    /// Population after the iteration.
    pub population: Array2<f64>,
    /// Fitness of each member after the iteration.
    pub fitness: Array1<f64>,
    /// Members replaced during the iteration.
    pub accepted: usize,
    /// Incumbent improvements during the iteration.
    pub improved: usize,
}

/// Action returned by callback to control optimization flow.
pub enum CallbackAction {
    /// Continue optimization.
    Continue,
    /// Stop optimization early.
    Stop,
}

/// Flower Pollination optimizer.
///
/// Holds the search space between runs. Use [`FlowerPollination::new`] to
/// create an instance, adjust the space with
/// [`space_mut`](Self::space_mut), then call [`run`](Self::run).
#[derive(Debug, Clone, Default)]
pub struct FlowerPollination {
    space: SearchSpace,
}

impl FlowerPollination {
    /// Creates an optimizer over `space`.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `space` violates, see [`SearchSpace::new`].
    pub fn new(space: SearchSpace) -> Result<Self> {
        space.validate()?;
        Ok(Self { space })
    }

    /// The search space.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Mutable access to the search space, for changes between runs.
    pub fn space_mut(&mut self) -> &mut SearchSpace {
        &mut self.space
    }

    /// Runs the optimization with a source seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// See [`run_with_source`](Self::run_with_source).
    pub fn run<F>(&self, func: &F, config: FpaConfig) -> Result<FpaReport>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let mut source = RngSource::from_seed_option(config.seed);
        self.run_with_source(func, config, &mut source)
    }

    /// Runs the optimization, drawing every random number from `source`.
    ///
    /// `config.seed` is ignored. A panic inside `func` unwinds through the run
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Configuration errors are returned before any draw or evaluation:
    /// an invalid search space, `FpaError::InsufficientPopulation`,
    /// `FpaError::InvalidIterations`, `FpaError::InvalidSwitchProbability` or
    /// `FpaError::X0DimensionMismatch`. `FpaError::DegenerateLevyStep` and
    /// `FpaError::DegenerateIndexDraws` can end a run early; the latter is what
    /// a scripted source that repeats one index runs into.
    pub fn run_with_source<F, S>(
        &self,
        func: &F,
        mut config: FpaConfig,
        source: &mut S,
    ) -> Result<FpaReport>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
        S: RandomSource + ?Sized,
    {
        self.space.validate()?;
        config.validate()?;
        let levy = LevyFlight::new(self.space.lambda)?;

        let n = self.space.dimensions;
        let npop = config.popsize;
        let lower = self.space.lower_bound;
        let upper = self.space.upper_bound;

        if let Some(x0) = &config.x0
            && x0.len() != n
        {
            return Err(FpaError::X0DimensionMismatch {
                expected: n,
                got: x0.len(),
            });
        }

        log::info!(
            "FPA init: {} dimensions in [{}, {}], population={}, iterations={}",
            n,
            lower,
            upper,
            npop,
            config.iterations
        );
        log::info!(
            "  lambda={}, sigma={:.6}, switch_probability={:.3}, updating={:?}",
            levy.lambda(),
            levy.sigma(),
            config.switch_probability,
            config.updating
        );

        parallel_eval::configure_thread_pool(&config.parallel);

        // Initialize population in [lower, upper]
        let mut pop = init_random(n, npop, lower, upper, source);
        let mut fitness = parallel_eval::evaluate_population(&pop, func, &config.parallel);
        let mut nfev = npop;

        // If x0 provided and better, override the best member
        if let Some(x0) = &config.x0 {
            let x0c = x0.mapv(|v| v.max(lower).min(upper));
            let f0 = func(&x0c);
            nfev += 1;
            let (best_idx, best_f) = argmin(&fitness);
            if f0 < best_f {
                pop.row_mut(best_idx).assign(&x0c);
                fitness[best_idx] = f0;
            }
        }

        let (best_idx, best_f) = argmin(&fitness);
        log::debug!("  Initial best: fitness={:.6e} at index {}", best_f, best_idx);

        let mut state = PopulationState::new(pop, fitness, best_idx);
        let mut termination = Termination::MaxIterations;
        let mut nit = 0;

        for iter in 1..=config.iterations {
            if let Some(flag) = &config.cancel
                && flag.load(Ordering::Relaxed)
            {
                termination = Termination::Cancelled;
                break;
            }

            let stats = match config.updating {
                Updating::Immediate => state.iterate_immediate(
                    func,
                    config.switch_probability,
                    &levy,
                    lower,
                    upper,
                    source,
                )?,
                Updating::Deferred => state.iterate_deferred(
                    func,
                    config.switch_probability,
                    &levy,
                    lower,
                    upper,
                    &config.parallel,
                    source,
                )?,
            };
            nit = iter;
            nfev += npop;

            log::debug!(
                "FPA iter {:4}  best_f={:.6e}  accepted={}/{}, improved={}",
                iter,
                state.best_f,
                stats.accepted,
                npop,
                stats.improved
            );
            if config.print_interval > 0 && iter % config.print_interval == 0 {
                log::info!("FPA iter {:4}  best_f={:.6e}", iter, state.best_f);
            }

            if let Some(ref mut cb) = config.callback {
                let intermediate = FpaIntermediate {
                    x: state.best_x.clone(),
                    fun: state.best_f,
                    iter,
                    population: state.pop.clone(),
                    fitness: state.fitness.clone(),
                    accepted: stats.accepted,
                    improved: stats.improved,
                };
                match cb(&intermediate) {
                    CallbackAction::Stop => {
                        termination = Termination::Callback;
                        break;
                    }
                    CallbackAction::Continue => {}
                }
            }
        }

        log::info!(
            "FPA finished after {} iterations ({}): fmin={:.6e}, nfev={}",
            nit,
            termination,
            state.best_f,
            nfev
        );

        Ok(state.finish_report(nit, nfev, termination))
    }
}
