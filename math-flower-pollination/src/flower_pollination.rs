use crate::{FlowerPollination, FpaConfig, FpaReport, Result, SearchSpace};
use ndarray::Array1;

/// Runs Flower Pollination optimization on a function.
///
/// This is a convenience function that validates `space`, builds a
/// [`FlowerPollination`] optimizer over it and runs it once with `config`.
///
/// # Arguments
///
/// * `func` - The objective function to minimize, mapping `&Array1<f64>` to `f64`
/// * `space` - Search box and Lévy exponent
/// * `config` - Run configuration (use `FpaConfigBuilder` to construct)
///
/// # Returns
///
/// Returns `Ok(FpaReport)` with the best solution found on success.
///
/// # Errors
///
/// Returns the configuration error of `space` or `config`, if any, and a
/// domain error (see [`FpaError::is_domain_error`](crate::FpaError::is_domain_error))
/// if the random draws stay unusable mid-run.
///
/// # Example
///
/// ```rust
/// use math_audio_flower_pollination::{flower_pollination, FpaConfigBuilder, SearchSpace};
///
/// let space = SearchSpace::new(1.5, 2, 5.0, -5.0).expect("valid space");
/// let result = flower_pollination(
///     &|x| x[0].powi(2) + x[1].powi(2),
///     space,
///     FpaConfigBuilder::new().iterations(100).seed(42).build().expect("valid config"),
/// )
/// .expect("optimization failed");
///
/// assert!(result.fun < 0.01);
/// ```
pub fn flower_pollination<F>(func: &F, space: SearchSpace, config: FpaConfig) -> Result<FpaReport>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    FlowerPollination::new(space)?.run(func, config)
}
