//! Error types for the Flower Pollination optimizer.
//!
//! Configuration problems are reported before any random draw or objective
//! evaluation happens. Only degenerate random draws can end a run early: a
//! Lévy step or a pollinator index that stays unusable after a bounded number
//! of redraws.

use thiserror::Error;

/// Errors that can occur while configuring or running a Flower Pollination search.
#[derive(Debug, Error)]
pub enum FpaError {
    /// Lower bound is not strictly below the upper bound, or a bound is not finite.
    #[error("invalid bounds: lower ({lower}) must be finite and < upper ({upper})")]
    InvalidBounds {
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The search space has no dimensions.
    #[error("search space must have at least one dimension")]
    ZeroDimensions,

    /// Lévy exponent is not positive, or does not produce a usable step scale.
    #[error("invalid Lévy exponent: {lambda} (must be > 0 with a finite, positive step scale)")]
    InvalidLambda {
        /// The invalid exponent
        lambda: f64,
    },

    /// The run was asked for zero iterations.
    #[error("iteration count must be > 0")]
    InvalidIterations,

    /// Switch probability is out of the valid range [0, 1].
    #[error("invalid switch probability: {probability} (must be in [0, 1])")]
    InvalidSwitchProbability {
        /// The invalid probability
        probability: f64,
    },

    /// Initial guess (x0) has the wrong dimension.
    #[error("x0 dimension mismatch: expected {expected}, got {got}")]
    X0DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },

    /// Population is too small for local pollination (must be >= 3).
    #[error("population size ({pop_size}) must be >= 3")]
    InsufficientPopulation {
        /// The invalid population size
        pop_size: usize,
    },

    /// Every redraw of the Lévy denominator sample was zero or produced a non-finite step.
    #[error("degenerate Lévy step: denominator sample unusable after {attempts} draws")]
    DegenerateLevyStep {
        /// Number of draws attempted
        attempts: usize,
    },

    /// The random source kept returning an index local pollination must skip.
    #[error("degenerate pollinator draw: index rejected {attempts} times in a row")]
    DegenerateIndexDraws {
        /// Number of draws attempted
        attempts: usize,
    },
}

/// A specialized `Result` type for FPA operations.
pub type Result<T> = std::result::Result<T, FpaError>;

impl FpaError {
    /// Returns `true` if this error describes a malformed search space or run configuration.
    ///
    /// `InsufficientPopulation` is reported separately, see
    /// [`is_population_error`](Self::is_population_error).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FpaError::InvalidBounds { .. }
                | FpaError::ZeroDimensions
                | FpaError::InvalidLambda { .. }
                | FpaError::InvalidIterations
                | FpaError::InvalidSwitchProbability { .. }
                | FpaError::X0DimensionMismatch { .. }
        )
    }

    /// Returns `true` if the population is too small to run.
    pub fn is_population_error(&self) -> bool {
        matches!(self, FpaError::InsufficientPopulation { .. })
    }

    /// Returns `true` if the random draws could not produce a usable move: a
    /// Lévy step that stays non-finite, or pollinator indices that keep colliding.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            FpaError::DegenerateLevyStep { .. } | FpaError::DegenerateIndexDraws { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FpaError::InvalidBounds {
            lower: 2.0,
            upper: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid bounds: lower (2) must be finite and < upper (-2)"
        );

        let err = FpaError::InsufficientPopulation { pop_size: 2 };
        assert_eq!(err.to_string(), "population size (2) must be >= 3");
    }

    #[test]
    fn test_is_config_error() {
        let config_err = FpaError::InvalidSwitchProbability { probability: 1.5 };
        let pop_err = FpaError::InsufficientPopulation { pop_size: 1 };

        assert!(config_err.is_config_error());
        assert!(FpaError::ZeroDimensions.is_config_error());
        assert!(!pop_err.is_config_error());
    }

    #[test]
    fn test_error_categories_are_disjoint() {
        let domain_err = FpaError::DegenerateLevyStep { attempts: 16 };
        let index_err = FpaError::DegenerateIndexDraws { attempts: 64 };
        let pop_err = FpaError::InsufficientPopulation { pop_size: 2 };

        assert!(domain_err.is_domain_error());
        assert!(index_err.is_domain_error());
        assert!(!index_err.is_config_error());
        assert!(!domain_err.is_config_error());
        assert!(!domain_err.is_population_error());
        assert!(pop_err.is_population_error());
        assert!(!pop_err.is_domain_error());
    }
}
