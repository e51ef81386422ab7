use std::f64::consts::PI;

use ndarray::Array1;

use crate::error::{FpaError, Result};
use crate::gamma::gamma;
use crate::random_source::RandomSource;

/// Scale applied to every Lévy step.
const STEP_SCALE: f64 = 0.01;
/// Draws of the denominator sample before a step is declared degenerate.
pub const MAX_DENOMINATOR_DRAWS: usize = 16;

/// Lévy flight step generator (Mantegna-style sampling).
///
/// Each component is `0.01 * u / |v|^(1 - λ)` with `u ~ N(0, σ²)` and
/// `v ~ N(0, 1)`. The scale σ depends on λ only and is computed once:
///
/// ```text
/// σ = ( Γ(1+λ) sin(πλ/2) / ( Γ((1+λ)/2) λ 2^((λ-1)/2) ) )^(1/λ)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LevyFlight {
    lambda: f64,
    sigma: f64,
}

impl LevyFlight {
    /// Builds a generator for exponent `lambda`.
    ///
    /// # Errors
    ///
    /// Returns `FpaError::InvalidLambda` if `lambda` is not a positive finite
    /// number or σ comes out non-finite or non-positive (λ > 2 drives
    /// `sin(πλ/2)` to zero or below).
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(FpaError::InvalidLambda { lambda });
        }
        let num = gamma(1.0 + lambda) * (PI * lambda / 2.0).sin();
        let den = gamma((1.0 + lambda) / 2.0) * lambda * 2f64.powf((lambda - 1.0) / 2.0);
        let sigma = (num / den).powf(1.0 / lambda);
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FpaError::InvalidLambda { lambda });
        }
        Ok(Self { lambda, sigma })
    }

    /// The Lévy exponent λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// The cached scale σ of the numerator sample.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Draws a step vector of length `dimensions`.
    ///
    /// Per component the numerator normal is drawn first, then the
    /// denominator normal. A denominator of exactly zero, or one that makes the
    /// step non-finite, is redrawn up to [`MAX_DENOMINATOR_DRAWS`] times.
    ///
    /// # Errors
    ///
    /// Returns `FpaError::DegenerateLevyStep` when the redraw budget runs out.
    pub fn step<S: RandomSource + ?Sized>(
        &self,
        dimensions: usize,
        source: &mut S,
    ) -> Result<Array1<f64>> {
        let mut out = Array1::<f64>::zeros(dimensions);
        for slot in out.iter_mut() {
            *slot = self.component(source)?;
        }
        Ok(out)
    }

    fn component<S: RandomSource + ?Sized>(&self, source: &mut S) -> Result<f64> {
        let u = source.next_normal() * self.sigma;
        for _ in 0..MAX_DENOMINATOR_DRAWS {
            let v = source.next_normal();
            if v == 0.0 {
                continue;
            }
            let s = STEP_SCALE * u / v.abs().powf(1.0 - self.lambda);
            if s.is_finite() {
                return Ok(s);
            }
        }
        log::warn!(
            "Lévy denominator unusable after {} draws (lambda={})",
            MAX_DENOMINATOR_DRAWS,
            self.lambda
        );
        Err(FpaError::DegenerateLevyStep {
            attempts: MAX_DENOMINATOR_DRAWS,
        })
    }
}
