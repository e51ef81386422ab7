//! Reference objective functions and a selector over them.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::Array1;

/// Shared objective closure type.
pub type ObjectiveFn = Arc<dyn Fn(&Array1<f64>) -> f64 + Send + Sync>;

/// Sphere function: `f(x) = sum(x_i^2)`, minimum 0 at the origin.
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Rosenbrock function, N-dimensional.
///
/// `f(x) = sum_{i<n-1} 100 (x_{i+1} - x_i^2)^2 + (1 - x_i)^2`, minimum 0 at
/// `(1, ..., 1)`. A single dimension has no terms and evaluates to 0.
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len().saturating_sub(1) {
        let xi = x[i];
        let xi_plus_1 = x[i + 1];
        sum += 100.0 * (xi_plus_1 - xi.powi(2)).powi(2) + (1.0 - xi).powi(2);
    }
    sum
}

/// Rastrigin function: `f(x) = 10 n + sum(x_i^2 - 10 cos(2 pi x_i))`, minimum 0
/// at the origin.
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    let n = x.len() as f64;
    a * n
        + x.iter()
            .map(|&xi| xi * xi - a * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Objective selector.
///
/// The built-in variants are pure functions of the candidate; `Custom` wraps
/// any thread-safe closure.
#[derive(Clone)]
pub enum Objective {
    /// [`sphere`]
    Sphere,
    /// [`rosenbrock`]
    Rosenbrock,
    /// [`rastrigin`]
    Rastrigin,
    /// User supplied objective.
    Custom(ObjectiveFn),
}

impl Objective {
    /// Names accepted by [`FromStr`], one per built-in variant.
    pub const BUILTIN_NAMES: [&'static str; 3] = ["sphere", "rosenbrock", "rastrigin"];

    /// Wraps a closure as a `Custom` objective.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Array1<f64>) -> f64 + Send + Sync + 'static,
    {
        Objective::Custom(Arc::new(f))
    }

    /// Evaluates the objective at `x`.
    pub fn evaluate(&self, x: &Array1<f64>) -> f64 {
        match self {
            Objective::Sphere => sphere(x),
            Objective::Rosenbrock => rosenbrock(x),
            Objective::Rastrigin => rastrigin(x),
            Objective::Custom(f) => f(x),
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Objective::Sphere => "sphere",
            Objective::Rosenbrock => "rosenbrock",
            Objective::Rastrigin => "rastrigin",
            Objective::Custom(_) => "custom",
        }
    }

    /// Location of the global minimum in `dimensions` dimensions, if known.
    pub fn global_minimum(&self, dimensions: usize) -> Option<Array1<f64>> {
        match self {
            Objective::Sphere | Objective::Rastrigin => Some(Array1::zeros(dimensions)),
            Objective::Rosenbrock => Some(Array1::ones(dimensions)),
            Objective::Custom(_) => None,
        }
    }
}

impl fmt::Debug for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Objective::{}", self.name())
    }
}

impl FromStr for Objective {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.trim().to_lowercase();
        match t.as_str() {
            "sphere" => Ok(Objective::Sphere),
            "rosenbrock" => Ok(Objective::Rosenbrock),
            "rastrigin" => Ok(Objective::Rastrigin),
            _ => Err(format!("unknown objective: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_known_minima_evaluate_to_zero() {
        for name in Objective::BUILTIN_NAMES {
            let objective: Objective = name.parse().unwrap();
            for dim in [1, 2, 5] {
                let x = objective.global_minimum(dim).unwrap();
                assert_relative_eq!(objective.evaluate(&x), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(sphere(&array![1.0, 2.0, -3.0]), 14.0);
        // 100 (1 - 0)^2 + (1 - 0)^2
        assert_eq!(rosenbrock(&array![0.0, 1.0]), 101.0);
        // x = 0.5: 0.25 - 10 cos(pi) = 10.25, plus 10
        assert_relative_eq!(rastrigin(&array![0.5]), 20.25, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_objective_names() {
        assert!(matches!("Sphere".parse::<Objective>(), Ok(Objective::Sphere)));
        assert!(matches!(
            " ROSENBROCK ".parse::<Objective>(),
            Ok(Objective::Rosenbrock)
        ));
        assert!("ackley".parse::<Objective>().is_err());
    }

    #[test]
    fn test_custom_objective() {
        let objective = Objective::custom(|x| x.sum());
        assert_eq!(objective.evaluate(&array![1.0, 2.0]), 3.0);
        assert_eq!(objective.name(), "custom");
        assert!(objective.global_minimum(2).is_none());
    }
}
