use ndarray::{Array1, ArrayView1, Zip};

use crate::error::Result;
use crate::levy_flight::LevyFlight;
use crate::random_source::RandomSource;

/// Global pollination: `x_i + L * (best - x_i)` with a fresh Lévy step `L`.
pub(crate) fn pollinate_global<S: RandomSource + ?Sized>(
    current: ArrayView1<f64>,
    best: &Array1<f64>,
    levy: &LevyFlight,
    source: &mut S,
) -> Result<Array1<f64>> {
    let step = levy.step(current.len(), source)?;
    Ok(Zip::from(current)
        .and(best)
        .and(&step)
        .map_collect(|&x, &b, &l| x + l * (b - x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_source::ScriptedSource;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_moves_toward_best_by_step() {
        let levy = LevyFlight::new(1.0).unwrap();
        // u' = 50, v = 1 -> step = 0.01 * 50 * σ = 0.5 (σ = 1 for λ = 1)
        let mut src = ScriptedSource::new(vec![50.0, 1.0]);
        let current = array![2.0, -2.0];
        let best = array![0.0, 0.0];

        let c = pollinate_global(current.view(), &best, &levy, &mut src).unwrap();

        assert_relative_eq!(c[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(c[1], -1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_member_at_best_stays_put() {
        let levy = LevyFlight::new(1.5).unwrap();
        let mut src = ScriptedSource::new(vec![3.0, 0.5]);
        let best = array![0.25, -0.75];

        let c = pollinate_global(best.view(), &best, &levy, &mut src).unwrap();

        assert_eq!(c, best);
    }
}
