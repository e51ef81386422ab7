use ndarray::{Array1, Array2, Zip};

use crate::distinct_indices::pollinator_pair;
use crate::error::Result;
use crate::random_source::RandomSource;

/// Local pollination: `x_i + eps * (x_r1 - x_r2)`.
///
/// `eps` is drawn before the pollinator indices. The candidate always starts
/// from the current member, never from a previous proposal.
///
/// # Errors
///
/// Propagates `FpaError::DegenerateIndexDraws` from the pollinator draw.
pub(crate) fn pollinate_local<S: RandomSource + ?Sized>(
    i: usize,
    pop: &Array2<f64>,
    source: &mut S,
) -> Result<Array1<f64>> {
    let epsilon = source.next_uniform();
    let (r1, r2) = pollinator_pair(i, pop.nrows(), source)?;

    Ok(Zip::from(pop.row(i))
        .and(pop.row(r1))
        .and(pop.row(r2))
        .map_collect(|&x, &x1, &x2| x + epsilon * (x1 - x2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_source::ScriptedSource;
    use ndarray::array;

    #[test]
    fn test_interpolates_between_pollinators() {
        let pop = array![[1.0, 1.0], [3.0, -1.0], [-1.0, 1.0]];
        // eps = 0.5, r1 = 1, r2 = 2
        let mut src = ScriptedSource::new(vec![0.5, 0.5, 0.9]);

        let c = pollinate_local(0, &pop, &mut src).unwrap();

        assert_eq!(c, array![3.0, 0.0]);
        assert_eq!(src.consumed(), 3);
    }

    #[test]
    fn test_zero_epsilon_returns_current_member() {
        let pop = array![[1.0], [2.0], [4.0]];
        let mut src = ScriptedSource::new(vec![0.0, 0.0, 0.5]);

        let c = pollinate_local(2, &pop, &mut src).unwrap();

        assert_eq!(c, array![4.0]);
    }
}
