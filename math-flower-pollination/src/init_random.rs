use ndarray::Array2;

use crate::random_source::RandomSource;

/// Uniform population in `[lower, upper]^n`, drawn row by row.
///
/// Consumes exactly `npop * n` uniforms, one per coordinate, member 0 first.
/// Coordinates interpolate between the bounds without forming `upper - lower`,
/// which overflows for boxes wider than `f64::MAX`.
pub(crate) fn init_random<S: RandomSource + ?Sized>(
    n: usize,
    npop: usize,
    lower: f64,
    upper: f64,
    source: &mut S,
) -> Array2<f64> {
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..npop {
        for j in 0..n {
            let u = source.next_uniform();
            pop[(i, j)] = ((1.0 - u) * lower + u * upper).clamp(lower, upper);
        }
    }
    pop
}
