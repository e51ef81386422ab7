use ndarray::Array1;

/// Index and value of the smallest fitness.
///
/// Ties keep the first index. `NaN` entries never win.
pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
    let mut best_i = 0usize;
    let mut best_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if val < best_v || (best_v.is_nan() && !val.is_nan()) {
            best_v = val;
            best_i = i;
        }
    }
    (best_i, best_v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_argmin_first_index_wins_ties() {
        assert_eq!(argmin(&array![3.0, 1.0, 2.0, 1.0]), (1, 1.0));
        assert_eq!(argmin(&array![0.0, 0.0, 0.0]), (0, 0.0));
    }

    #[test]
    fn test_argmin_skips_nan() {
        assert_eq!(argmin(&array![f64::NAN, 2.0, 1.5]), (2, 1.5));
    }
}
