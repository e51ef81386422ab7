use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma function, Lanczos approximation (g = 7, n = 9).
///
/// Relative error is around 1e-15 for positive arguments. Arguments below
/// 0.5 go through the reflection formula. Poles (0, -1, -2, ...) return a
/// non-finite value.
pub(crate) fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Γ(x) Γ(1 - x) = π / sin(πx)
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut acc = LANCZOS_COEFFICIENTS[0];
        for (k, &c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
            acc += c / (x + k as f64);
        }
        let t = x + LANCZOS_G + 0.5;
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gamma_integers_are_factorials() {
        let mut factorial = 1.0;
        for n in 1..12 {
            assert_relative_eq!(gamma(n as f64), factorial, max_relative = 1e-12);
            factorial *= n as f64;
        }
    }

    #[test]
    fn test_gamma_half_integers() {
        assert_relative_eq!(gamma(0.5), PI.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(gamma(1.5), PI.sqrt() / 2.0, max_relative = 1e-12);
        assert_relative_eq!(gamma(2.5), 1.329_340_388_179_137, max_relative = 1e-12);
    }

    #[test]
    fn test_gamma_reflection_branch() {
        // Γ(1.25) from the direct branch, Γ(0.25) through reflection
        assert_relative_eq!(gamma(1.25), 0.906_402_477_055_477, max_relative = 1e-12);
        assert_relative_eq!(gamma(0.25), 3.625_609_908_221_908, max_relative = 1e-12);
        assert_relative_eq!(gamma(-0.5), -2.0 * PI.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_gamma_pole_is_not_finite() {
        assert!(!gamma(0.0).is_finite());
    }
}
