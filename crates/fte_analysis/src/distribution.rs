//! Probability distributions for interval estimation
//!
//! Gantree: L4_Analysis → Distributions
//!
//! Student-t quantiles for trial aggregation and normal quantiles for
//! per-bucket error bars.
//!
//! The t CDF is evaluated through the regularized incomplete beta function
//! (continued fraction, modified Lentz), and inverted by bracketing and
//! bisection:
//!
//! F(t; ν) = 1 − ½ I_{ν/(ν+t²)}(ν/2, ½)   for t ≥ 0

use fte_core::{FteError, FteResult};
use std::f64::consts::PI;

// ============================================================================
// Numerical Constants
// ============================================================================

/// Lanczos approximation parameter
const LANCZOS_G: f64 = 7.0;

/// Lanczos coefficients for g = 7, n = 9
const LANCZOS_COEFFS: [f64; 9] = [
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

/// Continued fraction convergence threshold
const CF_EPSILON: f64 = 1e-15;

/// Continued fraction iteration cap
const CF_MAX_ITER: usize = 300;

/// Guard against division by zero in Lentz's method
const CF_TINY: f64 = 1e-300;

/// Bisection iterations for quantile inversion
const BISECTION_ITER: usize = 200;

// ============================================================================
// Special Functions
// ============================================================================

/// Natural logarithm of the gamma function
/// Gantree: ln_gamma(x) -> f64 // 로그 감마
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |acc, (i, c)| acc + c / (x + i as f64));

    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// Regularized incomplete beta function I_x(a, b)
/// Gantree: incomplete_beta(x,a,b) -> f64 // 정규화 불완전 베타
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // The continued fraction converges fastest below the mean
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(x, a, b) / a
    } else {
        1.0 - front * beta_continued_fraction(1.0 - x, b, a) / b
    }
}

fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    let clamp = |v: f64| if v.abs() < CF_TINY { CF_TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / clamp(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=CF_MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / clamp(1.0 + aa * d);
        c = clamp(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / clamp(1.0 + aa * d);
        c = clamp(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < CF_EPSILON {
            break;
        }
    }

    h
}

// ============================================================================
// Student-t Distribution
// ============================================================================

/// Student-t cumulative distribution function
/// Gantree: students_t_cdf(t, df) -> f64 // t 분포 CDF
pub fn students_t_cdf(t: f64, df: f64) -> f64 {
    if t == 0.0 {
        return 0.5;
    }
    let x = df / (df + t * t);
    let tail = 0.5 * regularized_incomplete_beta(x, df / 2.0, 0.5);
    if t > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Student-t quantile (inverse CDF) for p in (0, 1)
/// Gantree: students_t_quantile(p, df) -> f64 // t 분포 분위수
pub fn students_t_quantile(p: f64, df: f64) -> f64 {
    if p == 0.5 {
        return 0.0;
    }
    if p < 0.5 {
        return -students_t_quantile(1.0 - p, df);
    }

    // Bracket
    let mut lo = 0.0;
    let mut hi = 1.0;
    while students_t_cdf(hi, df) < p && hi < f64::MAX / 2.0 {
        lo = hi;
        hi *= 2.0;
    }

    // Bisect
    for _ in 0..BISECTION_ITER {
        let mid = 0.5 * (lo + hi);
        if students_t_cdf(mid, df) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= f64::EPSILON * hi {
            break;
        }
    }

    0.5 * (lo + hi)
}

/// Two-sided Student-t critical value t*(confidence, df)
/// Gantree: t_critical(confidence, df) -> Result<f64> // t 임계값
pub fn t_critical(confidence: f64, df: usize) -> FteResult<f64> {
    validate_confidence(confidence)?;
    if df == 0 {
        return Err(FteError::InsufficientSamples {
            got: 1,
            required: 2,
        });
    }
    Ok(students_t_quantile(0.5 + confidence / 2.0, df as f64))
}

// ============================================================================
// Normal Distribution
// ============================================================================

/// Standard normal quantile (Acklam's rational approximation)
/// Gantree: normal_quantile(p) -> f64 // 정규 분위수
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -normal_quantile(1.0 - p)
    }
}

/// Two-sided normal critical value z(confidence)
pub fn z_critical(confidence: f64) -> FteResult<f64> {
    validate_confidence(confidence)?;
    Ok(normal_quantile(0.5 + confidence / 2.0))
}

/// Confidence level must lie in the open interval (0, 1)
pub fn validate_confidence(confidence: f64) -> FteResult<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(FteError::InvalidConfidence(confidence))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use fte_core::stats;

    #[test]
    fn test_ln_gamma() {
        assert_relative_eq!(ln_gamma(5.0), 24f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(ln_gamma(0.5), PI.sqrt().ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ln_gamma(0.25), 1.288_022_524_698_077_5, epsilon = 1e-10);
    }

    #[test]
    fn test_incomplete_beta() {
        assert_abs_diff_eq!(regularized_incomplete_beta(0.3, 1.0, 1.0), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(regularized_incomplete_beta(0.5, 2.0, 2.0), 0.5, epsilon = 1e-12);
        // I_x(2, 1) = x²
        assert_abs_diff_eq!(regularized_incomplete_beta(0.7, 2.0, 1.0), 0.49, epsilon = 1e-12);
        assert_eq!(regularized_incomplete_beta(0.0, 2.0, 3.0), 0.0);
        assert_eq!(regularized_incomplete_beta(1.0, 2.0, 3.0), 1.0);
    }

    #[test]
    fn test_t_cdf() {
        assert_eq!(students_t_cdf(0.0, 4.0), 0.5);
        // df = 1 is Cauchy: F(1) = 3/4
        assert_abs_diff_eq!(students_t_cdf(1.0, 1.0), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(
            students_t_cdf(-2.0, 7.0) + students_t_cdf(2.0, 7.0),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_t_quantile_known_values() {
        assert_relative_eq!(students_t_quantile(0.975, 1.0), 12.706_204_736_174_707, epsilon = 1e-8);
        assert_relative_eq!(students_t_quantile(0.975, 4.0), 2.776_445_105_197_799, epsilon = 1e-9);
        assert_relative_eq!(students_t_quantile(0.975, 10.0), 2.228_138_851_964_938_5, epsilon = 1e-9);
        assert_relative_eq!(students_t_quantile(0.975, 30.0), 2.042_272_456_301_237_6, epsilon = 1e-9);
        assert_relative_eq!(students_t_quantile(0.025, 4.0), -2.776_445_105_197_799, epsilon = 1e-9);
        assert_eq!(students_t_quantile(0.5, 3.0), 0.0);
    }

    #[test]
    fn test_t_critical() {
        assert_relative_eq!(t_critical(0.95, 4).unwrap(), 2.776_445_105_197_799, epsilon = 1e-9);
        assert_relative_eq!(t_critical(0.99, 9).unwrap(), 3.249_835_541_592_143, epsilon = 1e-8);
        assert!(matches!(t_critical(1.0, 4), Err(FteError::InvalidConfidence(_))));
        assert!(matches!(t_critical(0.0, 4), Err(FteError::InvalidConfidence(_))));
        assert!(t_critical(0.95, 0).is_err());
    }

    #[test]
    fn test_normal_quantile() {
        assert_abs_diff_eq!(normal_quantile(0.5), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normal_quantile(0.975), stats::Z_CRIT_95, epsilon = 1e-8);
        assert_relative_eq!(normal_quantile(0.01), -2.326_347_874_040_841, epsilon = 1e-8);
        assert_relative_eq!(z_critical(0.99).unwrap(), stats::Z_CRIT_99, epsilon = 1e-8);
        assert_relative_eq!(z_critical(0.90).unwrap(), stats::Z_CRIT_90, epsilon = 1e-8);
        assert!(z_critical(-0.5).is_err());
    }

    #[test]
    fn test_t_approaches_normal() {
        let t = students_t_quantile(0.975, 10_000.0);
        assert_abs_diff_eq!(t, stats::Z_CRIT_95, epsilon = 1e-3);
    }
}
