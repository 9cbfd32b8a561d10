//! Per-trial statistics
//!
//! Gantree: L4_Analysis → StatisticsEngine
//!
//! One classified histogram → empirical distribution, per-bucket standard
//! errors, statistical distance to the ideal distribution, the distance's
//! propagated standard deviation and the post-selection ratio.

use crate::classifier::ClassifiedOutcome;
use crate::distribution::z_critical;
use fte_core::{stats, Distribution, FteError, FteResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistics of one trial
/// Gantree: TrialStatistics // 시행 통계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStatistics {
    /// Empirical distribution over buckets (counts / total valid)
    pub distribution: Distribution,

    /// Per-bucket standard error sqrt(p(1−p)/n)
    pub standard_errors: [f64; stats::NUM_BUCKETS],

    /// Total variation distance to the ideal distribution
    /// Gantree: distance: f64 // 통계적 거리
    pub distance: f64,

    /// Propagated standard deviation of `distance`
    pub distance_std: f64,

    /// valid / (valid + errors)
    pub post_selection_ratio: f64,

    /// Outcomes that landed in a bucket
    pub total_valid: u64,

    /// Detected errors
    pub total_errors: u64,
}

impl TrialStatistics {
    /// Compute statistics of a classified histogram
    /// Gantree: compute(outcome, ideal) -> Result<TrialStatistics> // 통계 계산
    ///
    /// Fails with `NoValidOutcomes` when nothing survived post-selection.
    pub fn compute(outcome: &ClassifiedOutcome, ideal: &Distribution) -> FteResult<Self> {
        let n = outcome.total_valid();
        if n == 0 {
            return Err(FteError::NoValidOutcomes {
                errors: outcome.errors,
            });
        }

        let n_f = n as f64;
        let mut distribution = [0.0; stats::NUM_BUCKETS];
        let mut standard_errors = [0.0; stats::NUM_BUCKETS];
        for (i, &count) in outcome.buckets.iter().enumerate() {
            let p = count as f64 / n_f;
            distribution[i] = p;
            standard_errors[i] = (p * (1.0 - p) / n_f).sqrt();
        }

        Ok(Self {
            distribution,
            standard_errors,
            distance: statistical_distance(&distribution, ideal),
            distance_std: distance_standard_deviation(&outcome.buckets),
            post_selection_ratio: outcome.post_selection_ratio(),
            total_valid: n,
            total_errors: outcome.errors,
        })
    }

    /// Error bar per bucket: standard error × z(confidence)
    /// Gantree: bucket_error_bars(confidence) -> Result<[f64;4]> // 오차 막대
    pub fn bucket_error_bars(&self, confidence: f64) -> FteResult<[f64; stats::NUM_BUCKETS]> {
        let z = z_critical(confidence)?;
        Ok(self.standard_errors.map(|se| se * z))
    }
}

impl fmt::Display for TrialStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distance={:.4} ± {:.4} (valid={}, post-selected={:.3})",
            self.distance, self.distance_std, self.total_valid, self.post_selection_ratio
        )
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// Total variation distance ½ Σ|p_i − q_i|
pub fn statistical_distance(p: &Distribution, q: &Distribution) -> f64 {
    0.5 * p.iter().zip(q.iter()).map(|(a, b)| (a - b).abs()).sum::<f64>()
}

/// Propagated standard deviation of the statistical distance
///
/// sqrt( Σ_i p_i(1−p_i)/(4n) + Σ_{i≠j} p_i p_j/(4n) )
///
/// Terms are accumulated in the order above and each is evaluated left to
/// right from the raw counts, so results agree bit-for-bit with the
/// historical analysis. The cross terms
/// carry a positive sign; this is an approximation kept as is.
pub fn distance_standard_deviation(buckets: &[u64; stats::NUM_BUCKETS]) -> f64 {
    let n: u64 = buckets.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let v = |i: usize| buckets[i] as f64;

    // Left-to-right: v_j/n*(1-v_j/n)/(4n) and v_i/n*v_j/n/(4n)
    let mut variance = 0.0;
    for j in 0..stats::NUM_BUCKETS {
        variance += v(j) / n * (1.0 - v(j) / n) / (4.0 * n);
    }
    for i in 0..stats::NUM_BUCKETS {
        for j in 0..stats::NUM_BUCKETS {
            if i != j {
                variance += v(i) / n * v(j) / n / (4.0 * n);
            }
        }
    }

    variance.sqrt()
}

/// Closed form of `distance_standard_deviation`: sqrt((1 − Σp²)/(2n))
pub fn distance_standard_deviation_closed_form(p: &Distribution, n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let sum_sq: f64 = p.iter().map(|x| x * x).sum();
    ((1.0 - sum_sq) / (2.0 * n as f64)).max(0.0).sqrt()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_matching_ideal_has_zero_distance() {
        let outcome = ClassifiedOutcome::new([250, 250, 250, 250], 0);
        let stats = TrialStatistics::compute(&outcome, &[0.25; 4]).unwrap();

        assert_abs_diff_eq!(stats.distance, 0.0, epsilon = 1e-15);
        // Closed form: sqrt((1 - 0.25) / 2000)
        assert_relative_eq!(stats.distance_std, (0.75f64 / 2000.0).sqrt(), epsilon = 1e-12);
        assert!(stats.distance_std > 0.0);
        assert_eq!(stats.post_selection_ratio, 1.0);
    }

    #[test]
    fn test_single_bucket_has_zero_std() {
        let outcome = ClassifiedOutcome::new([0, 0, 1000, 0], 24);
        let stats = TrialStatistics::compute(&outcome, &[0.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(stats.distance, 0.0);
        assert_eq!(stats.distance_std, 0.0);
        assert_eq!(stats.standard_errors, [0.0; 4]);
        assert_relative_eq!(stats.post_selection_ratio, 1000.0 / 1024.0);
    }

    #[test]
    fn test_distance_and_standard_errors() {
        let outcome = ClassifiedOutcome::new([800, 100, 50, 50], 0);
        let stats = TrialStatistics::compute(&outcome, &[1.0, 0.0, 0.0, 0.0]).unwrap();

        assert_relative_eq!(stats.distance, 0.2, epsilon = 1e-12);
        assert_relative_eq!(stats.distribution[0], 0.8);
        assert_relative_eq!(stats.standard_errors[0], (0.8f64 * 0.2 / 1000.0).sqrt());
        assert_relative_eq!(stats.standard_errors[2], (0.05f64 * 0.95 / 1000.0).sqrt());
    }

    #[test]
    fn test_std_matches_closed_form() {
        for buckets in [[10, 20, 30, 40], [8000, 100, 50, 42], [1, 0, 0, 1], [3, 3, 0, 9]] {
            let n: u64 = buckets.iter().sum();
            let p = buckets.map(|c| c as f64 / n as f64);
            assert_relative_eq!(
                distance_standard_deviation(&buckets),
                distance_standard_deviation_closed_form(&p, n),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_std_evaluation_order_is_exact() {
        let golden: [([u64; 4], u64); 4] = [
            ([2722, 1107, 574, 1998], 0x3f7d_ef63_3f00_6625),
            ([10, 20, 30, 40], 0x3fae_4a52_f7c7_5ef1),
            ([8000, 100, 50, 42], 0x3f5b_7c97_0fb2_8297),
            ([3, 3, 0, 9], 0x3fc1_7cf6_0ad2_ce1c),
        ];
        for (buckets, bits) in golden {
            assert_eq!(
                distance_standard_deviation(&buckets).to_bits(),
                bits,
                "{:?}",
                buckets
            );
        }
    }

    #[test]
    fn test_no_valid_outcomes() {
        let outcome = ClassifiedOutcome::new([0; 4], 512);
        assert_eq!(
            TrialStatistics::compute(&outcome, &[0.25; 4]),
            Err(FteError::NoValidOutcomes { errors: 512 })
        );
    }

    #[test]
    fn test_bucket_error_bars() {
        let outcome = ClassifiedOutcome::new([500, 500, 0, 0], 0);
        let stats = TrialStatistics::compute(&outcome, &[0.5, 0.5, 0.0, 0.0]).unwrap();

        let bars = stats.bucket_error_bars(0.95).unwrap();
        let se = (0.25f64 / 1000.0).sqrt();
        assert_relative_eq!(bars[0], se * fte_core::stats::Z_CRIT_95, epsilon = 1e-8);
        assert_eq!(bars[2], 0.0);
        assert!(stats.bucket_error_bars(1.5).is_err());
    }
}
