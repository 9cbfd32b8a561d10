//! Aggregation across repeated trials
//!
//! Gantree: L4_Analysis → AggregationEngine
//!
//! Mean statistical distance with a two-sided Student-t confidence interval.

use crate::distribution::{t_critical, validate_confidence};
use crate::statistics::TrialStatistics;
use fte_core::{stats, FteError, FteResult, Realization};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trial tagged with the test case it belongs to
/// Gantree: TrialRecord // 시행 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Program or circuit label
    pub label: String,

    /// Realization the trial ran
    pub realization: Realization,

    /// Statistics of the trial
    pub statistics: TrialStatistics,
}

impl TrialRecord {
    /// Create a record
    pub fn new(label: impl Into<String>, realization: Realization, statistics: TrialStatistics) -> Self {
        Self {
            label: label.into(),
            realization,
            statistics,
        }
    }
}

/// Aggregate of repeated trials
/// Gantree: AggregatedStatistics // 집계 통계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStatistics {
    /// Number of trials
    pub count: usize,

    /// Mean statistical distance
    /// Gantree: mean: f64 // 평균
    pub mean: f64,

    /// Sample standard deviation (divisor count − 1)
    pub std_dev: f64,

    /// Confidence-interval half-width
    /// Gantree: half_width: f64 // 신뢰구간 반폭
    pub half_width: f64,

    /// Confidence level of the interval
    pub confidence: f64,

    /// Student-t critical value used
    pub t_critical: f64,
}

impl AggregatedStatistics {
    /// Aggregate raw distances
    /// Gantree: from_distances(d, confidence) -> Result<Self> // 집계
    pub fn from_distances(distances: &[f64], confidence: f64) -> FteResult<Self> {
        validate_confidence(confidence)?;
        let count = distances.len();
        if count < stats::MIN_TRIALS {
            return Err(FteError::InsufficientSamples {
                got: count,
                required: stats::MIN_TRIALS,
            });
        }

        let n = count as f64;
        let mut mean = 0.0;
        for d in distances {
            mean += d / n;
        }

        let mut variance = 0.0;
        for d in distances {
            variance += (d - mean).powi(2) / (n - 1.0);
        }
        let std_dev = variance.sqrt();

        let t = t_critical(confidence, count - 1)?;
        let half_width = t * std_dev / n.sqrt();

        Ok(Self {
            count,
            mean,
            std_dev,
            half_width,
            confidence,
            t_critical: t,
        })
    }

    /// Aggregate trial statistics of one test case
    pub fn from_statistics(trials: &[TrialStatistics], confidence: f64) -> FteResult<Self> {
        let distances: Vec<f64> = trials.iter().map(|t| t.distance).collect();
        Self::from_distances(&distances, confidence)
    }

    /// Aggregate tagged trials, rejecting a mix of test cases
    pub fn from_records(records: &[TrialRecord], confidence: f64) -> FteResult<Self> {
        if let Some(first) = records.first() {
            if let Some(other) = records
                .iter()
                .find(|r| r.label != first.label || r.realization != first.realization)
            {
                return Err(FteError::MixedTrials(format!(
                    "{} ({}) vs {} ({})",
                    first.label, first.realization, other.label, other.realization
                )));
            }
        }
        let distances: Vec<f64> = records.iter().map(|r| r.statistics.distance).collect();
        Self::from_distances(&distances, confidence)
    }

    /// Lower bound of the interval
    pub fn lower(&self) -> f64 {
        self.mean - self.half_width
    }

    /// Upper bound of the interval
    pub fn upper(&self) -> f64 {
        self.mean + self.half_width
    }
}

impl fmt::Display for AggregatedStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} ± {:.4} ({:.0}% CI, n={})",
            self.mean,
            self.half_width,
            self.confidence * 100.0,
            self.count
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifiedOutcome;
    use approx::assert_relative_eq;

    #[test]
    fn test_five_trial_scenario() {
        let distances = [0.01, 0.02, 0.015, 0.018, 0.012];
        let agg = AggregatedStatistics::from_distances(&distances, 0.95).unwrap();

        assert_eq!(agg.count, 5);
        assert_relative_eq!(agg.mean, 0.015, epsilon = 1e-12);
        assert_relative_eq!(agg.std_dev, 17e-6f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(agg.t_critical, 2.776_445_105_197_799, epsilon = 1e-9);

        let expected = 2.776_445_105_197_799 * 17e-6f64.sqrt() / 5f64.sqrt();
        assert_relative_eq!(agg.half_width, expected, epsilon = 1e-9);
        assert!(agg.half_width.is_finite() && agg.half_width > 0.0);
        assert_relative_eq!(agg.lower() + agg.upper(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_single_trial_is_insufficient() {
        assert_eq!(
            AggregatedStatistics::from_distances(&[0.01], 0.95),
            Err(FteError::InsufficientSamples { got: 1, required: 2 })
        );
        assert!(AggregatedStatistics::from_distances(&[], 0.95).is_err());
    }

    #[test]
    fn test_invalid_confidence() {
        assert_eq!(
            AggregatedStatistics::from_distances(&[0.1, 0.2], 1.0),
            Err(FteError::InvalidConfidence(1.0))
        );
    }

    #[test]
    fn test_identical_trials_have_zero_width() {
        let agg = AggregatedStatistics::from_distances(&[0.05, 0.05, 0.05], 0.99).unwrap();
        assert_relative_eq!(agg.mean, 0.05, epsilon = 1e-15);
        assert!(agg.std_dev < 1e-15);
        assert!(agg.half_width < 1e-14);
    }

    #[test]
    fn test_from_records_rejects_mixed() {
        let stats = TrialStatistics::compute(
            &ClassifiedOutcome::new([90, 5, 5, 0], 0),
            &[1.0, 0.0, 0.0, 0.0],
        )
        .unwrap();

        let same = vec![
            TrialRecord::new("X1|00>", Realization::Bare, stats.clone()),
            TrialRecord::new("X1|00>", Realization::Bare, stats.clone()),
        ];
        let agg = AggregatedStatistics::from_records(&same, 0.95).unwrap();
        assert_relative_eq!(agg.mean, 0.1, epsilon = 1e-12);

        let mixed = vec![
            TrialRecord::new("X1|00>", Realization::Bare, stats.clone()),
            TrialRecord::new("X1|00>", Realization::Encoded, stats),
        ];
        let err = AggregatedStatistics::from_records(&mixed, 0.95).unwrap_err();
        assert!(matches!(err, FteError::MixedTrials(_)));
        assert!(err.is_aggregation_error());
    }
}
