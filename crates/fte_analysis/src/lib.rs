//! # FTE Analysis
//!
//! Classification of measurement histograms, per-trial statistics and
//! aggregation across repeated trials.
//!
//! ## Gantree Architecture
//!
//! ```text
//! fte_analysis // L4: Analysis (완료)
//!     ResultClassifier // 히스토그램 → 4 버킷 + 오류 (완료)
//!     StatisticsEngine // 분포, 표준오차, 통계적 거리 (완료)
//!     AggregationEngine // 평균 + t 신뢰구간 (완료)
//!     Distributions // t / 정규 분위수 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fte_analysis::prelude::*;
//! use std::collections::HashMap;
//!
//! let pair = QubitPair::new(0, 1).unwrap();
//! let classifier = ResultClassifier::bare(pair, false);
//!
//! let mut counts = HashMap::new();
//! counts.insert("00001".to_string(), 950);
//! counts.insert("00000".to_string(), 30);
//! counts.insert("00101".to_string(), 20);
//!
//! let outcome = classifier.classify(&counts);
//! let trial = TrialStatistics::compute(&outcome, &[0.0, 0.0, 1.0, 0.0]).unwrap();
//! assert!(trial.distance < 0.05);
//!
//! let agg = AggregatedStatistics::from_distances(&[0.01, 0.02, 0.015], 0.95).unwrap();
//! println!("{}", agg);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Outcome classification (Gantree: L4_Analysis → ResultClassifier)
pub mod classifier;

/// Per-trial statistics (Gantree: L4_Analysis → StatisticsEngine)
pub mod statistics;

/// Trial aggregation (Gantree: L4_Analysis → AggregationEngine)
pub mod aggregation;

/// Quantile functions (Gantree: L4_Analysis → Distributions)
pub mod distribution;

// ============================================================================
// Re-exports
// ============================================================================

pub use aggregation::{AggregatedStatistics, TrialRecord};
pub use classifier::{ClassifiedOutcome, ResultClassifier, CODEWORDS};
pub use distribution::{normal_quantile, students_t_quantile, t_critical, z_critical};
pub use statistics::{statistical_distance, TrialStatistics};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::aggregation::{AggregatedStatistics, TrialRecord};
    pub use crate::classifier::{ClassifiedOutcome, ResultClassifier};
    pub use crate::statistics::TrialStatistics;
    pub use fte_core::prelude::*;
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_bare_pipeline_with_parity() {
        // HHS circuit on pair [1,3]: parity set, so qubit 3 alone reads as bucket 10
        let pair = QubitPair::new(1, 3).unwrap();
        let classifier = ResultClassifier::bare(pair, true);
        let histogram = counts(&[
            ("00000", 260),
            ("01000", 240), // qubit 3
            ("00010", 250), // qubit 1
            ("01010", 250),
            ("10000", 24),
        ]);

        let outcome = classifier.classify(&histogram);
        assert_eq!(outcome.buckets, [260, 250, 240, 250]);
        assert_eq!(outcome.errors, 24);

        let trial = TrialStatistics::compute(&outcome, &[0.25; 4]).unwrap();
        assert_relative_eq!(trial.distance, 0.5 * (0.01 + 0.0 + 0.01 + 0.0), epsilon = 1e-12);
        assert_relative_eq!(trial.post_selection_ratio, 1000.0 / 1024.0);
    }

    #[test]
    fn test_encoded_pipeline_to_aggregate() {
        let classifier = ResultClassifier::encoded();
        let ideal = [0.0, 0.0, 1.0, 0.0];
        let runs = [
            counts(&[("10010", 450), ("01100", 450), ("00000", 60), ("11111", 40)]),
            counts(&[("10010", 470), ("01100", 440), ("11000", 50), ("00001", 40)]),
            counts(&[("10010", 480), ("01100", 450), ("01010", 30), ("10000", 40)]),
        ];

        let trials: Vec<TrialStatistics> = runs
            .iter()
            .map(|h| TrialStatistics::compute(&classifier.classify(h), &ideal).unwrap())
            .collect();

        // 60/960, 50/960, 30/960
        assert_relative_eq!(trials[0].distance, 60.0 / 960.0, epsilon = 1e-12);
        assert_relative_eq!(trials[2].distance, 30.0 / 960.0, epsilon = 1e-12);

        let agg = AggregatedStatistics::from_statistics(&trials, 0.95).unwrap();
        assert_relative_eq!(agg.mean, (60.0 + 50.0 + 30.0) / 3.0 / 960.0, epsilon = 1e-12);
        assert!(agg.half_width > 0.0);
        assert!(agg.lower() < agg.mean && agg.mean < agg.upper());
    }

    #[test]
    fn test_statistics_serialize() {
        let outcome = ClassifiedOutcome::new([1, 2, 3, 4], 5);
        let trial = TrialStatistics::compute(&outcome, &[0.25; 4]).unwrap();
        let json = serde_json::to_string(&trial).unwrap();
        let back: TrialStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_valid, 10);
        assert_eq!(back.total_errors, 5);
    }
}
