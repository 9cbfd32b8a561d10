//! # FTE Experiment
//!
//! End-to-end bare vs encoded experiment: plan, synthesize, execute,
//! classify, aggregate, report.
//!
//! ## Gantree Architecture
//!
//! ```text
//! fte_experiment // L6: Experiment (완료)
//!     ExperimentConfig // 실험 설정 (완료)
//!     ExperimentRunner // 계획 → 실행 → 집계 (완료)
//!         CircuitComparison // bare/encoded 비교 (완료)
//!     Reporter // Markdown/JSON/CSV/Text (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fte_experiment::prelude::*;
//!
//! let backend = RecordedBackend::from_json_file("recordings/ibmqx2.json").unwrap();
//! let config = ExperimentConfig::quick().with_runs(5);
//!
//! let runner = ExperimentRunner::new(config, backend).unwrap();
//! let report = runner.run().unwrap();
//! println!("{}", Reporter::report(&report, ReportFormat::Markdown));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Experiment configuration (Gantree: L6_Experiment → ExperimentConfig)
pub mod config;

/// Experiment pipeline (Gantree: L6_Experiment → ExperimentRunner)
pub mod pipeline;

/// Reporting (Gantree: L6_Experiment → Reporter)
pub mod reporter;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ExperimentConfig;
pub use pipeline::{
    build_plan, CircuitComparison, ExperimentReport, ExperimentRunner, ExperimentSummary, TestCase,
};
pub use reporter::{ReportFormat, Reporter};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::config::ExperimentConfig;
    pub use crate::pipeline::{CircuitComparison, ExperimentReport, ExperimentRunner, ExperimentSummary};
    pub use crate::reporter::{ReportFormat, Reporter};
    pub use fte_analysis::{AggregatedStatistics, TrialStatistics};
    pub use fte_backend::{Backend, RecordedBackend};
    pub use fte_synth::prelude::*;
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
    use fte_analysis::CODEWORDS;

    /// Histogram with every shot on one bucket
    fn single(word: &str, shots: u64) -> Counts {
        let mut counts = Counts::new();
        counts.insert(word.to_string(), shots);
        counts
    }

    #[test]
    fn test_config_file_to_report() {
        let dir = std::env::temp_dir().join(format!("fte_experiment_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = ExperimentConfig::quick()
            .with_circuits(["X1|00>", "X2|00>"])
            .with_runs(2)
            .with_shots(500);
        let config_path = dir.join("config.json");
        config.save_json(&config_path).unwrap();

        // X1 -> bucket 10, X2 -> bucket 01; pair [0,1], register order
        let recorded = RecordedBackend::new("ibmqx2")
            .with_histogram("bX1|00>[0,1]", single("00001", 500))
            .with_histogram("bX2|00>[0,1]", single("00010", 500))
            .with_histogram("eX1|00>", single(CODEWORDS[2][0], 500))
            .with_histogram("eX2|00>", single(CODEWORDS[1][1], 500));
        let recording_path = dir.join("recordings.json");
        recorded.save_json(&recording_path).unwrap();

        let runner = ExperimentRunner::new(
            ExperimentConfig::from_json_file(&config_path).unwrap(),
            RecordedBackend::from_json_file(&recording_path).unwrap(),
        )
        .unwrap();
        let report = runner.run().unwrap();

        assert_eq!(report.comparisons.len(), 2);
        for c in &report.comparisons {
            assert!(c.bare.mean.abs() < 1e-12);
            assert!(c.encoded.mean.abs() < 1e-12);
        }

        for format in [ReportFormat::Markdown, ReportFormat::Json, ReportFormat::Csv, ReportFormat::Text] {
            assert!(Reporter::report(&report, format).contains("X2|00>"));
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_swapped_bucket_is_full_distance() {
        // Bare X1 measured as 01 instead of 10
        let backend = RecordedBackend::new("rec")
            .with_histogram("bX1|00>[0,1]", single("00010", 100))
            .with_histogram("eX1|00>", single(CODEWORDS[2][1], 100));
        let config = ExperimentConfig::quick().with_circuits(["X1|00>"]).with_runs(2).with_shots(100);

        let report = ExperimentRunner::new(config, backend).unwrap().run().unwrap();
        let c = &report.comparisons[0];
        assert!((c.bare.mean - 1.0).abs() < 1e-12);
        assert!(c.encoded.mean.abs() < 1e-12);
        assert!((c.difference() + 1.0).abs() < 1e-12);
    }
}
