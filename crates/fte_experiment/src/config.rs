//! Experiment configuration
//!
//! Gantree: L6_Experiment → ExperimentConfig
//!
//! Which pairs, versions and circuits to run, how often, and with how many
//! shots. Loadable from and savable to JSON.

use fte_analysis::distribution::validate_confidence;
use fte_core::{stats, FteError, FteResult, QubitPair};
use fte_synth::{standard_suite, EncodingVersion, LogicalCircuit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Experiment configuration
/// Gantree: ExperimentConfig // 실험 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    // ========================================================================
    // Plan
    // ========================================================================
    /// Physical qubit pairs for the bare realization
    pub pairs: Vec<QubitPair>,

    /// Encoded `|00>` preparations to compare
    pub versions: Vec<EncodingVersion>,

    /// Circuit labels to run; `None` runs the whole suite
    #[serde(default)]
    pub circuits: Option<Vec<String>>,

    // ========================================================================
    // Execution
    // ========================================================================
    /// Repetitions per test case
    pub runs: usize,

    /// Shots per execution
    pub shots: u64,

    /// Confidence level of the aggregated intervals
    pub confidence: f64,

    /// Random seed for variant selection
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Full sweep on the 5-qubit device: every ordered pair, every version
    pub fn default_5q() -> Self {
        Self {
            pairs: QubitPair::all(),
            versions: EncodingVersion::ALL.to_vec(),
            circuits: None,
            runs: stats::DEFAULT_RUNS,
            shots: stats::DEFAULT_SHOTS,
            confidence: stats::DEFAULT_CONFIDENCE,
            seed: None,
        }
    }

    /// Small reproducible run on a single pair
    pub fn quick() -> Self {
        Self {
            pairs: vec![QubitPair::default()],
            versions: vec![EncodingVersion::Standard],
            runs: 3,
            shots: 1024,
            seed: Some(42),
            ..Self::default_5q()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set qubit pairs
    pub fn with_pairs(mut self, pairs: Vec<QubitPair>) -> Self {
        self.pairs = pairs;
        self
    }

    /// Set encoding versions
    pub fn with_versions(mut self, versions: Vec<EncodingVersion>) -> Self {
        self.versions = versions;
        self
    }

    /// Restrict the suite to the given circuit labels
    pub fn with_circuits<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.circuits = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set repetitions per test case
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set confidence level
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // ========================================================================
    // Suite Selection
    // ========================================================================

    /// Suite circuits selected by this configuration, in suite order
    pub fn suite(&self) -> Vec<LogicalCircuit> {
        let suite = standard_suite();
        match &self.circuits {
            None => suite,
            Some(labels) => suite
                .into_iter()
                .filter(|c| labels.iter().any(|l| *l == c.label()))
                .collect(),
        }
    }

    /// Versions a circuit runs with: the configured ones it supports, or
    /// its only version when it has just one
    pub fn versions_for(&self, circuit: &LogicalCircuit) -> Vec<EncodingVersion> {
        let supported = circuit.encoding_versions();
        if supported.len() == 1 {
            return supported.to_vec();
        }
        self.versions
            .iter()
            .copied()
            .filter(|v| circuit.input().supports(*v))
            .collect()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> FteResult<()> {
        if self.pairs.is_empty() {
            return Err(FteError::InvalidConfig("at least one qubit pair is required".into()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.pairs.iter().find(|p| !seen.insert(**p)) {
            return Err(FteError::InvalidConfig(format!("duplicate qubit pair {}", dup)));
        }

        if self.versions.is_empty() {
            return Err(FteError::InvalidConfig("at least one encoding version is required".into()));
        }

        if self.runs < stats::MIN_TRIALS {
            return Err(FteError::InvalidConfig(format!(
                "runs must be >= {}, got {}",
                stats::MIN_TRIALS,
                self.runs
            )));
        }

        if self.shots == 0 || self.shots > stats::MAX_SHOTS {
            return Err(FteError::InvalidShots(self.shots, stats::MAX_SHOTS));
        }

        validate_confidence(self.confidence)?;

        if let Some(labels) = &self.circuits {
            let suite: Vec<String> = standard_suite().iter().map(|c| c.label()).collect();
            if let Some(unknown) = labels.iter().find(|l| !suite.contains(l)) {
                return Err(FteError::InvalidConfig(format!("unknown circuit '{}'", unknown)));
            }
            if labels.is_empty() {
                return Err(FteError::InvalidConfig("circuit selection is empty".into()));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Load from JSON text
    pub fn from_json_str(json: &str) -> FteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> FteResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> FteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to a JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> FteResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::default_5q()
    }
}

impl fmt::Display for ExperimentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExperimentConfig({} pairs, {} versions, runs={}, shots={}, confidence={})",
            self.pairs.len(),
            self.versions.len(),
            self.runs,
            self.shots,
            self.confidence
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: usize, b: usize) -> QubitPair {
        QubitPair::new(a, b).unwrap()
    }

    #[test]
    fn test_default_5q() {
        let config = ExperimentConfig::default_5q();
        assert_eq!(config.pairs.len(), 20);
        assert_eq!(config.versions.len(), 5);
        assert_eq!(config.shots, 8192);
        assert_eq!(config.suite().len(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick() {
        let config = ExperimentConfig::quick();
        assert_eq!(config.pairs, vec![pair(0, 1)]);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_versions_for() {
        let config = ExperimentConfig::quick().with_versions(vec![EncodingVersion::FtV1, EncodingVersion::NftV2]);
        let suite = standard_suite();

        // |00>
        assert_eq!(
            config.versions_for(&suite[0]),
            vec![EncodingVersion::FtV1, EncodingVersion::NftV2]
        );
        // |00>+|11> has only the standard preparation
        assert_eq!(config.versions_for(&suite[4]), vec![EncodingVersion::Standard]);
    }

    #[test]
    fn test_circuit_selection() {
        let config = ExperimentConfig::quick().with_circuits(["X1|00>", "|0+>"]);
        let labels: Vec<String> = config.suite().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["X1|00>", "|0+>"]);
        assert!(config.validate().is_ok());

        let bad = ExperimentConfig::quick().with_circuits(["Y1|00>"]);
        assert!(matches!(bad.validate(), Err(FteError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation() {
        assert!(ExperimentConfig::quick().with_runs(1).validate().is_err());
        assert!(ExperimentConfig::quick().with_pairs(vec![]).validate().is_err());
        assert!(ExperimentConfig::quick()
            .with_pairs(vec![pair(0, 1), pair(0, 1)])
            .validate()
            .is_err());
        assert!(ExperimentConfig::quick().with_versions(vec![]).validate().is_err());
        assert_eq!(
            ExperimentConfig::quick().with_shots(0).validate(),
            Err(FteError::InvalidShots(0, stats::MAX_SHOTS))
        );
        assert_eq!(
            ExperimentConfig::quick().with_confidence(1.5).validate(),
            Err(FteError::InvalidConfidence(1.5))
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ExperimentConfig::quick()
            .with_pairs(vec![pair(3, 4), pair(1, 0)])
            .with_versions(vec![EncodingVersion::Standard, EncodingVersion::FtV2]);
        let json = config.to_json().unwrap();
        assert!(json.contains("FTv2"));

        let back = ExperimentConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_json_rejects_bad_pair() {
        let json = r#"{"pairs":[[2,2]],"versions":["Standard"],"runs":3,"shots":100,"confidence":0.95}"#;
        assert!(ExperimentConfig::from_json_str(json).is_err());
    }
}
