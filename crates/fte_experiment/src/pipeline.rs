//! Experiment pipeline
//!
//! Gantree: L6_Experiment → ExperimentRunner
//!
//! Plans test cases from a configuration, then for each case repeatedly
//! synthesizes, executes, classifies and evaluates both realizations and
//! aggregates the trials into a bare/encoded comparison.

use crate::config::ExperimentConfig;
use fte_analysis::{AggregatedStatistics, ResultClassifier, TrialStatistics};
use fte_backend::Backend;
use fte_core::{Distribution, FteError, FteResult, GateCount, QubitPair, Realization};
use fte_synth::{CircuitSynthesizer, EncodingVersion, InputState, LogicalCircuit, SynthesizedProgram};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Plan
// ============================================================================

/// One (circuit, pair, version) combination of the plan
/// Gantree: TestCase // 테스트 케이스
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Logical circuit
    pub circuit: LogicalCircuit,

    /// Physical pair of the bare realization
    pub pair: QubitPair,

    /// Encoded preparation
    pub version: EncodingVersion,
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.circuit.label(), self.pair, self.version)
    }
}

/// Expand a configuration into test cases: every selected circuit on every
/// pair, with every version the circuit's input state supports
/// Gantree: build_plan(config) -> Vec<TestCase> // 계획 수립
pub fn build_plan(config: &ExperimentConfig) -> Vec<TestCase> {
    let mut plan = Vec::new();
    for circuit in config.suite() {
        let versions = config.versions_for(&circuit);
        for &pair in &config.pairs {
            for &version in &versions {
                plan.push(TestCase {
                    circuit: circuit.clone(),
                    pair,
                    version,
                });
            }
        }
    }
    plan
}

// ============================================================================
// CircuitComparison
// ============================================================================

/// Bare vs encoded outcome of one test case
/// Gantree: CircuitComparison // 비교 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitComparison {
    /// Circuit label
    pub label: String,

    /// Input state
    pub input: InputState,

    /// Ideal output distribution
    pub ideal: Distribution,

    /// Physical pair of the bare realization
    pub pair: QubitPair,

    /// Encoded preparation
    pub version: EncodingVersion,

    /// Bare program name
    pub bare_program: String,

    /// Encoded program name
    pub encoded_program: String,

    /// Final role-swap parity
    pub parity: bool,

    /// Bare physical gate cost
    pub bare_count: GateCount,

    /// Encoded physical gate cost
    pub encoded_count: GateCount,

    /// Aggregated bare distances
    pub bare: AggregatedStatistics,

    /// Aggregated encoded distances
    pub encoded: AggregatedStatistics,

    /// Mean post-selection ratio of the encoded trials
    pub post_selection_ratio: f64,

    /// Trials dropped for having no valid outcome
    pub dropped_trials: usize,
}

impl CircuitComparison {
    /// Encoded mean minus bare mean; negative when encoding helps
    /// Gantree: difference(&self) -> f64 // 거리 차이
    pub fn difference(&self) -> f64 {
        self.encoded.mean - self.bare.mean
    }

    /// Half-width of the difference: sum of both half-widths
    pub fn difference_half_width(&self) -> f64 {
        self.encoded.half_width + self.bare.half_width
    }

    /// Encoded is closer to ideal beyond both intervals
    pub fn encoded_better(&self) -> bool {
        self.difference() + self.difference_half_width() < 0.0
    }

    /// Bare is closer to ideal beyond both intervals
    pub fn bare_better(&self) -> bool {
        self.difference() - self.difference_half_width() > 0.0
    }

    /// Short description: label, pair and version
    pub fn description(&self) -> String {
        format!("{} {} {}", self.label, self.pair, self.version)
    }
}

impl fmt::Display for CircuitComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: bare {} encoded {} diff {:+.4} ± {:.4}",
            self.description(),
            self.bare,
            self.encoded,
            self.difference(),
            self.difference_half_width()
        )
    }
}

// ============================================================================
// Report
// ============================================================================

/// Summary over all comparisons
/// Gantree: ExperimentSummary // 요약 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Number of comparisons
    pub count: usize,

    /// Comparisons where encoding is conclusively closer to ideal
    pub encoded_better: usize,

    /// Comparisons where bare is conclusively closer to ideal
    pub bare_better: usize,

    /// Mean of `difference()`
    pub mean_difference: f64,

    /// Mean encoded post-selection ratio
    pub mean_post_selection: f64,
}

impl ExperimentSummary {
    /// Summarize comparisons
    pub fn from_comparisons(comparisons: &[CircuitComparison]) -> Self {
        if comparisons.is_empty() {
            return Self::default();
        }
        let n = comparisons.len() as f64;
        Self {
            count: comparisons.len(),
            encoded_better: comparisons.iter().filter(|c| c.encoded_better()).count(),
            bare_better: comparisons.iter().filter(|c| c.bare_better()).count(),
            mean_difference: comparisons.iter().map(|c| c.difference()).sum::<f64>() / n,
            mean_post_selection: comparisons.iter().map(|c| c.post_selection_ratio).sum::<f64>() / n,
        }
    }

    /// Comparisons with overlapping intervals
    pub fn inconclusive(&self) -> usize {
        self.count - self.encoded_better - self.bare_better
    }
}

/// Result of a full experiment
/// Gantree: ExperimentReport // 실험 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Backend that ran the programs
    pub backend: String,

    /// Configuration used
    pub config: ExperimentConfig,

    /// One comparison per test case, in plan order
    pub comparisons: Vec<CircuitComparison>,
}

impl ExperimentReport {
    /// Summary statistics
    pub fn summary(&self) -> ExperimentSummary {
        ExperimentSummary::from_comparisons(&self.comparisons)
    }
}

// ============================================================================
// ExperimentRunner
// ============================================================================

/// Drives synthesis, execution and analysis against a backend
/// Gantree: ExperimentRunner<B> // 실험 실행기
pub struct ExperimentRunner<B: Backend> {
    config: ExperimentConfig,
    backend: B,
    synthesizer: CircuitSynthesizer<'static>,
}

impl<B: Backend> ExperimentRunner<B> {
    /// Create a runner; the configuration is validated
    pub fn new(config: ExperimentConfig, backend: B) -> FteResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            backend,
            synthesizer: CircuitSynthesizer::new(),
        })
    }

    /// Configuration
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Test cases this runner will execute
    pub fn plan(&self) -> Vec<TestCase> {
        build_plan(&self.config)
    }

    /// Run every test case of the plan
    /// Gantree: run(&self) -> Result<ExperimentReport> // 전체 실행
    pub fn run(&self) -> FteResult<ExperimentReport> {
        let plan = self.plan();
        info!(
            "Planned {} test cases ({} runs x {} shots) on {}",
            plan.len(),
            self.config.runs,
            self.config.shots,
            self.backend.name()
        );

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut comparisons = Vec::with_capacity(plan.len());
        for case in &plan {
            comparisons.push(self.run_case(case, &mut rng)?);
        }

        let report = ExperimentReport {
            backend: self.backend.name().to_string(),
            config: self.config.clone(),
            comparisons,
        };
        let summary = report.summary();
        info!(
            "Completed {} comparisons: encoded better {}, bare better {}, inconclusive {}",
            summary.count,
            summary.encoded_better,
            summary.bare_better,
            summary.inconclusive()
        );
        Ok(report)
    }

    /// Run one test case `runs` times and aggregate
    /// Gantree: run_case(case, rng) -> Result<CircuitComparison> // 케이스 실행
    pub fn run_case<R>(&self, case: &TestCase, rng: &mut R) -> FteResult<CircuitComparison>
    where
        R: Rng + ?Sized,
    {
        let mut bare = Vec::with_capacity(self.config.runs);
        let mut encoded = Vec::with_capacity(self.config.runs);
        let mut dropped = 0;
        let mut first: Option<SynthesizedProgram> = None;

        for run in 0..self.config.runs {
            let program = self
                .synthesizer
                .synthesize(&case.circuit, case.pair, case.version, rng)?;

            for realization in Realization::ALL {
                match self.trial(&program, realization, case.circuit.ideal())? {
                    Some(stats) if realization == Realization::Bare => bare.push(stats),
                    Some(stats) => encoded.push(stats),
                    None => {
                        warn!(
                            "Dropping {} run {}: no valid outcomes",
                            program.program(realization).name,
                            run
                        );
                        dropped += 1;
                    }
                }
            }

            first.get_or_insert(program);
        }

        let program = first.ok_or(FteError::InsufficientSamples {
            got: 0,
            required: fte_core::stats::MIN_TRIALS,
        })?;

        let bare_agg = AggregatedStatistics::from_statistics(&bare, self.config.confidence)?;
        let encoded_agg = AggregatedStatistics::from_statistics(&encoded, self.config.confidence)?;
        let post_selection_ratio =
            encoded.iter().map(|s| s.post_selection_ratio).sum::<f64>() / encoded.len() as f64;

        debug!("{}: bare {} encoded {}", case, bare_agg, encoded_agg);

        Ok(CircuitComparison {
            label: program.label,
            input: case.circuit.input(),
            ideal: *case.circuit.ideal(),
            pair: case.pair,
            version: case.version,
            bare_program: program.bare.name,
            encoded_program: program.encoded.name,
            parity: program.parity,
            bare_count: program.bare_count,
            encoded_count: program.encoded_count,
            bare: bare_agg,
            encoded: encoded_agg,
            post_selection_ratio,
            dropped_trials: dropped,
        })
    }

    /// Execute and evaluate one realization; `None` when nothing was valid
    fn trial(
        &self,
        program: &SynthesizedProgram,
        realization: Realization,
        ideal: &Distribution,
    ) -> FteResult<Option<TrialStatistics>> {
        let result = self
            .backend
            .execute(program.program(realization), self.config.shots)?;
        let classifier = ResultClassifier::for_realization(realization, program.pair, program.parity);
        let outcome = classifier.classify(&result.counts);

        match TrialStatistics::compute(&outcome, ideal) {
            Ok(stats) => Ok(Some(stats)),
            Err(FteError::NoValidOutcomes { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
