//! Backend execution types and traits
//!
//! Gantree: L5_Backend → BackendTrait
//!
//! The seam between synthesized programs and whatever executes them.

use fte_core::{stats, Counts, FteError, FteResult};
use fte_synth::Program;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result of program execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Program (job) name
    pub program: String,

    /// Job ID (if applicable)
    pub job_id: Option<String>,

    /// Whether the counts were replayed from a recording
    pub replayed: bool,

    /// Additional info
    pub extra: HashMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result; shots are the histogram total
    pub fn new(counts: Counts, backend: &str, program: &str) -> Self {
        let shots = counts.values().sum();
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                program: program.to_string(),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult({}: shots={}, unique={})",
            self.metadata.program,
            self.shots,
            self.counts.len()
        )
    }
}

/// Program execution backend
/// Gantree: BackendTrait // 백엔드 인터페이스
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Execute a program
    /// Gantree: execute(program, shots) -> Result<ExecutionResult>
    fn execute(&self, program: &Program, shots: u64) -> FteResult<ExecutionResult>;

    /// Execute multiple programs (batch)
    fn execute_batch(&self, programs: &[&Program], shots: u64) -> FteResult<Vec<ExecutionResult>> {
        programs.iter().map(|p| self.execute(p, shots)).collect()
    }

    /// Get maximum shots per execution
    fn max_shots(&self) -> u64 {
        stats::MAX_SHOTS
    }

    /// Reject a shot count outside 1..=max_shots
    fn check_shots(&self, shots: u64) -> FteResult<()> {
        if shots == 0 || shots > self.max_shots() {
            return Err(FteError::InvalidShots(shots, self.max_shots()));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
