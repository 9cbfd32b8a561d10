//! Constants for FTE
//!
//! Gantree: L0_Foundation → Constants
//!
//! Device geometry, program-text framing, and statistical defaults for the
//! 5-qubit fault-tolerance experiment.

// ============================================================================
// Device Constants
// Gantree: device // 장치 상수
// ============================================================================

pub mod device {
    //! Physical register of the 5-qubit device

    /// Number of physical qubits in the register
    /// Gantree: NUM_QUBITS: usize = 5
    pub const NUM_QUBITS: usize = 5;

    /// Highest valid physical qubit index
    pub const MAX_QUBIT: usize = NUM_QUBITS - 1;

    /// Number of logical qubits carried by both realizations
    pub const NUM_LOGICAL_QUBITS: usize = 2;
}

// ============================================================================
// Program Text Constants
// Gantree: qasm // QASM 상수
// ============================================================================

pub mod qasm {
    //! OpenQASM 2.0 framing shared by every synthesized program

    /// Version line
    pub const VERSION_LINE: &str = "OPENQASM 2.0;";

    /// Standard gate library include
    pub const INCLUDE_LINE: &str = "include \"qelib1.inc\";";

    /// Quantum register name
    pub const QREG: &str = "q";

    /// Classical register name
    pub const CREG: &str = "c";
}

// ============================================================================
// Statistics Constants
// Gantree: stats // 통계 상수
// ============================================================================

pub mod stats {
    //! Statistical defaults for trial analysis and aggregation

    /// Number of logical outcome buckets (00, 01, 10, 11)
    /// Gantree: NUM_BUCKETS: usize = 4
    pub const NUM_BUCKETS: usize = 4;

    /// Bucket labels in bucket order
    pub const BUCKET_LABELS: [&str; NUM_BUCKETS] = ["00", "01", "10", "11"];

    /// Default number of shots per trial
    /// Gantree: DEFAULT_SHOTS: u64 = 8192
    pub const DEFAULT_SHOTS: u64 = 8192;

    /// Maximum shots accepted per trial
    pub const MAX_SHOTS: u64 = 100_000;

    /// Default confidence level for intervals
    /// Gantree: DEFAULT_CONFIDENCE: f64 = 0.95
    pub const DEFAULT_CONFIDENCE: f64 = 0.95;

    /// Default number of repeated trials per circuit
    pub const DEFAULT_RUNS: usize = 10;

    /// Minimum trials for a sample standard deviation
    pub const MIN_TRIALS: usize = 2;

    /// Tolerance on the sum of an ideal distribution
    pub const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

    /// Two-sided z critical value at 90%
    pub const Z_CRIT_90: f64 = 1.6448536269514722;

    /// Two-sided z critical value at 95%
    /// Gantree: Z_CRIT_95: f64 = 1.96
    pub const Z_CRIT_95: f64 = 1.959963984540054;

    /// Two-sided z critical value at 99%
    pub const Z_CRIT_99: f64 = 2.5758293035489004;
}

// ============================================================================
// Tests
// ============================================================================
