//! Error types for FTE
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum for the whole workspace, grouped by where the failure
//! originates: configuration, measurement data, aggregation, backend and I/O.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for FTE
/// Gantree: FteError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FteError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Gate symbol not in the logical alphabet
    /// Gantree: UnknownGate(String) // 게이트 기호
    #[error("Unknown gate symbol '{0}': expected one of X1, X2, Z1, Z2, HHS, CZ")]
    UnknownGate(String),

    /// Input-state name not in the state-preparation catalog
    /// Gantree: UnknownState(String) // 입력 상태
    #[error("Unknown input state '{0}': expected one of |00>, |0+>, |00>+|11>")]
    UnknownState(String),

    /// Unknown encoding version label
    #[error("Unknown encoding version '{0}'")]
    UnknownEncodingVersion(String),

    /// Encoding version not available for the given input state
    #[error("Encoding version {version} is not available for input state {state}")]
    UnsupportedEncodingVersion { state: String, version: String },

    /// Physical qubit pair with identical qubits
    /// Gantree: InvalidQubitPair{{a,b}} // 큐비트 쌍
    #[error("Invalid qubit pair ({first}, {second}): qubits must be distinct")]
    InvalidQubitPair { first: usize, second: usize },

    /// Qubit index out of range
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Ideal distribution that is negative or does not sum to 1
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Confidence level outside (0, 1)
    /// Gantree: InvalidConfidence(f64) // 신뢰 수준
    #[error("Invalid confidence level {0}: must be in the open interval (0, 1)")]
    InvalidConfidence(f64),

    /// Shot count not accepted
    #[error("Invalid shot count {0}: must be positive and at most {1}")]
    InvalidShots(u64, u64),

    /// Experiment configuration rejected by validation
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Data Errors
    // ========================================================================
    /// Every outcome of a histogram was classified as an error
    /// Gantree: NoValidOutcomes{{errors}} // 유효 결과 없음
    #[error("Statistics undefined: no valid outcomes ({errors} outcomes classified as errors)")]
    NoValidOutcomes { errors: u64 },

    /// Invalid program text
    #[error("Invalid QASM: {0}")]
    InvalidQasm(String),

    // ========================================================================
    // Aggregation Errors
    // ========================================================================
    /// Fewer trials than the sample standard deviation needs
    /// Gantree: InsufficientSamples{{got,required}} // 표본 부족
    #[error("Insufficient samples: got {got} trials, need at least {required}")]
    InsufficientSamples { got: usize, required: usize },

    /// Trials from different circuits or realizations
    #[error("Cannot aggregate trials of different circuits or realizations: {0}")]
    MixedTrials(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Backend execution error
    /// Gantree: BackendError(String) // 백엔드
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Backend has nothing for the requested program
    #[error("No result recorded for program '{0}'")]
    ProgramNotFound(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for FTE operations
/// Gantree: FteResult<T> // type alias
pub type FteResult<T> = Result<T, FteError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for FteError {
    fn from(err: serde_json::Error) -> Self {
        FteError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for FteError {
    fn from(err: std::io::Error) -> Self {
        FteError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl FteError {
    /// Check if error comes from invalid configuration (fail fast)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FteError::UnknownGate(_)
                | FteError::UnknownState(_)
                | FteError::UnknownEncodingVersion(_)
                | FteError::UnsupportedEncodingVersion { .. }
                | FteError::InvalidQubitPair { .. }
                | FteError::QubitOutOfRange { .. }
                | FteError::InvalidDistribution(_)
                | FteError::InvalidConfidence(_)
                | FteError::InvalidShots(..)
                | FteError::InvalidConfig(_)
        )
    }

    /// Check if error comes from measurement data
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            FteError::NoValidOutcomes { .. }
                | FteError::InvalidQasm(_)
        )
    }

    /// Check if error comes from aggregation
    pub fn is_aggregation_error(&self) -> bool {
        matches!(
            self,
            FteError::InsufficientSamples { .. } | FteError::MixedTrials(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
