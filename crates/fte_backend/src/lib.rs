//! # FTE Backend
//!
//! Execution seam for synthesized programs.
//!
//! ## Gantree Architecture
//!
//! ```text
//! fte_backend // L5: Backend (완료)
//!     BackendTrait // 실행 인터페이스 (완료)
//!     RecordedBackend // 기록된 히스토그램 재생 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fte_backend::prelude::*;
//! use fte_synth::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use std::collections::HashMap;
//!
//! let circuit = LogicalCircuit::parse(&["X2"], "|00>", [0.0, 1.0, 0.0, 0.0]).unwrap();
//! let pair = QubitPair::new(0, 1).unwrap();
//! let program = CircuitSynthesizer::new()
//!     .synthesize(&circuit, pair, EncodingVersion::Standard, &mut ChaCha8Rng::seed_from_u64(1))
//!     .unwrap();
//!
//! let mut counts = HashMap::new();
//! counts.insert("00010".to_string(), 1024);
//! let backend = RecordedBackend::new("ibmqx2").with_histogram(&program.bare.name, counts);
//!
//! let result = backend.execute(&program.bare, 1024).unwrap();
//! assert_eq!(result.shots, 1024);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait (Gantree: L5_Backend)
pub mod execution;

/// Recorded-histogram backend (Gantree: L5_Backend → RecordedBackend)
pub mod recorded;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use recorded::{RecordedBackend, Recordings};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::recorded::{RecordedBackend, Recordings};
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
    use fte_synth::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_backend_is_object_safe() {
        let backend: Box<dyn Backend> = Box::new(RecordedBackend::new("rec"));
        assert_eq!(backend.name(), "rec");
        assert_eq!(backend.max_shots(), stats::MAX_SHOTS);
    }

    #[test]
    fn test_resynthesized_programs_keep_their_names() {
        // Recordings are keyed by name, so every re-synthesis must hit them
        let synth = CircuitSynthesizer::new();
        let circuit = &standard_suite()[0];
        let pair = QubitPair::new(2, 3).unwrap();

        let names: Vec<(String, String)> = (0..5)
            .map(|seed| {
                let p = synth
                    .synthesize(circuit, pair, EncodingVersion::Standard, &mut ChaCha8Rng::seed_from_u64(seed))
                    .unwrap();
                (p.bare.name, p.encoded.name)
            })
            .collect();

        assert!(names.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(names[0].0, "bX2-CZ-HHS-X1|00>[2,3]");
        assert_eq!(names[0].1, "eX2-CZ-HHS-X1|00>");
    }
}
