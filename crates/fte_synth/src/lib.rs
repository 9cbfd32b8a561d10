//! # FTE Synth
//!
//! Gate and state-preparation catalogs, the standard logical test suite and
//! the synthesizer producing a bare and an encoded program per test case.
//!
//! ## Gantree Architecture
//!
//! ```text
//! fte_synth // L2+L3: Catalog + Synthesis (완료)
//!     L2_Catalog // 정적 카탈로그 (완료)
//!         Symbols // GateSymbol, InputState, EncodingVersion (완료)
//!         GateCatalog // 게이트 → 템플릿 (완료)
//!         StatePrepCatalog // 상태 → 프리앰블 (완료)
//!     L3_Synthesis // 프로그램 합성 (완료)
//!         LogicalCircuit // 논리 회로 + 표준 20 회로 (완료)
//!         CircuitSynthesizer // bare/encoded 합성 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fte_synth::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let circuit = LogicalCircuit::parse(&["X1"], "|00>", [0.0, 0.0, 1.0, 0.0]).unwrap();
//! let pair = QubitPair::new(0, 1).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let program = CircuitSynthesizer::new()
//!     .synthesize(&circuit, pair, EncodingVersion::Standard, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(program.bare_count, GateCount::new(1, 0));
//! println!("{}", program.encoded.qasm);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Logical symbols (Gantree: L2_Catalog → Symbols)
pub mod symbols;

/// Instruction catalogs (Gantree: L2_Catalog)
pub mod catalog;

/// Logical circuits and suite (Gantree: L3_Synthesis → LogicalCircuit)
pub mod suite;

/// Program synthesizer (Gantree: L3_Synthesis → CircuitSynthesizer)
pub mod synthesizer;

// ============================================================================
// Re-exports
// ============================================================================

pub use catalog::{EncodedPreamble, GateCatalog, GateSpec, StatePrepCatalog, StatePrepSpec};
pub use suite::{standard_suite, LogicalCircuit};
pub use symbols::{EncodingVersion, GateSymbol, InputState};
pub use synthesizer::{bare_name, encoded_name, CircuitSynthesizer, Program, SynthesizedProgram};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::catalog::{GateCatalog, StatePrepCatalog};
    pub use crate::suite::{standard_suite, LogicalCircuit};
    pub use crate::symbols::{EncodingVersion, GateSymbol, InputState};
    pub use crate::synthesizer::{CircuitSynthesizer, Program, SynthesizedProgram};
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
