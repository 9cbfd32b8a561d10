//! # FTE Core
//!
//! Foundation types, instructions and program circuits for the
//! fault-tolerance experiment on a 5-qubit device.
//!
//! ## Gantree Architecture
//!
//! ```text
//! fte_core // L0+L1: Foundation + Program (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // QubitPair, GateCount (완료)
//!         Constants // 장치/QASM/통계 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Program // 프로그램 구조 (완료)
//!         Instruction // 명령 enum (완료)
//!         Circuit // 회로 + QASM2 입출력 (완료)
//!         CircuitBuilder // 빌더 패턴 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fte_core::prelude::*;
//!
//! // Bell-pair preparation on qubits 0 and 1
//! let circuit = CircuitBuilder::device()
//!     .h(0)
//!     .cx(0, 1)
//!     .barrier(&[0, 1])
//!     .measure(0)
//!     .measure(1)
//!     .build();
//!
//! assert_eq!(circuit.gate_count(), GateCount::new(1, 1));
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Program Text
//!
//! ```rust
//! use fte_core::prelude::*;
//!
//! let text = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[5];\ncreg c[5];\nx q[3];\n";
//! let circuit = Circuit::from_qasm(text).unwrap();
//! assert_eq!(circuit.to_qasm(), text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Physical instructions (Gantree: L1_Program → Instruction)
pub mod instruction;

/// Circuit structure (Gantree: L1_Program → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Program → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use constants::{device, qasm, stats};
pub use error::{FteError, FteResult};
pub use instruction::Instruction;
pub use types::{
    validate_distribution, Counts, Distribution, GateCount, QubitId, QubitPair,
    Realization,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use fte_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{device, qasm, stats};
    pub use crate::error::{FteError, FteResult};
    pub use crate::instruction::Instruction;
    pub use crate::types::{
        validate_distribution, Counts, Distribution, GateCount, QubitId, QubitPair,
        Realization,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
