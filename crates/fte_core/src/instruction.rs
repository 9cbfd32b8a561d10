//! Physical instruction definitions for FTE
//!
//! Gantree: L1_Program → Instruction
//!
//! The closed instruction set used by every state preparation, gate template
//! and measurement epilogue of the experiment.

use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical instruction
/// Gantree: Instruction // 명령 enum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Hadamard gate
    /// Gantree: H(QubitId) // 하다마드
    H(QubitId),

    /// Pauli-X gate
    /// Gantree: X(QubitId) // 파울리 X
    X(QubitId),

    /// Pauli-Z gate
    /// Gantree: Z(QubitId) // 파울리 Z
    Z(QubitId),

    /// Phase gate S = sqrt(Z)
    /// Gantree: S(QubitId) // 위상
    S(QubitId),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (control, target)
    /// Gantree: Cx(QubitId, QubitId) // ctrl, tgt
    Cx(QubitId, QubitId),

    // ========================================================================
    // Scheduling and Measurement
    // ========================================================================
    /// Scheduling fence; the backend may not reorder across it
    /// Gantree: Barrier(Vec<QubitId>) // 배리어
    Barrier(Vec<QubitId>),

    /// Measure a qubit into the classical bit of the same index
    /// Gantree: Measure(QubitId) // 측정
    Measure(QubitId),
}

impl Instruction {
    // ========================================================================
    // Instruction Properties
    // ========================================================================

    /// Get qubits touched by this instruction
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Instruction::H(q)
            | Instruction::X(q)
            | Instruction::Z(q)
            | Instruction::S(q)
            | Instruction::Measure(q) => vec![*q],
            Instruction::Cx(c, t) => vec![*c, *t],
            Instruction::Barrier(qs) => qs.clone(),
        }
    }

    /// Check if this is a single-qubit gate
    pub fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            Instruction::H(_) | Instruction::X(_) | Instruction::Z(_) | Instruction::S(_)
        )
    }

    /// Check if this is a two-qubit gate
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Instruction::Cx(_, _))
    }

    /// Check if this is a measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Instruction::Measure(_))
    }

    /// Check if this is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Instruction::Barrier(_))
    }

    /// Get instruction mnemonic
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::H(_) => "h",
            Instruction::X(_) => "x",
            Instruction::Z(_) => "z",
            Instruction::S(_) => "s",
            Instruction::Cx(_, _) => "cx",
            Instruction::Barrier(_) => "barrier",
            Instruction::Measure(_) => "measure",
        }
    }

    /// Rebind every qubit operand through `map`
    /// Gantree: remap(&self, f) -> Instruction // 큐비트 재배치
    pub fn remap<F>(&self, map: F) -> Instruction
    where
        F: Fn(QubitId) -> QubitId,
    {
        match self {
            Instruction::H(q) => Instruction::H(map(*q)),
            Instruction::X(q) => Instruction::X(map(*q)),
            Instruction::Z(q) => Instruction::Z(map(*q)),
            Instruction::S(q) => Instruction::S(map(*q)),
            Instruction::Cx(c, t) => Instruction::Cx(map(*c), map(*t)),
            Instruction::Barrier(qs) => Instruction::Barrier(qs.iter().map(|&q| map(q)).collect()),
            Instruction::Measure(q) => Instruction::Measure(map(*q)),
        }
    }

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM 변환
    pub fn to_qasm(&self) -> String {
        match self {
            Instruction::H(q) => format!("h q[{}];", q),
            Instruction::X(q) => format!("x q[{}];", q),
            Instruction::Z(q) => format!("z q[{}];", q),
            Instruction::S(q) => format!("s q[{}];", q),
            Instruction::Cx(c, t) => format!("cx q[{}],q[{}];", c, t),
            Instruction::Barrier(qs) => {
                if qs.is_empty() {
                    "barrier q;".to_string()
                } else {
                    let qubits: Vec<String> = qs.iter().map(|q| format!("q[{}]", q)).collect();
                    format!("barrier {};", qubits.join(","))
                }
            }
            Instruction::Measure(q) => format!("measure q[{}] -> c[{}];", q, q),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================
