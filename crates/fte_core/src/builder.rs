//! Circuit builder for FTE
//!
//! Gantree: L1_Program → CircuitBuilder
//!
//! Fluent construction of state preparations and gate templates. The first
//! rejected instruction is remembered and reported by `try_build`.

use crate::circuit::Circuit;
use crate::constants::device;
use crate::error::{FteError, FteResult};
use crate::instruction::Instruction;
use crate::types::QubitId;

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
pub struct CircuitBuilder {
    /// Internal circuit being built
    /// Gantree: circuit: Circuit // 내부 회로
    circuit: Circuit,

    /// First instruction rejected by the circuit
    error: Option<FteError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    /// Create a builder over the full device register
    pub fn device() -> Self {
        Self::new(device::NUM_QUBITS)
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
            error: None,
        }
    }

    fn push(mut self, instruction: Instruction) -> Self {
        if let Err(err) = self.circuit.push(instruction) {
            self.error.get_or_insert(err);
        }
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard gate
    /// Gantree: h(self, q) -> Self // H 추가
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Instruction::H(qubit))
    }

    /// Add Pauli-X gate
    /// Gantree: x(self, q) -> Self // X 추가
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Instruction::X(qubit))
    }

    /// Add Pauli-Z gate
    /// Gantree: z(self, q) -> Self // Z 추가
    pub fn z(self, qubit: QubitId) -> Self {
        self.push(Instruction::Z(qubit))
    }

    /// Add S gate
    /// Gantree: s(self, q) -> Self // S 추가
    pub fn s(self, qubit: QubitId) -> Self {
        self.push(Instruction::S(qubit))
    }

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================

    /// Add CNOT gate
    /// Gantree: cx(self, c, t) -> Self // CX 추가
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.push(Instruction::Cx(control, target))
    }

    /// Exchange two qubits with three CNOTs
    ///
    /// The middle CNOT runs in the reverse direction by conjugating it with
    /// Hadamards on both qubits, so the expansion costs (4, 3).
    /// Gantree: swap(self, a, b) -> Self // SWAP 분해
    pub fn swap(self, a: QubitId, b: QubitId) -> Self {
        self.cx(a, b).h(a).h(b).cx(a, b).h(a).h(b).cx(a, b)
    }

    // ========================================================================
    // Scheduling and Measurement
    // ========================================================================

    /// Add barrier on specific qubits
    pub fn barrier(self, qubits: &[QubitId]) -> Self {
        self.push(Instruction::Barrier(qubits.to_vec()))
    }

    /// Add barrier on every qubit of the register
    pub fn barrier_all(self) -> Self {
        let all: Vec<QubitId> = (0..self.circuit.num_qubits()).collect();
        self.barrier(&all)
    }

    /// Measure a qubit into the bit of the same index
    /// Gantree: measure(self, q) -> Self // 측정
    pub fn measure(self, qubit: QubitId) -> Self {
        self.push(Instruction::Measure(qubit))
    }

    /// Measure every qubit of the register
    /// Gantree: measure_all(self) -> Self // 전체 측정
    pub fn measure_all(self) -> Self {
        (0..self.circuit.num_qubits()).fold(self, |b, q| b.measure(q))
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Append a sequence of instructions
    pub fn instructions(self, instructions: &[Instruction]) -> Self {
        instructions
            .iter()
            .cloned()
            .fold(self, |b, instruction| b.push(instruction))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit, dropping rejected instructions
    /// Gantree: build(self) -> Circuit // 빌드
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build the circuit, failing on the first rejected instruction
    pub fn try_build(self) -> FteResult<Circuit> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.circuit),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
