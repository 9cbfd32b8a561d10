//! Program circuit structure for FTE
//!
//! Gantree: L1_Program → Circuit
//!
//! A `Circuit` is the object form of a synthesized program: an instruction
//! list on a fixed register. `to_qasm` renders it to program text and
//! `from_qasm` reads that text back.

use crate::constants::qasm;
use crate::error::{FteError, FteResult};
use crate::instruction::Instruction;
use crate::types::{GateCount, QubitId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Program circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits in the register
    /// Gantree: num_qubits: usize // 큐비트 수
    num_qubits: usize,

    /// Instruction sequence
    /// Gantree: instructions: Vec<Instruction> // 명령 목록
    instructions: Vec<Instruction>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            instructions: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            instructions: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a vector of instructions
    pub fn from_instructions(
        num_qubits: usize,
        instructions: Vec<Instruction>,
    ) -> FteResult<Self> {
        let circuit = Self {
            num_qubits,
            instructions,
            name: None,
        };
        circuit.validate()?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add an instruction to the circuit
    /// Gantree: push(&mut, Instruction) -> Result // 명령 추가
    pub fn push(&mut self, instruction: Instruction) -> FteResult<()> {
        self.check_qubits(&instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }

    /// Add multiple instructions
    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) -> FteResult<()> {
        for instruction in instructions {
            self.push(instruction)?;
        }
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get instructions
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of instructions, fences and measurements included
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Count single-qubit gates
    /// Gantree: count_1q(&self) -> usize // 1Q 수
    pub fn count_1q(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.is_single_qubit())
            .count()
    }

    /// Count two-qubit gates
    /// Gantree: count_2q(&self) -> usize // 2Q 수
    pub fn count_2q(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_two_qubit()).count()
    }

    /// Physical gate cost; barriers and measurements are free
    /// Gantree: gate_count(&self) -> GateCount // 비용
    pub fn gate_count(&self) -> GateCount {
        GateCount::new(self.count_1q(), self.count_2q())
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.is_measurement())
            .count()
    }

    /// Qubits read out by the circuit, ascending
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        let measured: BTreeSet<QubitId> = self
            .instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::Measure(q) => Some(*q),
                _ => None,
            })
            .collect();
        measured.into_iter().collect()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_qubits(&self, instruction: &Instruction) -> FteResult<()> {
        for qubit in instruction.qubits() {
            if qubit >= self.num_qubits {
                return Err(FteError::QubitOutOfRange {
                    qubit,
                    max: self.num_qubits.saturating_sub(1),
                });
            }
        }
        Ok(())
    }

    /// Validate all instructions against the register size
    pub fn validate(&self) -> FteResult<()> {
        for instruction in &self.instructions {
            self.check_qubits(instruction)?;
        }
        Ok(())
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 program text
    /// Gantree: to_qasm(&self) -> String // QASM2 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = Vec::with_capacity(self.instructions.len() + 4);

        // Header
        lines.push(qasm::VERSION_LINE.to_string());
        lines.push(qasm::INCLUDE_LINE.to_string());
        lines.push(format!("qreg {}[{}];", qasm::QREG, self.num_qubits));
        lines.push(format!("creg {}[{}];", qasm::CREG, self.num_qubits));

        for instruction in &self.instructions {
            lines.push(instruction.to_qasm());
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Parse from OpenQASM 2.0 program text
    /// Gantree: from_qasm(s) -> Result<Self> // QASM2 파싱
    pub fn from_qasm(text: &str) -> FteResult<Self> {
        let mut num_qubits = None;
        let mut instructions = Vec::new();

        for line in text.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if line.starts_with("qreg") {
                num_qubits = Some(parse_register_size(line).ok_or_else(|| {
                    FteError::InvalidQasm(format!("Malformed register: {}", line))
                })?);
                continue;
            }

            if line.starts_with("OPENQASM")
                || line.starts_with("include")
                || line.starts_with("creg")
            {
                continue;
            }

            instructions.push(parse_instruction_line(line)?);
        }

        let num_qubits = num_qubits
            .ok_or_else(|| FteError::InvalidQasm("No qreg declaration found".into()))?;

        Circuit::from_instructions(num_qubits, instructions)
    }
}

// ============================================================================
// QASM Parsing Helpers
// ============================================================================

fn parse_register_size(line: &str) -> Option<usize> {
    // "qreg q[N];" -> N
    match (line.find('['), line.find(']')) {
        (Some(start), Some(end)) if start < end => line[start + 1..end].parse().ok(),
        _ => None,
    }
}

fn parse_instruction_line(line: &str) -> FteResult<Instruction> {
    let line = line.trim_end_matches(';').trim();
    let (name, operands) = line
        .split_once(' ')
        .ok_or_else(|| FteError::InvalidQasm(format!("Missing operands: {}", line)))?;

    if name == "measure" {
        let (source, target) = operands
            .split_once("->")
            .ok_or_else(|| FteError::InvalidQasm(format!("Missing target: {}", line)))?;
        let qubit = single(&parse_indices(source)?, line)?;
        let bit = single(&parse_indices(target)?, line)?;
        if qubit != bit {
            return Err(FteError::InvalidQasm(format!(
                "Measurement must target the bit of the same index: {}",
                line
            )));
        }
        return Ok(Instruction::Measure(qubit));
    }

    let qubits = parse_indices(operands)?;
    let instruction = match name.to_lowercase().as_str() {
        "h" => Instruction::H(single(&qubits, line)?),
        "x" => Instruction::X(single(&qubits, line)?),
        "z" => Instruction::Z(single(&qubits, line)?),
        "s" => Instruction::S(single(&qubits, line)?),
        "cx" | "cnot" => match qubits.as_slice() {
            [c, t] => Instruction::Cx(*c, *t),
            _ => return Err(FteError::InvalidQasm(format!("cx needs 2 qubits: {}", line))),
        },
        "barrier" => Instruction::Barrier(qubits),
        other => {
            return Err(FteError::InvalidQasm(format!(
                "Unsupported instruction '{}'",
                other
            )))
        }
    };

    Ok(instruction)
}

fn single(qubits: &[QubitId], line: &str) -> FteResult<QubitId> {
    match qubits {
        [q] => Ok(*q),
        _ => Err(FteError::InvalidQasm(format!(
            "Expected exactly one operand: {}",
            line
        ))),
    }
}

fn parse_indices(s: &str) -> FteResult<Vec<QubitId>> {
    let mut indices = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        // "q[N]" -> N
        let (start, end) = match (part.find('['), part.find(']')) {
            (Some(start), Some(end)) if start < end => (start, end),
            _ => return Err(FteError::InvalidQasm(format!("Bad operand '{}'", part))),
        };
        let index = part[start + 1..end]
            .parse()
            .map_err(|_| FteError::InvalidQasm(format!("Bad index in '{}'", part)))?;
        indices.push(index);
    }

    Ok(indices)
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} instructions)",
            self.num_qubits,
            self.instructions.len()
        )?;
        if let Some(name) = &self.name {
            writeln!(f, "  Name: {}", name)?;
        }
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_new() {
        let circuit = Circuit::new(5);
        assert_eq!(circuit.num_qubits(), 5);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_push_out_of_range() {
        let mut circuit = Circuit::new(5);
        assert!(circuit.push(Instruction::H(4)).is_ok());
        assert!(matches!(
            circuit.push(Instruction::Cx(0, 5)),
            Err(FteError::QubitOutOfRange { qubit: 5, max: 4 })
        ));
    }

    #[test]
    fn test_gate_count_ignores_fences_and_measurements() {
        let mut circuit = Circuit::new(5);
        circuit.push(Instruction::H(0)).unwrap();
        circuit.push(Instruction::Cx(0, 1)).unwrap();
        circuit.push(Instruction::Barrier(vec![0, 1])).unwrap();
        circuit.push(Instruction::Measure(0)).unwrap();
        circuit.push(Instruction::Measure(1)).unwrap();

        assert_eq!(circuit.gate_count(), GateCount::new(1, 1));
        assert_eq!(circuit.count_measurements(), 2);
        assert_eq!(circuit.measured_qubits(), vec![0, 1]);
        assert_eq!(circuit.len(), 5);
    }

    #[test]
    fn test_to_qasm() {
        let mut circuit = Circuit::new(5);
        circuit.push(Instruction::H(3)).unwrap();
        circuit.push(Instruction::Cx(3, 4)).unwrap();
        circuit.push(Instruction::Measure(3)).unwrap();

        let text = circuit.to_qasm();
        assert_eq!(
            text,
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[5];\ncreg c[5];\n\
             h q[3];\ncx q[3],q[4];\nmeasure q[3] -> c[3];\n"
        );
    }

    #[test]
    fn test_from_qasm() {
        let text = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[5];
            creg c[5];
            h q[1];
            cx q[0], q[1];
            s q[2];
            barrier q[0],q[1],q[2],q[3],q[4];
            measure q[1] -> c[1];
        "#;

        let circuit = Circuit::from_qasm(text).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.instructions()[1], Instruction::Cx(0, 1));
        assert_eq!(circuit.gate_count(), GateCount::new(2, 1));
    }

    #[test]
    fn test_from_qasm_rejects_unknown() {
        let text = "qreg q[5];\ny q[0];\n";
        assert!(matches!(
            Circuit::from_qasm(text),
            Err(FteError::InvalidQasm(_))
        ));
        assert!(Circuit::from_qasm("h q[0];").is_err());
        assert!(Circuit::from_qasm("qreg q[5];\nmeasure q[0] -> c[1];").is_err());
    }

    #[test]
    fn test_from_qasm_rejects_malformed_brackets() {
        for text in ["qreg q]5[;\n", "qreg ]q[5;\n", "qreg q[];\n"] {
            assert!(matches!(
                Circuit::from_qasm(text),
                Err(FteError::InvalidQasm(_))
            ));
        }
        assert!(matches!(
            Circuit::from_qasm("qreg q[5];\nh q]0[;\n"),
            Err(FteError::InvalidQasm(_))
        ));
    }

    #[test]
    fn test_qasm_roundtrip_preserves_instructions() {
        let mut circuit = Circuit::new(5);
        circuit
            .extend(vec![
                Instruction::H(2),
                Instruction::Cx(2, 0),
                Instruction::Z(4),
                Instruction::Barrier(vec![0, 2]),
                Instruction::Measure(2),
            ])
            .unwrap();

        let parsed = Circuit::from_qasm(&circuit.to_qasm()).unwrap();
        assert_eq!(parsed.instructions(), circuit.instructions());
    }
}
