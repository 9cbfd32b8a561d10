//! Program synthesizer
//!
//! Gantree: L3_Synthesis → CircuitSynthesizer
//!
//! Composes preamble, per-gate templates and measurement epilogue into the
//! bare and encoded programs of a logical circuit.
//!
//! ## Role-swap parity
//!
//! The bare `HHS` template applies Hadamards on both qubits but omits the
//! logical swap. Instead a parity flag is toggled, and while it is set every
//! later `X1/X2` and `Z1/Z2` is applied to the other qubit of the pair. The
//! classifier undoes the swap on readout using the final flag. The encoded
//! code absorbs the swap in its transversal Hadamard, so encoded gates are
//! never remapped.

use crate::catalog::{GateCatalog, StatePrepCatalog};
use crate::suite::LogicalCircuit;
use crate::symbols::EncodingVersion;
use fte_core::{Circuit, CircuitBuilder, FteResult, GateCount, QubitPair, Realization};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Program
// ============================================================================

/// One executable program
/// Gantree: Program // 이름+회로+QASM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Job name at the backend
    pub name: String,

    /// Which realization this program is
    pub realization: Realization,

    /// Instruction list
    pub circuit: Circuit,

    /// OpenQASM 2.0 text of `circuit`
    pub qasm: String,
}

impl Program {
    /// Create and render a program
    pub fn new(name: impl Into<String>, realization: Realization, mut circuit: Circuit) -> Self {
        let name = name.into();
        circuit.set_name(name.clone());
        let qasm = circuit.to_qasm();
        Self {
            name,
            realization,
            circuit,
            qasm,
        }
    }

    /// Physical gate count of the program
    pub fn gate_count(&self) -> GateCount {
        self.circuit.gate_count()
    }
}

/// Bare and encoded programs of one test case
/// Gantree: SynthesizedProgram // 합성 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedProgram {
    /// Label of the logical circuit
    pub label: String,

    /// Physical pair carrying the bare realization
    pub pair: QubitPair,

    /// Encoding version of the encoded preamble
    pub version: EncodingVersion,

    /// Bare program
    pub bare: Program,

    /// Encoded program
    pub encoded: Program,

    /// Final role-swap parity (true = roles exchanged)
    pub parity: bool,

    /// Bare cost: preamble plus every gate
    pub bare_count: GateCount,

    /// Encoded cost: preamble plus every gate
    pub encoded_count: GateCount,
}

impl SynthesizedProgram {
    /// Program of a realization
    pub fn program(&self, realization: Realization) -> &Program {
        match realization {
            Realization::Bare => &self.bare,
            Realization::Encoded => &self.encoded,
        }
    }

    /// Cost of a realization
    pub fn count(&self, realization: Realization) -> GateCount {
        match realization {
            Realization::Bare => self.bare_count,
            Realization::Encoded => self.encoded_count,
        }
    }

    /// Parity flag as 0/1
    pub fn parity_bit(&self) -> u8 {
        u8::from(self.parity)
    }
}

// ============================================================================
// CircuitSynthesizer
// ============================================================================

/// Program synthesizer over a pair of catalogs
/// Gantree: CircuitSynthesizer // 합성기
#[derive(Debug, Clone, Copy)]
pub struct CircuitSynthesizer<'a> {
    gates: &'a GateCatalog,
    states: &'a StatePrepCatalog,
}

impl CircuitSynthesizer<'static> {
    /// Synthesizer over the shared catalogs
    pub fn new() -> Self {
        Self {
            gates: GateCatalog::standard(),
            states: StatePrepCatalog::standard(),
        }
    }
}

impl Default for CircuitSynthesizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CircuitSynthesizer<'a> {
    /// Synthesizer over explicit catalogs
    pub fn with_catalogs(gates: &'a GateCatalog, states: &'a StatePrepCatalog) -> Self {
        Self { gates, states }
    }

    /// Synthesize both programs of a test case
    /// Gantree: synthesize(circuit, pair, version, rng) -> Result<SynthesizedProgram> // 합성
    ///
    /// Variant choices are drawn from `rng` independently per gate
    /// occurrence; only gates with more than one variant consume a draw.
    pub fn synthesize<R>(
        &self,
        circuit: &LogicalCircuit,
        pair: QubitPair,
        version: EncodingVersion,
        rng: &mut R,
    ) -> FteResult<SynthesizedProgram>
    where
        R: Rng + ?Sized,
    {
        let state = self.states.get(circuit.input());
        let encoded_preamble = state.encoded(version)?;

        // Preamble
        let mut bare = CircuitBuilder::device().instructions(&state.bind_bare(pair));
        let mut encoded = CircuitBuilder::device().instructions(&encoded_preamble.block);
        let mut bare_count = state.bare_cost();
        let mut encoded_count = encoded_preamble.cost;

        // Gates
        let mut parity = false;
        for &symbol in circuit.gates() {
            if symbol.toggles_parity() {
                parity = !parity;
            }

            let bare_spec = self.gates.get(symbol.under_parity(parity));
            let index = pick(bare_spec.bare_variants().len(), rng);
            if let Some(block) = bare_spec.bind_bare(index, pair) {
                bare = bare.instructions(&block);
            }
            bare_count += bare_spec.bare_cost();

            let encoded_spec = self.gates.get(symbol);
            let index = pick(encoded_spec.encoded_variants().len(), rng);
            if let Some(block) = encoded_spec.encoded_variants().get(index) {
                encoded = encoded.instructions(block);
            }
            encoded_count += encoded_spec.encoded_cost();
        }

        // Epilogue
        let bare = bare.measure(pair.first()).measure(pair.second()).try_build()?;
        let encoded = encoded.measure_all().try_build()?;

        let label = circuit.label();
        let bare = Program::new(bare_name(&label, pair), Realization::Bare, bare);
        let encoded = Program::new(encoded_name(&label, version), Realization::Encoded, encoded);

        debug!(
            "Synthesized {} / {}: bare {} encoded {} parity {}",
            bare.name,
            encoded.name,
            bare_count,
            encoded_count,
            u8::from(parity)
        );

        Ok(SynthesizedProgram {
            label,
            pair,
            version,
            bare,
            encoded,
            parity,
            bare_count,
            encoded_count,
        })
    }

    /// Synthesize every applicable (pair, version) combination of a circuit
    pub fn synthesize_all<R>(
        &self,
        circuit: &LogicalCircuit,
        pairs: &[QubitPair],
        versions: &[EncodingVersion],
        rng: &mut R,
    ) -> FteResult<Vec<SynthesizedProgram>>
    where
        R: Rng + ?Sized,
    {
        let mut programs = Vec::new();
        for &pair in pairs {
            for &version in versions.iter().filter(|v| circuit.input().supports(**v)) {
                programs.push(self.synthesize(circuit, pair, version, rng)?);
            }
        }
        Ok(programs)
    }
}

/// Uniform variant index; a single variant consumes no randomness
fn pick<R: Rng + ?Sized>(variants: usize, rng: &mut R) -> usize {
    if variants > 1 {
        rng.gen_range(0..variants)
    } else {
        0
    }
}

/// Bare job name: `b<label>[first,second]`
pub fn bare_name(label: &str, pair: QubitPair) -> String {
    format!("b{}{}", label, pair)
}

/// Encoded job name: `e<label><version>`; `Standard` adds nothing
pub fn encoded_name(label: &str, version: EncodingVersion) -> String {
    format!("e{}{}", label, version.name_suffix())
}

// ============================================================================
// Tests
// ============================================================================
