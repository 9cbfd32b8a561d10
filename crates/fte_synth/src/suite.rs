//! Logical circuits and the standard test suite
//!
//! Gantree: L3_Synthesis → LogicalCircuit
//!
//! A logical circuit is an ordered gate sequence applied to an input state,
//! together with the output distribution an ideal device would produce.

use crate::symbols::{EncodingVersion, GateSymbol, InputState};
use fte_core::{validate_distribution, Distribution, FteError, FteResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical test case
/// Gantree: LogicalCircuit // 논리 회로
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLogicalCircuit")]
pub struct LogicalCircuit {
    gates: Vec<GateSymbol>,
    input: InputState,
    ideal: Distribution,
}

/// Unvalidated serde form of `LogicalCircuit`
#[derive(Deserialize)]
struct RawLogicalCircuit {
    gates: Vec<GateSymbol>,
    input: InputState,
    ideal: Distribution,
}

impl TryFrom<RawLogicalCircuit> for LogicalCircuit {
    type Error = FteError;

    fn try_from(raw: RawLogicalCircuit) -> Result<Self, Self::Error> {
        Self::new(raw.gates, raw.input, raw.ideal)
    }
}

impl LogicalCircuit {
    /// Create with a validated ideal distribution
    /// Gantree: new(gates, input, ideal) -> Result<Self> // 생성+검증
    pub fn new(gates: Vec<GateSymbol>, input: InputState, ideal: Distribution) -> FteResult<Self> {
        validate_distribution(&ideal)?;
        Ok(Self {
            gates,
            input,
            ideal,
        })
    }

    /// Create from textual gate symbols and state name
    pub fn parse(gates: &[&str], input: &str, ideal: Distribution) -> FteResult<Self> {
        let gates = gates
            .iter()
            .map(|g| g.parse())
            .collect::<FteResult<Vec<GateSymbol>>>()?;
        Self::new(gates, input.parse()?, ideal)
    }

    /// Gate sequence in application order
    pub fn gates(&self) -> &[GateSymbol] {
        &self.gates
    }

    /// Input state
    pub fn input(&self) -> InputState {
        self.input
    }

    /// Ideal output distribution over buckets 00, 01, 10, 11
    pub fn ideal(&self) -> &Distribution {
        &self.ideal
    }

    /// Encoding versions this circuit can be synthesized with
    pub fn encoding_versions(&self) -> &'static [EncodingVersion] {
        self.input.encoding_versions()
    }

    /// Label: gates in reverse order joined by `-`, then the state name
    /// (e.g. `X2-CZ-HHS-X1|00>`)
    pub fn label(&self) -> String {
        let gates: Vec<&str> = self.gates.iter().rev().map(|g| g.as_str()).collect();
        format!("{}{}", gates.join("-"), self.input)
    }
}

impl fmt::Display for LogicalCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Standard Suite
// ============================================================================

const QUARTER: Distribution = [0.25, 0.25, 0.25, 0.25];

/// The 20 circuits of the experiment, in run order
/// Gantree: standard_suite() -> Vec<LogicalCircuit> // 표준 20 회로
pub fn standard_suite() -> Vec<LogicalCircuit> {
    use GateSymbol::*;
    use InputState::*;

    let table: [(&[GateSymbol], InputState, Distribution); 20] = [
        (&[X1, Hhs, Cz, X2], Zero, QUARTER),
        (&[Hhs, Z1, Cz], Zero, QUARTER),
        (&[Hhs, Z1, Z2], Zero, QUARTER),
        (&[Hhs, Z2, Cz], Zero, QUARTER),
        (&[Z2, X2], Bell, [0.0, 0.5, 0.5, 0.0]),
        (&[X1, Z2], ZeroPlus, [0.0, 0.0, 0.5, 0.5]),
        (&[Hhs, Z1], Zero, QUARTER),
        (&[Hhs, Cz], Zero, QUARTER),
        (&[X1, X2], Zero, [0.0, 0.0, 0.0, 1.0]),
        (&[Hhs, Z2], Zero, QUARTER),
        (&[X1], Bell, [0.0, 0.5, 0.5, 0.0]),
        (&[X1], ZeroPlus, [0.0, 0.0, 0.5, 0.5]),
        (&[Hhs], Zero, QUARTER),
        (&[Z2], Bell, [0.5, 0.0, 0.0, 0.5]),
        (&[Z2], ZeroPlus, [0.5, 0.5, 0.0, 0.0]),
        (&[X1], Zero, [0.0, 0.0, 1.0, 0.0]),
        (&[X2], Zero, [0.0, 1.0, 0.0, 0.0]),
        (&[], Bell, [0.5, 0.0, 0.0, 0.5]),
        (&[], ZeroPlus, [0.5, 0.5, 0.0, 0.0]),
        (&[], Zero, [1.0, 0.0, 0.0, 0.0]),
    ];

    table
        .iter()
        .map(|(gates, input, ideal)| LogicalCircuit {
            gates: gates.to_vec(),
            input: *input,
            ideal: *ideal,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
