//! State-preparation catalog
//!
//! Gantree: L2_Catalog → StatePrepCatalog
//!
//! Input state → bare preamble (one variant, on slots 0/1) and encoded
//! preambles (one per available encoding version, on the full register).
//! Every preamble that prepares something ends in a barrier so the backend
//! cannot merge it with the gates that follow.

use super::{bind_to_pair, block_cost};
use crate::symbols::{EncodingVersion, InputState};
use fte_core::{CircuitBuilder, FteError, FteResult, GateCount, Instruction, QubitPair};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One encoded preparation of an input state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPreamble {
    /// Encoding version
    pub version: EncodingVersion,

    /// Instructions on fixed indices 0-4
    pub block: Vec<Instruction>,

    /// Physical cost of the block
    pub cost: GateCount,
}

impl EncodedPreamble {
    fn new(version: EncodingVersion, block: Vec<Instruction>) -> Self {
        let cost = block_cost(&block);
        Self {
            version,
            block,
            cost,
        }
    }
}

/// Preparations of one input state
/// Gantree: StatePrepSpec // 상태 준비
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePrepSpec {
    state: InputState,
    bare: Vec<Instruction>,
    bare_cost: GateCount,
    encoded: Vec<EncodedPreamble>,
}

impl StatePrepSpec {
    fn new(state: InputState, bare: Vec<Instruction>, encoded: Vec<EncodedPreamble>) -> Self {
        let bare_cost = block_cost(&bare);
        Self {
            state,
            bare,
            bare_cost,
            encoded,
        }
    }

    /// Input state
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Bare preamble template on slots 0/1
    pub fn bare_template(&self) -> &[Instruction] {
        &self.bare
    }

    /// Bare preamble bound to a physical pair
    pub fn bind_bare(&self, pair: QubitPair) -> Vec<Instruction> {
        bind_to_pair(&self.bare, pair)
    }

    /// Cost of the bare preamble
    pub fn bare_cost(&self) -> GateCount {
        self.bare_cost
    }

    /// Encoded preamble of a version
    /// Gantree: encoded(version) -> Result<&EncodedPreamble> // 버전 조회
    pub fn encoded(&self, version: EncodingVersion) -> FteResult<&EncodedPreamble> {
        self.state.require(version)?;
        self.encoded
            .iter()
            .find(|p| p.version == version)
            .ok_or_else(|| FteError::UnsupportedEncodingVersion {
                state: self.state.to_string(),
                version: version.to_string(),
            })
    }

    /// All encoded preambles
    pub fn encoded_all(&self) -> &[EncodedPreamble] {
        &self.encoded
    }
}

/// Process-wide state-preparation table
/// Gantree: StatePrepCatalog // 상태 카탈로그
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePrepCatalog {
    specs: Vec<StatePrepSpec>,
}

impl StatePrepCatalog {
    /// Build the catalog
    pub fn new() -> Self {
        let specs = vec![
            StatePrepSpec::new(
                InputState::Zero,
                Vec::new(),
                vec![
                    EncodedPreamble::new(EncodingVersion::Standard, zero_standard()),
                    EncodedPreamble::new(EncodingVersion::FtV1, zero_ft_v1()),
                    EncodedPreamble::new(EncodingVersion::FtV2, zero_ft_v2()),
                    EncodedPreamble::new(EncodingVersion::NftV1, zero_nft_v1()),
                    EncodedPreamble::new(EncodingVersion::NftV2, zero_nft_v2()),
                ],
            ),
            StatePrepSpec::new(
                InputState::ZeroPlus,
                bare_block(CircuitBuilder::new(2).h(1)),
                vec![EncodedPreamble::new(
                    EncodingVersion::Standard,
                    zero_plus_standard(),
                )],
            ),
            StatePrepSpec::new(
                InputState::Bell,
                bare_block(CircuitBuilder::new(2).h(0).cx(0, 1)),
                vec![EncodedPreamble::new(EncodingVersion::Standard, bell_standard())],
            ),
        ];

        Self { specs }
    }

    /// Shared catalog, built on first use
    pub fn standard() -> &'static StatePrepCatalog {
        static CATALOG: OnceLock<StatePrepCatalog> = OnceLock::new();
        CATALOG.get_or_init(StatePrepCatalog::new)
    }

    /// Look up an input state
    pub fn get(&self, state: InputState) -> &StatePrepSpec {
        match state {
            InputState::Zero => &self.specs[0],
            InputState::ZeroPlus => &self.specs[1],
            InputState::Bell => &self.specs[2],
        }
    }

    /// Iterate over all specs
    pub fn iter(&self) -> impl Iterator<Item = &StatePrepSpec> {
        self.specs.iter()
    }
}

impl Default for StatePrepCatalog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Preamble Blocks
// ============================================================================

fn bare_block(builder: CircuitBuilder) -> Vec<Instruction> {
    builder.barrier(&[0, 1]).build().instructions().to_vec()
}

fn encoded_block(builder: CircuitBuilder) -> Vec<Instruction> {
    builder.barrier_all().build().instructions().to_vec()
}

/// Standard `|00>` encoder, cost (11, 8)
fn zero_standard() -> Vec<Instruction> {
    encoded_block(
        CircuitBuilder::device()
            .h(3)
            .cx(3, 4)
            .cx(4, 2)
            .cx(1, 2)
            .h(1)
            .h(2)
            .cx(1, 2)
            .h(1)
            .h(2)
            .cx(1, 2)
            .cx(3, 2)
            .h(0)
            .h(1)
            .h(2)
            .cx(0, 1)
            .cx(0, 2)
            .h(0)
            .h(1)
            .h(2),
    )
}

fn zero_ft_v1() -> Vec<Instruction> {
    encoded_block(
        CircuitBuilder::device()
            .h(2)
            .cx(2, 0)
            .cx(2, 1)
            .h(2)
            .h(3)
            .cx(3, 2)
            .h(2)
            .h(3)
            .cx(2, 4)
            .cx(2, 0),
    )
}

fn zero_ft_v2() -> Vec<Instruction> {
    encoded_block(
        CircuitBuilder::device()
            .h(3)
            .cx(3, 2)
            .h(2)
            .h(3)
            .cx(2, 1)
            .cx(3, 4)
            .h(4)
            .swap(2, 4)
            .cx(2, 0)
            .cx(1, 0)
            .h(4),
    )
}

fn zero_nft_v1() -> Vec<Instruction> {
    encoded_block(CircuitBuilder::device().h(3).cx(3, 4).cx(3, 2).cx(2, 1))
}

fn zero_nft_v2() -> Vec<Instruction> {
    encoded_block(
        CircuitBuilder::device()
            .h(2)
            .h(3)
            .cx(3, 4)
            .h(4)
            .cx(2, 4)
            .h(4)
            .swap(2, 1)
            .cx(3, 2)
            .cx(2, 0)
            .h(0)
            .cx(1, 0)
            .h(0)
            .h(1),
    )
}

/// Encoded `|0+>`, cost (6, 5)
fn zero_plus_standard() -> Vec<Instruction> {
    encoded_block(
        CircuitBuilder::device()
            .h(3)
            .cx(3, 2)
            .cx(1, 2)
            .h(1)
            .h(2)
            .cx(1, 2)
            .h(1)
            .h(2)
            .cx(1, 2)
            .h(4)
            .cx(4, 2),
    )
}

/// Encoded cat state, cost (2, 2)
fn bell_standard() -> Vec<Instruction> {
    encoded_block(CircuitBuilder::device().h(3).cx(3, 4).h(1).cx(1, 2))
}

// ============================================================================
// Tests
// ============================================================================
