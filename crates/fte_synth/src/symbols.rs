//! Logical symbols for FTE
//!
//! Gantree: L2_Catalog → Symbols
//!
//! The closed alphabets of the experiment: logical gate symbols, input-state
//! names and `|00>` encoding versions.

use fte_core::{FteError, FteResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// GateSymbol
// ============================================================================

/// Logical gate symbol
/// Gantree: GateSymbol // X1|X2|Z1|Z2|HHS|CZ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateSymbol {
    /// Pauli-X on logical qubit 1
    X1,
    /// Pauli-X on logical qubit 2
    X2,
    /// Pauli-Z on logical qubit 1
    Z1,
    /// Pauli-Z on logical qubit 2
    Z2,
    /// Hadamard on both qubits followed by a logical swap
    #[serde(rename = "HHS")]
    Hhs,
    /// Controlled-Z
    #[serde(rename = "CZ")]
    Cz,
}

impl GateSymbol {
    /// All symbols in catalog order
    pub const ALL: [GateSymbol; 6] = [
        GateSymbol::X1,
        GateSymbol::X2,
        GateSymbol::Z1,
        GateSymbol::Z2,
        GateSymbol::Hhs,
        GateSymbol::Cz,
    ];

    /// Position in catalog order
    pub fn index(&self) -> usize {
        match self {
            GateSymbol::X1 => 0,
            GateSymbol::X2 => 1,
            GateSymbol::Z1 => 2,
            GateSymbol::Z2 => 3,
            GateSymbol::Hhs => 4,
            GateSymbol::Cz => 5,
        }
    }

    /// Symbol text
    pub fn as_str(&self) -> &'static str {
        match self {
            GateSymbol::X1 => "X1",
            GateSymbol::X2 => "X2",
            GateSymbol::Z1 => "Z1",
            GateSymbol::Z2 => "Z2",
            GateSymbol::Hhs => "HHS",
            GateSymbol::Cz => "CZ",
        }
    }

    /// Whether the symbol flips the role-swap parity
    pub fn toggles_parity(&self) -> bool {
        matches!(self, GateSymbol::Hhs)
    }

    /// Symbol after the logical roles of the two qubits are exchanged
    /// Gantree: role_swapped(&self) -> Self // X1↔X2, Z1↔Z2
    pub fn role_swapped(&self) -> GateSymbol {
        match self {
            GateSymbol::X1 => GateSymbol::X2,
            GateSymbol::X2 => GateSymbol::X1,
            GateSymbol::Z1 => GateSymbol::Z2,
            GateSymbol::Z2 => GateSymbol::Z1,
            other => *other,
        }
    }

    /// Symbol to apply on the bare pair under the given parity
    pub fn under_parity(&self, parity: bool) -> GateSymbol {
        if parity {
            self.role_swapped()
        } else {
            *self
        }
    }
}

impl FromStr for GateSymbol {
    type Err = FteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateSymbol::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| FteError::UnknownGate(s.to_string()))
    }
}

impl fmt::Display for GateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// InputState
// ============================================================================

/// Logical input state of a test case
/// Gantree: InputState // |00>|0+>|00>+|11>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputState {
    /// |00>
    #[serde(rename = "|00>")]
    Zero,
    /// |0+>
    #[serde(rename = "|0+>")]
    ZeroPlus,
    /// |00>+|11>
    #[serde(rename = "|00>+|11>")]
    Bell,
}

impl InputState {
    /// All input states
    pub const ALL: [InputState; 3] = [InputState::Zero, InputState::ZeroPlus, InputState::Bell];

    /// State name as written in program labels
    pub fn as_str(&self) -> &'static str {
        match self {
            InputState::Zero => "|00>",
            InputState::ZeroPlus => "|0+>",
            InputState::Bell => "|00>+|11>",
        }
    }

    /// Encoding versions with an encoded preparation for this state
    pub fn encoding_versions(&self) -> &'static [EncodingVersion] {
        match self {
            InputState::Zero => &EncodingVersion::ALL,
            InputState::ZeroPlus | InputState::Bell => &[EncodingVersion::Standard],
        }
    }

    /// Check whether an encoding version is available
    pub fn supports(&self, version: EncodingVersion) -> bool {
        self.encoding_versions().contains(&version)
    }

    /// Fail with a configuration error if the version is not available
    pub fn require(&self, version: EncodingVersion) -> FteResult<()> {
        if self.supports(version) {
            Ok(())
        } else {
            Err(FteError::UnsupportedEncodingVersion {
                state: self.as_str().to_string(),
                version: version.to_string(),
            })
        }
    }
}

impl FromStr for InputState {
    type Err = FteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| FteError::UnknownState(s.to_string()))
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// EncodingVersion
// ============================================================================

/// Encoded `|00>` preparation variant
/// Gantree: EncodingVersion // Standard|FTv1|FTv2|NFTv1|NFTv2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingVersion {
    /// Fixed preparation, available for every input state
    #[default]
    Standard,
    /// Fault-tolerant routing, version 1
    #[serde(rename = "FTv1")]
    FtV1,
    /// Fault-tolerant routing, version 2
    #[serde(rename = "FTv2")]
    FtV2,
    /// Non-fault-tolerant routing, version 1
    #[serde(rename = "NFTv1")]
    NftV1,
    /// Non-fault-tolerant routing, version 2
    #[serde(rename = "NFTv2")]
    NftV2,
}

impl EncodingVersion {
    /// All versions
    pub const ALL: [EncodingVersion; 5] = [
        EncodingVersion::Standard,
        EncodingVersion::FtV1,
        EncodingVersion::FtV2,
        EncodingVersion::NftV1,
        EncodingVersion::NftV2,
    ];

    /// Version name
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingVersion::Standard => "Standard",
            EncodingVersion::FtV1 => "FTv1",
            EncodingVersion::FtV2 => "FTv2",
            EncodingVersion::NftV1 => "NFTv1",
            EncodingVersion::NftV2 => "NFTv2",
        }
    }

    /// Suffix appended to encoded program names; empty for `Standard`
    pub fn name_suffix(&self) -> &'static str {
        match self {
            EncodingVersion::Standard => "",
            other => other.as_str(),
        }
    }
}

impl FromStr for EncodingVersion {
    type Err = FteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodingVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FteError::UnknownEncodingVersion(s.to_string()))
    }
}

impl fmt::Display for EncodingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_symbol_parse() {
        assert_eq!("HHS".parse::<GateSymbol>().unwrap(), GateSymbol::Hhs);
        assert_eq!("Z2".parse::<GateSymbol>().unwrap(), GateSymbol::Z2);
        assert_eq!(
            "Y1".parse::<GateSymbol>(),
            Err(FteError::UnknownGate("Y1".into()))
        );
        for (i, g) in GateSymbol::ALL.iter().enumerate() {
            assert_eq!(g.index(), i);
        }
    }

    #[test]
    fn test_role_swap() {
        assert_eq!(GateSymbol::X1.role_swapped(), GateSymbol::X2);
        assert_eq!(GateSymbol::Z2.role_swapped(), GateSymbol::Z1);
        assert_eq!(GateSymbol::Hhs.role_swapped(), GateSymbol::Hhs);
        assert_eq!(GateSymbol::Cz.under_parity(true), GateSymbol::Cz);
        assert_eq!(GateSymbol::X1.under_parity(false), GateSymbol::X1);
        assert!(GateSymbol::Hhs.toggles_parity());
        assert!(!GateSymbol::Cz.toggles_parity());
    }

    #[test]
    fn test_input_state_parse() {
        assert_eq!("|00>+|11>".parse::<InputState>().unwrap(), InputState::Bell);
        assert!(matches!(
            "|11>".parse::<InputState>(),
            Err(FteError::UnknownState(_))
        ));
    }

    #[test]
    fn test_versions_per_state() {
        assert_eq!(InputState::Zero.encoding_versions().len(), 5);
        assert!(InputState::ZeroPlus.supports(EncodingVersion::Standard));
        assert!(!InputState::Bell.supports(EncodingVersion::FtV1));
        assert!(matches!(
            InputState::ZeroPlus.require(EncodingVersion::NftV2),
            Err(FteError::UnsupportedEncodingVersion { .. })
        ));
    }

    #[test]
    fn test_encoding_version_names() {
        assert_eq!("ftv2".parse::<EncodingVersion>().unwrap(), EncodingVersion::FtV2);
        assert_eq!(EncodingVersion::Standard.name_suffix(), "");
        assert_eq!(EncodingVersion::NftV1.name_suffix(), "NFTv1");
        assert!("v3".parse::<EncodingVersion>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&GateSymbol::Hhs).unwrap(), "\"HHS\"");
        assert_eq!(serde_json::to_string(&InputState::ZeroPlus).unwrap(), "\"|0+>\"");
        let v: EncodingVersion = serde_json::from_str("\"NFTv2\"").unwrap();
        assert_eq!(v, EncodingVersion::NftV2);
    }
}
