//! Core types for FTE
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and validated wrapper types shared by synthesis and analysis.

use crate::constants::{device, stats};
use crate::error::{FteError, FteResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ============================================================================
// Type Aliases
// ============================================================================

/// Physical qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

/// Distribution over the four logical outcome buckets
/// Gantree: Distribution // [f64; 4]
pub type Distribution = [f64; stats::NUM_BUCKETS];

/// Validate an ideal distribution: non-negative, finite, sums to 1
pub fn validate_distribution(dist: &Distribution) -> FteResult<()> {
    if let Some(p) = dist.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(FteError::InvalidDistribution(format!(
            "entry {} is negative or not finite",
            p
        )));
    }
    let sum: f64 = dist.iter().sum();
    if (sum - 1.0).abs() > stats::DISTRIBUTION_TOLERANCE {
        return Err(FteError::InvalidDistribution(format!(
            "entries sum to {}, expected 1",
            sum
        )));
    }
    Ok(())
}

// ============================================================================
// Realization
// ============================================================================

/// Which of the two programs of a test case
/// Gantree: Realization // bare | encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realization {
    /// Two unprotected physical qubits
    Bare,
    /// 5-qubit error-detecting code
    Encoded,
}

impl Realization {
    /// Both realizations, bare first
    pub const ALL: [Realization; 2] = [Realization::Bare, Realization::Encoded];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Realization::Bare => "bare",
            Realization::Encoded => "encoded",
        }
    }
}

impl fmt::Display for Realization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// QubitPair (Validated Wrapper)
// ============================================================================

/// Two distinct physical qubits carrying the bare realization
/// Gantree: QubitPair // 물리 큐비트 쌍
///
/// The first qubit carries logical qubit 1, the second logical qubit 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct QubitPair {
    first: QubitId,
    second: QubitId,
}

impl QubitPair {
    /// Create a new pair with validation
    /// Gantree: new(a,b) -> Result<Self> // 생성+검증
    pub fn new(first: QubitId, second: QubitId) -> FteResult<Self> {
        for qubit in [first, second] {
            if qubit > device::MAX_QUBIT {
                return Err(FteError::QubitOutOfRange {
                    qubit,
                    max: device::MAX_QUBIT,
                });
            }
        }
        if first == second {
            return Err(FteError::InvalidQubitPair { first, second });
        }
        Ok(Self { first, second })
    }

    /// Physical qubit of logical qubit 1
    #[inline]
    pub fn first(&self) -> QubitId {
        self.first
    }

    /// Physical qubit of logical qubit 2
    #[inline]
    pub fn second(&self) -> QubitId {
        self.second
    }

    /// Check whether a physical qubit belongs to the pair
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.first == qubit || self.second == qubit
    }

    /// All ordered pairs of distinct qubits on the device
    pub fn all() -> Vec<Self> {
        let mut pairs = Vec::new();
        for first in 0..device::NUM_QUBITS {
            for second in 0..device::NUM_QUBITS {
                if first != second {
                    pairs.push(Self { first, second });
                }
            }
        }
        pairs
    }
}

impl Default for QubitPair {
    /// Qubits 0 and 1
    fn default() -> Self {
        Self { first: 0, second: 1 }
    }
}

impl TryFrom<(usize, usize)> for QubitPair {
    type Error = FteError;

    fn try_from((first, second): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(first, second)
    }
}

impl From<QubitPair> for (usize, usize) {
    fn from(pair: QubitPair) -> Self {
        (pair.first, pair.second)
    }
}

impl fmt::Display for QubitPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.first, self.second)
    }
}

// ============================================================================
// GateCount
// ============================================================================

/// Physical gate cost: (1-qubit, 2-qubit)
/// Gantree: GateCount // 게이트 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateCount {
    /// Single-qubit gates
    pub one_qubit: usize,

    /// Two-qubit gates
    pub two_qubit: usize,
}

impl GateCount {
    /// Create a gate count
    pub const fn new(one_qubit: usize, two_qubit: usize) -> Self {
        Self {
            one_qubit,
            two_qubit,
        }
    }

    /// No gates
    pub const ZERO: Self = Self::new(0, 0);

    /// Total number of physical gates
    pub fn total(&self) -> usize {
        self.one_qubit + self.two_qubit
    }
}

impl Add for GateCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.one_qubit + rhs.one_qubit, self.two_qubit + rhs.two_qubit)
    }
}

impl AddAssign for GateCount {
    fn add_assign(&mut self, rhs: Self) {
        self.one_qubit += rhs.one_qubit;
        self.two_qubit += rhs.two_qubit;
    }
}

impl Sum for GateCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, c| acc + c)
    }
}

impl From<(usize, usize)> for GateCount {
    fn from((one_qubit, two_qubit): (usize, usize)) -> Self {
        Self::new(one_qubit, two_qubit)
    }
}

impl fmt::Display for GateCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.one_qubit, self.two_qubit)
    }
}

// ============================================================================
// Tests
// ============================================================================
