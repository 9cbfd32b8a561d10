//! Gate catalog
//!
//! Gantree: L2_Catalog → GateCatalog
//!
//! Logical gate symbol → bare and encoded instruction templates.

use super::{bind_to_pair, block_cost};
use crate::symbols::GateSymbol;
use fte_core::{GateCount, Instruction, QubitPair};
use std::sync::OnceLock;

/// Templates and cost of one logical gate
/// Gantree: GateSpec // 게이트 템플릿
#[derive(Debug, Clone, PartialEq)]
pub struct GateSpec {
    symbol: GateSymbol,
    bare_variants: Vec<Vec<Instruction>>,
    bare_cost: GateCount,
    encoded_variants: Vec<Vec<Instruction>>,
    encoded_cost: GateCount,
}

impl GateSpec {
    /// Create a spec; the cost of each realization is taken from its first
    /// variant, and every variant must match it
    pub fn new(
        symbol: GateSymbol,
        bare_variants: Vec<Vec<Instruction>>,
        encoded_variants: Vec<Vec<Instruction>>,
    ) -> Self {
        let bare_cost = bare_variants
            .first()
            .map(|v| block_cost(v))
            .unwrap_or_default();
        let encoded_cost = encoded_variants
            .first()
            .map(|v| block_cost(v))
            .unwrap_or_default();

        debug_assert!(bare_variants.iter().all(|v| block_cost(v) == bare_cost));
        debug_assert!(encoded_variants.iter().all(|v| block_cost(v) == encoded_cost));

        Self {
            symbol,
            bare_variants,
            bare_cost,
            encoded_variants,
            encoded_cost,
        }
    }

    /// Gate symbol
    pub fn symbol(&self) -> GateSymbol {
        self.symbol
    }

    /// Bare templates on slots 0/1
    pub fn bare_variants(&self) -> &[Vec<Instruction>] {
        &self.bare_variants
    }

    /// Encoded templates on fixed indices
    pub fn encoded_variants(&self) -> &[Vec<Instruction>] {
        &self.encoded_variants
    }

    /// Cost of one bare application
    pub fn bare_cost(&self) -> GateCount {
        self.bare_cost
    }

    /// Cost of one encoded application
    pub fn encoded_cost(&self) -> GateCount {
        self.encoded_cost
    }

    /// Bare variant `index` bound to a physical pair
    pub fn bind_bare(&self, index: usize, pair: QubitPair) -> Option<Vec<Instruction>> {
        self.bare_variants
            .get(index)
            .map(|template| bind_to_pair(template, pair))
    }
}

/// Process-wide gate table
/// Gantree: GateCatalog // 게이트 카탈로그
#[derive(Debug, Clone, PartialEq)]
pub struct GateCatalog {
    /// Indexed by `GateSymbol::index`
    specs: Vec<GateSpec>,
}

impl GateCatalog {
    /// Build the catalog
    /// Gantree: new() -> Self // 카탈로그 구성
    pub fn new() -> Self {
        use GateSymbol::*;
        use Instruction::{Cx, H, S, X, Z};

        let specs = vec![
            GateSpec::new(
                X1,
                vec![vec![X(0)]],
                vec![vec![X(1), X(4)], vec![X(2), X(3)]],
            ),
            GateSpec::new(
                X2,
                vec![vec![X(1)]],
                vec![vec![X(1), X(3)], vec![X(2), X(4)]],
            ),
            GateSpec::new(
                Z1,
                vec![vec![Z(0)]],
                vec![vec![Z(1), Z(3)], vec![Z(2), Z(4)]],
            ),
            GateSpec::new(
                Z2,
                vec![vec![Z(1)]],
                vec![vec![Z(1), Z(4)], vec![Z(2), Z(3)]],
            ),
            GateSpec::new(
                Hhs,
                vec![vec![H(0), H(1)]],
                vec![vec![H(1), H(2), H(3), H(4)]],
            ),
            // Bare CZ is a CNOT conjugated by Hadamards on the target;
            // transversal S realizes it on the code.
            GateSpec::new(
                Cz,
                vec![vec![H(1), Cx(0, 1), H(1)]],
                vec![vec![S(1), S(2), S(3), S(4)]],
            ),
        ];

        Self { specs }
    }

    /// Shared catalog, built on first use
    pub fn standard() -> &'static GateCatalog {
        static CATALOG: OnceLock<GateCatalog> = OnceLock::new();
        CATALOG.get_or_init(GateCatalog::new)
    }

    /// Look up a gate
    /// Gantree: get(symbol) -> &GateSpec // 조회
    pub fn get(&self, symbol: GateSymbol) -> &GateSpec {
        &self.specs[symbol.index()]
    }

    /// Iterate over all specs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &GateSpec> {
        self.specs.iter()
    }
}

impl Default for GateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let catalog = GateCatalog::new();
        for symbol in GateSymbol::ALL {
            assert_eq!(catalog.get(symbol).symbol(), symbol);
        }
    }

    #[test]
    fn test_costs_match_reference_table() {
        let catalog = GateCatalog::standard();
        let bare_1q: Vec<usize> = catalog.iter().map(|s| s.bare_cost().one_qubit).collect();
        let bare_2q: Vec<usize> = catalog.iter().map(|s| s.bare_cost().two_qubit).collect();
        let enc_1q: Vec<usize> = catalog.iter().map(|s| s.encoded_cost().one_qubit).collect();
        let enc_2q: Vec<usize> = catalog.iter().map(|s| s.encoded_cost().two_qubit).collect();

        assert_eq!(bare_1q, vec![1, 1, 1, 1, 2, 2]);
        assert_eq!(bare_2q, vec![0, 0, 0, 0, 0, 1]);
        assert_eq!(enc_1q, vec![2, 2, 2, 2, 4, 4]);
        assert_eq!(enc_2q, vec![0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_variants_are_uniform_in_cost() {
        for spec in GateCatalog::standard().iter() {
            assert!(!spec.bare_variants().is_empty());
            assert!(!spec.encoded_variants().is_empty());
            for v in spec.encoded_variants() {
                assert_eq!(block_cost(v), spec.encoded_cost());
            }
        }
    }

    #[test]
    fn test_bind_bare() {
        let pair = QubitPair::new(2, 4).unwrap();
        let cz = GateCatalog::standard().get(GateSymbol::Cz);
        assert_eq!(
            cz.bind_bare(0, pair).unwrap(),
            vec![Instruction::H(4), Instruction::Cx(2, 4), Instruction::H(4)]
        );
        assert!(cz.bind_bare(1, pair).is_none());

        let z1 = GateCatalog::standard().get(GateSymbol::Z1);
        assert_eq!(z1.bind_bare(0, pair).unwrap(), vec![Instruction::Z(2)]);
    }

    #[test]
    fn test_encoded_x1_variants() {
        let x1 = GateCatalog::standard().get(GateSymbol::X1);
        assert_eq!(x1.encoded_variants().len(), 2);
        assert_eq!(
            x1.encoded_variants()[0],
            vec![Instruction::X(1), Instruction::X(4)]
        );
        assert_eq!(
            x1.encoded_variants()[1],
            vec![Instruction::X(2), Instruction::X(3)]
        );
    }
}
