//! Instruction catalogs
//!
//! Gantree: L2_Catalog
//!
//! Read-only tables built once per process. Bare templates are written on
//! two slots (0 = logical qubit 1, 1 = logical qubit 2) and bound to a
//! physical pair at synthesis; encoded templates use fixed indices 0-4.

pub mod gates;
pub mod states;

pub use gates::{GateCatalog, GateSpec};
pub use states::{EncodedPreamble, StatePrepCatalog, StatePrepSpec};

use fte_core::{GateCount, Instruction, QubitPair};

/// Physical cost of an instruction block; fences and measurements are free
pub fn block_cost(block: &[Instruction]) -> GateCount {
    block.iter().fold(GateCount::ZERO, |mut acc, instruction| {
        if instruction.is_single_qubit() {
            acc.one_qubit += 1;
        } else if instruction.is_two_qubit() {
            acc.two_qubit += 1;
        }
        acc
    })
}

/// Bind a two-slot template to a physical pair
pub fn bind_to_pair(template: &[Instruction], pair: QubitPair) -> Vec<Instruction> {
    let slots = [pair.first(), pair.second()];
    template
        .iter()
        .map(|instruction| instruction.remap(|slot| slots[slot]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_cost() {
        let block = [
            Instruction::H(0),
            Instruction::Cx(0, 1),
            Instruction::Barrier(vec![0, 1]),
            Instruction::Measure(0),
        ];
        assert_eq!(block_cost(&block), GateCount::new(1, 1));
        assert_eq!(block_cost(&[]), GateCount::ZERO);
    }

    #[test]
    fn test_bind_to_pair() {
        let pair = QubitPair::new(3, 0).unwrap();
        let bound = bind_to_pair(&[Instruction::Cx(0, 1), Instruction::Z(1)], pair);
        assert_eq!(bound, vec![Instruction::Cx(3, 0), Instruction::Z(0)]);
    }
}
