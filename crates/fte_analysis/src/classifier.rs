//! Measurement outcome classification
//!
//! Gantree: L4_Analysis → ResultClassifier
//!
//! Maps a raw histogram onto the four logical buckets (00, 01, 10, 11) plus a
//! count of detected errors. A bitstring that matches no expected pattern,
//! including one of the wrong length or with characters other than 0/1, is
//! a detected error rather than a failure.

use fte_core::{device, stats, Counts, QubitPair, Realization};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Encoded codewords per bucket, in register order (rightmost = qubit 0)
/// Gantree: CODEWORDS // 버킷별 코드워드 2개
pub const CODEWORDS: [[&str; 2]; stats::NUM_BUCKETS] = [
    ["00000", "11110"],
    ["01010", "10100"],
    ["10010", "01100"],
    ["11000", "00110"],
];

// ============================================================================
// ClassifiedOutcome
// ============================================================================

/// Bucket counts plus detected-error count of one histogram
/// Gantree: ClassifiedOutcome // 분류 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedOutcome {
    /// Counts for buckets 00, 01, 10, 11
    pub buckets: [u64; stats::NUM_BUCKETS],

    /// Outcomes matching no valid pattern
    pub errors: u64,
}

impl ClassifiedOutcome {
    /// Create from bucket counts and error count
    pub fn new(buckets: [u64; stats::NUM_BUCKETS], errors: u64) -> Self {
        Self { buckets, errors }
    }

    /// Outcomes that landed in a bucket
    pub fn total_valid(&self) -> u64 {
        self.buckets.iter().sum()
    }

    /// All outcomes; equals the histogram total
    pub fn total(&self) -> u64 {
        self.total_valid() + self.errors
    }

    /// Fraction of outcomes surviving post-selection; 0 when all are errors
    /// Gantree: post_selection_ratio(&self) -> f64 // 생존 비율
    pub fn post_selection_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.total_valid() as f64 / total as f64
    }

    /// Check whether any outcome landed in a bucket
    pub fn has_valid(&self) -> bool {
        self.total_valid() > 0
    }
}

// ============================================================================
// ResultClassifier
// ============================================================================

/// Decode rule for one program
/// Gantree: ResultClassifier // 결과 분류기
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultClassifier {
    realization: Realization,
    patterns: HashMap<String, usize>,
}

impl ResultClassifier {
    /// Bare rule: the pair's qubits give the bucket, all other qubits must
    /// read 0. With parity set the roles of the two qubits are exchanged,
    /// which swaps buckets 01 and 10.
    /// Gantree: bare(pair, parity) -> Self // bare 규칙
    pub fn bare(pair: QubitPair, parity: bool) -> Self {
        let (high, low) = if parity {
            (pair.second(), pair.first())
        } else {
            (pair.first(), pair.second())
        };

        let patterns = (0..stats::NUM_BUCKETS)
            .map(|bucket| {
                let mut ones = Vec::with_capacity(2);
                if bucket & 0b10 != 0 {
                    ones.push(high);
                }
                if bucket & 0b01 != 0 {
                    ones.push(low);
                }
                (pattern(&ones), bucket)
            })
            .collect();

        Self {
            realization: Realization::Bare,
            patterns,
        }
    }

    /// Encoded rule: two codewords per bucket
    /// Gantree: encoded() -> Self // encoded 규칙
    pub fn encoded() -> Self {
        let patterns = CODEWORDS
            .iter()
            .enumerate()
            .flat_map(|(bucket, words)| words.iter().map(move |w| (w.to_string(), bucket)))
            .collect();

        Self {
            realization: Realization::Encoded,
            patterns,
        }
    }

    /// Rule for a realization; `pair` and `parity` only matter for bare
    pub fn for_realization(realization: Realization, pair: QubitPair, parity: bool) -> Self {
        match realization {
            Realization::Bare => Self::bare(pair, parity),
            Realization::Encoded => Self::encoded(),
        }
    }

    /// Realization this rule decodes
    pub fn realization(&self) -> Realization {
        self.realization
    }

    /// Bucket of one bitstring, `None` for a detected error
    pub fn bucket_of(&self, bitstring: &str) -> Option<usize> {
        self.patterns.get(bitstring).copied()
    }

    /// Classify a histogram
    /// Gantree: classify(counts) -> ClassifiedOutcome // 분류
    pub fn classify(&self, counts: &Counts) -> ClassifiedOutcome {
        let mut outcome = ClassifiedOutcome::default();
        for (bitstring, &count) in counts {
            match self.bucket_of(bitstring) {
                Some(bucket) => outcome.buckets[bucket] += count,
                None => outcome.errors += count,
            }
        }

        debug!(
            "Classified {} histogram: buckets {:?}, errors {}",
            self.realization, outcome.buckets, outcome.errors
        );

        outcome
    }
}

/// Full-register bitstring with the given qubits set
fn pattern(ones: &[usize]) -> String {
    (0..device::NUM_QUBITS)
        .rev()
        .map(|q| if ones.contains(&q) { '1' } else { '0' })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_bare_patterns_pair_01() {
        let pair = QubitPair::new(0, 1).unwrap();
        let rule = ResultClassifier::bare(pair, false);

        assert_eq!(rule.bucket_of("00000"), Some(0));
        assert_eq!(rule.bucket_of("00010"), Some(1)); // second qubit set
        assert_eq!(rule.bucket_of("00001"), Some(2)); // first qubit set
        assert_eq!(rule.bucket_of("00011"), Some(3));
        assert_eq!(rule.bucket_of("00100"), None);
        assert_eq!(rule.bucket_of("0001"), None);
    }

    #[test]
    fn test_bare_parity_swaps_middle_buckets() {
        let pair = QubitPair::new(2, 4).unwrap();
        let plain = ResultClassifier::bare(pair, false);
        let swapped = ResultClassifier::bare(pair, true);

        // Qubit 4 (second) set
        assert_eq!(plain.bucket_of("10000"), Some(1));
        assert_eq!(swapped.bucket_of("10000"), Some(2));
        // Qubit 2 (first) set
        assert_eq!(plain.bucket_of("00100"), Some(2));
        assert_eq!(swapped.bucket_of("00100"), Some(1));
        // Buckets 0 and 3 do not move
        assert_eq!(swapped.bucket_of("00000"), Some(0));
        assert_eq!(swapped.bucket_of("10100"), Some(3));
    }

    #[test]
    fn test_encoded_codewords() {
        let rule = ResultClassifier::encoded();
        for (bucket, words) in CODEWORDS.iter().enumerate() {
            for w in words {
                assert_eq!(rule.bucket_of(w), Some(bucket));
            }
        }
        assert_eq!(rule.bucket_of("00001"), None);
        assert_eq!(rule.bucket_of("11111"), None);
        assert_eq!(rule.realization(), Realization::Encoded);
    }

    #[test]
    fn test_classify_conserves_total() {
        let rule = ResultClassifier::encoded();
        let histogram = counts(&[
            ("00000", 400),
            ("11110", 100),
            ("01010", 50),
            ("00110", 30),
            ("11111", 15),
            ("10101", 5),
        ]);

        let outcome = rule.classify(&histogram);
        assert_eq!(outcome.buckets, [500, 50, 0, 30]);
        assert_eq!(outcome.errors, 20);
        assert_eq!(outcome.total(), histogram.values().sum::<u64>());
        assert!((outcome.post_selection_ratio() - 580.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_errors() {
        let pair = QubitPair::new(0, 1).unwrap();
        let outcome = ResultClassifier::bare(pair, false).classify(&counts(&[("11100", 64)]));
        assert!(!outcome.has_valid());
        assert_eq!(outcome.errors, 64);
        assert_eq!(outcome.post_selection_ratio(), 0.0);
        assert_eq!(ClassifiedOutcome::default().post_selection_ratio(), 0.0);
    }

    #[test]
    fn test_malformed_bitstrings_are_errors() {
        let rule = ResultClassifier::for_realization(
            Realization::Bare,
            QubitPair::new(3, 0).unwrap(),
            false,
        );
        let outcome = rule.classify(&counts(&[("0000x", 3), ("01000", 7), ("", 1)]));
        assert_eq!(outcome.buckets, [0, 0, 7, 0]);
        assert_eq!(outcome.errors, 4);
    }
}
