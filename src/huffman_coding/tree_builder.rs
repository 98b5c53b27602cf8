//! Builds the encoding tree from symbol frequencies.
//!
//! This is the classic greedy construction: start with a forest of one leaf per symbol, then
//! keep merging the two lightest trees until one tree is left. The resulting tree minimizes
//! the total weighted code length (sum of frequency * code length) over all prefix codes.
//!
//! Tie-breaking decides the exact bits, so it is fixed here:
//! - leaves are seeded in ascending symbol order, and every tree put into the forest (seeded
//!   leaves and merged nodes alike) gets the next sequence number.
//! - among trees of equal weight, the one with the highest sequence number (the most recently
//!   inserted) is taken first.
//! - the first tree taken becomes the zero child, the second the one child.
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, error, trace};

use super::node::{show_symbol, EncodingTreeNode};
use super::Symbol;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::{freqs, FrequencyTable};

/// A tree waiting in the forest, with its combined weight and insertion sequence.
#[derive(Debug)]
struct Tree {
    weight: u64,
    seq: usize,
    node: EncodingTreeNode,
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for Tree {}

impl PartialOrd for Tree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tree {
    /// BinaryHeap pops the greatest element, so sort by decreasing weight, then by increasing
    /// sequence number. The lightest, most recently inserted tree comes out first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Build an optimal encoding tree from a frequency table.
/// Fails with InsufficientAlphabet if there are fewer than two distinct symbols.
pub fn build_huffman_tree(frequencies: &FrequencyTable) -> Result<EncodingTreeNode> {
    if frequencies.len() < 2 {
        error!(
            "Can't build a tree from {} distinct symbol(s).",
            frequencies.len()
        );
        return Err(HuffError::InsufficientAlphabet {
            distinct: frequencies.len(),
        });
    }

    // Seed in symbol order so the result does not depend on hash map iteration order.
    let mut symbols = frequencies
        .iter()
        .map(|(&symbol, &weight)| (symbol, weight))
        .collect::<Vec<(Symbol, u64)>>();
    symbols.sort_unstable_by_key(|&(symbol, _)| symbol);

    let mut forest = BinaryHeap::with_capacity(symbols.len());
    let mut seq = 0;
    for (symbol, weight) in symbols {
        trace!("Seeding leaf {} with weight {}", show_symbol(symbol), weight);
        forest.push(Tree {
            weight,
            seq,
            node: EncodingTreeNode::leaf(symbol),
        });
        seq += 1;
    }

    // Pare the forest down to one single tree.
    while forest.len() > 1 {
        if let (Some(zero), Some(one)) = (forest.pop(), forest.pop()) {
            forest.push(Tree {
                weight: zero.weight + one.weight,
                seq,
                node: EncodingTreeNode::internal(zero.node, one.node),
            });
            seq += 1;
        }
    }

    let root = forest
        .pop()
        .map(|tree| tree.node)
        .ok_or(HuffError::InsufficientAlphabet { distinct: 0 })?;
    debug!(
        "Built tree over {} symbols, height {}.",
        frequencies.len(),
        root.height()
    );
    Ok(root)
}

/// Count the symbols of `text` and build the tree for them.
pub fn tree_from_text(text: &[Symbol]) -> Result<EncodingTreeNode> {
    build_huffman_tree(&freqs(text))
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf(symbol: u8) -> EncodingTreeNode {
        EncodingTreeNode::leaf(symbol)
    }

    #[test]
    fn streettest_test() {
        // T=4, E=3, S=2, R=1. R and S merge first into a 3, which ties with E and wins
        // because it was inserted last.
        let expected = EncodingTreeNode::internal(
            leaf(b'T'),
            EncodingTreeNode::internal(EncodingTreeNode::internal(leaf(b'R'), leaf(b'S')), leaf(b'E')),
        );
        assert_eq!(tree_from_text(b"STREETTEST").unwrap(), expected);
    }

    #[test]
    fn equal_weight_leaves_test() {
        // Both weigh 1: B was seeded after A, so it is taken first and lands on the zero side.
        let expected = EncodingTreeNode::internal(leaf(b'B'), leaf(b'A'));
        assert_eq!(tree_from_text(b"AB").unwrap(), expected);
        assert_eq!(tree_from_text(b"BA").unwrap(), expected);
    }

    #[test]
    fn skewed_test() {
        let tree = tree_from_text(b"ABBCCCCDDDDDDDDEEEEEEEEEEEEEEEE").unwrap();
        assert_eq!(tree.height(), 4);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.child(crate::huffman_coding::Bit::One), Some(&leaf(b'E')));
    }

    #[test]
    fn single_symbol_test() {
        let result = tree_from_text(b"AAAA");
        assert!(matches!(
            result,
            Err(HuffError::InsufficientAlphabet { distinct: 1 })
        ));
    }

    #[test]
    fn empty_test() {
        let result = tree_from_text(b"");
        assert!(matches!(
            result,
            Err(HuffError::InsufficientAlphabet { distinct: 0 })
        ));
    }

    #[test]
    fn deterministic_test() {
        let text = b"the quick brown fox jumps over the lazy dog";
        let first = tree_from_text(text).unwrap();
        for _ in 0..10 {
            assert_eq!(tree_from_text(text).unwrap(), first);
        }
    }

    #[test]
    fn full_alphabet_test() {
        let data = (0..=255_u8).collect::<Vec<u8>>();
        let tree = tree_from_text(&data).unwrap();
        // 256 equal weights make a perfectly balanced tree.
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.height(), 8);
    }
}
