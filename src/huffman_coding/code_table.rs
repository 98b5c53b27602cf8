use log::{error, trace};
use rustc_hash::FxHashMap;

use super::node::{show_symbol, EncodingTreeNode};
use super::{bit::bits_to_string, Bit, Symbol};
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;

/// Symbol -> code, where the code is the path from the root to the symbol's leaf.
/// No code is a prefix of another, since every code ends at a leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<Symbol, Vec<Bit>>,
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf.
    /// The root must be an internal node; a lone leaf has no path to encode with.
    pub fn from_tree(root: &EncodingTreeNode) -> Result<Self> {
        if root.is_leaf() {
            error!("Can't derive codes from a tree that is a single leaf.");
            return Err(HuffError::malformed("root of an encoding tree must be internal"));
        }
        let mut codes = FxHashMap::default();
        let mut path = Vec::with_capacity(root.height());
        collect_codes(root, &mut path, &mut codes);

        let table = Self { codes };
        for (symbol, code) in table.sorted_codes() {
            trace!("{:>6} -> {}", show_symbol(symbol), bits_to_string(code));
        }
        Ok(table)
    }

    /// The code for `symbol`, or None if the tree had no such leaf.
    pub fn code(&self, symbol: Symbol) -> Option<&[Bit]> {
        self.codes.get(&symbol).map(|code| code.as_slice())
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All (symbol, code) pairs, sorted by symbol.
    pub fn sorted_codes(&self) -> Vec<(Symbol, &[Bit])> {
        let mut pairs = self
            .codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_slice()))
            .collect::<Vec<_>>();
        pairs.sort_unstable_by_key(|&(symbol, _)| symbol);
        pairs
    }

    /// Total number of message bits the table produces for these frequencies:
    /// sum of frequency * code length. Symbols without a code are not counted.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, &count)| self.codes.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}

/// Recursively walk the tree, extending `path` with 0 for the zero child and 1 for the one
/// child. Each leaf gets a copy of the path that led to it.
fn collect_codes(
    node: &EncodingTreeNode,
    path: &mut Vec<Bit>,
    codes: &mut FxHashMap<Symbol, Vec<Bit>>,
) {
    match node {
        EncodingTreeNode::Internal { zero, one } => {
            path.push(Bit::Zero);
            collect_codes(zero, path, codes);
            path.pop();
            path.push(Bit::One);
            collect_codes(one, path, codes);
            path.pop();
        }
        EncodingTreeNode::Leaf(symbol) => {
            codes.insert(*symbol, path.clone());
        }
    };
}
