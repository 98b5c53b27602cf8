//! Flatten a tree into (shape, leaves) and rebuild it again, so the tree can be stored in
//! front of the message it encodes.
//!
//! The shape is the pre-order walk of the tree: 1 for an internal node (followed by its zero
//! subtree, then its one subtree), 0 for a leaf. The leaves are the leaf symbols in the order
//! the walk meets them. The shape is self-delimiting: it ends when every internal node has
//! received both of its children.
//!

use log::{error, trace};

use super::node::{show_symbol, EncodingTreeNode};
use super::{Bit, Symbol};
use crate::error::{HuffError, Result};

/// Longest shape any byte tree can have: 256 leaves and 255 internal nodes.
pub const MAX_SHAPE_BITS: usize = 2 * 256 - 1;

/// Flatten the tree into its pre-order shape bits and leaf symbols.
pub fn flatten_tree(tree: &EncodingTreeNode) -> (Vec<Bit>, Vec<Symbol>) {
    let mut shape = Vec::with_capacity(MAX_SHAPE_BITS);
    let mut leaves = Vec::with_capacity(256);
    flatten_into(tree, &mut shape, &mut leaves);
    trace!("Flattened tree into {} shape bits and {} leaves.", shape.len(), leaves.len());
    (shape, leaves)
}

fn flatten_into(node: &EncodingTreeNode, shape: &mut Vec<Bit>, leaves: &mut Vec<Symbol>) {
    match node {
        EncodingTreeNode::Internal { zero, one } => {
            shape.push(Bit::One);
            flatten_into(zero, shape, leaves);
            flatten_into(one, shape, leaves);
        }
        EncodingTreeNode::Leaf(symbol) => {
            shape.push(Bit::Zero);
            leaves.push(*symbol);
        }
    }
}

/// Rebuild a tree from its shape bits and leaf symbols.
///
/// The first shape bit must mark an internal root. Both sequences must be used up exactly,
/// and no symbol may appear on two leaves. Anything else is a MalformedTree.
pub fn unflatten_tree(shape: &[Bit], leaves: &[Symbol]) -> Result<EncodingTreeNode> {
    // A byte tree can't be longer than this, and checking first keeps the recursion shallow.
    if shape.len() > MAX_SHAPE_BITS {
        return Err(malformed(format!(
            "shape of {} bits is longer than any byte tree",
            shape.len()
        )));
    }
    match shape.first() {
        None => return Err(malformed("empty shape".to_string())),
        Some(Bit::Zero) => return Err(malformed("root is marked as a leaf".to_string())),
        Some(Bit::One) => {}
    }

    let mut reader = TreeReader {
        shape: shape.iter(),
        leaves: leaves.iter(),
        seen: [false; 256],
    };
    // The root marker was checked above.
    reader.shape.next();
    let zero = reader.subtree()?;
    let one = reader.subtree()?;

    if reader.shape.len() > 0 {
        return Err(malformed(format!(
            "{} shape bits left over after the tree was complete",
            reader.shape.len()
        )));
    }
    if reader.leaves.len() > 0 {
        return Err(malformed(format!(
            "{} leaves left over after the tree was complete",
            reader.leaves.len()
        )));
    }
    Ok(EncodingTreeNode::internal(zero, one))
}

/// Log and build a MalformedTree error
fn malformed(message: String) -> HuffError {
    error!("Malformed tree: {}", message);
    HuffError::MalformedTree(message)
}

/// Cursor over the shape and leaves while a tree is rebuilt.
struct TreeReader<'a> {
    shape: std::slice::Iter<'a, Bit>,
    leaves: std::slice::Iter<'a, Symbol>,
    /// Symbols already placed on a leaf
    seen: [bool; 256],
}

impl TreeReader<'_> {
    /// Read one subtree in pre-order: a 0 is a leaf taking the next symbol, a 1 is an internal
    /// node followed by its zero and one subtrees.
    fn subtree(&mut self) -> Result<EncodingTreeNode> {
        match self.shape.next() {
            None => Err(malformed(
                "shape ended before the tree was complete".to_string(),
            )),
            Some(Bit::Zero) => {
                let symbol = *self
                    .leaves
                    .next()
                    .ok_or_else(|| malformed("ran out of leaves".to_string()))?;
                if self.seen[symbol as usize] {
                    return Err(malformed(format!(
                        "symbol {} appears on two leaves",
                        show_symbol(symbol)
                    )));
                }
                self.seen[symbol as usize] = true;
                Ok(EncodingTreeNode::leaf(symbol))
            }
            Some(Bit::One) => {
                let zero = self.subtree()?;
                let one = self.subtree()?;
                Ok(EncodingTreeNode::internal(zero, one))
            }
        }
    }
}
