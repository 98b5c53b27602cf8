use std::fmt::{self, Display, Formatter};

use super::{Bit, Symbol};

/// A node of an encoding tree. Internal nodes own exactly two children, reached by bit 0 and
/// bit 1. Leaves hold exactly one symbol.
///
/// Equality is structural: same shape, same leaf symbols in the same positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodingTreeNode {
    Leaf(Symbol),
    Internal {
        zero: Box<EncodingTreeNode>,
        one: Box<EncodingTreeNode>,
    },
}

impl EncodingTreeNode {
    /// Create a new leaf
    pub fn leaf(symbol: Symbol) -> Self {
        EncodingTreeNode::Leaf(symbol)
    }

    /// Create a new internal node that takes ownership of both children
    pub fn internal(zero: EncodingTreeNode, one: EncodingTreeNode) -> Self {
        EncodingTreeNode::Internal {
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, EncodingTreeNode::Leaf(_))
    }

    /// The symbol of a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            EncodingTreeNode::Leaf(symbol) => Some(*symbol),
            EncodingTreeNode::Internal { .. } => None,
        }
    }

    /// The child reached by `bit`, None for leaves.
    pub fn child(&self, bit: Bit) -> Option<&EncodingTreeNode> {
        match (self, bit) {
            (EncodingTreeNode::Internal { zero, .. }, Bit::Zero) => Some(zero.as_ref()),
            (EncodingTreeNode::Internal { one, .. }, Bit::One) => Some(one.as_ref()),
            (EncodingTreeNode::Leaf(_), _) => None,
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            EncodingTreeNode::Leaf(_) => 1,
            EncodingTreeNode::Internal { zero, one } => zero.leaf_count() + one.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path. A lone leaf has height 0.
    pub fn height(&self) -> usize {
        match self {
            EncodingTreeNode::Leaf(_) => 0,
            EncodingTreeNode::Internal { zero, one } => 1 + zero.height().max(one.height()),
        }
    }
}

/// Printable form of a symbol for tree dumps and log lines.
pub fn show_symbol(symbol: Symbol) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{:02x}", symbol)
    }
}

/// Recursively write one line per node, indented by depth.
fn write_node(
    f: &mut Formatter<'_>,
    node: &EncodingTreeNode,
    depth: usize,
    label: &str,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        EncodingTreeNode::Leaf(symbol) => {
            writeln!(f, "{}{}-> Leaf: {}", indent, label, show_symbol(*symbol))
        }
        EncodingTreeNode::Internal { zero, one } => {
            writeln!(f, "{}{}-> Internal", indent, label)?;
            write_node(f, zero, depth + 1, "0")?;
            write_node(f, one, depth + 1, "1")
        }
    }
}

impl Display for EncodingTreeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0, "root")
    }
}
