//! The huffman_coding module is the codec core: it builds the tree, turns the tree into codes,
//! encodes and decodes message bits, and flattens the tree so it can travel with the message.
//!
//! The pieces, leaf dependencies first:
//! - tree_builder: greedy forest merge of the symbol frequencies into an optimal tree.
//! - code_table: symbol -> bit string, read off the root-to-leaf paths.
//! - encode: text -> message bits using the code table.
//! - decode: message bits -> text by walking the tree one bit at a time.
//! - flatten: tree <-> (shape bits, leaf symbols) in pre-order.
//!
//! Everything here is a pure function of its input. Trees are built per call and dropped when
//! the call is done.
//!

pub mod bit;
pub mod code_table;
pub mod decode;
pub mod encode;
pub mod flatten;
pub mod node;
pub mod tree_builder;

/// An atomic unit of the input alphabet.
pub type Symbol = u8;

pub use bit::Bit;
pub use node::EncodingTreeNode;
