use log::{debug, info, trace};

use super::container::write_encoded;
use crate::error::Result;
use crate::huffman_coding::encode::encode_text;
use crate::huffman_coding::flatten::flatten_tree;
use crate::huffman_coding::tree_builder::tree_from_text;
use crate::huffman_coding::{Bit, EncodingTreeNode, Symbol};
use crate::tools::cli::HufOpts;
use crate::tools::files::{compressed_name, run_on_files};

/// Everything needed to restore the original text: the flattened tree and the message bits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedData {
    /// Pre-order tree shape, 0 = leaf, 1 = internal node
    pub tree_shape: Vec<Bit>,
    /// Leaf symbols in pre-order
    pub tree_leaves: Vec<Symbol>,
    /// The encoded message
    pub message_bits: Vec<Bit>,
}

impl EncodedData {
    /// Number of leaves the shape describes (its 0 bits).
    pub fn leaf_count_in_shape(&self) -> usize {
        self.tree_shape
            .iter()
            .filter(|&&bit| bit == Bit::Zero)
            .count()
    }

    /// Size of the aggregate in bits, counting 8 bits per leaf symbol.
    pub fn compressed_bits(&self) -> usize {
        self.tree_shape.len() + self.tree_leaves.len() * 8 + self.message_bits.len()
    }
}

/// Compress `text`: build the optimal tree for it, flatten the tree and encode the text.
/// Fails with InsufficientAlphabet if the text has fewer than two distinct symbols.
pub fn compress(text: &[Symbol]) -> Result<EncodedData> {
    let tree = tree_from_text(text)?;
    trace!("Encoding tree:\n{}", tree);
    compress_with_tree(&tree, text)
}

/// Encode `text` with a tree supplied by the caller and bundle it with the flattened tree.
pub fn compress_with_tree(tree: &EncodingTreeNode, text: &[Symbol]) -> Result<EncodedData> {
    let (tree_shape, tree_leaves) = flatten_tree(tree);
    let message_bits = encode_text(tree, text)?;
    let data = EncodedData {
        tree_shape,
        tree_leaves,
        message_bits,
    };

    if !text.is_empty() {
        debug!(
            "Compressed {} bytes into {} bits ({:.3} bits per symbol, tree uses {} bits).",
            text.len(),
            data.compressed_bits(),
            data.message_bits.len() as f64 / text.len() as f64,
            data.tree_shape.len() + data.tree_leaves.len() * 8
        );
    }
    Ok(data)
}

/// Compress `text` straight into the bytes of a .huf file.
pub fn compress_bytes(text: &[Symbol]) -> Result<Vec<u8>> {
    let data = compress(text)?;
    let mut out = Vec::with_capacity(data.compressed_bits() / 8 + 16);
    write_encoded(&data, &mut out)?;
    Ok(out)
}

/// Compress every file named in opts (or stdin to stdout if none are named).
pub fn compress_files(opts: &HufOpts) -> Result<()> {
    run_on_files(opts, compressed_name, |input| {
        info!("Compressing ...");
        let out = compress_bytes(input)?;
        if !input.is_empty() {
            info!(
                "Ratio {:.2}:1 ({:.2}% saved).",
                input.len() as f64 / out.len() as f64,
                100.0 * (1.0 - out.len() as f64 / input.len() as f64)
            );
        }
        Ok(out)
    })
}
