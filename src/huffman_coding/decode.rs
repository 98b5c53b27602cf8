use log::{debug, error};

use super::node::EncodingTreeNode;
use super::{Bit, Symbol};
use crate::error::{HuffError, Result};

/// Decode message bits by walking `tree`: start at the root, take the zero child on 0 and the
/// one child on 1, and emit the symbol whenever a leaf is reached (then start over at the root).
///
/// The bits must end exactly on a leaf. Bits that stop partway down the tree are reported as
/// TruncatedStream rather than returning partial output.
pub fn decode_text(tree: &EncodingTreeNode, bits: &[Bit]) -> Result<Vec<Symbol>> {
    if tree.is_leaf() {
        error!("Can't decode with a tree that is a single leaf.");
        return Err(HuffError::malformed("root of an encoding tree must be internal"));
    }

    let mut output = Vec::with_capacity(bits.len() / 2);
    let mut node = tree;
    // Where the code currently being walked started
    let mut code_start = 0;

    for (idx, &bit) in bits.iter().enumerate() {
        if let EncodingTreeNode::Internal { zero, one } = node {
            node = match bit {
                Bit::Zero => zero.as_ref(),
                Bit::One => one.as_ref(),
            };
        }
        if let EncodingTreeNode::Leaf(symbol) = node {
            output.push(*symbol);
            node = tree;
            code_start = idx + 1;
        }
    }

    if code_start != bits.len() {
        error!(
            "Bit stream of {} bits ends inside a code starting at bit {}.",
            bits.len(),
            code_start
        );
        return Err(HuffError::TruncatedStream {
            bit_offset: code_start,
        });
    }
    debug!("Decoded {} bits into {} symbols.", bits.len(), output.len());
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::bit::bits_from_str;
    use crate::huffman_coding::encode::encode_text;
    use crate::huffman_coding::tree_builder::tree_from_text;

    fn example_tree() -> EncodingTreeNode {
        EncodingTreeNode::internal(
            EncodingTreeNode::leaf(b'T'),
            EncodingTreeNode::internal(
                EncodingTreeNode::internal(
                    EncodingTreeNode::leaf(b'R'),
                    EncodingTreeNode::leaf(b'S'),
                ),
                EncodingTreeNode::leaf(b'E'),
            ),
        )
    }

    #[test]
    fn tress_test() {
        let bits = bits_from_str("0 1 0 0 1 1 1 0 1 1 0 1").unwrap();
        assert_eq!(decode_text(&example_tree(), &bits).unwrap(), b"TRESS");
    }

    #[test]
    fn set_test() {
        let tree = tree_from_text(b"STREETTEST").unwrap();
        let bits = bits_from_str("101110").unwrap();
        assert_eq!(decode_text(&tree, &bits).unwrap(), b"SET");
    }

    #[test]
    fn empty_bits_test() {
        assert!(decode_text(&example_tree(), &[]).unwrap().is_empty());
    }

    #[test]
    fn truncated_test() {
        // "T" then the first two bits of "S"
        let bits = bits_from_str("0 1 0").unwrap();
        let result = decode_text(&example_tree(), &bits);
        assert!(matches!(
            result,
            Err(HuffError::TruncatedStream { bit_offset: 1 })
        ));
    }

    #[test]
    fn leaf_tree_test() {
        let result = decode_text(&EncodingTreeNode::leaf(b'A'), &[Bit::Zero]);
        assert!(matches!(result, Err(HuffError::MalformedTree(_))));
    }

    #[test]
    fn round_trip_test() {
        let text = b"It was the best of times, it was the worst of times.";
        let tree = tree_from_text(text).unwrap();
        let bits = encode_text(&tree, text).unwrap();
        assert_eq!(decode_text(&tree, &bits).unwrap(), text.to_vec());
    }
}
