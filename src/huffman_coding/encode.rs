use log::{debug, error};

use super::code_table::CodeTable;
use super::node::{show_symbol, EncodingTreeNode};
use super::{Bit, Symbol};
use crate::error::{HuffError, Result};

/// Encode `text` with the codes read off `tree`.
/// Every symbol of the text must have a leaf in the tree.
pub fn encode_text(tree: &EncodingTreeNode, text: &[Symbol]) -> Result<Vec<Bit>> {
    let table = CodeTable::from_tree(tree)?;
    encode_with_table(&table, text)
}

/// Encode `text` with an existing code table, appending each symbol's code in order.
/// Fails fast on the first symbol that has no code.
pub fn encode_with_table(table: &CodeTable, text: &[Symbol]) -> Result<Vec<Bit>> {
    let mut bits = Vec::with_capacity(text.len() * 2);
    for (idx, &symbol) in text.iter().enumerate() {
        match table.code(symbol) {
            Some(code) => bits.extend_from_slice(code),
            None => {
                error!(
                    "Symbol {} at position {} is not in the code table.",
                    show_symbol(symbol),
                    idx
                );
                return Err(HuffError::SymbolNotEncodable { symbol });
            }
        }
    }
    debug!("Encoded {} symbols into {} bits.", text.len(), bits.len());
    Ok(bits)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::bit::bits_from_str;
    use crate::huffman_coding::tree_builder::tree_from_text;

    #[test]
    fn set_test() {
        let tree = tree_from_text(b"STREETTEST").unwrap();
        let bits = encode_text(&tree, b"SET").unwrap();
        assert_eq!(bits, bits_from_str("1 0 1 1 1 0").unwrap());
    }

    #[test]
    fn empty_text_test() {
        let tree = tree_from_text(b"STREETTEST").unwrap();
        assert!(encode_text(&tree, b"").unwrap().is_empty());
    }

    #[test]
    fn missing_symbol_test() {
        let tree = tree_from_text(b"STREETTEST").unwrap();
        let result = encode_text(&tree, b"TEXT");
        assert!(matches!(
            result,
            Err(HuffError::SymbolNotEncodable { symbol: b'X' })
        ));
    }

    #[test]
    fn leaf_tree_test() {
        let result = encode_text(&EncodingTreeNode::leaf(b'A'), b"AAA");
        assert!(matches!(result, Err(HuffError::MalformedTree(_))));
    }
}
