//! Error types for the huffman codec and the file front end around it.

use thiserror::Error;

use crate::huffman_coding::Symbol;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffError>;

/// Everything that can go wrong while building, using or shipping a Huffman tree.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The input has fewer than two distinct symbols, so no binary code exists.
    #[error("need at least two distinct symbols to build a tree, found {distinct}")]
    InsufficientAlphabet { distinct: usize },

    /// The text contains a symbol the code table does not know (mismatched tree/text pair).
    #[error("symbol 0x{symbol:02x} has no code in this table")]
    SymbolNotEncodable { symbol: Symbol },

    /// The bit stream ran out in the middle of a code.
    #[error("bit stream ends inside a code starting at bit {bit_offset}")]
    TruncatedStream { bit_offset: usize },

    /// A shape/leaf pair that does not describe a valid encoding tree.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// Header or length fields of a compressed file are wrong.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// Command line options that can't be used together.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    /// Some of the files in a multi-file run could not be processed.
    #[error("{failed} of {total} files failed")]
    FilesFailed { failed: usize, total: usize },

    /// I/O error from the file front end.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffError {
    /// Create a malformed tree error.
    pub fn malformed(message: impl Into<String>) -> Self {
        HuffError::MalformedTree(message.into())
    }
}
