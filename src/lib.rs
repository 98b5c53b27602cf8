//! Rust Huffman coder.
//!
//! Version 0.1.0
//!
//! Builds an optimal prefix code (a Huffman tree) from the byte frequencies of the input, uses it
//! to turn the input into a compact bit sequence, and inverts that transform exactly.
//!
//! The codec core works on plain byte slices and hands back an [`EncodedData`] aggregate: the
//! pre-order shape of the tree, the leaf symbols in pre-order, and the message bits. The tree
//! travels with the message, so decompression needs nothing but the aggregate.
//!
//! Basic usage of the library:
//!
//! ```
//! use huffman::{compress, decompress};
//!
//! let data = compress(b"STREETTEST").unwrap();
//! assert_eq!(decompress(&data).unwrap(), b"STREETTEST");
//! ```
//!
//! The `huf` binary wraps this in a small file format (see [`compression::container`]):
//!
//! `$> huf -z test.txt`
//!
//! This will compress the file and create the file test.txt.huf. `huf -d test.txt.huf` writes
//! the original data back out as unhuf.test.txt.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, EncodedData};
pub use compression::decompress::decompress;
pub use error::{HuffError, Result};
pub use huffman_coding::{Bit, EncodingTreeNode, Symbol};
