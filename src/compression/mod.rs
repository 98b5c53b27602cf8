//! The compression module ties the codec core together and connects it to files.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each byte value occurs in the input.
//! - Tree build: greedy merge of the frequencies into an optimal encoding tree.
//! - Flatten: the tree becomes pre-order shape bits plus its leaf symbols.
//! - Encode: every input byte is replaced by its code.
//!
//! The three results form the EncodedData aggregate, which the container module writes as a
//! .huf file.
//!
//! Decompression follows the inverse of the compression process.
//! - Rebuild the tree from the shape bits and the leaf symbols.
//! - Decode: walk the tree one message bit at a time, emitting a byte at every leaf.
//!

pub mod compress;
pub mod container;
pub mod decompress;
