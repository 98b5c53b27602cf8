//! The bitstream module forms the I/O subsystem for the .huf file format.
//!
//! Huffman codes do not line up with byte boundaries, so the tree shape, the leaves and the
//! message are all written as one continuous stream of bits. Only the very last byte of a file
//! is padded with zeros.
//!
//! This I/O subsystem is designed to interface with the container module. It is not intended for
//! more general use.
//!
pub mod bitreader;
pub mod bitwriter;
