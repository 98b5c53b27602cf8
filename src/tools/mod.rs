//! The tools module provides the helper functions around the codec core.
//!
//! The tools are:
//! - cli: Command line interface for huf.
//! - files: Default file names, overwrite checks and the per-file processing loop.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod files;
pub mod freq_count;
