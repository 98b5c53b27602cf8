use std::fs;

use log::{debug, error, info, trace};

use super::compress::EncodedData;
use super::container::read_all_encoded;
use crate::error::{HuffError, Result};
use crate::huffman_coding::decode::decode_text;
use crate::huffman_coding::flatten::unflatten_tree;
use crate::huffman_coding::Symbol;
use crate::tools::cli::HufOpts;
use crate::tools::files::{decompressed_name, run_on_files};

/// Rebuild the tree stored in `data` and decode its message bits back to the original text.
pub fn decompress(data: &EncodedData) -> Result<Vec<Symbol>> {
    let tree = unflatten_tree(&data.tree_shape, &data.tree_leaves)?;
    trace!("Decoding tree:\n{}", tree);
    decode_text(&tree, &data.message_bits)
}

/// Decompress the bytes of a .huf file. Several .huf files written back to back decompress to
/// their contents in order.
pub fn decompress_bytes(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    for data in read_all_encoded(compressed)? {
        output.extend(decompress(&data)?);
    }
    Ok(output)
}

/// Decompress every file named in opts (or stdin to stdout if none are named).
pub fn decompress_files(opts: &HufOpts) -> Result<()> {
    run_on_files(opts, decompressed_name, |input| {
        info!("Decompressing ...");
        decompress_bytes(input)
    })
}

/// Check that every file named in opts decompresses cleanly. Nothing is written. A bad file
/// is reported and counted, and the remaining files are still checked.
pub fn test_files(opts: &HufOpts) -> Result<()> {
    let mut failed = 0;
    for name in &opts.files {
        match test_file(name) {
            Ok(size) => info!("{}: ok ({} bytes).", name, size),
            Err(e) => {
                error!("{}: {}", name, e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(HuffError::FilesFailed {
            failed,
            total: opts.files.len(),
        });
    }
    Ok(())
}

/// Decode one file and return its decompressed size.
fn test_file(name: &str) -> Result<usize> {
    let compressed = fs::read(name)?;
    let mut size = 0;
    for data in read_all_encoded(compressed.as_slice())? {
        let tree = unflatten_tree(&data.tree_shape, &data.tree_leaves)?;
        debug!("{} uses the tree:\n{}", name, tree);
        size += decode_text(&tree, &data.message_bits)?.len();
    }
    Ok(size)
}
