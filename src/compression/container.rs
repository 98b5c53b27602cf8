//! The .huf file format: an EncodedData written as one continuous bitstream.
//!
//! ```text
//! "HUF" magic, version byte '1'        (byte aligned)
//! tree shape bits                       (pre-order, self-delimiting)
//! leaf symbols, 8 bits each             (one per 0 bit in the shape)
//! message bit count                     (64 bits, as two 32 bit big endian halves)
//! message bits
//! zero padding up to the next byte
//! ```
//!
//! The shape needs no length field: reading stops as soon as every internal node has both of
//! its children. The leaf count follows from the shape. Only the message needs an explicit
//! length, because the padding in the last byte would otherwise decode as extra symbols.
//!
//! Several .huf files written back to back (`huf -zc a b > ab.huf`) form a valid stream, and
//! read_all_encoded returns one aggregate per file. Padding bits must be zero, and anything
//! after the last file that is not another .huf file is an error.
//!

use std::io::{Read, Write};

use log::{debug, error};

use super::compress::EncodedData;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::flatten::MAX_SHAPE_BITS;
use crate::huffman_coding::Bit;

const MAGIC: &[u8; 3] = b"HUF";
const VERSION: u8 = b'1';

/// Write the aggregate to `writer`. Returns the number of bytes written.
pub fn write_encoded<W: Write>(data: &EncodedData, writer: W) -> Result<usize> {
    let mut bw = BitWriter::new(writer);
    bw.push_header(MAGIC);
    bw.out8(VERSION);

    data.tree_shape.iter().for_each(|&bit| bw.out_bit(bit));
    debug!("Tree shape ends at {}.", bw.loc());
    data.tree_leaves.iter().for_each(|&leaf| bw.out8(leaf));

    let count = data.message_bits.len() as u64;
    bw.out32((count >> 32) as u32);
    bw.out32(count as u32);
    debug!("Message of {} bits starts at {}.", count, bw.loc());
    data.message_bits.iter().for_each(|&bit| bw.out_bit(bit));

    Ok(bw.finish()?)
}

/// Read exactly one aggregate back from `reader`. Only the framing is checked here; the shape
/// and leaves are validated when the tree is rebuilt.
pub fn read_encoded<R: Read>(reader: R) -> Result<EncodedData> {
    let mut br = BitReader::new(reader);
    let data = read_member(&mut br)?;
    if !br.at_end()? {
        error!("Found data after the end of the compressed stream at {}.", br.loc());
        return Err(HuffError::InvalidContainer(
            "data after the end of the compressed stream".to_string(),
        ));
    }
    Ok(data)
}

/// Read every aggregate from a stream of one or more .huf files written back to back.
pub fn read_all_encoded<R: Read>(reader: R) -> Result<Vec<EncodedData>> {
    let mut br = BitReader::new(reader);
    let mut members = vec![read_member(&mut br)?];
    while !br.at_end()? {
        debug!("Another compressed stream starts at {}.", br.loc());
        members.push(read_member(&mut br)?);
    }
    Ok(members)
}

/// Read one file from the stream, up to and including its padding.
fn read_member<R: Read>(br: &mut BitReader<R>) -> Result<EncodedData> {
    // Look for a valid signature.
    let header = br.bytes(MAGIC.len() + 1)?;
    match header.as_deref() {
        Some([m0, m1, m2, version]) if [*m0, *m1, *m2] == *MAGIC => {
            if *version != VERSION {
                error!("Unsupported .huf version {}.", version);
                return Err(HuffError::InvalidContainer(format!(
                    "unsupported version {}",
                    version
                )));
            }
        }
        _ => {
            error!("Fatal error: not a valid .huf compressed stream.");
            return Err(HuffError::InvalidContainer(
                "missing HUF signature".to_string(),
            ));
        }
    }

    // Read shape bits until every open slot in the tree has been filled.
    let mut tree_shape = Vec::new();
    let mut open_slots = 1_usize;
    while open_slots > 0 {
        if tree_shape.len() == MAX_SHAPE_BITS {
            error!("Tree shape runs past {} bits.", MAX_SHAPE_BITS);
            return Err(HuffError::malformed(format!(
                "shape runs past {} bits",
                MAX_SHAPE_BITS
            )));
        }
        let bit = br.bit()?.ok_or_else(|| truncated(tree_shape.len()))?;
        match bit {
            Bit::One => open_slots += 1,
            Bit::Zero => open_slots -= 1,
        }
        tree_shape.push(bit);
    }

    let leaf_count = tree_shape.iter().filter(|&&bit| bit == Bit::Zero).count();
    let tree_leaves = br.bytes(leaf_count)?.ok_or_else(|| truncated(tree_shape.len()))?;

    let high = br.bint(32)?.ok_or_else(|| truncated(0))? as u64;
    let low = br.bint(32)?.ok_or_else(|| truncated(0))? as u64;
    let count = high << 32 | low;
    debug!(
        "Found a {} bit shape, {} leaves and {} message bits.",
        tree_shape.len(),
        tree_leaves.len(),
        count
    );

    let mut message_bits = Vec::new();
    for idx in 0..count {
        let bit = br.bit()?.ok_or_else(|| truncated(idx as usize))?;
        message_bits.push(bit);
    }

    if br.align()? != 0 {
        error!("Padding bits after the message are not zero.");
        return Err(HuffError::InvalidContainer(
            "non-zero padding after the message".to_string(),
        ));
    }

    Ok(EncodedData {
        tree_shape,
        tree_leaves,
        message_bits,
    })
}

/// Log and build the error for data that stops early
fn truncated(bit_offset: usize) -> HuffError {
    error!("Unexpected end of data.");
    HuffError::TruncatedStream { bit_offset }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::compress::compress;

    #[test]
    fn round_trip_test() {
        let data = compress(b"STREETTEST").unwrap();
        let mut out = Vec::new();
        let written = write_encoded(&data, &mut out).unwrap();
        assert_eq!(written, out.len());
        assert_eq!(&out[..4], b"HUF1");
        assert_eq!(read_encoded(out.as_slice()).unwrap(), data);
    }

    #[test]
    fn layout_test() {
        // shape 1 0 0, leaves A B, message 0 1 1
        let data = EncodedData {
            tree_shape: vec![Bit::One, Bit::Zero, Bit::Zero],
            tree_leaves: b"AB".to_vec(),
            message_bits: vec![Bit::Zero, Bit::One, Bit::One],
        };
        let mut out = Vec::new();
        write_encoded(&data, &mut out).unwrap();
        // 4 header bytes, then 3 + 16 + 64 + 3 = 86 bits -> 11 bytes
        assert_eq!(out.len(), 15);
        // 100 then 'A' (01000001) starts at bit 3
        assert_eq!(out[4], 0b1000_1000);
    }

    #[test]
    fn bad_magic_test() {
        let result = read_encoded(b"BZh9abcdef".as_slice());
        assert!(matches!(result, Err(HuffError::InvalidContainer(_))));
    }

    #[test]
    fn bad_version_test() {
        let result = read_encoded(b"HUF9abcdef".as_slice());
        assert!(matches!(result, Err(HuffError::InvalidContainer(_))));
    }

    #[test]
    fn empty_test() {
        let result = read_encoded(b"".as_slice());
        assert!(matches!(result, Err(HuffError::InvalidContainer(_))));
    }

    #[test]
    fn truncated_test() {
        let data = compress(b"ABBCCCCDDDDDDDDEEEEEEEEEEEEEEEE").unwrap();
        let mut out = Vec::new();
        write_encoded(&data, &mut out).unwrap();
        out.truncate(out.len() - 3);
        let result = read_encoded(out.as_slice());
        assert!(matches!(result, Err(HuffError::TruncatedStream { .. })));
    }

    #[test]
    fn concatenated_test() {
        let first = compress(b"first file").unwrap();
        let second = compress(b"second file").unwrap();
        let mut out = Vec::new();
        write_encoded(&first, &mut out).unwrap();
        write_encoded(&second, &mut out).unwrap();
        assert_eq!(read_all_encoded(out.as_slice()).unwrap(), vec![first, second]);
        assert!(matches!(
            read_encoded(out.as_slice()),
            Err(HuffError::InvalidContainer(_))
        ));
    }

    #[test]
    fn trailing_bytes_test() {
        let mut out = Vec::new();
        write_encoded(&compress(b"STREETTEST").unwrap(), &mut out).unwrap();
        out.extend_from_slice(&[0, 0, 0]);
        assert!(matches!(
            read_all_encoded(out.as_slice()),
            Err(HuffError::InvalidContainer(_))
        ));
    }

    #[test]
    fn dirty_padding_test() {
        let mut out = Vec::new();
        write_encoded(&compress(b"STREETTEST").unwrap(), &mut out).unwrap();
        // 154 bits: the last byte holds 2 message bits and 6 padding bits.
        if let Some(last) = out.last_mut() {
            *last |= 0b0000_0001;
        }
        assert!(matches!(
            read_encoded(out.as_slice()),
            Err(HuffError::InvalidContainer(_))
        ));
    }

    #[test]
    fn endless_shape_test() {
        let mut out = b"HUF1".to_vec();
        out.extend(std::iter::repeat(0xff).take(100));
        let result = read_encoded(out.as_slice());
        assert!(matches!(result, Err(HuffError::MalformedTree(_))));
    }
}
