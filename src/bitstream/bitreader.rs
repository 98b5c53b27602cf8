//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. Running out
//! of data is reported as Ok(None), I/O failures as Err.
//!

use std::io::{self, Read};

use crate::huffman_coding::Bit;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads a binary bitstream.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader. The buffer is filled on the first read.
    pub fn new(source: R) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the buffer cursor has reached the end of the buffer
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // Adjust the buffer to what we actually read, and reset the cursor and bit index
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the next bit, or None if there is no more data to read
    pub fn bit(&mut self) -> io::Result<Option<Bit>> {
        // If bit_index is == 0, check if we have a byte to read. Return None if we have no data
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Ok(Some(Bit::from(bit == 1)))
    }

    /// Return the next n bits (n <= 64) as a number, or None if there is no more data to read.
    pub fn bint(&mut self, mut n: usize) -> io::Result<Option<usize>> {
        /*
        This is used to read length fields. For example, if a count is stored on the stream
        as a u32, then bint(32) will return it.

        First, look to see if we have less than 8 bits in the current byte. If so, get
        those. Then get full bytes as needed to fulfill the request. Lastly, get a
        partial byte to complete the request.
        */
        let mut result = 0_usize;

        // Test if we have a partial byte of data. If we do, read from it.
        if self.bit_index > 0 {
            // Set up to read the minimum of the partial byte and what we need to read
            let needed = n.min(8 - self.bit_index);

            // Get what we need/can from this partial byte
            result = ((self.buffer[self.cursor] & BIT_MASK >> self.bit_index)
                >> (8 - self.bit_index - needed)) as usize;
            self.bit_index += needed;
            if self.bit_index == 8 {
                self.cursor += 1;
                self.bit_index = 0;
            }

            // See if we got all we needed.
            n -= needed;
            if n == 0 {
                return Ok(Some(result));
            }
        }
        // If we are here the reader is byte aligned. Get as many full bytes as we need.
        while n >= 8 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << 8 | self.buffer[self.cursor] as usize;
            self.cursor += 1;
            n -= 8;
        }
        // If we still need a partial byte, get whatever bits we still need.
        if n > 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << n | (self.buffer[self.cursor] >> (8 - n)) as usize;
            self.bit_index = n;
        }
        Ok(Some(result))
    }

    /// Returns a byte, or None if there is no more data to read. This is a convenience
    /// function, and calls bint(8).
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Returns n bytes, or None if the data runs out first.
    pub fn bytes(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        let mut result: Vec<u8> = Vec::with_capacity(n.min(BUFFER_SIZE));
        for _ in 0..n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Skip to the next byte boundary and return the skipped bits as a number.
    pub fn align(&mut self) -> io::Result<usize> {
        if self.bit_index == 0 {
            return Ok(0);
        }
        Ok(self.bint(8 - self.bit_index)?.unwrap_or(0))
    }

    /// True when the reader is byte aligned and the source has nothing left.
    pub fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.bit_index == 0 && !self.have_data()?)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use crate::huffman_coding::Bit;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(Bit::One));
        for _ in 0..6 {
            assert_eq!(br.bit().unwrap(), Some(Bit::Zero));
        }
        assert_eq!(br.bit().unwrap(), Some(Bit::One));
        assert_eq!(br.bit().unwrap(), None);
    }

    #[test]
    fn bint_test() {
        let x = [0b00011011].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(5).unwrap(), Some(3));
        assert_eq!(br.bint(1).unwrap(), Some(0));
        assert_eq!(br.bint(2).unwrap(), Some(3));
        assert_eq!(br.bint(1).unwrap(), None);
    }

    #[test]
    fn unaligned_bint_test() {
        let x = [0b1010_1010, 0b1111_0000, 0b0000_1111].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(Bit::One));
        // 0101010 11110000 0 -> 16 bits starting at bit 1
        assert_eq!(br.bint(16).unwrap(), Some(0b0101_0101_1110_0000));
        assert_eq!(br.loc(), "[2.1]");
        assert_eq!(br.bint(7).unwrap(), Some(0b000_1111));
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte().unwrap(), Some(b'H'));
        assert_eq!(br.byte().unwrap(), Some(b'e'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
    }

    #[test]
    fn bytes_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.bytes(5).unwrap(), Some("Hello".as_bytes().to_vec()));
        assert_eq!(br.bytes(50).unwrap(), None);
    }

    #[test]
    fn align_test() {
        let x = [0b1010_0110, 0xff].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.align().unwrap(), 0);
        assert_eq!(br.bint(3).unwrap(), Some(0b101));
        assert_eq!(br.align().unwrap(), 0b0_0110);
        assert!(!br.at_end().unwrap());
        assert_eq!(br.byte().unwrap(), Some(0xff));
        assert!(br.at_end().unwrap());
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        br.bytes(5).unwrap();
        br.bit().unwrap();
        assert_eq!(br.loc(), "[5.1]");
    }
}
