use std::io::Write;

use crate::huffman_coding::Bit;

/// Writes a bitstream for output. Bits are queued most significant bit first and moved into
/// the output buffer a byte at a time. Call finish() to pad the last byte and hand the buffer
/// to the writer.
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,

    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over the output stream.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            output: Vec::with_capacity(4096),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Push a byte aligned header (magic number, version) onto the stream.
    pub fn push_header(&mut self, header: &[u8]) {
        header.iter().for_each(|&x| self.out8(x));
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn push_queue(&mut self) {
        // If the queue has less than 8 bits of room left, write all full bytes to the output buffer.
        if self.q_bits > 56 {
            while self.q_bits > 7 {
                let byte = (self.queue >> (self.q_bits - 8)) as u8;
                self.output.push(byte); //push the packed byte out
                self.q_bits -= 8; //adjust the count of bits left in the queue
            }
        }
    }

    /// Put a single bit on the stream.
    pub fn out_bit(&mut self, bit: Bit) {
        self.push_queue();
        self.queue <<= 1;
        self.queue |= u8::from(bit) as u64;
        self.q_bits += 1;
    }

    /// Put a byte on the stream (not necessarily byte aligned).
    pub fn out8(&mut self, data: u8) {
        // Make sure the queue is empty enough to hold the data
        self.push_queue();
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
    }

    /// Put a 32 bit word on the stream, most significant byte first.
    pub fn out32(&mut self, data: u32) {
        data.to_be_bytes().iter().for_each(|&x| self.out8(x));
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits.
    fn flush(&mut self) {
        // First push out all the full bytes
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
        // Then push out the remaining bits
        if self.q_bits > 0 {
            let mut byte = (self.queue & (0xff >> (8 - self.q_bits)) as u64) as u8;
            byte <<= 8 - self.q_bits;
            self.output.push(byte); //push the packed byte out
            self.q_bits = 0; //adjust the count of bits left in the queue
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = self.output.len() * 8 + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }

    /// Pad the final byte, write everything to the output stream and return the byte count.
    pub fn finish(mut self) -> std::io::Result<usize> {
        self.flush();
        self.writer.write_all(&self.output)?;
        self.writer.flush()?;
        Ok(self.output.len())
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;
    use crate::huffman_coding::bit::bits_from_str;

    #[test]
    fn out8_test() {
        let mut out = Vec::new();
        let mut bw = BitWriter::new(&mut out);
        bw.out8(b'x');
        assert_eq!(bw.finish().unwrap(), 1);
        assert_eq!(out, "x".as_bytes());
    }

    #[test]
    fn last_bits_test() {
        let mut out = Vec::new();
        let mut bw = BitWriter::new(&mut out);
        bw.out8(255);
        bw.out8(1);
        bw.out8(128);
        bw.out8(255);
        bits_from_str("111")
            .unwrap()
            .into_iter()
            .for_each(|bit| bw.out_bit(bit));
        bw.finish().unwrap();
        assert_eq!(out, vec![255, 1, 128, 255, 224]);
    }

    #[test]
    fn unaligned_byte_test() {
        let mut out = Vec::new();
        let mut bw = BitWriter::new(&mut out);
        bits_from_str("101")
            .unwrap()
            .into_iter()
            .for_each(|bit| bw.out_bit(bit));
        bw.out8(0xff);
        assert_eq!(bw.loc(), "[1.3]");
        bw.finish().unwrap();
        assert_eq!(out, vec![0b1011_1111, 0b1110_0000]);
    }

    #[test]
    fn header_and_out32_test() {
        let mut out = Vec::new();
        let mut bw = BitWriter::new(&mut out);
        bw.push_header(b"HUF");
        bw.out32(0x0102_0304);
        for _ in 0..20 {
            bw.out32(0);
        }
        assert_eq!(bw.finish().unwrap(), 87);
        assert_eq!(&out[..7], &[b'H', b'U', b'F', 1, 2, 3, 4]);
    }
}
