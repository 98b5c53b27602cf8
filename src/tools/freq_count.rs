use rustc_hash::FxHashMap;

use crate::huffman_coding::Symbol;

/// Symbol -> number of occurrences. Only symbols that occur are present.
pub type FrequencyTable = FxHashMap<Symbol, u64>;

/// Returns a frequency count of the input data. Empty input gives an empty table.
pub fn freqs(data: &[Symbol]) -> FrequencyTable {
    // Counting into a flat array is much faster than hashing every byte.
    let mut counts = [0_u64; 256];
    data.iter().for_each(|&el| counts[el as usize] += 1);
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(symbol, &count)| (symbol as Symbol, count))
        .collect()
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn freqs_test() {
        let table = freqs(b"STREETTEST");
        assert_eq!(table.len(), 4);
        assert_eq!(table[&b'T'], 4);
        assert_eq!(table[&b'E'], 3);
        assert_eq!(table[&b'S'], 2);
        assert_eq!(table[&b'R'], 1);
    }

    #[test]
    fn empty_test() {
        assert!(freqs(&[]).is_empty());
    }

    #[test]
    fn all_bytes_test() {
        let data = (0..=255).chain(0..=255).collect::<Vec<u8>>();
        let table = freqs(&data);
        assert_eq!(table.len(), 256);
        assert!(table.values().all(|&count| count == 2));
    }
}
