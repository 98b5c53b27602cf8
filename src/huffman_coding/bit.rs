use std::fmt::{self, Display, Formatter};

/// One binary digit of a code, a tree shape or a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// True for Bit::One.
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Map '0' and '1' to bits, anything else to None.
    pub fn from_char(c: char) -> Option<Bit> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Parse a string of '0'/'1' characters into bits. Whitespace is skipped so "1 0 1" works.
/// Returns None if any other character shows up.
pub fn bits_from_str(text: &str) -> Option<Vec<Bit>> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(Bit::from_char)
        .collect()
}

/// Render bits as a string of '0'/'1' characters.
pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter().map(|bit| if bit.is_one() { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_test() {
        assert_eq!(
            bits_from_str("1 0 1"),
            Some(vec![Bit::One, Bit::Zero, Bit::One])
        );
        assert_eq!(bits_from_str(""), Some(vec![]));
        assert_eq!(bits_from_str("102"), None);
    }

    #[test]
    fn display_test() {
        let bits = bits_from_str("0110").unwrap();
        assert_eq!(bits_to_string(&bits), "0110");
        assert_eq!(Bit::One.to_string(), "1");
        assert_eq!(u8::from(Bit::Zero), 0);
        assert_eq!(Bit::from(true), Bit::One);
    }
}
