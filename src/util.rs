use std::fmt::Write;

struct Hex<'a> {
    inner: core::slice::Iter<'a, u8>,
    next: Option<u8>,
}

impl Hex<'_> {
    const TABLE: &'static [u8; 16] = b"0123456789abcdef";

    fn new(inp: &[u8]) -> Hex<'_> {
        Hex {
            inner: inp.iter(),
            next: None,
        }
    }
}

impl Iterator for Hex<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next.take() {
            Some(c) => Some(c as char),
            None => self.inner.next().map(|b| {
                let current = Self::TABLE[(b >> 4) as usize];
                self.next = Some(Self::TABLE[(b & 0xf) as usize]);
                current as char
            }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let length = self.len();
        (length, Some(length))
    }
}

impl core::iter::ExactSizeIterator for Hex<'_> {
    fn len(&self) -> usize {
        let mut length = self.inner.len() * 2;
        if self.next.is_some() {
            length += 1;
        }
        length
    }
}

/// Lowercase hex, no separators.
pub fn hex(inp: &[u8]) -> String {
    Hex::new(inp).collect()
}

/// Lowercase hex with every byte followed by a space, as in test-vector
/// listings.
pub fn spaced_hex(inp: &[u8]) -> String {
    let mut out = String::with_capacity(inp.len() * 3);
    for b in inp {
        // writing into a String cannot fail.
        let _ = write!(out, "{b:02x} ");
    }
    out
}

pub fn from_hex(s: &str) -> Result<Vec<u8>, ()> {
    const fn decode_char(b: u8) -> Result<u8, ()> {
        match b {
            b'a'..=b'f' => Ok(b - b'a' + 10),
            b'A'..=b'F' => Ok(b - b'A' + 10),
            b'0'..=b'9' => Ok(b - b'0'),
            _ => Err(()),
        }
    }
    let bytes = s.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(());
    }
    bytes
        .chunks_exact(2)
        .map(|pair| Ok(decode_char(pair[0])? << 4 | decode_char(pair[1])?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encoding() {
        assert_eq!(hex(&[]), "");
        assert_eq!(hex(&[0x00, 0x0f, 0xa5, 0xff]), "000fa5ff");
        assert_eq!(spaced_hex(&[0x00, 0x0f]), "00 0f ");
    }

    #[test]
    fn hex_decoding() {
        assert_eq!(from_hex("000FA5ff"), Ok(vec![0x00, 0x0f, 0xa5, 0xff]));
        assert_eq!(from_hex(""), Ok(vec![]));
        assert_eq!(from_hex("abc"), Err(()));
        assert_eq!(from_hex("zz"), Err(()));
    }

    #[test]
    fn hex_size_hint_is_exact() {
        let mut h = Hex::new(&[1, 2, 3]);
        assert_eq!(h.len(), 6);
        h.next();
        assert_eq!(h.len(), 5);
    }
}
