use crate::{Asn1DerError, Result};

/// A position-tracked, bounds-checked view over an immutable byte slice.
///
/// Every read either advances the position or fails with
/// [`Asn1DerError::TruncatedInput`]; nothing is consumed on failure.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// The unread tail of the input.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the next byte without consuming it.
    pub fn peek_one(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub fn read_one(&mut self) -> Result<u8> {
        let byte = self.peek_one().ok_or(Asn1DerError::TruncatedInput {
            needed: 1,
            available: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consumes and returns the next `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Asn1DerError::TruncatedInput {
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Advances past `len` bytes that have already been peeked.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_slice(len).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_and_bound_check() {
        let mut cursor = ByteCursor::new(&[0x30, 0x03, 0x02, 0x01, 0x2A]);
        assert_eq!(cursor.read_one().unwrap(), 0x30);
        assert_eq!(cursor.read_slice(3).unwrap(), &[0x03, 0x02, 0x01]);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(
            cursor.read_slice(2),
            Err(Asn1DerError::TruncatedInput {
                needed: 2,
                available: 1
            })
        );
        // failed read consumed nothing
        assert_eq!(cursor.read_one().unwrap(), 0x2A);
        assert!(cursor.is_empty());
        assert_eq!(
            cursor.read_one(),
            Err(Asn1DerError::TruncatedInput {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn peek_does_not_consume() {
        let cursor = ByteCursor::new(&[0x02]);
        assert_eq!(cursor.peek_one(), Some(0x02));
        assert_eq!(cursor.remaining(), 1);
    }
}
