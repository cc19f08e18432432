//! INTEGER content codec.
//!
//! DER INTEGER content octets are the shortest big-endian two's-complement
//! representation of the value: a leading `0x00` is kept only to force a
//! positive sign (128 → `00 80`), a leading `0xFF` only to force a negative
//! one (-129 → `FF 7F`).
//!
//! Values wider than 8 octets (RSA moduli and friends) live on the
//! arbitrary-precision side of the API: [`der_to_big_integer`] /
//! [`big_integer_to_der`] hand the numeric width problem to
//! `num-bigint-dig`, the codec itself never does arithmetic on them.

use num_bigint_dig::BigInt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegerError {
    #[error("empty INTEGER content")]
    Empty,
    #[error("INTEGER content is {len} octets, beyond i64 range; use der_to_big_integer")]
    OutOfRange { len: usize },
}

/// Encodes `n` as minimal two's-complement content octets.
pub fn integer_to_der(n: i64) -> Vec<u8> {
    minimize(n.to_be_bytes().to_vec())
}

/// Decodes two's-complement content octets into an `i64`, sign-extending
/// from the most significant bit of the first octet.
pub fn der_to_integer(bytes: &[u8]) -> Result<i64, IntegerError> {
    if bytes.is_empty() {
        return Err(IntegerError::Empty);
    }
    if bytes.len() > 8 {
        return Err(IntegerError::OutOfRange { len: bytes.len() });
    }
    let fill = if bytes[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut buf = [fill; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(buf))
}

/// Encodes an arbitrary-precision integer as minimal two's-complement
/// content octets.
pub fn big_integer_to_der(n: &BigInt) -> Vec<u8> {
    minimize(n.to_signed_bytes_be())
}

/// Decodes two's-complement content octets of any width.
pub fn der_to_big_integer(bytes: &[u8]) -> Result<BigInt, IntegerError> {
    if bytes.is_empty() {
        return Err(IntegerError::Empty);
    }
    Ok(BigInt::from_signed_bytes_be(bytes))
}

/// Strips redundant sign octets: a `0x00` followed by a clear sign bit, or a
/// `0xFF` followed by a set one, carries no information.
fn minimize(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.is_empty() {
        return vec![0x00];
    }
    while bytes.len() > 1 {
        match (bytes[0], bytes[1] & 0x80) {
            (0x00, 0x00) | (0xFF, 0x80) => {
                bytes.remove(0);
            }
            _ => break,
        }
    }
    bytes
}
