//! OBJECT IDENTIFIER content codec.
//!
//! Converts between dotted-decimal strings ("1.2.840.113549") and the DER
//! content octets of an OBJECT IDENTIFIER. The first two arcs share one
//! base-128 group (`arc0 * 40 + arc1`); decoding applies the X.690 exception
//! for first-group values ≥ 80 (arc0 = 2, arc1 = value − 80).

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OidError {
    #[error("empty OID content")]
    Empty,
    #[error("an OID needs at least two arcs")]
    TooFewArcs,
    #[error("invalid arc value: {arc}")]
    InvalidArc { arc: String },
    #[error("first arc must be 0, 1 or 2, and the second arc below 40 for first arcs 0 and 1")]
    InvalidRootArcs,
    #[error("truncated base-128 arc at end of content")]
    UnterminatedArc,
    #[error("arc value exceeds 64 bits")]
    ArcTooLarge,
}

/// Encodes a dotted OID string into DER content octets.
pub fn oid_to_der(dotted: &str) -> Result<Vec<u8>, OidError> {
    let mut arcs = dotted.split('.').map(|part| {
        part.parse::<u64>().map_err(|_| OidError::InvalidArc {
            arc: part.to_owned(),
        })
    });

    let arc0 = arcs.next().ok_or(OidError::TooFewArcs)??;
    let arc1 = arcs.next().ok_or(OidError::TooFewArcs)??;
    if arc0 > 2 || (arc0 < 2 && arc1 >= 40) {
        return Err(OidError::InvalidRootArcs);
    }
    // arc0 is at most 2, so only arc1 can push the folded group past u64
    let first_group = arc1.checked_add(arc0 * 40).ok_or(OidError::ArcTooLarge)?;

    let mut out = Vec::with_capacity(8);
    push_base128(&mut out, first_group);
    for arc in arcs {
        push_base128(&mut out, arc?);
    }
    Ok(out)
}

/// Decodes DER content octets into a dotted OID string.
pub fn der_to_oid(bytes: &[u8]) -> Result<String, OidError> {
    if bytes.is_empty() {
        return Err(OidError::Empty);
    }

    let mut arcs: Vec<u64> = Vec::with_capacity(8);
    let mut acc: u64 = 0;
    let mut in_arc = false;
    for &byte in bytes {
        if acc > u64::MAX >> 7 {
            return Err(OidError::ArcTooLarge);
        }
        acc = (acc << 7) | u64::from(byte & 0x7F);
        in_arc = byte & 0x80 != 0;
        if !in_arc {
            if arcs.is_empty() {
                // first group folds two arcs together
                if acc < 80 {
                    arcs.push(acc / 40);
                    arcs.push(acc % 40);
                } else {
                    arcs.push(2);
                    arcs.push(acc - 80);
                }
            } else {
                arcs.push(acc);
            }
            acc = 0;
        }
    }
    if in_arc {
        return Err(OidError::UnterminatedArc);
    }

    let dotted = arcs
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Ok(dotted)
}

/// Appends `value` as a big-endian base-128 varint, high bit set on every
/// octet except the last.
fn push_base128(out: &mut Vec<u8>, value: u64) {
    let mut groups = [0u8; 10];
    let mut count = 0;
    let mut v = value;
    loop {
        groups[count] = (v & 0x7F) as u8;
        count += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    for i in (1..count).rev() {
        out.push(groups[i] | 0x80);
    }
    out.push(groups[0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.840.113549", &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D])]
    #[case("2.5.4.3", &[0x55, 0x04, 0x03])]
    #[case("1.3.6.1.5.5.7.48.1", &[0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01])]
    #[case("0.9.2342.19200300.100.1.25", &[0x09, 0x92, 0x26, 0x89, 0x93, 0xF2, 0x2C, 0x64, 0x01, 0x19])]
    fn round_trip(#[case] dotted: &str, #[case] der: &[u8]) {
        assert_eq!(oid_to_der(dotted).unwrap(), der);
        assert_eq!(der_to_oid(der).unwrap(), dotted);
    }

    #[test]
    fn large_second_arc_uses_x690_exception() {
        // 2.999 encodes as 2*40 + 999 = 1079, above the 80 threshold
        let der = oid_to_der("2.999.3").unwrap();
        assert_eq!(der, [0x88, 0x37, 0x03]);
        assert_eq!(der_to_oid(&der).unwrap(), "2.999.3");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(oid_to_der("1"), Err(OidError::TooFewArcs));
        assert_eq!(oid_to_der("3.1"), Err(OidError::InvalidRootArcs));
        assert_eq!(oid_to_der("1.40"), Err(OidError::InvalidRootArcs));
        assert!(matches!(oid_to_der("1.x.3"), Err(OidError::InvalidArc { .. })));
        assert_eq!(der_to_oid(&[]), Err(OidError::Empty));
        assert_eq!(der_to_oid(&[0x2A, 0x86]), Err(OidError::UnterminatedArc));
    }

    #[rstest]
    #[case("2.18446744073709551615")]
    #[case("2.18446744073709551570.1")]
    fn second_arc_overflowing_the_folded_group_is_rejected(#[case] dotted: &str) {
        // 2*40 + arc1 must not wrap
        assert_eq!(oid_to_der(dotted), Err(OidError::ArcTooLarge));
    }

    #[test]
    fn largest_encodable_second_arc_round_trips() {
        let dotted = format!("2.{}", u64::MAX - 80);
        let der = oid_to_der(&dotted).unwrap();
        assert_eq!(der_to_oid(&der).unwrap(), dotted);
    }
}
