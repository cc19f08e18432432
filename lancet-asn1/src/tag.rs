use std::fmt;

/// The two class bits (7–6) of an ASN.1 identifier octet.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    /// Returns the class bits, already shifted into position.
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xC0,
        }
    }

    /// Extracts the class from a raw identifier octet.
    #[inline]
    pub const fn from_identifier(octet: u8) -> Self {
        match octet & 0xC0 {
            0x00 => TagClass::Universal,
            0x40 => TagClass::Application,
            0x80 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TagClass::Universal => write!(f, "UNIVERSAL"),
            TagClass::Application => write!(f, "APPLICATION"),
            TagClass::ContextSpecific => write!(f, "CONTEXT-SPECIFIC"),
            TagClass::Private => write!(f, "PRIVATE"),
        }
    }
}

/// An ASN.1 tag number (bits 4–0 of the identifier octet).
///
/// Only the single-octet range (0–30) is supported; the multi-octet tag form
/// is outside the tag range this codec handles. The constants below name the
/// UNIVERSAL tags; for CONTEXT-SPECIFIC elements the number is
/// application-defined and [`Tag::new`] is used directly.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag(u8);

impl Tag {
    pub const END_OF_CONTENTS: Self = Tag(0x00);
    pub const BOOLEAN: Self = Tag(0x01);
    pub const INTEGER: Self = Tag(0x02);
    pub const BIT_STRING: Self = Tag(0x03);
    pub const OCTET_STRING: Self = Tag(0x04);
    pub const NULL: Self = Tag(0x05);
    pub const OID: Self = Tag(0x06);
    pub const UTF8_STRING: Self = Tag(0x0C);
    pub const SEQUENCE: Self = Tag(0x10);
    pub const SET: Self = Tag(0x11);
    pub const PRINTABLE_STRING: Self = Tag(0x13);
    pub const IA5_STRING: Self = Tag(0x16);
    pub const UTC_TIME: Self = Tag(0x17);
    pub const GENERALIZED_TIME: Self = Tag(0x18);
    pub const BMP_STRING: Self = Tag(0x1E);

    #[inline]
    pub const fn new(number: u8) -> Self {
        Tag(number & 0x1F)
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for Tag {
    fn from(number: u8) -> Self {
        Tag::new(number)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::END_OF_CONTENTS => write!(f, "END-OF-CONTENTS"),
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::BIT_STRING => write!(f, "BIT STRING"),
            Tag::OCTET_STRING => write!(f, "OCTET STRING"),
            Tag::NULL => write!(f, "NULL"),
            Tag::OID => write!(f, "OBJECT IDENTIFIER"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::SET => write!(f, "SET"),
            Tag::PRINTABLE_STRING => write!(f, "PrintableString"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            Tag::UTC_TIME => write!(f, "UTCTime"),
            Tag::GENERALIZED_TIME => write!(f, "GeneralizedTime"),
            Tag::BMP_STRING => write!(f, "BMPString"),
            unknown => write!(f, "UNKNOWN({})", unknown.0),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({}[{}])", self, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_bits_round_trip() {
        for class in [
            TagClass::Universal,
            TagClass::Application,
            TagClass::ContextSpecific,
            TagClass::Private,
        ] {
            assert_eq!(TagClass::from_identifier(class.bits() | 0x2A), class);
        }
    }

    #[test]
    fn universal_names() {
        assert_eq!(Tag::SEQUENCE.to_string(), "SEQUENCE");
        assert_eq!(Tag::new(0x19).to_string(), "UNKNOWN(25)");
    }

    #[test]
    fn new_masks_to_tag_number_range() {
        assert_eq!(Tag::new(0x30).number(), 0x10);
    }
}
