//! An ASN.1 BER/DER tree codec.
//!
//! Decoding turns a byte slice into a [`Node`] tree ([`from_der`]); encoding
//! turns a tree back into canonical, minimal-length DER ([`to_der`]). The
//! decoder accepts the BER liberties the wild actually contains (long-form
//! lengths for short values, indefinite lengths, encapsulated BIT STRING
//! content) while the encoder always emits definite, minimal DER, so a
//! BER-decoded structure re-encodes compressed.
//!
//! Decoded trees are owned values: callers may mutate a node in place (for
//! instance replace a decoded INTEGER's content octets) and re-encode, which
//! is a deliberate, supported use case.
//!
//! ```
//! use lancet_asn1_der::{from_der, to_der};
//!
//! // SEQUENCE { INTEGER 0, INTEGER 1 }
//! let bytes = [0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x01];
//! let node = from_der(&bytes).unwrap();
//! assert_eq!(node.children().len(), 2);
//! assert_eq!(to_der(&node), bytes);
//! ```

#[macro_use]
mod debug_log;

mod cursor;
mod decode;
mod encode;
mod node;

pub use cursor::ByteCursor;
pub use decode::{from_der, from_der_with_options, DecodeOptions};
pub use encode::to_der;
pub use node::{Node, Value};

/// Error type of the tree codec.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1DerError {
    #[error("too few bytes: {needed} needed, {available} available")]
    TruncatedInput { needed: usize, available: usize },
    #[error("unsupported or malformed identifier octet 0x{octet:02x}")]
    InvalidTag { octet: u8 },
    #[error("invalid length encoding: {context}")]
    InvalidLength { context: &'static str },
    #[error("{remaining} unparsed bytes remain after the top-level value")]
    TrailingData { remaining: usize },
    #[error("indefinite-length value has no end-of-contents marker")]
    UnterminatedIndefiniteLength,
    #[error("maximum decoding depth exceeded ({max})")]
    MaxDepthExceeded { max: usize },
}

pub type Result<T> = std::result::Result<T, Asn1DerError>;
