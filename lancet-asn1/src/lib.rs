//! Simple ASN.1 types and primitive codecs.
//!
//! This crate holds the leaf building blocks shared by the DER tree codec
//! (`lancet-asn1-der`) and the schema validator (`lancet-asn1-schema`):
//!
//! - [`tag`]: tag classes and tag numbers with their universal constants,
//! - [`oid`]: OBJECT IDENTIFIER content octets ⇄ dotted strings,
//! - [`int`]: INTEGER content octets ⇄ machine or arbitrary-precision values,
//! - [`date`]: UTCTime/GeneralizedTime strings ⇄ [`date::Date`].
//!
//! None of the modules here read or write TLV headers; they operate on the
//! *content* octets of an already-framed value.

pub mod date;
pub mod int;
pub mod oid;
pub mod tag;

pub use tag::{Tag, TagClass};
