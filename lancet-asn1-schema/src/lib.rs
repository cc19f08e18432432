//! Schema-driven validation and field capture over decoded ASN.1 trees.
//!
//! A [`Schema`] mirrors the shape of an expected tree: every field it pins
//! down (tag class, tag number, construction) must match the corresponding
//! node, every field it leaves open is a wildcard. Matched nodes can be
//! captured by name, so walking a structure like an X.509 certificate is one
//! validation call followed by lookups in the returned [`Captures`].
//!
//! ```
//! use lancet_asn1_der::from_der;
//! use lancet_asn1_schema::Schema;
//!
//! let schema = Schema::sequence("envelope").value(vec![
//!     Schema::integer("version").capture("version"),
//!     Schema::null("padding").optional(),
//!     Schema::octet_string("payload").capture("payload"),
//! ]);
//!
//! // SEQUENCE { INTEGER 3, OCTET STRING ab cd } -- padding absent
//! let node = from_der(&[0x30, 0x07, 0x02, 0x01, 0x03, 0x04, 0x02, 0xAB, 0xCD]).unwrap();
//! let captures = schema.validate(&node).unwrap();
//! assert_eq!(captures.bytes("version"), Some(&[0x03][..]));
//! assert_eq!(captures.bytes("payload"), Some(&[0xAB, 0xCD][..]));
//! ```

mod captures;
mod schema;
mod validate;

pub use captures::{CapturedValue, Captures};
pub use schema::Schema;
pub use validate::validate;

use std::fmt;

/// A single validation failure, tied to the named schema element it occurred
/// under.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("[{element}] {message}")]
pub struct ValidationError {
    pub element: String,
    pub message: String,
}

/// All failures accumulated while matching a tree against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}
