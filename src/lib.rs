//! Parse `.env` buffers and bind them onto typed records.
//!
//! [`parse_bytes`] turns a buffer into an ordered [`Document`] of entries.
//! [`from_bytes`] and [`from_str`] go one step further and fill a record
//! that implements [`Bind`], usually through [`impl_bind!`].
//!
//! The format is deliberately small: one `KEY=value` per line, `#` comment
//! lines, and quote characters dropped from values. Keys are ASCII letters
//! and underscores.

mod binder;
mod error;
mod model;
mod parser;
mod scalar;

pub use binder::{Bind, Bindings, FieldBinding, bind, from_bytes, from_document, from_str};
pub use error::{BindError, Error, ParseError, ParseErrorKind};
pub use model::{Document, Entry};
pub use parser::{parse_bytes, parse_reader, parse_str};
pub use scalar::{
    CoerceError, EnvField, FieldKind, Scalar, ScalarKind, coerce, parse_float, parse_int,
    parse_uint,
};
