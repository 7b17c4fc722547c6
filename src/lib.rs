//! A dynamically-typed, JSON-shaped value model.
//!
//! [`Value`] has seven kinds: null, integer, double, boolean, string, array and
//! string-keyed dictionary. Values are built from literals ([`value!`]), from
//! untyped host data ([`Value::from_untyped`]) or by decoding
//! ([`codec::decode`], serde), and read back through narrowing accessors,
//! subscripts, attribute-style access, projection or encoding.

mod access;
pub mod codec;
mod conversion;
pub mod error;
mod literal;
pub mod untyped;
mod value;

pub use access::Subscript;
pub use codec::{decode, decode_with, DecodeChannel, DecodeOptions, JsonChannel};
pub use error::ValueError;
pub use untyped::{Compaction, ConversionOptions, Shape, Untyped};
pub use value::{Map, Value, ValueKind};
