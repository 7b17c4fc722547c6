// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use indexmap::IndexMap;

/// String-keyed map held by [`Value::Dictionary`].
///
/// Insertion order is preserved for display and encoding, but it is not part of
/// equality or hashing.
pub type Map = IndexMap<String, Value>;

/// A dynamically-typed, JSON-shaped value.
///
/// Every variant owns its children; nothing is shared between trees.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Double(f64),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Dictionary(Map),
}

/// The variant tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Int,
    Double,
    Bool,
    String,
    Array,
    Dictionary,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Int => "integer",
            ValueKind::Double => "double",
            ValueKind::Bool => "boolean",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Value::Int(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        if let Value::Double(d) = self {
            Some(*d)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if let Value::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_dictionary(&self) -> Option<&Map> {
        if let Value::Dictionary(map) = self {
            Some(map)
        } else {
            None
        }
    }

    /// Numeric view that widens `Int` to `f64`. `as_double` stays strict.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Consumes the value, returning the array payload if this is an array.
    pub fn into_array(self) -> Option<Vec<Value>> {
        if let Value::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// Consumes the value, returning the map payload if this is a dictionary.
    pub fn into_dictionary(self) -> Option<Map> {
        if let Value::Dictionary(map) = self {
            Some(map)
        } else {
            None
        }
    }
}

/// Bit pattern used for both equality and hashing of doubles.
/// All NaNs collapse to one pattern and `-0.0` collapses to `0.0`.
fn canonical_bits(d: f64) -> u64 {
    if d.is_nan() {
        f64::NAN.to_bits()
    } else if d == 0.0 {
        0
    } else {
        d.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // IndexMap equality is order-insensitive
            (Value::Dictionary(a), Value::Dictionary(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int(i) => i.hash(state),
            Value::Double(d) => canonical_bits(*d).hash(state),
            Value::Bool(b) => b.hash(state),
            Value::String(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Dictionary(map) => {
                // Entries are hashed independently and summed so that two
                // dictionaries with different insertion orders agree.
                let mut combined: u64 = 0;
                for (key, val) in map {
                    let mut entry = DefaultHasher::new();
                    key.hash(&mut entry);
                    val.hash(&mut entry);
                    combined = combined.wrapping_add(entry.finish());
                }
                map.len().hash(state);
                combined.hash(state);
            }
        }
    }
}

/// Compact JSON text. Non-finite doubles are written as `null`, matching
/// [`Value::project`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Double(d) if d.is_finite() => write!(f, "{:?}", d),
            Value::Double(_) => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Dictionary(map) => {
                f.write_str("{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{}", val)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}
