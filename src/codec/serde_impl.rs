use std::cell::Cell;
use std::fmt;

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{Map, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Dictionary(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, val) in map {
                    out.serialize_entry(key, val)?;
                }
                out.end()
            }
        }
    }
}

// Size hints come from the input, so they are capped.
const PREALLOC_LIMIT: usize = 4096;

/// Nesting limit shared by every level of one deserialization.
///
/// `exceeded` is set when the limit trips so the caller can tell a depth
/// failure apart from a malformed-input failure of the format.
pub(super) struct DepthLimit {
    max_depth: usize,
    exceeded: Cell<bool>,
}

impl DepthLimit {
    pub(super) fn new(max_depth: usize) -> Self {
        Self { max_depth, exceeded: Cell::new(false) }
    }

    pub(super) fn exceeded(&self) -> bool {
        self.exceeded.get()
    }
}

/// Deserializes one position at `depth`, checking the limit before the
/// format is asked for anything.
#[derive(Clone, Copy)]
pub(super) struct ValueSeed<'a> {
    depth: usize,
    limit: &'a DepthLimit,
}

impl<'a> ValueSeed<'a> {
    pub(super) fn root(limit: &'a DepthLimit) -> Self {
        Self { depth: 0, limit }
    }

    fn child(self) -> Self {
        Self { depth: self.depth + 1, limit: self.limit }
    }
}

impl<'de, 'a> DeserializeSeed<'de> for ValueSeed<'a> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        if self.depth > self.limit.max_depth {
            self.limit.exceeded.set(true);
            return Err(de::Error::custom(format!(
                "nesting exceeds maximum depth of {}",
                self.limit.max_depth
            )));
        }
        deserializer.deserialize_any(ValueVisitor { seed: self })
    }
}

struct ValueVisitor<'a> {
    seed: ValueSeed<'a>,
}

impl<'de, 'a> Visitor<'de> for ValueVisitor<'a> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, integer, float, boolean, string, sequence or string-keyed map")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.seed.deserialize(deserializer)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    // Out of i64 range the integer probe fails and the float probe takes it.
    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(i64::try_from(value).map_or(Value::Double(value as f64), Value::Int))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Double(value))
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let child = self.seed.child();
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(PREALLOC_LIMIT));
        while let Some(item) = seq.next_element_seed(child)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let child = self.seed.child();
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0).min(PREALLOC_LIMIT));
        while let Some(key) = access.next_key::<String>()? {
            // Later duplicates are still read so the input stays in sync.
            let val = access.next_value_seed(child)?;
            map.entry(key).or_insert(val);
        }
        Ok(Value::Dictionary(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let limit = DepthLimit::new(usize::MAX);
        ValueSeed::root(&limit).deserialize(deserializer)
    }
}
