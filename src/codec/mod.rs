// Author: Dustin Pilgrim
// License: MIT

//! Codec adapter.
//!
//! Values are decoded from a [`DecodeChannel`] by probing kinds in a fixed
//! order and encoded/decoded through serde (see `serde_impl`).

use log::trace;
use serde::de::DeserializeSeed;

use crate::value::{Map, Value};
use crate::ValueError;

mod json;
mod serde_impl;

pub use json::JsonChannel;

use serde_impl::{DepthLimit, ValueSeed};

/// Default nesting limit applied by [`decode`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A single-value decode position.
///
/// Every probe is independent: a failed probe returns `None` and leaves the
/// channel where it was, so the next probe sees the same input.
pub trait DecodeChannel: Sized {
    /// `true` if the position holds an explicit null marker.
    fn decode_nil(&self) -> bool;
    fn decode_i64(&self) -> Option<i64>;
    fn decode_f64(&self) -> Option<f64>;
    fn decode_bool(&self) -> Option<bool>;
    fn decode_string(&self) -> Option<String>;
    /// The element positions of a sequence.
    fn decode_seq(&self) -> Option<Vec<Self>>;
    /// The entries of a string-keyed map.
    fn decode_map(&self) -> Option<Vec<(String, Self)>>;
}

/// Options for [`decode_with`].
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decode a [`Value`] with the default options.
pub fn decode<C: DecodeChannel>(channel: &C) -> Result<Value, ValueError> {
    decode_with(channel, &DecodeOptions::default())
}

/// Decode a [`Value`], committing to the first probe that succeeds:
/// null, integer, float, boolean, string, sequence, map.
pub fn decode_with<C: DecodeChannel>(channel: &C, options: &DecodeOptions) -> Result<Value, ValueError> {
    decode_at(channel, options, 0)
}

fn decode_at<C: DecodeChannel>(channel: &C, options: &DecodeOptions, depth: usize) -> Result<Value, ValueError> {
    if depth > options.max_depth {
        return Err(ValueError::depth_exceeded(options.max_depth));
    }

    let value = if channel.decode_nil() {
        Value::Null
    } else if let Some(i) = channel.decode_i64() {
        Value::Int(i)
    } else if let Some(d) = channel.decode_f64() {
        Value::Double(d)
    } else if let Some(b) = channel.decode_bool() {
        Value::Bool(b)
    } else if let Some(s) = channel.decode_string() {
        Value::String(s)
    } else if let Some(items) = channel.decode_seq() {
        let mut array = Vec::with_capacity(items.len());
        for item in &items {
            array.push(decode_at(item, options, depth + 1)?);
        }
        Value::Array(array)
    } else if let Some(entries) = channel.decode_map() {
        let mut map = Map::with_capacity(entries.len());
        for (key, item) in &entries {
            let decoded = decode_at(item, options, depth + 1)?;
            map.entry(key.clone()).or_insert(decoded);
        }
        Value::Dictionary(map)
    } else {
        return Err(ValueError::undecodable(depth));
    };

    trace!("decoded {} at depth {}", value.kind(), depth);
    Ok(value)
}

impl Value {
    /// Parse JSON text into a [`Value`].
    ///
    /// Tokenizing is left to serde_json with its own recursion limit turned
    /// off, so `options.max_depth` is the only nesting limit. Duplicate keys
    /// keep their first value, the same as every other decode path.
    pub fn from_json_str(input: &str, options: &DecodeOptions) -> Result<Value, ValueError> {
        let limit = DepthLimit::new(options.max_depth);
        let mut deserializer = serde_json::Deserializer::from_str(input);
        deserializer.disable_recursion_limit();

        let parsed = ValueSeed::root(&limit)
            .deserialize(&mut deserializer)
            .and_then(|value| deserializer.end().map(|()| value));

        match parsed {
            Ok(value) => {
                trace!("decoded {} from JSON text", value.kind());
                Ok(value)
            }
            Err(_) if limit.exceeded() => Err(ValueError::depth_exceeded(options.max_depth)),
            Err(e) => Err(ValueError::DecodeError {
                message: format!("Failed to parse JSON: {}", e),
                depth: 0,
                hint: Some(format!("Check the input near line {} column {}", e.line(), e.column())),
                code: Some(503),
            }),
        }
    }
}
