// Author: Dustin Pilgrim
// License: MIT

//! Conversion between [`Value`] and untyped host data.
//!
//! Host data is anything implementing [`Untyped`]: a closed classification into
//! the shapes a [`Value`] can take, plus [`Shape::Opaque`] for everything else.
//! The crate implements it for `serde_json::Value` and for `Box<dyn Any>`.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::value::{Map, Value};

/// How a collection treats members that cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compaction {
    /// Skip the member and keep converting the rest.
    #[default]
    Drop,
    /// Give up on the whole conversion.
    Strict,
}

/// Options for [`Value::from_untyped_with`].
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    pub compaction: Compaction,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self { compaction: Compaction::Strict }
    }

    pub fn with_compaction(mut self, compaction: Compaction) -> Self {
        self.compaction = compaction;
        self
    }
}

/// The classification of one untyped host value.
pub enum Shape<'a, T> {
    Int(i64),
    Double(f64),
    Bool(bool),
    Text(&'a str),
    Seq(Vec<&'a T>),
    Map(Vec<(&'a str, &'a T)>),
    /// A number whose storage decides the kind: integers that fit `i64`
    /// become `Int`, everything else `Double`.
    Number(&'a serde_json::Number),
    /// Not representable as a [`Value`].
    Opaque,
}

/// Untyped host data that can be classified into a [`Shape`].
pub trait Untyped: Sized {
    fn shape(&self) -> Shape<'_, Self>;
}

impl Untyped for serde_json::Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            // An untyped null carries no kind of its own.
            serde_json::Value::Null => Shape::Opaque,
            serde_json::Value::Bool(b) => Shape::Bool(*b),
            serde_json::Value::Number(n) => Shape::Number(n),
            serde_json::Value::String(s) => Shape::Text(s.as_str()),
            serde_json::Value::Array(items) => Shape::Seq(items.iter().collect()),
            serde_json::Value::Object(map) => {
                Shape::Map(map.iter().map(|(k, v)| (k.as_str(), v)).collect())
            }
        }
    }
}

macro_rules! downcast_int {
    ($any:expr, $($ty:ty),*) => {
        $(
            if let Some(n) = $any.downcast_ref::<$ty>() {
                return Shape::Int(i64::from(*n));
            }
        )*
    };
}

impl Untyped for Box<dyn Any> {
    fn shape(&self) -> Shape<'_, Self> {
        let any: &dyn Any = &**self;

        downcast_int!(any, i64, i32, i16, i8, u32, u16, u8);
        // Unsigned values past i64::MAX become doubles, as serde_json numbers do.
        if let Some(n) = any.downcast_ref::<isize>() {
            return i64::try_from(*n).map_or(Shape::Opaque, Shape::Int);
        }
        if let Some(n) = any.downcast_ref::<u64>() {
            return i64::try_from(*n).map_or(Shape::Double(*n as f64), Shape::Int);
        }
        if let Some(n) = any.downcast_ref::<usize>() {
            return i64::try_from(*n).map_or(Shape::Double(*n as f64), Shape::Int);
        }
        if let Some(d) = any.downcast_ref::<f64>() {
            return Shape::Double(*d);
        }
        if let Some(d) = any.downcast_ref::<f32>() {
            return Shape::Double(f64::from(*d));
        }
        if let Some(b) = any.downcast_ref::<bool>() {
            return Shape::Bool(*b);
        }
        if let Some(s) = any.downcast_ref::<String>() {
            return Shape::Text(s.as_str());
        }
        if let Some(s) = any.downcast_ref::<&'static str>() {
            return Shape::Text(*s);
        }
        if let Some(items) = any.downcast_ref::<Vec<Box<dyn Any>>>() {
            return Shape::Seq(items.iter().collect());
        }
        if let Some(map) = any.downcast_ref::<HashMap<String, Box<dyn Any>>>() {
            return Shape::Map(map.iter().map(|(k, v)| (k.as_str(), v)).collect());
        }
        if let Some(map) = any.downcast_ref::<BTreeMap<String, Box<dyn Any>>>() {
            return Shape::Map(map.iter().map(|(k, v)| (k.as_str(), v)).collect());
        }
        if let Some(n) = any.downcast_ref::<serde_json::Number>() {
            return Shape::Number(n);
        }
        Shape::Opaque
    }
}

impl Value {
    /// Classify untyped host data, dropping members that cannot be represented.
    ///
    /// Returns `None` when `untyped` itself is not representable.
    pub fn from_untyped<U: Untyped>(untyped: &U) -> Option<Value> {
        convert(untyped, &ConversionOptions::default())
    }

    pub fn from_untyped_with<U: Untyped>(untyped: &U, options: &ConversionOptions) -> Option<Value> {
        convert(untyped, options)
    }

    /// Project the tree back into untyped host data.
    ///
    /// `Null` becomes JSON null. Non-finite doubles also become null since JSON
    /// numbers cannot hold them.
    pub fn project(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(items.iter().map(Value::project).collect()),
            Value::Dictionary(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.project())).collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.project()
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.project()
    }
}

fn number_to_value(n: &serde_json::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        Some(Value::Int(i))
    } else {
        n.as_f64().map(Value::Double)
    }
}

fn convert<U: Untyped>(untyped: &U, options: &ConversionOptions) -> Option<Value> {
    match untyped.shape() {
        Shape::Int(i) => Some(Value::Int(i)),
        Shape::Double(d) => Some(Value::Double(d)),
        Shape::Bool(b) => Some(Value::Bool(b)),
        Shape::Text(s) => Some(Value::String(s.to_string())),
        Shape::Seq(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match convert(item, options) {
                    Some(v) => array.push(v),
                    None if options.compaction == Compaction::Drop => {
                        debug!("dropping non-representable array element at index {}", index);
                    }
                    None => {
                        debug!("strict conversion failed at array index {}", index);
                        return None;
                    }
                }
            }
            Some(Value::Array(array))
        }
        Shape::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, item) in entries {
                match convert(item, options) {
                    Some(v) => {
                        map.entry(key.to_string()).or_insert(v);
                    }
                    None if options.compaction == Compaction::Drop => {
                        debug!("dropping non-representable dictionary entry '{}'", key);
                    }
                    None => {
                        debug!("strict conversion failed at dictionary key '{}'", key);
                        return None;
                    }
                }
            }
            Some(Value::Dictionary(map))
        }
        Shape::Number(n) => number_to_value(n),
        Shape::Opaque => None,
    }
}

#[cfg(test)]
mod tests;
