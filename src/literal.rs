// Author: Dustin Pilgrim
// License: MIT

//! Building values straight from Rust literals.

use crate::value::{Map, Value};

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::Double(f64::from(d))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Dictionary(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::from_entries(iter)
    }
}

impl Value {
    /// Build a dictionary from key/value pairs.
    ///
    /// When a key repeats, the first occurrence is kept and later ones are
    /// discarded.
    pub fn from_entries<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut map = Map::new();
        for (key, val) in entries {
            map.entry(key.into()).or_insert_with(|| val.into());
        }
        Value::Dictionary(map)
    }
}

/// Construct a [`Value`] from literal syntax.
///
/// ```
/// use rune_value::{value, Value};
///
/// let v = value!({
///     "name": "rune",
///     "version": 1,
///     "ratio": 0.5,
///     "tags": ["a", "b"],
///     "extra": null,
///     "name": "ignored"
/// });
/// assert_eq!(v["name"], Value::String("rune".into()));
/// assert_eq!(v["tags"].len(), 2);
/// ```
///
/// Any other expression goes through `Value::from`.
#[macro_export]
macro_rules! value {
    (@array [$($done:expr,)*]) => {
        ::std::vec![$($done,)*]
    };
    (@array [$($done:expr,)*] null $(, $($rest:tt)*)?) => {
        $crate::value!(@array [$($done,)* $crate::Value::Null,] $($($rest)*)?)
    };
    (@array [$($done:expr,)*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::value!(@array [$($done,)* $crate::value!([$($inner)*]),] $($($rest)*)?)
    };
    (@array [$($done:expr,)*] {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::value!(@array [$($done,)* $crate::value!({$($inner)*}),] $($($rest)*)?)
    };
    (@array [$($done:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::value!(@array [$($done,)* $crate::Value::from($next),] $($($rest)*)?)
    };

    (@object [$($done:expr,)*]) => {
        [$($done,)*]
    };
    (@object [$($done:expr,)*] $key:literal : null $(, $($rest:tt)*)?) => {
        $crate::value!(@object [$($done,)* ($key, $crate::Value::Null),] $($($rest)*)?)
    };
    (@object [$($done:expr,)*] $key:literal : [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::value!(@object [$($done,)* ($key, $crate::value!([$($inner)*])),] $($($rest)*)?)
    };
    (@object [$($done:expr,)*] $key:literal : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::value!(@object [$($done,)* ($key, $crate::value!({$($inner)*})),] $($($rest)*)?)
    };
    (@object [$($done:expr,)*] $key:literal : $val:expr $(, $($rest:tt)*)?) => {
        $crate::value!(@object [$($done,)* ($key, $crate::Value::from($val)),] $($($rest)*)?)
    };

    (null) => {
        $crate::Value::Null
    };
    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };
    ([ $($tt:tt)+ ]) => {
        $crate::Value::Array($crate::value!(@array [] $($tt)+))
    };
    ({}) => {
        $crate::Value::Dictionary($crate::Map::new())
    };
    ({ $($tt:tt)+ }) => {
        $crate::Value::from_entries($crate::value!(@object [] $($tt)+))
    };
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
