// Author: Dustin Pilgrim
// License: MIT

use std::ops::Index;

use crate::value::Value;

static NULL: Value = Value::Null;

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// A position that can be looked up in a [`Value`]: an array index or a
/// dictionary key.
pub trait Subscript: private::Sealed {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value>;
}

impl Subscript for usize {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        value.as_array().and_then(|items| items.get(*self))
    }
}

impl Subscript for str {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        value.as_dictionary().and_then(|map| map.get(self))
    }
}

impl Subscript for String {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(value)
    }
}

impl<T: Subscript + ?Sized> Subscript for &T {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (**self).index_into(value)
    }
}

impl Value {
    /// Look up an array element or a dictionary entry.
    ///
    /// Out-of-range indices, missing keys and lookups on the wrong kind all
    /// return `None`.
    ///
    /// # Examples
    /// ```
    /// use rune_value::value;
    ///
    /// let v = value!({"ports": [80, 443]});
    /// assert_eq!(v.get("ports").and_then(|p| p.get(1)), Some(&value!(443)));
    /// assert_eq!(v.get(0), None);
    /// ```
    pub fn get<I: Subscript>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// Attribute-style lookup: like `get(name)` but never absent.
    ///
    /// A missing key or a non-dictionary receiver gives `Null`, so chains such
    /// as `v.attr("a").attr("b").attr("c")` need no intermediate checks.
    pub fn attr(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of elements or entries. Scalars and `Null` have length 0.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Dictionary(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of a dictionary in insertion order; empty for every other kind.
    pub fn keys(&self) -> Vec<&str> {
        self.as_dictionary()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// `value["key"]` is attribute-style access: it yields `Null` instead of
/// panicking.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.attr(key)
    }
}
