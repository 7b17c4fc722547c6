// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use crate::{Value, ValueError};

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> ValueError {
    ValueError::TypeError {
        message: format!("Expected {}, got {} {}", expected, value.kind(), value),
        hint: Some(hint.into()),
        code: Some(code),
    }
}

fn range_error(n: i64, target: &str, hint: &str, code: u32) -> ValueError {
    ValueError::TypeError {
        message: format!("Integer {} out of range for {}", n, target),
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(type_error("string", &value, "Use a string value", 401)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Double(d) => Ok(d),
            Value::Int(i) => Ok(i as f64),
            _ => Err(type_error("number", &value, "Use an integer or floating-point value", 402)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i),
            _ => Err(type_error("integer", &value, "Use an integer value; doubles are not truncated", 403)),
        }
    }
}

macro_rules! try_from_int {
    ($($ty:ty => $code:expr),*) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = ValueError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$ty>::try_from(n).map_err(|_| range_error(
                        n,
                        stringify!($ty),
                        concat!("Use an integer between ", stringify!($ty), "::MIN and ", stringify!($ty), "::MAX"),
                        $code,
                    ))
                }
            }
        )*
    };
}

try_from_int!(i32 => 406, u16 => 407, u32 => 408, u64 => 409, usize => 410);

impl TryFrom<Value> for bool {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s) if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") => {
                Err(ValueError::TypeError {
                    message: format!("Expected boolean, got string \"{}\"", s),
                    hint: Some("Did you mean the boolean true or false instead of a string?".into()),
                    code: Some(404),
                })
            }
            _ => Err(type_error("boolean", &value, "Use true or false", 404)),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = ValueError>,
{
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => {
                let mut result = Vec::with_capacity(items.len());
                for item in items {
                    result.push(T::try_from(item)?);
                }
                Ok(result)
            }
            _ => Err(type_error("array", &value, "Use an array [...]", 405)),
        }
    }
}

impl TryFrom<Value> for HashMap<String, Value> {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Dictionary(map) => Ok(map.into_iter().collect()),
            _ => Err(type_error("dictionary", &value, "Use a dictionary {...}", 411)),
        }
    }
}

impl Value {
    /// Extract a typed payload, treating `Null` as `None`.
    ///
    /// # Examples
    /// ```
    /// use rune_value::value;
    ///
    /// let v = value!({"port": 8080, "tls": null});
    /// assert_eq!(v["port"].clone().extract::<u16>().unwrap(), Some(8080));
    /// assert_eq!(v["tls"].clone().extract::<bool>().unwrap(), None);
    /// ```
    pub fn extract<T>(self) -> Result<Option<T>, ValueError>
    where
        T: TryFrom<Value, Error = ValueError>,
    {
        match self {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{value, Value, ValueError};

    #[test]
    fn test_string_conversion() {
        let result: Result<String, ValueError> = Value::String("hello".into()).try_into();
        assert_eq!(result.unwrap(), "hello");

        let result: Result<String, ValueError> = Value::Int(42).try_into();
        assert_eq!(result.unwrap_err().code(), Some(401));
    }

    #[test]
    fn test_f64_accepts_int() {
        assert_eq!(f64::try_from(Value::Double(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Value::Int(2)).unwrap(), 2.0);
        assert!(f64::try_from(Value::Bool(true)).is_err());
    }

    #[test]
    fn test_i64_rejects_double() {
        assert_eq!(i64::try_from(Value::Int(-9)).unwrap(), -9);
        let err = i64::try_from(Value::Double(1.0)).unwrap_err();
        assert_eq!(err.code(), Some(403));
    }

    #[test]
    fn test_narrow_integer_ranges() {
        assert_eq!(u16::try_from(Value::Int(8080)).unwrap(), 8080);
        assert_eq!(u16::try_from(Value::Int(70000)).unwrap_err().code(), Some(407));
        assert_eq!(u32::try_from(Value::Int(-1)).unwrap_err().code(), Some(408));
        assert_eq!(i32::try_from(Value::Int(i64::MAX)).unwrap_err().code(), Some(406));
        assert_eq!(usize::try_from(Value::Int(12)).unwrap(), 12);
        assert_eq!(u64::try_from(Value::Int(0)).unwrap(), 0);
    }

    #[test]
    fn test_bool_conversion_hint() {
        assert!(bool::try_from(Value::Bool(false)).is_ok());
        match bool::try_from(Value::String("True".into())) {
            Err(ValueError::TypeError { hint: Some(hint), .. }) => assert!(hint.contains("Did you mean")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_vec_conversion() {
        let names: Vec<String> = value!(["a", "b"]).try_into().unwrap();
        assert_eq!(names, vec!["a", "b"]);

        let mixed: Result<Vec<i64>, ValueError> = value!([1, "two"]).try_into();
        assert!(mixed.is_err());

        let not_array: Result<Vec<i64>, ValueError> = value!(1).try_into();
        assert_eq!(not_array.unwrap_err().code(), Some(405));
    }

    #[test]
    fn test_hashmap_conversion() {
        let map: HashMap<String, Value> = value!({"a": 1, "b": [true]}).try_into().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], Value::Int(1));

        let err = HashMap::<String, Value>::try_from(value!([1])).unwrap_err();
        assert_eq!(err.code(), Some(411));
    }

    #[test]
    fn test_extract_null_as_none() {
        assert_eq!(Value::Null.extract::<String>().unwrap(), None);
        assert_eq!(value!("x").extract::<String>().unwrap(), Some("x".to_string()));
        assert!(value!(1).extract::<String>().is_err());
    }
}
