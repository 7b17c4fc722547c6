// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use serde_json::json;

use crate::value;

struct NotRepresentable;

fn boxed<T: Any>(v: T) -> Box<dyn Any> {
    Box::new(v)
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ===== serde_json Input Tests =====

#[test]
fn test_json_scalars() {
    assert_eq!(Value::from_untyped(&json!(5)), Some(Value::Int(5)));
    assert_eq!(Value::from_untyped(&json!(-5)), Some(Value::Int(-5)));
    assert_eq!(Value::from_untyped(&json!(5.5)), Some(Value::Double(5.5)));
    assert_eq!(Value::from_untyped(&json!(true)), Some(Value::Bool(true)));
    assert_eq!(Value::from_untyped(&json!("s")), Some(Value::String("s".into())));
}

#[test]
fn test_json_number_storage_decides_kind() {
    // Stored as float even though the value is whole.
    assert_eq!(Value::from_untyped(&json!(2.0)), Some(Value::Double(2.0)));
    // Does not fit i64.
    assert_eq!(
        Value::from_untyped(&json!(u64::MAX)),
        Some(Value::Double(u64::MAX as f64))
    );
}

#[test]
fn test_json_null_is_not_representable() {
    assert_eq!(Value::from_untyped(&json!(null)), None);
}

#[test]
fn test_json_collections_drop_nulls() {
    init_logger();
    let converted = Value::from_untyped(&json!([1, null, "ok", {"a": null, "b": 2}])).unwrap();
    assert_eq!(converted, value!([1, "ok", {"b": 2}]));
}

#[test]
fn test_json_collections_strict() {
    init_logger();
    let input = json!({"a": 1, "b": [true, null]});
    assert_eq!(Value::from_untyped_with(&input, &ConversionOptions::strict()), None);

    let clean = json!({"a": 1, "b": [true, false]});
    assert_eq!(
        Value::from_untyped_with(&clean, &ConversionOptions::new().with_compaction(Compaction::Strict)),
        Some(value!({"a": 1, "b": [true, false]}))
    );
}

// ===== Box<dyn Any> Input Tests =====

#[test]
fn test_any_scalars() {
    assert_eq!(Value::from_untyped(&boxed(7i64)), Some(Value::Int(7)));
    assert_eq!(Value::from_untyped(&boxed(7i32)), Some(Value::Int(7)));
    assert_eq!(Value::from_untyped(&boxed(7u8)), Some(Value::Int(7)));
    assert_eq!(Value::from_untyped(&boxed(7usize)), Some(Value::Int(7)));
    assert_eq!(Value::from_untyped(&boxed(1.5f64)), Some(Value::Double(1.5)));
    assert_eq!(Value::from_untyped(&boxed(1.5f32)), Some(Value::Double(1.5)));
    assert_eq!(Value::from_untyped(&boxed(false)), Some(Value::Bool(false)));
    assert_eq!(Value::from_untyped(&boxed("str")), Some(Value::String("str".into())));
    assert_eq!(Value::from_untyped(&boxed(String::from("owned"))), Some(Value::String("owned".into())));
    assert_eq!(Value::from_untyped(&boxed(NotRepresentable)), None);
}

#[test]
fn test_any_large_unsigned_matches_json_number() {
    let expected = Some(Value::Double(u64::MAX as f64));
    assert_eq!(Value::from_untyped(&boxed(u64::MAX)), expected);
    assert_eq!(Value::from_untyped(&boxed(usize::MAX)), Some(Value::Double(usize::MAX as f64)));
    assert_eq!(Value::from_untyped(&json!(u64::MAX)), expected);
    assert_eq!(Value::from_untyped(&boxed(i64::MAX as u64)), Some(Value::Int(i64::MAX)));
}

#[test]
fn test_any_boxed_number() {
    let int = serde_json::Number::from(12);
    let float = serde_json::Number::from_f64(0.5).unwrap();
    assert_eq!(Value::from_untyped(&boxed(int)), Some(Value::Int(12)));
    assert_eq!(Value::from_untyped(&boxed(float)), Some(Value::Double(0.5)));
}

#[test]
fn test_any_list_compaction() {
    init_logger();
    let list: Vec<Box<dyn Any>> = vec![boxed(1i64), boxed("ok"), boxed(NotRepresentable), boxed(true)];
    let converted = Value::from_untyped(&boxed(list)).unwrap();
    assert_eq!(converted.len(), 3);
    assert_eq!(converted, value!([1, "ok", true]));
}

#[test]
fn test_any_list_strict_fails() {
    let list: Vec<Box<dyn Any>> = vec![boxed(1i64), boxed(NotRepresentable)];
    assert_eq!(Value::from_untyped_with(&boxed(list), &ConversionOptions::strict()), None);
}

#[test]
fn test_any_maps() {
    let mut inner: BTreeMap<String, Box<dyn Any>> = BTreeMap::new();
    inner.insert("deep".into(), boxed(2.5f64));

    let mut outer: HashMap<String, Box<dyn Any>> = HashMap::new();
    outer.insert("name".into(), boxed("svc"));
    outer.insert("skip".into(), boxed(NotRepresentable));
    outer.insert("nested".into(), boxed(inner));
    outer.insert("list".into(), boxed(vec![boxed(1i32)]));

    let converted = Value::from_untyped(&boxed(outer)).unwrap();
    assert_eq!(converted, value!({"name": "svc", "nested": {"deep": 2.5}, "list": [1]}));
    assert!(!converted.contains_key("skip"));
}

#[test]
fn test_any_map_with_wrong_key_type_is_opaque() {
    let mut map: HashMap<i32, Box<dyn Any>> = HashMap::new();
    map.insert(1, boxed(1i64));
    assert_eq!(Value::from_untyped(&boxed(map)), None);
}

// ===== Projection Tests =====

#[test]
fn test_project_keeps_int_double_distinct() {
    let projected = value!([1, 1.0]).project();
    assert!(projected[0].is_i64());
    assert!(projected[1].is_f64());
}

#[test]
fn test_project_shapes() {
    let v = value!({"n": null, "s": "x", "b": false, "a": [1, {"k": 2.5}]});
    assert_eq!(v.project(), json!({"n": null, "s": "x", "b": false, "a": [1, {"k": 2.5}]}));
    assert_eq!(Value::Double(f64::INFINITY).project(), serde_json::Value::Null);
    assert_eq!(serde_json::Value::from(&v), v.project());
}

#[test]
fn test_project_then_convert_reconstructs() {
    let original = json!({"id": 9, "ratio": 0.75, "tags": ["a", "b"], "on": true, "nested": {"x": [1, 2]}});
    let value = Value::from_untyped(&original).unwrap();
    assert_eq!(value.project(), original);
    assert_eq!(Value::from_untyped(&value.project()), Some(value));
}
