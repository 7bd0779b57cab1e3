use crate::stdlib;
use crate::types::TypeId;
use crate::values::{Callable, Value};

#[test]
fn test_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::Double(2.0).to_string(), "2.0");
    assert_eq!(Value::Double(2.5).to_string(), "2.5");
    assert_eq!(Value::Double(-0.125).to_string(), "-0.125");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::from("raw text").to_string(), "raw text");
}

#[test]
fn test_double_special_values() {
    assert_eq!(Value::Double(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::Double(f64::NAN).to_string(), "NaN");
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::from("").is_truthy());
}

#[test]
fn test_equality_is_same_variant() {
    assert_eq!(Value::Int(1), Value::Int(1));
    assert_ne!(Value::Int(1), Value::Double(1.0));
    assert_eq!(Value::Null, Value::Null);
    assert_ne!(Value::Null, Value::Bool(false));
    assert_eq!(Value::from("a"), Value::from(String::from("a")));
}

#[test]
fn test_native_callable_identity() {
    let print = stdlib::lookup("print").expect("print is a builtin");
    let a = Value::Callable(Callable::Native(print));
    let b = Value::Callable(Callable::Native(print));
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "<native fn print>");
    assert_eq!(a.type_id(), TypeId::Object);
}

#[test]
fn test_accessors() {
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::Int(3).as_double(), None);
    assert_eq!(Value::Double(0.5).as_double(), Some(0.5));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::from("s").as_str(), Some("s"));
    assert!(Value::Null.is_null());
    assert!(Value::Null.as_callable().is_none());
}
