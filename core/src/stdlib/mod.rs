//! Spike standard library
//!
//! Predeclared functions. The analyzer binds their signatures and the
//! evaluator binds their implementations from the same [`BUILTINS`] table.

use std::io::{self, Write};

use crate::types::TypeId;
use crate::values::{Builtin, Value};

pub static BUILTINS: &[Builtin] = &[Builtin {
    name: "print",
    params: &[("s", TypeId::Object)],
    return_type: TypeId::Void,
    function: print,
}];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Writes the textual form of its argument followed by a newline.
fn print(out: &mut dyn Write, args: &[Value]) -> Result<Value, io::Error> {
    let mut first = true;
    for arg in args {
        if !first {
            out.write_all(b" ")?;
        }
        write!(out, "{}", arg)?;
        first = false;
    }
    out.write_all(b"\n")?;
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_writes_line() {
        let mut out = Vec::new();
        let result = print(&mut out, &[Value::Double(2.0)]).unwrap();
        assert_eq!(result, Value::Null);
        assert_eq!(String::from_utf8(out).unwrap(), "2.0\n");
    }

    #[test]
    fn test_lookup() {
        let builtin = lookup("print").unwrap();
        assert_eq!(builtin.arity(), 1);
        assert_eq!(builtin.params[0].1, TypeId::Object);
        assert_eq!(builtin.return_type, TypeId::Void);
        assert!(lookup("println").is_none());
    }
}
