pub mod function;
pub mod value;

pub use function::{Builtin, Callable, NativeFn, UserFunction};
pub use value::Value;

#[cfg(test)]
mod value_test;
