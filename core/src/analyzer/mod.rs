pub mod analyzer;
pub mod error;
mod returns;


pub use analyzer::{Binding, Signature, analyze};
pub use error::{TypeError, TypeErrorKind};
