//! Schema and value types

mod field;
mod rule;
mod value;

pub use field::*;
pub use rule::*;
pub use value::*;
