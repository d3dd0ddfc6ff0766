//! Error types

mod issue;
mod schema;
mod submit;

pub use issue::*;
pub use schema::*;
pub use submit::*;
