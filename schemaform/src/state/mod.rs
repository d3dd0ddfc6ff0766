//! Initial form state

mod initial;
mod sources;

pub use initial::*;
pub use sources::*;
