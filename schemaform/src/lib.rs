//! Schema-driven forms.
//!
//! A [`FormSchema`] declares fields, their types, defaults, visibility
//! dependencies and validation rules. A [`Form`] mounted from it derives
//! the initial state, keeps the Value and Error Maps current as the user
//! interacts, and hands a normalized Value Map to the submit callback once
//! validation passes. Drawing widgets is left to a [`FieldRenderer`].

pub mod config;
pub mod dependency;
pub mod error;
pub mod form;
pub mod model;
pub mod normalize;
pub mod render;
pub mod schema;
pub mod state;
pub mod validation;

pub use config::FormConfig;
pub use form::Form;
pub use render::FieldRenderer;
pub use render::FieldView;
pub use schema::FormSchema;
pub use state::FieldSources;
pub use validation::ErrorMap;
pub use validation::Validator;
