//! Form validation.
//!
//! A [`Validator`] runs each field's rules in declared order and keeps the
//! first failure as the field's error.
//!
//! # Example
//!
//! ```
//! use schemaform::config::FormConfig;
//! use schemaform::model::{FieldSchema, Rule, Value, ValueMap};
//! use schemaform::schema::FormSchema;
//! use schemaform::validation::Validator;
//!
//! let schema = FormSchema::new(vec![
//!     FieldSchema::text("key_name").rule(Rule::Required).rule(Rule::length(1, 16)),
//! ])
//! .unwrap();
//! let config = FormConfig::default();
//!
//! let mut values = ValueMap::new();
//! values.insert("key_name".into(), Value::from(""));
//!
//! let errors = Validator::new(&schema, &config).validate(&values);
//! assert_eq!(errors["key_name"], "Required");
//! ```

mod error_display;
mod rules;
mod validator;

use std::collections::HashMap;

pub use error_display::ErrorDisplay;
pub use rules::check_rule;
pub use validator::Validator;

/// Field name to error message. A missing key means no error.
pub type ErrorMap = HashMap<String, String>;
