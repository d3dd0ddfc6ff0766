//! Submission normalization.

use log::trace;

use crate::model::FieldType;
use crate::model::Value;
use crate::model::ValueMap;
use crate::schema::FormSchema;

/// Fixes up values a widget cannot report faithfully before they are
/// handed to the submit callback.
///
/// A checkbox read back as the empty string (never interacted with)
/// becomes `false`. Every other value passes through unchanged.
pub fn normalize_for_submit(schema: &FormSchema, mut values: ValueMap) -> ValueMap {
    for (key, value) in values.iter_mut() {
        let is_checkbox = schema
            .field(key)
            .is_some_and(|f| f.field_type == FieldType::Checkbox);

        if is_checkbox && value.is_empty_text() {
            trace!("Normalizing unset checkbox '{}' to false", key);
            *value = Value::from(false);
        }
    }
    values
}
