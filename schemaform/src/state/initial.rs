//! Initial state derivation.
//!
//! One per-field default rule, applied through different field type filters
//! to produce the three state slices a form keeps: every value, the select
//! selections and the date values.

use log::trace;

use super::FieldSources;
use crate::model::FieldSchema;
use crate::model::FieldType;
use crate::model::Value;
use crate::model::ValueMap;
use crate::schema::FormSchema;

/// Computes a field's default value.
///
/// - text: the authored `value`, else empty text
/// - date: the authored `value` (parsed as a date when possible), else empty text
/// - checkbox: truthiness of the authored `checked`
/// - select: the supplied default selection, else an empty selection
/// - list: the supplied default rows, else an empty list
///
/// Returns `None` for [`FieldType::Unknown`]; such fields get no key.
pub fn resolve_default(field: &FieldSchema, sources: &FieldSources) -> Option<Value> {
    let value = match field.field_type {
        FieldType::Text => field.value.clone().map(Value::Scalar).unwrap_or_else(Value::empty),
        FieldType::Date => field
            .value
            .as_ref()
            .map(Value::from_authored_date)
            .unwrap_or_else(Value::empty),
        FieldType::Checkbox => {
            Value::from(field.checked.as_ref().is_some_and(|c| c.is_truthy()))
        }
        FieldType::Select => sources
            .select_defaults
            .get(&field.name)
            .cloned()
            .map(Value::from)
            .unwrap_or(Value::Selections(Vec::new())),
        FieldType::List => Value::List(
            sources
                .list_defaults
                .get(&field.name)
                .cloned()
                .unwrap_or_default(),
        ),
        FieldType::Unknown => return None,
    };
    Some(value)
}

/// Derives defaults for every field (sub-fields included) whose type passes
/// `filter`.
pub fn derive_values<F>(schema: &FormSchema, sources: &FieldSources, filter: F) -> ValueMap
where
    F: Fn(FieldType) -> bool,
{
    let mut values = ValueMap::new();
    for field in schema.iter().filter(|f| filter(f.field_type)) {
        match resolve_default(field, sources) {
            Some(value) => {
                values.insert(field.name.clone(), value);
            }
            None => trace!("No default for field '{}'", field.name),
        }
    }
    values
}

/// Derives the initial Value Map: a default for every field of a known type.
pub fn derive_initial_values(schema: &FormSchema, sources: &FieldSources) -> ValueMap {
    derive_values(schema, sources, |_| true)
}

/// The three state slices a form instance starts from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialState {
    /// Every field's value.
    pub values: ValueMap,
    /// Select fields only.
    pub selections: ValueMap,
    /// Date fields only.
    pub dates: ValueMap,
}

impl InitialState {
    /// Derives all three slices from the same default rule.
    pub fn derive(schema: &FormSchema, sources: &FieldSources) -> Self {
        Self {
            values: derive_initial_values(schema, sources),
            selections: derive_values(schema, sources, |t| t == FieldType::Select),
            dates: derive_values(schema, sources, |t| t == FieldType::Date),
        }
    }
}
