//! Dependency evaluation.
//!
//! Visibility is a pure function of the field and the current Value Map and
//! is recomputed on every call; nothing here caches.

use crate::model::FieldSchema;
use crate::model::ValueMap;
use crate::schema::FormSchema;

/// Returns `true` if the field's `dependsOn` predicate holds.
///
/// A field without `dependsOn` is always visible. Otherwise the referenced
/// value is unwrapped to its comparable scalar (a chosen option compares by
/// its inner value) and must equal the declared value. A missing referenced
/// value hides the field.
pub fn is_visible(field: &FieldSchema, values: &ValueMap) -> bool {
    let Some(dep) = &field.depends_on else {
        return true;
    };
    values
        .get(&dep.field)
        .and_then(|target| target.comparable())
        .is_some_and(|scalar| *scalar == dep.value)
}

/// Returns `true` if the parent's sub-field list is open, i.e. the parent
/// has sub-fields and its own value is truthy.
pub fn sub_fields_open(parent: &FieldSchema, values: &ValueMap) -> bool {
    !parent.sub_fields.is_empty()
        && values
            .get(&parent.name)
            .is_some_and(|value| value.is_truthy())
}

/// Sub-fields currently shown: the parent's list is open and each
/// sub-field's own predicate holds.
pub fn active_sub_fields<'a>(
    parent: &'a FieldSchema,
    values: &'a ValueMap,
) -> impl Iterator<Item = &'a FieldSchema> + 'a {
    let open = sub_fields_open(parent, values);
    parent
        .sub_fields
        .iter()
        .filter(move |sub| open && is_visible(sub, values))
}

/// Returns `true` if the named field is currently shown, taking the
/// parent's visibility and value into account for sub-fields. Unknown
/// names are not active.
pub fn is_active(schema: &FormSchema, name: &str, values: &ValueMap) -> bool {
    let Some(field) = schema.field(name) else {
        return false;
    };
    if !is_visible(field, values) {
        return false;
    }
    match schema.parent(name) {
        Some(parent) => is_visible(parent, values) && sub_fields_open(parent, values),
        None => true,
    }
}

/// Returns `true` if the field, or the parent it is nested under, depends
/// on a field the schema does not declare. Such a field can never be shown.
pub fn is_unresolved(schema: &FormSchema, name: &str) -> bool {
    let dangling = |field: &FieldSchema| {
        field
            .depends_on
            .as_ref()
            .is_some_and(|dep| !schema.contains(&dep.field))
    };
    schema.field(name).is_some_and(dangling) || schema.parent(name).is_some_and(dangling)
}
