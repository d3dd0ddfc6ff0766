//! Caller-supplied side data for select and list fields.

use std::collections::HashMap;

use crate::model::ListEntry;
use crate::model::SelectOption;
use crate::model::Selection;

/// Data the schema cannot carry itself, keyed by field name.
///
/// Select and list fields take their defaults from here rather than from
/// the schema's `value` attribute, unlike text, date and checkbox fields.
/// The asymmetry is intentional: option lists and their current selection
/// usually come from the caller's own data, not from static configuration.
#[derive(Debug, Clone, Default)]
pub struct FieldSources {
    /// Initial selection per select field.
    pub select_defaults: HashMap<String, Selection>,
    /// Initial rows per list field.
    pub list_defaults: HashMap<String, Vec<ListEntry>>,
    /// Available options per select field. A select field without an
    /// entry is reported as misconfigured.
    pub select_options: HashMap<String, Vec<SelectOption>>,
}

impl FieldSources {
    /// Create empty sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options of a select field.
    pub fn options(mut self, field: impl Into<String>, options: Vec<SelectOption>) -> Self {
        self.select_options.insert(field.into(), options);
        self
    }

    /// Set the initial selection of a select field.
    pub fn select_default(
        mut self,
        field: impl Into<String>,
        selection: impl Into<Selection>,
    ) -> Self {
        self.select_defaults.insert(field.into(), selection.into());
        self
    }

    /// Set the initial rows of a list field.
    pub fn list_default(mut self, field: impl Into<String>, entries: Vec<ListEntry>) -> Self {
        self.list_defaults.insert(field.into(), entries);
        self
    }

    /// The options of a select field, if supplied.
    pub fn options_for(&self, field: &str) -> Option<&[SelectOption]> {
        self.select_options.get(field).map(Vec::as_slice)
    }
}
