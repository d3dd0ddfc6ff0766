//! Form instance: live Value and Error Maps plus change handlers.

use std::collections::HashMap;
use std::collections::HashSet;

use chrono::NaiveDateTime;
use log::debug;
use log::trace;
use log::warn;

use crate::config::FormConfig;
use crate::dependency;
use crate::error::ConfigIssue;
use crate::error::SubmitError;
use crate::model::FieldSchema;
use crate::model::FieldType;
use crate::model::ListEntry;
use crate::model::Selection;
use crate::model::Value;
use crate::model::ValueMap;
use crate::normalize::normalize_for_submit;
use crate::render::FieldView;
use crate::schema::FormSchema;
use crate::state::FieldSources;
use crate::state::InitialState;
use crate::validation::ErrorDisplay;
use crate::validation::ErrorMap;
use crate::validation::Validator;

/// A mounted form.
///
/// Owns the Value Map, the select and date slices kept alongside it, the
/// Error Map and the touched set. Every handler runs to completion and
/// leaves the slices consistent with each other: values are written first,
/// then validation is re-run against the updated map.
///
/// # Example
///
/// ```
/// use schemaform::form::Form;
/// use schemaform::model::{FieldSchema, Rule, Value};
/// use schemaform::schema::FormSchema;
/// use schemaform::state::FieldSources;
///
/// let schema = FormSchema::new(vec![
///     FieldSchema::text("key_name").rule(Rule::Required).rule(Rule::length(1, 16)),
/// ])
/// .unwrap();
/// let mut form = Form::new(schema, FieldSources::new());
///
/// form.set_text("key_name", "ab12");
///
/// let mut submitted = None;
/// form.submit(|values| submitted = Some(values)).unwrap();
/// assert_eq!(submitted.unwrap()["key_name"], Value::from("ab12"));
/// ```
#[derive(Debug, Clone)]
pub struct Form {
    schema: FormSchema,
    sources: FieldSources,
    config: FormConfig,
    values: ValueMap,
    selections: ValueMap,
    dates: ValueMap,
    errors: ErrorMap,
    touched: HashSet<String>,
    issues: HashMap<String, Vec<ConfigIssue>>,
}

impl Form {
    /// Mount a form with the default configuration.
    pub fn new(schema: FormSchema, sources: FieldSources) -> Self {
        Self::with_config(schema, sources, FormConfig::default())
    }

    /// Mount a form with an explicit configuration.
    pub fn with_config(schema: FormSchema, sources: FieldSources, config: FormConfig) -> Self {
        let InitialState {
            values,
            selections,
            dates,
        } = InitialState::derive(&schema, &sources);
        let issues = collect_issues(&schema, &sources);

        debug!(
            "Mounted form with {} field(s), {} initial value(s), {} misconfigured field(s)",
            schema.len(),
            values.len(),
            issues.len()
        );

        Self {
            schema,
            sources,
            config,
            values,
            selections,
            dates,
            errors: ErrorMap::new(),
            touched: HashSet::new(),
            issues,
        }
    }

    // -------------------------------------------------------------------------
    // State accessors
    // -------------------------------------------------------------------------

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn sources(&self) -> &FieldSources {
        &self.sources
    }

    /// The current Value Map.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// The current value of a field.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Selection state of select fields.
    pub fn selections(&self) -> &ValueMap {
        &self.selections
    }

    /// Current values of date fields.
    pub fn dates(&self) -> &ValueMap {
        &self.dates
    }

    /// The current Error Map.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The recorded error of a field, regardless of touched state.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// The error a renderer should show for a field right now.
    pub fn displayed_error(&self, name: &str) -> Option<&str> {
        let field = self.schema.field(name)?;
        let display = ErrorDisplay::for_field_type(field.field_type);
        if display.shows(self.is_touched(name)) {
            self.error(name)
        } else {
            None
        }
    }

    /// Returns `true` if no error is currently recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` once the field has been blurred or a submit failed.
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Configuration issues of a field.
    pub fn issues(&self, name: &str) -> &[ConfigIssue] {
        self.issues.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if the named field is currently shown.
    pub fn is_visible(&self, name: &str) -> bool {
        dependency::is_active(&self.schema, name, &self.values)
    }

    // -------------------------------------------------------------------------
    // Change handlers
    // -------------------------------------------------------------------------

    /// A text field changed.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) {
        self.write(name, Value::from(text.into()));
        self.revalidate_on_change(name);
    }

    /// A checkbox was toggled.
    ///
    /// A checkbox can open or close its sub-fields, so the whole map is
    /// revalidated.
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        self.write(name, Value::from(checked));
        if self.config.validate_on_change {
            self.revalidate_all();
        }
    }

    /// A date was picked. `None` clears the field.
    pub fn set_date(&mut self, name: &str, date: Option<NaiveDateTime>) {
        let value = date.map(Value::Date).unwrap_or_else(Value::empty);
        self.dates.insert(name.to_string(), value.clone());
        self.write(name, value);
        self.revalidate_on_change(name);
    }

    /// A select changed. `None` clears it to an empty selection.
    ///
    /// A selection can show or hide `dependsOn`-gated siblings, so the whole
    /// map is revalidated rather than just this field.
    pub fn set_selection(&mut self, name: &str, selection: Option<Selection>) {
        let value = selection
            .map(Value::from)
            .unwrap_or_else(|| Value::Selections(Vec::new()));
        self.selections.insert(name.to_string(), value.clone());
        self.write(name, value);
        if self.config.validate_on_change {
            debug!("Select '{}' changed, revalidating whole form", name);
            self.revalidate_all();
        }
    }

    /// The rows of a list field changed.
    pub fn set_list(&mut self, name: &str, entries: Vec<ListEntry>) {
        self.write(name, Value::List(entries));
        self.revalidate_on_change(name);
    }

    /// A field lost focus: mark it touched and validate it.
    pub fn blur(&mut self, name: &str) {
        trace!("Blur '{}'", name);
        self.touched.insert(name.to_string());
        self.revalidate_field(name);
    }

    // -------------------------------------------------------------------------
    // Validation and submit
    // -------------------------------------------------------------------------

    /// Run a full validation pass and replace the Error Map.
    pub fn validate(&mut self) -> &ErrorMap {
        self.revalidate_all();
        &self.errors
    }

    /// Validate and, if no field has an error, hand the normalized values
    /// to `on_submit`.
    ///
    /// The callback is invoked exactly once on success and never on
    /// failure. A refused submit marks every field touched so all errors
    /// become visible.
    pub fn submit<F>(&mut self, on_submit: F) -> Result<(), SubmitError>
    where
        F: FnOnce(ValueMap),
    {
        self.revalidate_all();

        if !self.errors.is_empty() {
            debug!("Submit refused, {} invalid field(s)", self.errors.len());
            let names: Vec<String> = self.schema.iter().map(|f| f.name.clone()).collect();
            self.touched.extend(names);
            return Err(SubmitError::Invalid {
                errors: self.errors.clone(),
            });
        }

        let normalized = normalize_for_submit(&self.schema, self.values.clone());
        debug!("Submit accepted with {} value(s)", normalized.len());
        on_submit(normalized);
        Ok(())
    }

    /// Discard all interaction and return to the initial state.
    pub fn reset(&mut self) {
        let InitialState {
            values,
            selections,
            dates,
        } = InitialState::derive(&self.schema, &self.sources);
        self.values = values;
        self.selections = selections;
        self.dates = dates;
        self.errors.clear();
        self.touched.clear();
        debug!("Form reset");
    }

    // -------------------------------------------------------------------------
    // Render model
    // -------------------------------------------------------------------------

    /// The fields a renderer should draw right now, in declared order.
    ///
    /// Hidden fields are left out. Open sub-field lists are nested under
    /// their parent. A field whose configuration prevents drawing it is
    /// included regardless of visibility so the problem stays in sight.
    pub fn view(&self) -> Vec<FieldView<'_>> {
        self.schema
            .fields()
            .iter()
            .filter(|field| self.shows(field))
            .map(|field| {
                let mut view = self.field_view(field);
                if view.blocking_issue().is_none()
                    && dependency::sub_fields_open(field, &self.values)
                {
                    view.sub_fields = field
                        .sub_fields
                        .iter()
                        .filter(|sub| self.shows(sub))
                        .map(|sub| self.field_view(sub))
                        .collect();
                }
                view
            })
            .collect()
    }

    fn shows(&self, field: &FieldSchema) -> bool {
        if field.field_type == FieldType::Unknown {
            return false;
        }
        dependency::is_visible(field, &self.values)
            || self.issues(&field.name).iter().any(ConfigIssue::blocks_render)
    }

    fn field_view<'a>(&'a self, field: &'a FieldSchema) -> FieldView<'a> {
        let value = match field.field_type {
            FieldType::Select => self.selections.get(&field.name),
            FieldType::Date => self.dates.get(&field.name),
            _ => self.values.get(&field.name),
        };

        FieldView {
            field,
            value,
            error: self.displayed_error(&field.name),
            options: self.sources.options_for(&field.name),
            issues: self.issues(&field.name),
            sub_fields: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn write(&mut self, name: &str, value: Value) {
        if !self.schema.contains(name) {
            warn!("Value written to undeclared field '{}'", name);
        }
        trace!("Set '{}' to {}", name, value.type_name());
        self.values.insert(name.to_string(), value);
    }

    fn revalidate_on_change(&mut self, name: &str) {
        if self.config.validate_on_change {
            self.revalidate_field(name);
        }
    }

    fn revalidate_field(&mut self, name: &str) {
        let result = Validator::new(&self.schema, &self.config).validate_field(name, &self.values);
        match result {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    fn revalidate_all(&mut self) {
        self.errors = Validator::new(&self.schema, &self.config).validate(&self.values);
    }
}

fn collect_issues(
    schema: &FormSchema,
    sources: &FieldSources,
) -> HashMap<String, Vec<ConfigIssue>> {
    let mut issues = schema.all_issues().clone();
    for field in schema.iter() {
        if field.field_type == FieldType::Select && sources.options_for(&field.name).is_none() {
            let issue = ConfigIssue::MissingOptions {
                field: field.name.clone(),
            };
            warn!("{}", issue);
            issues.entry(field.name.clone()).or_default().push(issue);
        }
    }
    issues
}
