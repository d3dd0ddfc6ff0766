//! Field schema types.

use serde::Deserialize;
use serde::Serialize;

use super::Rule;
use super::Scalar;

/// Which widget family a field belongs to.
///
/// Drives defaulting, rendering and normalization. Unrecognised type names
/// deserialize to [`FieldType::Unknown`], which has no default and is never
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Select,
    Date,
    Checkbox,
    List,
    #[serde(other)]
    Unknown,
}

/// Visibility predicate: the field is shown while `field` holds `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependsOn {
    /// Name of the field whose value is inspected.
    pub field: String,
    /// Value that makes the dependent field visible.
    pub value: Scalar,
}

/// Validation block of a field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validation {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Static description of one form field.
///
/// Field schemas are immutable configuration. They can be built in code:
///
/// ```
/// use schemaform::model::{FieldSchema, Rule};
///
/// let field = FieldSchema::text("key_name")
///     .label("Key Name")
///     .placeholder("Enter a key name")
///     .rule(Rule::Alphanumeric)
///     .rule(Rule::length(1, 16));
/// assert_eq!(field.rules().len(), 2);
/// ```
///
/// or deserialized from the JSON shape used by form configs (camelCase
/// keys, see [`FormSchema::from_json`](crate::schema::FormSchema::from_json)).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Key used in the Value Map. Unique across the whole schema.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub field_type: FieldType,
    /// HTML-style input type ("text", "password", "email", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(rename = "placeHolder", default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Display format of a date field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Authored default for text and date fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    /// Authored default for checkbox fields; interpreted by truthiness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<Scalar>,
    /// Multiple selection, select fields only.
    #[serde(default)]
    pub multi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependsOn>,
    #[serde(default)]
    pub validation: Validation,
    /// Nested fields shown while this field's value is truthy. One level only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldSchema>,
}

impl FieldSchema {
    /// Creates a field of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Select)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Checkbox)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::List)
    }

    // -------------------------------------------------------------------------
    // Builder methods
    // -------------------------------------------------------------------------

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the authored default value.
    pub fn value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the authored checked state.
    pub fn checked(mut self, checked: impl Into<Scalar>) -> Self {
        self.checked = Some(checked.into());
        self
    }

    /// Allows multiple selection.
    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Shows this field only while `field` holds `value`.
    pub fn depends_on(mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.depends_on = Some(DependsOn {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a validation rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.validation.rules.push(rule);
        self
    }

    /// Appends a sub-field.
    pub fn sub_field(mut self, field: FieldSchema) -> Self {
        self.sub_fields.push(field);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The validation rules in declared order.
    pub fn rules(&self) -> &[Rule] {
        &self.validation.rules
    }

    /// Returns `true` if the field carries an `allow_empty` rule.
    pub fn allows_empty(&self) -> bool {
        self.rules().iter().any(|r| matches!(r, Rule::AllowEmpty))
    }

    /// The label, falling back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
