//! Value types held in the Value Map.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// Flat mapping from field name to its current value.
///
/// Keys are the names of every field encountered in the schema, sub-fields
/// included. A missing key and a key holding a falsy value are distinct.
pub type ValueMap = HashMap<String, Value>;

/// Formats accepted when an authored date default is given as text.
const DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// A plain literal: what authors write in a schema and what dependency
/// predicates compare against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// Text literal.
    Text(String),
}

impl Scalar {
    /// Returns `true` unless this is `false`, zero, NaN or empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Int(i) => *i != 0,
            Scalar::Float(f) => *f != 0.0 && !f.is_nan(),
            Scalar::Text(s) => !s.is_empty(),
        }
    }

    /// Returns the text if this is a text literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

// Numbers compare by value regardless of representation; no other
// cross-variant comparison is equal.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Int(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Int(a)) => {
                (*a as f64) == *b
            }
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// One option of a select field.
///
/// The `value` is what dependency predicates and equality checks see; the
/// label is display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The option's underlying value.
    pub value: Scalar,
    /// The display label.
    pub label: String,
}

impl SelectOption {
    /// Creates a new option.
    pub fn new(value: impl Into<Scalar>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// What a select widget reports when the user picks something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// A single chosen option.
    Single(SelectOption),
    /// Every option chosen in a multi-select.
    Multi(Vec<SelectOption>),
}

impl From<SelectOption> for Selection {
    fn from(option: SelectOption) -> Self {
        Selection::Single(option)
    }
}

impl From<Vec<SelectOption>> for Selection {
    fn from(options: Vec<SelectOption>) -> Self {
        Selection::Multi(options)
    }
}

/// One key/value row of a list field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListEntry {
    pub key: String,
    pub value: String,
}

impl ListEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The current value of one field.
///
/// Selections are kept distinct from plain literals so that comparisons go
/// through [`Value::comparable`] instead of inspecting the value's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text, boolean or number.
    Scalar(Scalar),
    /// A single chosen select option.
    Selected(SelectOption),
    /// Options chosen in a multi-select, or an empty selection.
    Selections(Vec<SelectOption>),
    /// A date and time chosen in a date picker.
    Date(NaiveDateTime),
    /// Key/value rows of a list field.
    List(Vec<ListEntry>),
}

impl Value {
    /// The empty text value.
    pub fn empty() -> Self {
        Value::Scalar(Scalar::Text(String::new()))
    }

    /// Returns `true` if this value counts as "filled in".
    ///
    /// Empty text, `false`, zero, an empty selection and an empty list are
    /// falsy. A chosen option and any date are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Scalar(s) => s.is_truthy(),
            Value::Selected(_) | Value::Date(_) => true,
            Value::Selections(options) => !options.is_empty(),
            Value::List(entries) => !entries.is_empty(),
        }
    }

    /// Returns `true` if this is exactly the empty string.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Text(s)) if s.is_empty())
    }

    /// Unwraps the value to the scalar a dependency predicate compares.
    ///
    /// Plain literals compare as themselves and a chosen option compares by
    /// its inner value. Other values have no comparable scalar.
    pub fn comparable(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Selected(option) => Some(&option.value),
            _ => None,
        }
    }

    /// The textual form pattern rules are tested against.
    pub fn as_text(&self) -> String {
        match self {
            Value::Scalar(s) => s.to_string(),
            Value::Selected(option) => option.value.to_string(),
            Value::Selections(options) => options
                .iter()
                .map(|o| o.value.to_string())
                .collect::<Vec<_>>()
                .join(","),
            Value::Date(date) => date.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::List(_) => String::new(),
        }
    }

    /// The length a `length` rule measures, if the value has one.
    ///
    /// Text is measured in characters, selections and lists in elements.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Scalar(Scalar::Text(s)) => Some(s.chars().count()),
            Value::Selections(options) => Some(options.len()),
            Value::List(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Interprets an authored default for a date field.
    ///
    /// Text that parses as a date or date-time becomes [`Value::Date`];
    /// anything else is kept as authored.
    pub fn from_authored_date(scalar: &Scalar) -> Self {
        if let Some(text) = scalar.as_str()
            && let Some(date) = parse_date(text)
        {
            return Value::Date(date);
        }
        Value::Scalar(scalar.clone())
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::Bool(_)) => "bool",
            Value::Scalar(Scalar::Int(_)) | Value::Scalar(Scalar::Float(_)) => "number",
            Value::Scalar(Scalar::Text(_)) => "text",
            Value::Selected(_) => "selected",
            Value::Selections(_) => "selections",
            Value::Date(_) => "date",
            Value::List(_) => "list",
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// =============================================================================
// From implementations
// =============================================================================

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Text(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(Scalar::Text(v))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Date(v)
    }
}

impl From<SelectOption> for Value {
    fn from(v: SelectOption) -> Self {
        Value::Selected(v)
    }
}

impl From<Selection> for Value {
    fn from(v: Selection) -> Self {
        match v {
            Selection::Single(option) => Value::Selected(option),
            Selection::Multi(options) => Value::Selections(options),
        }
    }
}

impl From<Vec<ListEntry>> for Value {
    fn from(v: Vec<ListEntry>) -> Self {
        Value::List(v)
    }
}
