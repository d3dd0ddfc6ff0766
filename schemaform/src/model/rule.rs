//! Validation rule declarations.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// One validation check attached to a field.
///
/// Rules are applied in declared order and the first failing rule decides
/// the field's error. In JSON a rule is an object tagged by `type`:
///
/// ```
/// use schemaform::model::Rule;
///
/// let rule: Rule = serde_json::from_str(r#"{"type": "length", "min": 1, "max": 16}"#).unwrap();
/// assert_eq!(rule, Rule::length(1, 16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// The value must be truthy.
    Required,
    /// The value must look like `local@domain.tld`.
    Email,
    /// The value may contain only word characters and spaces.
    Alphanumeric,
    /// The value's length must lie within the bounds. A missing bound is
    /// not checked.
    Length {
        #[serde(default, deserialize_with = "lenient_bound")]
        min: Option<usize>,
        #[serde(default, deserialize_with = "lenient_bound")]
        max: Option<usize>,
    },
    /// Character class restriction, see
    /// [`PasswordSemantics`](crate::config::PasswordSemantics).
    Password {
        #[serde(rename = "allowedChars", default)]
        allowed_chars: Vec<CharClass>,
    },
    /// The value must equal another field's value.
    Match {
        #[serde(rename = "matchField")]
        match_field: String,
    },
    /// An empty string skips every other rule of the field.
    AllowEmpty,
    /// A rule whose `type` is not recognised. It always passes and is
    /// reported as a [`ConfigIssue`](crate::error::ConfigIssue).
    #[serde(other)]
    Unknown,
}

impl Rule {
    /// A `length` rule with both bounds.
    pub fn length(min: usize, max: usize) -> Self {
        Rule::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A `password` rule over the given classes.
    pub fn password(allowed_chars: impl IntoIterator<Item = CharClass>) -> Self {
        Rule::Password {
            allowed_chars: allowed_chars.into_iter().collect(),
        }
    }

    /// A `match` rule against the named field.
    pub fn matches(field: impl Into<String>) -> Self {
        Rule::Match {
            match_field: field.into(),
        }
    }

    /// The rule's tag as written in a schema.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Alphanumeric => "alphanumeric",
            Rule::Length { .. } => "length",
            Rule::Password { .. } => "password",
            Rule::Match { .. } => "match",
            Rule::AllowEmpty => "allow_empty",
            Rule::Unknown => "unknown",
        }
    }
}

/// A character class a `password` rule may allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Alphanumeric,
    Symbols,
}

impl CharClass {
    /// The regex character class for this kind.
    pub fn pattern(self) -> &'static str {
        match self {
            CharClass::Alphanumeric => r"[A-Z0-9.-]",
            CharClass::Symbols => r"[*.!@#$%^&(){}\[\]:;<>,.?/~_+\-=|\\]",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Alphanumeric => f.write_str("alphanumeric"),
            CharClass::Symbols => f.write_str("symbols"),
        }
    }
}

/// Accepts a length bound written either as a number or as numeric text.
fn lenient_bound<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bound {
        Number(usize),
        Text(String),
    }

    match Option::<Bound>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Bound::Number(n)) => Ok(Some(n)),
        Some(Bound::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                <D::Error as serde::de::Error>::custom(format!("invalid length bound '{}'", s))
            }),
    }
}
