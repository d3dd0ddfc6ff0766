//! Schema load errors

/// Error returned when a schema cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two fields share a name. Names must be unique across the whole
    /// tree because the Value Map is flat.
    #[error("Field name '{name}' is declared more than once")]
    DuplicateField { name: String },

    /// A sub-field declares sub-fields of its own.
    #[error("Sub-field '{name}' of '{parent}' declares nested sub-fields")]
    NestingTooDeep { parent: String, name: String },

    /// A field has an empty name.
    #[error("Field name must not be empty")]
    EmptyName,

    /// The schema JSON could not be parsed.
    #[error("Invalid schema JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SchemaError {
    /// Creates a new duplicate field error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }
}
