//! Error display timing.

use crate::model::FieldType;

/// When a field's validation error is shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Show the error as soon as it is recorded (default).
    #[default]
    Immediate,
    /// Show the error only after the field has been blurred or a submit
    /// was attempted.
    WhenTouched,
}

impl ErrorDisplay {
    /// Display mode of a widget family. Free-typed inputs wait for blur so
    /// the user is not told off mid-keystroke.
    pub fn for_field_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text | FieldType::List => ErrorDisplay::WhenTouched,
            _ => ErrorDisplay::Immediate,
        }
    }

    /// Returns `true` if an error should be shown given the touched state.
    pub fn shows(self, touched: bool) -> bool {
        match self {
            ErrorDisplay::Immediate => true,
            ErrorDisplay::WhenTouched => touched,
        }
    }
}
