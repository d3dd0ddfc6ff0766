//! Form configuration types.

/// Per-form behavior switches.
///
/// # Example
///
/// ```
/// use schemaform::config::{FormConfig, PasswordSemantics};
///
/// let config = FormConfig::new()
///     .password_semantics(PasswordSemantics::AllowListed)
///     .skip_hidden();
/// assert!(!config.validate_hidden);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// How the `password` rule interprets its character classes.
    pub password_semantics: PasswordSemantics,

    /// Validate fields whose dependency predicate currently fails.
    /// When false, hidden fields never carry errors and never block submit.
    pub validate_hidden: bool,

    /// Re-run validation from the change handlers. When false, validation
    /// runs on blur and on submit only.
    pub validate_on_change: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            password_semantics: PasswordSemantics::default(),
            validate_hidden: true,
            validate_on_change: true,
        }
    }
}

impl FormConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password rule semantics.
    pub fn password_semantics(mut self, semantics: PasswordSemantics) -> Self {
        self.password_semantics = semantics;
        self
    }

    /// Skip validation of hidden fields.
    pub fn skip_hidden(mut self) -> Self {
        self.validate_hidden = false;
        self
    }

    /// Only validate on blur and submit.
    pub fn validate_on_submit_only(mut self) -> Self {
        self.validate_on_change = false;
        self
    }
}

/// Interpretation of the `password` rule's `allowedChars`.
///
/// Each allowed class contributes one regex character class; the classes
/// are concatenated and anchored, case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordSemantics {
    /// Reject the value when it matches the composed pattern in full.
    /// With classes `[alphanumeric]` this rejects any single character
    /// from `[A-Z0-9.-]` and accepts everything else.
    #[default]
    RejectOnMatch,
    /// Reject the value unless every character belongs to one of the
    /// allowed classes.
    AllowListed,
}
