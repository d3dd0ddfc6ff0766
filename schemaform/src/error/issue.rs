//! Field configuration issues

/// A configuration problem local to one field.
///
/// Issues never abort the form. They are reported alongside the field so a
/// renderer can show a placeholder in its place while unrelated fields keep
/// working.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    /// A select field has no option list in the supplied sources.
    #[error("Select field '{field}' has no options")]
    MissingOptions { field: String },

    /// `dependsOn` names a field that does not exist.
    #[error("Field '{field}' depends on unknown field '{target}'")]
    UnresolvedDependency { field: String, target: String },

    /// A `match` rule names a field that does not exist.
    #[error("Field '{field}' must match unknown field '{target}'")]
    UnresolvedMatch { field: String, target: String },

    /// A rule with an unrecognised `type`. It never fails.
    #[error("Field '{field}' has a rule of unknown type")]
    UnknownRule { field: String },
}

impl ConfigIssue {
    /// Returns `true` if the field cannot be drawn at all.
    ///
    /// A field whose `dependsOn` target is missing could never become
    /// visible, so it is drawn as a placeholder instead.
    pub fn blocks_render(&self) -> bool {
        matches!(
            self,
            ConfigIssue::MissingOptions { .. } | ConfigIssue::UnresolvedDependency { .. }
        )
    }
}
