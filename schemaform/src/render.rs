//! Render capability contract.
//!
//! The core never draws anything. A renderer implements [`FieldRenderer`]
//! and [`render`] walks the form's current [`FieldView`] tree, calling one
//! method per shown field. Everything a renderer needs (value, displayed
//! error, options, configuration issues) is on the view; it must not
//! evaluate rules or dependencies itself.

use crate::error::ConfigIssue;
use crate::form::Form;
use crate::model::FieldSchema;
use crate::model::FieldType;
use crate::model::SelectOption;
use crate::model::Value;

/// What a renderer sees for one shown field.
#[derive(Debug, Clone)]
pub struct FieldView<'a> {
    /// Static declaration of the field.
    pub field: &'a FieldSchema,
    /// Current value for the widget. Select fields read their selection
    /// state, date fields their date state, others the Value Map.
    pub value: Option<&'a Value>,
    /// Error to display, already filtered by touched state.
    pub error: Option<&'a str>,
    /// Options of a select field, if supplied.
    pub options: Option<&'a [SelectOption]>,
    /// Configuration issues of the field.
    pub issues: &'a [ConfigIssue],
    /// Shown sub-fields, empty while the parent's list is closed.
    pub sub_fields: Vec<FieldView<'a>>,
}

impl FieldView<'_> {
    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field.field_type
    }

    /// The first issue that prevents drawing the widget.
    pub fn blocking_issue(&self) -> Option<&ConfigIssue> {
        self.issues.iter().find(|issue| issue.blocks_render())
    }
}

/// Widget-drawing side of a form.
pub trait FieldRenderer {
    fn text(&mut self, view: &FieldView<'_>);

    fn select(&mut self, view: &FieldView<'_>, options: &[SelectOption]);

    fn date(&mut self, view: &FieldView<'_>);

    fn checkbox(&mut self, view: &FieldView<'_>);

    fn list(&mut self, view: &FieldView<'_>);

    /// Draw a placeholder for a field that cannot be drawn.
    fn misconfigured(&mut self, view: &FieldView<'_>, issue: &ConfigIssue);

    /// Called before the shown sub-fields of `parent`.
    fn begin_sub_fields(&mut self, _parent: &FieldView<'_>) {}

    /// Called after the shown sub-fields of `parent`.
    fn end_sub_fields(&mut self, _parent: &FieldView<'_>) {}
}

/// Draws every shown field of the form, in declared order.
pub fn render<R: FieldRenderer + ?Sized>(form: &Form, renderer: &mut R) {
    for view in form.view() {
        dispatch(&view, renderer);
    }
}

fn dispatch<R: FieldRenderer + ?Sized>(view: &FieldView<'_>, renderer: &mut R) {
    if let Some(issue) = view.blocking_issue() {
        renderer.misconfigured(view, issue);
        return;
    }

    match view.field_type() {
        FieldType::Text => renderer.text(view),
        FieldType::Select => renderer.select(view, view.options.unwrap_or_default()),
        FieldType::Date => renderer.date(view),
        FieldType::Checkbox => renderer.checkbox(view),
        FieldType::List => renderer.list(view),
        FieldType::Unknown => return,
    }

    if !view.sub_fields.is_empty() {
        renderer.begin_sub_fields(view);
        for sub in &view.sub_fields {
            dispatch(sub, renderer);
        }
        renderer.end_sub_fields(view);
    }
}
