//! End-to-end tests for mounted forms.

use chrono::NaiveDate;
use schemaform::FieldSources;
use schemaform::Form;
use schemaform::FormConfig;
use schemaform::FormSchema;
use schemaform::error::SubmitError;
use schemaform::model::FieldSchema;
use schemaform::model::ListEntry;
use schemaform::model::Rule;
use schemaform::model::SelectOption;
use schemaform::model::Value;
use schemaform::model::ValueMap;

fn init_logger() {
    let _ = simplelog::TestLogger::init(
        simplelog::LevelFilter::Trace,
        simplelog::Config::default(),
    );
}

fn key_name_form() -> Form {
    let schema =
        FormSchema::from_json(include_str!("fixtures/key_name.json")).expect("fixture parses");
    Form::new(schema, FieldSources::new())
}

fn signup_schema() -> (FormSchema, FieldSources) {
    let schema =
        FormSchema::from_json(include_str!("fixtures/signup.json")).expect("fixture parses");
    let sources = FieldSources::new().options(
        "account_type",
        vec![
            SelectOption::new("personal", "Personal"),
            SelectOption::new("business", "Business"),
        ],
    );
    (schema, sources)
}

/// Signup form that only validates what the user can see.
fn signup_form() -> Form {
    let (schema, sources) = signup_schema();
    Form::with_config(schema, sources, FormConfig::new().skip_hidden())
}

// =============================================================================
// key_name form
// =============================================================================

#[test]
fn test_submit_valid_key_name() {
    init_logger();
    let mut form = key_name_form();
    form.set_text("key_name", "ab12");

    let mut calls: Vec<ValueMap> = Vec::new();
    form.submit(|values| calls.push(values)).unwrap();

    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0]["key_name"], Value::from("ab12"));
}

#[test]
fn test_submit_empty_key_name_is_refused() {
    init_logger();
    let mut form = key_name_form();

    let mut calls = 0;
    let result = form.submit(|_| calls += 1);

    assert_eq!(calls, 0);
    let err = result.unwrap_err();
    assert!(matches!(&err, SubmitError::Invalid { .. }));
    assert_eq!(err.errors()["key_name"], "Required");
    assert_eq!(form.error("key_name"), Some("Required"));
    assert_eq!(form.displayed_error("key_name"), Some("Required"));
}

#[test]
fn test_key_name_rule_order() {
    let mut form = key_name_form();

    form.set_text("key_name", "has-dash");
    assert_eq!(form.error("key_name"), Some("Can only contain letters and numbers"));

    form.set_text("key_name", "a".repeat(17));
    assert_eq!(form.error("key_name"), Some("Must be less than 16 characters"));

    form.set_text("key_name", "fine name");
    assert_eq!(form.error("key_name"), None);
}

#[test]
fn test_resubmit_after_fix() {
    let mut form = key_name_form();
    assert!(form.submit(|_| {}).is_err());

    form.set_text("key_name", "fixed");
    let mut submitted = None;
    form.submit(|values| submitted = Some(values)).unwrap();
    assert_eq!(submitted.unwrap()["key_name"], Value::from("fixed"));
}

// =============================================================================
// signup form
// =============================================================================

fn fill_required(form: &mut Form) {
    form.set_text("email", "ada@example.com");
    form.set_text("password", "correct horse");
    form.set_text("confirm_password", "correct horse");
    form.set_selection(
        "account_type",
        Some(SelectOption::new("personal", "Personal").into()),
    );
}

#[test]
fn test_signup_initial_values() {
    let form = signup_form();
    let values = form.values();

    assert_eq!(values.len(), 9);
    assert_eq!(values["email"], Value::empty());
    assert_eq!(values["account_type"], Value::Selections(vec![]));
    assert_eq!(values["newsletter"], Value::from(false));
    assert_eq!(values["headers"], Value::List(vec![]));
    assert_eq!(
        values["newsletter_start"],
        Value::Date(
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        )
    );
    assert_eq!(form.dates().len(), 1);
    assert_eq!(form.selections().len(), 1);
}

#[test]
fn test_signup_submits_when_filled() {
    init_logger();
    let mut form = signup_form();
    fill_required(&mut form);
    form.set_list("headers", vec![ListEntry::new("X-Team", "core")]);

    let mut submitted = None;
    form.submit(|values| submitted = Some(values)).unwrap();

    let values = submitted.unwrap();
    assert_eq!(values["newsletter"], Value::from(false));
    assert_eq!(
        values["account_type"],
        Value::from(SelectOption::new("personal", "Personal"))
    );
    assert_eq!(values["headers"], Value::List(vec![ListEntry::new("X-Team", "core")]));
}

#[test]
fn test_confirm_password_mismatch_names_label() {
    let mut form = signup_form();
    fill_required(&mut form);
    form.set_text("confirm_password", "correct hors");

    let err = form.submit(|_| {}).unwrap_err();
    assert_eq!(err.errors().len(), 1);
    assert_eq!(err.errors()["confirm_password"], "Does not match with Password");
}

#[test]
fn test_business_account_requires_company() {
    let mut form = signup_form();
    fill_required(&mut form);
    assert!(!form.is_visible("company"));

    form.set_selection(
        "account_type",
        Some(SelectOption::new("business", "Business").into()),
    );
    assert!(form.is_visible("company"));
    assert_eq!(form.error("company"), Some("Required"));

    form.set_text("company", "Analytical Engines Ltd");
    let mut calls = 0;
    form.submit(|_| calls += 1).unwrap();
    assert_eq!(calls, 1);
}

#[test]
fn test_hidden_required_field_blocks_submit_by_default() {
    let (schema, sources) = signup_schema();
    let mut strict = Form::new(schema, sources);
    fill_required(&mut strict);
    assert!(!strict.is_visible("company"));

    let err = strict.submit(|_| {}).unwrap_err();
    assert_eq!(err.errors().len(), 1);
    assert_eq!(err.errors()["company"], "Required");

    let mut lenient = signup_form();
    fill_required(&mut lenient);
    assert!(lenient.submit(|_| {}).is_ok());
}

#[test]
fn test_newsletter_sub_fields() {
    let mut form = signup_form();
    assert!(!form.is_visible("newsletter_email"));

    form.set_checked("newsletter", true);
    assert!(form.is_visible("newsletter_email"));
    assert!(form.is_visible("newsletter_start"));

    form.set_text("newsletter_email", "");
    assert_eq!(form.error("newsletter_email"), None);

    form.set_text("newsletter_email", "not-an-email");
    assert_eq!(form.error("newsletter_email"), Some("Invalid email address"));

    let picked = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    form.set_date("newsletter_start", Some(picked));
    assert_eq!(form.dates()["newsletter_start"], Value::Date(picked));
    assert_eq!(form.values()["newsletter_start"], Value::Date(picked));
}

#[test]
fn test_unset_checkbox_is_normalized() {
    let schema = FormSchema::new(vec![FieldSchema::checkbox("agree")]).unwrap();
    let mut form = Form::new(schema, FieldSources::new());

    // Some widgets read an untouched checkbox back as the empty string.
    form.set_text("agree", "");

    let mut submitted = None;
    form.submit(|values| submitted = Some(values)).unwrap();
    assert_eq!(submitted.unwrap()["agree"], Value::from(false));
    assert_eq!(form.value("agree"), Some(&Value::empty()));
}

#[test]
fn test_required_checkbox() {
    let schema =
        FormSchema::new(vec![FieldSchema::checkbox("terms").rule(Rule::Required)]).unwrap();
    let mut form = Form::new(schema, FieldSources::new());

    assert!(form.submit(|_| {}).is_err());
    form.set_checked("terms", true);
    assert!(form.submit(|_| {}).is_ok());
}
