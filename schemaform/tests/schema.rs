//! Tests for schema loading and configuration issues.

use schemaform::FieldSources;
use schemaform::Form;
use schemaform::FormSchema;
use schemaform::error::ConfigIssue;
use schemaform::error::SchemaError;
use schemaform::model::FieldSchema;
use schemaform::model::FieldType;
use schemaform::model::Rule;
use schemaform::model::Scalar;
use schemaform::model::Value;

#[test]
fn test_load_key_name_fixture() {
    let schema = FormSchema::from_json(include_str!("fixtures/key_name.json")).unwrap();
    let field = schema.field("key_name").unwrap();

    assert_eq!(field.field_type, FieldType::Text);
    assert_eq!(field.label.as_deref(), Some("Key Name"));
    assert_eq!(field.input_type.as_deref(), Some("text"));
    assert_eq!(field.placeholder.as_deref(), Some("Enter a key name"));
    assert_eq!(
        field.rules(),
        [Rule::Required, Rule::Alphanumeric, Rule::length(1, 16)]
    );
}

#[test]
fn test_load_signup_fixture() {
    let schema = FormSchema::from_json(include_str!("fixtures/signup.json")).unwrap();

    assert_eq!(schema.fields().len(), 7);
    assert_eq!(schema.len(), 9);
    assert_eq!(schema.parent("newsletter_start").unwrap().name, "newsletter");
    assert_eq!(
        schema.field("company").unwrap().depends_on.as_ref().unwrap().value,
        Scalar::from("business")
    );
    assert_eq!(schema.field("password").unwrap().rules()[1], Rule::length(8, 64));
    assert!(schema.all_issues().is_empty());
}

#[test]
fn test_duplicate_names_rejected_at_load() {
    let json = r#"{
        "fields": [
            {"name": "a", "fieldType": "checkbox", "subFields": [{"name": "b"}]},
            {"name": "b", "fieldType": "text"}
        ]
    }"#;
    let err = FormSchema::from_json(json).unwrap_err();
    assert_eq!(err.to_string(), "Field name 'b' is declared more than once");
    assert!(matches!(err, SchemaError::DuplicateField { .. }));
}

#[test]
fn test_misconfigured_fields_do_not_break_others() {
    let json = r#"{
        "fields": [
            {"name": "country", "fieldType": "select"},
            {"name": "confirm", "fieldType": "text",
             "validation": {"rules": [{"type": "match", "matchField": "secret"}]}},
            {"name": "city", "fieldType": "text",
             "dependsOn": {"field": "region", "value": "north"},
             "validation": {"rules": [{"type": "required"}]}},
            {"name": "note", "fieldType": "text", "validation": {"rules": [{"type": "required"}]}}
        ]
    }"#;
    let schema = FormSchema::from_json(json).unwrap();
    let mut form = Form::new(schema, FieldSources::new());

    assert!(matches!(form.issues("country")[0], ConfigIssue::MissingOptions { .. }));
    assert!(matches!(form.issues("confirm")[0], ConfigIssue::UnresolvedMatch { .. }));
    assert!(matches!(form.issues("city")[0], ConfigIssue::UnresolvedDependency { .. }));
    assert!(form.issues("note").is_empty());

    let shown: Vec<_> = form.view().iter().map(|v| v.name().to_string()).collect();
    assert_eq!(shown, ["country", "confirm", "city", "note"]);

    let views = form.view();
    let city = views.iter().find(|v| v.name() == "city").unwrap();
    assert!(matches!(
        city.blocking_issue(),
        Some(ConfigIssue::UnresolvedDependency { .. })
    ));

    form.set_text("note", "hello");
    form.set_text("confirm", "x");
    assert_eq!(form.error("note"), None);
    assert_eq!(form.error("city"), None);
    assert_eq!(form.error("confirm"), Some("Does not match with secret"));
}

#[test]
fn test_unresolved_dependency_does_not_block_submit() {
    let schema = FormSchema::new(vec![
        FieldSchema::text("city")
            .depends_on("region", "north")
            .rule(Rule::Required),
        FieldSchema::text("note"),
    ])
    .unwrap();
    let mut form = Form::new(schema, FieldSources::new());

    let mut submitted = None;
    form.submit(|values| submitted = Some(values)).unwrap();
    assert_eq!(submitted.unwrap()["city"], Value::empty());
}
