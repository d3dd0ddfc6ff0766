//! Validator over a compiled schema.

use log::trace;

use super::ErrorMap;
use super::check_rule;
use crate::config::FormConfig;
use crate::dependency;
use crate::model::Value;
use crate::model::ValueMap;
use crate::schema::FormSchema;

/// Validates a Value Map against a schema.
///
/// Every key present in the Value Map is resolved to its field through the
/// schema's name index. Keys with no field, fields with no rules, and
/// fields whose `dependsOn` target is missing never produce an error.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    schema: &'a FormSchema,
    config: &'a FormConfig,
}

impl<'a> Validator<'a> {
    /// Create a validator.
    pub fn new(schema: &'a FormSchema, config: &'a FormConfig) -> Self {
        Self { schema, config }
    }

    /// Validate every key in `values`.
    pub fn validate(&self, values: &ValueMap) -> ErrorMap {
        values
            .iter()
            .filter_map(|(key, value)| {
                self.check(key, value, values)
                    .map(|message| (key.clone(), message))
            })
            .collect()
    }

    /// Validate a single key. Returns the first failing rule's message.
    pub fn validate_field(&self, key: &str, values: &ValueMap) -> Option<String> {
        let value = values.get(key)?;
        self.check(key, value, values)
    }

    fn check(&self, key: &str, value: &Value, values: &ValueMap) -> Option<String> {
        let field = self.schema.field(key)?;

        if field.allows_empty() && value.is_empty_text() {
            trace!("Field '{}' is empty and allows it, skipping rules", key);
            return None;
        }

        if dependency::is_unresolved(self.schema, key) {
            trace!("Field '{}' depends on an unknown field, skipping rules", key);
            return None;
        }

        if !self.config.validate_hidden && !dependency::is_active(self.schema, key, values) {
            trace!("Field '{}' is hidden, skipping rules", key);
            return None;
        }

        field.rules().iter().find_map(|rule| {
            check_rule(
                rule,
                key,
                value,
                values,
                self.schema,
                self.config.password_semantics,
            )
            .err()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordSemantics;
    use crate::model::CharClass;
    use crate::model::FieldSchema;
    use crate::model::Rule;

    fn values(pairs: &[(&str, &str)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSchema::text("name").rule(Rule::Required).rule(Rule::length(1, 16)),
            FieldSchema::text("email").rule(Rule::AllowEmpty).rule(Rule::Email),
            FieldSchema::text("password").label("Password"),
            FieldSchema::text("confirm").rule(Rule::matches("password")),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = schema();
        let config = FormConfig::default();
        let errors = Validator::new(&schema, &config).validate(&values(&[("name", "")]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["name"], "Required");
    }

    #[test]
    fn test_allow_empty_skips_only_empty_text() {
        let schema = schema();
        let config = FormConfig::default();
        let validator = Validator::new(&schema, &config);

        assert!(validator.validate(&values(&[("email", "")])).is_empty());
        assert_eq!(
            validator.validate(&values(&[("email", "not-an-email")]))["email"],
            "Invalid email address"
        );
    }

    #[test]
    fn test_match_uses_label() {
        let schema = schema();
        let config = FormConfig::default();
        let validator = Validator::new(&schema, &config);

        let ok = values(&[("password", "abc123"), ("confirm", "abc123")]);
        assert!(validator.validate(&ok).is_empty());

        let bad = values(&[("password", "abc123"), ("confirm", "abc124")]);
        assert_eq!(validator.validate(&bad)["confirm"], "Does not match with Password");
    }

    #[test]
    fn test_unknown_keys_have_no_error() {
        let schema = schema();
        let config = FormConfig::default();
        let errors = Validator::new(&schema, &config).validate(&values(&[("stray", "")]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let schema = schema();
        let config = FormConfig::default();
        let validator = Validator::new(&schema, &config);
        let map = values(&[("name", ""), ("email", "x"), ("password", "a"), ("confirm", "b")]);
        assert_eq!(validator.validate(&map), validator.validate(&map));
    }

    #[test]
    fn test_hidden_fields_skipped_when_configured() {
        let schema = FormSchema::new(vec![
            FieldSchema::checkbox("company"),
            FieldSchema::text("vat").depends_on("company", true).rule(Rule::Required),
        ])
        .unwrap();
        let mut map = ValueMap::new();
        map.insert("company".into(), Value::from(false));
        map.insert("vat".into(), Value::from(""));

        let all = FormConfig::default();
        assert_eq!(Validator::new(&schema, &all).validate(&map)["vat"], "Required");

        let visible_only = FormConfig::new().skip_hidden();
        assert!(Validator::new(&schema, &visible_only).validate(&map).is_empty());

        map.insert("company".into(), Value::from(true));
        assert_eq!(Validator::new(&schema, &visible_only).validate(&map)["vat"], "Required");
    }

    #[test]
    fn test_password_semantics() {
        let schema = FormSchema::new(vec![
            FieldSchema::text("pin").rule(Rule::password([CharClass::Alphanumeric])),
        ])
        .unwrap();

        let as_authored = FormConfig::default();
        let validator = Validator::new(&schema, &as_authored);
        assert_eq!(
            validator.validate_field("pin", &values(&[("pin", "a")])).as_deref(),
            Some("Can only contain (alphanumeric)")
        );
        assert_eq!(validator.validate_field("pin", &values(&[("pin", "abc!")])), None);

        let allow_listed = FormConfig::new().password_semantics(PasswordSemantics::AllowListed);
        let validator = Validator::new(&schema, &allow_listed);
        assert_eq!(validator.validate_field("pin", &values(&[("pin", "Ab-9.")])), None);
        assert_eq!(
            validator.validate_field("pin", &values(&[("pin", "abc!")])).as_deref(),
            Some("Can only contain (alphanumeric)")
        );
    }

    #[test]
    fn test_unresolved_dependency_never_fails() {
        let schema = FormSchema::new(vec![
            FieldSchema::text("city")
                .depends_on("region", "north")
                .rule(Rule::Required),
            FieldSchema::text("note").rule(Rule::Required),
        ])
        .unwrap();
        let config = FormConfig::default();

        let map = values(&[("city", ""), ("note", "")]);
        let errors = Validator::new(&schema, &config).validate(&map);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["note"], "Required");
    }
}
