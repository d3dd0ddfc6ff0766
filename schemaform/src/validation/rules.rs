//! Built-in rule evaluation.

use std::sync::LazyLock;

use log::trace;
use log::warn;
use regex::Regex;

use crate::config::PasswordSemantics;
use crate::model::CharClass;
use crate::model::Rule;
use crate::model::Value;
use crate::model::ValueMap;
use crate::schema::FormSchema;

// local@domain.tld with a 2-4 letter top level domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,4}$")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

// ASCII word characters and spaces.
static ALPHANUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_ ]+$").expect("ALPHANUMERIC_REGEX: invalid regex pattern")
});

/// Evaluates one rule against the value stored under `key`.
///
/// Returns the error message on failure. `allow_empty` always passes here;
/// its skipping effect is applied by the [`Validator`](super::Validator).
/// Rules of unknown type always pass.
pub fn check_rule(
    rule: &Rule,
    key: &str,
    value: &Value,
    values: &ValueMap,
    schema: &FormSchema,
    semantics: PasswordSemantics,
) -> Result<(), String> {
    trace!("Checking '{}' rule on '{}'", rule.kind(), key);

    match rule {
        Rule::Required => {
            if value.is_truthy() {
                Ok(())
            } else {
                Err("Required".to_string())
            }
        }
        Rule::Email => {
            if EMAIL_REGEX.is_match(&value.as_text()) {
                Ok(())
            } else {
                Err("Invalid email address".to_string())
            }
        }
        Rule::Alphanumeric => {
            if ALPHANUMERIC_REGEX.is_match(&value.as_text()) {
                Ok(())
            } else {
                Err("Can only contain letters and numbers".to_string())
            }
        }
        Rule::Length { min, max } => check_length(value, *min, *max),
        Rule::Password { allowed_chars } => check_password(value, allowed_chars, semantics),
        Rule::Match { match_field } => {
            if values.get(match_field) == Some(value) {
                Ok(())
            } else {
                let label = schema
                    .field(match_field)
                    .map(|f| f.display_label())
                    .unwrap_or(match_field.as_str());
                Err(format!("Does not match with {}", label))
            }
        }
        Rule::AllowEmpty | Rule::Unknown => Ok(()),
    }
}

fn check_length(value: &Value, min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    let Some(len) = value.length() else {
        return Ok(());
    };
    if let Some(min) = min
        && len < min
    {
        return Err(format!("Must be more than {} characters", min));
    }
    if let Some(max) = max
        && len > max
    {
        return Err(format!("Must be less than {} characters", max));
    }
    Ok(())
}

fn check_password(
    value: &Value,
    allowed: &[CharClass],
    semantics: PasswordSemantics,
) -> Result<(), String> {
    if allowed.is_empty() {
        trace!("Password rule lists no character classes, nothing to check");
        return Ok(());
    }

    let classes: String = allowed.iter().map(|c| c.pattern()).collect();
    let pattern = match semantics {
        PasswordSemantics::RejectOnMatch => format!("(?i)^{}$", classes),
        PasswordSemantics::AllowListed => {
            let alternatives: Vec<_> = allowed.iter().map(|c| c.pattern()).collect();
            format!("(?i)^(?:{})*$", alternatives.join("|"))
        }
    };

    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("Skipping password rule, pattern '{}' failed to compile: {}", pattern, e);
            return Ok(());
        }
    };

    let text = value.as_text();
    let rejected = match semantics {
        PasswordSemantics::RejectOnMatch => re.is_match(&text),
        PasswordSemantics::AllowListed => !re.is_match(&text),
    };

    if rejected {
        let names: Vec<_> = allowed.iter().map(|c| c.to_string()).collect();
        Err(format!("Can only contain ({})", names.join(", ")))
    } else {
        Ok(())
    }
}
