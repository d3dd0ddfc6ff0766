//! Compiled form schema.

use std::collections::HashMap;

use log::warn;
use serde::Deserialize;

use crate::error::ConfigIssue;
use crate::error::SchemaError;
use crate::model::FieldSchema;
use crate::model::Rule;

/// Position of a field in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    top: usize,
    sub: Option<usize>,
}

/// JSON document shape: `{ "fields": [...] }`.
#[derive(Deserialize)]
struct SchemaDocument {
    fields: Vec<FieldSchema>,
}

/// An immutable field tree with a flat name index.
///
/// Building the index once at load time makes field lookup a single hash
/// probe and turns duplicate names into a load error rather than a silent
/// last-match-wins.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
    index: HashMap<String, Slot>,
    issues: HashMap<String, Vec<ConfigIssue>>,
}

impl FormSchema {
    /// Compiles a list of top-level fields.
    ///
    /// Fails if any name is empty or repeated anywhere in the tree, or if a
    /// sub-field declares sub-fields of its own. Dangling `dependsOn` and
    /// `match` references are not errors; they are recorded as
    /// [`ConfigIssue`]s on the referencing field.
    pub fn new(fields: Vec<FieldSchema>) -> Result<Self, SchemaError> {
        let mut index = HashMap::new();

        for (top, field) in fields.iter().enumerate() {
            insert_slot(&mut index, &field.name, Slot { top, sub: None })?;

            for (sub, sub_field) in field.sub_fields.iter().enumerate() {
                if !sub_field.sub_fields.is_empty() {
                    return Err(SchemaError::NestingTooDeep {
                        parent: field.name.clone(),
                        name: sub_field.name.clone(),
                    });
                }
                insert_slot(
                    &mut index,
                    &sub_field.name,
                    Slot {
                        top,
                        sub: Some(sub),
                    },
                )?;
            }
        }

        let mut schema = Self {
            fields,
            index,
            issues: HashMap::new(),
        };
        schema.issues = schema.collect_reference_issues();
        Ok(schema)
    }

    /// Parses and compiles a JSON schema document of the form
    /// `{ "fields": [ ... ] }`.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        Self::new(document.fields)
    }

    /// The top-level fields in declared order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up any field, top-level or nested, by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.index.get(name).map(|slot| self.resolve(*slot))
    }

    /// The field that declares `name` as a sub-field, if any.
    pub fn parent(&self, name: &str) -> Option<&FieldSchema> {
        match self.index.get(name) {
            Some(Slot { top, sub: Some(_) }) => self.fields.get(*top),
            _ => None,
        }
    }

    /// Returns `true` if a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Every field in declared order, each top-level field followed by its
    /// sub-fields.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields
            .iter()
            .flat_map(|field| std::iter::once(field).chain(field.sub_fields.iter()))
    }

    /// Number of fields, nested ones included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Reference issues recorded for a field.
    pub fn issues(&self, name: &str) -> &[ConfigIssue] {
        self.issues.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All reference issues, keyed by field name.
    pub fn all_issues(&self) -> &HashMap<String, Vec<ConfigIssue>> {
        &self.issues
    }

    fn resolve(&self, slot: Slot) -> &FieldSchema {
        let top = &self.fields[slot.top];
        match slot.sub {
            Some(sub) => &top.sub_fields[sub],
            None => top,
        }
    }

    fn collect_reference_issues(&self) -> HashMap<String, Vec<ConfigIssue>> {
        let mut issues: HashMap<String, Vec<ConfigIssue>> = HashMap::new();

        for field in self.iter() {
            if let Some(dep) = &field.depends_on
                && !self.contains(&dep.field)
            {
                issues
                    .entry(field.name.clone())
                    .or_default()
                    .push(ConfigIssue::UnresolvedDependency {
                        field: field.name.clone(),
                        target: dep.field.clone(),
                    });
            }

            for rule in field.rules() {
                let issue = match rule {
                    Rule::Match { match_field } if !self.contains(match_field) => {
                        ConfigIssue::UnresolvedMatch {
                            field: field.name.clone(),
                            target: match_field.clone(),
                        }
                    }
                    Rule::Unknown => ConfigIssue::UnknownRule {
                        field: field.name.clone(),
                    },
                    _ => continue,
                };
                issues.entry(field.name.clone()).or_default().push(issue);
            }
        }

        for list in issues.values() {
            for issue in list {
                warn!("Schema issue: {}", issue);
            }
        }

        issues
    }
}

fn insert_slot(
    index: &mut HashMap<String, Slot>,
    name: &str,
    slot: Slot,
) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if index.insert(name.to_string(), slot).is_some() {
        return Err(SchemaError::duplicate(name));
    }
    Ok(())
}
