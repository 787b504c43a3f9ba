// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static schema validation for resolved runbooks

use serde_yaml::{Mapping, Value};
use std::fmt;
use std::sync::LazyLock;
use sweep_core::document::{keys, kind_name, scalar_text};
use sweep_core::variable::{mask_secrets, VariableMap};
use thiserror::Error;

/// Expected kind of a field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Bool,
    Any,
    Sequence(Box<FieldKind>),
    Record(Schema),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Any => write!(f, "any"),
            FieldKind::Sequence(item) => write!(f, "sequence of {}", item),
            FieldKind::Record(_) => write!(f, "mapping"),
        }
    }
}

/// One field of a schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

/// A record schema: ordered fields plus a policy for unknown keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
    allow_unknown: bool,
}

/// One validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{path}: missing required field")]
    Missing { path: String },
    #[error("{path}: expected {expected}, got {actual}")]
    Mismatch {
        path: String,
        expected: String,
        actual: String,
    },
    #[error("{path}: unknown field")]
    Unknown { path: String },
}

/// Every failure found in one validation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("runbook failed validation: {}", join_errors(.0))]
pub struct SchemaErrors(pub Vec<SchemaError>);

fn join_errors(errors: &[SchemaError]) -> String {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    messages.join("; ")
}

impl SchemaErrors {
    /// Mask secret variable text in every reported value.
    pub fn masked(self, variables: &VariableMap) -> Self {
        let errors = self
            .0
            .into_iter()
            .map(|error| match error {
                SchemaError::Mismatch {
                    path,
                    expected,
                    actual,
                } => SchemaError::Mismatch {
                    path,
                    expected,
                    actual: mask_secrets(&actual, variables),
                },
                other => other,
            })
            .collect();
        Self(errors)
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an optional field
    pub fn field(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: false,
            default: None,
        });
        self
    }

    /// Add a required field
    pub fn required(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: true,
            default: None,
        });
        self
    }

    /// Add an optional field filled with `default` when absent
    pub fn with_default(
        mut self,
        name: &'static str,
        kind: FieldKind,
        default: impl Into<Value>,
    ) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: false,
            default: Some(default.into()),
        });
        self
    }

    /// Let keys without a field definition pass through unchecked
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Validate `document`, returning it with defaults applied.
    ///
    /// Every error is collected before returning.
    pub fn validate(&self, document: &Mapping) -> Result<Mapping, SchemaErrors> {
        let mut errors = Vec::new();
        let validated = self.check_record(document, "", &mut errors);
        if errors.is_empty() {
            Ok(validated)
        } else {
            Err(SchemaErrors(errors))
        }
    }

    fn check_record(
        &self,
        record: &Mapping,
        prefix: &str,
        errors: &mut Vec<SchemaError>,
    ) -> Mapping {
        let mut result = record.clone();

        for field in &self.fields {
            let path = join(prefix, field.name);
            match record.get(field.name) {
                None | Some(Value::Null) => {
                    if let Some(default) = &field.default {
                        result.insert(Value::from(field.name), default.clone());
                    } else if field.required {
                        errors.push(SchemaError::Missing { path });
                    }
                }
                Some(value) => {
                    if let Some(value) = check_value(&field.kind, value, &path, errors) {
                        result.insert(Value::from(field.name), value);
                    }
                }
            }
        }

        if !self.allow_unknown {
            for key in record.keys() {
                let name = scalar_text(key).unwrap_or_default();
                if !self.fields.iter().any(|f| f.name == name) {
                    errors.push(SchemaError::Unknown {
                        path: join(prefix, &name),
                    });
                }
            }
        }
        result
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

// Returns the (possibly coerced) value, or None after recording an error.
fn check_value(
    kind: &FieldKind,
    value: &Value,
    path: &str,
    errors: &mut Vec<SchemaError>,
) -> Option<Value> {
    let checked = match (kind, value) {
        (FieldKind::Any, value) => Some(value.clone()),
        (FieldKind::String, Value::String(_)) => Some(value.clone()),
        (FieldKind::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Some(value.clone()),
        // command line and environment values arrive as text
        (FieldKind::Integer, Value::String(text)) => parse_text::<i64>(text),
        (FieldKind::Bool, Value::Bool(_)) => Some(value.clone()),
        (FieldKind::Bool, Value::String(text)) => parse_text::<bool>(text),
        (FieldKind::Sequence(item), Value::Sequence(items)) => {
            let before = errors.len();
            let checked: Vec<Value> = items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| check_value(item, v, &index_path(path, i), errors))
                .collect();
            return (errors.len() == before).then_some(Value::Sequence(checked));
        }
        (FieldKind::Record(schema), Value::Mapping(record)) => {
            let before = errors.len();
            let checked = schema.check_record(record, path, errors);
            return (errors.len() == before).then_some(Value::Mapping(checked));
        }
        _ => None,
    };

    if checked.is_none() {
        errors.push(SchemaError::Mismatch {
            path: path.to_string(),
            expected: kind.to_string(),
            actual: describe(value),
        });
    }
    checked
}

fn parse_text<T>(text: &str) -> Option<Value>
where
    T: std::str::FromStr + Into<Value>,
{
    text.trim().parse::<T>().ok().map(Into::into)
}

fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

fn describe(value: &Value) -> String {
    match scalar_text(value) {
        Some(text) => format!("{} '{}'", kind_name(value), text),
        None => kind_name(value).to_string(),
    }
}

/// Default run name
pub const DEFAULT_NAME: &str = "not_named";

/// Default number of concurrent test runs
pub const DEFAULT_CONCURRENCY: i64 = 1;

static RUNBOOK_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    let parent = Schema::new()
        .required("path", FieldKind::String)
        .field("strategy", FieldKind::String);
    let combinator = Schema::new()
        .required("type", FieldKind::String)
        .allow_unknown();

    Schema::new()
        .with_default(keys::NAME, FieldKind::String, DEFAULT_NAME)
        .with_default(keys::CONCURRENCY, FieldKind::Integer, DEFAULT_CONCURRENCY)
        .field(
            keys::PARENT,
            FieldKind::Sequence(Box::new(FieldKind::Record(parent))),
        )
        .field(keys::COMBINATOR, FieldKind::Record(combinator))
        .allow_unknown()
});

/// Schema of a resolved runbook.
///
/// Built on first use; every call returns the same instance.
pub fn runbook_schema() -> &'static Schema {
    &RUNBOOK_SCHEMA
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
