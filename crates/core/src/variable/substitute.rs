// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `$(name)` substitution

use super::entry::{VariableMap, SECRET_MASK};
use super::VariableError;
use crate::document::{kind_name, scalar_text};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

// Regex pattern for $(variable_name) - this is a constant valid pattern
#[allow(clippy::expect_used)]
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(([A-Za-z_][A-Za-z0-9_.\-]*)\)").expect("constant regex pattern is valid")
});

/// Replace every `$(name)` reference in `value` with the variable's data.
///
/// Mapping values and sequence items are walked recursively; mapping keys
/// are left alone. A string that consists of exactly one reference takes the
/// variable's typed value; references inside longer strings are interpolated
/// as text. Every consumed entry is marked as used.
pub fn substitute(value: Value, variables: &mut VariableMap) -> Result<Value, VariableError> {
    match value {
        Value::String(text) => substitute_str(&text, variables),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| substitute(item, variables))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::Mapping(mapping) => {
            let mut result = Mapping::with_capacity(mapping.len());
            for (key, item) in mapping {
                result.insert(key, substitute(item, variables)?);
            }
            Ok(Value::Mapping(result))
        }
        Value::Tagged(mut tagged) => {
            tagged.value = substitute(tagged.value, variables)?;
            Ok(Value::Tagged(tagged))
        }
        scalar => Ok(scalar),
    }
}

/// Substitute references in a single string.
pub fn substitute_str(text: &str, variables: &mut VariableMap) -> Result<Value, VariableError> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for caps in REFERENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let name = caps[1].to_lowercase();
        let entry = variables
            .get_mut(&name)
            .ok_or_else(|| VariableError::Undefined { name: name.clone() })?;
        entry.is_used = true;

        if whole.start() == 0 && whole.end() == text.len() {
            return Ok(entry.data.clone());
        }

        let Some(piece) = scalar_text(&entry.data) else {
            return Err(VariableError::NonScalarInterpolation {
                name,
                kind: kind_name(&entry.data),
                text: text.to_string(),
            });
        };
        result.push_str(&text[last..whole.start()]);
        result.push_str(&piece);
        last = whole.end();
    }

    result.push_str(&text[last..]);
    Ok(Value::String(result))
}

/// Whether `text` contains any `$(name)` reference.
pub fn has_references(text: &str) -> bool {
    REFERENCE.is_match(text)
}

/// Mask the text of every secret variable in `text`.
pub fn mask_secrets(text: &str, variables: &VariableMap) -> String {
    let mut secrets: Vec<String> = variables
        .values()
        .filter(|entry| entry.is_secret)
        .filter_map(|entry| scalar_text(&entry.data))
        .filter(|secret| !secret.is_empty())
        .collect();
    // longest first, so a secret containing another is masked whole
    secrets.sort_by_key(|secret| std::cmp::Reverse(secret.len()));

    let mut masked = text.to_string();
    for secret in &secrets {
        masked = masked.replace(secret.as_str(), SECRET_MASK);
    }
    masked
}

#[cfg(test)]
#[path = "substitute_tests.rs"]
mod tests;
