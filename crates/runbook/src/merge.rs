// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merging a document over its parents

use crate::extension::{merge_extensions, parse_extensions, Extension, ExtensionError};
use crate::loader::LoadError;
use serde_yaml::Value;
use sweep_core::document::keys;
use sweep_core::variable::{parse_declarations, Variable, VariableError};
use sweep_core::Document;

/// Merge `current` over `parent`; `current` wins.
///
/// Plain keys from `current` replace the parent's. Variable declarations of
/// the parent that share a name or file with one in `current` are dropped
/// and the current declarations appended. Extensions merge by path.
pub fn merge_data(parent: &Document, current: &Document) -> Result<Document, LoadError> {
    let mut merged = parent.clone();
    for (key, value) in current {
        if matches!(key.as_str(), Some(keys::VARIABLE) | Some(keys::EXTENSION)) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    let parent_variables = parse_declarations(parent)?;
    let current_variables = parse_declarations(current)?;
    if !parent_variables.is_empty() || !current_variables.is_empty() {
        let variables = merge_variables(parent_variables, current_variables);
        let value = serde_yaml::to_value(variables)
            .map_err(|e| VariableError::InvalidDeclaration(e.to_string()))?;
        merged.insert(Value::from(keys::VARIABLE), value);
    }

    let parent_extensions = extensions_of(parent)?;
    let current_extensions = extensions_of(current)?;
    if !parent_extensions.is_empty() || !current_extensions.is_empty() {
        let extensions = merge_extensions(&parent_extensions, &current_extensions);
        let value = serde_yaml::to_value(extensions)
            .map_err(|e| ExtensionError::Invalid(e.to_string()))?;
        merged.insert(Value::from(keys::EXTENSION), value);
    }

    Ok(merged)
}

fn merge_variables(parent: Vec<Variable>, current: Vec<Variable>) -> Vec<Variable> {
    let mut merged: Vec<Variable> = parent
        .into_iter()
        .filter(|p| !current.iter().any(|c| c.same_source(p)))
        .collect();
    merged.extend(current);
    merged
}

fn extensions_of(document: &Document) -> Result<Vec<Extension>, ExtensionError> {
    match document.get(keys::EXTENSION) {
        Some(raw) => parse_extensions(raw),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
