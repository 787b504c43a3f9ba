// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading declared variables into a `VariableMap`

use super::entry::{Variable, VariableEntry, VariableMap};
use super::substitute::{substitute, substitute_str};
use super::VariableError;
use crate::document::{keys, kind_name, scalar_text, Document};
use serde_yaml::Value;
use std::path::Path;

/// Parse the `variable` list of a document without resolving anything.
pub fn parse_declarations(document: &Document) -> Result<Vec<Variable>, VariableError> {
    match document.get(keys::VARIABLE) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_yaml::from_value(value.clone())
            .map_err(|e| VariableError::InvalidDeclaration(e.to_string())),
    }
}

/// Load the variables a document declares.
///
/// File paths are resolved against `base_dir`. Declarations may reference
/// each other and `overrides`; they are resolved in passes until every
/// declaration is loaded or a pass makes no progress. Entries in `overrides`
/// always win over declarations with the same name.
pub fn load_variables(
    document: &Document,
    base_dir: &Path,
    overrides: &VariableMap,
) -> Result<VariableMap, VariableError> {
    let mut pending = parse_declarations(document)?;
    let mut current = VariableMap::new();

    while !pending.is_empty() {
        let mut deferred = Vec::new();
        let mut undefined = Vec::new();
        let mut loaded_any = false;

        for declaration in pending {
            let mut scope = current.clone();
            scope.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

            match load_declaration(&declaration, base_dir, &mut scope) {
                Ok(entries) => {
                    loaded_any = true;
                    for entry in entries {
                        current.insert(entry.name.clone(), entry);
                    }
                }
                Err(VariableError::Undefined { name }) => {
                    if !undefined.contains(&name) {
                        undefined.push(name);
                    }
                    deferred.push(declaration);
                }
                Err(e) => return Err(e),
            }
        }

        if !deferred.is_empty() && !loaded_any {
            return Err(VariableError::Unresolved { names: undefined });
        }
        pending = deferred;
    }

    for (name, entry) in overrides {
        current.insert(name.clone(), entry.clone());
    }
    Ok(current)
}

fn load_declaration(
    declaration: &Variable,
    base_dir: &Path,
    scope: &mut VariableMap,
) -> Result<Vec<VariableEntry>, VariableError> {
    match (&declaration.value, &declaration.file) {
        (Some(_), Some(_)) => Err(VariableError::FileAndValue {
            name: declaration.label().to_string(),
        }),
        (None, None) => Err(VariableError::NoFileOrValue {
            name: declaration.label().to_string(),
        }),
        (Some(value), None) => {
            let name = declaration
                .name
                .as_deref()
                .ok_or_else(|| VariableError::MissingName {
                    value: scalar_text(value).unwrap_or_else(|| kind_name(value).to_string()),
                })?;
            let value = substitute(value.clone(), scope)?;
            Ok(vec![entry_from_raw(name, &value, declaration.is_secret)])
        }
        (None, Some(file)) => {
            let file = substitute_str(file, scope)?;
            let file = scalar_text(&file).unwrap_or_default();
            let path = base_dir.join(file);
            let content = std::fs::read_to_string(&path).map_err(|e| VariableError::Io {
                path: path.clone(),
                source: e,
            })?;

            if let Some(name) = declaration.name.as_deref() {
                let text = content.trim_end_matches(['\r', '\n']);
                return Ok(vec![VariableEntry::new(name, text, declaration.is_secret)]);
            }

            let decoded: Value =
                serde_yaml::from_str(&content).map_err(|e| VariableError::Decode {
                    path: path.clone(),
                    source: e,
                })?;
            let mapping = match decoded {
                Value::Mapping(mapping) => mapping,
                Value::Null => return Ok(Vec::new()),
                _ => return Err(VariableError::FileNotMapping { path }),
            };
            Ok(mapping
                .iter()
                .filter_map(|(key, raw)| {
                    scalar_text(key).map(|name| entry_from_raw(&name, raw, declaration.is_secret))
                })
                .collect())
        }
    }
}

/// Build an entry from a raw value.
///
/// A mapping of the form `{value: X, is_secret: bool}` sets the value and
/// its secret flag; any other value is used as-is with `is_secret`.
pub fn entry_from_raw(name: &str, raw: &Value, is_secret: bool) -> VariableEntry {
    if let Value::Mapping(mapping) = raw {
        let is_entry_form = mapping.contains_key("value")
            && mapping
                .keys()
                .all(|k| matches!(k.as_str(), Some("value") | Some("is_secret")));
        if is_entry_form {
            let data = mapping.get("value").cloned().unwrap_or(Value::Null);
            let is_secret = mapping
                .get("is_secret")
                .and_then(Value::as_bool)
                .unwrap_or(is_secret);
            return VariableEntry::new(name, data, is_secret);
        }
    }
    VariableEntry::new(name, raw.clone(), is_secret)
}

/// Check that a declaration can feed a combinator: inline, sequence valued.
pub fn validate_combinator_input(variable: &Variable) -> Result<(), VariableError> {
    if let Some(file) = &variable.file {
        return Err(VariableError::InvalidCombinatorInput {
            name: variable.label().to_string(),
            reason: format!("file is not supported, but got '{}'", file),
        });
    }
    match &variable.value {
        Some(Value::Sequence(_)) => Ok(()),
        Some(other) => Err(VariableError::InvalidCombinatorInput {
            name: variable.label().to_string(),
            reason: format!("value must be a sequence, but got {}", kind_name(other)),
        }),
        None => Err(VariableError::InvalidCombinatorInput {
            name: variable.label().to_string(),
            reason: "value must be a sequence, but none is set".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
