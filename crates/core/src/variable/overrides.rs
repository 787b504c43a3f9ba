// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line and environment overrides

use super::entry::{VariableEntry, VariableMap};
use super::VariableError;

/// Environment prefix used by the `sweep` CLI.
pub const DEFAULT_ENV_PREFIX: &str = "SWEEP_";

const SECRET_PAIR_PREFIX: &str = "s";

/// Parse `name:value` pairs, or `s:name:value` for secrets.
///
/// Later pairs override earlier ones with the same name.
pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<VariableMap, VariableError> {
    let mut variables = VariableMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let entry = parse_pair(pair)
            .ok_or_else(|| VariableError::InvalidPair(pair.to_string()))?;
        variables.insert(entry.name.clone(), entry);
    }
    Ok(variables)
}

fn parse_pair(pair: &str) -> Option<VariableEntry> {
    let (first, rest) = pair.split_once(':')?;
    if first.eq_ignore_ascii_case(SECRET_PAIR_PREFIX) {
        if let Some((name, value)) = rest.split_once(':') {
            let entry = VariableEntry::secret(name.trim(), value);
            return valid_name(name).then_some(entry);
        }
    }
    let entry = VariableEntry::new(first.trim(), rest, false);
    valid_name(first).then_some(entry)
}

fn valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Collect overrides from environment variables.
///
/// `{prefix}NAME=value` defines `name`; `S_{prefix}NAME=value` defines a
/// secret `name`. Other variables are ignored.
pub fn from_env<I, K, V>(prefix: &str, vars: I) -> VariableMap
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let secret_prefix = format!("S_{}", prefix);
    let mut variables = VariableMap::new();

    for (key, value) in vars {
        let key = key.as_ref();
        let entry = if let Some(name) = key.strip_prefix(&secret_prefix) {
            VariableEntry::secret(name, value.into())
        } else if let Some(name) = key.strip_prefix(prefix) {
            VariableEntry::new(name, value.into(), false)
        } else {
            continue;
        };
        if !entry.name.is_empty() {
            variables.insert(entry.name.clone(), entry);
        }
    }
    variables
}

#[cfg(test)]
#[path = "overrides_tests.rs"]
mod tests;
