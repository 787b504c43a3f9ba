// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable declarations and resolved entries

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Replacement text for secret values in logs and printed output.
pub const SECRET_MASK: &str = "******";

/// Resolved variables keyed by lower-case name.
pub type VariableMap = BTreeMap<String, VariableEntry>;

/// A variable as declared in a runbook's `variable` list.
///
/// Exactly one of `value` and `file` must be set. A file-backed declaration
/// without a name contributes every key of the file as a variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Variable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_secret: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Variable {
    /// Declare an inline variable
    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Declare a file-backed variable
    pub fn with_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    /// Mark the declaration as secret
    pub fn secret(mut self) -> Self {
        self.is_secret = true;
        self
    }

    /// Name used in error messages
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.file.as_deref())
            .unwrap_or("<unnamed>")
    }

    /// Whether two declarations refer to the same variable, by name or by
    /// source file.
    pub fn same_source(&self, other: &Variable) -> bool {
        let same_name = match (&self.name, &other.name) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        };
        let same_file = match (&self.file, &other.file) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        same_name || same_file
    }
}

/// A resolved variable with its provenance flags.
#[derive(Clone, PartialEq)]
pub struct VariableEntry {
    /// Lower-case variable name
    pub name: String,
    /// Resolved value
    pub data: Value,
    /// Secret values are masked in logs and output
    pub is_secret: bool,
    /// Set when substitution first consumes the entry
    pub is_used: bool,
}

impl VariableEntry {
    pub fn new(name: impl AsRef<str>, data: impl Into<Value>, is_secret: bool) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            data: data.into(),
            is_secret,
            is_used: false,
        }
    }

    pub fn secret(name: impl AsRef<str>, data: impl Into<Value>) -> Self {
        Self::new(name, data, true)
    }

    /// Value rendered for diagnostics, masked when secret.
    pub fn display_value(&self) -> String {
        if self.is_secret {
            return SECRET_MASK.to_string();
        }
        match crate::document::scalar_text(&self.data) {
            Some(text) => text,
            None => serde_yaml::to_string(&self.data)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for VariableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("VariableEntry");
        s.field("name", &self.name);
        if self.is_secret {
            s.field("data", &SECRET_MASK);
        } else {
            s.field("data", &self.data);
        }
        s.field("is_secret", &self.is_secret)
            .field("is_used", &self.is_used)
            .finish()
    }
}

impl fmt::Display for VariableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.display_value())
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
