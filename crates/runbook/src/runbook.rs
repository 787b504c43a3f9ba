// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The resolved, validated runbook

use crate::schema::{runbook_schema, SchemaError, SchemaErrors, DEFAULT_CONCURRENCY, DEFAULT_NAME};
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use sweep_core::document::{keys, scalar_text};
use sweep_core::Document;

/// A `parent` list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// A fully substituted runbook that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Runbook {
    name: String,
    concurrency: usize,
    parents: Vec<ParentRef>,
    combinator: Option<Mapping>,
    document: Document,
}

impl Runbook {
    /// Validate a substituted document and build the runbook.
    pub fn from_document(document: &Document) -> Result<Self, SchemaErrors> {
        let document = runbook_schema().validate(document)?;

        let name = document
            .get(keys::NAME)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let raw_concurrency = document
            .get(keys::CONCURRENCY)
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_CONCURRENCY));
        let concurrency = raw_concurrency
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                SchemaErrors(vec![SchemaError::Mismatch {
                    path: keys::CONCURRENCY.to_string(),
                    expected: "positive integer".to_string(),
                    actual: scalar_text(&raw_concurrency).unwrap_or_default(),
                }])
            })?;

        let parents = match document.get(keys::PARENT) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_yaml::from_value(value.clone()).map_err(|e| {
                SchemaErrors(vec![SchemaError::Mismatch {
                    path: keys::PARENT.to_string(),
                    expected: "parent references".to_string(),
                    actual: e.to_string(),
                }])
            })?,
        };

        let combinator = document
            .get(keys::COMBINATOR)
            .and_then(Value::as_mapping)
            .cloned();

        Ok(Self {
            name,
            concurrency,
            parents,
            combinator,
            document,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of a test run of this runbook
    pub fn run_name(&self) -> String {
        format!("sweep_{}", self.name)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn parents(&self) -> &[ParentRef] {
        &self.parents
    }

    pub fn combinator(&self) -> Option<&Mapping> {
        self.combinator.as_ref()
    }

    /// Any top-level key, including user-defined sections
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// The whole validated document, defaults applied
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Serialize for Runbook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

#[cfg(test)]
#[path = "runbook_tests.rs"]
mod tests;
