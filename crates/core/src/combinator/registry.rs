// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type name to factory mapping for combinator strategies

use super::grid::{GridCombinator, GRID};
use super::{Combinator, CombinatorError, CombinatorStrategy};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Builds a strategy from its config block (without the `type` key).
pub type CombinatorFactory =
    Box<dyn Fn(&Mapping) -> Result<Box<dyn CombinatorStrategy>, CombinatorError> + Send + Sync>;

/// Registered combinator strategies, keyed by lower-case type name.
///
/// Constructed once by the caller and extended by extensions while a runbook
/// loads; lookups afterwards are read-only.
#[derive(Default)]
pub struct CombinatorRegistry {
    factories: BTreeMap<String, CombinatorFactory>,
}

impl CombinatorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in strategies (`grid`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            GRID.to_string(),
            Box::new(|config: &Mapping| {
                GridCombinator::from_mapping(config)
                    .map(|grid| Box::new(grid) as Box<dyn CombinatorStrategy>)
            }),
        );
        registry
    }

    /// Register a strategy under `type_name`.
    pub fn register<F>(&mut self, type_name: &str, factory: F) -> Result<(), CombinatorError>
    where
        F: Fn(&Mapping) -> Result<Box<dyn CombinatorStrategy>, CombinatorError>
            + Send
            + Sync
            + 'static,
    {
        let key = type_name.to_lowercase();
        if self.factories.contains_key(&key) {
            return Err(CombinatorError::Duplicate(key));
        }
        tracing::debug!(type_name = %key, "registered combinator");
        self.factories.insert(key, Box::new(factory));
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(&type_name.to_lowercase())
    }

    /// Registered type names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Create a combinator from a `{type: ..., ...}` config value.
    pub fn create(&self, config: &Value) -> Result<Combinator, CombinatorError> {
        let Value::Mapping(config) = config else {
            return Err(CombinatorError::MissingType);
        };
        let type_name = config
            .get("type")
            .and_then(Value::as_str)
            .ok_or(CombinatorError::MissingType)?
            .to_lowercase();
        let factory = self
            .factories
            .get(&type_name)
            .ok_or_else(|| CombinatorError::UnknownType(type_name.clone()))?;

        let mut rest = config.clone();
        rest.remove("type");
        let strategy = factory(&rest)?;
        tracing::debug!(type_name = %type_name, "created combinator");
        Ok(Combinator::new(strategy))
    }
}

impl std::fmt::Debug for CombinatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
