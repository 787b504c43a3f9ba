// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grid combinator: the full Cartesian product of its items

use super::{CombinatorError, CombinatorStrategy};
use crate::variable::{
    entry_from_raw, validate_combinator_input, Variable, VariableEntry, VariableError, VariableMap,
};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;

/// Registered type name of the grid combinator.
pub const GRID: &str = "grid";

/// Config block of a grid combinator (the `type` key is handled by the
/// registry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridCombinatorConfig {
    pub items: Vec<Variable>,
}

/// Enumerates every combination of its items' candidate values.
///
/// Counting is mixed-radix with item 0 as the fastest-varying digit: for
/// `a = [1, 2]` and `b = [10, 20]` the order is (1,10), (2,10), (1,20), (2,20).
#[derive(Debug)]
pub struct GridCombinator {
    candidates: Vec<Vec<VariableEntry>>,
    indices: Vec<isize>,
    exhausted: bool,
}

impl GridCombinator {
    pub fn new(config: GridCombinatorConfig) -> Result<Self, CombinatorError> {
        let mut candidates = Vec::with_capacity(config.items.len());
        let mut names = BTreeSet::new();

        for item in &config.items {
            validate_combinator_input(item)?;
            let name = item.name.as_deref().ok_or_else(unnamed_item)?;
            if !names.insert(name.to_lowercase()) {
                return Err(CombinatorError::InvalidConfig {
                    kind: GRID.to_string(),
                    reason: format!("item '{}' is declared more than once", name),
                });
            }
            let values = match &item.value {
                Some(Value::Sequence(values)) => values,
                _ => continue,
            };
            if values.is_empty() {
                return Err(CombinatorError::EmptyCandidates {
                    name: name.to_string(),
                });
            }
            candidates.push(
                values
                    .iter()
                    .map(|value| entry_from_raw(name, value, item.is_secret))
                    .collect::<Vec<_>>(),
            );
        }

        // first increment lands on all zeros
        let mut indices = vec![0; candidates.len()];
        if let Some(first) = indices.first_mut() {
            *first = -1;
        }

        Ok(Self {
            candidates,
            indices,
            exhausted: false,
        })
    }

    /// Build from a raw config mapping.
    pub fn from_mapping(config: &Mapping) -> Result<Self, CombinatorError> {
        let config = Value::Mapping(config.clone());
        let config: GridCombinatorConfig = serde_yaml::from_value(config).map_err(invalid_config)?;
        Self::new(config)
    }

    /// Number of assignments the grid yields, `None` if it overflows.
    ///
    /// A grid without items yields none; the combinator falls back to the
    /// baseline.
    pub fn combinations(&self) -> Option<usize> {
        if self.candidates.is_empty() {
            return Some(0);
        }
        self.candidates
            .iter()
            .try_fold(1usize, |total, values| total.checked_mul(values.len()))
    }

    // Add one to the mixed-radix counter. Returns false on overflow.
    fn increment(&mut self) -> bool {
        let mut carry = 1;
        for (index, candidates) in self.indices.iter_mut().zip(&self.candidates) {
            let size = candidates.len() as isize;
            let total = *index + carry;
            carry = total / size;
            *index = total % size;
            if carry == 0 {
                break;
            }
        }
        carry == 0
    }
}

fn unnamed_item() -> VariableError {
    VariableError::MissingName {
        value: "<sequence>".to_string(),
    }
}

fn invalid_config(err: serde_yaml::Error) -> CombinatorError {
    CombinatorError::InvalidConfig {
        kind: GRID.to_string(),
        reason: err.to_string(),
    }
}

impl CombinatorStrategy for GridCombinator {
    fn type_name(&self) -> &str {
        GRID
    }

    fn next(&mut self) -> Option<VariableMap> {
        if self.exhausted || self.candidates.is_empty() {
            return None;
        }
        if !self.increment() {
            self.exhausted = true;
            return None;
        }

        let result = self
            .indices
            .iter()
            .zip(&self.candidates)
            .map(|(&index, candidates)| {
                let entry = candidates[index as usize].clone();
                (entry.name.clone(), entry)
            })
            .collect();
        Some(result)
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
