// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Combinators enumerate variable assignments for a sweep.
//!
//! A combinator strategy yields incremental variable overrides, one sweep
//! point per call. The `Combinator` wrapper overlays them on the caller's
//! variables and guarantees at least one assignment, so a driving loop can
//! always do:
//!
//! ```ignore
//! let mut combinator = registry.create(&config)?;
//! while let Some(variables) = combinator.fetch(&baseline) {
//!     let runbook = loaded.resolve(&variables)?;
//!     // run it
//! }
//! ```

mod grid;
mod registry;

pub use grid::{GridCombinator, GridCombinatorConfig, GRID};
pub use registry::{CombinatorFactory, CombinatorRegistry};

use crate::variable::{VariableError, VariableMap};
use thiserror::Error;

/// Errors that can occur while building a combinator.
#[derive(Debug, Error)]
pub enum CombinatorError {
    #[error("combinator config must be a mapping with a 'type' field")]
    MissingType,
    #[error("unknown combinator type '{0}'")]
    UnknownType(String),
    #[error("combinator type '{0}' is already registered")]
    Duplicate(String),
    #[error("invalid {kind} combinator config: {reason}")]
    InvalidConfig { kind: String, reason: String },
    #[error("combinator item '{name}' has no candidate values")]
    EmptyCandidates { name: String },
    #[error(transparent)]
    Variable(#[from] VariableError),
}

/// One strategy for enumerating variable assignments.
pub trait CombinatorStrategy: Send {
    /// Registered type name, e.g. `grid`
    fn type_name(&self) -> &str;

    /// Overrides for the next sweep point, or `None` once exhausted.
    fn next(&mut self) -> Option<VariableMap>;
}

/// A single-use enumeration over a strategy.
pub struct Combinator {
    strategy: Box<dyn CombinatorStrategy>,
    is_first: bool,
}

impl Combinator {
    pub fn new(strategy: Box<dyn CombinatorStrategy>) -> Self {
        Self {
            strategy,
            is_first: true,
        }
    }

    pub fn type_name(&self) -> &str {
        self.strategy.type_name()
    }

    /// Fetch the next assignment.
    ///
    /// Returns `current` overlaid with the strategy's next overrides. If the
    /// strategy has nothing on the very first call, `current` is returned
    /// unchanged; every later exhausted call returns `None`.
    pub fn fetch(&mut self, current: &VariableMap) -> Option<VariableMap> {
        self.fetch_with_overrides(current)
            .map(|(variables, _)| variables)
    }

    /// Like [`Combinator::fetch`], also returning the overrides the strategy
    /// set (empty for the unchanged first assignment).
    pub fn fetch_with_overrides(
        &mut self,
        current: &VariableMap,
    ) -> Option<(VariableMap, VariableMap)> {
        let overrides = self.strategy.next();
        let is_first = std::mem::replace(&mut self.is_first, false);

        match overrides {
            Some(overrides) => {
                let mut result = current.clone();
                result.extend(overrides.clone());
                Some((result, overrides))
            }
            None if is_first => Some((current.clone(), VariableMap::new())),
            None => None,
        }
    }
}

impl std::fmt::Debug for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combinator")
            .field("type", &self.strategy.type_name())
            .field("is_first", &self.is_first)
            .finish()
    }
}

#[cfg(test)]
#[path = "combinator_tests.rs"]
mod tests;
