// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driving a combinator over a loaded runbook

use crate::loader::{LoadError, LoadedRunbook, ResolvedRunbook};
use serde_yaml::Value;
use sweep_core::document::keys;
use sweep_core::variable::{substitute, VariableMap};
use sweep_core::{Combinator, CombinatorRegistry, GridCombinator, GridCombinatorConfig};
use tracing::debug;

/// One point of a sweep
#[derive(Debug, Clone)]
pub struct SweepPoint {
    /// Zero-based iteration index
    pub index: usize,
    /// Variables the combinator set for this point
    pub assignment: VariableMap,
    pub resolved: ResolvedRunbook,
}

/// Iterator over the runbooks produced by a combinator.
#[derive(Debug)]
pub struct Sweep<'a> {
    loaded: &'a LoadedRunbook,
    combinator: Combinator,
    index: usize,
}

impl LoadedRunbook {
    /// Start a sweep using the template's `combinator` block.
    ///
    /// Without a block the sweep has exactly one point, the baseline.
    pub fn sweep(&self, registry: &CombinatorRegistry) -> Result<Sweep<'_>, LoadError> {
        let combinator = match self.template().get(keys::COMBINATOR) {
            None | Some(Value::Null) => Combinator::new(Box::new(GridCombinator::new(
                GridCombinatorConfig::default(),
            )?)),
            Some(config) => {
                let mut variables = self.variables().clone();
                let config = substitute(config.clone(), &mut variables)?;
                registry.create(&config)?
            }
        };
        debug!(combinator = combinator.type_name(), "starting sweep");

        Ok(Sweep {
            loaded: self,
            combinator,
            index: 0,
        })
    }
}

impl Iterator for Sweep<'_> {
    type Item = Result<SweepPoint, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let baseline = self.loaded.variables();
        let (variables, assignment) = self.combinator.fetch_with_overrides(baseline)?;
        let index = self.index;
        self.index += 1;

        debug!(index, "sweep point");
        Some(
            self.loaded
                .resolve(&variables)
                .map(|resolved| SweepPoint {
                    index,
                    assignment,
                    resolved,
                }),
        )
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
