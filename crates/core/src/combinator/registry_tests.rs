// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::variable::{VariableEntry, VariableMap};
use yare::parameterized;

struct Once {
    done: bool,
}

impl CombinatorStrategy for Once {
    fn type_name(&self) -> &str {
        "once"
    }

    fn next(&mut self) -> Option<VariableMap> {
        if std::mem::replace(&mut self.done, true) {
            return None;
        }
        let entry = VariableEntry::new("picked", true, false);
        Some([(entry.name.clone(), entry)].into_iter().collect())
    }
}

fn once_factory(_: &Mapping) -> Result<Box<dyn CombinatorStrategy>, CombinatorError> {
    Ok(Box::new(Once { done: false }))
}

fn config(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

#[test]
fn builtins_include_grid() {
    let registry = CombinatorRegistry::with_builtins();
    assert!(registry.contains("grid"));
    assert!(registry.contains("GRID"));
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["grid"]);
}

#[test]
fn creates_grid_from_config() {
    let registry = CombinatorRegistry::with_builtins();
    let mut combinator = registry
        .create(&config(
            "type: Grid\nitems:\n  - name: a\n    value: [1, 2]\n",
        ))
        .unwrap();
    assert_eq!(combinator.type_name(), "grid");

    let base = VariableMap::new();
    assert!(combinator.fetch(&base).is_some());
    assert!(combinator.fetch(&base).is_some());
    assert!(combinator.fetch(&base).is_none());
}

#[test]
fn registered_strategy_is_created() {
    let mut registry = CombinatorRegistry::with_builtins();
    registry.register("Once", once_factory).unwrap();

    let mut combinator = registry.create(&config("type: once")).unwrap();
    let variables = combinator.fetch(&VariableMap::new()).unwrap();
    assert_eq!(variables["picked"].data, Value::from(true));
}

#[test]
fn duplicate_registration_fails() {
    let mut registry = CombinatorRegistry::with_builtins();
    let err = registry.register("grid", once_factory).unwrap_err();
    assert!(matches!(err, CombinatorError::Duplicate(ref name) if name == "grid"));
}

#[parameterized(
    not_a_mapping = { "- grid" },
    no_type = { "items: []" },
    type_not_string = { "type: 3" },
)]
fn missing_type_is_rejected(text: &str) {
    let registry = CombinatorRegistry::with_builtins();
    let err = registry.create(&config(text)).unwrap_err();
    assert!(matches!(err, CombinatorError::MissingType));
}

#[test]
fn unknown_type_is_rejected() {
    let registry = CombinatorRegistry::with_builtins();
    let err = registry.create(&config("type: random")).unwrap_err();
    assert_eq!(err.to_string(), "unknown combinator type 'random'");
}

#[test]
fn grid_config_errors_are_reported() {
    let registry = CombinatorRegistry::with_builtins();
    let err = registry
        .create(&config("type: grid\nitems: []\nextra: 1\n"))
        .unwrap_err();
    assert!(matches!(err, CombinatorError::InvalidConfig { .. }));
}
