//! Error reporting specs
//!
//! Failures exit non-zero with a readable message on stderr.

use crate::prelude::*;

#[test]
fn missing_runbook_fails() {
    Project::empty()
        .sweep()
        .args(&["check", "nope.yml"])
        .fails()
        .stderr_has("error:")
        .stderr_has("nope.yml");
}

#[test]
fn parent_cycle_is_reported() {
    let temp = Project::empty();
    temp.file("a.yml", "parent:\n  - path: b.yml\n");
    temp.file("b.yml", "parent:\n  - path: a.yml\n");

    temp.sweep()
        .args(&["check", "a.yml"])
        .fails()
        .stderr_has("circular reference")
        .stderr_has("a.yml is already on the parent chain");
}

#[test]
fn undefined_variable_suggests_override() {
    let temp = Project::empty();
    temp.file("runbook.yml", "name: $(missing)\n");

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .fails()
        .stderr_has("cannot find variable 'missing'")
        .stderr_has("-v missing:<value>")
        .stderr_has("SWEEP_MISSING=<value>");
}

#[test]
fn malformed_pair_is_rejected() {
    let temp = Project::empty();
    temp.file("runbook.yml", MINIMAL_RUNBOOK);

    temp.sweep()
        .args(&["check", "runbook.yml", "-v", "novalue"])
        .fails()
        .stderr_has("invalid variable pair 'novalue'");
}

#[test]
fn schema_errors_are_listed() {
    let temp = Project::empty();
    temp.file("runbook.yml", "name: [a, b]\nconcurrency: lots\n");

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .fails()
        .stderr_has("runbook failed validation")
        .stderr_has("-> name: expected string")
        .stderr_has("-> concurrency: expected integer");
}

#[test]
fn unknown_combinator_is_reported() {
    let temp = Project::empty();
    temp.file("runbook.yml", "combinator:\n  type: random\n");

    temp.sweep()
        .args(&["list", "runbook.yml"])
        .fails()
        .stderr_has("unknown combinator type 'random'");
}
