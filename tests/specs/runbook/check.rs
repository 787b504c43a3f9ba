//! Check command specs
//!
//! Verify a runbook tree loads, resolves, and validates.

use crate::prelude::*;

#[test]
fn minimal_runbook_passes() {
    let temp = Project::empty();
    temp.file("runbook.yml", MINIMAL_RUNBOOK);

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .passes()
        .stdout_eq("sweep_minimal\nconcurrency: 1\n");
}

#[test]
fn unnamed_runbook_uses_default_name() {
    let temp = Project::empty();
    temp.file("runbook.yml", "concurrency: 2\n");

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .passes()
        .stdout_eq("sweep_not_named\nconcurrency: 2\n");
}

#[test]
fn check_validates_first_sweep_point() {
    let temp = Project::empty();
    temp.file("runbook.yml", GRID_RUNBOOK);

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .passes()
        .stdout_has("sweep_matrix")
        .stdout_has("unused variables: location");
}

#[test]
fn parents_are_merged() {
    let temp = Project::empty();
    temp.file(
        "base/common.yml",
        "name: base\nconcurrency: 4\nvariable:\n  - name: tier\n    value: 1\n",
    );
    temp.file(
        "runbook.yml",
        "name: child-$(tier)\nparent:\n  - path: base/common.yml\n",
    );

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .passes()
        .stdout_eq("sweep_child-1\nconcurrency: 4\n");
}

#[test]
fn extensions_are_listed() {
    let temp = Project::empty();
    temp.file("plugins/grid_plus/README", "extension\n");
    temp.file("other/README", "extension\n");
    temp.file(
        "runbook.yml",
        "name: ext\nextension:\n  - name: plus\n    path: plugins/grid_plus\n  - other\n",
    );

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .passes()
        .stdout_has("extensions: plus, ext_1");
}

#[test]
fn json_output_includes_resolved_runbook() {
    let temp = Project::empty();
    temp.file(
        "runbook.yml",
        r#"name: json
variable:
  - name: region
    value: westus
placement:
  region: $(region)
"#,
    );

    let stdout = temp
        .sweep()
        .args(&["check", "runbook.yml", "--format", "json"])
        .passes()
        .stdout();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(summary["run_name"], "sweep_json");
    assert_eq!(summary["runbook"]["placement"]["region"], "westus");
    assert_eq!(summary["unused"], serde_json::json!([]));
}

#[test]
fn log_level_sends_diagnostics_to_stderr() {
    let temp = Project::empty();
    temp.file("runbook.yml", MINIMAL_RUNBOOK);

    temp.sweep()
        .args(&["--log-level", "info", "check", "runbook.yml"])
        .passes()
        .stdout_eq("sweep_minimal\nconcurrency: 1\n")
        .stderr_has("loading runbook");
}
