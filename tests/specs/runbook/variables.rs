//! Variable override specs
//!
//! Command line pairs win over environment, which wins over documents.
//! Secrets never reach stdout.

use crate::prelude::*;

const REGION_RUNBOOK: &str = "name: $(region)\nvariable:\n  - name: region\n    value: westus\n";

#[test]
fn command_line_overrides_document() {
    let temp = Project::empty();
    temp.file("runbook.yml", REGION_RUNBOOK);

    temp.sweep()
        .args(&["check", "runbook.yml", "-v", "region:eastus"])
        .passes()
        .stdout_has("sweep_eastus");
}

#[test]
fn environment_overrides_document() {
    let temp = Project::empty();
    temp.file("runbook.yml", REGION_RUNBOOK);

    temp.sweep()
        .env("SWEEP_REGION", "northeurope")
        .args(&["check", "runbook.yml"])
        .passes()
        .stdout_has("sweep_northeurope");
}

#[test]
fn command_line_overrides_environment() {
    let temp = Project::empty();
    temp.file("runbook.yml", REGION_RUNBOOK);

    temp.sweep()
        .env("SWEEP_REGION", "northeurope")
        .args(&["check", "runbook.yml", "--variable", "region:centralus"])
        .passes()
        .stdout_has("sweep_centralus");
}

#[test]
fn secret_pair_is_masked_in_output() {
    let temp = Project::empty();
    temp.file(
        "runbook.yml",
        "name: secret\npassword: $(pw)\nlogin: admin-$(pw)\n",
    );

    temp.sweep()
        .args(&["check", "runbook.yml", "--format", "json"])
        .args(&["-v", "s:pw:hunter2"])
        .passes()
        .stdout_lacks("hunter2")
        .stdout_has("admin-******");
}

#[test]
fn secret_environment_variable_is_masked() {
    let temp = Project::empty();
    temp.file("runbook.yml", "name: secret\ntoken: $(token)\n");

    temp.sweep()
        .env("S_SWEEP_TOKEN", "abc123")
        .args(&["check", "runbook.yml", "--format", "json"])
        .passes()
        .stdout_lacks("abc123");
}

#[test]
fn secret_grid_values_are_masked_in_list() {
    let temp = Project::empty();
    temp.file(
        "runbook.yml",
        r#"key: $(key)
combinator:
  type: grid
  items:
    - name: key
      is_secret: true
      value: [k1, k2]
"#,
    );

    temp.sweep()
        .args(&["list", "runbook.yml"])
        .passes()
        .stdout_eq("#0 key=******\n#1 key=******\n");
}

#[test]
fn variable_file_is_read_relative_to_runbook() {
    let temp = Project::empty();
    temp.file("config/values.yml", "region: japaneast\n");
    temp.file(
        "config/runbook.yml",
        "name: $(region)\nvariable:\n  - file: values.yml\n",
    );

    temp.sweep()
        .args(&["check", "config/runbook.yml"])
        .passes()
        .stdout_has("sweep_japaneast");
}

#[test]
fn typed_secret_is_masked_in_json_output() {
    let temp = Project::empty();
    temp.file(
        "runbook.yml",
        r#"name: service
port: $(port)
variable:
  - name: port
    value: 8443
    is_secret: true
"#,
    );

    temp.sweep()
        .args(&["check", "runbook.yml", "--format", "json"])
        .passes()
        .stdout_lacks("8443")
        .stdout_has("\"port\": \"******\"");
}

#[test]
fn secret_in_run_name_is_masked_in_text_output() {
    let temp = Project::empty();
    temp.file("runbook.yml", "name: $(tag)\n");

    temp.sweep()
        .args(&["check", "runbook.yml", "-v", "s:tag:classified"])
        .passes()
        .stdout_lacks("classified")
        .stdout_has("sweep_******");
}

#[test]
fn secret_in_schema_error_is_masked() {
    let temp = Project::empty();
    temp.file(
        "runbook.yml",
        r#"name: leak
concurrency: $(token)
variable:
  - name: token
    value: hunter2
    is_secret: true
"#,
    );

    temp.sweep()
        .args(&["check", "runbook.yml"])
        .fails()
        .stderr_has("concurrency")
        .stderr_lacks("hunter2");
}
