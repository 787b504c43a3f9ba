//! List command specs
//!
//! Verify sweep enumeration order and output formats.

use crate::prelude::*;

#[test]
fn grid_points_are_listed_in_order() {
    let temp = Project::empty();
    temp.file("runbook.yml", GRID_RUNBOOK);

    temp.sweep()
        .args(&["list", "runbook.yml"])
        .passes()
        .stdout_eq(
            "#0 os=ubuntu size=small\n\
             #1 os=debian size=small\n\
             #2 os=ubuntu size=large\n\
             #3 os=debian size=large\n\
             #4 os=ubuntu size=xlarge\n\
             #5 os=debian size=xlarge\n",
        );
}

#[test]
fn runbook_without_combinator_has_one_point() {
    let temp = Project::empty();
    temp.file("runbook.yml", MINIMAL_RUNBOOK);

    temp.sweep()
        .args(&["list", "runbook.yml"])
        .passes()
        .stdout_eq("#0 (baseline)\n");
}

#[test]
fn json_lists_resolved_runbooks() {
    let temp = Project::empty();
    temp.file("runbook.yml", GRID_RUNBOOK);

    let stdout = temp
        .sweep()
        .args(&["list", "runbook.yml", "--format", "json"])
        .passes()
        .stdout();
    let points: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();

    assert_eq!(points.len(), 6);
    assert_eq!(points[3]["index"], 3);
    assert_eq!(points[3]["assignment"]["os"], "debian");
    assert_eq!(points[3]["runbook"]["image"], "debian");
    assert_eq!(points[3]["runbook"]["size"], "large");
}

#[test]
fn grid_values_can_come_from_command_line() {
    let temp = Project::empty();
    temp.file(
        "runbook.yml",
        r#"name: cli
os: $(os)
combinator:
  type: grid
  items:
    - name: os
      value: [a, b]
"#,
    );

    temp.sweep()
        .args(&["list", "runbook.yml", "-v", "os:ignored"])
        .passes()
        .stdout_eq("#0 os=a\n#1 os=b\n");
}
