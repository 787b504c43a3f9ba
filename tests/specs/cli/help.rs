//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .sweep()
        .args(&["--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("list");
}

#[test]
fn version_names_binary() {
    Project::empty()
        .sweep()
        .args(&["--version"])
        .passes()
        .stdout_has("sweep");
}

#[test]
fn list_help_documents_variable_flag() {
    Project::empty()
        .sweep()
        .args(&["list", "--help"])
        .passes()
        .stdout_has("--variable")
        .stdout_has("NAME:VALUE");
}

#[test]
fn help_documents_log_level() {
    Project::empty()
        .sweep()
        .args(&["--help"])
        .passes()
        .stdout_has("--log-level");
}
