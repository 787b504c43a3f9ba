// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runbook variables.
//!
//! Variables are declared in a runbook's `variable` list, supplied on the
//! command line (`name:value`, `s:name:value` for secrets), or taken from the
//! environment (`SWEEP_NAME`, `S_SWEEP_NAME`). This module provides:
//!
//! - **entry**: declarations (`Variable`) and resolved entries (`VariableEntry`)
//! - **load**: loading a document's declarations into a `VariableMap`
//! - **overrides**: command line pairs and environment overrides
//! - **substitute**: `$(name)` substitution with usage tracking
//!
//! # Precedence
//!
//! ```text
//! command line > environment > child document > parent document
//! ```

mod entry;
mod load;
mod overrides;
mod substitute;

pub use entry::{Variable, VariableEntry, VariableMap, SECRET_MASK};
pub use load::{entry_from_raw, load_variables, parse_declarations, validate_combinator_input};
pub use overrides::{from_env, parse_pairs, DEFAULT_ENV_PREFIX};
pub use substitute::{has_references, mask_secrets, substitute, substitute_str};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or substituting variables.
#[derive(Debug, Error)]
pub enum VariableError {
    /// A declaration sets both `file` and `value`
    #[error("variable '{name}' declares both file and value, only one is allowed")]
    FileAndValue { name: String },

    /// A declaration sets neither `file` nor `value`
    #[error("variable '{name}' must declare either file or value")]
    NoFileOrValue { name: String },

    /// An inline value without a name
    #[error("variable with value {value} must have a name")]
    MissingName { value: String },

    /// Malformed `variable` list
    #[error("invalid variable declaration: {0}")]
    InvalidDeclaration(String),

    /// A reference to a variable that isn't defined
    #[error("cannot find variable '{name}', make sure it's defined")]
    Undefined { name: String },

    /// Declarations whose references could not be resolved
    #[error("variables are undefined: {}", names.join(", "))]
    Unresolved { names: Vec<String> },

    /// A sequence or mapping referenced inside a longer string
    #[error("variable '{name}' is a {kind} and cannot be embedded in '{text}'")]
    NonScalarInterpolation {
        name: String,
        kind: &'static str,
        text: String,
    },

    /// Malformed command line pair
    #[error("invalid variable pair '{0}', expected name:value or s:name:value")]
    InvalidPair(String),

    /// A declaration not usable as combinator input
    #[error("invalid combinator item '{name}': {reason}")]
    InvalidCombinatorInput { name: String, reason: String },

    /// IO error reading a variable file
    #[error("IO error reading variable file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML error decoding a variable file
    #[error("cannot decode variable file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An unnamed variable file whose root isn't a mapping
    #[error("variable file {path} must contain a mapping of names to values")]
    FileNotMapping { path: PathBuf },
}
