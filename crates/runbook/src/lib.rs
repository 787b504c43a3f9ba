// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Runbook loading, merging, validation, and sweeps

mod extension;
mod loader;
mod merge;
mod paths;
mod runbook;
mod schema;
mod sweep;

pub use extension::{
    anchor_extensions, import_extensions, merge_extensions, parse_extensions,
    resolve_extensions, Extension, ExtensionError, ExtensionImporter, PathImporter,
};
pub use loader::{load_data, load_runbook, LoadError, LoadedRunbook, ResolvedRunbook, RunbookLoader};
pub use merge::merge_data;
pub use runbook::{ParentRef, Runbook};
pub use schema::{
    runbook_schema, Field, FieldKind, Schema, SchemaError, SchemaErrors, DEFAULT_CONCURRENCY,
    DEFAULT_NAME,
};
pub use sweep::{Sweep, SweepPoint};
