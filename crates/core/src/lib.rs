// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sweep-core: Building blocks for runbook resolution
//!
//! This crate provides:
//! - Document decoding (YAML and TOML) into ordered mappings
//! - Variables: declarations, resolved entries, overrides, and `$(name)` substitution
//! - Combinators that enumerate variable assignments for a sweep

pub mod combinator;
pub mod document;
pub mod variable;

pub use combinator::{
    Combinator, CombinatorError, CombinatorFactory, CombinatorRegistry, CombinatorStrategy,
    GridCombinator, GridCombinatorConfig,
};
pub use document::{read_document, Document, DocumentError, DocumentFormat};
pub use variable::{Variable, VariableEntry, VariableError, VariableMap};
