// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod list;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use sweep_core::CombinatorRegistry;
use sweep_runbook::{LoadedRunbook, RunbookLoader};

/// Arguments shared by commands that load a runbook
#[derive(Args, Debug)]
pub struct RunbookArgs {
    /// Path to the root runbook
    pub runbook: PathBuf,

    /// Variable override, `name:value` or `s:name:value` for a secret
    #[arg(short = 'v', long = "variable", value_name = "NAME:VALUE")]
    pub variables: Vec<String>,
}

impl RunbookArgs {
    /// Load the runbook with environment and command line overrides.
    pub fn load(&self, registry: &mut CombinatorRegistry) -> Result<LoadedRunbook> {
        let loaded = RunbookLoader::new(registry)
            .with_env(std::env::vars())
            .load(&self.runbook, &self.variables)?;
        Ok(loaded)
    }
}
