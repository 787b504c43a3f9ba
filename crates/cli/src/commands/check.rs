// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Load and validate a runbook at the first point of its sweep

use super::RunbookArgs;
use crate::output::{print_masked, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use sweep_core::CombinatorRegistry;

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub runbook: RunbookArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct CheckSummary {
    run_name: String,
    concurrency: usize,
    extensions: Vec<String>,
    unused: Vec<String>,
    runbook: serde_json::Value,
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.run_name)?;
        write!(f, "\nconcurrency: {}", self.concurrency)?;
        if !self.extensions.is_empty() {
            write!(f, "\nextensions: {}", self.extensions.join(", "))?;
        }
        if !self.unused.is_empty() {
            write!(f, "\nunused variables: {}", self.unused.join(", "))?;
        }
        Ok(())
    }
}

pub fn handle(args: CheckArgs) -> Result<()> {
    let mut registry = CombinatorRegistry::with_builtins();
    let loaded = args.runbook.load(&mut registry)?;

    // combinator variables only exist once the sweep starts
    let resolved = match loaded.sweep(&registry)?.next() {
        Some(point) => point?.resolved,
        None => loaded.resolve(loaded.variables())?,
    };

    let summary = CheckSummary {
        run_name: resolved.runbook.run_name(),
        concurrency: resolved.runbook.concurrency(),
        extensions: loaded
            .extensions()
            .iter()
            .filter_map(|e| e.name.clone())
            .collect(),
        unused: resolved.unused().into_iter().map(str::to_string).collect(),
        runbook: serde_json::to_value(&resolved.runbook)?,
    };
    tracing::debug!(path = %loaded.path().display(), "runbook checked");
    print_masked(&summary, args.format, &resolved.variables)
}
