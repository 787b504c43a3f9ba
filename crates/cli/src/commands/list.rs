// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enumerate the points of a sweep

use super::RunbookArgs;
use crate::output::{self, masked_json, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use sweep_core::CombinatorRegistry;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub runbook: RunbookArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PointInfo {
    index: usize,
    assignment: BTreeMap<String, String>,
    runbook: serde_json::Value,
}

impl fmt::Display for PointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)?;
        if self.assignment.is_empty() {
            return write!(f, " (baseline)");
        }
        for (name, value) in &self.assignment {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}

pub fn handle(args: ListArgs) -> Result<()> {
    let mut registry = CombinatorRegistry::with_builtins();
    let loaded = args.runbook.load(&mut registry)?;

    let mut points = Vec::new();
    for point in loaded.sweep(&registry)? {
        let point = point?;
        points.push(PointInfo {
            index: point.index,
            assignment: point
                .assignment
                .values()
                .map(|entry| (entry.name.clone(), entry.display_value()))
                .collect(),
            runbook: masked_json(&point.resolved.runbook, &point.resolved.variables)?,
        });
    }

    tracing::debug!(points = points.len(), "sweep enumerated");
    output::print_list(&points, args.format);
    Ok(())
}
