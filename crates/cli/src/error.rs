// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Load failures are mapped to:
//! - What went wrong (message)
//! - Where it happened (context)
//! - How to fix it (suggestions)

use std::fmt;
use sweep_core::variable::VariableError;
use sweep_runbook::{ExtensionError, LoadError};

const CYCLE_HINT: &str = "Remove the parent entry that points back up the chain";
const EXTENSION_HINT: &str = "Extension paths are relative to the runbook that declares them";

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct SweepError {
    /// What went wrong
    pub message: String,
    /// Where it happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl SweepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Describe any error returned by a command.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<LoadError>() {
            Some(load) => Self::from_load(load),
            None => Self::new(format!("{:#}", err)),
        }
    }

    pub fn from_load(err: &LoadError) -> Self {
        match err {
            LoadError::Cycle { path } => {
                let context = format!("{} is already on the parent chain", path.display());
                Self::new(err.to_string())
                    .with_context(context)
                    .with_suggestion(CYCLE_HINT)
            }
            LoadError::Variable(VariableError::Undefined { name }) => {
                Self::undefined(err.to_string(), std::slice::from_ref(name))
            }
            LoadError::Variable(VariableError::Unresolved { names }) => {
                Self::undefined(err.to_string(), names)
            }
            LoadError::Schema(errors) => errors.0.iter().fold(
                Self::new("runbook failed validation"),
                |acc, e| acc.with_context(e.to_string()),
            ),
            LoadError::Extension(ExtensionError::NotFound { path }) => {
                let context = format!("looked for {}", path.display());
                Self::new(err.to_string())
                    .with_context(context)
                    .with_suggestion(EXTENSION_HINT)
            }
            LoadError::Unimplemented(_) => Self::new(err.to_string())
                .with_suggestion("Remove 'strategy' from the parent entry"),
            _ => Self::new(err.to_string()),
        }
    }

    fn undefined(message: String, names: &[String]) -> Self {
        names.iter().fold(Self::new(message), |acc, name| {
            acc.with_suggestion(format!("Pass it on the command line: -v {}:<value>", name))
                .with_suggestion(format!(
                    "Or set it in the environment: SWEEP_{}=<value>",
                    name.to_uppercase()
                ))
        })
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for SweepError {}
