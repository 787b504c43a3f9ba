// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use sweep_core::document::scalar_text;
use sweep_core::variable::{mask_secrets, VariableMap, SECRET_MASK};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Print output with every secret value masked.
pub fn print_masked<T: Serialize + std::fmt::Display>(
    value: &T,
    format: OutputFormat,
    variables: &VariableMap,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", mask_secrets(&value.to_string(), variables)),
        OutputFormat::Json => print(&masked_json(value, variables)?, format),
    }
    Ok(())
}

/// Convert to JSON with every secret value masked.
///
/// Strings have secret text replaced; a number or bool that is itself a
/// secret becomes the mask string.
pub fn masked_json<T: Serialize>(
    value: &T,
    variables: &VariableMap,
) -> anyhow::Result<serde_json::Value> {
    let secrets: Vec<String> = variables
        .values()
        .filter(|entry| entry.is_secret)
        .filter_map(|entry| scalar_text(&entry.data))
        .collect();
    let json = serde_json::to_value(value)?;
    Ok(mask_value(json, variables, &secrets))
}

fn mask_value(
    value: serde_json::Value,
    variables: &VariableMap,
    secrets: &[String],
) -> serde_json::Value {
    use serde_json::Value;
    let is_secret = |text: String| secrets.iter().any(|secret| *secret == text);
    match value {
        Value::String(text) => Value::String(mask_secrets(&text, variables)),
        Value::Number(number) if is_secret(number.to_string()) => SECRET_MASK.into(),
        Value::Bool(flag) if is_secret(flag.to_string()) => SECRET_MASK.into(),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| mask_value(item, variables, secrets))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, mask_value(item, variables, secrets)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
