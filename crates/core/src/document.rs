// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runbook documents (syntactic layer).
//!
//! A document is the ordered key/value mapping decoded from one runbook
//! source, before any merging, substitution, or validation. YAML is the
//! primary format; files ending in `.toml` are decoded as TOML into the same
//! value model.

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An ordered mapping decoded from a single runbook source.
pub type Document = Mapping;

/// Well-known top-level keys.
pub mod keys {
    pub const NAME: &str = "name";
    pub const PARENT: &str = "parent";
    pub const VARIABLE: &str = "variable";
    pub const EXTENSION: &str = "extension";
    pub const COMBINATOR: &str = "combinator";
    pub const CONCURRENCY: &str = "concurrency";
}

/// Errors that can occur while reading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// IO error reading file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error
    #[error("YAML syntax error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// TOML syntax error
    #[error("TOML syntax error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The root of the document is not a mapping
    #[error("root of {path} must be a mapping, got {kind}")]
    NotMapping { path: PathBuf, kind: &'static str },
}

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension. Anything that isn't `.toml`
    /// is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Decode document content.
///
/// `origin` is only used for error messages. Empty content decodes to an
/// empty document.
pub fn decode(
    content: &str,
    format: DocumentFormat,
    origin: &Path,
) -> Result<Document, DocumentError> {
    let value: Value = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| DocumentError::Yaml {
            path: origin.to_path_buf(),
            source: e,
        })?,
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| DocumentError::Toml {
            path: origin.to_path_buf(),
            source: e,
        })?,
    };

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Document::new()),
        other => Err(DocumentError::NotMapping {
            path: origin.to_path_buf(),
            kind: kind_name(&other),
        }),
    }
}

/// Read and decode a document from a file.
pub fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode(&content, DocumentFormat::from_path(path), path)
}

/// Human readable name of a value's kind, used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Render a scalar as plain text. Returns `None` for sequences, mappings,
/// and tagged values.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
