// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extensions: external modules that register combinator strategies

use crate::paths::absolute;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use sweep_core::document::scalar_text;
use sweep_core::variable::{has_references, substitute_str, VariableError, VariableMap};
use sweep_core::CombinatorRegistry;
use thiserror::Error;
use tracing::info;

/// Errors raised while resolving or importing extensions
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("invalid extension entry: {0}")]
    Invalid(String),
    #[error("extension path must not be empty")]
    EmptyPath,
    #[error("extension not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to import extension '{name}': {reason}")]
    Import { name: String, reason: String },
    #[error(transparent)]
    Variable(#[from] VariableError),
}

/// A resolved extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: PathBuf,
}

impl Extension {
    pub fn new(name: Option<&str>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.map(str::to_string),
            path: path.into(),
        }
    }
}

/// An `extension` list entry: a bare path or `{name, path}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExtension {
    Path(String),
    Entry {
        #[serde(default)]
        name: Option<String>,
        path: String,
    },
}

/// Parse an `extension` list as written, without resolving paths.
pub fn parse_extensions(raw: &Value) -> Result<Vec<Extension>, ExtensionError> {
    if raw.is_null() {
        return Ok(Vec::new());
    }
    let entries: Vec<RawExtension> =
        serde_yaml::from_value(raw.clone()).map_err(|e| ExtensionError::Invalid(e.to_string()))?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            RawExtension::Path(path) => Extension::new(None, path),
            RawExtension::Entry { name, path } => Extension {
                name,
                path: PathBuf::from(path),
            },
        })
        .collect())
}

/// Resolve an `extension` list against the declaring document's directory.
///
/// Variables are substituted into each path and the result is made absolute.
/// Declaration order is kept.
pub fn resolve_extensions(
    base_dir: &Path,
    raw: &Value,
    variables: &mut VariableMap,
) -> Result<Vec<Extension>, ExtensionError> {
    parse_extensions(raw)?
        .into_iter()
        .map(|extension| {
            let path = extension.path.to_string_lossy();
            let path = scalar_text(&substitute_str(&path, variables)?).unwrap_or_default();
            if path.trim().is_empty() {
                return Err(ExtensionError::EmptyPath);
            }
            Ok(Extension {
                name: extension.name,
                path: absolute(base_dir, path.trim()),
            })
        })
        .collect()
}

/// Anchor an `extension` list to the declaring document's directory.
///
/// Literal paths are made absolute. Paths holding `$(name)` references are
/// left unsubstituted for [`resolve_extensions`] to finish once the whole
/// tree's variables are known; a relative one is joined to `base_dir` unless
/// it starts with a reference, which may expand to an absolute path.
pub fn anchor_extensions(base_dir: &Path, raw: &Value) -> Result<Vec<Extension>, ExtensionError> {
    parse_extensions(raw)?
        .into_iter()
        .map(|extension| {
            let path = extension.path.to_string_lossy().trim().to_string();
            if path.is_empty() {
                return Err(ExtensionError::EmptyPath);
            }
            let path = if has_references(&path) && path.starts_with("$(") {
                PathBuf::from(path)
            } else {
                absolute(base_dir, path)
            };
            Ok(Extension {
                name: extension.name,
                path,
            })
        })
        .collect()
}

/// Merge a child's extensions under its parents'.
///
/// A current entry whose path is already listed by the parent is dropped;
/// if the parent entry is unnamed it takes the dropped entry's name. The
/// result is the parent entries followed by the remaining current ones.
pub fn merge_extensions(parent: &[Extension], current: &[Extension]) -> Vec<Extension> {
    let mut merged = parent.to_vec();
    for extension in current {
        match merged.iter_mut().find(|p| p.path == extension.path) {
            Some(existing) => {
                if existing.name.is_none() {
                    existing.name = extension.name.clone();
                }
            }
            None => merged.push(extension.clone()),
        }
    }
    merged
}

/// Imports one extension, registering whatever strategies it provides.
pub trait ExtensionImporter {
    fn import(
        &mut self,
        extension: &Extension,
        registry: &mut CombinatorRegistry,
    ) -> Result<(), ExtensionError>;
}

impl<T: ExtensionImporter + ?Sized> ExtensionImporter for &mut T {
    fn import(
        &mut self,
        extension: &Extension,
        registry: &mut CombinatorRegistry,
    ) -> Result<(), ExtensionError> {
        (**self).import(extension, registry)
    }
}

/// Default importer: checks that the extension exists and records it.
///
/// No code is loaded from the path.
#[derive(Debug, Default)]
pub struct PathImporter {
    imported: Vec<Extension>,
}

impl PathImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extensions imported so far, in import order
    pub fn imported(&self) -> &[Extension] {
        &self.imported
    }
}

impl ExtensionImporter for PathImporter {
    fn import(
        &mut self,
        extension: &Extension,
        _registry: &mut CombinatorRegistry,
    ) -> Result<(), ExtensionError> {
        if !extension.path.exists() {
            return Err(ExtensionError::NotFound {
                path: extension.path.clone(),
            });
        }
        info!(
            name = extension.name.as_deref().unwrap_or_default(),
            path = %extension.path.display(),
            "imported extension"
        );
        self.imported.push(extension.clone());
        Ok(())
    }
}

/// Name unnamed extensions `ext_<index>` and import them in order.
pub fn import_extensions(
    extensions: &mut [Extension],
    importer: &mut dyn ExtensionImporter,
    registry: &mut CombinatorRegistry,
) -> Result<(), ExtensionError> {
    for (index, extension) in extensions.iter_mut().enumerate() {
        if extension.name.is_none() {
            extension.name = Some(format!("ext_{index}"));
        }
        importer.import(extension, registry)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "extension_tests.rs"]
mod tests;
