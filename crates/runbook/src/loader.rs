// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive runbook loading

use crate::extension::{
    anchor_extensions, import_extensions, merge_extensions, resolve_extensions, Extension,
    ExtensionError, ExtensionImporter, PathImporter,
};
use crate::merge::merge_data;
use crate::paths::absolute;
use crate::runbook::{ParentRef, Runbook};
use crate::schema::SchemaErrors;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use sweep_core::document::{keys, read_document, scalar_text, DocumentError};
use sweep_core::variable::{
    from_env, load_variables, mask_secrets, parse_declarations, parse_pairs, substitute,
    substitute_str, VariableError, VariableMap, DEFAULT_ENV_PREFIX,
};
use sweep_core::{CombinatorError, CombinatorRegistry, Document};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a runbook load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Variable(#[from] VariableError),
    #[error("invalid parent reference: {0}")]
    Parent(String),
    #[error("circular reference on runbook includes detected: {}", path.display())]
    Cycle { path: PathBuf },
    #[error("{0} is not implemented")]
    Unimplemented(String),
    #[error(transparent)]
    Extension(#[from] ExtensionError),
    #[error(transparent)]
    Combinator(#[from] CombinatorError),
    #[error(transparent)]
    Schema(#[from] SchemaErrors),
}

/// Loads a runbook tree into a [`LoadedRunbook`].
///
/// ```ignore
/// let mut registry = CombinatorRegistry::with_builtins();
/// let loaded = RunbookLoader::new(&mut registry)
///     .with_env(std::env::vars())
///     .load(Path::new("runbook.yml"), &["location:westus"])?;
/// ```
pub struct RunbookLoader<'a> {
    registry: &'a mut CombinatorRegistry,
    importer: Box<dyn ExtensionImporter + 'a>,
    env: VariableMap,
}

impl<'a> RunbookLoader<'a> {
    /// A loader that imports extensions with [`PathImporter`] and ignores
    /// the environment.
    pub fn new(registry: &'a mut CombinatorRegistry) -> Self {
        Self {
            registry,
            importer: Box::new(PathImporter::new()),
            env: VariableMap::new(),
        }
    }

    pub fn with_importer(mut self, importer: impl ExtensionImporter + 'a) -> Self {
        self.importer = Box::new(importer);
        self
    }

    /// Take `SWEEP_*` and `S_SWEEP_*` overrides from `vars`.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.env = from_env(DEFAULT_ENV_PREFIX, vars);
        self
    }

    /// Load the runbook at `root` with `name:value` command line pairs.
    pub fn load<S: AsRef<str>>(
        &mut self,
        root: &Path,
        cli_args: &[S],
    ) -> Result<LoadedRunbook, LoadError> {
        let mut overrides = self.env.clone();
        overrides.extend(parse_pairs(cli_args)?);

        let root = canonicalize(root)?;
        info!(path = %root.display(), "loading runbook");

        let used_paths = BTreeSet::from([root.clone()]);
        let merged = load_data(&root, &used_paths, &overrides)?;

        let base_dir = parent_dir(&root);
        let variables = load_variables(&merged, base_dir, &overrides)?;

        // deferred references may land on a path another entry already has
        let mut extensions = match merged.get(keys::EXTENSION) {
            Some(raw) => {
                let resolved = resolve_extensions(base_dir, raw, &mut variables.clone())?;
                merge_extensions(&[], &resolved)
            }
            None => Vec::new(),
        };
        import_extensions(&mut extensions, self.importer.as_mut(), self.registry)?;

        let mut template = merged;
        template.remove(keys::VARIABLE);
        template.remove(keys::EXTENSION);

        if tracing::enabled!(tracing::Level::DEBUG) {
            let text = serde_yaml::to_string(&template).unwrap_or_default();
            debug!("merged runbook:\n{}", mask_secrets(&text, &variables));
        }

        Ok(LoadedRunbook {
            template,
            variables,
            extensions,
            path: root,
        })
    }
}

/// Load one document and everything it inherits from.
///
/// `used_paths` holds the canonical paths on the current include chain; a
/// parent already in it is a cycle. `inherited` are the variables resolved
/// by the including document, which win over this document's declarations.
/// The result is merged but not substituted.
pub fn load_data(
    path: &Path,
    used_paths: &BTreeSet<PathBuf>,
    inherited: &VariableMap,
) -> Result<Document, LoadError> {
    let depth = used_paths.len().saturating_sub(1);
    debug!(path = %path.display(), depth, "loading document");

    let document = read_document(path)?;
    let base_dir = parent_dir(path);
    let mut variables = load_variables(&document, base_dir, inherited)?;
    let document = normalize(document, base_dir, &mut variables)?;

    let mut accumulated: Option<Document> = None;
    for parent in parse_parents(&document)? {
        if let Some(strategy) = &parent.strategy {
            return Err(LoadError::Unimplemented(format!(
                "parent merge strategy '{}'",
                strategy
            )));
        }

        let relative = scalar_text(&substitute_str(&parent.path, &mut variables)?)
            .unwrap_or_default();
        let parent_path = canonicalize(&absolute(base_dir, relative))?;
        if used_paths.contains(&parent_path) {
            return Err(LoadError::Cycle { path: parent_path });
        }

        let mut branch = used_paths.clone();
        branch.insert(parent_path.clone());
        let parent_document = load_data(&parent_path, &branch, &variables)?;

        accumulated = Some(match accumulated {
            Some(previous) => merge_data(&previous, &parent_document)?,
            None => parent_document,
        });
    }

    match accumulated {
        Some(parent) => merge_data(&parent, &document),
        None => Ok(document),
    }
}

// Make variable files and extension paths absolute against the declaring
// document's directory. Extension paths with references are substituted
// later, against the merged variables.
fn normalize(
    mut document: Document,
    base_dir: &Path,
    variables: &mut VariableMap,
) -> Result<Document, LoadError> {
    let mut declarations = parse_declarations(&document)?;
    if declarations.iter().any(|d| d.file.is_some()) {
        for declaration in &mut declarations {
            if let Some(file) = &declaration.file {
                let file = substitute_str(file, variables)?;
                let file = scalar_text(&file).unwrap_or_default();
                declaration.file = Some(absolute(base_dir, file).display().to_string());
            }
        }
        let value = serde_yaml::to_value(&declarations)
            .map_err(|e| VariableError::InvalidDeclaration(e.to_string()))?;
        document.insert(Value::from(keys::VARIABLE), value);
    }

    if let Some(raw) = document.get(keys::EXTENSION) {
        let extensions = anchor_extensions(base_dir, raw)?;
        let value = serde_yaml::to_value(&extensions)
            .map_err(|e| ExtensionError::Invalid(e.to_string()))?;
        document.insert(Value::from(keys::EXTENSION), value);
    }

    Ok(document)
}

fn parse_parents(document: &Document) -> Result<Vec<ParentRef>, LoadError> {
    match document.get(keys::PARENT) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_yaml::from_value(value.clone())
            .map_err(|e| LoadError::Parent(e.to_string())),
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, LoadError> {
    std::fs::canonicalize(path).map_err(|e| {
        LoadError::Document(DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// A merged runbook template and its baseline variables.
///
/// The template still holds `$(name)` references; it can be resolved any
/// number of times with different variables.
#[derive(Debug, Clone)]
pub struct LoadedRunbook {
    template: Document,
    variables: VariableMap,
    extensions: Vec<Extension>,
    path: PathBuf,
}

/// A runbook resolved against one set of variables
#[derive(Debug, Clone)]
pub struct ResolvedRunbook {
    pub runbook: Runbook,
    /// The variables used for resolution, with usage flags set
    pub variables: VariableMap,
}

impl ResolvedRunbook {
    /// Names of variables no part of the runbook referenced
    pub fn unused(&self) -> Vec<&str> {
        self.variables
            .values()
            .filter(|entry| !entry.is_used)
            .map(|entry| entry.name.as_str())
            .collect()
    }
}

impl LoadedRunbook {
    /// Merged template with `variable` and `extension` stripped
    pub fn template(&self) -> &Document {
        &self.template
    }

    /// Baseline variables: documents overlaid with environment and command line
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Imported extensions, in import order
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Canonical path of the root document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Substitute `variables` into the template and validate the result.
    pub fn resolve(&self, variables: &VariableMap) -> Result<ResolvedRunbook, LoadError> {
        let mut variables = variables.clone();
        let mut document = Document::with_capacity(self.template.len());
        for (key, value) in &self.template {
            document.insert(key.clone(), substitute(value.clone(), &mut variables)?);
        }

        let masked = |errors: SchemaErrors| errors.masked(&variables);
        let runbook = Runbook::from_document(&document).map_err(masked)?;
        let resolved = ResolvedRunbook { runbook, variables };

        let unused = resolved.unused();
        if !unused.is_empty() {
            debug!("variables unused: {}", unused.join(", "));
        }
        for entry in resolved.variables.values() {
            debug!(variable = %entry, "resolved variable");
        }
        Ok(resolved)
    }
}

/// Load and resolve a runbook in one step.
///
/// Environment overrides are read from the process environment.
pub fn load_runbook<S: AsRef<str>>(
    root: &Path,
    cli_args: &[S],
    registry: &mut CombinatorRegistry,
    importer: &mut dyn ExtensionImporter,
) -> Result<ResolvedRunbook, LoadError> {
    let loaded = RunbookLoader::new(registry)
        .with_importer(importer)
        .with_env(std::env::vars())
        .load(root, cli_args)?;
    loaded.resolve(loaded.variables())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
