// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical path helpers

use std::path::{Component, Path, PathBuf};

/// Join `path` onto `base` and fold `.` and `..` components.
///
/// Does not touch the filesystem, so the result may not exist.
pub fn absolute(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let mut result = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component);
                }
            }
            other => result.push(other),
        }
    }
    result
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
