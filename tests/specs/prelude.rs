//! Shared helpers for CLI specs
//!
//! A `Project` is a temporary directory of runbook files; `sweep()` runs the
//! binary inside it with a clean `SWEEP_*` environment.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A runbook with no variables, parents, or combinator
pub const MINIMAL_RUNBOOK: &str = "name: minimal\n";

/// A runbook sweeping two variables over a grid
pub const GRID_RUNBOOK: &str = r#"
name: matrix
variable:
  - name: location
    value: westus
image: $(os)
size: $(size)
combinator:
  type: grid
  items:
    - name: os
      value: [ubuntu, debian]
    - name: size
      value: [small, large, xlarge]
"#;

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn sweep(&self) -> Sweep {
        let mut cmd = Command::cargo_bin("sweep").unwrap();
        cmd.current_dir(self.dir.path());
        for (key, _) in std::env::vars() {
            if key.starts_with("SWEEP_") || key.starts_with("S_SWEEP_") || key == "RUST_LOG" {
                cmd.env_remove(key);
            }
        }
        Sweep { cmd }
    }
}

pub struct Sweep {
    cmd: Command,
}

impl Sweep {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require a zero exit code.
    pub fn passes(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let run = RunOutput::from(output);
        assert!(
            run.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout,
            run.stderr
        );
        run
    }

    /// Run and require a non-zero exit code.
    pub fn fails(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let run = RunOutput::from(output);
        assert!(
            !run.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout,
            run.stderr
        );
        run
    }
}

pub struct RunOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for RunOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunOutput {
    pub fn stdout(&self) -> String {
        self.stdout.clone()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stderr.contains(needle),
            "stderr unexpectedly has {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }
}
