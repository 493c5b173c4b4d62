//! Shared test infrastructure for integration tests.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

/// A fixture descriptor plus a scratch directory for outputs.
pub struct TestFixture {
    pub descriptor: PathBuf,
    pub scratch: TempDir,
}

/// Captured result of one launch-gen run.
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl TestFixture {
    /// Load a fixture by name from tests/fixtures/{name}/launch.yml.
    pub fn load(name: &str) -> Self {
        let descriptor = manifest_dir()
            .join("tests/fixtures")
            .join(name)
            .join("launch.yml");
        assert!(descriptor.is_file(), "missing fixture {}", descriptor.display());
        Self {
            descriptor,
            scratch: TempDir::new().expect("create scratch dir"),
        }
    }

    /// Path inside the scratch directory.
    pub fn scratch_path(&self, rel: &str) -> PathBuf {
        self.scratch.path().join(rel)
    }

    /// Run launch-gen with `args` followed by the fixture descriptor.
    ///
    /// Deploy-env variables are cleared unless `env` sets them.
    pub fn run(&self, args: &[&str], env: &[(&str, &str)]) -> RunResult {
        run_launch_gen(args, Some(&self.descriptor), env)
    }
}

pub fn run_launch_gen(args: &[&str], descriptor: Option<&Path>, env: &[(&str, &str)]) -> RunResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_launch-gen"));
    command
        .args(args)
        .env_remove("DEPLOY_ENV")
        .env_remove("_DEPLOY_ENV")
        .env_remove("LAUNCH_GEN_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    if let Some(descriptor) = descriptor {
        command.arg(descriptor);
    }
    command.output().expect("spawn launch-gen").into()
}
