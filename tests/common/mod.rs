//! Shared helpers for curlgen integration tests
//!
//! Every binary run gets its own empty config directory so a developer's
//! `config.toml` never leaks into the results.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

/// Captured output of one curlgen run
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

/// Config directory, extra variables and stdin for a run
pub struct MockEnvironment {
    config_dir: TempDir,
    vars: Vec<(String, String)>,
    stdin: Option<Vec<u8>>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().expect("Failed to create config dir"),
            vars: Vec::new(),
            stdin: None,
        }
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.vars.push((key.to_string(), value.to_string()));
        self
    }

    pub fn set_stdin(&mut self, content: Vec<u8>) -> &mut Self {
        self.stdin = Some(content);
        self
    }

    /// Write `config.toml` for this run
    pub fn write_config(&mut self, toml: &str) -> &mut Self {
        std::fs::write(self.config_path().join("config.toml"), toml)
            .expect("Failed to write config.toml");
        self
    }

    pub fn config_path(&self) -> &Path {
        self.config_dir.path()
    }
}

/// Run curlgen with `args` in a fresh environment
pub fn curlgen(args: &[&str]) -> CliResponse {
    curlgen_with_env(args, &MockEnvironment::new())
}

pub fn curlgen_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_curlgen"));
    cmd.args(args)
        .env("CURLGEN_CONFIG_DIR", env.config_path())
        .env_remove("CURLGEN_LOG")
        .envs(env.vars.iter().map(|(k, v)| (k, v)))
        .stdin(if env.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to spawn curlgen");
    if let Some(input) = &env.stdin {
        let mut stdin = child.stdin.take().expect("stdin was not piped");
        stdin.write_all(input).expect("Failed to write stdin");
    }
    let output = child.wait_with_output().expect("Failed to wait for curlgen");

    let exit_code = output.status.code().unwrap_or(-1);
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_status: if exit_code == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        },
        exit_code,
    }
}

/// Write `content` to `dir/name` and return the path
pub fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}

/// Files under `tests/fixtures`
pub mod fixtures {
    use once_cell::sync::Lazy;
    use std::path::PathBuf;

    pub static FIXTURES_DIR: Lazy<PathBuf> =
        Lazy::new(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"));

    pub fn fixture_path(name: &str) -> PathBuf {
        FIXTURES_DIR.join(name)
    }

    pub fn read(name: &str) -> String {
        std::fs::read_to_string(fixture_path(name))
            .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
    }
}
