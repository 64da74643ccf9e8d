//! Test environment builder for isolated livid runs.
//!
//! Provides `TestEnv` - a temp directory holding the input files, a
//! workspace directory and a private HOME/TMPDIR, plus helpers to run the
//! livid binary against them.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Result of running the livid binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Isolated test environment
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for dir in ["wk", "home", "tmp"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Workspace directory passed with `-w`
    pub fn workspace(&self) -> PathBuf {
        self.path("wk")
    }

    /// File inside the workspace
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.workspace().join(name)
    }

    pub fn read_artifact(&self, name: &str) -> String {
        fs::read_to_string(self.artifact(name)).unwrap()
    }

    pub fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Command for the livid binary with config and temp dirs isolated
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_livid"));
        cmd.current_dir(self.root.path())
            .env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("home/.config"))
            .env("TMPDIR", self.path("tmp"))
            .env_remove("LIVID_LOG");
        for var in ["LIVID_CC", "LIVID_EDITOR", "LIVID_MAX_ROWS", "LIVID_DELIMITER", "LIVID_BACKEND"] {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_stdin(args, "")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> TestResult {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start livid");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap().into()
    }

    /// `--once -w <workspace>` plus `args`
    pub fn run_once(&self, args: &[&str]) -> TestResult {
        let workspace = self.workspace();
        let mut full = vec!["--once", "-w", workspace.to_str().unwrap()];
        full.extend_from_slice(args);
        self.run(&full)
    }
}

/// Whether a working C compiler is on PATH
pub fn have_cc() -> bool {
    Command::new("cc")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
