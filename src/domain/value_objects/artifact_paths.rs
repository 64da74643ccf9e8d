//! Workspace artifact layout
//!
//! Every file a session reads or writes lives directly in the workspace
//! directory under a fixed name.

use std::path::{Path, PathBuf};

pub const SOURCE_FILE: &str = "script.c";
pub const HEADER_FILE: &str = "livid.h";
pub const OUTPUT_FILE: &str = "output";
pub const LOG_FILE: &str = "log";
pub const ARTIFACT_FILE: &str = "liblividscript.so";
pub const COMPILER_STDOUT_FILE: &str = "cc.stdout";
pub const COMPILER_STDERR_FILE: &str = "cc.stderr";
pub const EDITOR_SCRIPT_FILE: &str = "vimrc";
pub const SPOOLED_INPUT_FILE: &str = "input";
pub const LOCK_FILE: &str = ".livid.lock";
pub const CONFIG_FILE: &str = "livid.toml";

/// Paths of all workspace artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub root: PathBuf,
    /// User-editable program source (generated once)
    pub source: PathBuf,
    /// Host contract header included by the source
    pub header: PathBuf,
    /// Rendered output, rewritten by each successful cycle
    pub output: PathBuf,
    /// Diagnostics, appended across all cycles
    pub log: PathBuf,
    /// Compiled shared object
    pub artifact: PathBuf,
    pub compiler_stdout: PathBuf,
    pub compiler_stderr: PathBuf,
    pub editor_script: PathBuf,
    pub spooled_input: PathBuf,
    pub lock: PathBuf,
    pub config: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            source: root.join(SOURCE_FILE),
            header: root.join(HEADER_FILE),
            output: root.join(OUTPUT_FILE),
            log: root.join(LOG_FILE),
            artifact: root.join(ARTIFACT_FILE),
            compiler_stdout: root.join(COMPILER_STDOUT_FILE),
            compiler_stderr: root.join(COMPILER_STDERR_FILE),
            editor_script: root.join(EDITOR_SCRIPT_FILE),
            spooled_input: root.join(SPOOLED_INPUT_FILE),
            lock: root.join(LOCK_FILE),
            config: root.join(CONFIG_FILE),
        }
    }

    /// Whether `path` names the user-editable source
    pub fn is_source(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name == SOURCE_FILE)
            .unwrap_or(false)
    }
}
