//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::services::DEFAULT_MAX_ROWS;
use crate::error::LividResult;

use super::loader::{self, ConfigWarning};

/// Which execution backend runs the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Compile with the C toolchain and load the shared object
    #[default]
    Native,
    /// Run the default program body in process
    Builtin,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(BackendKind::Native),
            "builtin" => Ok(BackendKind::Builtin),
            other => Err(format!("unknown backend '{}' (expected native or builtin)", other)),
        }
    }
}

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_compiler")]
    pub program: String,

    /// Appended after the fixed flags
    #[serde(default)]
    pub extra_flags: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_compiler(),
            extra_flags: Vec::new(),
        }
    }
}

fn default_compiler() -> String {
    "cc".to_string()
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_editor")]
    pub program: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Remote server name; defaults to `livid-<pid>`
    #[serde(default)]
    pub server_name: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            program: default_editor(),
            enabled: true,
            server_name: None,
        }
    }
}

fn default_editor() -> String {
    "vim".to_string()
}

fn default_true() -> bool {
    true
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LividConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub grid: GridConfig,
}

impl Default for LividConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            backend: BackendKind::default(),
            compiler: CompilerConfig::default(),
            editor: EditorConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl LividConfig {
    /// Load a single configuration file
    pub fn load(path: &Path) -> LividResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load a single file and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> LividResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Defaults, then user config, then workspace config, then environment
    pub fn load_layered(workspace: Option<&Path>) -> LividResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(loader::user_config_path().as_deref(), workspace)
    }

    /// Apply environment variable overrides (LIVID_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
