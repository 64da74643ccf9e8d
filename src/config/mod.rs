//! Configuration module for livid
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LIVID_*)
//! 3. Workspace config (`<workspace>/livid.toml`)
//! 4. User config (`<config dir>/livid/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning};
pub use types::{BackendKind, CompilerConfig, EditorConfig, GridConfig, LividConfig};
