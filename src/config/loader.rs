//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::CONFIG_FILE;
use crate::error::{LividError, LividResult};

use super::types::{BackendKind, LividConfig};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> LividResult<(LividConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    let (config, warnings) = parse_with_warnings(&content, path)?;
    Ok((config, warnings))
}

fn parse_with_warnings(content: &str, path: &Path) -> LividResult<(LividConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: LividConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| LividError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Layer user config and workspace config over the defaults
///
/// Later files override earlier ones key by key; a missing file is skipped.
/// Environment overrides are applied last.
pub fn load_layered(
    user_config: Option<&Path>,
    workspace: Option<&Path>,
) -> LividResult<(LividConfig, Vec<ConfigWarning>)> {
    let workspace_config = workspace.map(|root| root.join(CONFIG_FILE));
    let files = user_config
        .map(Path::to_path_buf)
        .into_iter()
        .chain(workspace_config);

    let mut merged = toml::Value::Table(toml::map::Map::new());
    let mut warnings = Vec::new();

    for file in files {
        if !file.is_file() {
            continue;
        }
        let content = fs::read_to_string(&file)?;
        let (_, file_warnings) = parse_with_warnings(&content, &file)?;
        warnings.extend(file_warnings);

        let layer: toml::Value = toml::from_str(&content).map_err(|e| LividError::Config {
            file: file.clone(),
            message: e.to_string(),
        })?;
        merge(&mut merged, layer);
        tracing::debug!(file = %file.display(), "config layer loaded");
    }

    let config: LividConfig = merged.try_into().map_err(|e: toml::de::Error| LividError::Config {
        file: workspace
            .map(|root| root.join(CONFIG_FILE))
            .unwrap_or_default(),
        message: e.to_string(),
    })?;

    Ok((with_env_overrides(config), warnings))
}

/// Deep-merge `overlay` into `base`; tables merge, everything else replaces
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// `<config dir>/livid/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("livid").join("config.toml"))
}

/// Apply environment variable overrides (LIVID_* prefix)
pub fn with_env_overrides(config: LividConfig) -> LividConfig {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

fn with_overrides_from(mut config: LividConfig, var: impl Fn(&str) -> Option<String>) -> LividConfig {
    // LIVID_CC
    if let Some(cc) = var("LIVID_CC").filter(|v| !v.is_empty()) {
        config.compiler.program = cc;
    }

    // LIVID_EDITOR
    if let Some(editor) = var("LIVID_EDITOR").filter(|v| !v.is_empty()) {
        config.editor.program = editor;
    }

    // LIVID_MAX_ROWS
    if let Some(rows) = var("LIVID_MAX_ROWS") {
        match rows.trim().parse() {
            Ok(max_rows) => config.grid.max_rows = max_rows,
            Err(_) => tracing::warn!(value = %rows, "ignoring invalid LIVID_MAX_ROWS"),
        }
    }

    // LIVID_DELIMITER
    if let Some(delimiter) = var("LIVID_DELIMITER").filter(|v| !v.is_empty()) {
        config.delimiter = delimiter;
    }

    // LIVID_BACKEND
    if let Some(backend) = var("LIVID_BACKEND") {
        match backend.parse::<BackendKind>() {
            Ok(kind) => config.backend = kind,
            Err(message) => tracing::warn!(%message, "ignoring LIVID_BACKEND"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "delimiter",
        "backend",
        "compiler",
        "program",
        "extra_flags",
        "editor",
        "enabled",
        "server_name",
        "grid",
        "max_rows",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(super) fn overrides_for_test(config: LividConfig, vars: &[(&str, &str)]) -> LividConfig {
    with_overrides_from(config, |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}
