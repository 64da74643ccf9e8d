//! Reload event types and options

use std::path::PathBuf;

use crate::domain::services::DEFAULT_MAX_ROWS;

/// Reload options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadOptions {
    /// Grid row cap per cycle
    pub max_rows: usize,
    /// Register a file watcher on the workspace source
    pub watch_source: bool,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl ReloadOptions {
    pub fn new(max_rows: usize) -> Self {
        Self {
            max_rows,
            watch_source: true,
        }
    }

    /// Set whether the source is watched; signals can still be injected
    pub fn with_watch_source(mut self, watch_source: bool) -> Self {
        self.watch_source = watch_source;
        self
    }
}

/// Orchestrator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    Starting,
    Running,
    Done,
}

/// Input to the reload loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The program source was written
    SourceChanged(PathBuf),
    /// The editor process is gone
    EditorExited,
}

/// Reload event types for NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReloadEvent {
    /// Session started
    Started {
        workspace: String,
        input: String,
        backend: String,
    },
    /// Program stub written
    SourceGenerated { path: String },
    /// Existing program source reused
    SourceKept { path: String },
    /// Editor running
    EditorSpawned,
    /// Source change picked up
    SourceChanged { path: String },
    /// Cycle started
    CycleStarted,
    /// Cycle completed and output replaced
    CycleComplete {
        status: i32,
        rows_read: i64,
        rows_rendered: usize,
    },
    /// Cycle aborted; output left as it was
    CycleFailed { message: String },
    /// Editor asked to re-read its files
    EditorRefreshed,
    /// Session ended
    Shutdown,
}

impl ReloadEvent {
    /// Convert to JSON string with "command": "livid" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("livid"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
