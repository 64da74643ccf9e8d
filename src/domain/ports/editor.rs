//! Editor port - the external editor collaborator
//!
//! The editor runs as its own process. The host can ask it to re-read
//! files and learns about its exit through the callback given to `spawn`.

use std::path::PathBuf;

use crate::domain::value_objects::ArtifactPaths;
use crate::error::LividResult;

/// Called once, from another thread, when the editor process exits
pub type ExitNotifier = Box<dyn FnOnce() + Send + 'static>;

/// Files the editor should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFiles {
    pub root: PathBuf,
    pub source: PathBuf,
    pub output: PathBuf,
    pub log: PathBuf,
    pub script: PathBuf,
}

impl From<&ArtifactPaths> for EditorFiles {
    fn from(paths: &ArtifactPaths) -> Self {
        Self {
            root: paths.root.clone(),
            source: paths.source.clone(),
            output: paths.output.clone(),
            log: paths.log.clone(),
            script: paths.editor_script.clone(),
        }
    }
}

/// Managed editor process
pub trait Editor {
    /// Start the editor; `on_exit` fires when it terminates
    fn spawn(&mut self, files: &EditorFiles, on_exit: ExitNotifier) -> LividResult<()>;

    /// Best-effort request to re-read changed files; never blocks
    fn notify_refresh(&self);

    /// Block until the editor process has been reaped
    fn wait_for_exit(&mut self) -> LividResult<()>;
}
