//! Headless editor

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::ports::{Editor, EditorFiles, ExitNotifier};
use crate::error::LividResult;

/// Editor stand-in for headless sessions
///
/// The exit notifier is dropped unused, so the reload loop only ends when
/// the process is interrupted.
#[derive(Debug, Default)]
pub struct NoopEditor {
    refreshes: AtomicUsize,
}

impl NoopEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh requests received so far
    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::Relaxed)
    }
}

impl Editor for NoopEditor {
    fn spawn(&mut self, files: &EditorFiles, _on_exit: ExitNotifier) -> LividResult<()> {
        tracing::info!(output = %files.output.display(), "running without an editor");
        Ok(())
    }

    fn notify_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    fn wait_for_exit(&mut self) -> LividResult<()> {
        Ok(())
    }
}
