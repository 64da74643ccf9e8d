//! Reload Use Case implementation

use std::sync::mpsc::{channel, Receiver, Sender};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::codegen::{ensure_source, SourceStatus};
use crate::application::cycle::{CycleReport, CycleRunner};
use crate::domain::ports::{Editor, EditorFiles, ExecutionBackend};
use crate::domain::value_objects::ArtifactPaths;
use crate::error::{LividError, LividResult};
use crate::infrastructure::input::InputSource;
use crate::infrastructure::workspace::Workspace;

use super::event::{ReloadEvent, ReloadOptions, ReloadState, Signal};

/// Reload Use Case
///
/// Owns the session: workspace, parsed input and backend. Drives the
/// `Starting -> Running -> Done` lifecycle from a single thread blocked on
/// one signal channel.
pub struct ReloadUseCase {
    backend: Box<dyn ExecutionBackend>,
    workspace: Workspace,
    input: InputSource,
    options: ReloadOptions,
    state: ReloadState,
    tx: Sender<Signal>,
    rx: Receiver<Signal>,
}

impl ReloadUseCase {
    pub fn new(
        backend: Box<dyn ExecutionBackend>,
        workspace: Workspace,
        input: InputSource,
        options: ReloadOptions,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            backend,
            workspace,
            input,
            options,
            state: ReloadState::Starting,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> ReloadState {
        self.state
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Sender feeding the reload loop
    pub fn signals(&self) -> Sender<Signal> {
        self.tx.clone()
    }

    /// Generate the source if needed and run a single cycle
    ///
    /// Cycle errors are returned rather than reported.
    pub fn run_once<F>(&mut self, on_event: F) -> LividResult<CycleReport>
    where
        F: Fn(ReloadEvent),
    {
        self.prepare(&on_event)?;
        on_event(ReloadEvent::CycleStarted);
        let report = self.runner().run()?;
        on_event(cycle_complete(&report));
        self.state = ReloadState::Done;
        Ok(report)
    }

    /// Run until the editor exits (blocking)
    pub fn start<F>(&mut self, editor: &mut dyn Editor, on_event: F) -> LividResult<()>
    where
        F: Fn(ReloadEvent),
    {
        self.prepare(&on_event)?;
        self.cycle(&on_event)?;

        let _watcher = if self.options.watch_source {
            Some(self.watch_source()?)
        } else {
            None
        };

        let notifier = self.tx.clone();
        editor.spawn(
            &EditorFiles::from(self.workspace.paths()),
            Box::new(move || {
                let _ = notifier.send(Signal::EditorExited);
            }),
        )?;
        on_event(ReloadEvent::EditorSpawned);
        self.state = ReloadState::Running;

        while self.state == ReloadState::Running {
            // `self.tx` keeps the channel open
            let Ok(first) = self.rx.recv() else {
                break;
            };

            let mut changed = None;
            let mut exited = false;
            for signal in std::iter::once(first).chain(self.rx.try_iter()) {
                match signal {
                    Signal::SourceChanged(path) => changed = Some(path),
                    Signal::EditorExited => exited = true,
                }
            }

            if let Some(path) = changed {
                tracing::info!(path = %path.display(), "source changed");
                on_event(ReloadEvent::SourceChanged {
                    path: path.display().to_string(),
                });
                self.cycle(&on_event)?;
                editor.notify_refresh();
                on_event(ReloadEvent::EditorRefreshed);
            }

            if exited {
                tracing::info!("editor exited");
                self.state = ReloadState::Done;
            }
        }

        self.state = ReloadState::Done;
        editor.wait_for_exit()?;
        on_event(ReloadEvent::Shutdown);
        Ok(())
    }

    fn runner(&self) -> CycleRunner<'_> {
        CycleRunner::new(
            self.backend.as_ref(),
            &self.workspace,
            &self.input,
            self.options.max_rows,
        )
    }

    fn prepare(&self, on_event: &impl Fn(ReloadEvent)) -> LividResult<()> {
        let paths = self.workspace.paths();
        on_event(ReloadEvent::Started {
            workspace: paths.root.display().to_string(),
            input: self.input.path().display().to_string(),
            backend: self.backend.name().to_string(),
        });

        let path = paths.source.display().to_string();
        match ensure_source(paths, self.input.schema())? {
            SourceStatus::Generated => on_event(ReloadEvent::SourceGenerated { path }),
            SourceStatus::Kept => on_event(ReloadEvent::SourceKept { path }),
        }
        Ok(())
    }

    /// Run one cycle; only fatal errors escape
    fn cycle(&self, on_event: &impl Fn(ReloadEvent)) -> LividResult<()> {
        on_event(ReloadEvent::CycleStarted);
        match self.runner().run() {
            Ok(report) => on_event(cycle_complete(&report)),
            Err(e) if e.is_cycle_recoverable() => {
                tracing::error!(error = %e, "cycle failed");
                on_event(ReloadEvent::CycleFailed {
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn watch_source(&self) -> LividResult<RecommendedWatcher> {
        let paths = self.workspace.paths().clone();
        let root = paths.root.clone();
        let tx = self.tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => forward_source_changes(&paths, event, &tx),
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            },
            Config::default(),
        )
        .map_err(|e| watch_error(&root, e))?;

        watcher
            .watch(&root, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(&root, e))?;
        tracing::debug!(root = %root.display(), "watching workspace");
        Ok(watcher)
    }
}

pub(super) fn forward_source_changes(paths: &ArtifactPaths, event: Event, tx: &Sender<Signal>) {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }
    for path in event.paths.into_iter().filter(|p| paths.is_source(p)) {
        let _ = tx.send(Signal::SourceChanged(path));
    }
}

fn watch_error(root: &std::path::Path, err: notify::Error) -> LividError {
    LividError::Watch {
        path: root.to_path_buf(),
        message: err.to_string(),
    }
}

fn cycle_complete(report: &CycleReport) -> ReloadEvent {
    ReloadEvent::CycleComplete {
        status: report.status,
        rows_read: report.rows_read,
        rows_rendered: report.rows_rendered,
    }
}
