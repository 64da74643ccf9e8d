//! One compile/load/run cycle
//!
//! Build the workspace source, load it, reconcile its declared table with
//! the parsed header, run the entry point into a staged output and commit
//! the output only once the entry point has returned. Any error before the
//! commit leaves the previous output untouched.

use std::io::BufWriter;

use serde::Serialize;

use crate::domain::ports::{BuildOutcome, ExecutionBackend, Host};
use crate::domain::services::reconcile;
use crate::error::{LividError, LividResult};
use crate::infrastructure::input::InputSource;
use crate::infrastructure::workspace::Workspace;

use super::session::{OutputSink, RowReader};

/// Outcome of a completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Entry point return value
    pub status: i32,
    pub rows_read: i64,
    pub rows_rendered: usize,
}

/// Runs cycles against one workspace and input
pub struct CycleRunner<'a> {
    backend: &'a dyn ExecutionBackend,
    workspace: &'a Workspace,
    input: &'a InputSource,
    max_rows: usize,
}

impl<'a> CycleRunner<'a> {
    pub fn new(
        backend: &'a dyn ExecutionBackend,
        workspace: &'a Workspace,
        input: &'a InputSource,
        max_rows: usize,
    ) -> Self {
        Self {
            backend,
            workspace,
            input,
            max_rows,
        }
    }

    pub fn run(&self) -> LividResult<CycleReport> {
        let paths = self.workspace.paths();

        let outcome = self.backend.build(paths)?;
        self.workspace.append_log(outcome.diagnostics())?;
        if let BuildOutcome::Failed { status, .. } = outcome {
            return Err(LividError::CompileFailed {
                compiler: self.backend.name().to_string(),
                status,
            });
        }

        // Dropped on every return path below, which unloads the artifact
        let mut program = self.backend.load(paths)?;

        let mut declared = program.declared_columns()?;
        let mut parsed = self.input.schema().clone();
        let mapping = reconcile(parsed.columns_mut(), &mut declared)?;
        program.bind(&declared);

        let mut reader = RowReader::new(
            self.input.open_rows()?,
            self.input.delimiter(),
            &declared,
            &mapping,
        );
        let staged = self
            .workspace
            .stage_output()
            .map_err(LividError::execution)?;
        let mut sink = OutputSink::new(BufWriter::new(staged), self.max_rows);

        let status = program.run(Host::new(&mut reader, &mut sink))?;
        drop(program);

        let rows_rendered = sink.rows_rendered();
        let staged = sink
            .into_inner()
            .into_inner()
            .map_err(|e| LividError::execution(format!("flushing output: {}", e.error())))?;
        self.workspace
            .commit_output(staged)
            .map_err(LividError::execution)?;

        let report = CycleReport {
            status,
            rows_read: reader.rows_read(),
            rows_rendered,
        };
        tracing::info!(
            backend = self.backend.name(),
            status = report.status,
            rows = report.rows_read,
            "cycle complete"
        );
        Ok(report)
    }
}
