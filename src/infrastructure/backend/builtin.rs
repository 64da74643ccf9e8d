//! Builtin backend: no compiler
//!
//! "Building" reads the `COLUMN_LIST` declaration out of the source; the
//! program body is always the default iterate-and-grid loop, run in
//! process. Edits to column types, visibility and widths take effect; edits
//! to the body do not.

use std::fs;

use crate::domain::entities::{Column, Row};
use crate::domain::ports::{BuildOutcome, ColumnSelect, ExecutionBackend, Host, LoadedProgram};
use crate::domain::services::parse_column_list;
use crate::domain::value_objects::{ArtifactPaths, SOURCE_FILE};
use crate::error::{LividError, LividResult};

pub const BUILTIN_NAME: &str = "builtin";

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinBackend;

impl BuiltinBackend {
    pub fn new() -> Self {
        Self
    }

    fn read_declaration(paths: &ArtifactPaths) -> Result<Vec<Column>, String> {
        let source = fs::read_to_string(&paths.source)
            .map_err(|e| format!("{}: error: {}", SOURCE_FILE, e))?;
        parse_column_list(&source).map_err(|e| e.diagnostic(SOURCE_FILE))
    }
}

impl ExecutionBackend for BuiltinBackend {
    fn name(&self) -> &str {
        BUILTIN_NAME
    }

    fn build(&self, paths: &ArtifactPaths) -> LividResult<BuildOutcome> {
        match Self::read_declaration(paths) {
            Ok(columns) => {
                tracing::debug!(columns = columns.len(), "declaration read");
                Ok(BuildOutcome::Built {
                    diagnostics: String::new(),
                })
            }
            Err(diagnostics) => Ok(BuildOutcome::Failed {
                status: Some(1),
                diagnostics,
            }),
        }
    }

    fn load(&self, paths: &ArtifactPaths) -> LividResult<Box<dyn LoadedProgram>> {
        let declared = Self::read_declaration(paths).map_err(|message| LividError::ArtifactLoad {
            path: paths.source.clone(),
            message,
        })?;
        Ok(Box::new(BuiltinProgram { declared }))
    }
}

/// The default program body over a declared table
#[derive(Debug, Clone)]
pub struct BuiltinProgram {
    declared: Vec<Column>,
}

impl BuiltinProgram {
    pub fn new(declared: Vec<Column>) -> Self {
        Self { declared }
    }
}

impl LoadedProgram for BuiltinProgram {
    fn declared_columns(&self) -> LividResult<Vec<Column>> {
        Ok(self.declared.clone())
    }

    fn bind(&mut self, declared: &[Column]) {
        self.declared = declared.to_vec();
    }

    fn run(&mut self, host: Host<'_>) -> LividResult<i32> {
        let Host { rows, out } = host;
        let mut row = Row::for_columns(&self.declared);
        while rows.advance()? {
            rows.load(&mut row, ColumnSelect::All)?;
            let values = row.values(rows.line());
            out.render_grid(&mut self.declared, &values, row.valid())?;
        }
        Ok(0)
    }
}
