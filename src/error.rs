//! Error types for livid
//!
//! Uses `thiserror` for library errors. Variants are grouped by how the
//! reload loop treats them: fatal errors end the process, cycle errors abort
//! one compile/run cycle and leave the loop running.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::ColumnType;

/// Result type alias for livid operations
pub type LividResult<T> = Result<T, LividError>;

/// Main error type for livid operations
#[derive(Error, Debug)]
pub enum LividError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A workspace file or directory could not be created or opened
    #[error("workspace error at {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another session holds the workspace lock
    #[error("workspace {path} is already in use by another livid session")]
    WorkspaceLocked { path: PathBuf },

    /// Input file could not be opened
    #[error("unable to open input {path}: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header line could not be read
    #[error("unable to read header: {message}")]
    HeaderUnreadable { message: String },

    /// Header line was empty
    #[error("header line is empty")]
    EmptyHeader,

    /// Header line contains an embedded NUL byte
    #[error("header has a null byte at offset {offset}")]
    HeaderContainsNul { offset: usize },

    /// Delimiter is not a single byte
    #[error("delimiter must be 1 character, got '{value}'")]
    InvalidDelimiter { value: String },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// External compiler exited with a failure status
    #[error("compilation failed ({compiler} exited with {})", describe_status(.status))]
    CompileFailed {
        compiler: String,
        status: Option<i32>,
    },

    /// External compiler could not be started
    #[error("unable to run compiler '{program}': {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Compiled artifact could not be loaded
    #[error("unable to load {path}: {message}")]
    ArtifactLoad { path: PathBuf, message: String },

    /// Loaded artifact lacks a required export
    #[error("unable to load '{symbol}' symbol: {message}")]
    MissingExport { symbol: String, message: String },

    /// Declared column table holds an entry the host cannot interpret
    #[error("declared column #{index} is malformed: {message}")]
    MalformedColumn { index: usize, message: String },

    /// The artifact redeclared `_index` with a non-integer type
    #[error("column '_index' must be declared Integer, found {found}")]
    IndexColumnType { found: ColumnType },

    /// Failure while the entry point was running
    #[error("execution failed: {message}")]
    Execution { message: String },

    /// File watcher could not be set up
    #[error("unable to watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// Editor process could not be started
    #[error("unable to start editor '{program}': {source}")]
    EditorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl LividError {
    /// Whether this error aborts only the current cycle.
    ///
    /// Everything else is fatal to the session.
    pub fn is_cycle_recoverable(&self) -> bool {
        matches!(
            self,
            LividError::CompileFailed { .. }
                | LividError::CompilerSpawn { .. }
                | LividError::ArtifactLoad { .. }
                | LividError::MissingExport { .. }
                | LividError::MalformedColumn { .. }
                | LividError::IndexColumnType { .. }
                | LividError::Execution { .. }
        )
    }

    pub(crate) fn execution(err: impl std::fmt::Display) -> Self {
        LividError::Execution {
            message: err.to_string(),
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "a signal".to_string(),
    }
}
