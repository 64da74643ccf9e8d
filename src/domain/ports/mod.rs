//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod editor;
pub mod execution_backend;
pub mod host;

pub use editor::{Editor, EditorFiles, ExitNotifier};
pub use execution_backend::{BuildOutcome, ExecutionBackend, LoadedProgram};
pub use host::{ColumnSelect, Host, LoadReport, RowSink, RowSource};
