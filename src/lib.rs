//! livid - edit-compile-run loop over delimited data
//!
//! The input header becomes a column declaration inside a user-editable C
//! program. Each save recompiles the program, loads it, reconciles its
//! declared columns with the parsed ones by name and runs it; the program
//! pulls rows through host callbacks and renders a bordered grid.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::cycle::{CycleReport, CycleRunner};
pub use application::reload::{ReloadEvent, ReloadOptions, ReloadState, ReloadUseCase, Signal};
pub use config::{BackendKind, LividConfig};
pub use domain::entities::{Column, Row, Schema, SchemaMapping};
pub use domain::value_objects::{ColumnType, Value};
pub use error::{LividError, LividResult};
