//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod artifact_paths;
mod cell;
mod column_type;

pub use artifact_paths::{
    ArtifactPaths, ARTIFACT_FILE, COMPILER_STDERR_FILE, COMPILER_STDOUT_FILE, CONFIG_FILE,
    EDITOR_SCRIPT_FILE, HEADER_FILE, LOCK_FILE, LOG_FILE, OUTPUT_FILE, SOURCE_FILE,
    SPOOLED_INPUT_FILE,
};
pub use cell::{Cell, TextSpan, Value};
pub use column_type::ColumnType;
