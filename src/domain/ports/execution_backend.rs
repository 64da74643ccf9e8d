//! ExecutionBackend port - builds and loads the user's program
//!
//! A backend turns the workspace source into something runnable. The
//! loaded program lives for exactly one cycle: dropping it unloads it.

use crate::domain::entities::Column;
use crate::domain::value_objects::ArtifactPaths;
use crate::error::LividResult;

use super::Host;

/// Result of building the workspace source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Artifact is ready to load; diagnostics may still hold warnings
    Built { diagnostics: String },
    /// Build failed; nothing should be loaded this cycle
    Failed {
        status: Option<i32>,
        diagnostics: String,
    },
}

impl BuildOutcome {
    pub fn diagnostics(&self) -> &str {
        match self {
            BuildOutcome::Built { diagnostics } => diagnostics,
            BuildOutcome::Failed { diagnostics, .. } => diagnostics,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Built { .. })
    }
}

/// A program loaded for one cycle
pub trait LoadedProgram {
    /// Snapshot of the program's declared column table
    fn declared_columns(&self) -> LividResult<Vec<Column>>;

    /// Write reconciled indices back into the program's table
    fn bind(&mut self, declared: &[Column]);

    /// Run the entry point
    fn run(&mut self, host: Host<'_>) -> LividResult<i32>;
}

/// Builds and loads programs from a workspace
pub trait ExecutionBackend {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Compile the source; diagnostics go to the capture files
    fn build(&self, paths: &ArtifactPaths) -> LividResult<BuildOutcome>;

    /// Load the freshly built artifact
    fn load(&self, paths: &ArtifactPaths) -> LividResult<Box<dyn LoadedProgram>>;
}
