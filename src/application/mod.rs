//! Application Layer
//!
//! Use cases that orchestrate the session.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain parsing or rendering rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ReloadUseCase` - Watch the source, rerun on save, follow the editor
//! - `CycleRunner` - One build/load/reconcile/run pass
//!
//! ## Services
//!
//! - `codegen` - Writes the initial program source
//! - `session` - Row reader and output sink behind the host callbacks

pub mod codegen;
pub mod cycle;
pub mod reload;
pub mod session;

pub use codegen::{ensure_source, generate_source, SourceStatus};
pub use cycle::{CycleReport, CycleRunner};
pub use reload::{ReloadEvent, ReloadOptions, ReloadState, ReloadUseCase, Signal};
pub use session::{OutputSink, RowReader};
