//! Reload Use Case
//!
//! The live loop: generate the program source once, run a cycle, start the
//! editor, then rerun on every save until the editor exits.
//!
//! ## Architecture
//!
//! - `ReloadUseCase` - Main orchestrator
//! - `ReloadEvent` - Events emitted during the session
//! - `Signal` - What wakes the loop: a source change or editor exit
//!
//! ## Usage
//!
//! ```ignore
//! let mut use_case = ReloadUseCase::new(backend, workspace, input, ReloadOptions::default());
//! use_case.start(&mut editor, |event| { ... })?;
//! ```

mod event;
mod use_case;


pub use event::{ReloadEvent, ReloadOptions, ReloadState, Signal};
pub use use_case::ReloadUseCase;
