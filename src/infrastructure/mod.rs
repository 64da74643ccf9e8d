//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `backend/` - Execution backends (native C toolchain, builtin)
//! - `editor/` - Editor collaborators (vim, no-op)
//! - `fs/` - Atomic writes and appends
//! - `input` - Input file and header handling
//! - `workspace` - Locked session directory

pub mod backend;
pub mod editor;
pub mod fs;
pub mod input;
pub mod workspace;

// Re-export for convenience
pub use backend::{create_backend, BuiltinBackend, NativeBackend};
pub use editor::{NoopEditor, VimEditor};
pub use input::InputSource;
pub use workspace::Workspace;
