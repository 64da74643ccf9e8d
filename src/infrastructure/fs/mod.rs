//! File system helpers
//!
//! Whole-file writes go through a temp file in the same directory and a
//! rename, so readers (the editor in particular) never see a half-written
//! file.

mod local;

pub use local::{append, write_atomic};
