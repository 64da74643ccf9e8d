//! Editor collaborators
//!
//! - `VimEditor` - vim with a remote server for refresh requests
//! - `NoopEditor` - headless sessions; never exits on its own

mod noop;
mod vim;

pub use noop::NoopEditor;
pub use vim::{bootstrap_script, VimEditor};
