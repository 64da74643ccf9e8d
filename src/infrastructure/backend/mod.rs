//! Execution backends
//!
//! - `native` - C toolchain plus `libloading`
//! - `builtin` - in-process default program, no compiler needed

mod builtin;
mod ffi;
mod native;

pub use builtin::{BuiltinBackend, BuiltinProgram, BUILTIN_NAME};
pub use native::{NativeBackend, NativeProgram, COMPILER_FLAGS, LIVID_H};

use crate::config::{BackendKind, CompilerConfig};
use crate::domain::ports::ExecutionBackend;

/// Backend selected by configuration
pub fn create_backend(kind: BackendKind, compiler: &CompilerConfig) -> Box<dyn ExecutionBackend> {
    match kind {
        BackendKind::Native => Box::new(
            NativeBackend::new(compiler.program.clone())
                .with_extra_flags(compiler.extra_flags.clone()),
        ),
        BackendKind::Builtin => Box::new(BuiltinBackend::new()),
    }
}
