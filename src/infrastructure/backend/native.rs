//! Native backend: C toolchain plus dynamic loading

use std::ffi::c_int;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use libloading::{Library, Symbol};

use crate::domain::entities::Column;
use crate::domain::ports::{BuildOutcome, ExecutionBackend, Host, LoadedProgram};
use crate::domain::value_objects::{ArtifactPaths, ARTIFACT_FILE, SOURCE_FILE};
use crate::error::{LividError, LividResult};
use crate::infrastructure::fs::write_atomic;

use super::ffi::{Bridge, RawApi, RawColumn};

/// Contents of the header written next to the source
pub const LIVID_H: &str = include_str!("livid.h");

/// Fixed compiler flags; extra flags from config are appended after these
pub const COMPILER_FLAGS: &[&str] = &[
    "-std=c11",
    "-Wall",
    "-Wextra",
    "-O0",
    "-g",
    "-fPIC",
    "-shared",
    "-I.",
];

const COLUMNS_SYMBOL: &[u8] = b"columns\0";
const COLUMNS_CNT_SYMBOL: &[u8] = b"columns_cnt\0";
const PROCESS_SYMBOL: &[u8] = b"process\0";
const API_SYMBOL: &[u8] = b"lv_api\0";

/// Upper bound on a sane declared table
const MAX_COLUMNS: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct NativeBackend {
    compiler: String,
    extra_flags: Vec<String>,
}

impl NativeBackend {
    pub fn new(compiler: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            extra_flags: Vec::new(),
        }
    }

    pub fn with_extra_flags(mut self, flags: Vec<String>) -> Self {
        self.extra_flags = flags;
        self
    }

    /// Arguments passed to the compiler, relative to the workspace
    pub fn compiler_args(&self) -> Vec<String> {
        COMPILER_FLAGS
            .iter()
            .map(|f| f.to_string())
            .chain(self.extra_flags.iter().cloned())
            .chain([
                "-o".to_string(),
                ARTIFACT_FILE.to_string(),
                SOURCE_FILE.to_string(),
            ])
            .collect()
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new("cc")
    }
}

impl ExecutionBackend for NativeBackend {
    fn name(&self) -> &str {
        &self.compiler
    }

    fn build(&self, paths: &ArtifactPaths) -> LividResult<BuildOutcome> {
        write_atomic(&paths.header, LIVID_H.as_bytes())?;

        let stdout = capture_file(&paths.compiler_stdout)?;
        let stderr = capture_file(&paths.compiler_stderr)?;
        let args = self.compiler_args();
        tracing::info!(compiler = %self.compiler, args = ?args, "compiling");

        let status = Command::new(&self.compiler)
            .args(&args)
            .current_dir(&paths.root)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|source| LividError::CompilerSpawn {
                program: self.compiler.clone(),
                source,
            })?;

        let mut diagnostics = fs::read_to_string(&paths.compiler_stdout).unwrap_or_default();
        diagnostics.push_str(&fs::read_to_string(&paths.compiler_stderr).unwrap_or_default());

        if status.success() {
            Ok(BuildOutcome::Built { diagnostics })
        } else {
            tracing::warn!(compiler = %self.compiler, status = ?status.code(), "compilation failed");
            Ok(BuildOutcome::Failed {
                status: status.code(),
                diagnostics,
            })
        }
    }

    fn load(&self, paths: &ArtifactPaths) -> LividResult<Box<dyn LoadedProgram>> {
        Ok(Box::new(NativeProgram::open(&paths.artifact)?))
    }
}

fn capture_file(path: &Path) -> LividResult<File> {
    File::create(path).map_err(|source| LividError::Workspace {
        path: path.to_path_buf(),
        source,
    })
}

/// A loaded shared object; dropping it unloads the library
pub struct NativeProgram {
    library: Library,
    path: PathBuf,
    declared: Vec<Column>,
}

impl NativeProgram {
    pub fn open(path: &Path) -> LividResult<Self> {
        let library = unsafe { Library::new(path) }.map_err(|e| LividError::ArtifactLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let program = Self {
            library,
            path: path.to_path_buf(),
            declared: Vec::new(),
        };
        // Resolve every required export up front so a missing one fails
        // before anything runs.
        program.symbol::<*mut *const RawApi>(API_SYMBOL)?;
        program.symbol::<unsafe extern "C" fn() -> c_int>(PROCESS_SYMBOL)?;
        program.table()?;

        tracing::debug!(artifact = %program.path.display(), "artifact loaded");
        Ok(program)
    }

    fn symbol<T>(&self, name: &[u8]) -> LividResult<Symbol<'_, T>> {
        unsafe { self.library.get::<T>(name) }.map_err(|e| LividError::MissingExport {
            symbol: String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name)).into_owned(),
            message: e.to_string(),
        })
    }

    /// The declared column table as a mutable slice
    #[allow(clippy::mut_from_ref)]
    fn table(&self) -> LividResult<&mut [RawColumn]> {
        let columns = self.symbol::<*mut RawColumn>(COLUMNS_SYMBOL)?;
        let count = self.symbol::<*const usize>(COLUMNS_CNT_SYMBOL)?;
        let (columns, count) = unsafe { (*columns, **count) };
        if columns.is_null() || count > MAX_COLUMNS {
            return Err(LividError::MalformedColumn {
                index: 0,
                message: format!("implausible column table ({} entries)", count),
            });
        }
        Ok(unsafe { std::slice::from_raw_parts_mut(columns, count) })
    }
}

impl LoadedProgram for NativeProgram {
    fn declared_columns(&self) -> LividResult<Vec<Column>> {
        self.table()?
            .iter()
            .enumerate()
            .map(|(i, raw)| unsafe { raw.to_column(i) })
            .collect()
    }

    fn bind(&mut self, declared: &[Column]) {
        if let Ok(table) = self.table() {
            for (raw, column) in table.iter_mut().zip(declared) {
                raw.index = column
                    .reconciled()
                    .and_then(|i| i64::try_from(i).ok())
                    .unwrap_or(-1);
            }
        }
        self.declared = declared.to_vec();
    }

    fn run(&mut self, host: Host<'_>) -> LividResult<i32> {
        let process = self.symbol::<unsafe extern "C" fn() -> c_int>(PROCESS_SYMBOL)?;
        let slot = self.symbol::<*mut *const RawApi>(API_SYMBOL)?;
        let slot: *mut *const RawApi = *slot;

        let mut bridge = Bridge::new(host, self.declared.clone());
        let api = Bridge::api(&mut bridge);
        let status = unsafe {
            *slot = &api;
            let status = process();
            *slot = std::ptr::null();
            status
        };

        match bridge.take_error() {
            Some(err) => Err(err),
            None => Ok(status),
        }
    }
}

impl Drop for NativeProgram {
    fn drop(&mut self) {
        tracing::debug!(artifact = %self.path.display(), "unloading artifact");
    }
}
