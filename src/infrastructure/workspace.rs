//! Session workspace
//!
//! A directory holding every artifact of one session. The workspace is
//! locked for as long as the [`Workspace`] value lives, so two sessions
//! never compile into the same directory.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::value_objects::ArtifactPaths;
use crate::error::{LividError, LividResult};

use super::fs::append;

const TEMP_PREFIX: &str = "livid-wkspace-";

#[derive(Debug)]
pub struct Workspace {
    paths: ArtifactPaths,
    lock: File,
}

impl Workspace {
    /// Create a fresh `livid-wkspace-XXXXXX` directory under the temp dir
    ///
    /// The directory is left in place when the session ends.
    pub fn create_temp() -> LividResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir()
            .map_err(|source| LividError::Workspace {
                path: std::env::temp_dir(),
                source,
            })?;
        Self::open(&dir.keep())
    }

    /// Open an existing directory as the workspace
    pub fn open(root: &Path) -> LividResult<Self> {
        if !root.is_dir() {
            return Err(LividError::Workspace {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let paths = ArtifactPaths::in_dir(root);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&paths.lock)
            .map_err(|source| workspace_error(&paths.lock, source))?;
        lock.try_lock_exclusive()
            .map_err(|_| LividError::WorkspaceLocked {
                path: root.to_path_buf(),
            })?;

        for path in [&paths.output, &paths.log] {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| workspace_error(path, source))?;
        }

        tracing::debug!(root = %root.display(), "workspace opened");
        Ok(Self { paths, lock })
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    /// Open the log for appending
    pub fn log_writer(&self) -> LividResult<File> {
        OpenOptions::new()
            .append(true)
            .open(&self.paths.log)
            .map_err(|source| workspace_error(&self.paths.log, source))
    }

    /// Append raw text, compiler diagnostics for instance, to the log
    pub fn append_log(&self, text: &str) -> LividResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let mut content = text.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        append(&self.paths.log, content.as_bytes())
    }

    /// Temp file that will replace the output on commit
    pub fn stage_output(&self) -> LividResult<NamedTempFile> {
        tempfile::Builder::new()
            .prefix(".output-")
            .tempfile_in(&self.paths.root)
            .map_err(|source| workspace_error(&self.paths.root, source))
    }

    /// Rename a staged file over the output
    pub fn commit_output(&self, staged: NamedTempFile) -> LividResult<()> {
        staged
            .persist(&self.paths.output)
            .map_err(|e| workspace_error(&self.paths.output, e.error))?;
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock);
    }
}

fn workspace_error(path: &Path, source: io::Error) -> LividError {
    LividError::Workspace {
        path: PathBuf::from(path),
        source,
    }
}
