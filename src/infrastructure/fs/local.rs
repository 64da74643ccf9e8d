//! Local file writes

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{LividError, LividResult};

/// Replace `path` with `content` in one rename
pub fn write_atomic(path: &Path, content: &[u8]) -> LividResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| LividError::Io(e.error))?;
    Ok(())
}

/// Append `content` to `path`, creating it if needed
pub fn append(path: &Path, content: &[u8]) -> LividResult<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content)?;
    Ok(())
}
