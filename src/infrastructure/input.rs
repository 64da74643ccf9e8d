//! Input source
//!
//! The header is read once when the source is opened. Every cycle then
//! reopens the file at the first data line, so a rerun always sees the
//! whole input. Standard input is spooled into the workspace first.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::domain::entities::Schema;
use crate::domain::services::{parse_header, read_header};
use crate::error::{LividError, LividResult};

#[derive(Debug, Clone)]
pub struct InputSource {
    path: PathBuf,
    delimiter: u8,
    data_offset: u64,
    schema: Schema,
}

impl InputSource {
    /// Open `path` and parse its header
    pub fn open(path: &Path, delimiter: u8) -> LividResult<Self> {
        let file = File::open(path).map_err(|source| LividError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let header = read_header(&mut reader)?;
        let schema = parse_header(&header, delimiter)?;

        tracing::info!(
            input = %path.display(),
            columns = schema.len(),
            "parsed input header"
        );
        Ok(Self {
            path: path.to_path_buf(),
            delimiter,
            data_offset: header.len() as u64,
            schema,
        })
    }

    /// Copy `reader` to `spool` and open the copy
    pub fn spool(reader: &mut impl Read, spool: &Path, delimiter: u8) -> LividResult<Self> {
        let mut file = File::create(spool).map_err(|source| LividError::InputOpen {
            path: spool.to_path_buf(),
            source,
        })?;
        let bytes = io::copy(reader, &mut file).map_err(|e| LividError::HeaderUnreadable {
            message: e.to_string(),
        })?;
        tracing::debug!(bytes, spool = %spool.display(), "spooled standard input");
        Self::open(spool, delimiter)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Reader positioned at the first data line
    pub fn open_rows(&self) -> LividResult<BufReader<File>> {
        let mut file = File::open(&self.path)
            .map_err(|e| LividError::execution(format!("reopening {}: {}", self.path.display(), e)))?;
        file.seek(SeekFrom::Start(self.data_offset))
            .map_err(|e| LividError::execution(format!("seeking {}: {}", self.path.display(), e)))?;
        Ok(BufReader::new(file))
    }
}
