//! Schema parser
//!
//! Turns the input header line into the parsed column list. Any failure
//! here is fatal to the session.

use std::io::BufRead;

use crate::domain::entities::Schema;
use crate::error::{LividError, LividResult};

/// Validate a delimiter string from the CLI or config
pub fn parse_delimiter(value: &str) -> LividResult<u8> {
    match value.as_bytes() {
        [byte] if *byte != b'\n' && *byte != 0 => Ok(*byte),
        _ => Err(LividError::InvalidDelimiter {
            value: value.to_string(),
        }),
    }
}

/// Read the raw header line, terminator included
pub fn read_header(reader: &mut impl BufRead) -> LividResult<Vec<u8>> {
    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .map_err(|e| LividError::HeaderUnreadable {
            message: e.to_string(),
        })?;
    Ok(header)
}

/// Split a header line into the parsed schema
///
/// `_index` is always column 0. Empty fields are kept so header positions
/// line up with data fields.
pub fn parse_header(header: &[u8], delimiter: u8) -> LividResult<Schema> {
    if let Some(offset) = header.iter().position(|&b| b == 0) {
        return Err(LividError::HeaderContainsNul { offset });
    }

    let line = strip_terminator(header);
    if line.is_empty() {
        return Err(LividError::EmptyHeader);
    }

    let names = line
        .split(|&b| b == delimiter)
        .map(|field| String::from_utf8_lossy(field).into_owned());
    let schema = Schema::from_names(names);

    for (index, column) in schema.columns().iter().enumerate() {
        tracing::debug!(index, name = column.name(), "parsed field");
    }

    Ok(schema)
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
