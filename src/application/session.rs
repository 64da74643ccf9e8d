//! Per-cycle session state
//!
//! [`RowReader`] is the incremental row parser behind `advance`/`load`;
//! [`OutputSink`] is the output half behind `write`/`render_grid`. Both are
//! created fresh for every cycle, so the row counter and grid state restart
//! with each rerun.

use std::fmt;
use std::io::{BufRead, Write};

use crate::domain::entities::{Column, Row, SchemaMapping};
use crate::domain::ports::{ColumnSelect, LoadReport, RowSink, RowSource};
use crate::domain::services::{parse_double, parse_integer, GridRenderer};
use crate::domain::value_objects::{Cell, ColumnType, TextSpan, Value};
use crate::error::{LividError, LividResult};

/// Resumable, column-at-a-time parser over the current input line
///
/// Delimiters and the line terminator are overwritten with NUL as tokens are
/// consumed, so every string cell is also a NUL-terminated slice of the line
/// buffer.
pub struct RowReader<'a, R> {
    input: R,
    delimiter: u8,
    declared: &'a [Column],
    mapping: &'a SchemaMapping,
    line: Vec<u8>,
    /// Byte offset of the next unconsumed token
    cursor: usize,
    /// Parsed-column index of the next unconsumed token
    next_column: usize,
    at_eol: bool,
    loaded: bool,
    row_counter: i64,
}

impl<'a, R: BufRead> RowReader<'a, R> {
    /// `input` must be positioned at the first data line
    pub fn new(input: R, delimiter: u8, declared: &'a [Column], mapping: &'a SchemaMapping) -> Self {
        Self {
            input,
            delimiter,
            declared,
            mapping,
            line: Vec::new(),
            cursor: 0,
            next_column: 1,
            at_eol: true,
            loaded: false,
            row_counter: 1,
        }
    }

    /// Rows handed out so far
    pub fn rows_read(&self) -> i64 {
        self.row_counter - 1
    }

    /// Consume the token under the cursor
    fn next_token(&mut self) -> TextSpan {
        let start = self.cursor;
        let delimiter = self.delimiter;
        let offset = self.line[start..]
            .iter()
            .position(|&b| b == delimiter || b == b'\n')
            .unwrap_or(self.line.len() - start);
        let mut end = start + offset;

        if self.line.get(end) == Some(&b'\n') || end >= self.line.len() {
            self.at_eol = true;
            if end > start && self.line[end - 1] == b'\r' {
                end -= 1;
                self.line[end] = 0;
            }
        }
        if let Some(byte) = self.line.get_mut(start + offset) {
            *byte = 0;
        }
        self.cursor = start + offset + 1;
        TextSpan::new(start, end)
    }

    fn coerce(&self, span: TextSpan, kind: ColumnType) -> (Cell, bool) {
        match kind {
            ColumnType::String => (Cell::Str(span), true),
            ColumnType::Time | ColumnType::Integer => {
                let text = String::from_utf8_lossy(span.slice(&self.line));
                (Cell::Int(parse_integer(&text)), !span.is_empty())
            }
            ColumnType::Double => {
                let text = String::from_utf8_lossy(span.slice(&self.line));
                (Cell::Double(parse_double(&text)), !span.is_empty())
            }
        }
    }
}

impl<R: BufRead> RowSource for RowReader<'_, R> {
    fn advance(&mut self) -> LividResult<bool> {
        self.line.clear();
        self.cursor = 0;
        self.next_column = 1;
        self.loaded = false;

        let read = self
            .input
            .read_until(b'\n', &mut self.line)
            .map_err(|e| LividError::execution(format!("reading input: {}", e)))?;
        if read == 0 {
            self.at_eol = true;
            return Ok(false);
        }
        if self.line.last() != Some(&b'\n') {
            self.line.push(b'\n');
        }
        self.at_eol = false;
        Ok(true)
    }

    fn load(&mut self, row: &mut Row, select: ColumnSelect) -> LividResult<LoadReport> {
        let fresh = !self.loaded;
        if fresh {
            row.reset(self.declared);
            if let Some(dest) = self.mapping.declared_for(0) {
                row.set(dest, Cell::Int(self.row_counter), true);
            }
            self.row_counter += 1;
            self.loaded = true;
        }

        let first = self.next_column;
        let last = select.last();
        while !self.at_eol && self.next_column <= last && self.next_column < self.mapping.parsed_len()
        {
            let parsed = self.next_column;
            let span = self.next_token();
            self.next_column += 1;

            let Some(dest) = self.mapping.declared_for(parsed) else {
                continue;
            };
            let Some(kind) = self.declared.get(dest).map(Column::kind) else {
                continue;
            };
            let (cell, valid) = self.coerce(span, kind);
            row.set(dest, cell, valid);
        }

        Ok(LoadReport {
            fresh,
            parsed: first..self.next_column,
        })
    }

    fn line(&self) -> &[u8] {
        &self.line
    }
}

/// Output half of a running program: text and grid rows
pub struct OutputSink<W> {
    out: W,
    grid: GridRenderer,
}

impl<W: Write> OutputSink<W> {
    pub fn new(out: W, max_rows: usize) -> Self {
        Self {
            out,
            grid: GridRenderer::new(max_rows),
        }
    }

    pub fn rows_rendered(&self) -> usize {
        self.grid.rows_rendered()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for OutputSink<W> {
    fn write(&mut self, args: fmt::Arguments<'_>) -> LividResult<()> {
        self.out
            .write_fmt(args)
            .map_err(|e| LividError::execution(format!("writing output: {}", e)))
    }

    fn render_grid(
        &mut self,
        schema: &mut [Column],
        row: &[Value<'_>],
        valid: &[bool],
    ) -> LividResult<()> {
        self.grid
            .render(&mut self.out, schema, row, valid)
            .map_err(|e| LividError::execution(format!("writing output: {}", e)))
    }
}
