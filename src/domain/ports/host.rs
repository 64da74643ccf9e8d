//! Host capability ports
//!
//! The loaded program reaches the host only through these two traits:
//! `RowSource` (advance/load) and `RowSink` (write/render_grid). They are
//! split so a program can hold a row view borrowed from the source while
//! it writes to the sink.

use std::fmt;
use std::ops::Range;

use crate::domain::entities::{Column, Row};
use crate::domain::value_objects::Value;
use crate::error::LividResult;

/// How far `RowSource::load` should parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelect {
    /// Stop after the parsed column with this index
    Through(usize),
    /// Parse to the end of the line
    All,
}

impl ColumnSelect {
    /// Decode the wire form: any negative index means "all"
    pub fn from_raw(column: i64) -> Self {
        usize::try_from(column)
            .map(ColumnSelect::Through)
            .unwrap_or(ColumnSelect::All)
    }

    pub(crate) fn last(&self) -> usize {
        match self {
            ColumnSelect::Through(index) => *index,
            ColumnSelect::All => usize::MAX,
        }
    }
}

/// What a `load` call touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// First load since `advance`: the whole row was reset
    pub fresh: bool,
    /// Parsed-column indices consumed by this call
    pub parsed: Range<usize>,
}

/// Input side of the callback contract
pub trait RowSource {
    /// Read the next line; false at end of input
    fn advance(&mut self) -> LividResult<bool>;

    /// Parse forward from the resume cursor into `row`
    fn load(&mut self, row: &mut Row, select: ColumnSelect) -> LividResult<LoadReport>;

    /// Current line buffer; string cells are spans into it
    fn line(&self) -> &[u8];
}

/// Output side of the callback contract
pub trait RowSink {
    /// Append formatted text to the output
    fn write(&mut self, args: fmt::Arguments<'_>) -> LividResult<()>;

    /// Append one row to the grid
    fn render_grid(
        &mut self,
        schema: &mut [Column],
        row: &[Value<'_>],
        valid: &[bool],
    ) -> LividResult<()>;
}

/// The full capability set handed to a running program
pub struct Host<'a> {
    pub rows: &'a mut dyn RowSource,
    pub out: &'a mut dyn RowSink,
}

impl<'a> Host<'a> {
    pub fn new(rows: &'a mut dyn RowSource, out: &'a mut dyn RowSink) -> Self {
        Self { rows, out }
    }
}
