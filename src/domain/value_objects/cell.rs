//! Cell values
//!
//! A row stores [`Cell`]s: strings are kept as [`TextSpan`]s into the line
//! buffer they were parsed from. Readers resolve cells into borrowed
//! [`Value`]s, which cannot outlive that buffer.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use super::ColumnType;

/// Byte range of a field inside the current line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSpan {
    start: usize,
    end: usize,
}

impl TextSpan {
    pub const EMPTY: TextSpan = TextSpan { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Slice `line`, yielding nothing if the span is out of bounds
    pub fn slice<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        line.get(self.range()).unwrap_or_default()
    }
}

/// Stored cell value
///
/// Time and Integer share the integer representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Str(TextSpan),
    Int(i64),
    Double(f64),
}

impl Cell {
    /// Zero value for a column type
    pub fn zero(kind: ColumnType) -> Self {
        match kind {
            ColumnType::String => Cell::Str(TextSpan::EMPTY),
            ColumnType::Time | ColumnType::Integer => Cell::Int(0),
            ColumnType::Double => Cell::Double(0.0),
        }
    }

    /// Borrow the cell's value out of `line`
    pub fn resolve<'a>(&self, line: &'a [u8]) -> Value<'a> {
        match *self {
            Cell::Str(span) => Value::Str(String::from_utf8_lossy(span.slice(line))),
            Cell::Int(v) => Value::Int(v),
            Cell::Double(v) => Value::Double(v),
        }
    }
}

/// Borrowed view of a cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Str(Cow<'a, str>),
    Int(i64),
    Double(f64),
}

impl Value<'_> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
        }
    }
}
