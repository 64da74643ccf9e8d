//! Grid renderer
//!
//! Streams rows into a bordered text table:
//!
//! ```text
//! +--------+---+
//! | _index | a |
//! +--------+---+
//! |      1 | x |
//! ...
//! ```
//!
//! The header is printed with the widths known when the first row arrives.
//! Columns that later turn out wider grow for the following rows only; the
//! header and borders already written are not revisited. Once `max_rows`
//! rows have been printed a single `...` line is written and every further
//! call is a no-op for the rest of the pass.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::domain::entities::Column;
use crate::domain::value_objects::Value;

pub const DEFAULT_MAX_ROWS: usize = 100;
pub const ELLIPSIS: &str = "...";

/// Per-pass grid state
#[derive(Debug, Clone)]
pub struct GridRenderer {
    max_rows: usize,
    rows: usize,
    started: bool,
    capped: bool,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl GridRenderer {
    pub fn new(max_rows: usize) -> Self {
        Self {
            max_rows,
            rows: 0,
            started: false,
            capped: false,
        }
    }

    /// Data rows written so far in this pass
    pub fn rows_rendered(&self) -> usize {
        self.rows
    }

    pub fn is_capped(&self) -> bool {
        self.capped
    }

    /// Render one row; `row` and `valid` are indexed like `schema`
    pub fn render<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        schema: &mut [Column],
        row: &[Value<'_>],
        valid: &[bool],
    ) -> io::Result<()> {
        if self.capped {
            return Ok(());
        }
        if self.rows >= self.max_rows {
            return self.cap(out);
        }

        if !self.started {
            write_header(out, schema)?;
            self.started = true;
        }

        let mut line = String::from("|");
        for (i, column) in schema.iter_mut().enumerate() {
            if column.is_hidden() {
                continue;
            }
            let text = match (row.get(i), valid.get(i).copied()) {
                (Some(value), Some(true)) => value.to_string(),
                _ => String::new(),
            };
            push_cell(&mut line, &text, column.width());
            column.grow_width(text.width());
        }
        writeln!(out, "{}", line)?;

        self.rows += 1;
        if self.rows >= self.max_rows {
            self.cap(out)?;
        }
        Ok(())
    }

    fn cap<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        self.capped = true;
        writeln!(out, "{}", ELLIPSIS)
    }
}

fn write_header<W: Write + ?Sized>(out: &mut W, schema: &mut [Column]) -> io::Result<()> {
    let mut names = String::from("|");
    for column in schema.iter_mut().filter(|c| !c.is_hidden()) {
        column.grow_width(column.name().width());
        push_cell(&mut names, column.name(), column.width());
    }

    let border = border_line(schema);
    writeln!(out, "{}", border)?;
    writeln!(out, "{}", names)?;
    writeln!(out, "{}", border)
}

fn border_line(schema: &[Column]) -> String {
    let mut line = String::from("+");
    for column in schema.iter().filter(|c| !c.is_hidden()) {
        line.push_str(&"-".repeat(column.width() + 2));
        line.push('+');
    }
    line
}

/// Append ` <text> |`, left-padding `text` to `width` display columns
fn push_cell(line: &mut String, text: &str, width: usize) {
    line.push(' ');
    let pad = width.saturating_sub(text.width());
    line.extend(std::iter::repeat(' ').take(pad));
    line.push_str(text);
    line.push_str(" |");
}
