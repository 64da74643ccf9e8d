//! Row entity
//!
//! A fixed-size sequence of cells aligned with the declared column table,
//! plus a parallel validity sequence. Validity means "the source field was
//! present", which is not the same as "parsed cleanly".

use crate::domain::value_objects::{Cell, Value};

use super::Column;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
    valid: Vec<bool>,
}

impl Row {
    /// Zeroed, all-invalid row for a declared table
    pub fn for_columns(columns: &[Column]) -> Self {
        Self {
            cells: columns.iter().map(|c| Cell::zero(c.kind())).collect(),
            valid: vec![false; columns.len()],
        }
    }

    /// Zero every cell and mark every field absent
    pub fn reset(&mut self, columns: &[Column]) {
        self.cells.clear();
        self.cells
            .extend(columns.iter().map(|c| Cell::zero(c.kind())));
        self.valid.clear();
        self.valid.resize(columns.len(), false);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.valid.get(index).copied().unwrap_or(false)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn valid(&self) -> &[bool] {
        &self.valid
    }

    /// Store a cell; out-of-range slots are ignored
    pub fn set(&mut self, index: usize, cell: Cell, valid: bool) {
        if let (Some(slot), Some(flag)) = (self.cells.get_mut(index), self.valid.get_mut(index)) {
            *slot = cell;
            *flag = valid;
        }
    }

    /// Resolve every cell against the line it was parsed from
    pub fn values<'a>(&self, line: &'a [u8]) -> Vec<Value<'a>> {
        self.cells.iter().map(|c| c.resolve(line)).collect()
    }
}
