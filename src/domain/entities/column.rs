//! Column entity and the parsed schema
//!
//! The same descriptor is used on both sides of reconciliation: the host's
//! parsed columns (from the input header) and the columns declared by the
//! loaded program.

use unicode_width::UnicodeWidthStr;

use crate::domain::value_objects::ColumnType;

/// Name of the synthetic row-counter column
pub const INDEX_COLUMN: &str = "_index";

/// A column descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    kind: ColumnType,
    /// Index of the linked column on the other side of reconciliation
    reconciled: Option<usize>,
    hidden: bool,
    /// Grid width in terminal columns; only ever grows
    width: usize,
}

impl Column {
    /// Create a visible column whose width fits its name
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        let name = name.into();
        let width = name.width();
        Self {
            name,
            kind,
            reconciled: None,
            hidden: false,
            width,
        }
    }

    /// The synthetic `_index` column
    pub fn index_column() -> Self {
        Self::new(INDEX_COLUMN, ColumnType::Integer)
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ColumnType) {
        self.kind = kind;
    }

    pub fn is_index(&self) -> bool {
        self.name == INDEX_COLUMN
    }

    pub fn reconciled(&self) -> Option<usize> {
        self.reconciled
    }

    pub fn set_reconciled(&mut self, index: Option<usize>) {
        self.reconciled = index;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Widen to at least `width`; narrower requests are ignored
    pub fn grow_width(&mut self, width: usize) {
        if width > self.width {
            self.width = width;
        }
    }
}

/// Columns parsed from the input header, `_index` first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema from header field names; `_index` is prepended
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = vec![Column::index_column()];
        columns.extend(
            names
                .into_iter()
                .map(|name| Column::new(name, ColumnType::String)),
        );
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Index of the first column named `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }
}
