//! Schema mapping entity
//!
//! Partial, injective pairing between parsed-column indices and
//! declared-column indices. Rebuilt after every successful compile.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapping {
    parsed_to_declared: Vec<Option<usize>>,
    declared_to_parsed: Vec<Option<usize>>,
}

impl SchemaMapping {
    /// Mapping with no links
    pub fn unlinked(parsed: usize, declared: usize) -> Self {
        Self {
            parsed_to_declared: vec![None; parsed],
            declared_to_parsed: vec![None; declared],
        }
    }

    /// Link a parsed column to a declared column.
    ///
    /// Returns false, leaving the mapping unchanged, if either side is
    /// already linked or out of range.
    pub fn link(&mut self, parsed: usize, declared: usize) -> bool {
        match (
            self.parsed_to_declared.get(parsed),
            self.declared_to_parsed.get(declared),
        ) {
            (Some(None), Some(None)) => {
                self.parsed_to_declared[parsed] = Some(declared);
                self.declared_to_parsed[declared] = Some(parsed);
                true
            }
            _ => false,
        }
    }

    pub fn declared_for(&self, parsed: usize) -> Option<usize> {
        self.parsed_to_declared.get(parsed).copied().flatten()
    }

    pub fn parsed_for(&self, declared: usize) -> Option<usize> {
        self.declared_to_parsed.get(declared).copied().flatten()
    }

    pub fn parsed_len(&self) -> usize {
        self.parsed_to_declared.len()
    }

    pub fn declared_len(&self) -> usize {
        self.declared_to_parsed.len()
    }

    /// Number of linked pairs
    pub fn linked(&self) -> usize {
        self.parsed_to_declared.iter().flatten().count()
    }
}
