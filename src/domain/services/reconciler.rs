//! Schema reconciler
//!
//! Links the program's declared columns to the host's parsed columns by
//! exact name. A linked parsed column takes its type and visibility from the
//! declaration; everything unlinked is logged and left out of the mapping.

use crate::domain::entities::{Column, SchemaMapping, INDEX_COLUMN};
use crate::domain::value_objects::ColumnType;
use crate::error::{LividError, LividResult};

/// Rebuild the mapping between `parsed` and `declared`
///
/// Previous links on both sides are discarded first, so applying this
/// twice to the same inputs gives the same result.
pub fn reconcile(parsed: &mut [Column], declared: &mut [Column]) -> LividResult<SchemaMapping> {
    if let Some(index) = declared.iter().find(|c| c.name() == INDEX_COLUMN) {
        if index.kind() != ColumnType::Integer {
            return Err(LividError::IndexColumnType {
                found: index.kind(),
            });
        }
    }

    parsed.iter_mut().for_each(|c| c.set_reconciled(None));
    declared.iter_mut().for_each(|c| c.set_reconciled(None));

    let mut mapping = SchemaMapping::unlinked(parsed.len(), declared.len());

    for (declared_index, column) in declared.iter_mut().enumerate() {
        let Some(parsed_index) = parsed.iter().position(|p| p.name() == column.name()) else {
            tracing::warn!(
                column = column.name(),
                "declared column has no matching input column; it will read as zero"
            );
            continue;
        };

        if !mapping.link(parsed_index, declared_index) {
            tracing::warn!(
                column = column.name(),
                "input column is already claimed by an earlier declaration"
            );
            continue;
        }

        let target = &mut parsed[parsed_index];
        target.set_kind(column.kind());
        target.set_hidden(column.is_hidden());
        target.set_reconciled(Some(declared_index));
        column.set_reconciled(Some(parsed_index));
        tracing::debug!(
            column = column.name(),
            parsed = parsed_index,
            declared = declared_index,
            kind = %column.kind(),
            "linked column"
        );
    }

    for column in parsed.iter().filter(|c| c.reconciled().is_none()) {
        tracing::info!(column = column.name(), "input column is not declared; skipping");
    }

    Ok(mapping)
}
