//! Property tests for schema reconciliation.

use proptest::prelude::*;

use livid::domain::entities::{Column, Schema};
use livid::domain::services::reconcile;
use livid::domain::value_objects::ColumnType;

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

/// Header names from a small pool so duplicates and misses both occur
fn header() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 0..6)
}

fn declared() -> impl Strategy<Value = Vec<Column>> {
    (
        any::<bool>(),
        prop::collection::vec(("[a-f]", column_type(), any::<bool>()), 0..6),
    )
        .prop_map(|(with_index, specs)| {
            let mut columns = Vec::new();
            if with_index {
                columns.push(Column::index_column());
            }
            columns.extend(
                specs
                    .into_iter()
                    .map(|(name, kind, hidden)| Column::new(name, kind).with_hidden(hidden)),
            );
            columns
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Reconciling an already reconciled pair changes nothing.
    #[test]
    fn reconcile_is_idempotent(names in header(), declared in declared()) {
        let mut parsed = Schema::from_names(names);
        let mut declared = declared;

        let first = reconcile(parsed.columns_mut(), &mut declared).unwrap();
        let parsed_after_first = parsed.clone();
        let declared_after_first = declared.clone();

        let second = reconcile(parsed.columns_mut(), &mut declared).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(parsed, parsed_after_first);
        prop_assert_eq!(declared, declared_after_first);
    }

    /// PROPERTY: Every link joins columns of the same name and the parsed
    /// side takes the declared type.
    #[test]
    fn links_join_equal_names(names in header(), declared in declared()) {
        let mut parsed = Schema::from_names(names);
        let mut declared = declared;

        let mapping = reconcile(parsed.columns_mut(), &mut declared).unwrap();

        prop_assert!(mapping.linked() <= parsed.len().min(declared.len()));
        for (d, column) in declared.iter().enumerate() {
            match mapping.parsed_for(d) {
                Some(p) => {
                    let target = &parsed.columns()[p];
                    prop_assert_eq!(target.name(), column.name());
                    prop_assert_eq!(target.kind(), column.kind());
                    prop_assert_eq!(mapping.declared_for(p), Some(d));
                    prop_assert_eq!(column.reconciled(), Some(p));
                }
                None => prop_assert_eq!(column.reconciled(), None),
            }
        }
    }
}
