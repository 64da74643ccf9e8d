//! Property tests for the incremental row parser.

use std::io::Cursor;

use proptest::prelude::*;

use livid::application::session::RowReader;
use livid::domain::entities::{Column, Row, Schema, SchemaMapping};
use livid::domain::ports::{ColumnSelect, RowSource};
use livid::domain::services::reconcile;
use livid::domain::value_objects::{Cell, ColumnType};

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

/// Parsed schema `c1..cN` declared in order with the given types
fn tables(kinds: &[ColumnType]) -> (Vec<Column>, SchemaMapping) {
    let names: Vec<String> = (1..=kinds.len()).map(|i| format!("c{i}")).collect();
    let mut parsed = Schema::from_names(names.clone());
    let mut declared = vec![Column::index_column()];
    declared.extend(names.iter().zip(kinds).map(|(n, k)| Column::new(n.as_str(), *k)));
    let mapping = reconcile(parsed.columns_mut(), &mut declared).unwrap();
    (declared, mapping)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary input bytes and load selections never panic,
    /// and every advanced line is counted once.
    #[test]
    fn row_reader_never_panics(
        input in prop::collection::vec(any::<u8>(), 0..256),
        kinds in prop::collection::vec(column_type(), 1..5),
        selects in prop::collection::vec(-1i64..6, 1..4),
    ) {
        let (declared, mapping) = tables(&kinds);
        let mut reader = RowReader::new(Cursor::new(input), b',', &declared, &mapping);
        let mut row = Row::for_columns(&declared);

        let mut lines = 0;
        while reader.advance().unwrap() {
            lines += 1;
            for select in &selects {
                reader.load(&mut row, ColumnSelect::from_raw(*select)).unwrap();
            }
            prop_assert_eq!(row.len(), declared.len());
        }
        prop_assert_eq!(reader.rows_read(), lines);
    }

    /// PROPERTY: Numeric fields are valid exactly when present; absent
    /// ones read as zero.
    #[test]
    fn empty_numeric_fields_are_invalid(
        fields in prop::collection::vec((column_type(), prop::option::of(-1000i32..1000)), 1..6),
    ) {
        let kinds: Vec<ColumnType> = fields.iter().map(|(k, _)| *k).collect();
        let (declared, mapping) = tables(&kinds);
        let line: Vec<String> = fields
            .iter()
            .map(|(_, v)| v.map(|v| v.to_string()).unwrap_or_default())
            .collect();
        let input = format!("{}\n", line.join(","));

        let mut reader = RowReader::new(Cursor::new(input), b',', &declared, &mapping);
        let mut row = Row::for_columns(&declared);
        prop_assert!(reader.advance().unwrap());
        reader.load(&mut row, ColumnSelect::All).unwrap();

        for (i, (kind, value)) in fields.iter().enumerate() {
            let dest = i + 1;
            match (kind, value) {
                (ColumnType::String, _) => prop_assert!(row.is_valid(dest)),
                (_, None) => {
                    prop_assert!(!row.is_valid(dest));
                    prop_assert_eq!(row.cell(dest), Some(&Cell::zero(*kind)));
                }
                (ColumnType::Double, Some(v)) => {
                    prop_assert!(row.is_valid(dest));
                    prop_assert_eq!(row.cell(dest), Some(&Cell::Double(f64::from(*v))));
                }
                (_, Some(v)) => {
                    prop_assert!(row.is_valid(dest));
                    prop_assert_eq!(row.cell(dest), Some(&Cell::Int(i64::from(*v))));
                }
            }
        }
    }

    /// PROPERTY: Loading in steps yields the same row as loading at once.
    #[test]
    fn stepwise_load_matches_single_load(
        fields in prop::collection::vec(("[0-9a-fx]{0,4}", column_type()), 1..6),
        first in 0usize..7,
    ) {
        let kinds: Vec<ColumnType> = fields.iter().map(|(_, k)| *k).collect();
        let (declared, mapping) = tables(&kinds);
        let line: Vec<&str> = fields.iter().map(|(f, _)| f.as_str()).collect();
        let input = format!("{}\n", line.join(","));

        let mut whole = Row::for_columns(&declared);
        let mut reader = RowReader::new(Cursor::new(input.clone()), b',', &declared, &mapping);
        reader.advance().unwrap();
        reader.load(&mut whole, ColumnSelect::All).unwrap();

        let mut stepped = Row::for_columns(&declared);
        let mut reader = RowReader::new(Cursor::new(input), b',', &declared, &mapping);
        reader.advance().unwrap();
        reader.load(&mut stepped, ColumnSelect::Through(first)).unwrap();
        let report = reader.load(&mut stepped, ColumnSelect::All).unwrap();

        prop_assert!(!report.fresh);
        prop_assert_eq!(stepped, whole);
    }
}
