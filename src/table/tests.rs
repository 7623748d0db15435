use super::*;

fn cell(s: &str) -> Cell {
    Some(s.to_string())
}

fn sample() -> Table {
    Table::from_rows(
        "sample",
        ["Raw file", "Sequence"],
        vec![
            vec![cell("R1"), cell("PEPTIDE")],
            vec![cell("R2"), None],
        ],
    )
    .unwrap()
}

#[test]
fn test_new_rejects_duplicate_columns() {
    let err = Table::new("t", ["a", "b", "a"]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateColumn {
            table: "t".to_string(),
            column: "a".to_string(),
        }
    );
}

#[test]
fn test_push_row_checks_width() {
    let mut table = Table::new("t", ["a", "b"]).unwrap();
    assert!(table.push_row(vec![cell("1"), None]).is_ok());

    let err = table.push_row(vec![cell("1")]).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::RowWidth {
            expected: 2,
            actual: 1,
            ..
        }
    ));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_value_and_column_values() {
    let table = sample();
    assert_eq!(table.value(0, "Sequence").unwrap(), Some("PEPTIDE"));
    assert_eq!(table.value(1, "Sequence").unwrap(), None);

    let raw: Vec<_> = table.column_values("Raw file").unwrap().collect();
    assert_eq!(raw, vec![Some("R1"), Some("R2")]);
}

#[test]
fn test_missing_column_names_table() {
    let table = sample();
    let err = table.require_columns(&["Raw file", "PepRef"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required column 'PepRef' in table 'sample'"
    );
}

#[test]
fn test_map_column_sees_nulls() {
    let mut table = sample();
    table
        .map_column("Sequence", |c| Some(c.unwrap_or_else(|| "-".to_string())))
        .unwrap();
    assert_eq!(table.value(1, "Sequence").unwrap(), Some("-"));
}

#[test]
fn test_try_map_column_stops_at_error() {
    let mut table = sample();
    let result: Result<(), SchemaError> = table.try_map_column("Raw file", |pos, c| {
        if pos == 1 {
            Err(SchemaError::MissingColumn {
                table: "x".to_string(),
                column: "y".to_string(),
            })
        } else {
            Ok(c.map(|v| v.to_lowercase()))
        }
    });
    assert!(result.is_err());
    assert_eq!(table.value(0, "Raw file").unwrap(), Some("r1"));
}

#[test]
fn test_retain_rows_preserves_order() {
    let mut table = Table::from_rows(
        "t",
        ["n"],
        vec![vec![cell("1")], vec![cell("2")], vec![cell("3")]],
    )
    .unwrap();
    table.retain_rows(|pos, _| pos != 1);
    let left: Vec<_> = table.column_values("n").unwrap().collect();
    assert_eq!(left, vec![Some("1"), Some("3")]);
}
