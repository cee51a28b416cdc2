use serde::Serialize;
use serde_json::{Value, json};
use shared::{Table, VEHICLE_COLUMNS, VehicleRecord};

/// Typed table handed to the pricing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl Frame {
    pub fn from_record(record: &VehicleRecord) -> Self {
        Self::from_records(std::slice::from_ref(record))
    }

    pub fn from_records(records: &[VehicleRecord]) -> Self {
        Self {
            columns: VEHICLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(record_row).collect(),
        }
    }

    /// Coerces raw CSV cells column by column: integers if every present cell
    /// parses as one and none is missing, else floats, else text. Empty cells
    /// and the usual NA markers (`NA`, `N/A`, `null`, ...) become null.
    pub fn from_table(table: &Table) -> Self {
        let kinds: Vec<ColumnKind> = (0..table.columns.len())
            .map(|index| {
                column_kind(
                    table
                        .rows
                        .iter()
                        .map(|row| row.get(index).map(String::as_str).unwrap_or("")),
                )
            })
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|row| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(index, kind)| {
                        coerce(row.get(index).map(String::as_str).unwrap_or(""), *kind)
                    })
                    .collect()
            })
            .collect();

        Self {
            columns: table.columns.clone(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn record_row(record: &VehicleRecord) -> Vec<Value> {
    vec![
        json!(record.name),
        json!(record.description),
        json!(record.make),
        json!(record.model),
        json!(record.year),
        json!(record.price),
        json!(record.engine),
        json!(record.cylinders),
        json!(record.fuel.as_ref()),
        json!(record.mileage),
        json!(record.transmission.as_ref()),
        json!(record.trim),
        json!(record.body.as_ref()),
        json!(record.doors),
        json!(record.exterior_color),
        json!(record.interior_color),
        json!(record.drivetrain.as_ref()),
    ]
}

/// Cells a DataFrame CSV reader treats as missing by default.
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell.trim())
}

fn column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    let mut has_missing = false;
    for cell in cells {
        if is_missing(cell) {
            has_missing = true;
            continue;
        }
        let cell = cell.trim();
        if kind == ColumnKind::Integer && cell.parse::<i64>().is_err() {
            kind = ColumnKind::Float;
        }
        if kind == ColumnKind::Float && cell.parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    // Integer columns with gaps are read as floats.
    if kind == ColumnKind::Integer && has_missing {
        ColumnKind::Float
    } else {
        kind
    }
}

fn coerce(cell: &str, kind: ColumnKind) -> Value {
    if is_missing(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    match kind {
        ColumnKind::Integer => trimmed.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
        ColumnKind::Float => trimmed.parse::<f64>().map(|v| json!(v)).unwrap_or(Value::Null),
        ColumnKind::Text => Value::String(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ManualEntry;

    #[test]
    fn manual_record_sends_every_column_in_order() {
        let record = ManualEntry {
            make: "Toyota".into(),
            model: "Corolla".into(),
            ..ManualEntry::default()
        }
        .into_record();

        let frame = Frame::from_record(&record);
        assert_eq!(frame.columns, VEHICLE_COLUMNS);
        assert_eq!(frame.len(), 1);

        let row = &frame.rows[0];
        assert_eq!(row.len(), VEHICLE_COLUMNS.len());
        assert_eq!(row[1], Value::Null, "description");
        assert_eq!(row[2], json!("Toyota"));
        assert_eq!(row[4], json!(2020));
        assert_eq!(row[5], Value::Null, "price");
        assert_eq!(row[8], json!("Petrol"));
        assert_eq!(row[16], json!("FWD"));
    }

    #[test]
    fn csv_columns_are_coerced_like_a_dataframe_reader() {
        let table = Table::new(
            vec!["make".into(), "year".into(), "engine".into(), "price".into()],
            vec![
                vec!["Toyota".into(), "2020".into(), "1.5".into(), "".into()],
                vec!["Honda".into(), " 2018 ".into(), "2".into(), "".into()],
            ],
        );

        let frame = Frame::from_table(&table);
        assert_eq!(frame.columns, table.columns);
        assert_eq!(
            frame.rows[0],
            vec![json!("Toyota"), json!(2020), json!(1.5), Value::Null]
        );
        assert_eq!(
            frame.rows[1],
            vec![json!("Honda"), json!(2018), json!(2.0), Value::Null]
        );
    }

    #[test]
    fn mixed_column_falls_back_to_text() {
        let table = Table::new(
            vec!["doors".into()],
            vec![vec!["4".into()], vec!["four".into()], vec!["".into()]],
        );

        let frame = Frame::from_table(&table);
        assert_eq!(frame.rows[0][0], json!("4"));
        assert_eq!(frame.rows[1][0], json!("four"));
        assert_eq!(frame.rows[2][0], Value::Null);
    }

    #[test]
    fn na_markers_are_missing_values() {
        let table = Table::new(
            vec!["doors".into(), "mileage".into(), "trim".into()],
            vec![
                vec!["4".into(), "50000".into(), "LE".into()],
                vec!["NA".into(), "N/A".into(), "NULL".into()],
                vec!["2".into(), "nan".into(), "".into()],
            ],
        );

        let frame = Frame::from_table(&table);
        assert_eq!(frame.rows[0], vec![json!(4.0), json!(50000.0), json!("LE")]);
        assert_eq!(frame.rows[1], vec![Value::Null, Value::Null, Value::Null]);
        assert_eq!(frame.rows[2], vec![json!(2.0), Value::Null, Value::Null]);
    }
}
