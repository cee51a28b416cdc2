use derive_more::Display;
use serde::{Deserialize, Serialize};

pub const PREDICTED_PRICE_COLUMN: &str = "Predicted Price";

/// A CSV document held as raw cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TableError {
    #[display(fmt = "expected {} predictions, got {}", expected, actual)]
    LengthMismatch { expected: usize, actual: usize },
}

impl std::error::Error for TableError {}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns a copy of the table with a `Predicted Price` column.
    ///
    /// An existing column of that name is overwritten in place; otherwise the
    /// column is appended after the original ones.
    pub fn with_predictions(&self, predictions: &[f64]) -> Result<Table, TableError> {
        if predictions.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                expected: self.rows.len(),
                actual: predictions.len(),
            });
        }

        let mut augmented = self.clone();
        match self.column_index(PREDICTED_PRICE_COLUMN) {
            Some(index) => {
                for (row, price) in augmented.rows.iter_mut().zip(predictions) {
                    if row.len() <= index {
                        row.resize(index + 1, String::new());
                    }
                    row[index] = price_cell(*price);
                }
            }
            None => {
                augmented.columns.push(PREDICTED_PRICE_COLUMN.to_string());
                for (row, price) in augmented.rows.iter_mut().zip(predictions) {
                    row.push(price_cell(*price));
                }
            }
        }
        Ok(augmented)
    }
}

/// Float cells keep their decimal point (`12000.0`), as in a float column
/// written out by a DataFrame.
fn price_cell(price: f64) -> String {
    format!("{price:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["make".into(), "model".into(), "year".into()],
            vec![
                vec!["Toyota".into(), "Corolla".into(), "2020".into()],
                vec!["Honda".into(), "Civic".into(), "2018".into()],
            ],
        )
    }

    #[test]
    fn predictions_append_one_column() {
        let table = sample();
        let augmented = table.with_predictions(&[15000.5, 12000.0]).unwrap();

        assert_eq!(augmented.len(), table.len());
        assert_eq!(augmented.columns.len(), table.columns.len() + 1);
        assert_eq!(&augmented.columns[..3], &table.columns[..]);
        assert_eq!(augmented.columns[3], PREDICTED_PRICE_COLUMN);
        assert_eq!(augmented.rows[0], vec!["Toyota", "Corolla", "2020", "15000.5"]);
        assert_eq!(augmented.rows[1][3], "12000.0");
    }

    #[test]
    fn existing_prediction_column_is_overwritten() {
        let mut table = sample();
        table.columns.insert(1, PREDICTED_PRICE_COLUMN.into());
        for row in &mut table.rows {
            row.insert(1, "stale".into());
        }

        let augmented = table.with_predictions(&[1.0, 2.0]).unwrap();
        assert_eq!(augmented.columns, table.columns);
        assert_eq!(augmented.rows[0][1], "1.0");
        assert_eq!(augmented.rows[1][1], "2.0");
    }

    #[test]
    fn mismatched_prediction_count_is_rejected() {
        let err = sample().with_predictions(&[1.0]).unwrap_err();
        assert_eq!(err, TableError::LengthMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn empty_table_gains_header_only() {
        let table = Table::new(vec!["make".into()], vec![]);
        let augmented = table.with_predictions(&[]).unwrap();
        assert!(augmented.is_empty());
        assert_eq!(augmented.columns, vec!["make", PREDICTED_PRICE_COLUMN]);
    }
}
