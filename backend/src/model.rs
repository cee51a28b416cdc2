use crate::frame::Frame;
use shared::{Table, TableError, VehicleRecord};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("failed to start pipeline worker: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("pipeline worker I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("pipeline worker exited")]
    WorkerExited,
    #[error("failed to load model artifact: {0}")]
    Load(String),
    #[error("{0}")]
    Pipeline(String),
    #[error("malformed reply from pipeline worker: {0}")]
    Protocol(String),
    #[error("failed to encode pipeline input: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("pipeline returned {actual} predictions for {expected} rows")]
    RowCountMismatch { expected: usize, actual: usize },
    #[error("pipeline returned a non-finite prediction for row {row}")]
    NonFinite { row: usize },
    #[error("pipeline worker lock poisoned")]
    Poisoned,
}

impl From<TableError> for InferenceError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::LengthMismatch { expected, actual } => {
                InferenceError::RowCountMismatch { expected, actual }
            }
        }
    }
}

/// A loaded pricing pipeline: one estimate per input row, in order.
pub trait PricePipeline: Send + Sync {
    fn predict(&self, frame: &Frame) -> Result<Vec<f64>, InferenceError>;
}

#[derive(Clone)]
pub struct PriceModel {
    pipeline: Arc<dyn PricePipeline>,
}

impl PriceModel {
    pub fn new(pipeline: Arc<dyn PricePipeline>) -> Self {
        Self { pipeline }
    }

    pub fn predict(&self, frame: &Frame) -> Result<Vec<f64>, InferenceError> {
        let predictions = self.pipeline.predict(frame)?;
        if predictions.len() != frame.len() {
            return Err(InferenceError::RowCountMismatch {
                expected: frame.len(),
                actual: predictions.len(),
            });
        }
        if let Some(row) = predictions.iter().position(|p| !p.is_finite()) {
            return Err(InferenceError::NonFinite { row });
        }
        Ok(predictions)
    }

    pub fn predict_vehicle(&self, record: &VehicleRecord) -> Result<f64, InferenceError> {
        let predictions = self.predict(&Frame::from_record(record))?;
        predictions
            .first()
            .copied()
            .ok_or(InferenceError::RowCountMismatch { expected: 1, actual: 0 })
    }

    /// Runs the pipeline over an uploaded table and returns it with a
    /// `Predicted Price` column.
    pub fn predict_table(&self, table: &Table) -> Result<Table, InferenceError> {
        let predictions = self.predict(&Frame::from_table(table))?;
        Ok(table.with_predictions(&predictions)?)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Prices each row as `year * 10`, failing like a real pipeline would when
    /// the `year` or `make` column is absent.
    pub struct YearPipeline;

    impl PricePipeline for YearPipeline {
        fn predict(&self, frame: &Frame) -> Result<Vec<f64>, InferenceError> {
            for required in ["make", "year"] {
                if !frame.columns.iter().any(|c| c == required) {
                    return Err(InferenceError::Pipeline(format!(
                        "columns are missing: {{'{required}'}}"
                    )));
                }
            }
            let year = frame.columns.iter().position(|c| c == "year").unwrap_or(0);
            frame
                .rows
                .iter()
                .map(|row| {
                    row[year]
                        .as_f64()
                        .map(|y| y * 10.0)
                        .ok_or_else(|| InferenceError::Pipeline("could not convert year".into()))
                })
                .collect()
        }
    }

    /// Returns a fixed list of predictions regardless of input.
    pub struct FixedPipeline(pub Vec<f64>);

    impl PricePipeline for FixedPipeline {
        fn predict(&self, _frame: &Frame) -> Result<Vec<f64>, InferenceError> {
            Ok(self.0.clone())
        }
    }

    pub fn year_model() -> PriceModel {
        PriceModel::new(Arc::new(YearPipeline))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use shared::{ManualEntry, PREDICTED_PRICE_COLUMN};

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn single_vehicle_gets_one_estimate() {
        let record = ManualEntry::default().into_record();
        let price = year_model().predict_vehicle(&record).unwrap();
        assert_eq!(price, 20200.0);
    }

    #[test]
    fn table_keeps_rows_and_gains_prediction_column() {
        let upload = table(
            &["make", "model", "year"],
            &[&["Toyota", "Corolla", "2020"], &["Honda", "Civic", "2018"], &["Ford", "Focus", "2015"]],
        );

        let augmented = year_model().predict_table(&upload).unwrap();
        assert_eq!(augmented.len(), 3);
        assert_eq!(augmented.columns, ["make", "model", "year", PREDICTED_PRICE_COLUMN]);
        for (original, row) in upload.rows.iter().zip(&augmented.rows) {
            assert_eq!(&row[..3], &original[..]);
        }
        assert_eq!(augmented.rows[2][3], "20150.0");
    }

    #[test]
    fn missing_column_surfaces_pipeline_error() {
        let upload = table(&["model", "year"], &[&["Corolla", "2020"]]);
        let err = year_model().predict_table(&upload).unwrap_err();
        assert_eq!(err.to_string(), "columns are missing: {'make'}");
    }

    #[test]
    fn short_prediction_list_is_an_error() {
        let model = PriceModel::new(Arc::new(FixedPipeline(vec![1.0])));
        let upload = table(&["make"], &[&["a"], &["b"]]);
        let err = model.predict_table(&upload).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::RowCountMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn non_finite_prediction_is_an_error() {
        let model = PriceModel::new(Arc::new(FixedPipeline(vec![3.0, f64::NAN])));
        let upload = table(&["make"], &[&["a"], &["b"]]);
        let err = model.predict_table(&upload).unwrap_err();
        assert!(matches!(err, InferenceError::NonFinite { row: 1 }));
    }
}
