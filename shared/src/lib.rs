mod currency;
mod table;
mod vehicle;

use serde::{Deserialize, Serialize};

pub use currency::{CURRENCY_SYMBOL, format_currency};
pub use table::{PREDICTED_PRICE_COLUMN, Table, TableError};
pub use vehicle::{
    BodyType, CYLINDER_BOUNDS, DOOR_BOUNDS, Drivetrain, ENGINE_BOUNDS, FieldError, FuelType,
    MILEAGE_BOUNDS, ManualEntry, NUMERIC_BOUNDS, NumericBounds, Transmission, VEHICLE_COLUMNS,
    VehicleRecord, YEAR_BOUNDS,
};

/// File name offered for the augmented CSV.
pub const DOWNLOAD_FILE_NAME: &str = "predicted_prices.csv";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    pub price: f64,
    pub formatted: String,
}

impl PredictionResponse {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            formatted: format_currency(price),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BatchPredictionResponse {
    pub table: Table,
    pub csv: String,
    pub file_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct FormSchema {
    pub columns: Vec<&'static str>,
    pub bounds: Vec<NumericBounds>,
    pub fuel: Vec<&'static str>,
    pub transmission: Vec<&'static str>,
    pub drivetrain: Vec<&'static str>,
    pub body: Vec<&'static str>,
}

impl FormSchema {
    pub fn current() -> Self {
        use strum::IntoEnumIterator;

        Self {
            columns: VEHICLE_COLUMNS.to_vec(),
            bounds: NUMERIC_BOUNDS.to_vec(),
            fuel: FuelType::iter().map(Into::into).collect(),
            transmission: Transmission::iter().map(Into::into).collect(),
            drivetrain: Drivetrain::iter().map(Into::into).collect(),
            body: BodyType::iter().map(Into::into).collect(),
        }
    }
}
