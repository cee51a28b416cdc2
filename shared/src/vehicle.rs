use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Column names, in the order the pricing pipeline expects them.
pub const VEHICLE_COLUMNS: [&str; 17] = [
    "name",
    "description",
    "make",
    "model",
    "year",
    "price",
    "engine",
    "cylinders",
    "fuel",
    "mileage",
    "transmission",
    "trim",
    "body",
    "doors",
    "exterior_color",
    "interior_color",
    "drivetrain",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, EnumIter, EnumString, IntoStaticStr)]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Electric,
    Hybrid,
    Gasoline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, EnumIter, EnumString, IntoStaticStr)]
pub enum Transmission {
    #[default]
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, EnumIter, EnumString, IntoStaticStr)]
pub enum Drivetrain {
    #[default]
    #[serde(rename = "FWD")]
    #[strum(serialize = "FWD")]
    Fwd,
    #[serde(rename = "RWD")]
    #[strum(serialize = "RWD")]
    Rwd,
    #[serde(rename = "AWD")]
    #[strum(serialize = "AWD")]
    Awd,
    #[serde(rename = "4WD")]
    #[strum(serialize = "4WD")]
    FourWd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, EnumIter, EnumString, IntoStaticStr)]
pub enum BodyType {
    #[default]
    Sedan,
    #[serde(rename = "SUV")]
    #[strum(serialize = "SUV")]
    Suv,
    Hatchback,
    Coupe,
    Convertible,
    Truck,
    Van,
}

/// Inclusive range enforced by a numeric form widget, plus its initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericBounds {
    pub field: &'static str,
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl NumericBounds {
    pub const fn new(field: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self { field, label, min, max, default }
    }

    pub fn accepts(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn check(&self, value: i64) -> Result<(), FieldError> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(FieldError::OutOfRange {
                label: self.label,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

pub const YEAR_BOUNDS: NumericBounds = NumericBounds::new("year", "Manufacturing Year", 1990, 2025, 2020);
pub const MILEAGE_BOUNDS: NumericBounds = NumericBounds::new("mileage", "Mileage (in km)", 0, 500_000, 50_000);
pub const ENGINE_BOUNDS: NumericBounds = NumericBounds::new("engine", "Engine Size (in cc)", 500, 8000, 1500);
pub const CYLINDER_BOUNDS: NumericBounds = NumericBounds::new("cylinders", "Cylinders", 1, 16, 4);
pub const DOOR_BOUNDS: NumericBounds = NumericBounds::new("doors", "Number of Doors", 2, 6, 4);

pub const NUMERIC_BOUNDS: [NumericBounds; 5] =
    [YEAR_BOUNDS, MILEAGE_BOUNDS, ENGINE_BOUNDS, CYLINDER_BOUNDS, DOOR_BOUNDS];

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldError {
    #[display(fmt = "{} must be between {} and {} (got {})", label, min, max, value)]
    OutOfRange {
        label: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl std::error::Error for FieldError {}

/// One row of pipeline input.
///
/// `price` and `description` are part of the schema but are never prediction
/// inputs; the manual form sends them as null rather than dropping the columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub name: String,
    pub description: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: Option<f64>,
    pub engine: i64,
    pub cylinders: i64,
    pub fuel: FuelType,
    pub mileage: i64,
    pub transmission: Transmission,
    pub trim: String,
    pub body: BodyType,
    pub doors: i64,
    pub exterior_color: String,
    pub interior_color: String,
    pub drivetrain: Drivetrain,
}

/// State of the manual entry form. Missing fields take their widget defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualEntry {
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub mileage: i64,
    pub fuel: FuelType,
    pub engine: i64,
    pub cylinders: i64,
    pub transmission: Transmission,
    pub drivetrain: Drivetrain,
    pub trim: String,
    pub body: BodyType,
    pub doors: i64,
    pub exterior_color: String,
    pub interior_color: String,
}

impl Default for ManualEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            make: String::new(),
            model: String::new(),
            year: YEAR_BOUNDS.default,
            mileage: MILEAGE_BOUNDS.default,
            fuel: FuelType::default(),
            engine: ENGINE_BOUNDS.default,
            cylinders: CYLINDER_BOUNDS.default,
            transmission: Transmission::default(),
            drivetrain: Drivetrain::default(),
            trim: String::new(),
            body: BodyType::default(),
            doors: DOOR_BOUNDS.default,
            exterior_color: String::new(),
            interior_color: String::new(),
        }
    }
}

impl ManualEntry {
    pub fn validate(&self) -> Result<(), FieldError> {
        YEAR_BOUNDS.check(self.year)?;
        MILEAGE_BOUNDS.check(self.mileage)?;
        ENGINE_BOUNDS.check(self.engine)?;
        CYLINDER_BOUNDS.check(self.cylinders)?;
        DOOR_BOUNDS.check(self.doors)?;
        Ok(())
    }

    pub fn into_record(self) -> VehicleRecord {
        VehicleRecord {
            name: self.name,
            description: None,
            make: self.make,
            model: self.model,
            year: self.year,
            price: None,
            engine: self.engine,
            cylinders: self.cylinders,
            fuel: self.fuel,
            mileage: self.mileage,
            transmission: self.transmission,
            trim: self.trim,
            body: self.body,
            doors: self.doors,
            exterior_color: self.exterior_color,
            interior_color: self.interior_color,
            drivetrain: self.drivetrain,
        }
    }

    /// Current value of a bounded field, looked up by column name.
    pub fn numeric(&self, field: &str) -> Option<i64> {
        match field {
            "year" => Some(self.year),
            "mileage" => Some(self.mileage),
            "engine" => Some(self.engine),
            "cylinders" => Some(self.cylinders),
            "doors" => Some(self.doors),
            _ => None,
        }
    }

    pub fn set_numeric(&mut self, field: &str, value: i64) {
        match field {
            "year" => self.year = value,
            "mileage" => self.mileage = value,
            "engine" => self.engine = value,
            "cylinders" => self.cylinders = value,
            "doors" => self.doors = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn corolla() -> ManualEntry {
        ManualEntry {
            name: "Toyota Corolla".into(),
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2020,
            mileage: 50_000,
            fuel: FuelType::Petrol,
            engine: 1500,
            cylinders: 4,
            transmission: Transmission::Manual,
            drivetrain: Drivetrain::Fwd,
            trim: "LE".into(),
            body: BodyType::Sedan,
            doors: 4,
            exterior_color: "White".into(),
            interior_color: "Black".into(),
        }
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let mut entry = corolla();
        for year in [1990, 2025] {
            entry.year = year;
            assert!(entry.validate().is_ok(), "year {year} should be accepted");
        }
        for year in [1989, 2026] {
            entry.year = year;
            assert!(entry.validate().is_err(), "year {year} should be rejected");
        }
    }

    #[test]
    fn out_of_range_message_names_the_widget() {
        let mut entry = corolla();
        entry.doors = 7;
        let err = entry.validate().unwrap_err();
        assert_eq!(err.to_string(), "Number of Doors must be between 2 and 6 (got 7)");
    }

    #[test]
    fn defaults_sit_inside_their_bounds() {
        let entry = ManualEntry::default();
        assert!(entry.validate().is_ok());
        for bounds in NUMERIC_BOUNDS {
            assert_eq!(entry.numeric(bounds.field), Some(bounds.default));
        }
    }

    #[test]
    fn manual_record_keeps_price_and_description_null() {
        let record = corolla().into_record();
        assert_eq!(record.price, None);
        assert_eq!(record.description, None);
        assert_eq!(record.make, "Toyota");
    }

    #[test]
    fn categorical_options_use_form_labels() {
        let drivetrains: Vec<&str> = Drivetrain::iter().map(<&'static str>::from).collect();
        assert_eq!(drivetrains, ["FWD", "RWD", "AWD", "4WD"]);
        assert_eq!(serde_json::to_string(&BodyType::Suv).unwrap(), "\"SUV\"");
        assert_eq!("4WD".parse::<Drivetrain>().unwrap(), Drivetrain::FourWd);
        assert_eq!(FuelType::iter().count(), 5);
    }

    #[test]
    fn set_numeric_ignores_unknown_fields() {
        let mut entry = ManualEntry::default();
        entry.set_numeric("cylinders", 8);
        entry.set_numeric("price", 1);
        assert_eq!(entry.cylinders, 8);
        assert_eq!(entry, ManualEntry { cylinders: 8, ..ManualEntry::default() });
    }
}
