use log::info;
use serde::{ Deserialize, Serialize };

use std::fmt;
use std::path::Path;

use std::collections::HashSet;

use crate::error::{ PlateScanError, PlateScanErrorKind };

// Rows written when no registry file exists yet.
const SEED_CARS: [(&str, u32, u32); 3] = [
    ("IT20 BOM", 5, 3),
    ("MH12 AB1234", 11, 7),
    ("DL10 XY9876", 3, 2),
];

const MAX_CAR_AGE_YEARS: u32 = 10;
const MAX_MONTHS_WITHOUT_SERVICING: u32 = 6;

/// One row of the car registry CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(rename = "Car_Number")]
    pub car_number: String,
    #[serde(rename = "Age_Of_Car")]
    pub age_of_car: u32,
    #[serde(rename = "Months_without_Servicing")]
    pub months_without_servicing: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    TooOld,
    ServiceOverdue,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::TooOld => {
                write!(f, "Warning: Car is too old and may harm the environment!")
            }
            Advisory::ServiceOverdue => write!(f, "Service the car!"),
        }
    }
}

impl CarRecord {

    pub fn summary(&self) -> String {
        format!(
            "Age: {} years, Months without Servicing: {}",
            self.age_of_car, self.months_without_servicing
        )
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        if self.age_of_car > MAX_CAR_AGE_YEARS {
            advisories.push(Advisory::TooOld);
        }
        if self.months_without_servicing > MAX_MONTHS_WITHOUT_SERVICING {
            advisories.push(Advisory::ServiceOverdue);
        }
        advisories
    }

}

/// In-memory car registry, read once from CSV and immutable afterwards.
#[derive(Debug)]
pub struct CarRegistry {
    cars: Vec<CarRecord>,
}

impl CarRegistry {

    /// Plates must be unique keys under normalization; a colliding row is
    /// a load error, not a silent shadow.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlateScanError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut cars: Vec<CarRecord> = Vec::new();
        let mut seen = HashSet::new();
        for record in reader.deserialize() {
            let car: CarRecord = record?;
            if !seen.insert(normalize_plate(&car.car_number)) {
                return Err(PlateScanErrorKind::DuplicatePlateError(car.car_number).into());
            }
            cars.push(car);
        }
        info!("loaded {} car records from {:?}", cars.len(), path.as_ref());
        Ok(Self { cars })
    }

    /// Like `load`, but writes the default registry first when the file
    /// does not exist yet.
    pub fn load_or_seed(path: impl AsRef<Path>) -> Result<Self, PlateScanError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("registry {:?} missing, seeding defaults", path);
            let mut writer = csv::Writer::from_path(path)?;
            for (car_number, age_of_car, months_without_servicing) in SEED_CARS {
                writer.serialize(CarRecord {
                    car_number: car_number.to_string(),
                    age_of_car,
                    months_without_servicing,
                })?;
            }
            writer.flush()?;
        }
        Self::load(path)
    }

    /// Plate match, insensitive to case and whitespace on both sides.
    pub fn find(&self, plate: &str) -> Option<&CarRecord> {
        let wanted = normalize_plate(plate);
        self.cars
            .iter()
            .find(|car| normalize_plate(&car.car_number) == wanted)
    }

    pub fn cars(&self) -> &[CarRecord] {
        &self.cars
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

}

/// Canonical form used for plate comparison: whitespace stripped, uppercased.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
