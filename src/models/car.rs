use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored car record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i64,
}

/// The mutable part of a car, as submitted by clients and stored as the
/// record's document. Missing fields take their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarFields {
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl Car {
    pub fn new(id: Uuid, fields: CarFields) -> Self {
        Self {
            id,
            make: fields.make,
            model: fields.model,
            year: fields.year,
        }
    }

    /// Assigns a fresh identifier to the submitted fields.
    pub fn create(fields: CarFields) -> Self {
        Self::new(Uuid::new_v4(), fields)
    }

    pub fn fields(&self) -> CarFields {
        CarFields {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
        }
    }
}

/// Parses a path identifier, returning `None` for anything that is not a UUID.
pub fn parse_car_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
