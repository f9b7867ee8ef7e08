//! Store records and the registration input that creates them.

use serde::{Deserialize, Serialize};

use crate::location::Coordinates;
use crate::CoreError;

/// A registered physical store.
///
/// Records are immutable once stored; `id` is assigned by the repository and
/// grows monotonically with insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: i64,
    pub name: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StoreRecord {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Input for registering a store: every [`StoreRecord`] field except `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    #[serde(alias = "cep")]
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewStore {
    /// Returns a copy with surrounding whitespace trimmed from every text field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            street: self.street.trim().to_owned(),
            number: self.number.trim().to_owned(),
            neighborhood: self.neighborhood.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Checks the record invariants: every text field is non-blank and the
    /// coordinates lie within Earth's latitude/longitude ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let text_fields: [(&'static str, &str); 7] = [
            ("name", &self.name),
            ("street", &self.street),
            ("number", &self.number),
            ("neighborhood", &self.neighborhood),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(CoreError::Validation {
                    field,
                    reason: "must not be empty".to_owned(),
                });
            }
        }

        check_range("latitude", self.latitude, 90.0)?;
        check_range("longitude", self.longitude, 180.0)?;
        Ok(())
    }

    /// Attaches a repository-assigned id, producing the stored record.
    #[must_use]
    pub fn into_record(self, id: i64) -> StoreRecord {
        StoreRecord {
            id,
            name: self.name,
            street: self.street,
            number: self.number,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), CoreError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation {
            field,
            reason: format!("must be between -{limit} and {limit} degrees, got {value}"),
        })
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
