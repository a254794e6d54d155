//! Persisted trip entities.
//!
//! Unlike the parsed records these have every required field filled in.
//! An empty `id` means the record has not been created yet.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::booking::TransportMode;
use crate::store::Entity;

/// A trip, the parent of every other entity except preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(default)]
    pub id: String,
    pub trip_id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub confirmation_code: String,
    pub cost: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lodging {
    #[serde(default)]
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub address: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub confirmation_code: String,
    pub cost: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRental {
    #[serde(default)]
    pub id: String,
    pub trip_id: String,
    pub company: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
    pub confirmation_code: String,
    pub cost: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTransport {
    #[serde(default)]
    pub id: String,
    pub trip_id: String,
    pub mode: TransportMode,
    pub operator: String,
    pub service_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub confirmation_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    pub cost: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excursion {
    #[serde(default)]
    pub id: String,
    pub trip_id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub start: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    pub cost: Decimal,
    pub currency: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    pub trip_id: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

/// User preferences; a single record with id `"default"` exists from the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub id: String,
    pub home_currency: String,
    pub use_24h_clock: bool,
    pub date_format: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            home_currency: "USD".to_string(),
            use_24h_clock: true,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Entity for Trip {
    const COLLECTION: &'static str = "trips";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Flight {
    const COLLECTION: &'static str = "flights";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn trip_id(&self) -> Option<&str> {
        Some(&self.trip_id)
    }
}

impl Entity for Lodging {
    const COLLECTION: &'static str = "lodging";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn trip_id(&self) -> Option<&str> {
        Some(&self.trip_id)
    }
}

impl Entity for CarRental {
    const COLLECTION: &'static str = "car_rentals";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn trip_id(&self) -> Option<&str> {
        Some(&self.trip_id)
    }
}

impl Entity for GroundTransport {
    const COLLECTION: &'static str = "ground_transport";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn trip_id(&self) -> Option<&str> {
        Some(&self.trip_id)
    }
}

impl Entity for Excursion {
    const COLLECTION: &'static str = "excursions";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn trip_id(&self) -> Option<&str> {
        Some(&self.trip_id)
    }
}

impl Entity for Expense {
    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn trip_id(&self) -> Option<&str> {
        Some(&self.trip_id)
    }
}

impl Entity for Preferences {
    const COLLECTION: &'static str = "preferences";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
