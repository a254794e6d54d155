//! Partial booking records recovered from confirmation text.
//!
//! Every field is a [`Field`], so a preview can tell a value that was read
//! from the document apart from one that was filled in by a default.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    /// Read from the source text.
    Recovered(T),
    /// Synthesized by a documented default (today, empty string, 15:00...).
    Defaulted(T),
    /// Nothing was recovered and no default applies.
    Absent,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    /// Wrap an optional recovered value.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Recovered(v),
            None => Self::Absent,
        }
    }

    /// The value, whether recovered or defaulted.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Recovered(v) | Self::Defaulted(v) => Some(v),
            Self::Absent => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Recovered(v) | Self::Defaulted(v) => Some(v),
            Self::Absent => None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when the value was not read from the document.
    pub fn needs_review(&self) -> bool {
        !self.is_recovered()
    }

    /// Set a recovered value only if nothing is set yet.
    pub fn fill(&mut self, value: Option<T>) {
        if self.is_absent() {
            if let Some(v) = value {
                *self = Self::Recovered(v);
            }
        }
    }

    /// Replace `Absent` with a defaulted value.
    pub fn or_defaulted(self, value: T) -> Self {
        match self {
            Self::Absent => Self::Defaulted(value),
            other => other,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Recovered(v) => Field::Recovered(f(v)),
            Self::Defaulted(v) => Field::Defaulted(f(v)),
            Self::Absent => Field::Absent,
        }
    }
}

/// Monetary amount with an ISO currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, "USD")
    }
}

/// Vendor layout a record was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    United,
    Swiss,
    FlixBus,
    Priceline,
    BookingCom,
}

impl Dialect {
    /// Human-readable vendor name.
    pub fn vendor(&self) -> &'static str {
        match self {
            Self::United => "United Airlines",
            Self::Swiss => "SWISS",
            Self::FlixBus => "FlixBus",
            Self::Priceline => "Priceline",
            Self::BookingCom => "Booking.com",
        }
    }
}

/// Ground transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Train,
    Bus,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Bus => "bus",
        }
    }
}

/// A flight segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFlight {
    pub dialect: Dialect,
    pub airline: Field<String>,
    pub flight_number: Field<String>,
    /// Airport code or city name, depending on the vendor.
    pub origin: Field<String>,
    pub destination: Field<String>,
    pub departure: Field<NaiveDateTime>,
    pub arrival: Field<NaiveDateTime>,
    pub confirmation_code: Field<String>,
    pub cost: Field<Money>,
}

impl ParsedFlight {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            airline: Field::Absent,
            flight_number: Field::Absent,
            origin: Field::Absent,
            destination: Field::Absent,
            departure: Field::Absent,
            arrival: Field::Absent,
            confirmation_code: Field::Absent,
            cost: Field::Absent,
        }
    }

    /// Names of fields the user should double-check before saving.
    pub fn needs_review(&self) -> Vec<&'static str> {
        flagged(&[
            ("airline", self.airline.needs_review()),
            ("flight_number", self.flight_number.needs_review()),
            ("origin", self.origin.needs_review()),
            ("destination", self.destination.needs_review()),
            ("departure", self.departure.needs_review()),
            ("arrival", self.arrival.needs_review()),
            ("confirmation_code", self.confirmation_code.needs_review()),
            ("cost", self.cost.needs_review()),
        ])
    }
}

/// A train or bus leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedGroundTransport {
    pub dialect: Dialect,
    pub mode: TransportMode,
    pub operator: Field<String>,
    /// Line or train number; may be an empty default.
    pub service_number: Field<String>,
    pub origin: Field<String>,
    pub destination: Field<String>,
    pub departure: Field<NaiveDateTime>,
    pub arrival: Field<NaiveDateTime>,
    pub confirmation_code: Field<String>,
    pub seat: Field<String>,
    pub cost: Field<Money>,
}

impl ParsedGroundTransport {
    pub fn new(dialect: Dialect, mode: TransportMode) -> Self {
        Self {
            dialect,
            mode,
            operator: Field::Absent,
            service_number: Field::Absent,
            origin: Field::Absent,
            destination: Field::Absent,
            departure: Field::Absent,
            arrival: Field::Absent,
            confirmation_code: Field::Absent,
            seat: Field::Absent,
            cost: Field::Absent,
        }
    }

    /// Seat is optional and never flagged.
    pub fn needs_review(&self) -> Vec<&'static str> {
        flagged(&[
            ("operator", self.operator.needs_review()),
            ("service_number", self.service_number.needs_review()),
            ("origin", self.origin.needs_review()),
            ("destination", self.destination.needs_review()),
            ("departure", self.departure.needs_review()),
            ("arrival", self.arrival.needs_review()),
            ("confirmation_code", self.confirmation_code.needs_review()),
            ("cost", self.cost.needs_review()),
        ])
    }
}

/// A car rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCarRental {
    pub dialect: Dialect,
    pub company: Field<String>,
    pub pickup_location: Field<String>,
    pub dropoff_location: Field<String>,
    pub pickup: Field<NaiveDateTime>,
    pub dropoff: Field<NaiveDateTime>,
    pub confirmation_code: Field<String>,
    pub cost: Field<Money>,
}

impl ParsedCarRental {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            company: Field::Absent,
            pickup_location: Field::Absent,
            dropoff_location: Field::Absent,
            pickup: Field::Absent,
            dropoff: Field::Absent,
            confirmation_code: Field::Absent,
            cost: Field::Absent,
        }
    }

    pub fn needs_review(&self) -> Vec<&'static str> {
        flagged(&[
            ("company", self.company.needs_review()),
            ("pickup_location", self.pickup_location.needs_review()),
            ("dropoff_location", self.dropoff_location.needs_review()),
            ("pickup", self.pickup.needs_review()),
            ("dropoff", self.dropoff.needs_review()),
            ("confirmation_code", self.confirmation_code.needs_review()),
            ("cost", self.cost.needs_review()),
        ])
    }
}

/// A lodging stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLodging {
    pub dialect: Dialect,
    pub name: Field<String>,
    pub address: Field<String>,
    pub check_in: Field<NaiveDateTime>,
    pub check_out: Field<NaiveDateTime>,
    pub confirmation_code: Field<String>,
    pub cost: Field<Money>,
}

impl ParsedLodging {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            name: Field::Absent,
            address: Field::Absent,
            check_in: Field::Absent,
            check_out: Field::Absent,
            confirmation_code: Field::Absent,
            cost: Field::Absent,
        }
    }

    pub fn needs_review(&self) -> Vec<&'static str> {
        flagged(&[
            ("name", self.name.needs_review()),
            ("address", self.address.needs_review()),
            ("check_in", self.check_in.needs_review()),
            ("check_out", self.check_out.needs_review()),
            ("confirmation_code", self.confirmation_code.needs_review()),
            ("cost", self.cost.needs_review()),
        ])
    }
}

fn flagged(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, flag)| *flag)
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_field_fill_keeps_first_value() {
        let mut field = Field::Absent;
        field.fill(Some("first".to_string()));
        field.fill(Some("second".to_string()));
        assert_eq!(field, Field::Recovered("first".to_string()));

        let mut untouched: Field<String> = Field::Absent;
        untouched.fill(None);
        assert!(untouched.is_absent());
    }

    #[test]
    fn test_field_or_defaulted() {
        let absent: Field<u32> = Field::Absent;
        assert_eq!(absent.or_defaulted(3), Field::Defaulted(3));
        assert_eq!(Field::Recovered(1).or_defaulted(3), Field::Recovered(1));
    }

    #[test]
    fn test_field_serialization_is_tagged() {
        let departure = NaiveDate::from_ymd_opt(2026, 6, 30)
            .unwrap()
            .and_hms_opt(12, 5, 0)
            .unwrap();
        let json = serde_json::to_value(Field::Recovered(departure)).unwrap();
        assert_eq!(json["status"], "recovered");
        assert_eq!(json["value"], "2026-06-30T12:05:00");

        let json = serde_json::to_value(Field::<String>::Absent).unwrap();
        assert_eq!(json["status"], "absent");
    }

    #[test]
    fn test_needs_review_lists_unrecovered_fields() {
        let mut lodging = ParsedLodging::new(Dialect::BookingCom);
        lodging.name = Field::Recovered("Hotel Alpina".to_string());
        lodging.cost = Field::Defaulted(Money::usd(Decimal::ZERO));

        let flagged = lodging.needs_review();
        assert!(!flagged.contains(&"name"));
        assert!(flagged.contains(&"cost"));
        assert!(flagged.contains(&"check_in"));
    }
}
