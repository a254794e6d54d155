//! Preview and commit of parsed bookings.
//!
//! A preview holds the parsed records with the fields that need review; a
//! commit fills the remaining gaps with defaults and writes the records to a
//! store under one trip.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::models::booking::{
    Field, Money, ParsedCarRental, ParsedFlight, ParsedGroundTransport, ParsedLodging,
};
use crate::models::config::ItinConfig;
use crate::models::entities::{CarRental, Flight, GroundTransport, Lodging};
use crate::store::RecordStore;

use super::dialects::PLACEHOLDER_NAME;
use super::parser::{ImportParser, ParseOptions};
use super::rules::time::noon;

/// What the user says a document contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportCategory {
    Flight,
    Lodging,
    /// Bus/train legs and car rentals, detected independently.
    Transportation,
}

impl ImportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Lodging => "lodging",
            Self::Transportation => "transportation",
        }
    }
}

/// One parsed record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewRecord {
    Flight(ParsedFlight),
    Lodging(ParsedLodging),
    GroundTransport(ParsedGroundTransport),
    CarRental(ParsedCarRental),
}

impl PreviewRecord {
    /// Fields that were defaulted or not found.
    pub fn needs_review(&self) -> Vec<&'static str> {
        match self {
            Self::Flight(r) => r.needs_review(),
            Self::Lodging(r) => r.needs_review(),
            Self::GroundTransport(r) => r.needs_review(),
            Self::CarRental(r) => r.needs_review(),
        }
    }
}

/// A record in a preview, with its review flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub record: PreviewRecord,
    pub needs_review: Vec<String>,
}

impl PreviewItem {
    pub fn new(record: PreviewRecord) -> Self {
        let needs_review = record
            .needs_review()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            record,
            needs_review,
        }
    }
}

/// Parsed records of one document, before anything is stored.
///
/// The raw text is kept so an empty preview can still be shown for manual
/// transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub category: ImportCategory,
    pub items: Vec<PreviewItem>,
    pub raw_text: String,
}

impl ImportPreview {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items with at least one flagged field.
    pub fn items_needing_review(&self) -> impl Iterator<Item = &PreviewItem> {
        self.items.iter().filter(|item| !item.needs_review.is_empty())
    }
}

/// Records written by a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub trip_id: String,
    pub flights: Vec<String>,
    pub lodging: Vec<String>,
    pub ground_transport: Vec<String>,
    pub car_rentals: Vec<String>,
}

impl ImportSummary {
    /// Number of records created.
    pub fn total(&self) -> usize {
        self.flights.len() + self.lodging.len() + self.ground_transport.len() + self.car_rentals.len()
    }
}

/// Runs detection and extraction, then persists accepted records.
#[derive(Debug, Clone, Default)]
pub struct ImportOrchestrator {
    parser: ImportParser,
}

impl ImportOrchestrator {
    pub fn new(parser: ImportParser) -> Self {
        Self { parser }
    }

    pub fn from_config(config: &ItinConfig) -> Self {
        Self::new(ImportParser::from_config(&config.import))
    }

    pub fn parser(&self) -> &ImportParser {
        &self.parser
    }

    /// Parse `text` as the given category.
    pub fn preview(&self, category: ImportCategory, text: &str) -> ImportPreview {
        let records: Vec<PreviewRecord> = match category {
            ImportCategory::Flight => self
                .parser
                .parse_flights(text)
                .into_iter()
                .map(PreviewRecord::Flight)
                .collect(),
            ImportCategory::Lodging => self
                .parser
                .parse_lodging(text)
                .into_iter()
                .map(PreviewRecord::Lodging)
                .collect(),
            ImportCategory::Transportation => {
                let found = self.parser.parse_transportation(text);
                found
                    .ground_transport
                    .into_iter()
                    .map(PreviewRecord::GroundTransport)
                    .chain(found.car_rentals.into_iter().map(PreviewRecord::CarRental))
                    .collect()
            }
        };

        let preview = ImportPreview {
            category,
            items: records.into_iter().map(PreviewItem::new).collect(),
            raw_text: text.to_string(),
        };
        info!(
            "Import preview ({}): {} record(s), {} need review",
            category.as_str(),
            preview.len(),
            preview.items_needing_review().count()
        );
        preview
    }

    /// Store every previewed record under `trip_id`, filling defaults for
    /// required fields that are still missing.
    pub fn commit<S: RecordStore>(
        &self,
        preview: &ImportPreview,
        trip_id: &str,
        store: &mut S,
    ) -> Result<ImportSummary> {
        let trip_id = trip_id.trim();
        if trip_id.is_empty() {
            return Err(ImportError::MissingTripId.into());
        }
        if preview.is_empty() {
            return Err(ImportError::NoRecords.into());
        }

        let options = self.parser.options();
        let mut summary = ImportSummary {
            trip_id: trip_id.to_string(),
            ..ImportSummary::default()
        };

        for item in &preview.items {
            match &item.record {
                PreviewRecord::Flight(parsed) => {
                    let created = store.create(flight_entity(parsed, trip_id, options))?;
                    summary.flights.push(created.id);
                }
                PreviewRecord::Lodging(parsed) => {
                    let created = store.create(lodging_entity(parsed, trip_id, options))?;
                    summary.lodging.push(created.id);
                }
                PreviewRecord::GroundTransport(parsed) => {
                    let created = store.create(ground_entity(parsed, trip_id, options))?;
                    summary.ground_transport.push(created.id);
                }
                PreviewRecord::CarRental(parsed) => {
                    let created = store.create(car_entity(parsed, trip_id, options))?;
                    summary.car_rentals.push(created.id);
                }
            }
        }

        info!("Imported {} record(s) into trip {}", summary.total(), trip_id);
        Ok(summary)
    }
}

fn value_or_empty(field: &Field<String>) -> String {
    field.value().cloned().unwrap_or_default()
}

fn cost_or_zero(field: &Field<Money>, options: &ParseOptions) -> (Decimal, String) {
    match field.value() {
        Some(money) => (money.amount, money.currency.clone()),
        None => (Decimal::ZERO, options.default_currency.clone()),
    }
}

/// Start of a booking: the parsed value, else today at noon.
fn start(field: &Field<NaiveDateTime>, options: &ParseOptions) -> NaiveDateTime {
    field
        .value()
        .copied()
        .unwrap_or_else(|| options.today.and_time(noon()))
}

/// End of a booking: the parsed value, else the start.
fn end(field: &Field<NaiveDateTime>, start: NaiveDateTime) -> NaiveDateTime {
    field.value().copied().unwrap_or(start)
}

fn flight_entity(parsed: &ParsedFlight, trip_id: &str, options: &ParseOptions) -> Flight {
    let departure = start(&parsed.departure, options);
    let (cost, currency) = cost_or_zero(&parsed.cost, options);
    Flight {
        id: String::new(),
        trip_id: trip_id.to_string(),
        airline: value_or_empty(&parsed.airline),
        flight_number: value_or_empty(&parsed.flight_number),
        origin: value_or_empty(&parsed.origin),
        destination: value_or_empty(&parsed.destination),
        departure,
        arrival: end(&parsed.arrival, departure),
        confirmation_code: value_or_empty(&parsed.confirmation_code),
        cost,
        currency,
    }
}

fn lodging_entity(parsed: &ParsedLodging, trip_id: &str, options: &ParseOptions) -> Lodging {
    let check_in = parsed
        .check_in
        .value()
        .copied()
        .unwrap_or_else(|| options.today.and_time(options.check_in_time));
    let check_out = parsed.check_out.value().copied().unwrap_or_else(|| {
        debug!("No check-out date, assuming one night");
        let next_day = check_in.date().succ_opt().unwrap_or(check_in.date());
        next_day.and_time(options.check_out_time)
    });
    let (cost, currency) = cost_or_zero(&parsed.cost, options);

    let name = value_or_empty(&parsed.name);
    Lodging {
        id: String::new(),
        trip_id: trip_id.to_string(),
        name: if name.is_empty() { PLACEHOLDER_NAME.to_string() } else { name },
        address: value_or_empty(&parsed.address),
        check_in,
        check_out,
        confirmation_code: value_or_empty(&parsed.confirmation_code),
        cost,
        currency,
    }
}

fn ground_entity(
    parsed: &ParsedGroundTransport,
    trip_id: &str,
    options: &ParseOptions,
) -> GroundTransport {
    let departure = start(&parsed.departure, options);
    let (cost, currency) = cost_or_zero(&parsed.cost, options);
    GroundTransport {
        id: String::new(),
        trip_id: trip_id.to_string(),
        mode: parsed.mode,
        operator: value_or_empty(&parsed.operator),
        service_number: value_or_empty(&parsed.service_number),
        origin: value_or_empty(&parsed.origin),
        destination: value_or_empty(&parsed.destination),
        departure,
        arrival: end(&parsed.arrival, departure),
        confirmation_code: value_or_empty(&parsed.confirmation_code),
        seat: parsed.seat.value().cloned(),
        cost,
        currency,
    }
}

fn car_entity(parsed: &ParsedCarRental, trip_id: &str, options: &ParseOptions) -> CarRental {
    let pickup = start(&parsed.pickup, options);
    let (cost, currency) = cost_or_zero(&parsed.cost, options);
    CarRental {
        id: String::new(),
        trip_id: trip_id.to_string(),
        company: value_or_empty(&parsed.company),
        pickup_location: value_or_empty(&parsed.pickup_location),
        dropoff_location: value_or_empty(&parsed.dropoff_location),
        pickup,
        dropoff: end(&parsed.dropoff, pickup),
        confirmation_code: value_or_empty(&parsed.confirmation_code),
        cost,
        currency,
    }
}
