//! Dispatch from a booking category to the matching vendor extractor.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::booking::{
    Dialect, ParsedCarRental, ParsedFlight, ParsedGroundTransport, ParsedLodging,
};
use crate::models::config::ImportConfig;

use super::dialect::{detect, BookingCategory};
use super::dialects::{
    BookingComExtractor, FlixBusExtractor, PricelineExtractor, SwissExtractor, UnitedExtractor,
};
use super::rules::time::parse_clock_24h;
use super::BookingExtractor;

/// Defaults extractors fall back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Date used when a date is unreadable or a year is missing.
    pub today: NaiveDate,
    /// Currency assumed when a document states none.
    pub default_currency: String,
    /// Lodging check-in time.
    pub check_in_time: NaiveTime,
    /// Lodging check-out time.
    pub check_out_time: NaiveTime,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            today: Local::now().date_naive(),
            default_currency: "USD".to_string(),
            check_in_time: NaiveTime::MIN + chrono::Duration::hours(15),
            check_out_time: NaiveTime::MIN + chrono::Duration::hours(11),
        }
    }
}

/// Records from the combined transportation import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportationImport {
    pub ground_transport: Vec<ParsedGroundTransport>,
    pub car_rentals: Vec<ParsedCarRental>,
}

impl TransportationImport {
    pub fn is_empty(&self) -> bool {
        self.ground_transport.is_empty() && self.car_rentals.is_empty()
    }
}

/// Entry point for parsing confirmation text.
#[derive(Debug, Clone, Default)]
pub struct ImportParser {
    options: ParseOptions,
}

impl ImportParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from the import section of the configuration.
    pub fn from_config(config: &ImportConfig) -> Self {
        let defaults = ParseOptions::default();
        let check_in_time = parse_clock_24h(&config.check_in_time).unwrap_or_else(|| {
            warn!("Invalid check_in_time {:?}, using 15:00", config.check_in_time);
            defaults.check_in_time
        });
        let check_out_time = parse_clock_24h(&config.check_out_time).unwrap_or_else(|| {
            warn!("Invalid check_out_time {:?}, using 11:00", config.check_out_time);
            defaults.check_out_time
        });

        Self {
            options: ParseOptions {
                default_currency: config.default_currency.clone(),
                check_in_time,
                check_out_time,
                ..defaults
            },
        }
    }

    /// Set the date used for defaults.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.options.today = today;
        self
    }

    /// Set the default currency.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.options.default_currency = currency.into();
        self
    }

    /// Set the lodging check-in and check-out times.
    pub fn with_lodging_times(mut self, check_in: NaiveTime, check_out: NaiveTime) -> Self {
        self.options.check_in_time = check_in;
        self.options.check_out_time = check_out;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse_flights(&self, text: &str) -> Vec<ParsedFlight> {
        let flights = match detect(BookingCategory::Flight, text) {
            Some(Dialect::United) => UnitedExtractor.extract(text, &self.options),
            Some(Dialect::Swiss) => SwissExtractor.extract(text, &self.options),
            _ => Vec::new(),
        };

        info!("Parsed {} flight(s) from {} characters", flights.len(), text.len());
        flights
    }

    pub fn parse_ground_transport(&self, text: &str) -> Vec<ParsedGroundTransport> {
        let legs = match detect(BookingCategory::GroundTransport, text) {
            Some(Dialect::FlixBus) => FlixBusExtractor.extract(text, &self.options),
            _ => Vec::new(),
        };

        info!("Parsed {} ground transport leg(s) from {} characters", legs.len(), text.len());
        legs
    }

    pub fn parse_car_rentals(&self, text: &str) -> Vec<ParsedCarRental> {
        let rentals = match detect(BookingCategory::CarRental, text) {
            Some(Dialect::Priceline) => PricelineExtractor.extract(text, &self.options),
            _ => Vec::new(),
        };

        info!("Parsed {} car rental(s) from {} characters", rentals.len(), text.len());
        rentals
    }

    pub fn parse_lodging(&self, text: &str) -> Vec<ParsedLodging> {
        let stays = match detect(BookingCategory::Lodging, text) {
            Some(Dialect::BookingCom) => BookingComExtractor.extract(text, &self.options),
            _ => Vec::new(),
        };

        info!("Parsed {} lodging stay(s) from {} characters", stays.len(), text.len());
        stays
    }

    /// Ground transport and car rental are independent dialects; both run on
    /// the same text and their results are kept side by side.
    pub fn parse_transportation(&self, text: &str) -> TransportationImport {
        TransportationImport {
            ground_transport: self.parse_ground_transport(text),
            car_rentals: self.parse_car_rentals(text),
        }
    }
}
