//! Booking confirmation import: dialect detection, extraction, and the
//! preview/commit flow built on top of it.

mod dialect;
pub mod dialects;
mod orchestrator;
mod parser;
pub mod rules;

pub use dialect::{detect, fingerprint_matches, BookingCategory};
pub use orchestrator::{
    ImportCategory, ImportOrchestrator, ImportPreview, ImportSummary, PreviewItem, PreviewRecord,
};
pub use parser::{ImportParser, ParseOptions, TransportationImport};

use crate::models::booking::{
    Dialect, ParsedCarRental, ParsedFlight, ParsedGroundTransport, ParsedLodging,
};

/// Trait for a vendor-specific extractor.
///
/// Extractors are pure: the same text and options always give the same
/// records, and an unreadable document gives an empty list.
pub trait BookingExtractor {
    /// The record type this extractor produces.
    type Output;

    /// Vendor layout this extractor understands.
    fn dialect(&self) -> Dialect;

    /// Extract every record found in `text`.
    fn extract(&self, text: &str, options: &ParseOptions) -> Vec<Self::Output>;
}

/// Parse flight segments with default options.
pub fn parse_flight_text(text: &str) -> Vec<ParsedFlight> {
    ImportParser::default().parse_flights(text)
}

/// Parse a train or bus leg with default options.
pub fn parse_ground_transport_text(text: &str) -> Vec<ParsedGroundTransport> {
    ImportParser::default().parse_ground_transport(text)
}

/// Parse a car rental with default options.
pub fn parse_car_rental_text(text: &str) -> Vec<ParsedCarRental> {
    ImportParser::default().parse_car_rentals(text)
}

/// Parse a lodging stay with default options.
pub fn parse_lodging_text(text: &str) -> Vec<ParsedLodging> {
    ImportParser::default().parse_lodging(text)
}

/// Run both ground transport and car rental extraction on one document.
pub fn parse_transportation_text(text: &str) -> TransportationImport {
    ImportParser::default().parse_transportation(text)
}
