//! Core library for importing travel bookings.
//!
//! This crate provides:
//! - Booking confirmation extraction (United, SWISS, FlixBus, Priceline,
//!   Booking.com) into partially-filled records
//! - An import orchestrator that previews parsed records and commits them
//! - A JSON record store for trips and their bookings
//! - PDF text extraction (native builds)

pub mod error;
pub mod import;
pub mod models;
#[cfg(feature = "native")]
pub mod pdf;
pub mod store;

pub use error::{ImportError, ItinError, PdfError, Result, StoreError};
pub use import::{
    parse_car_rental_text, parse_flight_text, parse_ground_transport_text, parse_lodging_text,
    parse_transportation_text, BookingExtractor, ImportCategory, ImportOrchestrator, ImportParser,
    ImportPreview, ImportSummary, ParseOptions, PreviewItem, PreviewRecord, TransportationImport,
};
pub use models::booking::{
    Dialect, Field, Money, ParsedCarRental, ParsedFlight, ParsedGroundTransport, ParsedLodging,
    TransportMode,
};
pub use models::config::ItinConfig;
#[cfg(feature = "native")]
pub use pdf::{extract_text_from_document, PdfExtractor, PdfProcessor, PdfType};
pub use store::{Entity, JsonStore, RecordStore};
