//! WASM bindings for booking confirmation parsing.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Every parse function takes plain text (pasted, or extracted from a PDF on
//! the JavaScript side) and returns plain JS objects.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use itin_core::import::rules::normalize_12h_to_24h;
use itin_core::{ImportCategory, ImportOrchestrator, ImportParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Flight segments found in `text`.
#[wasm_bindgen(js_name = parseFlightText)]
pub fn parse_flight_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&itin_core::parse_flight_text(text))
}

/// Hotel stays found in `text`.
#[wasm_bindgen(js_name = parseLodgingText)]
pub fn parse_lodging_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&itin_core::parse_lodging_text(text))
}

/// Bus and train legs found in `text`.
#[wasm_bindgen(js_name = parseGroundTransportText)]
pub fn parse_ground_transport_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&itin_core::parse_ground_transport_text(text))
}

/// Car rentals found in `text`.
#[wasm_bindgen(js_name = parseCarRentalText)]
pub fn parse_car_rental_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&itin_core::parse_car_rental_text(text))
}

/// Ground transport and car rentals, as `{ ground_transport, car_rentals }`.
#[wasm_bindgen(js_name = parseTransportationText)]
pub fn parse_transportation_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&itin_core::parse_transportation_text(text))
}

/// Convert "9:05 pm" to "21:05"; unreadable input gives "12:00".
#[wasm_bindgen(js_name = normalizeTime)]
pub fn normalize_time(input: &str) -> String {
    normalize_12h_to_24h(input)
}

fn parse_category(category: &str) -> Result<ImportCategory, String> {
    match category.trim().to_lowercase().as_str() {
        "flight" | "flights" => Ok(ImportCategory::Flight),
        "lodging" | "hotel" => Ok(ImportCategory::Lodging),
        "transportation" | "ground" | "car" => Ok(ImportCategory::Transportation),
        other => Err(format!("Unknown import category: {}", other)),
    }
}

/// Import previewer with configurable defaults.
#[wasm_bindgen]
pub struct BookingImporter {
    orchestrator: ImportOrchestrator,
}

#[wasm_bindgen]
impl BookingImporter {
    /// Create an importer with default options.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            orchestrator: ImportOrchestrator::default(),
        }
    }

    /// Set the currency assumed when a document states none.
    #[wasm_bindgen(js_name = setDefaultCurrency)]
    pub fn set_default_currency(&mut self, currency: &str) {
        let parser = self.orchestrator.parser().clone().with_default_currency(currency);
        self.orchestrator = ImportOrchestrator::new(parser);
    }

    /// Set the reference date ("YYYY-MM-DD") used for missing years and
    /// unreadable dates.
    #[wasm_bindgen(js_name = setToday)]
    pub fn set_today(&mut self, today: &str) -> Result<(), JsValue> {
        let date = NaiveDate::parse_from_str(today, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("Invalid date {}: {}", today, e)))?;
        let parser: ImportParser = self.orchestrator.parser().clone().with_today(date);
        self.orchestrator = ImportOrchestrator::new(parser);
        Ok(())
    }

    /// Parse `text` as "flight", "lodging" or "transportation".
    ///
    /// Returns `{ category, items: [{ record, needs_review }], raw_text }`;
    /// empty `items` means the booking has to be entered by hand.
    #[wasm_bindgen]
    pub fn preview(&self, category: &str, text: &str) -> Result<JsValue, JsValue> {
        let category = parse_category(category).map_err(|e| JsValue::from_str(&e))?;
        to_js(&self.orchestrator.preview(category, text))
    }
}

impl Default for BookingImporter {
    fn default() -> Self {
        Self::new()
    }
}
