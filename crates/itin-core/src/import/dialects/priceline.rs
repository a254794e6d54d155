//! Priceline car rental receipts.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::import::dialect::vendor_block;
use crate::import::parser::ParseOptions;
use crate::import::rules::amounts::parse_amount;
use crate::import::rules::dates::month_from_name;
use crate::import::rules::patterns::{
    PRICELINE_CAR_CLASS, PRICELINE_CONFIRMATION, PRICELINE_FINGERPRINT, PRICELINE_RANGE,
    PRICELINE_TOTAL, PRICELINE_TRIP_NUMBER, YEAR_20XX,
};
use crate::import::rules::time::parse_clock_12h;
use crate::import::BookingExtractor;
use crate::models::booking::{Dialect, Field, Money, ParsedCarRental};

use super::timestamp;

/// Extractor for Priceline receipts: one rental per document.
pub struct PricelineExtractor;

impl BookingExtractor for PricelineExtractor {
    type Output = ParsedCarRental;

    fn dialect(&self) -> Dialect {
        Dialect::Priceline
    }

    fn extract(&self, text: &str, options: &ParseOptions) -> Vec<ParsedCarRental> {
        let confirmation = PRICELINE_CONFIRMATION
            .captures(text)
            .or_else(|| PRICELINE_TRIP_NUMBER.captures(text))
            .map(|caps| caps[1].to_string());
        let range = extract_range(text, options);

        if confirmation.is_none() && range.is_none() {
            debug!("Priceline: no confirmation and no date range");
            return Vec::new();
        }

        let mut rental = ParsedCarRental::new(Dialect::Priceline);
        rental.company = match car_class(text) {
            Some(class) => Field::Recovered(format!("Priceline - {}", class)),
            None => Field::Defaulted("Priceline".to_string()),
        };
        // Receipts never print the rental desk in a usable form.
        rental.pickup_location = Field::Defaulted(String::new());
        rental.dropoff_location = Field::Defaulted(String::new());
        rental.confirmation_code = Field::from_option(confirmation);
        if let Some((pickup, dropoff)) = range {
            rental.pickup = pickup;
            rental.dropoff = dropoff;
        }
        let at = PRICELINE_FINGERPRINT.find(text).map_or(0, |m| m.start());
        let (block_start, block_end) = vendor_block(Dialect::Priceline, text, at);
        rental.cost = Field::from_option(
            PRICELINE_TOTAL
                .captures(&text[block_start..block_end])
                .and_then(|caps| parse_amount(&caps[1]))
                .map(Money::usd),
        );

        vec![rental]
    }
}

/// Canonical name of the first car class mentioned.
fn car_class(text: &str) -> Option<&'static str> {
    let caps = PRICELINE_CAR_CLASS.captures(text)?;
    let class = match caps[1].to_lowercase().replace('-', "").as_str() {
        "compact" => "Compact",
        "economy" => "Economy",
        "midsize" => "Midsize",
        "standard" => "Standard",
        "fullsize" => "Full-size",
        "suv" => "SUV",
        "minivan" => "Minivan",
        "luxury" => "Luxury",
        "premium" => "Premium",
        _ => return None,
    };
    Some(class)
}

/// Pickup and dropoff from `Jul 20 - Jul 24 • Pick-up: 10:00 AM`.
///
/// The year is the first bare `20xx` in the document, else the current one
/// (both timestamps then defaulted). A dropoff month before the pickup month
/// rolls over into the next year.
fn extract_range(
    text: &str,
    options: &ParseOptions,
) -> Option<(Field<NaiveDateTime>, Field<NaiveDateTime>)> {
    let caps = PRICELINE_RANGE.captures(text)?;

    let year = YEAR_20XX
        .captures(text)
        .and_then(|caps| caps[1].parse::<i32>().ok());
    let year_found = year.is_some();
    let year = year.unwrap_or_else(|| options.today.year());

    let date = |month: &str, day: &str, year: i32| {
        let month = month_from_name(month)?;
        NaiveDate::from_ymd_opt(year, month, day.parse().ok()?)
    };
    let pickup_date = date(&caps[1], &caps[2], year);
    let mut dropoff_date = date(&caps[3], &caps[4], year);
    if let (Some(pickup), Some(dropoff)) = (pickup_date, dropoff_date) {
        if dropoff < pickup {
            dropoff_date = date(&caps[3], &caps[4], year + 1);
        }
    }

    let time = parse_clock_12h(&caps[5]);
    let mut pickup = timestamp(pickup_date, time, options);
    let mut dropoff = timestamp(dropoff_date, time, options);
    if !year_found {
        debug!("Priceline: no year in document, assuming {}", year);
        pickup = demote(pickup);
        dropoff = demote(dropoff);
    }

    Some((pickup, dropoff))
}

fn demote<T>(field: Field<T>) -> Field<T> {
    match field {
        Field::Recovered(value) => Field::Defaulted(value),
        other => other,
    }
}
