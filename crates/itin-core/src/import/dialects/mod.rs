//! Vendor-specific extractors.

mod booking_com;
mod flixbus;
mod priceline;
mod swiss;
mod united;

pub use booking_com::{BookingComExtractor, PLACEHOLDER_NAME};
pub use flixbus::FlixBusExtractor;
pub use priceline::PricelineExtractor;
pub use swiss::SwissExtractor;
pub use united::UnitedExtractor;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Captures;
use tracing::debug;

use crate::models::booking::Field;

use super::parser::ParseOptions;
use super::rules::amounts::currency_from_symbol;
use super::rules::time::noon;

/// Combine a date and a clock time into a timestamp.
///
/// Either part failing to parse keeps the record alive with today's date or
/// noon, flagged as defaulted.
pub(crate) fn timestamp(
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    options: &ParseOptions,
) -> Field<NaiveDateTime> {
    match (date, time) {
        (Some(date), Some(time)) => Field::Recovered(date.and_time(time)),
        (date, time) => {
            debug!("Defaulting unreadable timestamp (date {:?}, time {:?})", date, time);
            Field::Defaulted(date.unwrap_or(options.today).and_time(time.unwrap_or_else(noon)))
        }
    }
}

/// Byte span of the whole match.
pub(crate) fn span(caps: &Captures<'_>) -> (usize, usize) {
    caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default()
}

/// First capture group that participated in the match.
pub(crate) fn first_group<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

/// First currency symbol or code mentioned in `text`.
pub(crate) fn detect_currency(text: &str) -> Option<&'static str> {
    const MARKERS: [&str; 8] = ["US$", "USD", "$", "EUR", "€", "GBP", "£", "CHF"];

    MARKERS
        .iter()
        .filter_map(|marker| text.find(marker).map(|pos| (pos, *marker)))
        .min_by_key(|(pos, _)| *pos)
        .and_then(|(_, marker)| currency_from_symbol(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_defaults_missing_parts() {
        let options = ParseOptions {
            today: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            ..ParseOptions::default()
        };
        let date = NaiveDate::from_ymd_opt(2026, 7, 20);
        let time = NaiveTime::from_hms_opt(8, 15, 0);

        assert_eq!(
            timestamp(date, time, &options),
            Field::Recovered(date.unwrap().and_time(time.unwrap()))
        );
        assert_eq!(
            timestamp(None, time, &options),
            Field::Defaulted(options.today.and_time(time.unwrap()))
        );
        assert_eq!(
            timestamp(date, None, &options),
            Field::Defaulted(date.unwrap().and_time(noon()))
        );
    }

    #[test]
    fn test_detect_currency() {
        assert_eq!(detect_currency("Total 25.98 $"), Some("USD"));
        assert_eq!(detect_currency("€ 12 incl. US$ fees"), Some("EUR"));
        assert_eq!(detect_currency("Total 25.98"), None);
    }
}
