//! United Airlines itineraries.
//!
//! Each segment starts with a `Flight 1 of 2 UA924` line, followed by a
//! line with the two dates, a line with the two clock times, and a line with
//! the two parenthesized airport codes.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::import::parser::ParseOptions;
use crate::import::rules::amounts::{parse_amount, split_evenly};
use crate::import::rules::dates::month_from_name;
use crate::import::rules::patterns::{
    AIRPORT_CODE_PAREN, CONFIRMATION_LABEL_LINE, TIME_12H, UNITED_CONFIRMATION, UNITED_DATE,
    UNITED_SEGMENT, UNITED_TOTAL,
};
use crate::import::rules::time::parse_clock_12h;
use crate::import::BookingExtractor;
use crate::models::booking::{Dialect, Field, Money, ParsedFlight};

use super::timestamp;

/// Extractor for United-style itineraries.
pub struct UnitedExtractor;

/// Route and times of one segment.
struct Segment {
    origin: String,
    destination: String,
    departure: Field<NaiveDateTime>,
    arrival: Field<NaiveDateTime>,
}

impl BookingExtractor for UnitedExtractor {
    type Output = ParsedFlight;

    fn dialect(&self) -> Dialect {
        Dialect::United
    }

    fn extract(&self, text: &str, options: &ParseOptions) -> Vec<ParsedFlight> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let mut flights = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(caps) = UNITED_SEGMENT.captures(line) else {
                continue;
            };
            let carrier = &caps[3];
            let flight_number = format!("{}{}", carrier, &caps[4]);

            let following: Vec<&str> = lines[i + 1..]
                .iter()
                .copied()
                .filter(|l| !l.is_empty())
                .take(3)
                .collect();

            let Some(segment) = parse_segment(&following, options) else {
                debug!("Dropping incomplete segment {}", flight_number);
                continue;
            };

            let mut flight = ParsedFlight::new(Dialect::United);
            flight.airline = Field::Recovered(airline_name(carrier));
            flight.flight_number = Field::Recovered(flight_number);
            flight.origin = Field::Recovered(segment.origin);
            flight.destination = Field::Recovered(segment.destination);
            flight.departure = segment.departure;
            flight.arrival = segment.arrival;
            flights.push(flight);
        }

        if flights.is_empty() {
            return flights;
        }

        let confirmation = extract_confirmation(text);
        for flight in &mut flights {
            flight.confirmation_code = Field::from_option(confirmation.clone());
        }

        if let Some(total) = extract_total(text) {
            let shares = split_evenly(total, flights.len());
            for (flight, share) in flights.iter_mut().zip(shares) {
                flight.cost = Field::Recovered(Money::usd(share));
            }
        }

        debug!("United: {} segment(s)", flights.len());
        flights
    }
}

fn airline_name(carrier: &str) -> String {
    match carrier {
        "UA" => "United Airlines".to_string(),
        other => other.to_string(),
    }
}

/// Parse the dates, times and airports lines; all three must hold two
/// values or the segment is dropped.
fn parse_segment(lines: &[&str], options: &ParseOptions) -> Option<Segment> {
    let [dates_line, times_line, airports_line] = lines else {
        return None;
    };

    let dates: Vec<Option<NaiveDate>> = UNITED_DATE
        .captures_iter(dates_line)
        .map(|caps| {
            let month = month_from_name(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            let year: i32 = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .collect();
    let times: Vec<&str> = TIME_12H.find_iter(times_line).map(|m| m.as_str()).collect();
    let codes: Vec<&str> = AIRPORT_CODE_PAREN
        .captures_iter(airports_line)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if dates.len() < 2 || times.len() < 2 || codes.len() < 2 {
        return None;
    }

    Some(Segment {
        origin: codes[0].to_string(),
        destination: codes[1].to_string(),
        departure: timestamp(dates[0], parse_clock_12h(times[0]), options),
        arrival: timestamp(dates[1], parse_clock_12h(times[1]), options),
    })
}

/// Confirmation code, once per document.
fn extract_confirmation(text: &str) -> Option<String> {
    let inline = UNITED_CONFIRMATION
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|code| !code.eq_ignore_ascii_case("number"));
    if inline.is_some() {
        return inline;
    }

    // Label alone on its line, value on the next non-empty line.
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let label = lines.iter().position(|l| CONFIRMATION_LABEL_LINE.is_match(l))?;
    lines[label + 1..]
        .iter()
        .find(|l| !l.is_empty())
        .map(|l| l.to_string())
}

/// Sum of every `Total: ... USD` line (cash and miles-plus-cash totals).
fn extract_total(text: &str) -> Option<Decimal> {
    let amounts: Vec<Decimal> = UNITED_TOTAL
        .captures_iter(text)
        .filter_map(|caps| parse_amount(&caps[1]))
        .collect();

    if amounts.is_empty() {
        None
    } else {
        Some(amounts.into_iter().sum())
    }
}
