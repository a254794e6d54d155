//! SWISS (LX) booking confirmations.

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::import::parser::ParseOptions;
use crate::import::rules::amounts::parse_amount;
use crate::import::rules::patterns::{
    SWISS_BOOKING_REFERENCE, SWISS_CITY_CODE, SWISS_CODE_CITY, SWISS_DATETIME, SWISS_FLIGHT,
    SWISS_ROUTE, SWISS_TOTAL_CHF, SWISS_TOTAL_USD,
};
use crate::import::BookingExtractor;
use crate::models::booking::{Dialect, Field, Money, ParsedFlight};

use super::{first_group, timestamp};

/// Three-letter tokens that look like airport codes but never are.
const CURRENCY_CODES: [&str; 4] = ["CHF", "USD", "EUR", "GBP"];

/// Extractor for SWISS confirmations: one flight per document.
pub struct SwissExtractor;

impl BookingExtractor for SwissExtractor {
    type Output = ParsedFlight;

    fn dialect(&self) -> Dialect {
        Dialect::Swiss
    }

    fn extract(&self, text: &str, options: &ParseOptions) -> Vec<ParsedFlight> {
        let Some(caps) = SWISS_FLIGHT.captures(text) else {
            return Vec::new();
        };

        let mut flight = ParsedFlight::new(Dialect::Swiss);
        flight.airline = Field::Recovered("SWISS".to_string());
        flight.flight_number = Field::Recovered(format!("LX{}", &caps[1]));

        let mut times = SWISS_DATETIME.captures_iter(text).map(|caps| {
            let date = NaiveDate::from_ymd_opt(
                caps[3].parse().unwrap_or_default(),
                caps[2].parse().unwrap_or_default(),
                caps[1].parse().unwrap_or_default(),
            );
            let time = NaiveTime::from_hms_opt(
                caps[4].parse().unwrap_or(u32::MAX),
                caps[5].parse().unwrap_or(u32::MAX),
                0,
            );
            timestamp(date, time, options)
        });
        flight.departure = times.next().unwrap_or_default();
        flight.arrival = times.next().unwrap_or_default();

        match extract_route(text) {
            Some((origin, destination)) => {
                flight.origin = Field::Recovered(origin);
                flight.destination = Field::Recovered(destination);
            }
            None => debug!("No route found for {}", &caps[0]),
        }

        flight.confirmation_code = Field::from_option(
            SWISS_BOOKING_REFERENCE
                .captures(text)
                .map(|caps| caps[1].to_string()),
        );
        flight.cost = Field::from_option(extract_cost(text));

        vec![flight]
    }
}

fn is_airport_code(code: &str) -> bool {
    !CURRENCY_CODES.contains(&code)
}

/// Origin and destination codes: a direct `ZRH - LHR` pair first, else the
/// first two distinct codes printed next to a known city name.
fn extract_route(text: &str) -> Option<(String, String)> {
    let direct = SWISS_ROUTE.captures_iter(text).find_map(|caps| {
        let (from, to) = (&caps[1], &caps[2]);
        (is_airport_code(from) && is_airport_code(to) && from != to)
            .then(|| (from.to_string(), to.to_string()))
    });
    if direct.is_some() {
        return direct;
    }

    let mut found: Vec<(usize, &str)> = SWISS_CITY_CODE
        .captures_iter(text)
        .chain(SWISS_CODE_CITY.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| (m.start(), m.as_str()))
        .filter(|(_, code)| is_airport_code(code))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);

    let mut codes: Vec<&str> = Vec::new();
    for (_, code) in found {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    match codes.as_slice() {
        [origin, destination, ..] => Some((origin.to_string(), destination.to_string())),
        _ => None,
    }
}

/// USD total when present, otherwise the CHF total under its own tag.
fn extract_cost(text: &str) -> Option<Money> {
    let usd = SWISS_TOTAL_USD
        .captures(text)
        .and_then(|caps| first_group(&caps).and_then(parse_amount));
    if let Some(amount) = usd {
        return Some(Money::usd(amount));
    }

    SWISS_TOTAL_CHF
        .captures(text)
        .and_then(|caps| first_group(&caps).and_then(parse_amount))
        .map(|amount| Money::new(amount, "CHF"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn options() -> ParseOptions {
        ParseOptions {
            today: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            ..ParseOptions::default()
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_extracts_flight_and_times() {
        let text = "\
SWISS booking confirmation
Booking reference: Q4ZT8K
LX2092 ZRH - LHR
Departure 30.06.2026 - 12:05
Arrival 30.06.2026 - 14:20
Total price USD 412.30";
        let flights = SwissExtractor.extract(text, &options());

        assert_eq!(flights.len(), 1);
        let flight = &flights[0];
        assert_eq!(flight.flight_number, Field::Recovered("LX2092".to_string()));
        assert_eq!(flight.airline, Field::Recovered("SWISS".to_string()));
        assert_eq!(flight.departure, Field::Recovered(at("2026-06-30T12:05:00")));
        assert_eq!(flight.arrival, Field::Recovered(at("2026-06-30T14:20:00")));
        assert_eq!(flight.origin, Field::Recovered("ZRH".to_string()));
        assert_eq!(flight.destination, Field::Recovered("LHR".to_string()));
        assert_eq!(flight.confirmation_code, Field::Recovered("Q4ZT8K".to_string()));
        assert_eq!(
            flight.cost,
            Field::Recovered(Money::usd(Decimal::from_str("412.30").unwrap()))
        );
    }

    #[test]
    fn test_route_from_city_names() {
        let text = "\
LX 2806
Geneva (GVA)
30.06.2026 - 07:10
Zurich (ZRH)
30.06.2026 - 08:05";
        let flights = SwissExtractor.extract(text, &options());

        assert_eq!(flights[0].flight_number, Field::Recovered("LX2806".to_string()));
        assert_eq!(flights[0].origin, Field::Recovered("GVA".to_string()));
        assert_eq!(flights[0].destination, Field::Recovered("ZRH".to_string()));
    }

    #[test]
    fn test_unrecoverable_route_is_absent() {
        let text = "LX318\n01.07.2026 - 09:00\n01.07.2026 - 09:55\nTotal CHF 180.00";
        let flights = SwissExtractor.extract(text, &options());

        assert_eq!(flights[0].origin, Field::Absent);
        assert_eq!(flights[0].destination, Field::Absent);
        assert!(flights[0].needs_review().contains(&"origin"));
    }

    #[test]
    fn test_chf_total_keeps_currency() {
        let text = "LX318 ZRH - CDG\nTotal CHF 1,180.50";
        let flights = SwissExtractor.extract(text, &options());

        assert_eq!(
            flights[0].cost,
            Field::Recovered(Money::new(Decimal::from_str("1180.50").unwrap(), "CHF"))
        );
        assert_eq!(flights[0].departure, Field::Absent);
    }

    #[test]
    fn test_currency_pairs_are_not_routes() {
        assert_eq!(extract_route("Exchange USD - CHF applied"), None);
        assert_eq!(
            extract_route("CHF - USD\nBCN > ZRH"),
            Some(("BCN".to_string(), "ZRH".to_string()))
        );
    }

    #[test]
    fn test_invalid_date_is_defaulted() {
        let text = "LX1\n31.02.2026 - 10:00\n31.02.2026 - 11:00";
        let flights = SwissExtractor.extract(text, &options());

        assert_eq!(flights[0].departure, Field::Defaulted(at("2026-02-01T10:00:00")));
    }

    #[test]
    fn test_no_flight_number_no_record() {
        assert!(SwissExtractor.extract("SWISS newsletter 30.06.2026 - 12:05", &options()).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let text = "LX2092 ZRH - LHR 30.06.2026 - 12:05 30.06.2026 - 14:20";
        assert_eq!(
            SwissExtractor.extract(text, &options()),
            SwissExtractor.extract(text, &options())
        );
    }
}
