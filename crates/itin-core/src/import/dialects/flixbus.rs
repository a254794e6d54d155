//! FlixBus booking confirmations.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Captures;
use rust_decimal::Decimal;
use tracing::debug;

use crate::import::dialect::vendor_block;
use crate::import::parser::ParseOptions;
use crate::import::rules::amounts::parse_amount;
use crate::import::rules::patterns::{
    FLIXBUS_BOOKING_NUMBER, FLIXBUS_DATETIME, FLIXBUS_LINE, FLIXBUS_SEAT, FLIXBUS_TOTAL,
};
use crate::import::rules::time::parse_clock_12h;
use crate::import::rules::{is_trivial_line, window};
use crate::import::BookingExtractor;
use crate::models::booking::{Dialect, Field, Money, ParsedGroundTransport, TransportMode};

use super::{detect_currency, first_group, span, timestamp};

/// Characters looked at after the arrival token for the destination.
const DESTINATION_WINDOW: usize = 100;

/// Extractor for FlixBus confirmations: one leg per document.
pub struct FlixBusExtractor;

impl BookingExtractor for FlixBusExtractor {
    type Output = ParsedGroundTransport;

    fn dialect(&self) -> Dialect {
        Dialect::FlixBus
    }

    fn extract(&self, text: &str, options: &ParseOptions) -> Vec<ParsedGroundTransport> {
        let tokens: Vec<Captures<'_>> = FLIXBUS_DATETIME.captures_iter(text).collect();
        let [departure, arrival, ..] = tokens.as_slice() else {
            debug!("FlixBus: {} date-time token(s), need two", tokens.len());
            return Vec::new();
        };
        let (departure_start, departure_end) = span(departure);
        let (arrival_start, arrival_end) = span(arrival);

        let mut leg = ParsedGroundTransport::new(Dialect::FlixBus, TransportMode::Bus);
        leg.operator = Field::Recovered("FlixBus".to_string());
        leg.departure = token_timestamp(departure, options);
        leg.arrival = token_timestamp(arrival, options);
        leg.origin = Field::from_option(place_line(&text[departure_end..arrival_start]));
        leg.destination =
            Field::from_option(place_line(window(text, arrival_end, DESTINATION_WINDOW)));

        // Booking details are read from this vendor's part of a combined
        // document only.
        let (block_start, block_end) = vendor_block(Dialect::FlixBus, text, departure_start);
        let block = &text[block_start..block_end];

        leg.confirmation_code = Field::from_option(
            FLIXBUS_BOOKING_NUMBER
                .captures(block)
                .map(|caps| caps[1].to_string()),
        );
        leg.service_number = Field::from_option(
            FLIXBUS_LINE.captures(block).map(|caps| caps[1].to_string()),
        )
        .or_defaulted(String::new());
        leg.seat = Field::from_option(FLIXBUS_SEAT.captures(block).map(|caps| caps[1].to_string()));
        leg.cost = extract_cost(block, options);

        vec![leg]
    }
}

/// `MM/DD/YYYY, H:MM am` token as a timestamp.
fn token_timestamp(caps: &Captures<'_>, options: &ParseOptions) -> Field<NaiveDateTime> {
    let date = match (
        caps[1].parse::<u32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<i32>(),
    ) {
        (Ok(month), Ok(day), Ok(year)) => NaiveDate::from_ymd_opt(year, month, day),
        _ => None,
    };
    timestamp(date, parse_clock_12h(&caps[4]), options)
}

/// First line of `text` that names a place: not trivial, no prices or
/// percentages.
fn place_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !is_trivial_line(line))
        .find(|line| !line.contains(['$', '€', '£', '%']))
        .map(str::to_string)
}

/// Every `Total <amount>` in the block, summed.
///
/// Invoices that repeat the total (summary and payment sections) are
/// counted more than once. Tax rates on a total line are skipped.
fn extract_cost(text: &str, options: &ParseOptions) -> Field<Money> {
    let mut total: Option<Decimal> = None;
    let mut currency = None;

    for caps in FLIXBUS_TOTAL.captures_iter(text) {
        let Some(amount) = first_group(&caps).and_then(parse_amount) else {
            continue;
        };
        total = Some(total.unwrap_or_default() + amount);

        if currency.is_none() {
            let (start, _) = span(&caps);
            let line = text[start..].lines().next().unwrap_or_default();
            currency = detect_currency(line);
        }
    }

    match total {
        Some(amount) => Field::Recovered(Money::new(
            amount,
            currency.unwrap_or(options.default_currency.as_str()),
        )),
        None => Field::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const CONFIRMATION: &str = "\
FlixBus booking confirmation
Booking number: #3012345678
07/20/2026, 8:15 am
Berlin central bus station
Platform 4
07/20/2026, 12:40 pm
Hamburg ZOB
Line N1234  Seat 12A
Passenger 1 fare $ 25.98
Passenger 2 fare $ 25.98
Service fee 1.99 $
Total 53.95 $
07/27/2026, 6:00 pm";

    fn options() -> ParseOptions {
        ParseOptions {
            today: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            default_currency: "EUR".to_string(),
            ..ParseOptions::default()
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_single_leg_despite_fare_lines() {
        let legs = FlixBusExtractor.extract(CONFIRMATION, &options());

        assert_eq!(legs.len(), 1);
        let leg = &legs[0];
        assert_eq!(leg.mode, TransportMode::Bus);
        assert_eq!(leg.operator, Field::Recovered("FlixBus".to_string()));
        assert_eq!(leg.confirmation_code, Field::Recovered("3012345678".to_string()));
        assert_eq!(leg.departure, Field::Recovered(at("2026-07-20T08:15:00")));
        assert_eq!(leg.arrival, Field::Recovered(at("2026-07-20T12:40:00")));
        assert_eq!(leg.origin, Field::Recovered("Berlin central bus station".to_string()));
        assert_eq!(leg.destination, Field::Recovered("Hamburg ZOB".to_string()));
        assert_eq!(leg.service_number, Field::Recovered("N1234".to_string()));
        assert_eq!(leg.seat, Field::Recovered("12A".to_string()));
        assert_eq!(
            leg.cost,
            Field::Recovered(Money::usd(Decimal::from_str("53.95").unwrap()))
        );
    }

    #[test]
    fn test_needs_two_tokens() {
        let text = "FlixBus\nBooking number: 3012345678\n07/20/2026, 8:15 am\nBerlin";
        assert!(FlixBusExtractor.extract(text, &options()).is_empty());
    }

    #[test]
    fn test_repeated_totals_are_summed() {
        let text = "\
07/20/2026, 8:15 am
Munich ZOB
07/20/2026, 1:00 pm
Prague Florenc
Total 10.00 €
Total 5.00 €";
        let legs = FlixBusExtractor.extract(text, &options());

        assert_eq!(
            legs[0].cost,
            Field::Recovered(Money::new(Decimal::from_str("15.00").unwrap(), "EUR"))
        );
        assert_eq!(legs[0].service_number, Field::Defaulted(String::new()));
        assert_eq!(legs[0].seat, Field::Absent);
        assert_eq!(legs[0].confirmation_code, Field::Absent);
    }

    #[test]
    fn test_price_lines_are_not_places() {
        let text = "\
07/20/2026, 8:15 am
€ 12.00
20% discount
Munich ZOB
07/20/2026, 1:00 pm
Prague Florenc
Total 12.00";
        let legs = FlixBusExtractor.extract(text, &options());

        assert_eq!(legs[0].origin, Field::Recovered("Munich ZOB".to_string()));
        assert_eq!(legs[0].destination, Field::Recovered("Prague Florenc".to_string()));
        assert_eq!(
            legs[0].cost,
            Field::Recovered(Money::new(Decimal::from_str("12.00").unwrap(), "EUR"))
        );
    }

    #[test]
    fn test_invalid_date_is_defaulted() {
        let text = "13/40/2026, 8:15 am\nA\n07/20/2026, 1:00 pm";
        let legs = FlixBusExtractor.extract(text, &options());

        assert_eq!(legs[0].departure, Field::Defaulted(at("2026-05-01T08:15:00")));
        assert_eq!(legs[0].origin, Field::Absent);
    }

    #[test]
    fn test_tax_rate_is_not_the_total() {
        let text = "\
07/20/2026, 8:15 am
Berlin central bus station
07/20/2026, 12:40 pm
Hamburg ZOB
Total (incl. 7% VAT) $ 25.98";
        let legs = FlixBusExtractor.extract(text, &options());

        assert_eq!(
            legs[0].cost,
            Field::Recovered(Money::usd(Decimal::from_str("25.98").unwrap()))
        );
    }

    #[test]
    fn test_totals_after_another_vendor_are_ignored() {
        let text = "\
FlixBus
07/20/2026, 8:15 am
Berlin central bus station
07/20/2026, 12:40 pm
Hamburg ZOB
Total 25.98 $

Your priceline itinerary
Total cost: $ 187.40";
        let legs = FlixBusExtractor.extract(text, &options());

        assert_eq!(
            legs[0].cost,
            Field::Recovered(Money::usd(Decimal::from_str("25.98").unwrap()))
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(
            FlixBusExtractor.extract(CONFIRMATION, &options()),
            FlixBusExtractor.extract(CONFIRMATION, &options())
        );
    }
}
