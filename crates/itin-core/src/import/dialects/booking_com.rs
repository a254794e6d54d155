//! Booking.com-style lodging confirmations.
//!
//! The extractor runs a series of independent passes, each filling only the
//! fields still unset: name, name/address split, address, dates,
//! confirmation number and price.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::import::parser::ParseOptions;
use crate::import::rules::amounts::{currency_from_symbol, parse_amount};
use crate::import::rules::dates::{find_date_phrases, month_from_name};
use crate::import::rules::patterns::{
    ADDRESS_LABEL, CHECK_ANCHOR, LABELED_LINE, LODGING_BOOKED_AT, LODGING_CONFIRMATION,
    LODGING_PRICE_ANCHOR, LODGING_PRICE_FALLBACK, PRICE_AMOUNT, PROPERTY_GENERIC, VERTICAL_DATE,
    YEAR_20XX,
};
use crate::import::rules::{is_trivial_line, window};
use crate::import::BookingExtractor;
use crate::models::booking::{Dialect, Field, Money, ParsedLodging};

/// Name used when no property name could be read.
pub const PLACEHOLDER_NAME: &str = "Unnamed property";

/// How far before the first `Address:` label a name may sit.
const NAME_SEARCH_LIMIT: usize = 500;
/// Characters searched after a check-in/check-out anchor.
const DATE_WINDOW: usize = 300;
/// Characters searched after a price label.
const PRICE_WINDOW: usize = 120;
/// A wrapped address continuation line is shorter than this.
const ADDRESS_CONTINUATION_MAX: usize = 50;

/// Extractor for Booking.com-style confirmations: one stay per document.
pub struct BookingComExtractor;

impl BookingExtractor for BookingComExtractor {
    type Output = ParsedLodging;

    fn dialect(&self) -> Dialect {
        Dialect::BookingCom
    }

    fn extract(&self, text: &str, options: &ParseOptions) -> Vec<ParsedLodging> {
        let mut stay = ParsedLodging::new(Dialect::BookingCom);

        stay.name.fill(extract_name(text));
        split_name_and_address(&mut stay);
        stay.address.fill(extract_address(text));

        let (check_in, check_out) = extract_dates(text, options);
        stay.check_in = check_in.map(|d| d.and_time(options.check_in_time));
        stay.check_out = check_out.map(|d| d.and_time(options.check_out_time));

        stay.confirmation_code.fill(
            LODGING_CONFIRMATION
                .captures(text)
                .map(|caps| caps[1].replace('.', "")),
        );
        stay.cost.fill(extract_price(text, options));

        if !stay.name.is_recovered()
            && !stay.confirmation_code.is_recovered()
            && !stay.check_in.is_recovered()
        {
            debug!("Booking.com: no name, confirmation or readable check-in");
            return Vec::new();
        }

        stay.name = stay.name.or_defaulted(PLACEHOLDER_NAME.to_string());
        vec![stay]
    }
}

/// Property name: a "Your booking at X." phrase, the line before the
/// address label, or a generic "Hotel <Name>" phrase.
fn extract_name(text: &str) -> Option<String> {
    if let Some(caps) = LODGING_BOOKED_AT.captures(text) {
        let name = caps[1].trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    if let Some(label) = ADDRESS_LABEL.find(text) {
        if label.start() < NAME_SEARCH_LIMIT {
            let before = text[..label.start()]
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !is_trivial_line(line));
            if let Some(line) = before {
                return Some(line.to_string());
            }
        }
    }

    PROPERTY_GENERIC
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

/// "Name, Street 1, City" over-captured as the name: keep the part before
/// the first comma as the name and the rest as the address.
fn split_name_and_address(stay: &mut ParsedLodging) {
    if !stay.address.is_absent() {
        return;
    }
    let Field::Recovered(name) = &stay.name else {
        return;
    };
    let Some((head, tail)) = name.split_once(',') else {
        return;
    };

    let (head, tail) = (head.trim().to_string(), tail.trim().to_string());
    if head.is_empty() || tail.is_empty() {
        return;
    }
    stay.name = Field::Recovered(head);
    stay.address = Field::Recovered(tail);
}

/// Text after `Address:`, joined with a short wrapped continuation line.
fn extract_address(text: &str) -> Option<String> {
    let label = ADDRESS_LABEL.find(text)?;
    let mut lines = text[label.end()..].lines().map(str::trim);

    let mut address = match lines.next() {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => lines.find(|line| !line.is_empty())?.to_string(),
    };

    if let Some(next) = lines.next() {
        let continues = !next.is_empty()
            && next.chars().count() < ADDRESS_CONTINUATION_MAX
            && !next.contains("Phone:")
            && !LABELED_LINE.is_match(next)
            && !CHECK_ANCHOR.is_match(next);
        if continues {
            if !address.ends_with('-') {
                address.push(' ');
            }
            address.push_str(next);
        }
    }

    Some(address)
}

/// A check-in or check-out label in the text.
struct Anchor {
    check_in: bool,
    start: usize,
    end: usize,
}

fn overlaps(span: (usize, usize), taken: &[(usize, usize)]) -> bool {
    taken.iter().any(|&(s, e)| span.0 < e && s < span.1)
}

fn checked_date(date: Option<NaiveDate>, source: &str, options: &ParseOptions) -> Field<NaiveDate> {
    match date {
        Some(date) => Field::Recovered(date),
        None => {
            warn!("Invalid lodging date {:?}, defaulting to {}", source.trim(), options.today);
            Field::Defaulted(options.today)
        }
    }
}

/// Check-in and check-out dates.
///
/// Each anchor searches the text after it, stopping at the next anchor
/// unless only whitespace or punctuation separates the two (a header row
/// such as "Check-in  Check-out" followed by both dates). A date taken by
/// one anchor is not reused by another. When no anchor yields a date, the
/// first two date phrases of the document are used instead.
fn extract_dates(text: &str, options: &ParseOptions) -> (Field<NaiveDate>, Field<NaiveDate>) {
    let anchors: Vec<Anchor> = CHECK_ANCHOR
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            Some(Anchor {
                check_in: caps[1].eq_ignore_ascii_case("in"),
                start: full.start(),
                end: full.end(),
            })
        })
        .collect();
    let year: Option<i32> = YEAR_20XX
        .captures(text)
        .and_then(|caps| caps[1].parse().ok());

    let mut check_in: Field<NaiveDate> = Field::Absent;
    let mut check_out: Field<NaiveDate> = Field::Absent;
    let mut taken: Vec<(usize, usize)> = Vec::new();

    for (i, anchor) in anchors.iter().enumerate() {
        let slot = if anchor.check_in { &mut check_in } else { &mut check_out };
        if !slot.is_absent() {
            continue;
        }

        let mut scope = window(text, anchor.end, DATE_WINDOW);
        if let Some(next) = anchors.get(i + 1) {
            let gap = &text[anchor.end..next.start];
            if next.start < anchor.end + scope.len() && gap.chars().any(char::is_alphanumeric) {
                scope = gap;
            }
        }

        if let Some(found) = find_date_phrases(scope).into_iter().find(|m| {
            !overlaps((anchor.end + m.start(), anchor.end + m.end()), &taken)
        }) {
            taken.push((anchor.end + found.start(), anchor.end + found.end()));
            *slot = checked_date(found.value, &found.source, options);
            continue;
        }

        let Some(year) = year else {
            continue;
        };
        let vertical = VERTICAL_DATE.captures_iter(scope).find_map(|caps| {
            let full = caps.get(0)?;
            let span = (anchor.end + full.start(), anchor.end + full.end());
            if overlaps(span, &taken) {
                return None;
            }
            let date = month_from_name(&caps[2]).and_then(|month| {
                NaiveDate::from_ymd_opt(year, month, caps[1].parse().ok()?)
            });
            Some((span, date, full.as_str()))
        });
        if let Some((span, date, source)) = vertical {
            debug!("Vertical lodging date {:?} with year {}", source, year);
            taken.push(span);
            *slot = checked_date(date, source, options);
        }
    }

    if check_in.is_absent() && check_out.is_absent() {
        return fallback_dates(text, options);
    }
    (check_in, check_out)
}

/// First two date phrases anywhere in the document; a lone phrase is a
/// one-night stay.
fn fallback_dates(text: &str, options: &ParseOptions) -> (Field<NaiveDate>, Field<NaiveDate>) {
    let phrases = find_date_phrases(text);
    debug!("Lodging date fallback: {} phrase(s) in document", phrases.len());

    match phrases.as_slice() {
        [] => (Field::Absent, Field::Absent),
        [only] => {
            let check_in = checked_date(only.value, &only.source, options);
            let check_out = check_in
                .value()
                .and_then(|d| d.succ_opt())
                .map(Field::Defaulted)
                .unwrap_or_default();
            (check_in, check_out)
        }
        [first, second, ..] => (
            checked_date(first.value, &first.source, options),
            checked_date(second.value, &second.source, options),
        ),
    }
}

/// Amount after a "Final Price"/"Total Price" label, else any
/// "Total"/"Price" followed by a currency amount.
fn extract_price(text: &str, options: &ParseOptions) -> Option<Money> {
    let scoped = LODGING_PRICE_ANCHOR.find_iter(text).find_map(|anchor| {
        PRICE_AMOUNT.captures(window(text, anchor.end(), PRICE_WINDOW))
    });
    let caps = scoped.or_else(|| LODGING_PRICE_FALLBACK.captures(text))?;

    let amount = parse_amount(&caps[2])?;
    let currency = currency_from_symbol(&caps[1]).unwrap_or(options.default_currency.as_str());
    Some(Money::new(amount, currency))
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
            today: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            ..ParseOptions::default()
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn extract(text: &str) -> Vec<ParsedLodging> {
        BookingComExtractor.extract(text, &options())
    }

    const CONFIRMATION: &str = "\
Booking.com
Your booking at Hotel Lumen Paris.
Address: 15 Rue de la Paix-
Vendôme, 75002 Paris
Phone: +33 1 23 45 67
Confirmation number: 4.123.567.890
Check-in   Check-out
Friday, July 17, 2026   Sunday, July 19, 2026
Final Price (taxes included) approx. € 302";

    #[test]
    fn test_full_confirmation() {
        let stays = extract(CONFIRMATION);

        assert_eq!(stays.len(), 1);
        let stay = &stays[0];
        assert_eq!(stay.name, Field::Recovered("Hotel Lumen Paris".to_string()));
        assert_eq!(
            stay.address,
            Field::Recovered("15 Rue de la Paix-Vendôme, 75002 Paris".to_string())
        );
        assert_eq!(stay.confirmation_code, Field::Recovered("4123567890".to_string()));
        assert_eq!(stay.check_in, Field::Recovered(at("2026-07-17T15:00:00")));
        assert_eq!(stay.check_out, Field::Recovered(at("2026-07-19T11:00:00")));
        assert_eq!(
            stay.cost,
            Field::Recovered(Money::new(Decimal::from_str("302").unwrap(), "EUR"))
        );
    }

    #[test]
    fn test_name_before_address_and_vertical_dates() {
        let text = "\
Booking.com
Casa Azul Apartments
Address: Calle Mayor 5, 28013 Madrid
Phone: +34 915 555 010
Check-in
17
July
Check-out
19
July
Total price US$ 410.50
Booked in 2026";
        let stays = extract(text);

        assert_eq!(stays[0].name, Field::Recovered("Casa Azul Apartments".to_string()));
        assert_eq!(stays[0].address, Field::Recovered("Calle Mayor 5, 28013 Madrid".to_string()));
        assert_eq!(stays[0].check_in, Field::Recovered(at("2026-07-17T15:00:00")));
        assert_eq!(stays[0].check_out, Field::Recovered(at("2026-07-19T11:00:00")));
        assert_eq!(
            stays[0].cost,
            Field::Recovered(Money::usd(Decimal::from_str("410.50").unwrap()))
        );
        assert_eq!(stays[0].confirmation_code, Field::Absent);
    }

    #[test]
    fn test_name_with_address_is_split() {
        let text = "\
Booking.com
Your booking at Villa Serena, Via Roma 12, Amalfi.
Check-in: Sat 1 Aug 2026
Check-out: Mon 3 Aug 2026";
        let stays = extract(text);

        assert_eq!(stays[0].name, Field::Recovered("Villa Serena".to_string()));
        assert_eq!(stays[0].address, Field::Recovered("Via Roma 12, Amalfi".to_string()));
        assert_eq!(stays[0].check_in, Field::Recovered(at("2026-08-01T15:00:00")));
        assert_eq!(stays[0].check_out, Field::Recovered(at("2026-08-03T11:00:00")));
    }

    #[test]
    fn test_check_in_without_date_stays_absent() {
        let text = "\
Booking.com
Thank you for choosing Hotel Nordlicht Berlin
Check-in: from 15:00, see host instructions";
        let stays = extract(text);

        assert_eq!(stays.len(), 1);
        assert_eq!(stays[0].name, Field::Recovered("Hotel Nordlicht Berlin".to_string()));
        assert_eq!(stays[0].check_in, Field::Absent);
        assert_eq!(stays[0].check_out, Field::Absent);
    }

    #[test]
    fn test_only_check_out_found_no_fallback() {
        let text = "\
Booking.com
Your booking at Hotel Nordlicht.
Check-in: see host instructions
Check-out: Sunday, July 19, 2026";
        let stays = extract(text);

        assert_eq!(stays[0].check_in, Field::Absent);
        assert_eq!(stays[0].check_out, Field::Recovered(at("2026-07-19T11:00:00")));
    }

    #[test]
    fn test_only_check_in_found_no_fallback() {
        let text = "\
Booking.com
Your booking at Hotel Nordlicht.
Check-in: Friday, July 17, 2026
Check-out: ask at reception";
        let stays = extract(text);

        assert_eq!(stays[0].check_in, Field::Recovered(at("2026-07-17T15:00:00")));
        assert_eq!(stays[0].check_out, Field::Absent);
    }

    #[test]
    fn test_document_dates_fallback() {
        let text = "\
Booking.com
Chalet Edelweiss Zermatt
Your stay: 17 July 2026 - 20 July 2026
Confirmation: 2.345.678";
        let stays = extract(text);

        assert_eq!(stays[0].name, Field::Recovered("Chalet Edelweiss Zermatt".to_string()));
        assert_eq!(stays[0].check_in, Field::Recovered(at("2026-07-17T15:00:00")));
        assert_eq!(stays[0].check_out, Field::Recovered(at("2026-07-20T11:00:00")));
        assert_eq!(stays[0].confirmation_code, Field::Recovered("2345678".to_string()));
    }

    #[test]
    fn test_single_date_is_one_night() {
        let text = "Booking.com\nConfirmation: 987654321\nArrival 17 July 2026";
        let stays = extract(text);

        assert_eq!(stays[0].name, Field::Defaulted(PLACEHOLDER_NAME.to_string()));
        assert_eq!(stays[0].check_in, Field::Recovered(at("2026-07-17T15:00:00")));
        assert_eq!(stays[0].check_out, Field::Defaulted(at("2026-07-18T11:00:00")));
    }

    #[test]
    fn test_invalid_date_defaults_to_today() {
        let text = "Your booking at Hotel Nordlicht.\nCheck-in: February 30, 2026";
        let stays = extract(text);

        assert_eq!(stays[0].check_in, Field::Defaulted(at("2026-03-10T15:00:00")));
    }

    #[test]
    fn test_invalid_date_alone_no_record() {
        assert!(extract("Booking.com\nCheck-in: February 30, 2026").is_empty());
    }

    #[test]
    fn test_nothing_recovered_no_record() {
        assert!(extract("Booking.com newsletter: discover deals near you").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_generic_price_fallback() {
        let text = "Your booking at Hotel Nordlicht.\nPrice for 2 nights: GBP 240";
        let stays = extract(text);

        assert_eq!(
            stays[0].cost,
            Field::Recovered(Money::new(Decimal::from_str("240").unwrap(), "GBP"))
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(extract(CONFIRMATION), extract(CONFIRMATION));
    }
}
