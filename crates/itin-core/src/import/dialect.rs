//! Vendor fingerprint detection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::booking::Dialect;

use super::rules::patterns::{
    BOOKING_FINGERPRINT, FLIXBUS_FINGERPRINT, PRICELINE_FINGERPRINT, SWISS_FINGERPRINT,
    UNITED_FINGERPRINT,
};

/// Kind of booking a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingCategory {
    Flight,
    GroundTransport,
    CarRental,
    Lodging,
}

impl BookingCategory {
    /// Dialects of this category, in detection order.
    pub fn dialects(&self) -> &'static [Dialect] {
        match self {
            Self::Flight => &[Dialect::United, Dialect::Swiss],
            Self::GroundTransport => &[Dialect::FlixBus],
            Self::CarRental => &[Dialect::Priceline],
            Self::Lodging => &[Dialect::BookingCom],
        }
    }
}

/// Whether `text` carries the vendor's fingerprint.
pub fn fingerprint_matches(dialect: Dialect, text: &str) -> bool {
    match dialect {
        Dialect::United => text.contains("United Airlines") || UNITED_FINGERPRINT.is_match(text),
        Dialect::Swiss => text.contains("SWISS") || SWISS_FINGERPRINT.is_match(text),
        Dialect::FlixBus => text.contains("FlixBus") || FLIXBUS_FINGERPRINT.is_match(text),
        Dialect::Priceline => text.contains("Priceline") || PRICELINE_FINGERPRINT.is_match(text),
        Dialect::BookingCom => text.contains("Booking.com") || BOOKING_FINGERPRINT.is_match(text),
    }
}

/// First dialect of `category` whose fingerprint is present.
///
/// One vendor per document is assumed: when two dialects would match, only
/// the first checked one is returned.
pub fn detect(category: BookingCategory, text: &str) -> Option<Dialect> {
    let dialect = category
        .dialects()
        .iter()
        .copied()
        .find(|d| fingerprint_matches(*d, text));

    debug!("Detected {:?} dialect: {:?}", category, dialect);
    dialect
}

/// Byte offsets where `dialect` is named in `text`.
///
/// Only unambiguous marks count: the vendor name and its fingerprint
/// pattern, except for Booking.com whose generic "check-in" pattern also
/// shows up in other vendors' documents.
fn vendor_marks(dialect: Dialect, text: &str) -> Vec<usize> {
    let (name, pattern): (&str, Option<&Regex>) = match dialect {
        Dialect::United => ("United Airlines", Some(&*UNITED_FINGERPRINT)),
        Dialect::Swiss => ("SWISS", Some(&*SWISS_FINGERPRINT)),
        Dialect::FlixBus => ("FlixBus", Some(&*FLIXBUS_FINGERPRINT)),
        Dialect::Priceline => ("Priceline", Some(&*PRICELINE_FINGERPRINT)),
        Dialect::BookingCom => ("Booking.com", None),
    };

    let mut marks: Vec<usize> = text.match_indices(name).map(|(pos, _)| pos).collect();
    if let Some(pattern) = pattern {
        marks.extend(pattern.find_iter(text).map(|m| m.start()));
    }
    marks
}

/// Byte range of the part of a concatenated document that belongs to the
/// `dialect` booking found at `at`.
///
/// The block ends at the first mark of another vendor after `at`. When
/// another vendor is named before `at`, the block starts at the first own
/// mark after it, or at `at` itself.
pub fn vendor_block(dialect: Dialect, text: &str, at: usize) -> (usize, usize) {
    const ALL: [Dialect; 5] = [
        Dialect::United,
        Dialect::Swiss,
        Dialect::FlixBus,
        Dialect::Priceline,
        Dialect::BookingCom,
    ];

    let foreign: Vec<usize> = ALL
        .iter()
        .filter(|d| **d != dialect)
        .flat_map(|d| vendor_marks(*d, text))
        .collect();

    let end = foreign
        .iter()
        .copied()
        .filter(|pos| *pos >= at)
        .min()
        .unwrap_or(text.len());

    let start = match foreign.iter().copied().filter(|pos| *pos < at).max() {
        None => 0,
        Some(previous) => vendor_marks(dialect, text)
            .into_iter()
            .filter(|pos| *pos > previous && *pos <= at)
            .min()
            .unwrap_or(at),
    };

    if start != 0 || end != text.len() {
        debug!("{:?} block: bytes {}..{} of {}", dialect, start, end, text.len());
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_flight_dialects() {
        assert_eq!(
            detect(BookingCategory::Flight, "Thank you for choosing United Airlines"),
            Some(Dialect::United)
        );
        assert_eq!(
            detect(BookingCategory::Flight, "Your flight LX2092 is confirmed"),
            Some(Dialect::Swiss)
        );
    }

    #[test]
    fn test_first_dialect_wins() {
        let text = "United Airlines codeshare, operated by SWISS as LX 18";
        assert_eq!(detect(BookingCategory::Flight, text), Some(Dialect::United));
    }

    #[test]
    fn test_fingerprints_are_category_scoped() {
        let text = "Booking.com\nCheck-in: Friday, July 17, 2026";
        assert_eq!(detect(BookingCategory::Lodging, text), Some(Dialect::BookingCom));
        assert_eq!(detect(BookingCategory::CarRental, text), None);
        assert_eq!(detect(BookingCategory::GroundTransport, text), None);
    }

    #[test]
    fn test_case_insensitive_fingerprints() {
        assert_eq!(
            detect(BookingCategory::GroundTransport, "thanks for travelling with flixbus"),
            Some(Dialect::FlixBus)
        );
        assert_eq!(
            detect(BookingCategory::CarRental, "PRICELINE receipt"),
            Some(Dialect::Priceline)
        );
        assert_eq!(detect(BookingCategory::Flight, "Lunch at noon"), None);
    }

    #[test]
    fn test_vendor_block_splits_concatenated_documents() {
        let text = "FlixBus\nTotal 25.98 $\n\npriceline\nTotal cost: $ 187.40";
        let priceline = text.find("priceline").unwrap();

        assert_eq!(vendor_block(Dialect::FlixBus, text, 8), (0, priceline));
        assert_eq!(
            vendor_block(Dialect::Priceline, text, priceline + 10),
            (priceline, text.len())
        );
    }

    #[test]
    fn test_vendor_block_ignores_generic_check_in() {
        let text = "FlixBus\nCheck-in closes 15 minutes before departure\nTotal 9.99 €";
        assert_eq!(vendor_block(Dialect::FlixBus, text, 0), (0, text.len()));
    }
}
