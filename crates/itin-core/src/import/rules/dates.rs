//! Loose date phrase parsing.

use chrono::NaiveDate;
use tracing::warn;

use super::ExtractionMatch;
use super::patterns::{DATE_ISO, DATE_PHRASE};

/// Month number from an English month name or abbreviation.
pub fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// All date phrases in `text`, in document order.
///
/// The value is `None` when the phrase matched but names no real calendar
/// day (e.g. "February 30, 2026").
pub fn find_date_phrases(text: &str) -> Vec<ExtractionMatch<Option<NaiveDate>>> {
    DATE_PHRASE
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let (month, day) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
                (Some(m), Some(d), _, _) => (m.as_str(), d.as_str()),
                (_, _, Some(d), Some(m)) => (m.as_str(), d.as_str()),
                _ => return None,
            };
            let date = month_from_name(month).and_then(|month| {
                let day: u32 = day.parse().ok()?;
                let year: i32 = caps[5].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            });
            Some(ExtractionMatch::new(date, full.start(), full.end(), full.as_str()))
        })
        .collect()
}

/// Parse the first date phrase ("Mon 20 Jul 2026", "July 20, 2026",
/// "2026-07-20") in `text`.
pub fn try_parse_date_phrase(text: &str) -> Option<NaiveDate> {
    if let Some(found) = find_date_phrases(text).into_iter().next() {
        return found.value;
    }

    let caps = DATE_ISO.captures(text)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}

/// Like [`try_parse_date_phrase`], but never fails: an unreadable phrase
/// yields `today`.
pub fn parse_loose_date_phrase(text: &str, today: NaiveDate) -> NaiveDate {
    try_parse_date_phrase(text).unwrap_or_else(|| {
        warn!("Unreadable date phrase {:?}, defaulting to {}", text.trim(), today);
        today
    })
}
