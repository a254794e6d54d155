//! Shared normalizers used by every dialect extractor.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod time;

pub use amounts::{currency_from_symbol, parse_amount, split_evenly};
pub use dates::{find_date_phrases, month_from_name, parse_loose_date_phrase, try_parse_date_phrase};
pub use patterns::*;
pub use time::{normalize_12h_to_24h, parse_clock_12h};

/// A value found in the source text, with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            position: (start, end),
            source: source.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.position.0
    }

    pub fn end(&self) -> usize {
        self.position.1
    }
}

/// Up to `max_chars` characters of `text` starting at byte `start`.
///
/// `start` is clamped to the text and moved forward to a char boundary.
pub fn window(text: &str, start: usize, max_chars: usize) -> &str {
    let mut start = start.min(text.len());
    while !text.is_char_boundary(start) {
        start += 1;
    }
    let rest = &text[start..];
    let end = rest
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// A line too short or too symbolic to be a name or a place.
pub fn is_trivial_line(line: &str) -> bool {
    let line = line.trim();
    line.chars().filter(|c| c.is_alphabetic()).count() < 3
}
