//! Clock time normalization.

use chrono::NaiveTime;

use super::patterns::TIME_12H;

/// Parse the first `H:MM am|pm` time in `input`.
pub fn parse_clock_12h(input: &str) -> Option<NaiveTime> {
    let caps = TIME_12H.captures(input)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }

    let pm = caps[3].eq_ignore_ascii_case("p");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Convert `H:MM am|pm` to `HH:MM`, or `"12:00"` when nothing parses.
pub fn normalize_12h_to_24h(input: &str) -> String {
    parse_clock_12h(input)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "12:00".to_string())
}

/// Noon, used wherever a clock time was expected but not readable.
pub fn noon() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::hours(12)
}

/// Parse a 24-hour `HH:MM` setting.
pub fn parse_clock_24h(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_12h() {
        assert_eq!(normalize_12h_to_24h("9:05 am"), "09:05");
        assert_eq!(normalize_12h_to_24h("1:30 PM"), "13:30");
        assert_eq!(normalize_12h_to_24h("12:15 am"), "00:15");
        assert_eq!(normalize_12h_to_24h("12:45 pm"), "12:45");
        assert_eq!(normalize_12h_to_24h("7:10p.m."), "19:10");
    }

    #[test]
    fn test_unparsable_time_defaults_to_noon() {
        assert_eq!(normalize_12h_to_24h("around lunch"), "12:00");
        assert_eq!(normalize_12h_to_24h("14:00"), "12:00");
        assert_eq!(normalize_12h_to_24h("13:00 pm"), "12:00");
        assert_eq!(noon().format("%H:%M").to_string(), "12:00");
    }

    #[test]
    fn test_parse_clock_24h() {
        assert_eq!(parse_clock_24h("15:00"), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_clock_24h("3pm"), None);
    }
}
