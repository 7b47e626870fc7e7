//! Long-form date rendering for order timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Placeholder shown for a missing or unparsable timestamp.
pub const NOT_AVAILABLE: &str = "Not available";

const DISPLAY_FORMAT: &str = "%B %-d, %Y, %I:%M %p";

/// Formats backend timestamps as `May 1, 2024, 10:00 AM` in a fixed display
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl DateFormatter {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Formats `raw`, or returns [`NOT_AVAILABLE`] when it is absent or
    /// cannot be parsed.
    #[must_use]
    pub fn format(&self, raw: Option<&str>) -> String {
        raw.and_then(|raw| self.parse(raw)).map_or_else(
            || NOT_AVAILABLE.to_string(),
            |at| at.format(DISPLAY_FORMAT).to_string(),
        )
    }

    /// Parses RFC 3339 timestamps, naive date-times (read in the display
    /// offset), and bare dates (read as UTC midnight).
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&self.offset));
        }

        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
                return self.offset.from_local_datetime(&naive).single();
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc().with_timezone(&self.offset))
    }
}
