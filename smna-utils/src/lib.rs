//! Shared utility functions for SMNA crates.

/// Timestamp utility functions
pub mod dates {
    use chrono::{NaiveDateTime, NaiveTime, Timelike};

    /// Canonical timestamp format, as written by pandas: "YYYY-MM-DD HH:MM:SS"
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Formats accepted in the `Date` column, tried in order.
    const ACCEPTED_FORMATS: [&str; 3] = [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    /// Format a NaiveDateTime as "YYYY-MM-DD HH:MM:SS"
    pub fn format_timestamp(date: &NaiveDateTime) -> String {
        date.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Format a timestamp for chart tooltips, e.g. "2023-01-01 12Z"
    pub fn format_cycle(date: &NaiveDateTime) -> String {
        format!("{} {:02}Z", date.format("%Y-%m-%d"), date.hour())
    }

    /// Parse a timestamp from the `Date` column.
    ///
    /// Besides the formats above, the GSI compact cycle format
    /// "YYYYMMDDHH" (e.g. "2023010112") is accepted.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        for format in ACCEPTED_FORMATS {
            if let Ok(date) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(date);
            }
        }
        parse_cycle(s)
    }

    /// Parse a timestamp in "YYYYMMDDHH" format (GSI cycle label)
    pub fn parse_cycle(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("not a YYYYMMDDHH cycle: {:?}", s);
        }
        Ok(NaiveDateTime::parse_from_str(
            &format!("{}0000", s),
            "%Y%m%d%H%M%S",
        )?)
    }

    /// Time of day of a timestamp, used for synoptic-hour matching.
    pub fn time_of_day(date: &NaiveDateTime) -> NaiveTime {
        date.time()
    }

}
