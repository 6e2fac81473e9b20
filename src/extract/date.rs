//! Date normalization
//!
//! Converts the human-readable dates shown on order pages ("January 20,
//! 2025") into the canonical sortable `YYYY-MM-DD` form.

use chrono::NaiveDate;

/// Normalizes a raw date string to `YYYY-MM-DD`
///
/// The input is trimmed and parsed against the "Month-name Day, Year"
/// pattern. A string that does not parse is returned trimmed but otherwise
/// unchanged; normalization failure is not an error for the caller.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, "%B %d, %Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => trimmed.to_string(),
    }
}
