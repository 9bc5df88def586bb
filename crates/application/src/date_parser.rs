//! Input date parsing utilities
//!
//! Front ends accept dates in several day-first and ISO-like layouts. Dates
//! are stored as `YYYY-MM-DD` and displayed as `DD.MM.YYYY`.

use chrono::{Local, NaiveDate};
use domain::DomainError;
use tracing::debug;

/// Accepted input layouts, tried in order
pub const SUPPORTED_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

const STORAGE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Parse a date string in any of the [`SUPPORTED_FORMATS`]
///
/// Surrounding whitespace is ignored. Returns `None` for blank or
/// unrecognized input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = SUPPORTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok());

    if parsed.is_none() {
        debug!(input = %input, "Failed to parse date");
    }
    parsed
}

/// Parse a date that must be present, reporting the accepted layouts on failure
pub fn parse_required_date(input: &str) -> Result<NaiveDate, DomainError> {
    parse_date(input).ok_or_else(|| {
        DomainError::InvalidDateTime(format!(
            "'{}', expected one of: {}",
            input.trim(),
            format_examples(Local::now().date_naive())
        ))
    })
}

/// Format a date the way the store keeps it
pub fn format_for_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Format a date for people
pub fn format_for_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Render `date` in every supported layout, comma separated
pub fn format_examples(date: NaiveDate) -> String {
    SUPPORTED_FORMATS
        .iter()
        .map(|fmt| date.format(fmt).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
