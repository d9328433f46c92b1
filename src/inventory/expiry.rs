use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpiryError {
    #[error("invalid expiry date `{0}`, expected DD/MM/YYYY")]
    InvalidDateFormat(String),
}

/// Freshness category derived from an item's expiry date and the current
/// date. Never stored; recomputed every time an item is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpiryStatus {
    Expired,
    ExpiringToday,
    Urgent,
    ExpiringSoon,
    Fresh,
}

impl ExpiryStatus {
    /// Display string, exactly as the mobile UI shows it.
    pub fn label(self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiringToday => "Expiring Today",
            ExpiryStatus::Urgent => "Urgent",
            ExpiryStatus::ExpiringSoon => "Expiring Soon",
            ExpiryStatus::Fresh => "Fresh",
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse an expiry date. `DD/MM/YYYY` is the wire format; `YYYY-MM-DD` is
/// accepted as a fallback because the backend accepts both. Anything else
/// is a defined failure, never a silent default category.
pub fn parse_expiry(raw: &str) -> Result<Date, ExpiryError> {
    let raw = raw.trim();
    Date::parse(raw, format_description!("[day]/[month]/[year]"))
        .or_else(|_| Date::parse(raw, format_description!("[year]-[month]-[day]")))
        .map_err(|_| ExpiryError::InvalidDateFormat(raw.to_string()))
}

/// Zero-padded `DD/MM/YYYY`.
pub fn format_expiry(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Classify an expiry date against `today`.
///
/// Thresholds follow the backend's own banding: strictly past is Expired,
/// the current date is Expiring Today, 1 to 7 days out is Urgent, 8 to 15 days
/// out is Expiring Soon, and beyond that Fresh.
pub fn classify(expiry: Date, today: Date) -> ExpiryStatus {
    let days_left = (expiry - today).whole_days();
    match days_left {
        d if d < 0 => ExpiryStatus::Expired,
        0 => ExpiryStatus::ExpiringToday,
        1..=7 => ExpiryStatus::Urgent,
        8..=15 => ExpiryStatus::ExpiringSoon,
        _ => ExpiryStatus::Fresh,
    }
}

pub fn classify_str(raw: &str, today: Date) -> Result<ExpiryStatus, ExpiryError> {
    Ok(classify(parse_expiry(raw)?, today))
}

/// The local calendar date; UTC when the local offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
