//! Time, date and id helpers

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

/// Length of the random part of a generated id
const ID_SUFFIX_LEN: usize = 6;

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Layouts accepted for a date given in a URL path
const DATE_TIME_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Current time with a fixed UTC offset
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

/// Today's calendar date in `tz`
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Generate an event id: `YYYYMMDDHHMMSS-xxxxxx`
///
/// The alphanumeric suffix is drawn from the bytes of a v4 UUID so ids
/// created within the same second still differ.
pub fn generate_id() -> String {
    let random = Uuid::new_v4();
    let suffix: String = random.as_bytes()[..ID_SUFFIX_LEN]
        .iter()
        .map(|b| ID_CHARSET[*b as usize % ID_CHARSET.len()] as char)
        .collect();

    format!("{}-{}", Utc::now().format("%Y%m%d%H%M%S"), suffix)
}

/// Parse the date part of a path segment
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and
/// RFC 3339. For RFC 3339 input the calendar date is taken as written,
/// before any time zone conversion.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    for layout in DATE_TIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, layout) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.date_naive())
}
