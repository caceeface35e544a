//! Field cleanup and coercion shared by the harvester and the table loader.
//!
//! Nothing here fails: malformed input degrades to an empty string, zero, or a null
//! timestamp.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Clean up a company name.
///
/// Trims whitespace, drops a single leading `@` (GitHub organization mentions), and
/// uppercases the remainder so that `@acme` and `Acme ` collapse to `ACME`.
#[must_use]
pub fn clean_company(raw: Option<&str>) -> String {
    let Some(company) = raw else {
        return String::new();
    };

    let company = company.trim();
    let company = company.strip_prefix('@').unwrap_or(company);
    company.to_uppercase()
}

/// The short license identifier, or empty when the repository has none.
#[must_use]
pub fn license_name(key: Option<&str>) -> String {
    key.map(str::trim).unwrap_or_default().to_string()
}

/// Parse a non-negative count, treating anything unparseable as zero.
///
/// Accepts integral floats such as `12.0`, which is how some spreadsheet tools
/// re-save integer columns.
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "fractional part is intentionally dropped")]
#[expect(clippy::cast_sign_loss, reason = "value is checked to be non-negative")]
pub fn parse_count(s: &str) -> u64 {
    let s = s.trim();
    if let Ok(n) = s.parse::<u64>() {
        return n;
    }

    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => f as u64,
        _ => 0,
    }
}

/// Parse a timestamp as UTC, returning `None` when it cannot be understood.
///
/// RFC 3339 with any offset is normalized to UTC. Offset-less date-times and bare
/// dates are taken to be UTC already.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way GitHub does (`2011-01-25T18:44:36Z`); null renders empty.
#[must_use]
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_default()
}
