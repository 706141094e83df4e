//! Formatting helpers
//!
//! Date rendering (relative and absolute) and HTML escaping shared by the
//! page controllers and renderers.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a backend timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (taken as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// "just now", "5 minutes ago", ... falling back to a calendar date after a week
pub fn format_relative(when: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_relative_in(when, now, &Local)
}

pub fn format_relative_in<Tz: TimeZone>(when: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let diff = now - when;
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        when.with_timezone(tz).format("%b %-d, %Y").to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Relative rendering of a raw backend timestamp; unparseable input is echoed
pub fn format_relative_str(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(when) => format_relative(when, Utc::now()),
        None => raw.to_string(),
    }
}

/// `YYYY-MM-DD HH:MM` in local time
pub fn format_date_time(when: DateTime<Utc>) -> String {
    format_date_time_in(when, &Local)
}

pub fn format_date_time_in<Tz: TimeZone>(when: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    when.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Short month/day chart label ("Oct 18"); unparseable input is echoed
pub fn format_short_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(when) => when.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
