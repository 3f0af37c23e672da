//! Date formatting with Moment.js-style tokens
//!
//! `site.yml` carries a `date_format` like `DD/MM/YYYY`; templates and the
//! `list` command run it through [`format_date`].

use chrono::{DateTime, TimeZone};

/// Format a date with a Moment.js-style token string
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD/MM/YYYY") // -> "15/01/2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Translate Moment.js tokens to a chrono format string.
///
/// Replacements run in order, longest token first within each letter, and
/// uppercase before lowercase where both exist: every `M` must be gone
/// before `mm` introduces `%M`, and every `D` before `dddd` introduces `%A`.
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"), // January
        ("MMM", "%b"),  // Jan
        ("MM", "%m"),   // 01
        ("M", "%-m"),   // 1
        ("DDDD", "%j"), // day of year
        ("DD", "%d"),   // 05
        ("D", "%-d"),   // 5
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"), // Monday
        ("ddd", "%a"),  // Mon
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
