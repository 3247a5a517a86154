//! Display formatting and form validation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone pattern is valid"));

/// Placeholder for a missing date
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `Jan 5, 2024`
    Short,
    /// `January 5, 2024`
    #[default]
    Long,
    /// `Jan 5, 2024, 03:04 PM`
    Time,
    /// `3 hours ago`
    Relative,
}

/// Parse an RFC 3339 timestamp, a `YYYY-MM-DD HH:MM:SS` value or a bare date
///
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format a date string; empty input gives `N/A` and unparseable input is
/// returned as is
pub fn format_date(input: &str, format: DateFormat) -> String {
    format_date_at(input, format, Utc::now())
}

/// [`format_date`] with an explicit clock for relative output
pub fn format_date_at(input: &str, format: DateFormat, now: DateTime<Utc>) -> String {
    if input.trim().is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match parse_timestamp(input) {
        Some(date) => format_datetime(date, format, now),
        None => input.to_string(),
    }
}

pub fn format_datetime(date: DateTime<Utc>, format: DateFormat, now: DateTime<Utc>) -> String {
    match format {
        DateFormat::Short => date.format("%b %-d, %Y").to_string(),
        DateFormat::Long => date.format("%B %-d, %Y").to_string(),
        DateFormat::Time => date.format("%b %-d, %Y, %I:%M %p").to_string(),
        DateFormat::Relative => relative_time(date, now),
    }
}

/// Human relative time such as `5 minutes ago`; a month or older falls back
/// to the short date
pub fn relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let plural = |n: i64, unit: &str| {
        if n > 1 {
            format!("{n} {unit}s ago")
        } else {
            format!("{n} {unit} ago")
        }
    };

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else {
        format_datetime(date, DateFormat::Short, now)
    }
}

/// Byte count in binary units, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Shorten text to `max_len` characters including a `...` suffix
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with(text, max_len, "...")
}

pub fn truncate_with(text: &str, max_len: usize, suffix: &str) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// A single field validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    /// Digits, spaces and `+-()` with at least ten digits
    Phone,
    MinLength(usize),
    MaxLength(usize),
    Number,
    Date,
}

impl Rule {
    /// Error message when `value` fails this rule
    ///
    /// Only [`Rule::Required`] rejects an empty value; the rest skip it.
    pub fn check(&self, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return matches!(self, Self::Required).then(|| "This field is required".to_string());
        }

        let ok = match self {
            Self::Required => true,
            Self::Email => EMAIL_PATTERN.is_match(value),
            Self::Phone => {
                PHONE_PATTERN.is_match(value)
                    && value.chars().filter(char::is_ascii_digit).count() >= 10
            }
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::Number => value.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Self::Date => parse_timestamp(value).is_some(),
        };
        if ok {
            return None;
        }

        Some(match self {
            Self::Required => "This field is required".to_string(),
            Self::Email => "Please enter a valid email address".to_string(),
            Self::Phone => "Please enter a valid phone number".to_string(),
            Self::MinLength(min) => format!("Minimum length is {min} characters"),
            Self::MaxLength(max) => format!("Maximum length is {max} characters"),
            Self::Number => "Please enter a valid number".to_string(),
            Self::Date => "Please enter a valid date".to_string(),
        })
    }
}

/// Every message `value` earns against `rules`, in rule order
pub fn validate_field(value: &str, rules: &[Rule]) -> Vec<String> {
    rules.iter().filter_map(|rule| rule.check(value)).collect()
}

/// Per-field validation result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Validate form values against per-field rules
///
/// Fields missing from `data` are validated as empty.
pub fn validate_form<'a, F>(data: F, rules: &[(&str, &[Rule])]) -> FormValidation
where
    F: Fn(&str) -> Option<&'a str>,
{
    let errors = rules
        .iter()
        .filter_map(|(field, field_rules)| {
            let messages = validate_field(data(field).unwrap_or(""), field_rules);
            (!messages.is_empty()).then(|| ((*field).to_string(), messages))
        })
        .collect();
    FormValidation { errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_format_date_modes() {
        let now = at(2024, 3, 1, 12, 0);
        let input = "2024-01-05T15:04:00Z";
        assert_eq!(format_date_at(input, DateFormat::Short, now), "Jan 5, 2024");
        assert_eq!(format_date_at(input, DateFormat::Long, now), "January 5, 2024");
        assert_eq!(format_date_at(input, DateFormat::Time, now), "Jan 5, 2024, 03:04 PM");
        assert_eq!(format_date_at(input, DateFormat::Relative, now), "Jan 5, 2024");
    }

    #[test]
    fn test_format_date_edge_inputs() {
        assert_eq!(format_date("", DateFormat::Long), "N/A");
        assert_eq!(format_date("  ", DateFormat::Short), "N/A");
        assert_eq!(format_date("someday", DateFormat::Long), "someday");
        assert_eq!(format_date("2003-06-14", DateFormat::Long), "June 14, 2003");
    }

    #[test]
    fn test_relative_time() {
        let now = at(2024, 3, 10, 12, 0);
        let half_minute = at(2024, 3, 10, 11, 59) + chrono::Duration::seconds(30);
        assert_eq!(relative_time(half_minute, now), "just now");
        assert_eq!(relative_time(at(2024, 3, 10, 11, 59), now), "1 minute ago");
        assert_eq!(relative_time(at(2024, 3, 10, 11, 15), now), "45 minutes ago");
        assert_eq!(relative_time(at(2024, 3, 10, 9, 0), now), "3 hours ago");
        assert_eq!(relative_time(at(2024, 3, 9, 12, 0), now), "1 day ago");
        assert_eq!(relative_time(at(2024, 2, 20, 12, 0), now), "19 days ago");
        assert_eq!(relative_time(at(2024, 1, 1, 12, 0), now), "Jan 1, 2024");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("Application approved today", 10), "Applica...");
        assert_eq!(truncate_with("abcdef", 4, "…"), "abc…");
        assert_eq!(truncate("abcdef", 2), "...");
    }

    #[test]
    fn test_rules() {
        assert_eq!(Rule::Required.check(" "), Some("This field is required".into()));
        assert_eq!(Rule::Email.check(""), None);
        assert_eq!(Rule::Email.check("a@b.co"), None);
        assert!(Rule::Email.check("a@b").is_some());
        assert_eq!(Rule::Phone.check("+880 (171) 234-5678"), None);
        assert!(Rule::Phone.check("017-1234").is_some());
        assert!(Rule::Phone.check("01712345678x").is_some());
        assert_eq!(
            Rule::MinLength(3).check("ab"),
            Some("Minimum length is 3 characters".into())
        );
        assert_eq!(
            Rule::MaxLength(3).check("abcd"),
            Some("Maximum length is 3 characters".into())
        );
        assert_eq!(Rule::Number.check("3.5"), None);
        assert!(Rule::Number.check("three").is_some());
        assert_eq!(Rule::Date.check("2024-02-29"), None);
        assert!(Rule::Date.check("2023-02-29").is_some());
    }

    #[test]
    fn test_validate_field_collects_all() {
        let errors = validate_field("x", &[Rule::Email, Rule::MinLength(3)]);
        assert_eq!(
            errors,
            vec![
                "Please enter a valid email address".to_string(),
                "Minimum length is 3 characters".to_string()
            ]
        );
    }

    #[test]
    fn test_validate_form() {
        let data: HashMap<&str, &str> =
            HashMap::from([("email", "nope"), ("fullNameEnglish", "Rahim Uddin")]);
        let rules: [(&str, &[Rule]); 3] = [
            ("fullNameEnglish", &[Rule::Required, Rule::MinLength(3)]),
            ("email", &[Rule::Email]),
            ("mobileStudent", &[Rule::Required, Rule::Phone]),
        ];
        let result = validate_form(|field| data.get(field).copied(), &rules);

        assert!(!result.is_valid());
        assert!(result.field("fullNameEnglish").is_empty());
        assert_eq!(result.field("email"), ["Please enter a valid email address"]);
        assert_eq!(result.field("mobileStudent"), ["This field is required"]);
    }
}
