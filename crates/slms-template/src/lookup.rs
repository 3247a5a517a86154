//! Flat placeholder lookup built from nested record data
//!
//! Templates only understand flat `{{NAME}}` tokens, while records coming
//! from the API are nested camelCase JSON objects. [`PlaceholderLookup`]
//! bridges the two in three layers, each overriding the previous one:
//!
//! 1. every scalar leaf of the record, keyed by its SCREAMING_SNAKE path
//!    (`department.name` becomes `DEPARTMENT_NAME`);
//! 2. the standard student aliases (`STUDENT_NAME`, `ROLL_NUMBER`, ...),
//!    including formatted dates and addresses;
//! 3. document context values such as the issue date and institute name.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Shown on ID cards and admit cards when the student has no photo
pub const DEFAULT_PHOTO: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"160\" height=\"160\"%3E%3Crect fill=\"%23e5e7eb\" width=\"160\" height=\"160\"/%3E%3C/svg%3E";

/// Token name → record field, copied verbatim
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("STUDENT_NAME", "fullNameEnglish"),
    ("STUDENT_NAME_BANGLA", "fullNameBangla"),
    ("FATHER_NAME", "fatherName"),
    ("MOTHER_NAME", "motherName"),
    ("GENDER", "gender"),
    ("BLOOD_GROUP", "bloodGroup"),
    ("RELIGION", "religion"),
    ("ROLL_NUMBER", "currentRollNumber"),
    ("REGISTRATION_NUMBER", "currentRegistrationNumber"),
    ("SEMESTER", "semester"),
    ("SESSION", "session"),
    ("SHIFT", "shift"),
    ("GROUP", "currentGroup"),
    ("MOBILE_STUDENT", "mobileStudent"),
    ("GUARDIAN_MOBILE", "guardianMobile"),
    ("EMAIL", "email"),
    ("EMERGENCY_CONTACT", "emergencyContact"),
];

/// Address parts in the order they are printed
const ADDRESS_PARTS: &[&str] = &[
    "village",
    "municipality",
    "postOffice",
    "policeStation",
    "subDistrict",
    "district",
    "division",
];

/// Institution and exam values that do not come from the student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentContext {
    pub institute_name: String,
    pub institute_logo: String,
    pub principal_name: String,
    pub principal_signature: String,
    pub exam_name: String,
    pub exam_center: String,
    /// Defaults to the issue date when unset
    pub exam_date: Option<NaiveDate>,
    pub exam_time: String,
    pub issue_date: NaiveDate,
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self {
            institute_name: "Sylhet Institute of Professional Institute".to_string(),
            institute_logo: String::new(),
            principal_name: "Dr. Principal Name".to_string(),
            principal_signature: String::new(),
            exam_name: "Final Examination".to_string(),
            exam_center: "Main Campus".to_string(),
            exam_date: None,
            exam_time: "10:00 AM - 1:00 PM".to_string(),
            issue_date: chrono::Local::now().date_naive(),
        }
    }
}

impl DocumentContext {
    pub fn with_institute_name(mut self, name: impl Into<String>) -> Self {
        self.institute_name = name.into();
        self
    }

    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = date;
        self
    }

    pub fn with_exam(mut self, name: impl Into<String>, date: Option<NaiveDate>) -> Self {
        self.exam_name = name.into();
        self.exam_date = date;
        self
    }
}

/// Flat `NAME → value` map consulted by the placeholder engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderLookup {
    values: HashMap<String, String>,
}

impl PlaceholderLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup for a record (usually a student) and document context
    pub fn from_record(record: &Value, context: &DocumentContext) -> Self {
        let mut lookup = Self::new();
        lookup.flatten("", record);
        lookup.apply_aliases(record);
        lookup.apply_context(record, context);
        lookup
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value for a token, empty when unknown
    pub fn resolve(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn flatten(&mut self, prefix: &str, value: &Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let segment = screaming_snake(key);
                    let name = if prefix.is_empty() {
                        segment
                    } else {
                        format!("{prefix}_{segment}")
                    };
                    self.flatten(&name, child);
                }
            }
            Value::Array(_) | Value::Null => {}
            scalar if !prefix.is_empty() => {
                if let Some(text) = scalar_to_string(scalar) {
                    self.insert(prefix, text);
                }
            }
            _ => {}
        }
    }

    fn apply_aliases(&mut self, record: &Value) {
        for (name, field) in FIELD_ALIASES {
            let text = record.get(*field).and_then(scalar_to_string).unwrap_or_default();
            self.insert(*name, text);
        }

        let department = match record.get("department") {
            Some(Value::Object(dept)) => dept
                .get("name")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            Some(other) => scalar_to_string(other).unwrap_or_default(),
            None => String::new(),
        };
        self.insert("DEPARTMENT", department);

        let dob = record
            .get("dateOfBirth")
            .and_then(Value::as_str)
            .map(format_date)
            .unwrap_or_default();
        self.insert("DATE_OF_BIRTH", dob);

        self.insert(
            "PRESENT_ADDRESS",
            record.get("presentAddress").map(format_address).unwrap_or_default(),
        );
        self.insert(
            "PERMANENT_ADDRESS",
            record
                .get("permanentAddress")
                .map(format_address)
                .unwrap_or_default(),
        );
    }

    fn apply_context(&mut self, record: &Value, context: &DocumentContext) {
        let photo = record
            .get("profilePhoto")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PHOTO);
        self.insert("STUDENT_PHOTO", photo);
        self.insert("QR_CODE", "");

        self.insert("ISSUE_DATE", format_naive_date(context.issue_date));
        self.insert("INSTITUTE_NAME", context.institute_name.as_str());
        self.insert("INSTITUTE_LOGO", context.institute_logo.as_str());
        self.insert("PRINCIPAL_NAME", context.principal_name.as_str());
        self.insert("PRINCIPAL_SIGNATURE", context.principal_signature.as_str());
        self.insert("EXAM_NAME", context.exam_name.as_str());
        self.insert("EXAM_CENTER", context.exam_center.as_str());
        self.insert(
            "EXAM_DATE",
            format_naive_date(context.exam_date.unwrap_or(context.issue_date)),
        );
        self.insert("EXAM_TIME", context.exam_time.as_str());
    }
}

impl FromIterator<(String, String)> for PlaceholderLookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Convert a camelCase / kebab-case / snake_case key to SCREAMING_SNAKE
pub fn screaming_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;

    for ch in key.chars() {
        if matches!(ch, '-' | ' ' | '.' | '_') {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        out.extend(ch.to_uppercase());
    }

    out
}

/// Format a date string as `Month D, YYYY`; unparseable input yields ""
pub fn format_date(input: &str) -> String {
    parse_date(input).map(format_naive_date).unwrap_or_default()
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Join the non-empty address parts with `", "`
pub fn format_address(address: &Value) -> String {
    let Value::Object(map) = address else {
        return String::new();
    };

    ADDRESS_PARTS
        .iter()
        .filter_map(|part| map.get(*part).and_then(scalar_to_string))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
