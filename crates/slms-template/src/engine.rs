//! Placeholder substitution for HTML document templates
//!
//! Templates contain `{{NAME}}` tokens where `NAME` is made of uppercase
//! ASCII letters and underscores. Substitution is a single regex pass over
//! the template; every token is replaced, unresolved ones with the empty
//! string, so no marker ever survives into a rendered document.

use crate::lookup::{DocumentContext, PlaceholderLookup};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").expect("token pattern is valid"));

/// Replace every `{{NAME}}` token in `template` with its lookup value
pub fn replace(template: &str, lookup: &PlaceholderLookup) -> String {
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures<'_>| {
            lookup.resolve(&caps[1]).to_string()
        })
        .into_owned()
}

/// Whether any `{{NAME}}` token is still present
pub fn has_unreplaced(html: &str) -> bool {
    TOKEN_PATTERN.is_match(html)
}

/// Names of the tokens still present, in order of appearance
pub fn unreplaced(html: &str) -> Vec<String> {
    TOKEN_PATTERN
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Distinct token names used by a template, in order of first appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in unreplaced(template) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Renders templates against record data with a fixed document context
///
/// # Examples
///
/// ```
/// use slms_template::PlaceholderEngine;
/// use serde_json::json;
///
/// let engine = PlaceholderEngine::new();
/// let html = engine.render(
///     "<h1>{{STUDENT_NAME}}</h1><p>{{EMAIL}}</p>",
///     &json!({ "fullNameEnglish": "John Doe" }),
/// );
/// assert_eq!(html, "<h1>John Doe</h1><p></p>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlaceholderEngine {
    context: DocumentContext,
}

impl PlaceholderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: DocumentContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &DocumentContext {
        &self.context
    }

    /// Build the flat lookup for a record
    pub fn lookup(&self, record: &Value) -> PlaceholderLookup {
        PlaceholderLookup::from_record(record, &self.context)
    }

    /// Render a template for a record
    ///
    /// A null record leaves the template untouched; there is nothing to
    /// substitute and the caller is still loading data.
    pub fn render(&self, template: &str, record: &Value) -> String {
        if record.is_null() {
            return template.to_string();
        }
        replace(template, &self.lookup(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn engine() -> PlaceholderEngine {
        PlaceholderEngine::with_context(
            DocumentContext::default()
                .with_issue_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        )
    }

    #[test]
    fn test_all_placeholders_replaced() {
        let template = r"
            <div>
              <h1>{{STUDENT_NAME}}</h1>
              <p>Roll: {{ROLL_NUMBER}}</p>
              <p>Department: {{DEPARTMENT}}</p>
              <p>Father: {{FATHER_NAME}}</p>
            </div>";
        let student = json!({
            "fullNameEnglish": "John Doe",
            "currentRollNumber": "12345",
            "department": { "name": "Computer Science" },
            "fatherName": "James Doe",
        });

        let result = engine().render(template, &student);

        assert!(!has_unreplaced(&result));
        assert!(result.contains("John Doe"));
        assert!(result.contains("12345"));
        assert!(result.contains("Computer Science"));
        assert!(result.contains("James Doe"));
        assert!(!result.contains("{{"));
        assert!(!result.contains("}}"));
    }

    #[test]
    fn test_missing_data_becomes_empty() {
        let template = "<p>Email: {{EMAIL}}</p><p>Guardian: {{GUARDIAN_MOBILE}}</p>";
        let result = engine().render(template, &json!({ "fullNameEnglish": "Jane Smith" }));
        assert_eq!(result, "<p>Email: </p><p>Guardian: </p>");
    }

    #[test]
    fn test_unknown_token_becomes_empty() {
        let result = engine().render("[{{NOT_A_FIELD}}]", &json!({ "id": 1 }));
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_flattened_nested_token() {
        let result = engine().render(
            "{{DEPARTMENT_CODE}}",
            &json!({ "department": { "code": "CSE" } }),
        );
        assert_eq!(result, "CSE");
    }

    #[test]
    fn test_non_token_braces_untouched() {
        let template = "{{ STUDENT_NAME }} {{lower}} {{X1}} {STUDENT_NAME}";
        let result = engine().render(template, &json!({ "fullNameEnglish": "A" }));
        assert_eq!(result, template);
    }

    #[test]
    fn test_null_record_leaves_template() {
        let template = "<h1>{{STUDENT_NAME}}</h1>";
        assert_eq!(engine().render(template, &Value::Null), template);
    }

    #[test]
    fn test_replacement_values_are_literal() {
        let mut lookup = PlaceholderLookup::new();
        lookup.insert("PRICE", "$1 {{EMAIL}}");
        assert_eq!(replace("cost {{PRICE}}", &lookup), "cost $1 {{EMAIL}}");
    }

    #[test]
    fn test_unreplaced_listing() {
        let html = "{{A}} and {{B_C}} and {{A}}";
        assert!(has_unreplaced(html));
        assert_eq!(unreplaced(html), vec!["A", "B_C", "A"]);
        assert_eq!(placeholders(html), vec!["A", "B_C"]);
        assert!(!has_unreplaced("plain"));
    }

    #[test]
    fn test_issue_date_from_context() {
        let result = engine().render("Issued {{ISSUE_DATE}}", &json!({}));
        assert_eq!(result, "Issued January 2, 2024");
    }
}
