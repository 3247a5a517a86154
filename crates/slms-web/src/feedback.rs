//! User feedback for failed and successful operations
//!
//! [`error_message`] turns a [`ClientError`] into the sentence shown to the
//! user and [`handle_error`] bundles it with the follow-up actions a screen
//! has to take (toasts, clearing the session, leaving for the login page).

use serde::Serialize;
use serde_json::Value;
use slms_client::ClientError;
use std::fmt;
use std::time::Duration;
use tracing::{error, warn};

pub const NETWORK_MESSAGE: &str =
    "Unable to connect to the server. Please check your internet connection and try again.";
pub const TIMEOUT_MESSAGE: &str = "The request is taking longer than expected. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const FORBIDDEN_MESSAGE: &str = "You don't have permission to perform this action.";
const FORBIDDEN_TOAST: &str = "You don't have permission to perform this action";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const SERVER_MESSAGE: &str = "Something went wrong on our end. Please try again later.";

/// Where the user is sent after a 401
pub const LOGIN_PATH: &str = "/login";

/// Delay before leaving for the login page
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// How long a toast of this kind stays on screen
    pub fn default_duration(&self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_millis(3000),
            Self::Error => Duration::from_millis(5000),
            Self::Warning => Duration::from_millis(4000),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "x-circle",
            Self::Warning => "alert-triangle",
            Self::Info => "info",
        }
    }

    pub fn background_class(&self) -> &'static str {
        match self {
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
            Self::Warning => "bg-yellow-500",
            Self::Info => "bg-blue-500",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: kind.default_duration(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Toast markup; the message is escaped
    pub fn render(&self) -> String {
        format!(
            concat!(
                r#"<div class="toast toast-{kind} animate-slide-in">"#,
                r#"<div class="{bg} text-white px-6 py-4 rounded-lg shadow-lg flex items-center gap-3 min-w-[300px] max-w-[500px]">"#,
                r#"<i data-lucide="{icon}" class="w-5 h-5 flex-shrink-0"></i>"#,
                r#"<span class="flex-1">{message}</span>"#,
                r#"<button class="flex-shrink-0 hover:opacity-75"><i data-lucide="x" class="w-4 h-4"></i></button>"#,
                "</div></div>"
            ),
            kind = self.kind,
            bg = self.kind.background_class(),
            icon = self.kind.icon(),
            message = crate::format::escape_html(&self.message),
        )
    }
}

/// What a screen should do after an API error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOutcome {
    pub message: String,
    /// Toasts to show, in order
    pub toasts: Vec<Toast>,
    /// Drop the stored auth token
    pub clear_session: bool,
    /// Navigate here after [`LOGIN_REDIRECT_DELAY`]
    pub redirect: Option<&'static str>,
}

/// Options for [`handle_error_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorOptions {
    pub show_toast: bool,
    pub redirect_on_401: bool,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            show_toast: true,
            redirect_on_401: true,
        }
    }
}

/// User-facing message for a client error
pub fn error_message(err: &ClientError) -> String {
    match err {
        ClientError::Network(_) => NETWORK_MESSAGE.to_string(),
        ClientError::Timeout => TIMEOUT_MESSAGE.to_string(),
        ClientError::Http(e) if e.is_timeout() => TIMEOUT_MESSAGE.to_string(),
        ClientError::Http(e) if e.is_connect() => NETWORK_MESSAGE.to_string(),
        ClientError::Status {
            status,
            message,
            details,
        } => status_message(*status, message, details.as_ref()),
        other => other.to_string(),
    }
}

fn status_message(status: u16, message: &str, details: Option<&Value>) -> String {
    let message = Some(message).filter(|m| !m.is_empty());
    match status {
        400 => match details {
            Some(details) => format_validation_errors(details),
            None => message
                .unwrap_or("Invalid request. Please check your input.")
                .to_string(),
        },
        401 => SESSION_EXPIRED_MESSAGE.to_string(),
        403 => FORBIDDEN_MESSAGE.to_string(),
        404 => NOT_FOUND_MESSAGE.to_string(),
        409 => message
            .unwrap_or("This action conflicts with existing data.")
            .to_string(),
        500 | 502 | 503 => SERVER_MESSAGE.to_string(),
        _ => message.unwrap_or("An unexpected error occurred.").to_string(),
    }
}

/// Format server validation details as `field: msg1, msg2` lines
pub fn format_validation_errors(details: &Value) -> String {
    const FALLBACK: &str = "Validation error occurred";

    match details {
        Value::String(s) => s.clone(),
        Value::Object(fields) => {
            let lines: Vec<String> = fields
                .iter()
                .filter_map(|(field, messages)| match messages {
                    Value::Array(items) => {
                        let joined = items
                            .iter()
                            .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
                            .collect::<Vec<_>>()
                            .join(", ");
                        Some(format!("{field}: {joined}"))
                    }
                    Value::String(s) => Some(format!("{field}: {s}")),
                    _ => None,
                })
                .collect();
            if lines.is_empty() {
                FALLBACK.to_string()
            } else {
                lines.join("\n")
            }
        }
        _ => FALLBACK.to_string(),
    }
}

/// [`handle_error_with`] using the default options
pub fn handle_error(err: &ClientError) -> ErrorOutcome {
    handle_error_with(err, ErrorOptions::default())
}

/// Log an error and work out the user feedback for it
pub fn handle_error_with(err: &ClientError, options: ErrorOptions) -> ErrorOutcome {
    error!(error = %err, status = ?err.status(), "API error");

    let message = error_message(err);
    let mut toasts = Vec::new();
    if options.show_toast {
        toasts.push(Toast::error(message.clone()));
    }

    let unauthorized = err.is_unauthorized() && options.redirect_on_401;
    if unauthorized {
        warn!("Session expired, clearing credentials");
    } else if err.status() == Some(403) && options.show_toast {
        toasts.push(Toast::error(FORBIDDEN_TOAST));
    }

    ErrorOutcome {
        message,
        toasts,
        clear_session: unauthorized,
        redirect: unauthorized.then_some(LOGIN_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(status: u16, message: &str, details: Option<Value>) -> ClientError {
        ClientError::Status {
            status,
            message: message.to_string(),
            details,
        }
    }

    #[test]
    fn test_transport_messages() {
        assert_eq!(
            error_message(&ClientError::Network("refused".into())),
            NETWORK_MESSAGE
        );
        assert_eq!(error_message(&ClientError::Timeout), TIMEOUT_MESSAGE);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(error_message(&status(401, "x", None)), SESSION_EXPIRED_MESSAGE);
        assert_eq!(error_message(&status(403, "x", None)), FORBIDDEN_MESSAGE);
        assert_eq!(error_message(&status(404, "x", None)), NOT_FOUND_MESSAGE);
        assert_eq!(error_message(&status(502, "x", None)), SERVER_MESSAGE);
        assert_eq!(error_message(&status(409, "Roll taken", None)), "Roll taken");
        assert_eq!(
            error_message(&status(409, "", None)),
            "This action conflicts with existing data."
        );
        assert_eq!(error_message(&status(418, "Teapot", None)), "Teapot");
    }

    #[test]
    fn test_bad_request_without_details() {
        assert_eq!(error_message(&status(400, "Bad roll", None)), "Bad roll");
        assert_eq!(
            error_message(&status(400, "", None)),
            "Invalid request. Please check your input."
        );
    }

    #[test]
    fn test_validation_details() {
        let details = json!({
            "email": ["Enter a valid email address.", "Too long."],
            "semester": "Must be between 1 and 8",
            "ignored": 5,
        });
        assert_eq!(
            error_message(&status(400, "Validation failed", Some(details))),
            "email: Enter a valid email address., Too long.\nsemester: Must be between 1 and 8"
        );
    }

    #[test]
    fn test_validation_details_fallbacks() {
        assert_eq!(format_validation_errors(&json!("plain")), "plain");
        assert_eq!(
            format_validation_errors(&json!({ "a": 1 })),
            "Validation error occurred"
        );
        assert_eq!(format_validation_errors(&json!(3)), "Validation error occurred");
    }

    #[test]
    fn test_handle_unauthorized() {
        let outcome = handle_error(&status(401, "expired", None));
        assert!(outcome.clear_session);
        assert_eq!(outcome.redirect, Some(LOGIN_PATH));
        assert_eq!(outcome.toasts, vec![Toast::error(SESSION_EXPIRED_MESSAGE)]);
    }

    #[test]
    fn test_handle_unauthorized_without_redirect() {
        let outcome = handle_error_with(
            &status(401, "expired", None),
            ErrorOptions {
                show_toast: false,
                redirect_on_401: false,
            },
        );
        assert!(!outcome.clear_session);
        assert!(outcome.redirect.is_none());
        assert!(outcome.toasts.is_empty());
    }

    #[test]
    fn test_handle_forbidden_adds_second_toast() {
        let outcome = handle_error(&status(403, "nope", None));
        assert_eq!(outcome.toasts.len(), 2);
        assert!(!outcome.clear_session);
    }

    #[test]
    fn test_toast_durations() {
        assert_eq!(Toast::success("ok").duration, Duration::from_secs(3));
        assert_eq!(Toast::error("no").duration, Duration::from_secs(5));
        assert_eq!(Toast::warning("hm").duration, Duration::from_secs(4));
        assert_eq!(Toast::info("fyi").duration, Duration::from_secs(3));
        assert_eq!(
            Toast::info("fyi")
                .with_duration(Duration::from_secs(1))
                .duration,
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_toast_render_escapes() {
        let html = Toast::error("<b>bad</b>").render();
        assert!(html.contains("toast-error"));
        assert!(html.contains("bg-red-500"));
        assert!(html.contains("x-circle"));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
    }

    #[test]
    fn test_toast_serializes_millis() {
        let value = serde_json::to_value(Toast::warning("w")).unwrap();
        assert_eq!(value, json!({ "kind": "warning", "message": "w", "duration": 4000 }));
    }
}
