//! Transport-level failures and their user-facing text.

use std::fmt::{Display, Formatter};

/// Bodies longer than this are never shown to the user as-is.
const MAX_RAW_BODY_CHARS: usize = 200;

/// Failure talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure; no response was received.
    Network { message: String },
    /// The backend answered with a non-success status.
    Http { status: u16, body: String },
    /// The response arrived but could not be understood.
    Decode { message: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { message } => write!(f, "network error: {}", message),
            Self::Http { status, .. } => write!(f, "HTTP {}", status),
            Self::Decode { message } => write!(f, "unexpected response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Converts any API failure into the text shown to the user.
///
/// Network failures keep the transport's own reason in parentheses.
/// Backend JSON is searched for `message`, then `error` (string or
/// `{message}`), then `detail` (string or a list of `{msg}`). A short plain
/// body is shown as-is; anything else falls back to the status code.
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Network { message } => format!(
            "Network error ({}). Please check your connection and try again.",
            message.trim()
        ),
        ApiError::Decode { .. } => "Received an unexpected response from the server.".to_string(),
        ApiError::Http { status, body } => backend_message(body)
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
    }
}

fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => message_from_json(&value),
        Err(_) => plain_body(trimmed),
    }
}

fn message_from_json(value: &serde_json::Value) -> Option<String> {
    if let Some(message) = non_blank(value.get("message")) {
        return Some(message);
    }

    if let Some(error) = value.get("error") {
        if let Some(message) = non_blank(Some(error)).or_else(|| non_blank(error.get("message"))) {
            return Some(message);
        }
    }

    match value.get("detail") {
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| non_blank(item.get("msg")).or_else(|| non_blank(Some(item))))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        detail => non_blank(detail),
    }
}

fn non_blank(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn plain_body(body: &str) -> Option<String> {
    let looks_like_markup = body.starts_with('<');
    if looks_like_markup || body.chars().count() > MAX_RAW_BODY_CHARS {
        return None;
    }
    Some(body.to_string())
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
