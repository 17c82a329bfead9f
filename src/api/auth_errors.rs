//! Login-provider error codes translated to fixed user-facing text.

use regex::Regex;

const AUTH_CODE_PATTERN: &str = r"auth/[a-z0-9-]+";

/// Shown for anything we cannot explain better.
pub const GENERIC_AUTH_MESSAGE: &str = "Something went wrong. Please try again.";

/// Provider messages shorter than this are not worth showing.
const MIN_INFORMATIVE_CHARS: usize = 20;

const AUTH_MESSAGES: &[(&str, &str)] = &[
    ("auth/invalid-email", "Please enter a valid email address."),
    ("auth/user-disabled", "This account has been disabled."),
    ("auth/user-not-found", "No account found with this email."),
    ("auth/wrong-password", "Incorrect password. Please try again."),
    (
        "auth/invalid-credential",
        "Invalid email or password. Please try again.",
    ),
    (
        "auth/email-already-in-use",
        "An account with this email already exists.",
    ),
    (
        "auth/weak-password",
        "Password should be at least 6 characters.",
    ),
    (
        "auth/too-many-requests",
        "Too many attempts. Please wait a moment and try again.",
    ),
    (
        "auth/network-request-failed",
        "Network error. Please check your connection.",
    ),
    (
        "auth/popup-closed-by-user",
        "Sign-in was cancelled before it finished.",
    ),
    (
        "auth/requires-recent-login",
        "Please sign in again to continue.",
    ),
    ("auth/expired-action-code", "This link has expired."),
    ("auth/invalid-action-code", "This link is invalid or was already used."),
];

/// Extracts the first `auth/...` code from a raw provider message.
pub fn auth_error_code(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    match Regex::new(AUTH_CODE_PATTERN) {
        Ok(re) => re.find(&lower).map(|m| m.as_str().to_string()),
        Err(_) => None,
    }
}

/// Maps a raw login error to the message shown to the user.
///
/// Known codes map through the table. Unknown codes get the generic text.
/// Without a code, the raw message is used only when it is long enough to
/// be informative.
pub fn auth_error_message(raw: &str) -> String {
    if let Some(code) = auth_error_code(raw) {
        let known = AUTH_MESSAGES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, message)| (*message).to_string());
        if known.is_none() {
            tracing::debug!(code = %code, "Unmapped auth error code");
        }
        return known.unwrap_or_else(|| GENERIC_AUTH_MESSAGE.to_string());
    }

    let trimmed = raw.trim();
    if trimmed.chars().count() >= MIN_INFORMATIVE_CHARS {
        trimmed.to_string()
    } else {
        GENERIC_AUTH_MESSAGE.to_string()
    }
}

#[cfg(test)]
#[path = "tests/auth_errors_tests.rs"]
mod tests;
