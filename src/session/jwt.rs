//! Unverified JWT claim reads.
//!
//! The backend verifies tokens; the client only peeks at claims to label the
//! session.

use base64::Engine;

fn decode_claims(token: &str) -> Option<serde_json::Value> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&payload).ok()
}

/// Returns a string claim from the token payload.
pub fn extract_claim(token: &str, claim: &str) -> Option<String> {
    decode_claims(token)?
        .get(claim)
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

pub fn extract_email_from_jwt(token: &str) -> Option<String> {
    extract_claim(token, "email")
}

/// Actor id from `sub`, `user_id` or `creator_id`; the first non-empty one wins.
pub fn extract_subject_from_jwt(token: &str) -> Option<String> {
    let claims = decode_claims(token)?;
    ["sub", "user_id", "creator_id"]
        .iter()
        .find_map(|key| {
            claims
                .get(*key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .map(String::from)
}
