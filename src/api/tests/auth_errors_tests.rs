use super::*;

#[test]
fn extracts_code_from_provider_text() {
    assert_eq!(
        auth_error_code("Firebase: Error (auth/wrong-password)."),
        Some("auth/wrong-password".to_string())
    );
    assert_eq!(auth_error_code("plain failure"), None);
}

#[test]
fn known_codes_use_table() {
    assert_eq!(
        auth_error_message("Firebase: Error (auth/user-not-found)."),
        "No account found with this email."
    );
    assert_eq!(
        auth_error_message("FIREBASE: ERROR (AUTH/TOO-MANY-REQUESTS)"),
        "Too many attempts. Please wait a moment and try again."
    );
}

#[test]
fn unknown_code_is_generic() {
    assert_eq!(
        auth_error_message("Firebase: Error (auth/quota-exceeded-for-project-xyz)."),
        GENERIC_AUTH_MESSAGE
    );
}

#[test]
fn short_messages_are_generic_long_ones_pass_through() {
    assert_eq!(auth_error_message("oops"), GENERIC_AUTH_MESSAGE);
    assert_eq!(auth_error_message("   "), GENERIC_AUTH_MESSAGE);
    assert_eq!(
        auth_error_message("  Your organisation requires SSO sign-in  "),
        "Your organisation requires SSO sign-in"
    );
}
