use super::*;

fn http(status: u16, body: &str) -> ApiError {
    ApiError::Http {
        status,
        body: body.to_string(),
    }
}

#[test]
fn message_field_wins() {
    let err = http(400, r#"{"message":"Campaign already reviewed","error":"x"}"#);
    assert_eq!(error_message(&err), "Campaign already reviewed");
}

#[test]
fn error_field_as_string_or_object() {
    assert_eq!(
        error_message(&http(409, r#"{"error":"Bid already finalized"}"#)),
        "Bid already finalized"
    );
    assert_eq!(
        error_message(&http(409, r#"{"error":{"message":"Nested failure"}}"#)),
        "Nested failure"
    );
}

#[test]
fn detail_list_is_joined() {
    let body = r#"{"detail":[{"msg":"field required"},{"msg":"value is not a url"}]}"#;
    assert_eq!(
        error_message(&http(422, body)),
        "field required; value is not a url"
    );
}

#[test]
fn blank_fields_fall_through_to_status() {
    let err = http(500, r#"{"message":"   ","detail":[]}"#);
    assert_eq!(error_message(&err), "Request failed with status 500");
}

#[test]
fn short_plain_body_is_shown_but_html_is_not() {
    assert_eq!(error_message(&http(502, "Bad Gateway")), "Bad Gateway");
    assert_eq!(
        error_message(&http(502, "<html><body>nginx</body></html>")),
        "Request failed with status 502"
    );
    let long = "x".repeat(500);
    assert_eq!(
        error_message(&http(500, &long)),
        "Request failed with status 500"
    );
}

#[test]
fn network_error_keeps_the_transport_reason() {
    let network = ApiError::Network {
        message: "connection refused".to_string(),
    };
    assert_eq!(
        error_message(&network),
        "Network error (connection refused). Please check your connection and try again."
    );
    assert!(!network.is_unauthorized());

    let decode = ApiError::Decode {
        message: "eof".to_string(),
    };
    assert!(error_message(&decode).contains("unexpected response"));
}

#[test]
fn unauthorized_is_only_401() {
    assert!(http(401, "").is_unauthorized());
    assert!(!http(403, "").is_unauthorized());
    assert_eq!(http(403, "").status(), Some(403));
}
