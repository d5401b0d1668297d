use super::*;

#[test]
fn anonymous_session_envelope_decodes_to_none() {
    let envelope: SessionEnvelope = serde_json::from_str(r#"{"session":null}"#).expect("decode");
    assert_eq!(envelope.session, None);
}

#[test]
fn redacted_session_envelope_keeps_identity() {
    let raw = r#"{"session":{
        "access_token":"","refresh_token":"","expires_at":1700000000,
        "user":{"id":"2b0f6f2c-5d43-4c1e-9a55-0d3c1c7d9e11","email":"glow@example.com"}
    }}"#;
    let envelope: SessionEnvelope = serde_json::from_str(raw).expect("decode");
    let session = envelope.session.expect("session");
    assert_eq!(session.identity().and_then(|u| u.email.as_deref()), Some("glow@example.com"));
}

#[test]
fn credentials_serialize_as_flat_object() {
    let body = serde_json::to_value(Credentials { email: "a@b.com", password: "pw" }).expect("encode");
    assert_eq!(body, serde_json::json!({ "email": "a@b.com", "password": "pw" }));
}

#[test]
fn signup_response_reads_redirect() {
    let resp: SignupResponse = serde_json::from_str(r#"{"redirect":"/check-email?email=a%40b.com"}"#).expect("decode");
    assert_eq!(resp.redirect, "/check-email?email=a%40b.com");
}
