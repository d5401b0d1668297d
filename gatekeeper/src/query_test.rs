use super::*;

#[test]
fn encode_query_escapes_reserved_characters() {
    let encoded = encode_query(&[(REDIRECTED_FROM.to_owned(), "/orders?page=2".to_owned())]);
    assert_eq!(encoded, "redirectedFrom=%2Forders%3Fpage%3D2");
}

#[test]
fn decode_path_percent_decodes() {
    assert_eq!(decode_path("/products/vitamin%20c"), "/products/vitamin c");
}

#[test]
fn decode_path_leaves_invalid_sequences() {
    assert_eq!(decode_path("/bad%FF"), "/bad%FF");
}

#[test]
fn safe_destination_accepts_local_paths() {
    assert_eq!(safe_destination(Some("/orders"), "/"), "/orders");
    assert_eq!(safe_destination(Some("/orders?tab=open"), "/"), "/orders?tab=open");
}

#[test]
fn safe_destination_defaults_when_missing_or_blank() {
    assert_eq!(safe_destination(None, "/"), "/");
    assert_eq!(safe_destination(Some("  "), "/dashboard"), "/dashboard");
}

#[test]
fn safe_destination_rejects_offsite_targets() {
    for raw in ["https://evil.example", "//evil.example/path", "/\\evil.example", "orders"] {
        assert_eq!(safe_destination(Some(raw), "/"), "/", "{raw}");
    }
}

#[test]
fn safe_destination_rejects_control_characters() {
    for raw in ["/\t/evil.example", "/\n/evil.example", "/\r/evil.example", "/orders\u{0}x"] {
        assert_eq!(safe_destination(Some(raw), "/"), "/", "{raw:?}");
    }
}

#[test]
fn safe_destination_trims_surrounding_whitespace() {
    assert_eq!(safe_destination(Some(" /orders\n"), "/"), "/orders");
}
