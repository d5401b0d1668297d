use super::*;

// =============================================================================
// classify
// =============================================================================

#[test]
fn root_is_public() {
    assert_eq!(classify("/"), RouteClass::Public);
}

#[test]
fn empty_path_is_treated_as_root() {
    assert_eq!(classify(""), RouteClass::Public);
}

#[test]
fn auth_pages_are_auth_only() {
    for path in ["/login", "/signup", "/forgot-password"] {
        assert_eq!(classify(path), RouteClass::AuthOnly, "{path}");
    }
}

#[test]
fn marketing_and_callback_pages_are_public() {
    for path in [
        "/auth/callback",
        "/check-email",
        "/api/auth/callback",
        "/_next/static/chunk.js",
        "/favicon.ico",
        "/pkg/storefront.wasm",
        "/api/auth/session",
        "/api/auth/recover",
        "/healthz",
    ] {
        assert_eq!(classify(path), RouteClass::Public, "{path}");
    }
}

#[test]
fn account_pages_are_protected() {
    for path in ["/dashboard", "/orders", "/orders/42", "/consultation", "/api/orders"] {
        assert_eq!(classify(path), RouteClass::Protected, "{path}");
    }
}

#[test]
fn root_entry_does_not_cover_every_path() {
    assert_eq!(classify("/profile"), RouteClass::Protected);
}

#[test]
fn prefix_requires_segment_boundary() {
    assert_eq!(classify("/loginx"), RouteClass::Protected);
    assert_eq!(classify("/check-emails"), RouteClass::Protected);
}

#[test]
fn nested_segments_inherit_class() {
    assert_eq!(classify("/login/sso"), RouteClass::AuthOnly);
    assert_eq!(classify("/auth/callback/extra"), RouteClass::Public);
}

#[test]
fn query_and_fragment_are_ignored() {
    assert_eq!(classify("/login?redirectedFrom=%2Forders"), RouteClass::AuthOnly);
    assert_eq!(classify("/check-email#top"), RouteClass::Public);
    assert_eq!(classify("/orders?page=2"), RouteClass::Protected);
}

#[test]
fn every_auth_only_path_is_also_listed_public() {
    for path in AUTH_ONLY_PATHS {
        assert!(PUBLIC_PATHS.contains(path), "{path} missing from PUBLIC_PATHS");
    }
}

// =============================================================================
// matches_prefix
// =============================================================================

#[test]
fn matches_prefix_exact() {
    assert!(matches_prefix("/signup", "/signup"));
}

#[test]
fn matches_prefix_root_only_matches_root() {
    assert!(matches_prefix("/", "/"));
    assert!(!matches_prefix("/orders", "/"));
}
