use futures::executor::block_on;
use gatekeeper::SessionError;

use super::*;
use crate::state::test_helpers::{RecordingNavigator, StubProvider, session_with_user, session_without_user};

fn run(provider: &StubProvider, redirect_to: Option<&str>) -> (Option<CallbackPhase>, Vec<String>) {
    let navigator = RecordingNavigator::default();
    let phase = block_on(complete_sign_in(provider, redirect_to, &navigator, &MountScope::new()));
    (phase, navigator.visits())
}

// =============================================================================
// redirect_destination / check_email_recipient
// =============================================================================

#[test]
fn destination_defaults_to_home() {
    assert_eq!(redirect_destination(None), "/");
    assert_eq!(redirect_destination(Some("")), "/");
}

#[test]
fn destination_keeps_same_site_path_with_query() {
    assert_eq!(redirect_destination(Some("/orders/7?tab=items")), "/orders/7?tab=items");
}

#[test]
fn destination_rejects_offsite_targets() {
    for raw in ["https://evil.example", "//evil.example/path", "/\\evil.example", "orders", "/\t/evil.example"] {
        assert_eq!(redirect_destination(Some(raw)), "/", "{raw:?}");
    }
}

#[test]
fn recipient_reads_email_or_falls_back() {
    assert_eq!(check_email_recipient(Some("glow@example.com")), "glow@example.com");
    assert_eq!(check_email_recipient(Some("   ")), "your email");
    assert_eq!(check_email_recipient(None), "your email");
}

// =============================================================================
// complete_sign_in
// =============================================================================

#[test]
fn signed_in_user_is_sent_to_destination() {
    let provider = StubProvider::answering(Ok(Some(session_with_user())));
    let (phase, visits) = run(&provider, Some("/dashboard"));
    assert_eq!(phase, Some(CallbackPhase::Success { destination: "/dashboard".into() }));
    assert_eq!(visits, vec!["/dashboard"]);
}

#[test]
fn signed_in_user_returns_to_orders() {
    let provider = StubProvider::answering(Ok(Some(session_with_user())));
    let (phase, visits) = run(&provider, Some("/orders"));
    assert_eq!(phase, Some(CallbackPhase::Success { destination: "/orders".into() }));
    assert_eq!(visits, vec!["/orders"]);
}

#[test]
fn smuggled_offsite_redirect_goes_home_instead() {
    let provider = StubProvider::answering(Ok(Some(session_with_user())));
    for raw in ["/\t/evil.example", "/\n/evil.example", "/\r/evil.example"] {
        let (_, visits) = run(&provider, Some(raw));
        assert_eq!(visits, vec!["/"], "{raw:?}");
    }
}

#[test]
fn signed_in_user_without_redirect_goes_home() {
    let provider = StubProvider::answering(Ok(Some(session_with_user())));
    let (_, visits) = run(&provider, None);
    assert_eq!(visits, vec!["/"]);
}

#[test]
fn lookup_failure_is_terminal_error_without_navigation() {
    let provider = StubProvider::answering(Err(SessionError::Network("offline".into())));
    let (phase, visits) = run(&provider, Some("/dashboard"));
    assert_eq!(phase, Some(CallbackPhase::Error(CALLBACK_FAILED_MESSAGE.to_owned())));
    assert!(visits.is_empty());
}

#[test]
fn missing_session_or_identity_is_error_without_navigation() {
    for session in [None, Some(session_without_user())] {
        let provider = StubProvider::answering(Ok(session));
        let (phase, visits) = run(&provider, Some("/dashboard"));
        assert_eq!(phase, Some(CallbackPhase::Error(NO_SESSION_MESSAGE.to_owned())));
        assert!(visits.is_empty());
    }
}

#[test]
fn unmount_during_lookup_skips_navigation() {
    let scope = MountScope::new();
    let provider = StubProvider::unmounting(Ok(Some(session_with_user())), &scope);
    let navigator = RecordingNavigator::default();
    let phase = block_on(complete_sign_in(&provider, Some("/dashboard"), &navigator, &scope));
    assert_eq!(phase, None);
    assert!(navigator.visits().is_empty());
}
