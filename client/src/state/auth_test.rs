use futures::executor::block_on;
use gatekeeper::SessionError;

use super::*;
use crate::state::test_helpers::{RecordingNavigator, StubProvider, session_with_user};

fn run(provider: &StubProvider, scope: &MountScope) -> (Option<GuardPhase>, Vec<String>) {
    let navigator = RecordingNavigator::default();
    let phase = block_on(verify_on_mount(provider, &navigator, scope));
    (phase, navigator.visits())
}

#[test]
fn initial_phase_is_checking() {
    assert_eq!(GuardPhase::default(), GuardPhase::Checking);
}

#[test]
fn session_authenticates_without_navigation() {
    let provider = StubProvider::answering(Ok(Some(session_with_user())));
    let (phase, visits) = run(&provider, &MountScope::new());
    assert_eq!(phase, Some(GuardPhase::Authenticated));
    assert!(visits.is_empty());
}

#[test]
fn missing_session_redirects_to_login_without_error() {
    let provider = StubProvider::answering(Ok(None));
    let (phase, visits) = run(&provider, &MountScope::new());
    assert_eq!(phase, Some(GuardPhase::Redirecting));
    assert_eq!(visits, vec!["/login"]);
}

#[test]
fn lookup_failure_shows_error_and_redirects() {
    let provider = StubProvider::answering(Err(SessionError::Network("offline".into())));
    let (phase, visits) = run(&provider, &MountScope::new());
    assert_eq!(phase, Some(GuardPhase::Error(VERIFY_FAILED_MESSAGE.to_owned())));
    assert_eq!(visits, vec!["/login"]);
}

#[test]
fn unmount_during_lookup_discards_result() {
    for result in [Ok(Some(session_with_user())), Ok(None), Err(SessionError::Decode("bad".into()))] {
        let scope = MountScope::new();
        let provider = StubProvider::unmounting(result, &scope);
        let (phase, visits) = run(&provider, &scope);
        assert_eq!(phase, None);
        assert!(visits.is_empty());
    }
}
