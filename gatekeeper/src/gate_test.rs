use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use super::*;
use crate::provider::CookieOptions;
use crate::routes::PUBLIC_PATHS;
use crate::session::{Session, SessionError, SessionUser};

// =============================================================================
// FAKES
// =============================================================================

#[derive(Default)]
struct MemoryCookies {
    values: HashMap<String, String>,
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: String, _options: CookieOptions) {
        self.values.insert(name.to_owned(), value);
    }

    fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }
}

enum Outcome {
    Session,
    /// Session found after the lookup rewrote the cookie.
    Rotated,
    Anonymous,
    Failure,
}

struct MockProvider {
    outcome: Outcome,
    lookups: AtomicUsize,
    refreshes: AtomicUsize,
    refresh_error: Mutex<Option<SessionError>>,
}

impl MockProvider {
    fn new(outcome: Outcome) -> Self {
        Self { outcome, lookups: AtomicUsize::new(0), refreshes: AtomicUsize::new(0), refresh_error: Mutex::new(None) }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

fn sample_session() -> Session {
    Session {
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        expires_at: i64::MAX,
        user: Some(SessionUser { id: Uuid::nil(), email: Some("glow@example.com".into()) }),
    }
}

#[async_trait::async_trait]
impl CookieSessionProvider for MockProvider {
    async fn get_session(&self, cookies: &mut dyn CookieStore) -> Result<Option<Session>, SessionError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Outcome::Session => Ok(Some(sample_session())),
            Outcome::Rotated => {
                cookies.set("touched", "1".into(), CookieOptions::default());
                Ok(Some(sample_session()))
            }
            Outcome::Anonymous => Ok(None),
            Outcome::Failure => Err(SessionError::Network("connection refused".into())),
        }
    }

    async fn refresh_session(&self, _cookies: &mut dyn CookieStore) -> Result<(), SessionError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        match self.refresh_error.lock().expect("refresh mutex").take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

async fn run(path: &str, provider: &MockProvider) -> GateDecision {
    let mut cookies = MemoryCookies::default();
    decide(path, provider, &mut cookies).await
}

fn param<'a>(target: &'a RedirectTarget, key: &str) -> Option<&'a str> {
    target.query.iter().find_map(|(k, v)| (k == key).then_some(v.as_str()))
}

fn redirect(decision: GateDecision) -> RedirectTarget {
    match decision {
        GateDecision::Redirect(target) => target,
        GateDecision::PassThrough => panic!("expected redirect"),
    }
}

// =============================================================================
// PUBLIC PATHS
// =============================================================================

#[tokio::test]
async fn public_paths_skip_session_lookup() {
    let provider = MockProvider::new(Outcome::Failure);
    for path in PUBLIC_PATHS.iter().filter(|p| classify(p) == RouteClass::Public) {
        assert_eq!(run(path, &provider).await, GateDecision::PassThrough, "{path}");
    }
    assert_eq!(provider.lookups(), 0);
}

#[tokio::test]
async fn nested_public_asset_skips_session_lookup() {
    let provider = MockProvider::new(Outcome::Anonymous);
    assert_eq!(run("/_next/static/app.js", &provider).await, GateDecision::PassThrough);
    assert_eq!(provider.lookups(), 0);
}

// =============================================================================
// PROTECTED PATHS
// =============================================================================

#[tokio::test]
async fn protected_without_session_redirects_to_login_with_origin() {
    let provider = MockProvider::new(Outcome::Anonymous);
    let target = redirect(run("/orders", &provider).await);
    assert_eq!(target.path, "/login");
    assert_eq!(param(&target, "redirectedFrom"), Some("/orders"));
    assert_eq!(target.to_location(), "/login?redirectedFrom=%2Forders");
}

#[tokio::test]
async fn redirected_from_is_percent_decoded() {
    let provider = MockProvider::new(Outcome::Anonymous);
    let target = redirect(run("/products/vitamin%20c", &provider).await);
    assert_eq!(param(&target, "redirectedFrom"), Some("/products/vitamin c"));
}

#[tokio::test]
async fn protected_with_session_passes_and_refreshes_once() {
    let provider = MockProvider::new(Outcome::Session);
    let decision = run("/dashboard", &provider).await;
    assert_eq!(decision, GateDecision::PassThrough);
    assert_eq!(provider.lookups(), 1);
    assert_eq!(provider.refreshes(), 1);
}

#[tokio::test]
async fn session_rotated_by_lookup_is_not_refreshed_again() {
    let provider = MockProvider::new(Outcome::Rotated);
    let mut cookies = MemoryCookies::default();
    let decision = decide("/dashboard", &provider, &mut cookies).await;
    assert_eq!(decision, GateDecision::PassThrough);
    assert_eq!(provider.lookups(), 1);
    assert_eq!(provider.refreshes(), 0);
    assert_eq!(cookies.get("touched").as_deref(), Some("1"));
}

#[tokio::test]
async fn refresh_failure_does_not_change_decision() {
    let provider = MockProvider::new(Outcome::Session);
    *provider.refresh_error.lock().expect("refresh mutex") = Some(SessionError::Network("timeout".into()));
    assert_eq!(run("/consultation", &provider).await, GateDecision::PassThrough);
}

#[tokio::test]
async fn lookup_failure_redirects_with_session_error() {
    let provider = MockProvider::new(Outcome::Failure);
    for path in ["/dashboard", "/orders/7", "/signup"] {
        let target = redirect(run(path, &provider).await);
        assert_eq!(target.to_location(), "/login?error=session_error", "{path}");
    }
}

// =============================================================================
// AUTH-ONLY PATHS
// =============================================================================

#[tokio::test]
async fn login_with_session_redirects_to_dashboard() {
    let provider = MockProvider::new(Outcome::Session);
    let target = redirect(run("/login", &provider).await);
    assert_eq!(target.to_location(), "/dashboard");
    assert_eq!(provider.refreshes(), 0);
}

#[tokio::test]
async fn signup_without_session_passes() {
    let provider = MockProvider::new(Outcome::Anonymous);
    assert_eq!(run("/signup", &provider).await, GateDecision::PassThrough);
    assert_eq!(provider.lookups(), 1);
}

#[tokio::test]
async fn login_lookup_failure_passes_instead_of_looping() {
    let provider = MockProvider::new(Outcome::Failure);
    assert_eq!(run("/login", &provider).await, GateDecision::PassThrough);
}

// =============================================================================
// POLICY
// =============================================================================

#[test]
fn login_redirect_maps_both_denials_to_login() {
    assert_eq!(login_redirect(Denial::NoSession, "/x").path, "/login");
    assert_eq!(login_redirect(Denial::SessionCheckFailed, "/x").path, "/login");
}

#[test]
fn login_redirect_for_failure_hides_requested_path() {
    let target = login_redirect(Denial::SessionCheckFailed, "/orders");
    assert_eq!(param(&target, "redirectedFrom"), None);
    assert_eq!(param(&target, "error"), Some("session_error"));
}

#[test]
fn redirect_target_without_query_renders_bare_path() {
    assert_eq!(RedirectTarget::new("/dashboard").to_location(), "/dashboard");
}
