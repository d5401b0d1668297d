//! Browser-side auth state machines.
//!
//! DESIGN
//! ======
//! Each machine is a plain async function over injected capabilities
//! (session provider, navigator, mount scope) returning the next phase.
//! Components own the signals; these modules own the transitions.

pub mod auth;
pub mod callback;

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::cell::RefCell;

    use gatekeeper::{Session, SessionError, SessionProvider, SessionUser};

    use crate::util::auth::{MountScope, Navigator};

    pub const USER_ID: &str = "2b0f6f2c-5d43-4c1e-9a55-0d3c1c7d9e11";

    pub fn session_with_user() -> Session {
        Session {
            access_token: String::new(),
            refresh_token: String::new(),
            expires_at: 1_700_000_000,
            user: Some(SessionUser { id: USER_ID.parse().expect("uuid"), email: Some("glow@example.com".into()) }),
        }
    }

    pub fn session_without_user() -> Session {
        Session { user: None, ..session_with_user() }
    }

    /// Provider answering every lookup with a fixed result. When `unmount`
    /// is set, the scope is closed while the lookup is in flight.
    pub struct StubProvider {
        pub result: Result<Option<Session>, SessionError>,
        pub unmount: Option<MountScope>,
    }

    impl StubProvider {
        pub fn answering(result: Result<Option<Session>, SessionError>) -> Self {
            Self { result, unmount: None }
        }

        pub fn unmounting(result: Result<Option<Session>, SessionError>, scope: &MountScope) -> Self {
            Self { result, unmount: Some(scope.clone()) }
        }
    }

    #[async_trait::async_trait]
    impl SessionProvider for StubProvider {
        async fn get_session(&self) -> Result<Option<Session>, SessionError> {
            if let Some(scope) = &self.unmount {
                scope.close();
            }
            self.result.clone()
        }
    }

    /// Navigator that records every destination.
    #[derive(Default)]
    pub struct RecordingNavigator {
        visits: RefCell<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn visits(&self) -> Vec<String> {
            self.visits.borrow().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, to: &str) {
            self.visits.borrow_mut().push(to.to_owned());
        }
    }
}
