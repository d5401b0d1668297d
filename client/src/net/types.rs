//! Wire DTOs for the `/api/auth/*` endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use gatekeeper::Session;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/auth/session`. Tokens arrive blanked.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionEnvelope {
    pub session: Option<Session>,
}

/// Body of `POST /api/auth/login` and `POST /api/auth/signup`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/auth/recover`.
#[derive(Clone, Debug, Serialize)]
pub struct RecoverRequest<'a> {
    pub email: &'a str,
}

/// Sign-up answer: where the browser goes next.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignupResponse {
    pub redirect: String,
}
