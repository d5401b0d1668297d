//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Validation and message
//! selection live in plain functions next to the page so they can be tested
//! without a browser.

pub mod auth_callback;
pub mod check_email;
pub mod dashboard;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod signup;
