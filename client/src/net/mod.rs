//! Networking modules for the auth JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and the browser session provider, and `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
