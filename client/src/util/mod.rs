//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/router concerns from the guard state
//! machines so those stay testable off the browser.

pub mod auth;
