//! JSON API handlers.
//!
//! Every response uses the `{"ok": ...}` envelope; failures go through
//! [`crate::error::AppError`].

pub mod admin_login;
pub mod booking;
