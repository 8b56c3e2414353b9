//! Domain models for the site.
//!
//! Booking records live in `gigbook-core`; this module only holds what the
//! server keeps in the session.

pub mod session;

pub use session::{AdminSession, keys as session_keys};
