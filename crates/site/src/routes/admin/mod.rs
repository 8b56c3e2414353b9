//! Admin page handlers.
//!
//! Everything here except [`auth`] sits behind the access gate.

pub mod auth;
pub mod bookings;
pub mod dashboard;
