//! Gigbook Core - Shared domain types.
//!
//! This crate provides the types used across the Gigbook components:
//! - `site` - Public booking page and the admin panel
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. The optional `postgres` feature adds `sqlx` encoding for
//! the identifier types.
//!
//! # Modules
//!
//! - [`types`] - Booking request records, submissions and their validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
