//! Core types for Gigbook.

pub mod booking;
pub mod id;

pub use booking::{BookingRequest, BookingSubmission, BookingValidationError, NewBookingRequest};
pub use id::{BookingRequestId, IdParseError};
