//! Booking intake endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::instrument;

use gigbook_core::{BookingRequestId, BookingSubmission};

use crate::db::BookingRequestRepository;
use crate::error::{AppError, INVALID_BODY_MESSAGE, Result, add_breadcrumb};
use crate::state::AppState;

/// Successful submission response.
#[derive(Debug, Serialize)]
pub struct BookingCreated {
    pub ok: bool,
    pub id: BookingRequestId,
}

/// Store a booking request submitted from the public form.
///
/// POST /api/booking
///
/// Returns `{"ok": true, "id": "<uuid>"}`. A body that isn't a JSON object of
/// the expected shape, or one without name and email, is a 400; a storage
/// failure is a 500. Nothing is stored unless the submission validates.
#[instrument(skip_all, fields(booking_id = tracing::field::Empty))]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingSubmission>, JsonRejection>,
) -> Result<Json<BookingCreated>> {
    let Json(submission) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected booking request body");
        AppError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;

    let new = submission.validate()?;

    let record = BookingRequestRepository::new(state.pool())
        .create(&new)
        .await?;

    tracing::Span::current().record("booking_id", tracing::field::display(&record.id));
    tracing::info!(
        marketing_opt_in = record.marketing_opt_in,
        "Booking request stored"
    );
    add_breadcrumb("booking", "Booking request stored");

    Ok(Json(BookingCreated {
        ok: true,
        id: record.id,
    }))
}
