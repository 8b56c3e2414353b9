//! Booking request list and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use gigbook_core::{BookingRequest, BookingRequestId};

use crate::db::BookingRequestRepository;
use crate::error::PageError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Shown in place of an absent optional field.
pub const ABSENT: &str = "—";

/// Booking request formatted for templates.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city_venue: String,
    pub event_date: String,
    pub details: String,
    pub marketing_opt_in: bool,
    pub created_at: String,
}

impl From<&BookingRequest> for BookingView {
    fn from(booking: &BookingRequest) -> Self {
        let or_absent =
            |value: &Option<String>| value.clone().unwrap_or_else(|| ABSENT.to_string());

        Self {
            id: booking.id.to_string(),
            name: booking.name.clone(),
            email: booking.email.clone(),
            city_venue: or_absent(&booking.city_venue),
            event_date: or_absent(&booking.event_date),
            details: or_absent(&booking.details),
            marketing_opt_in: booking.marketing_opt_in,
            created_at: booking.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Booking list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/bookings/index.html")]
pub struct BookingsIndexTemplate {
    pub admin_username: Option<String>,
    pub bookings: Vec<BookingView>,
    pub limit: i64,
}

/// Booking detail template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/bookings/show.html")]
pub struct BookingShowTemplate {
    pub admin_username: Option<String>,
    pub booking: BookingView,
}

/// List the most recent booking requests, newest first.
///
/// GET /admin/bookings
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<BookingsIndexTemplate, PageError> {
    let limit = state.config().admin.bookings_limit;
    let bookings = BookingRequestRepository::new(state.pool())
        .list_recent(limit)
        .await?;

    Ok(BookingsIndexTemplate {
        admin_username: Some(admin.username),
        bookings: bookings.iter().map(BookingView::from).collect(),
        limit,
    })
}

/// Show one booking request.
///
/// GET /admin/bookings/{id}
///
/// Unknown ids and ids that are not UUIDs both render the not-found page.
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BookingShowTemplate, PageError> {
    let id: BookingRequestId = id.parse().map_err(|_| PageError::NotFound)?;

    let booking = BookingRequestRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or(PageError::NotFound)?;

    Ok(BookingShowTemplate {
        admin_username: Some(admin.username),
        booking: BookingView::from(&booking),
    })
}
