//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::{BookingRequestRepository, BookingStats};
use crate::error::PageError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::admin::bookings::BookingView;
use crate::state::AppState;

/// Number of requests listed under "Recent requests".
pub const RECENT_LIMIT: i64 = 5;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_username: Option<String>,
    pub stats: BookingStats,
    pub recent: Vec<BookingView>,
}

/// Display the admin dashboard.
///
/// GET /admin
#[instrument(skip_all)]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<DashboardTemplate, PageError> {
    let repo = BookingRequestRepository::new(state.pool());
    let stats = repo.stats().await?;
    let recent = repo.list_recent(RECENT_LIMIT).await?;

    Ok(DashboardTemplate {
        admin_username: Some(admin.username),
        stats,
        recent: recent.iter().map(BookingView::from).collect(),
    })
}
