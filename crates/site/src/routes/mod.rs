//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Public page with the booking form
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # API (JSON)
//! POST /api/booking            - Submit a booking request
//! POST /api/admin/login        - Admin login, starts a session
//!
//! # Admin (gated, except login/logout)
//! GET  /admin/login            - Login page
//! GET  /admin/logout           - End the session, back to /
//! GET  /admin                  - Dashboard
//! GET  /admin/bookings         - Recent booking requests
//! GET  /admin/bookings/{id}    - One booking request
//! ```

pub mod admin;
pub mod api;
pub mod health;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::PageError;
use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/booking", post(api::booking::submit))
        .route("/admin/login", post(api::admin_login::login))
}

/// Create the admin pages router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard::index))
        .route("/login", get(admin::auth::login_page))
        .route("/logout", get(admin::auth::logout))
        .route("/bookings", get(admin::bookings::index))
        .route("/bookings/{id}", get(admin::bookings::show))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .nest("/admin", admin_routes())
}

/// Fallback for unmatched paths.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
