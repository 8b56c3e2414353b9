//! Admin login endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::set_current_admin;
use crate::models::AdminSession;
use crate::state::AppState;

/// Submitted credentials. Missing fields are empty strings.
#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginSuccess {
    pub ok: bool,
}

/// Check the submitted pair against the configured admin credentials.
///
/// POST /api/admin/login
///
/// A malformed or missing body is treated as empty credentials. On success
/// the session id is rotated, the admin is stored in the session with a
/// one-week expiry, and the session layer sets the cookie.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginSuccess>> {
    let credentials = state
        .config()
        .admin
        .credentials
        .as_ref()
        .ok_or_else(|| AppError::Config("ADMIN_USER/ADMIN_PASS not set".to_string()))?;

    let request = payload.map(|Json(body)| body).unwrap_or_default();

    if !credentials.matches(&request.username, &request.password) {
        tracing::info!("Admin login rejected");
        return Err(AppError::Auth);
    }

    set_current_admin(&session, &AdminSession::new(request.username)).await?;

    tracing::info!("Admin logged in");
    add_breadcrumb("auth", "Admin logged in");

    Ok(Json(LoginSuccess { ok: true }))
}
