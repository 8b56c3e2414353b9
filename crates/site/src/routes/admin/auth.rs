//! Admin login page and logout.
//!
//! The login form itself posts JSON to `/api/admin/login` from
//! `static/js/login.js`; this module only serves the page and ends sessions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Query,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::PageError;
use crate::filters;
use crate::middleware::{OptionalAdmin, clear_current_admin, safe_next};

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginPageTemplate {
    /// Where to go after a successful login; always a same-site path.
    pub next: String,
    pub admin_username: Option<String>,
}

/// Render the login page.
///
/// GET /admin/login
#[instrument(skip_all)]
pub async fn login_page(
    OptionalAdmin(admin): OptionalAdmin,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    LoginPageTemplate {
        next: safe_next(query.next.as_deref()),
        admin_username: admin.map(|a| a.username),
    }
}

/// End the admin session and go back to the public page.
///
/// GET /admin/logout
///
/// A session that cannot be deleted from the store is a server error.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect, PageError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| PageError::Internal(format!("failed to delete admin session: {e}")))?;

    tracing::info!("Admin logged out");
    Ok(Redirect::to("/"))
}
