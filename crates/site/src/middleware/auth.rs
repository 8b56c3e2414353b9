//! Admin access gate and session helpers.
//!
//! The gate runs on every request. Paths under `/admin` (except the login and
//! logout pages) require a session holding an [`AdminSession`]; anyone else
//! is redirected to `/admin/login?next=<path>`.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::PageError;
use crate::middleware::session::login_expiry;
use crate::models::{AdminSession, session_keys};

/// Root of every gated path.
pub const ADMIN_PREFIX: &str = "/admin";
/// Login page, reachable without a session.
pub const LOGIN_PATH: &str = "/admin/login";
/// Logout endpoint, reachable without a session.
pub const LOGOUT_PATH: &str = "/admin/logout";
/// Where a successful login lands when no valid `next` was given.
pub const DEFAULT_NEXT: &str = "/admin";

/// Whether the gate applies to `path`.
#[must_use]
pub fn is_gated_path(path: &str) -> bool {
    let under_admin = path == ADMIN_PREFIX
        || path
            .strip_prefix(ADMIN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'));

    under_admin && !path.starts_with(LOGIN_PATH) && !path.starts_with(LOGOUT_PATH)
}

/// Login URL that returns to `path` afterwards.
#[must_use]
pub fn login_redirect_target(path: &str) -> String {
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(path))
}

/// Accept a post-login target only if it stays on this site.
///
/// Anything that is not a plain absolute path (`//host`, `/\host`, full
/// URLs, empty values) falls back to [`DEFAULT_NEXT`].
#[must_use]
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\')
                && !target.chars().any(char::is_control) =>
        {
            target.to_string()
        }
        _ => DEFAULT_NEXT.to_string(),
    }
}

/// Access gate middleware.
///
/// Install with `axum::middleware::from_fn(admin_gate)` inside the session
/// layer.
pub async fn admin_gate(session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !is_gated_path(&path) {
        return next.run(request).await;
    }

    match current_admin(&session).await {
        Ok(Some(admin)) => {
            tracing::Span::current().record("admin", admin.username.as_str());
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!(path = %path, "No admin session, redirecting to login");
            Redirect::to(&login_redirect_target(&path)).into_response()
        }
        Err(e) => PageError::Internal(format!("failed to load session: {e}")).into_response(),
    }
}

/// Read the logged-in admin from the session, if any.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn current_admin(
    session: &Session,
) -> Result<Option<AdminSession>, tower_sessions::session::Error> {
    session.get::<AdminSession>(session_keys::ADMIN).await
}

/// Record a successful login in the session.
///
/// Rotates the session id first so a pre-login id can never become an
/// authenticated one, then pins the expiry to one week from now.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &AdminSession,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::ADMIN, admin).await?;
    session.set_expiry(Some(login_expiry()));
    Ok(())
}

/// Destroy the session (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot delete the record.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

/// Extractor for the logged-in admin on gated pages.
///
/// The gate has already redirected anonymous visitors by the time a handler
/// runs; this hands the handler the session identity and redirects again if
/// the route was mounted outside the gate by mistake.
pub struct RequireAdmin(pub AdminSession);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// Redirect to login, returning to the given path.
    RedirectToLogin(String),
    /// Session layer missing or session store failure.
    Session(PageError),
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(path) => {
                Redirect::to(&login_redirect_target(&path)).into_response()
            }
            Self::Session(err) => err.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts.extensions.get::<Session>().ok_or_else(|| {
            AdminRejection::Session(PageError::Internal("session layer missing".to_string()))
        })?;

        current_admin(session)
            .await
            .map_err(|e| AdminRejection::Session(PageError::Internal(e.to_string())))?
            .map(Self)
            .ok_or_else(|| AdminRejection::RedirectToLogin(parts.uri.path().to_owned()))
    }
}

/// Extractor that optionally gets the logged-in admin.
///
/// Never rejects; a missing layer or unreadable session counts as logged out.
pub struct OptionalAdmin(pub Option<AdminSession>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => current_admin(session).await.ok().flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}
