//! Unified error handling with Sentry integration.
//!
//! Two boundaries exist:
//! - [`AppError`] for the JSON endpoints, rendered as `{"ok": false, "error": ...}`
//! - [`PageError`] for server-rendered pages, rendered as an HTML page
//!
//! Server errors are captured to Sentry and logged before responding; their
//! details never reach the client.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use gigbook_core::BookingValidationError;

use crate::db::RepositoryError;
use crate::filters;

/// Client-facing message for a submission without name or email.
pub const MISSING_FIELDS_MESSAGE: &str = "Name and email are required.";

/// Client-facing message for a body that is not the expected JSON object.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

/// Application-level error type for the JSON endpoints.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submitted data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials did not match.
    #[error("Invalid credentials")]
    Auth,

    /// Server configuration needed by the request is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<BookingValidationError> for AppError {
    fn from(_: BookingValidationError) -> Self {
        Self::Validation(MISSING_FIELDS_MESSAGE.to_string())
    }
}

/// JSON body of every failed API response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth => StatusCode::UNAUTHORIZED,
            Self::Config(_) | Self::Storage(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Auth => "Invalid credentials".to_string(),
            Self::Config(_) => "Admin not configured".to_string(),
            // Don't expose internal error details to clients
            Self::Storage(_) | Self::Session(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            ok: false,
            error: self.client_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error type for server-rendered pages.
#[derive(Debug, Error)]
pub enum PageError {
    /// The requested page or record does not exist.
    #[error("Not found")]
    NotFound,

    /// Something failed on the server.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for PageError {
    fn from(err: RepositoryError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Not-found page.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
struct NotFoundTemplate;

/// Generic server error page.
#[derive(Template, WebTemplate)]
#[template(path = "errors/server_error.html")]
struct ServerErrorTemplate;

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, NotFoundTemplate).into_response(),
            Self::Internal(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Page error"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate).into_response()
            }
        }
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::Auth), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::Config("ADMIN_USER".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Storage(RepositoryError::Database(
                sqlx::Error::PoolTimedOut
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_error_envelope() {
        let err: AppError = BookingValidationError::MissingEmail.into();
        let json = body_json(err.into_response()).await;
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], MISSING_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let err = AppError::Storage(RepositoryError::DataCorruption(
            "row 42 is broken".to_string(),
        ));
        let json = body_json(err.into_response()).await;
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_config_error_message() {
        let err = AppError::Config("ADMIN_USER/ADMIN_PASS not set".to_string());
        let json = body_json(err.into_response()).await;
        assert_eq!(json["error"], "Admin not configured");
    }

    #[tokio::test]
    async fn test_page_not_found_renders_html() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Not found"));
    }

    #[test]
    fn test_page_error_from_repository() {
        let err: PageError = RepositoryError::Conflict("dup".to_string()).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
