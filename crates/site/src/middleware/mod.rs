//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with method, uri, `request_id`)
//! 3. Request ID (assign or propagate `x-request-id`)
//! 4. Security headers (CSP, frame and sniffing protection, cache policy)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Admin gate (redirect anonymous `/admin/*` requests to login)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    OptionalAdmin, RequireAdmin, admin_gate, clear_current_admin, current_admin, safe_next,
    set_current_admin,
};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, postgres_store};
