//! Session middleware configuration.
//!
//! Admin logins are kept in `PostgreSQL`-backed sessions (tower-sessions).
//! The cookie carries an opaque session id only; the session record is what
//! proves a login.

use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::SiteConfig;
use crate::db::SCHEMA;

/// Table holding admin sessions, inside [`SCHEMA`].
pub const SESSION_TABLE: &str = "admin_session";

/// Admin login lifetime (7 days), fixed from the moment of login.
pub const ADMIN_SESSION_DAYS: i64 = 7;

/// Create the `PostgreSQL` session store.
///
/// The table is created by `gigbook-cli migrate`, not at startup.
///
/// # Panics
///
/// Panics if the schema or table name is invalid (should never happen with
/// the hardcoded constants).
#[must_use]
pub fn postgres_store(pool: &PgPool) -> PostgresStore {
    PostgresStore::new(pool.clone())
        .with_schema_name(SCHEMA)
        .expect("valid schema name")
        .with_table_name(SESSION_TABLE)
        .expect("valid table name")
}

/// Create the session layer over any session store.
///
/// Sessions are created lazily: nothing is stored and no cookie is set until
/// a login writes to the session.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &SiteConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.admin.cookie_name.clone())
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Expiry for a session created by a login right now.
#[must_use]
pub fn login_expiry() -> Expiry {
    Expiry::AtDateTime(OffsetDateTime::now_utc() + Duration::days(ADMIN_SESSION_DAYS))
}
