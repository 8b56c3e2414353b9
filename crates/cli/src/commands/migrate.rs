//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Site migrations live in `crates/site/migrations/` and are embedded at
//! build time. The admin session table is created by the session store
//! itself, in the same `site` schema.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use gigbook_site::middleware::postgres_store;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Read the database URL the same way the server does.
fn database_url(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, MigrationError> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    non_empty("SITE_DATABASE_URL")
        .or_else(|| non_empty("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("SITE_DATABASE_URL"))
}

/// Run the site migrations and create the session table.
///
/// # Errors
///
/// Returns an error if the URL is missing, the database is unreachable, or a
/// migration fails.
pub async fn site() -> Result<(), MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url(|key| std::env::var(key).ok())?;

    tracing::info!("Connecting to site database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running site migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    tracing::info!("Creating session table...");
    postgres_store(&pool).migrate().await?;

    tracing::info!("Site migrations complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_prefers_site_variable() {
        let url = database_url(|key| match key {
            "SITE_DATABASE_URL" => Some("postgres://site".to_string()),
            "DATABASE_URL" => Some("postgres://fallback".to_string()),
            _ => None,
        });
        assert_eq!(url.unwrap().expose_secret(), "postgres://site");
    }

    #[test]
    fn test_database_url_falls_back() {
        let url = database_url(|key| match key {
            "SITE_DATABASE_URL" => Some(String::new()),
            "DATABASE_URL" => Some("postgres://fallback".to_string()),
            _ => None,
        });
        assert_eq!(url.unwrap().expose_secret(), "postgres://fallback");
    }

    #[test]
    fn test_database_url_missing() {
        assert!(matches!(
            database_url(|_| None),
            Err(MigrationError::MissingEnvVar("SITE_DATABASE_URL"))
        ));
    }
}
