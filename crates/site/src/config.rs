//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL of the site (default: <http://localhost:3000>)
//! - `ADMIN_USER` - Admin login username
//! - `ADMIN_PASS` - Admin login password
//! - `ADMIN_COOKIE_NAME` - Admin session cookie name (default: `gigbook_admin`)
//! - `ADMIN_BOOKINGS_LIMIT` - Maximum rows on the bookings list (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)
//!
//! Leaving `ADMIN_USER` or `ADMIN_PASS` unset (or empty) does not prevent the
//! site from starting; it disables admin login instead.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_COOKIE_NAME: &str = "gigbook_admin";
const DEFAULT_BOOKINGS_LIMIT: i64 = 300;
const MIN_PASSWORD_LENGTH: usize = 12;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "admin",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Admin panel settings
    pub admin: AdminConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Admin panel configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Configured login pair; `None` disables login.
    pub credentials: Option<AdminCredentials>,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Maximum number of rows on the bookings list page.
    pub bookings_limit: i64,
}

/// The single admin username/password pair.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    /// Exact comparison of a submitted pair against the configured pair.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password.expose_secret()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let database_url = env.database_url("SITE_DATABASE_URL")?;
        let host = env.parsed_or_default::<IpAddr>("SITE_HOST", "127.0.0.1")?;
        let port = env.parsed_or_default::<u16>("SITE_PORT", "3000")?;
        let base_url = env.or_default("SITE_BASE_URL", "http://localhost:3000");

        let admin = AdminConfig::from_env(&env)?;

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env.sample_rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = env.sample_rate("SENTRY_TRACES_SAMPLE_RATE", "0.1")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            admin,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AdminConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let username = env.optional("ADMIN_USER").filter(|v| !v.is_empty());
        let password = env.optional("ADMIN_PASS").filter(|v| !v.is_empty());
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(AdminCredentials {
                username,
                password: SecretString::from(password),
            }),
            _ => None,
        };

        let cookie_name = env
            .optional("ADMIN_COOKIE_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        if !cookie_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_COOKIE_NAME".to_string(),
                "only ASCII letters, digits, '_' and '-' are allowed".to_string(),
            ));
        }

        let bookings_limit = env.parsed_or_default::<i64>(
            "ADMIN_BOOKINGS_LIMIT",
            &DEFAULT_BOOKINGS_LIMIT.to_string(),
        )?;
        if bookings_limit < 1 {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_BOOKINGS_LIMIT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            credentials,
            cookie_name,
            bookings_limit,
        })
    }

    /// Describe why the configured admin password looks weak, if it does.
    ///
    /// Weak passwords are accepted; the caller is expected to log this.
    #[must_use]
    pub fn password_warning(&self) -> Option<ConfigError> {
        let credentials = self.credentials.as_ref()?;
        validate_password_strength(credentials.password.expose_secret(), "ADMIN_PASS").err()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup used while loading configuration.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an environment variable, falling back to a default.
    fn parsed_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Parse a sampling rate and check it lies in `0.0..=1.0`.
    fn sample_rate(&self, key: &str, default: &str) -> Result<f32, ConfigError> {
        let rate = self.parsed_or_default::<f32>(key, default)?;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0.0 and 1.0 (got {rate})"),
            ));
        }
        Ok(rate)
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        let non_empty = |key: &str| self.optional(key).filter(|v| !v.is_empty());

        non_empty(primary_key)
            .or_else(|| non_empty("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a password is not a placeholder and has reasonable length and entropy.
fn validate_password_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let length = secret.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("shorter than {MIN_PASSWORD_LENGTH} characters (got {length})"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, want >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SiteConfig::from_lookup(|key| map.get(key).cloned())
    }

    const DB: (&str, &str) = ("SITE_DATABASE_URL", "postgres://localhost/gigbook");

    #[test]
    fn test_defaults() {
        let config = load(&[DB]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.is_secure());
        assert!(config.admin.credentials.is_none());
        assert_eq!(config.admin.cookie_name, "gigbook_admin");
        assert_eq!(config.admin.bookings_limit, 300);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SITE_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fly/db")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fly/db");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[DB, ("SITE_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "SITE_PORT"));
    }

    #[test]
    fn test_credentials_require_both_values() {
        let config = load(&[DB, ("ADMIN_USER", "ziko")]).unwrap();
        assert!(config.admin.credentials.is_none());

        let config = load(&[DB, ("ADMIN_USER", "ziko"), ("ADMIN_PASS", "")]).unwrap();
        assert!(config.admin.credentials.is_none());

        let config = load(&[DB, ("ADMIN_USER", "ziko"), ("ADMIN_PASS", "s3cr3t")]).unwrap();
        let credentials = config.admin.credentials.unwrap();
        assert!(credentials.matches("ziko", "s3cr3t"));
        assert!(!credentials.matches("ziko", "s3cr3t "));
        assert!(!credentials.matches("Ziko", "s3cr3t"));
    }

    #[test]
    fn test_cookie_name_rejects_separators() {
        let err = load(&[DB, ("ADMIN_COOKIE_NAME", "a;b")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "ADMIN_COOKIE_NAME"));

        let config = load(&[DB, ("ADMIN_COOKIE_NAME", "zf_admin")]).unwrap();
        assert_eq!(config.admin.cookie_name, "zf_admin");
    }

    #[test]
    fn test_bookings_limit_must_be_positive() {
        assert!(load(&[DB, ("ADMIN_BOOKINGS_LIMIT", "0")]).is_err());
        assert!(load(&[DB, ("ADMIN_BOOKINGS_LIMIT", "-5")]).is_err());
        let config = load(&[DB, ("ADMIN_BOOKINGS_LIMIT", "25")]).unwrap();
        assert_eq!(config.admin.bookings_limit, 25);
    }

    #[test]
    fn test_sample_rate_range() {
        assert!(load(&[DB, ("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        let config = load(&[DB, ("SENTRY_TRACES_SAMPLE_RATE", "0.25")]).unwrap();
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_https_base_url_is_secure() {
        let config = load(&[DB, ("SITE_BASE_URL", "https://zikofranco.com")]).unwrap();
        assert!(config.is_secure());
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_password_warning() {
        let weak = load(&[DB, ("ADMIN_USER", "ziko"), ("ADMIN_PASS", "changeme123")]).unwrap();
        assert!(matches!(
            weak.admin.password_warning(),
            Some(ConfigError::InsecureSecret(_, _))
        ));

        let short = load(&[DB, ("ADMIN_USER", "ziko"), ("ADMIN_PASS", "k9$Tq")]).unwrap();
        assert!(short.admin.password_warning().is_some());

        let strong = load(&[
            DB,
            ("ADMIN_USER", "ziko"),
            ("ADMIN_PASS", "aB3$xY9!mK2@nL5#pQ7&"),
        ])
        .unwrap();
        assert!(strong.admin.password_warning().is_none());

        let unset = load(&[DB]).unwrap();
        assert!(unset.admin.password_warning().is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = AdminCredentials {
            username: "ziko".to_string(),
            password: SecretString::from("super_secret_value"),
        };
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("ziko"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_value"));
    }
}
