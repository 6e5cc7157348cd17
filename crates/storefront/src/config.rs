//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `ADMIN_EMAIL` - Email address of the dashboard administrator
//! - `ADMIN_PASSWORD_HASH` - Argon2 PHC hash of the administrator password
//!   (generate with `hs-cli admin hash-password`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CONTACT_SUBMIT_DELAY_MS` - Simulated contact submission latency (default: 2000)
//! - `LOGIN_SUBMIT_DELAY_MS` - Simulated login latency (default: 1500)
//! - `STOREFRONT_SEED_DEMO_CART` - Seed new sessions with the demo cart (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use argon2::password_hash::PasswordHash;
use hafiz_sajid_core::Email;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Dashboard administrator credentials
    pub admin: AdminConfig,
    /// Fixed latency of the simulated contact submission
    pub contact_submit_delay: Duration,
    /// Fixed latency of the simulated login check
    pub login_submit_delay: Duration,
    /// Whether fresh sessions start with the demo cart
    pub seed_demo_cart: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Administrator credentials.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct AdminConfig {
    /// Administrator email address
    pub email: Email,
    /// Argon2 PHC string for the administrator password
    pub password_hash: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
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

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required keys are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parse_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or_default("STOREFRONT_PORT", "3000")?;
        let base_url = env.required("STOREFRONT_BASE_URL")?;
        let admin = AdminConfig::from_env(&env)?;
        let contact_submit_delay =
            Duration::from_millis(env.parse_or_default("CONTACT_SUBMIT_DELAY_MS", "2000")?);
        let login_submit_delay =
            Duration::from_millis(env.parse_or_default("LOGIN_SUBMIT_DELAY_MS", "1500")?);
        let seed_demo_cart = env.flag("STOREFRONT_SEED_DEMO_CART")?;
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env.parse_or_default("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = env.parse_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.1")?;

        Ok(Self {
            host,
            port,
            base_url,
            admin,
            contact_submit_delay,
            login_submit_delay,
            seed_demo_cart,
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
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = Email::parse(env.required("ADMIN_EMAIL")?.trim())
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_EMAIL".to_string(), e.to_string()))?;
        let password_hash = env.required_secret("ADMIN_PASSWORD_HASH")?;
        validate_password_hash(&password_hash, "ADMIN_PASSWORD_HASH")?;

        Ok(Self {
            email,
            password_hash,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Key lookup with the typed accessors used above.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a required variable as a secret.
    fn required_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        Ok(SecretString::from(value))
    }

    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.optional(key).unwrap_or_else(|| default.to_string());
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Parse a boolean flag. Accepts true/false, 1/0, yes/no; unset is false.
    fn flag(&self, key: &str) -> Result<bool, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(false);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got {other:?}"),
            )),
        }
    }
}

/// Validate that a password hash is a well-formed PHC string.
fn validate_password_hash(hash: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    PasswordHash::new(hash.expose_secret()).map_err(|e| {
        ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("not a PHC password hash ({e})"),
        )
    })?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    // Well-formed Argon2id PHC string
    const ADMIN_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$2aTS8Qxh1X2hcAtyiCyNdWcjcBFBsvHSFU2qvvAtEvU";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("STOREFRONT_BASE_URL", "http://localhost:3000"),
            ("ADMIN_EMAIL", "admin@hafizsajid.com"),
            ("ADMIN_PASSWORD_HASH", ADMIN_HASH),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&minimal())).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.contact_submit_delay, Duration::from_millis(2000));
        assert_eq!(config.login_submit_delay, Duration::from_millis(1500));
        assert!(!config.seed_demo_cart);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let mut pairs = minimal();
        pairs.extend([
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("CONTACT_SUBMIT_DELAY_MS", "0"),
            ("STOREFRONT_SEED_DEMO_CART", "yes"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ]);
        let config = StorefrontConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.socket_addr().port(), 8080);
        assert_eq!(config.contact_submit_delay, Duration::ZERO);
        assert!(config.seed_demo_cart);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_missing_required() {
        let err = StorefrontConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "STOREFRONT_BASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = minimal();
        pairs.push(("STOREFRONT_PORT", "eighty"));
        let err = StorefrontConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_flag() {
        let mut pairs = minimal();
        pairs.push(("STOREFRONT_SEED_DEMO_CART", "maybe"));
        assert!(StorefrontConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_rejects_plaintext_password() {
        let pairs = vec![
            ("STOREFRONT_BASE_URL", "http://localhost:3000"),
            ("ADMIN_EMAIL", "admin@hafizsajid.com"),
            ("ADMIN_PASSWORD_HASH", "admin123"),
        ];
        let err = StorefrontConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ADMIN_PASSWORD_HASH"));
    }

    #[test]
    fn test_rejects_malformed_admin_email() {
        let pairs = vec![
            ("STOREFRONT_BASE_URL", "http://localhost:3000"),
            ("ADMIN_EMAIL", "admin"),
            ("ADMIN_PASSWORD_HASH", ADMIN_HASH),
        ];
        let err = StorefrontConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ADMIN_EMAIL"));
    }

    #[test]
    fn test_admin_config_debug_redacts_hash() {
        let config = StorefrontConfig::from_lookup(lookup(&minimal())).unwrap();
        let debug_output = format!("{:?}", config.admin);

        assert!(debug_output.contains("admin@hafizsajid.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }
}
