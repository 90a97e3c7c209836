//! Startup configuration.
//!
//! Loaded once from a JSON file using the same uppercase keys the deployed
//! configuration has always used. Environment variables prefixed `WICKET_`
//! override file values, so the secret key and password can stay out of the
//! file entirely.

use std::path::Path;

use chrono::Duration;
use serde::Deserialize;

use crate::credentials::Credentials;
use crate::crypto::PasswordHasher;
use crate::secret::SecretString;
use crate::session::SessionConfig;
use crate::AuthError;

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "USERNAME")]
    pub username: String,

    /// Plaintext or Argon2 PHC hash; see [`Credentials::from_config_password`].
    #[serde(rename = "PASSWORD")]
    pub password: SecretString,

    /// Key for the session cookie HMAC. At least 32 bytes.
    #[serde(rename = "SECRET_KEY")]
    pub secret_key: SecretString,

    /// Idle window in whole seconds.
    #[serde(rename = "SESSION_IDLE_SECONDS")]
    pub session_idle_seconds: i64,

    #[serde(rename = "BIND_ADDR", default = "default_bind_addr")]
    pub bind_addr: String,

    /// Mark the session cookie `Secure`. Off by default so the server works
    /// without TLS in front; turn on behind HTTPS.
    #[serde(rename = "COOKIE_SECURE", default)]
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Loads configuration from a JSON file, applies `WICKET_*` environment
    /// overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the file cannot be read
    /// or parsed, or if a validation rule fails.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthError::ConfigurationError(format!("failed to read {}: {e}", path.display()))
        })?;

        let mut config: AppConfig = serde_json::from_str(&raw).map_err(|e| {
            AuthError::ConfigurationError(format!("failed to parse {}: {e}", path.display()))
        })?;

        config.apply_env_overrides()?;
        config.validate()?;

        log::info!(
            target: "wicket",
            "msg=\"configuration loaded\" path=\"{}\" username=\"{}\" idle_seconds={} bind_addr=\"{}\"",
            path.display(),
            config.username,
            config.session_idle_seconds,
            config.bind_addr
        );

        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), AuthError> {
        if let Ok(username) = std::env::var("WICKET_USERNAME") {
            self.username = username;
        }
        if let Ok(password) = std::env::var("WICKET_PASSWORD") {
            self.password = SecretString::new(password);
        }
        if let Ok(secret_key) = std::env::var("WICKET_SECRET_KEY") {
            self.secret_key = SecretString::new(secret_key);
        }
        if let Ok(seconds) = std::env::var("WICKET_SESSION_IDLE_SECONDS") {
            self.session_idle_seconds = seconds.parse().map_err(|_| {
                AuthError::ConfigurationError(
                    "WICKET_SESSION_IDLE_SECONDS must be an integer".to_owned(),
                )
            })?;
        }
        if let Ok(bind_addr) = std::env::var("WICKET_BIND_ADDR") {
            self.bind_addr = bind_addr;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if a field is empty, the
    /// secret key is too short, or the idle window is not positive.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.is_empty() {
            return Err(AuthError::ConfigurationError(
                "USERNAME must not be empty".to_owned(),
            ));
        }
        if self.password.is_empty() {
            return Err(AuthError::ConfigurationError(
                "PASSWORD must not be empty".to_owned(),
            ));
        }
        if self.session_idle_seconds <= 0 {
            return Err(AuthError::ConfigurationError(
                "SESSION_IDLE_SECONDS must be positive".to_owned(),
            ));
        }
        self.session_config()
            .validate()
            .map_err(|e| AuthError::ConfigurationError(e.to_owned()))
    }

    /// Cookie and idle-window settings derived from this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cookie_secure: self.cookie_secure,
            idle_timeout: Duration::seconds(self.session_idle_seconds),
            secret_key: self.secret_key.clone(),
            ..Default::default()
        }
    }

    /// The configured credential pair, with a plaintext password hashed
    /// here, once, at startup.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    pub fn credentials<H: PasswordHasher>(&self, hasher: &H) -> Result<Credentials, AuthError> {
        Credentials::from_config_password(hasher, self.username.as_str(), &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AppConfig {
        serde_json::from_str(json).unwrap()
    }

    fn valid_json() -> String {
        r#"{
            "USERNAME": "alice",
            "PASSWORD": "secret",
            "SECRET_KEY": "0123456789abcdef0123456789abcdef",
            "SESSION_IDLE_SECONDS": 300
        }"#
        .to_owned()
    }

    #[test]
    fn test_parse_uppercase_keys() {
        let config = parse(&valid_json());
        assert_eq!(config.username, "alice");
        assert_eq!(config.password.expose_secret(), "secret");
        assert_eq!(config.session_idle_seconds, 300);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_validate_ok() {
        assert!(parse(&valid_json()).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = parse(
            r#"{
                "USERNAME": "alice",
                "PASSWORD": "secret",
                "SECRET_KEY": "short",
                "SESSION_IDLE_SECONDS": 300
            }"#,
        );
        assert!(matches!(
            config.validate(),
            Err(AuthError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nonpositive_idle_window() {
        let config = parse(
            r#"{
                "USERNAME": "alice",
                "PASSWORD": "secret",
                "SECRET_KEY": "0123456789abcdef0123456789abcdef",
                "SESSION_IDLE_SECONDS": 0
            }"#,
        );
        assert!(matches!(
            config.validate(),
            Err(AuthError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_username() {
        let config = parse(
            r#"{
                "USERNAME": "",
                "PASSWORD": "secret",
                "SECRET_KEY": "0123456789abcdef0123456789abcdef",
                "SESSION_IDLE_SECONDS": 300
            }"#,
        );
        assert!(matches!(
            config.validate(),
            Err(AuthError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_session_config_carries_idle_window() {
        let session = parse(&valid_json()).session_config();
        assert_eq!(session.idle_timeout, Duration::seconds(300));
        assert_eq!(
            session.secret_key.expose_secret(),
            "0123456789abcdef0123456789abcdef"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, AuthError::ConfigurationError(_)));
    }
}
