use chrono::Duration;

use crate::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

/// Cookie attributes, idle window, and signing secret for the session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    /// Maximum gap between accepted requests before the session expires.
    pub idle_timeout: Duration,
    pub secret_key: SecretString,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "wicket_session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            idle_timeout: Duration::minutes(30),
            secret_key: SecretString::new(""),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.secret_key.is_empty() {
            return Err("secret_key must not be empty");
        }
        if self.secret_key.len() < 32 {
            return Err("secret_key should be at least 32 bytes");
        }
        if self.idle_timeout <= Duration::zero() {
            return Err("idle_timeout must be positive");
        }
        Ok(())
    }
}
