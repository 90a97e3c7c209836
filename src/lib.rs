//! wicket — a single-user password gate in front of one protected page.
//!
//! Authentication state lives entirely client-side in a tamper-evident
//! signed cookie carrying a username and a last-activity timestamp. A
//! sliding idle window governs expiry: every accepted request slides the
//! window forward, and a gap of at least the configured idle timeout ends
//! the session.

pub mod api;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod secret;
pub mod session;

pub use config::AppConfig;
pub use credentials::Credentials;
pub use crypto::{Argon2Hasher, PasswordHasher};
pub use secret::SecretString;
pub use session::{Gate, SessionConfig, SessionToken, Verdict};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    InvalidCredentials,
    PasswordHashError,
    ConfigurationError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Incorrect username or password"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}
