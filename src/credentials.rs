//! The configured single-user credential pair.

use crate::crypto::{constant_time_eq, PasswordHasher};
use crate::secret::SecretString;
use crate::AuthError;

/// Marker prefix of an Argon2 PHC hash string.
const PHC_PREFIX: &str = "$argon2";

/// The username/password pair the gate accepts, read-only for the lifetime
/// of the process.
///
/// The password is held as a salted Argon2 hash; a plaintext value never
/// reaches this type. Use [`Credentials::from_config_password`] to build
/// one from a configured value that may be either plaintext or pre-hashed.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password_hash: String,
}

impl Credentials {
    /// Creates a credential pair from a username and an existing PHC hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Hashes a plaintext password into a stored credential pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    pub fn from_plaintext<H: PasswordHasher>(
        hasher: &H,
        username: impl Into<String>,
        password: &SecretString,
    ) -> Result<Self, AuthError> {
        let password_hash = hasher.hash(password.expose_secret())?;
        Ok(Self::new(username, password_hash))
    }

    /// Builds a credential pair from a configured password value.
    ///
    /// A value already in PHC form (`$argon2...`) is stored as-is, so the
    /// configuration file never needs to contain the plaintext; anything
    /// else is treated as plaintext and hashed once here, at startup.
    pub fn from_config_password<H: PasswordHasher>(
        hasher: &H,
        username: impl Into<String>,
        password: &SecretString,
    ) -> Result<Self, AuthError> {
        if password.expose_secret().starts_with(PHC_PREFIX) {
            Ok(Self::new(username, password.expose_secret()))
        } else {
            Self::from_plaintext(hasher, username, password)
        }
    }

    /// Verifies a candidate pair against the stored pair.
    ///
    /// Comparison is exact and case-sensitive. The username check is
    /// constant-time and the password always goes through the verifier,
    /// regardless of whether the username matched, so a failed attempt
    /// does not reveal which half was wrong.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the stored hash is
    /// malformed.
    pub fn matches<H: PasswordHasher>(
        &self,
        hasher: &H,
        username: &str,
        password: &SecretString,
    ) -> Result<bool, AuthError> {
        let username_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let password_ok = hasher.verify(password.expose_secret(), &self.password_hash)?;
        Ok(username_ok && password_ok)
    }
}
