//! The sliding-window authentication gate.

use chrono::{DateTime, Duration, Utc};

use crate::credentials::Credentials;
use crate::crypto::PasswordHasher;
use crate::secret::SecretString;
use crate::AuthError;

use super::SessionToken;

/// Outcome of checking a session token, one variant per logical state.
///
/// Expired sessions get their own variant rather than collapsing into
/// `NotLoggedIn`, so callers can surface an expiry notice before treating
/// the user as logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The session is live; the token's activity timestamp was refreshed.
    Authenticated,
    /// No principal, or a malformed token missing its timestamp.
    NotLoggedIn,
    /// The idle window elapsed since the last accepted request.
    Expired,
}

/// Decides, per request, whether the caller is authenticated.
///
/// The gate is a pure computation over the token the request carried in,
/// the configured idle window, and the current time. It never errors; every
/// check produces one of the three [`Verdict`]s.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    idle_timeout: Duration,
}

impl Gate {
    /// Creates a gate enforcing the given idle window.
    pub fn new(idle_timeout: Duration) -> Self {
        Self { idle_timeout }
    }

    /// Checks a token against the sliding idle window.
    ///
    /// On the authenticated path the token's `last_activity_at` is refreshed
    /// to `now`; that is the only mutation the gate ever performs. A gap of
    /// exactly the idle window is already expired: the elapsed time must be
    /// strictly below the window.
    ///
    /// A token with a principal but no timestamp is treated as not logged
    /// in rather than trusted (fail closed). The gate does not clear an
    /// expired token; the caller owns the transport and may drop it.
    pub fn authenticate(&self, token: &mut SessionToken, now: DateTime<Utc>) -> Verdict {
        if token.username.is_none() {
            return Verdict::NotLoggedIn;
        }
        let Some(last_activity) = token.last_activity_at else {
            return Verdict::NotLoggedIn;
        };

        if now - last_activity < self.idle_timeout {
            token.last_activity_at = Some(now);
            Verdict::Authenticated
        } else {
            Verdict::Expired
        }
    }

    /// Verifies candidate credentials and opens a fresh session.
    ///
    /// Success yields a token with the candidate username and the activity
    /// window opening at `now`.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` when the pair does not match;
    /// `AuthError::PasswordHashError` if the stored hash is malformed.
    pub fn login<H: PasswordHasher>(
        &self,
        hasher: &H,
        credentials: &Credentials,
        username: &str,
        password: &SecretString,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, AuthError> {
        if credentials.matches(hasher, username, password)? {
            log::info!(
                target: "wicket::session",
                "msg=\"login success\" username=\"{}\"",
                username
            );
            Ok(SessionToken::logged_in(username, now))
        } else {
            log::warn!(
                target: "wicket::session",
                "msg=\"login failed\" username=\"{}\"",
                username
            );
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Ends the session unconditionally. Both token fields are cleared
    /// together; there is no error path.
    pub fn logout(&self, token: &mut SessionToken) {
        token.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Argon2Hasher;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn gate_ms(ms: i64) -> Gate {
        Gate::new(Duration::milliseconds(ms))
    }

    #[test]
    fn test_anonymous_token_is_not_logged_in() {
        let gate = gate_ms(5_000);
        let mut token = SessionToken::anonymous();
        assert_eq!(gate.authenticate(&mut token, at(0)), Verdict::NotLoggedIn);
    }

    #[test]
    fn test_partial_token_fails_closed() {
        let gate = gate_ms(5_000);

        // Principal without a timestamp: not trusted.
        let mut token = SessionToken {
            username: Some("alice".to_owned()),
            last_activity_at: None,
        };
        assert_eq!(gate.authenticate(&mut token, at(0)), Verdict::NotLoggedIn);

        // Timestamp without a principal.
        let mut token = SessionToken {
            username: None,
            last_activity_at: Some(at(0)),
        };
        assert_eq!(gate.authenticate(&mut token, at(100)), Verdict::NotLoggedIn);
    }

    #[test]
    fn test_sliding_window_refreshes_timestamp() {
        let gate = gate_ms(5_000);
        let mut token = SessionToken::logged_in("alice", at(0));

        assert_eq!(gate.authenticate(&mut token, at(3_000)), Verdict::Authenticated);
        assert_eq!(token.last_activity_at, Some(at(3_000)));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let gate = gate_ms(5_000);

        // One millisecond inside the window still passes.
        let mut token = SessionToken::logged_in("alice", at(0));
        assert_eq!(gate.authenticate(&mut token, at(4_999)), Verdict::Authenticated);

        // Exactly at the window is already expired.
        let mut token = SessionToken::logged_in("alice", at(0));
        assert_eq!(gate.authenticate(&mut token, at(5_000)), Verdict::Expired);
        // The expired token keeps its fields; clearing is the caller's call.
        assert_eq!(token.last_activity_at, Some(at(0)));
    }

    #[test]
    fn test_refresh_chain_outlives_the_window() {
        let gate = gate_ms(5_000);
        let mut token = SessionToken::logged_in("alice", at(0));

        // Each request arrives within the window of the previous one; the
        // session stays live far past the original window.
        for i in 1..=10 {
            let now = at(i * 4_000);
            assert_eq!(gate.authenticate(&mut token, now), Verdict::Authenticated);
            assert_eq!(token.last_activity_at, Some(now));
        }
    }

    #[test]
    fn test_login_then_expire_scenario() {
        // Login at t=0, request at t=3000 refreshes, request at t=9000 is
        // 6000ms after the last accepted request and expires.
        let gate = gate_ms(5_000);
        let mut token = SessionToken::logged_in("alice", at(0));

        assert_eq!(gate.authenticate(&mut token, at(3_000)), Verdict::Authenticated);
        assert_eq!(token.last_activity_at, Some(at(3_000)));
        assert_eq!(gate.authenticate(&mut token, at(9_000)), Verdict::Expired);
    }

    #[test]
    fn test_logout_clears_state() {
        let gate = gate_ms(5_000);
        let mut token = SessionToken::logged_in("alice", at(0));

        gate.logout(&mut token);
        assert!(token.is_anonymous());
        assert_eq!(gate.authenticate(&mut token, at(1)), Verdict::NotLoggedIn);
    }

    #[test]
    fn test_login_verifies_credentials() {
        let gate = gate_ms(5_000);
        let hasher = Argon2Hasher::default();
        let credentials =
            Credentials::from_plaintext(&hasher, "alice", &SecretString::new("secret")).unwrap();

        let token = gate
            .login(&hasher, &credentials, "alice", &SecretString::new("secret"), at(0))
            .unwrap();
        assert_eq!(token.username.as_deref(), Some("alice"));
        assert_eq!(token.last_activity_at, Some(at(0)));

        let err = gate
            .login(&hasher, &credentials, "alice", &SecretString::new("wrong"), at(0))
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        let err = gate
            .login(&hasher, &credentials, "bob", &SecretString::new("secret"), at(0))
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_relogin_after_expiry() {
        let gate = gate_ms(5_000);
        let hasher = Argon2Hasher::default();
        let credentials =
            Credentials::from_plaintext(&hasher, "alice", &SecretString::new("secret")).unwrap();

        let mut token = SessionToken::logged_in("alice", at(0));
        assert_eq!(gate.authenticate(&mut token, at(10_000)), Verdict::Expired);

        let mut token = gate
            .login(&hasher, &credentials, "alice", &SecretString::new("secret"), at(10_000))
            .unwrap();
        assert_eq!(gate.authenticate(&mut token, at(11_000)), Verdict::Authenticated);
    }
}
