//! Signed cookie transport for the session token.
//!
//! The token travels client-side; HMAC-SHA256 over the serialized payload
//! makes the cookie tamper-evident. Wire format:
//! `{hex(payload)}.{hex(signature)}`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::crypto::constant_time_eq;
use crate::SecretString;

use super::SessionToken;

type HmacSha256 = Hmac<Sha256>;

/// Serializes and signs a session token for transport.
///
/// Returns a string in the format `{hex(payload)}.{hex(signature)}`.
pub fn seal_token(token: &SessionToken, secret: &SecretString) -> String {
    // SAFETY: SessionToken serializes two plain optional fields; this
    // cannot fail.
    #[allow(clippy::expect_used)]
    let payload = serde_json::to_vec(token).expect("session token serialization cannot fail");
    let signature = compute_hmac(&payload, secret.expose_secret().as_bytes());
    format!("{}.{}", hex::encode(payload), hex::encode(signature))
}

/// Verifies a sealed cookie value and extracts the session token.
///
/// Returns `None` if the signature is invalid (tampered) or the payload
/// does not parse; the caller treats either as an anonymous session.
pub fn open_token(cookie_value: &str, secret: &SecretString) -> Option<SessionToken> {
    let (payload_hex, signature_hex) = cookie_value.rsplit_once('.')?;

    let payload = hex::decode(payload_hex).ok()?;
    let actual_sig = hex::decode(signature_hex).ok()?;
    let expected_sig = compute_hmac(&payload, secret.expose_secret().as_bytes());

    if !constant_time_eq(&expected_sig, &actual_sig) {
        log::warn!(target: "wicket::session", "msg=\"session cookie tampered\" cookie_prefix=\"{}...\"", &cookie_value.chars().take(8).collect::<String>());
        return None;
    }

    serde_json::from_slice(&payload).ok()
}

/// Computes HMAC-SHA256.
///
/// # Panics
///
/// This function cannot panic as HMAC accepts keys of any size.
fn compute_hmac(message: &[u8], key: &[u8]) -> Vec<u8> {
    // SAFETY: HmacSha256::new_from_slice only fails if the key is invalid,
    // but HMAC-SHA256 accepts keys of any length, so this cannot fail.
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}
