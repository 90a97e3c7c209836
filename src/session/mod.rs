mod config;
mod cookie;
mod gate;

use chrono::{DateTime, Utc};
pub use config::{SameSite, SessionConfig};
pub use cookie::{open_token, seal_token};
pub use gate::{Gate, Verdict};
use serde::{Deserialize, Serialize};

/// Client-held session state.
///
/// The token travels with every request inside a signed cookie and carries
/// exactly two fields. Both are present while logged in and absent
/// otherwise; a token with only one of them is malformed and treated as
/// anonymous by the gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Authenticated principal, present only while logged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Time of the last request accepted while logged in.
    /// Epoch milliseconds on the wire.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    /// An anonymous token: nobody logged in, no activity recorded.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A freshly-authenticated token with the activity window opening at `now`.
    pub fn logged_in(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            username: Some(username.into()),
            last_activity_at: Some(now),
        }
    }

    /// Returns true if no principal is attached.
    pub fn is_anonymous(&self) -> bool {
        self.username.is_none()
    }

    /// Clears both fields together. There is no sentinel timestamp left
    /// behind; a cleared token is indistinguishable from a fresh one.
    pub fn clear(&mut self) {
        self.username = None;
        self.last_activity_at = None;
    }
}
