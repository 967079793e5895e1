//! Credential types

use chrono::{DateTime, Utc};

/// Seconds before expiry at which a token is treated as already expired
pub const EXPIRY_BUFFER_SECONDS: i64 = 30;

/// A bearer token together with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against an explicit instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(EXPIRY_BUFFER_SECONDS);
                now + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}
