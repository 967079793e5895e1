//! Credential sources

use super::types::CachedToken;
use crate::error::{Error, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Capability that yields the current bearer token, if any
///
/// `Ok(None)` means "not signed in" and is not an error at this level.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Get the current credential
    async fn credential(&self) -> Result<Option<String>>;
}

/// Resolve a credential, failing with [`Error::Unauthenticated`] when absent
pub async fn require_credential(source: &dyn CredentialSource) -> Result<String> {
    source.credential().await?.ok_or(Error::Unauthenticated)
}

/// A fixed credential, mostly useful for CLIs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticCredential {
    token: Option<String>,
}

impl StaticCredential {
    /// Create a source that always returns `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Create a source with no credential
    pub fn none() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl CredentialSource for StaticCredential {
    async fn credential(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

/// Signed-in session holder shared between the identity flow and the client
///
/// Clones share the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionCredentials {
    current: Arc<RwLock<Option<CachedToken>>>,
}

impl SessionCredentials {
    /// Create a signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token obtained from the identity provider
    pub fn sign_in(&self, token: impl Into<String>, expires_in_seconds: Option<i64>) {
        let token = token.into();
        let cached = match expires_in_seconds {
            Some(seconds) => CachedToken::expires_in(token, seconds),
            None => CachedToken::new(token, None),
        };
        *self.current.write() = Some(cached);
        debug!("Session credential stored");
    }

    /// Drop the current token
    pub fn sign_out(&self) {
        *self.current.write() = None;
        debug!("Session credential cleared");
    }

    /// Whether a non-expired token is held
    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|token| !token.is_expired())
    }
}

#[async_trait]
impl CredentialSource for SessionCredentials {
    async fn credential(&self) -> Result<Option<String>> {
        let current = self.current.read();
        Ok(current
            .as_ref()
            .filter(|token| !token.is_expired())
            .map(|token| token.token.clone()))
    }
}
