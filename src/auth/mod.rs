//! Credential module
//!
//! Supplies the bearer token used for API calls and for signing media URLs.
//!
//! The credential source is passed explicitly into every component that
//! needs it, so tests can substitute fixed or absent credentials.

mod credentials;
mod types;

pub use credentials::{require_credential, CredentialSource, SessionCredentials, StaticCredential};
pub use types::CachedToken;
