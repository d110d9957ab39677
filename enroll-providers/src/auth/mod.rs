//! Collaborators supplying caller identity and credentials.
//!
//! Token acquisition and account management belong to the host application;
//! enrollment only asks for an opaque bearer token and the caller's subject
//! identifier when it needs them.

use thiserror::Error;
use zeroize::Zeroizing;

pub mod imp;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Bearer token unavailable: {0}")]
    TokenUnavailable(String),
    #[error("Account unavailable: {0}")]
    AccountUnavailable(String),
}

/// Supplies a bearer token for outgoing requests.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait BearerTokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<Zeroizing<String>, AuthError>;
}

/// Supplies the identity of the signed-in caller.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait AccountProvider: Send + Sync {
    /// Subject identifier used as the proof issuer.
    async fn subject_id(&self) -> Result<String, AuthError>;
}
