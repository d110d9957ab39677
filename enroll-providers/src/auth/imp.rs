use zeroize::Zeroizing;

use super::{AccountProvider, AuthError, BearerTokenSource};

/// Fixed token, e.g. obtained out of band.
pub struct StaticBearerToken(Zeroizing<String>);

impl StaticBearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }
}

#[async_trait::async_trait]
impl BearerTokenSource for StaticBearerToken {
    async fn bearer_token(&self) -> Result<Zeroizing<String>, AuthError> {
        if self.0.is_empty() {
            return Err(AuthError::TokenUnavailable("empty token".to_owned()));
        }
        Ok(self.0.clone())
    }
}

pub struct StaticAccount {
    subject_id: String,
}

impl StaticAccount {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl AccountProvider for StaticAccount {
    async fn subject_id(&self) -> Result<String, AuthError> {
        if self.subject_id.is_empty() {
            return Err(AuthError::AccountUnavailable("no subject".to_owned()));
        }
        Ok(self.subject_id.clone())
    }
}
