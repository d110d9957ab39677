//! Retrieval of certificate policies.

use thiserror::Error;
use url::Url;

use crate::{
    auth::AuthError,
    common_models::policy::{CertificatePolicy, NamespaceLocator, PolicyId},
};

pub mod imp;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicySourceError {
    #[error("Policy not found: `{0}`")]
    NotFound(PolicyId),
    #[error("Policy request failed with status {status}: {diagnostic}")]
    Failed { status: u16, diagnostic: String },
    #[error("Transport error: `{0}`")]
    Transport(String),
    #[error("Invalid policy: `{0}`")]
    InvalidResponse(String),
    #[error("Auth error: `{0}`")]
    Auth(#[from] AuthError),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait PolicySource: Send + Sync {
    async fn get_policy(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
    ) -> Result<CertificatePolicy, PolicySourceError>;
}

/// `{base}/v1/{namespaceKind}/{namespaceId}/certificate-policies/{policyId}`
///
/// Path parameters are percent-encoded as single segments.
pub fn policy_url(
    base_url: &Url,
    namespace: &NamespaceLocator,
    policy_id: &PolicyId,
) -> Result<Url, String> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| format!("`{base_url}` cannot be a base URL"))?
        .pop_if_empty()
        .extend([
            "v1",
            namespace.kind.as_str(),
            namespace.id.as_str(),
            "certificate-policies",
            policy_id.as_str(),
        ]);
    Ok(url)
}
