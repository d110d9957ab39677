use std::sync::Arc;

use url::Url;

use crate::{
    auth::BearerTokenSource,
    common_models::policy::{CertificatePolicy, NamespaceLocator, PolicyId},
    http_client::{HttpClient, HttpRequest},
    policy_source::{policy_url, PolicySource, PolicySourceError},
};

#[cfg(test)]
mod test;

pub struct HttpPolicySource {
    base_url: Url,
    client: Arc<dyn HttpClient>,
    token_source: Arc<dyn BearerTokenSource>,
}

impl HttpPolicySource {
    pub fn new(
        base_url: Url,
        client: Arc<dyn HttpClient>,
        token_source: Arc<dyn BearerTokenSource>,
    ) -> Self {
        Self {
            base_url,
            client,
            token_source,
        }
    }
}

#[async_trait::async_trait]
impl PolicySource for HttpPolicySource {
    async fn get_policy(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
    ) -> Result<CertificatePolicy, PolicySourceError> {
        let url = policy_url(&self.base_url, namespace, policy_id)
            .map_err(PolicySourceError::Transport)?;
        let token = self.token_source.bearer_token().await?;

        let response = self
            .client
            .execute(HttpRequest::get(url).bearer_auth(&token))
            .await
            .map_err(|e| PolicySourceError::Transport(e.to_string()))?;

        if response.status.0 == 404 {
            return Err(PolicySourceError::NotFound(policy_id.to_owned()));
        }
        if !response.status.is_success() {
            return Err(PolicySourceError::Failed {
                status: response.status.0,
                diagnostic: response.text(),
            });
        }

        let policy: CertificatePolicy = response
            .json()
            .map_err(|e| PolicySourceError::InvalidResponse(e.to_string()))?;

        tracing::debug!(policy_id = %policy.id, alg = %policy.key_spec.alg, "fetched certificate policy");

        Ok(policy)
    }
}
