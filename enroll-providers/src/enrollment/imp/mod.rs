use std::sync::Arc;

use url::Url;

use crate::{
    auth::BearerTokenSource,
    common_models::policy::{NamespaceLocator, PolicyId},
    enrollment::{
        dto::EnrollmentRequestDTO,
        error::EnrollmentError,
        mapper::certificate_reference_from_response,
        model::{CertificateReference, EnrollmentRequest},
        EnrollmentClient,
    },
    http_client::{HttpClient, HttpRequest},
    policy_source::policy_url,
};


pub struct HttpEnrollmentClient {
    base_url: Url,
    client: Arc<dyn HttpClient>,
    token_source: Arc<dyn BearerTokenSource>,
}

impl HttpEnrollmentClient {
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

    fn enroll_url(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
    ) -> Result<Url, EnrollmentError> {
        let mut url = policy_url(&self.base_url, namespace, policy_id)
            .map_err(EnrollmentError::Transport)?;
        url.path_segments_mut()
            .map_err(|_| EnrollmentError::Transport("cannot-be-a-base URL".to_owned()))?
            .push("enroll");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl EnrollmentClient for HttpEnrollmentClient {
    async fn enroll(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
        request: EnrollmentRequest,
    ) -> Result<CertificateReference, EnrollmentError> {
        let url = self.enroll_url(namespace, policy_id)?;
        let token = self.token_source.bearer_token().await?;

        let http_request = HttpRequest::post(url)
            .bearer_auth(&token)
            .json(&EnrollmentRequestDTO::from(request))
            .map_err(|e| EnrollmentError::Transport(e.to_string()))?;
        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| EnrollmentError::Transport(e.to_string()))?;

        if !response.status.is_success() {
            tracing::warn!(%policy_id, status = %response.status, "enrollment rejected");
            return Err(EnrollmentError::Rejected {
                status: response.status.0,
                diagnostic: response.text(),
            });
        }

        let status = response.status;
        let body: serde_json::Value = response
            .json()
            .map_err(|e| EnrollmentError::InvalidResponse(e.to_string()))?;

        let reference = certificate_reference_from_response(status, body)?;
        tracing::info!(%policy_id, certificate_id = %reference.id, status = %reference.status, "enrollment accepted");

        Ok(reference)
    }
}
