use std::sync::Arc;

use enroll_crypto::CryptoProvider;
use enroll_providers::{
    auth::AccountProvider,
    common_models::{
        policy::{CertificatePolicy, NamespaceLocator, PolicyId},
        PublicKeyJwk,
    },
    enrollment::EnrollmentClient,
    key_algorithm::model::SignatureAlgorithmId,
    key_backend::KeyBackend,
    policy_source::PolicySource,
    proof::{error::ProofError, model::DecomposedProof, verify_proof},
};

use super::error::EnrollmentServiceError;
use crate::session::{clock::Clock, state::SessionContext, EnrollmentSession};

pub struct EnrollmentService {
    policy_source: Arc<dyn PolicySource>,
    account_provider: Arc<dyn AccountProvider>,
    key_backend: Arc<dyn KeyBackend>,
    enrollment_client: Arc<dyn EnrollmentClient>,
    crypto: Arc<dyn CryptoProvider>,
    clock: Arc<dyn Clock>,
    enrollment_type: String,
}

impl EnrollmentService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        policy_source: Arc<dyn PolicySource>,
        account_provider: Arc<dyn AccountProvider>,
        key_backend: Arc<dyn KeyBackend>,
        enrollment_client: Arc<dyn EnrollmentClient>,
        crypto: Arc<dyn CryptoProvider>,
        clock: Arc<dyn Clock>,
        enrollment_type: String,
    ) -> Self {
        Self {
            policy_source,
            account_provider,
            key_backend,
            enrollment_client,
            crypto,
            clock,
            enrollment_type,
        }
    }

    /// Fetches a certificate policy.
    pub async fn get_policy(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
    ) -> Result<CertificatePolicy, EnrollmentServiceError> {
        Ok(self.policy_source.get_policy(namespace, policy_id).await?)
    }

    /// Creates a session for `policy` on behalf of the signed-in account.
    ///
    /// Nothing is generated until the session is started.
    pub async fn create_session(
        &self,
        policy: CertificatePolicy,
    ) -> Result<EnrollmentSession, EnrollmentServiceError> {
        let subject_id = self.account_provider.subject_id().await?;

        let session = EnrollmentSession::new(
            SessionContext {
                policy,
                subject_id,
                enrollment_type: self.enrollment_type.to_owned(),
            },
            self.key_backend.clone(),
            self.enrollment_client.clone(),
            self.clock.clone(),
        );
        tracing::debug!(session_id = %session.id(), "created enrollment session");

        Ok(session)
    }

    /// Fetches the policy and runs a new session against it.
    ///
    /// The returned session holds the outcome; failed sessions can be retried
    /// if their error allows it.
    pub async fn enroll(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
    ) -> Result<EnrollmentSession, EnrollmentServiceError> {
        let policy = self.get_policy(namespace, policy_id).await?;
        let mut session = self.create_session(policy).await?;
        session.start().await;

        Ok(session)
    }

    /// Verifies a proof the way the enrollment endpoint does: shape,
    /// signature, and that the current time lies within `[nbf, exp)`.
    pub fn verify_proof(
        &self,
        proof: &str,
        public_key: &PublicKeyJwk,
    ) -> Result<DecomposedProof, EnrollmentServiceError> {
        let proof = verify_proof(proof, public_key, self.crypto.as_ref())?;

        let now = self.clock.now_utc();
        if now < proof.claims.not_before || now >= proof.claims.expires_at {
            return Err(ProofError::CouldNotVerify(format!(
                "proof is valid from {} until {}, now is {now}",
                proof.claims.not_before, proof.claims.expires_at
            ))
            .into());
        }

        Ok(proof)
    }

    pub fn supported_algorithms(&self) -> Vec<SignatureAlgorithmId> {
        self.key_backend.get_capabilities().algorithms
    }
}
