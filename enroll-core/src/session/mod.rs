//! Enrollment session: generate a key pair, prove possession, submit.
//!
//! [`EnrollmentSession`] drives the pure [state machine](state) by running the
//! effects it requests against the key backend and the enrollment endpoint and
//! feeding their outcomes back as events. A session is an owned value driven
//! through `&mut self`; to start over after a terminal failure, drop it and
//! create a new one.

use std::sync::Arc;

use enroll_providers::{
    enrollment::{
        error::EnrollmentError,
        model::{CertificateReference, EnrollmentRequest},
        EnrollmentClient,
    },
    key_algorithm::model::{KeyGenParams, SigningParams},
    key_backend::KeyBackend,
    proof::{model::ProofClaims, sign_proof},
};
use tracing::Instrument;
use uuid::Uuid;

use self::{
    clock::Clock,
    error::SessionError,
    state::{transition, SessionContext, SessionEffect, SessionEvent, SessionState, SubmissionOutcome},
};

pub mod clock;
pub mod error;
pub mod state;


pub struct EnrollmentSession {
    id: Uuid,
    context: SessionContext,
    state: SessionState,
    key_backend: Arc<dyn KeyBackend>,
    enrollment_client: Arc<dyn EnrollmentClient>,
    clock: Arc<dyn Clock>,
}

impl EnrollmentSession {
    pub fn new(
        context: SessionContext,
        key_backend: Arc<dyn KeyBackend>,
        enrollment_client: Arc<dyn EnrollmentClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
            state: SessionState::default(),
            key_backend,
            enrollment_client,
            clock,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// `None` until the session settles on a result.
    pub fn outcome(&self) -> Option<Result<&CertificateReference, &SessionError>> {
        match &self.state {
            SessionState::Submitted(SubmissionOutcome::Success(reference)) => Some(Ok(reference)),
            state => state.error().map(Err),
        }
    }

    /// Runs the enrollment until it succeeds or fails.
    pub async fn start(&mut self) -> &SessionState {
        self.dispatch(SessionEvent::Start).await
    }

    /// Recovers from a retryable failure.
    ///
    /// Failed key generation is retried with a fresh key pair, failed signing
    /// re-signs with the existing one. Ignored in any other state.
    pub async fn retry(&mut self) -> &SessionState {
        self.dispatch(SessionEvent::Retry).await
    }

    async fn dispatch(&mut self, event: SessionEvent) -> &SessionState {
        let span = tracing::info_span!(
            "enrollment_session",
            session_id = %self.id,
            policy_id = %self.context.policy.id,
        );

        async {
            let mut effect = self.apply(event);
            loop {
                let event = match effect {
                    SessionEffect::None => break,
                    SessionEffect::GenerateKeyPair(params) => self.generate_key_pair(params).await,
                    SessionEffect::SignProof {
                        audience,
                        issuer,
                        alg,
                        signing_params,
                    } => {
                        self.sign_proof(audience, issuer, alg, signing_params)
                            .await
                    }
                    SessionEffect::Submit { enrollment_type } => self.submit(enrollment_type).await,
                };
                effect = self.apply(event);
            }

            match self.outcome() {
                Some(Ok(reference)) => tracing::info!(
                    certificate_id = %reference.id,
                    status = %reference.status,
                    "enrollment session completed"
                ),
                Some(Err(error)) => tracing::warn!(
                    state = self.state.name(),
                    retryable = error.is_retryable(),
                    %error,
                    "enrollment session failed"
                ),
                None => {}
            }
        }
        .instrument(span)
        .await;

        &self.state
    }

    fn apply(&mut self, event: SessionEvent) -> SessionEffect {
        let event_name: &'static str = (&event).into();
        let from = std::mem::take(&mut self.state);
        let from_name = from.name();

        let (to, effect) = transition(&self.context, from, event);
        tracing::debug!(event = event_name, from = from_name, to = to.name(), "session transition");

        self.state = to;
        effect
    }

    async fn generate_key_pair(&self, params: KeyGenParams) -> SessionEvent {
        match self.key_backend.generate(&params).await {
            Ok(key_pair) => SessionEvent::KeyPairGenerated(key_pair),
            Err(error) => SessionEvent::KeyGenerationFailed(error.to_string()),
        }
    }

    async fn sign_proof(
        &self,
        audience: String,
        issuer: String,
        alg: String,
        signing_params: SigningParams,
    ) -> SessionEvent {
        let SessionState::KeyPairReady { key_pair, .. } = &self.state else {
            return SessionEvent::ProofSigningFailed("no key pair".to_owned());
        };

        let claims = ProofClaims::new(audience, issuer, self.clock.now_utc());

        match sign_proof(
            &claims,
            &alg,
            &signing_params,
            &key_pair.private,
            self.key_backend.as_ref(),
        )
        .await
        {
            Ok(proof) => SessionEvent::ProofSigned(proof),
            Err(error) => SessionEvent::ProofSigningFailed(error.to_string()),
        }
    }

    async fn submit(&self, enrollment_type: String) -> SessionEvent {
        let SessionState::ProofBuilt { key_pair, proof } = &self.state else {
            return SessionEvent::EnrollmentFailed {
                status: None,
                reason: "no proof".to_owned(),
            };
        };

        let public_key = match self.key_backend.export_public(&key_pair.public) {
            Ok(public_key) => public_key,
            Err(error) => {
                return SessionEvent::EnrollmentFailed {
                    status: None,
                    reason: error.to_string(),
                }
            }
        };

        let request = EnrollmentRequest {
            enrollment_type,
            proof: proof.to_owned(),
            public_key,
        };

        match self
            .enrollment_client
            .enroll(
                &self.context.policy.namespace,
                &self.context.policy.id,
                request,
            )
            .await
        {
            Ok(reference) => SessionEvent::EnrollmentAccepted(reference),
            Err(EnrollmentError::Rejected { status, diagnostic }) => SessionEvent::EnrollmentFailed {
                status: Some(status),
                reason: diagnostic,
            },
            Err(error) => SessionEvent::EnrollmentFailed {
                status: None,
                reason: error.to_string(),
            },
        }
    }
}
