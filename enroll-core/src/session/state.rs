//! Enrollment session state machine.
//!
//! ```text
//! Created --KeyPairGenerated--> KeyPairReady --ProofSigned--> ProofBuilt --+--> Submitted(Success)
//!    ^  |                          ^  |                                    +--> Submitted(Failure)
//!    +--+ KeyGenerationFailed      +--+ ProofSigningFailed
//! ```
//!
//! [`transition`] is pure: it maps the current state and an event to the next
//! state and the side effect the driver has to run. Events that do not apply to
//! the current state leave it unchanged and produce no effect.

use enroll_providers::{
    common_models::policy::CertificatePolicy,
    enrollment::model::CertificateReference,
    key_algorithm::{
        model::{KeyGenParams, SigningParams},
        resolve_key_gen_params, resolve_signing_params,
    },
    key_backend::model::GeneratedKeyPair,
    proof::model::ProofToken,
};
use strum::IntoStaticStr;

use super::error::SessionError;

/// Immutable inputs of a session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub policy: CertificatePolicy,
    /// Caller subject identifier, the proof issuer.
    pub subject_id: String,
    pub enrollment_type: String,
}

#[derive(Debug, IntoStaticStr)]
pub enum SessionState {
    /// `error` is set when parameters could not be resolved or key generation
    /// failed.
    Created {
        error: Option<SessionError>,
    },
    KeyPairReady {
        key_pair: GeneratedKeyPair,
        error: Option<SessionError>,
    },
    ProofBuilt {
        key_pair: GeneratedKeyPair,
        proof: ProofToken,
    },
    Submitted(SubmissionOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(CertificateReference),
    Failure(SessionError),
}

#[derive(Debug, IntoStaticStr)]
pub enum SessionEvent {
    Start,
    Retry,
    KeyPairGenerated(GeneratedKeyPair),
    KeyGenerationFailed(String),
    ProofSigned(ProofToken),
    ProofSigningFailed(String),
    EnrollmentAccepted(CertificateReference),
    EnrollmentFailed { status: Option<u16>, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    GenerateKeyPair(KeyGenParams),
    SignProof {
        audience: String,
        issuer: String,
        alg: String,
        signing_params: SigningParams,
    },
    /// Export the public key and submit it together with the proof.
    Submit { enrollment_type: String },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Created { error: None }
    }
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn error(&self) -> Option<&SessionError> {
        match self {
            Self::Created { error } | Self::KeyPairReady { error, .. } => error.as_ref(),
            Self::Submitted(SubmissionOutcome::Failure(error)) => Some(error),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

pub fn transition(
    context: &SessionContext,
    state: SessionState,
    event: SessionEvent,
) -> (SessionState, SessionEffect) {
    use SessionEvent as E;
    use SessionState as S;

    match (state, event) {
        (S::Created { error: None }, E::Start | E::Retry) => request_key_pair(context),
        (
            S::Created {
                error: Some(SessionError::KeyGenerationFailed(_)),
            },
            E::Start | E::Retry,
        ) => request_key_pair(context),
        (S::Created { error: None }, E::KeyPairGenerated(key_pair)) => {
            request_proof(context, key_pair)
        }
        (S::Created { error: None }, E::KeyGenerationFailed(reason)) => (
            S::Created {
                error: Some(SessionError::KeyGenerationFailed(reason)),
            },
            SessionEffect::None,
        ),

        (
            S::KeyPairReady {
                key_pair,
                error: Some(SessionError::ProofSigningFailed(_)),
            },
            E::Retry,
        ) => request_proof(context, key_pair),
        (S::KeyPairReady { key_pair, error: None }, E::ProofSigned(proof)) => (
            S::ProofBuilt { key_pair, proof },
            SessionEffect::Submit {
                enrollment_type: context.enrollment_type.to_owned(),
            },
        ),
        (S::KeyPairReady { key_pair, error: None }, E::ProofSigningFailed(reason)) => (
            S::KeyPairReady {
                key_pair,
                error: Some(SessionError::ProofSigningFailed(reason)),
            },
            SessionEffect::None,
        ),

        (S::ProofBuilt { .. }, E::EnrollmentAccepted(reference)) => (
            S::Submitted(SubmissionOutcome::Success(reference)),
            SessionEffect::None,
        ),
        (S::ProofBuilt { .. }, E::EnrollmentFailed { status, reason }) => (
            S::Submitted(SubmissionOutcome::Failure(SessionError::SubmissionFailed {
                status,
                reason,
            })),
            SessionEffect::None,
        ),

        (state, _) => (state, SessionEffect::None),
    }
}

fn request_key_pair(context: &SessionContext) -> (SessionState, SessionEffect) {
    match resolve_key_gen_params(&context.policy.key_spec) {
        Ok(params) => (
            SessionState::Created { error: None },
            SessionEffect::GenerateKeyPair(params),
        ),
        Err(error) => (
            SessionState::Created {
                error: Some(SessionError::UnsupportedAlgorithm(error.to_string())),
            },
            SessionEffect::None,
        ),
    }
}

fn request_proof(
    context: &SessionContext,
    key_pair: GeneratedKeyPair,
) -> (SessionState, SessionEffect) {
    match resolve_signing_params(&context.policy.key_spec.alg) {
        Ok(signing_params) => (
            SessionState::KeyPairReady {
                key_pair,
                error: None,
            },
            SessionEffect::SignProof {
                audience: context.policy.namespace.id.to_owned(),
                issuer: context.subject_id.to_owned(),
                alg: context.policy.key_spec.alg.to_owned(),
                signing_params,
            },
        ),
        Err(error) => (
            SessionState::KeyPairReady {
                key_pair,
                error: Some(SessionError::UnsupportedAlgorithm(error.to_string())),
            },
            SessionEffect::None,
        ),
    }
}
