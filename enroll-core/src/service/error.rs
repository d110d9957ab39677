use thiserror::Error;

use enroll_providers::{
    auth::AuthError, policy_source::PolicySourceError, proof::error::ProofError,
};

#[derive(Debug, Error)]
pub enum EnrollmentServiceError {
    #[error("Policy source error: `{0}`")]
    PolicySourceError(#[from] PolicySourceError),
    #[error("Auth error: `{0}`")]
    AuthError(#[from] AuthError),
    #[error("Proof error: `{0}`")]
    ProofError(#[from] ProofError),
}
