//! Enumerates errors related to key backends.

use thiserror::Error;

use enroll_crypto::SignerError;

use crate::key_algorithm::error::KeyAlgorithmError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyBackendError {
    #[error("Unsupported key parameters: {0}")]
    UnsupportedParameters(String),
    #[error("Key generation failed: `{0}`")]
    GenerationFailed(String),
    #[error("Signer error: `{0}`")]
    SignerError(#[from] SignerError),
    #[error("Key algorithm error: `{0}`")]
    KeyAlgorithmError(#[from] KeyAlgorithmError),
}
