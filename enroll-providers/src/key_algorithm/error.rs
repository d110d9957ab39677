//! Enumerates errors related to algorithm resolution and key representations.

use thiserror::Error;

use enroll_crypto::SignerError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyAlgorithmError {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Key algorithm error: `{0}`")]
    Failed(String),
    #[error("Signer error: `{0}`")]
    SignerError(#[from] SignerError),
}
