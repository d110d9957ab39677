//! Enumerates errors related to proof-of-possession tokens.

use thiserror::Error;

use crate::key_algorithm::error::KeyAlgorithmError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract proof: `{0}`")]
    CouldNotExtract(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Key algorithm error: `{0}`")]
    KeyAlgorithmError(#[from] KeyAlgorithmError),
}
