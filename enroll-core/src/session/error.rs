use thiserror::Error;

/// User-visible failure of an enrollment session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
    #[error("Proof signing failed: {0}")]
    ProofSigningFailed(String),
    #[error("Submission failed: {reason}")]
    SubmissionFailed {
        /// HTTP status of a server rejection
        status: Option<u16>,
        reason: String,
    },
}

impl SessionError {
    /// Whether [`Retry`](super::state::SessionEvent::Retry) can recover the
    /// session.
    ///
    /// Key sizes outside what the resolver supports are reported as
    /// [`UnsupportedAlgorithm`](Self::UnsupportedAlgorithm). A backend
    /// configured with a narrower RSA range still fails with
    /// `KeyGenerationFailed` on every retry for such a policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::KeyGenerationFailed(_) | Self::ProofSigningFailed(_)
        )
    }
}
