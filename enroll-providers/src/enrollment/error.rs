use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    #[error("Enrollment rejected with status {status}: {diagnostic}")]
    Rejected { status: u16, diagnostic: String },
    #[error("Transport error: `{0}`")]
    Transport(String),
    #[error("Invalid response: `{0}`")]
    InvalidResponse(String),
    #[error("Auth error: `{0}`")]
    Auth(#[from] AuthError),
}
