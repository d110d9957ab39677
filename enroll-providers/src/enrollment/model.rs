use strum::{Display, EnumString};

use crate::{common_models::PublicKeyJwk, proof::model::ProofToken};

/// Default `enrollmentType`.
pub const PROOF_OF_POSSESSION: &str = "proof-of-possession";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    pub enrollment_type: String,
    pub proof: ProofToken,
    pub public_key: PublicKeyJwk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum CertificateStatus {
    Issued,
    Pending,
}

/// Server answer to an accepted enrollment.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateReference {
    pub id: String,
    pub status: CertificateStatus,
    /// Response body as received.
    pub body: serde_json::Value,
}
