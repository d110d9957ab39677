use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::common_models::macros::{impl_as_str, impl_from, impl_into};

/// Lifetime of a proof, `exp - nbf`.
pub const PROOF_VALIDITY: Duration = Duration::seconds(600);

pub const PROOF_TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofHeader {
    #[serde(rename = "alg")]
    pub algorithm: String,

    #[serde(rename = "typ")]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofClaims {
    #[serde(rename = "aud")]
    pub audience: String,

    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "nbf", with = "time::serde::timestamp")]
    pub not_before: OffsetDateTime,

    #[serde(rename = "exp", with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl ProofClaims {
    /// Claims valid from `now`, truncated to whole seconds, for [`PROOF_VALIDITY`].
    pub fn new(audience: impl Into<String>, issuer: impl Into<String>, now: OffsetDateTime) -> Self {
        let not_before = now - Duration::nanoseconds(now.nanosecond().into());

        Self {
            audience: audience.into(),
            issuer: issuer.into(),
            not_before,
            expires_at: not_before + PROOF_VALIDITY,
        }
    }
}

/// Compact JWS `header.claims.signature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofToken(String);
impl_into!(ProofToken; String);
impl_from!(ProofToken; String);
impl_as_str!(ProofToken);

#[derive(Debug)]
pub struct DecomposedProof {
    pub header: ProofHeader,
    pub claims: ProofClaims,
    pub signing_input: String,
    pub signature: Vec<u8>,
}
