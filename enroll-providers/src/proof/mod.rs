//! Proof-of-possession tokens.
//!
//! A proof is a compact JWS over a short-lived claim set, signed with the
//! private key whose public half is being enrolled:
//!
//! ```text
//! base64url({"alg":"ES256","typ":"JWT"}) . base64url({"aud","iss","nbf","exp"}) . base64url(signature)
//! ```
//!
//! ECDSA signatures use the fixed-width `r || s` encoding. The server checks
//! the signature against the submitted public key, which proves that the
//! requester holds the private key without ever transmitting it.

use enroll_crypto::CryptoProvider;

use self::{
    error::ProofError,
    mapper::{
        b64url_string_to_bin, bin_to_b64url_string, canonical_b64url_string_to_bin,
        json_from_decoded, string_to_b64url_string,
    },
    model::{DecomposedProof, ProofClaims, ProofHeader, ProofToken, PROOF_TOKEN_TYPE},
};
use crate::{
    common_models::PublicKeyJwk,
    key_algorithm::{jwk::jwk_to_public_key, model::SigningParams, parse_algorithm},
    key_backend::{model::PrivateKeyHandle, KeyBackend},
};

pub mod error;
pub mod mapper;
pub mod model;

#[cfg(test)]
mod test;

/// Builds and signs a proof token.
///
/// `alg` ends up in the token header and must name the same algorithm as
/// `signing_params`.
pub async fn sign_proof(
    claims: &ProofClaims,
    alg: &str,
    signing_params: &SigningParams,
    private_key: &PrivateKeyHandle,
    backend: &dyn KeyBackend,
) -> Result<ProofToken, ProofError> {
    if alg != signing_params.algorithm().as_ref() {
        return Err(ProofError::CouldNotSign(format!(
            "header algorithm `{alg}` does not match signing algorithm `{}`",
            signing_params.algorithm()
        )));
    }

    let header = ProofHeader {
        algorithm: alg.to_owned(),
        token_type: PROOF_TOKEN_TYPE.to_owned(),
    };

    let header_json =
        serde_json::to_string(&header).map_err(|e| ProofError::CouldNotFormat(e.to_string()))?;
    let claims_json =
        serde_json::to_string(claims).map_err(|e| ProofError::CouldNotFormat(e.to_string()))?;

    let mut token = format!(
        "{}.{}",
        string_to_b64url_string(&header_json)?,
        string_to_b64url_string(&claims_json)?,
    );

    let signature = backend
        .sign(private_key, signing_params, token.as_bytes())
        .await
        .map_err(|e| ProofError::CouldNotSign(e.to_string()))?;

    token.push('.');
    token.push_str(&bin_to_b64url_string(&signature)?);

    Ok(ProofToken::from(token))
}

/// Splits a compact token into its parts without checking the signature.
pub fn decompose_proof(token: &str) -> Result<DecomposedProof, ProofError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header, claims, signature] = parts.as_slice() else {
        return Err(ProofError::CouldNotExtract(format!(
            "expected 3 token parts, got {}",
            parts.len()
        )));
    };

    let header_json = json_from_decoded(b64url_string_to_bin(header)?)?;
    let header: ProofHeader = serde_json::from_str(&header_json)
        .map_err(|e| ProofError::CouldNotExtract(e.to_string()))?;

    let claims_json = json_from_decoded(b64url_string_to_bin(claims)?)?;
    let claims: ProofClaims = serde_json::from_str(&claims_json)
        .map_err(|e| ProofError::CouldNotExtract(e.to_string()))?;

    let signing_input_len = token.len() - signature.len() - 1;

    Ok(DecomposedProof {
        header,
        claims,
        signing_input: token[..signing_input_len].to_owned(),
        signature: canonical_b64url_string_to_bin(signature)?,
    })
}

/// Verifies a proof token against the public key it claims possession of.
pub fn verify_proof(
    token: &str,
    public_key: &PublicKeyJwk,
    crypto: &dyn CryptoProvider,
) -> Result<DecomposedProof, ProofError> {
    let proof = decompose_proof(token)?;

    if proof.header.token_type != PROOF_TOKEN_TYPE {
        return Err(ProofError::CouldNotVerify(format!(
            "unexpected token type `{}`",
            proof.header.token_type
        )));
    }

    let algorithm = parse_algorithm(&proof.header.algorithm)?;
    let public_key = jwk_to_public_key(algorithm, public_key)?;

    crypto
        .get_signer(algorithm.as_ref())
        .map_err(|e| ProofError::CouldNotVerify(e.to_string()))?
        .verify(proof.signing_input.as_bytes(), &proof.signature, &public_key)
        .map_err(|e| ProofError::CouldNotVerify(e.to_string()))?;

    Ok(proof)
}
