use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};

use super::error::ProofError;

pub fn bin_to_b64url_string(bin: &[u8]) -> Result<String, ProofError> {
    Base64UrlSafeNoPadding::encode_to_string(bin)
        .map_err(|e| ProofError::CouldNotFormat(e.to_string()))
}

pub fn string_to_b64url_string(string: &str) -> Result<String, ProofError> {
    Base64UrlSafeNoPadding::encode_to_string(string)
        .map_err(|e| ProofError::CouldNotFormat(e.to_string()))
}

pub fn b64url_string_to_bin(string: &str) -> Result<Vec<u8>, ProofError> {
    Base64UrlSafeNoPadding::decode_to_vec(string, None)
        .map_err(|e| ProofError::CouldNotExtract(e.to_string()))
}

/// Decodes a segment, rejecting encodings with non-zero trailing bits.
///
/// Several base64url strings can decode to the same bytes; only the one this
/// crate produces is accepted.
pub fn canonical_b64url_string_to_bin(string: &str) -> Result<Vec<u8>, ProofError> {
    let decoded = b64url_string_to_bin(string)?;
    if bin_to_b64url_string(&decoded)? != string {
        return Err(ProofError::CouldNotExtract(
            "non-canonical base64url encoding".to_owned(),
        ));
    }
    Ok(decoded)
}

pub fn json_from_decoded(decoded: Vec<u8>) -> Result<String, ProofError> {
    let result =
        String::from_utf8(decoded).map_err(|e| ProofError::CouldNotExtract(e.to_string()))?;
    Ok(result)
}
