//! Conversion between raw public key bytes and JWK.
//!
//! EC public keys are uncompressed SEC1 points, RSA public keys PKCS#1 DER.

use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use enroll_crypto::EllipticCurve;
use rsa::{
    pkcs1::{DecodeRsaPublicKey, EncodeRsaPublicKey},
    traits::PublicKeyParts,
    BigUint, RsaPublicKey,
};

use super::{
    error::KeyAlgorithmError,
    model::{AlgorithmFamily, SignatureAlgorithmId},
};
use crate::common_models::{PublicKeyJwk, PublicKeyJwkEllipticData, PublicKeyJwkRsaData};

macro_rules! sec1_to_coordinates {
    ($curve:ident, $bytes:expr) => {{
        let vk = $curve::ecdsa::VerifyingKey::from_sec1_bytes($bytes)
            .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;
        let encoded_point = vk.to_encoded_point(false);
        let x = encoded_point
            .x()
            .ok_or(KeyAlgorithmError::Failed("X is missing".to_string()))?
            .to_vec();
        let y = encoded_point
            .y()
            .ok_or(KeyAlgorithmError::Failed("Y is missing".to_string()))?
            .to_vec();
        (x, y)
    }};
}

macro_rules! check_sec1 {
    ($curve:ident, $bytes:expr) => {
        $curve::ecdsa::VerifyingKey::from_sec1_bytes($bytes)
            .map(|_| ())
            .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))
    };
}

/// Converts public key bytes to JWK, tagging it with `algorithm`.
pub fn public_key_to_jwk(
    algorithm: SignatureAlgorithmId,
    public_key: &[u8],
) -> Result<PublicKeyJwk, KeyAlgorithmError> {
    match algorithm.family() {
        AlgorithmFamily::Ecdsa(curve) => {
            let (x, y) = match curve {
                EllipticCurve::P256 => sec1_to_coordinates!(p256, public_key),
                EllipticCurve::P384 => sec1_to_coordinates!(p384, public_key),
                EllipticCurve::P521 => sec1_to_coordinates!(p521, public_key),
            };

            Ok(PublicKeyJwk::Ec(PublicKeyJwkEllipticData {
                alg: Some(algorithm.to_string()),
                crv: curve.name().to_string(),
                x: encode(&x)?,
                y: encode(&y)?,
            }))
        }
        AlgorithmFamily::Rsa(_) => {
            let pk = RsaPublicKey::from_pkcs1_der(public_key)
                .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;

            Ok(PublicKeyJwk::Rsa(PublicKeyJwkRsaData {
                alg: Some(algorithm.to_string()),
                e: encode(&pk.e().to_bytes_be())?,
                n: encode(&pk.n().to_bytes_be())?,
            }))
        }
    }
}

/// Converts a JWK back to public key bytes usable with `algorithm`.
pub fn jwk_to_public_key(
    algorithm: SignatureAlgorithmId,
    jwk: &PublicKeyJwk,
) -> Result<Vec<u8>, KeyAlgorithmError> {
    if let Some(alg) = jwk.get_alg() {
        if alg != algorithm.as_ref() {
            return Err(KeyAlgorithmError::Failed(format!(
                "JWK is bound to `{alg}`, not `{algorithm}`"
            )));
        }
    }

    match (algorithm.family(), jwk) {
        (AlgorithmFamily::Ecdsa(curve), PublicKeyJwk::Ec(data)) => {
            if data.crv != curve.name() {
                return Err(KeyAlgorithmError::Failed(format!(
                    "invalid crv `{}`",
                    data.crv
                )));
            }

            let x = decode(&data.x)?;
            let y = decode(&data.y)?;
            if x.len() != curve.coordinate_len() || y.len() != curve.coordinate_len() {
                return Err(KeyAlgorithmError::Failed(
                    "invalid coordinate length".to_string(),
                ));
            }

            let bytes = [&[0x04u8][..], x.as_slice(), y.as_slice()].concat();
            match curve {
                EllipticCurve::P256 => check_sec1!(p256, &bytes)?,
                EllipticCurve::P384 => check_sec1!(p384, &bytes)?,
                EllipticCurve::P521 => check_sec1!(p521, &bytes)?,
            }

            Ok(bytes)
        }
        (AlgorithmFamily::Rsa(_), PublicKeyJwk::Rsa(data)) => {
            let n = BigUint::from_bytes_be(&decode(&data.n)?);
            let e = BigUint::from_bytes_be(&decode(&data.e)?);

            let pk = RsaPublicKey::new(n, e).map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;
            let der = pk
                .to_pkcs1_der()
                .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;

            Ok(der.as_bytes().to_vec())
        }
        _ => Err(KeyAlgorithmError::Failed("invalid kty".to_string())),
    }
}

fn encode(bytes: &[u8]) -> Result<String, KeyAlgorithmError> {
    Base64UrlSafeNoPadding::encode_to_string(bytes)
        .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))
}

fn decode(value: &str) -> Result<Vec<u8>, KeyAlgorithmError> {
    Base64UrlSafeNoPadding::decode_to_vec(value, None)
        .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))
}
