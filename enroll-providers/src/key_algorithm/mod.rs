//! Resolution of policy key specifications into key generation and signing
//! parameters.
//!
//! A certificate policy names a JWS algorithm (`RS256`, `ES384`, `PS512`, ...)
//! together with an RSA modulus size or an EC curve. The resolver validates that
//! combination and maps it to the concrete parameters a [key backend][kb] needs:
//!
//! * [`resolve_key_gen_params`] for generating a matching key pair,
//! * [`resolve_signing_params`] for signing with it.
//!
//! Both functions are pure. Anything they do not recognize is reported as
//! [`KeyAlgorithmError::UnsupportedAlgorithm`] and must stop the enrollment
//! before a key is generated.
//!
//! [kb]: ../key_backend/index.html

use std::str::FromStr;

use enroll_crypto::imp::signer::rsa::{RSA_MODULUS_LENGTHS, RSA_PUBLIC_EXPONENT};
use error::KeyAlgorithmError;
use model::{
    AlgorithmFamily, EcKeyGenParams, KeyGenParams, RsaKeyGenParams, SignatureAlgorithmId,
    SigningParams,
};

use crate::common_models::policy::KeySpecification;

pub mod error;
pub mod jwk;
pub mod model;


/// Parses a JWS algorithm identifier.
pub fn parse_algorithm(alg: &str) -> Result<SignatureAlgorithmId, KeyAlgorithmError> {
    SignatureAlgorithmId::from_str(alg)
        .map_err(|_| KeyAlgorithmError::UnsupportedAlgorithm(format!("unknown algorithm `{alg}`")))
}

/// Maps a policy key specification to key generation parameters.
pub fn resolve_key_gen_params(spec: &KeySpecification) -> Result<KeyGenParams, KeyAlgorithmError> {
    let algorithm = parse_algorithm(&spec.alg)?;

    if algorithm.key_type() != spec.key_type {
        return Err(KeyAlgorithmError::UnsupportedAlgorithm(format!(
            "`{algorithm}` cannot be used with key type `{}`",
            spec.key_type
        )));
    }

    match algorithm.family() {
        AlgorithmFamily::Rsa(padding) => {
            if spec.crv.is_some() {
                return Err(KeyAlgorithmError::UnsupportedAlgorithm(format!(
                    "`{algorithm}` does not take a curve"
                )));
            }

            let modulus_length = spec.key_size.ok_or_else(|| {
                KeyAlgorithmError::UnsupportedAlgorithm(format!("`{algorithm}` requires a key size"))
            })?;
            if !RSA_MODULUS_LENGTHS.contains(&modulus_length) || modulus_length % 8 != 0 {
                return Err(KeyAlgorithmError::UnsupportedAlgorithm(format!(
                    "`{algorithm}` key size {modulus_length} outside {}..={} or not a multiple of 8",
                    RSA_MODULUS_LENGTHS.start(),
                    RSA_MODULUS_LENGTHS.end()
                )));
            }

            Ok(KeyGenParams::Rsa(RsaKeyGenParams {
                algorithm,
                padding,
                hash: algorithm.hash(),
                modulus_length,
                public_exponent: RSA_PUBLIC_EXPONENT,
            }))
        }
        AlgorithmFamily::Ecdsa(curve) => {
            if spec.key_size.is_some() {
                return Err(KeyAlgorithmError::UnsupportedAlgorithm(format!(
                    "`{algorithm}` does not take a key size"
                )));
            }

            // the curve is implied by the algorithm, a stated one must agree
            if let Some(crv) = spec.crv.as_deref() {
                if crv != curve.name() {
                    return Err(KeyAlgorithmError::UnsupportedAlgorithm(format!(
                        "`{algorithm}` requires curve `{}`, got `{crv}`",
                        curve.name()
                    )));
                }
            }

            Ok(KeyGenParams::Ec(EcKeyGenParams { algorithm, curve }))
        }
    }
}

/// Maps a JWS algorithm identifier to signing parameters.
pub fn resolve_signing_params(alg: &str) -> Result<SigningParams, KeyAlgorithmError> {
    let algorithm = parse_algorithm(alg)?;
    let hash = algorithm.hash();

    Ok(match algorithm.family() {
        AlgorithmFamily::Rsa(padding) => SigningParams::Rsa {
            algorithm,
            padding,
            hash,
            salt_length: match padding {
                enroll_crypto::RsaPadding::Pss => Some(hash.output_len()),
                enroll_crypto::RsaPadding::Pkcs1v15 => None,
            },
        },
        AlgorithmFamily::Ecdsa(curve) => SigningParams::Ecdsa {
            algorithm,
            curve,
            hash,
        },
    })
}
