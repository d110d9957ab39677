use p256::ecdsa::signature::{Signer as _, Verifier as _};
use rand::thread_rng;
use zeroize::Zeroizing;

use crate::{EllipticCurve, GeneratedKey, Signer, SignerError};

/// ECDSA over a NIST curve, hashed with the curve's JWS digest
/// (P-256/SHA-256, P-384/SHA-384, P-521/SHA-512).
///
/// Signatures use the fixed-width `r || s` encoding required by JWS.
pub struct EcdsaSigner {
    curve: EllipticCurve,
}

macro_rules! generate {
    ($curve:ident) => {{
        let sk = $curve::ecdsa::SigningKey::random(&mut thread_rng());
        let public = $curve::ecdsa::VerifyingKey::from(&sk)
            .to_encoded_point(false)
            .as_bytes()
            .to_vec();

        GeneratedKey {
            public,
            private: Zeroizing::new(sk.to_bytes().to_vec()),
        }
    }};
}

macro_rules! sign {
    ($curve:ident, $input:expr, $public_key:expr, $private_key:expr) => {{
        let sk = $curve::ecdsa::SigningKey::from_slice($private_key).map_err(|err| {
            SignerError::CouldNotExtractPublicKey(format!("couldn't initialize secret key: {err}"))
        })?;

        if $curve::ecdsa::VerifyingKey::from(&sk)
            .to_encoded_point(false)
            .as_bytes()
            != $public_key
        {
            return Err(SignerError::CouldNotExtractKeyPair);
        }

        let signature: $curve::ecdsa::Signature = sk
            .try_sign($input)
            .map_err(|err| SignerError::CouldNotSign(err.to_string()))?;
        Ok(signature.to_vec())
    }};
}

macro_rules! verify {
    ($curve:ident, $input:expr, $signature:expr, $public_key:expr) => {{
        let vk = $curve::ecdsa::VerifyingKey::from_sec1_bytes($public_key).map_err(|err| {
            SignerError::CouldNotExtractPublicKey(format!(
                "couldn't initialize verifying key: {err}"
            ))
        })?;

        let signature = $curve::ecdsa::Signature::from_slice($signature)
            .map_err(|_| SignerError::InvalidSignature)?;

        vk.verify($input, &signature)
            .map_err(|err| SignerError::CouldNotVerify(format!("couldn't verify: {err}")))
    }};
}

impl EcdsaSigner {
    pub fn new(curve: EllipticCurve) -> Self {
        Self { curve }
    }

    pub fn random(curve: EllipticCurve) -> GeneratedKey {
        match curve {
            EllipticCurve::P256 => generate!(p256),
            EllipticCurve::P384 => generate!(p384),
            EllipticCurve::P521 => generate!(p521),
        }
    }
}

impl Signer for EcdsaSigner {
    fn sign(
        &self,
        input: &[u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, SignerError> {
        match self.curve {
            EllipticCurve::P256 => sign!(p256, input, public_key, private_key),
            EllipticCurve::P384 => sign!(p384, input, public_key, private_key),
            EllipticCurve::P521 => sign!(p521, input, public_key, private_key),
        }
    }

    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), SignerError> {
        match self.curve {
            EllipticCurve::P256 => verify!(p256, input, signature, public_key),
            EllipticCurve::P384 => verify!(p384, input, signature, public_key),
            EllipticCurve::P521 => verify!(p521, input, signature, public_key),
        }
    }
}
