use std::ops::RangeInclusive;

use rand::thread_rng;
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey},
    pkcs1v15, pss,
    signature::{RandomizedSigner, SignatureEncoding, Signer as _, Verifier as _},
    BigUint, RsaPrivateKey, RsaPublicKey,
};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::{GeneratedKey, HashAlgorithm, RsaPadding, Signer, SignerError};

pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// Modulus lengths accepted for generation, in bits. Must also be a multiple of 8.
pub const RSA_MODULUS_LENGTHS: RangeInclusive<u32> = 2048..=4096;

/// RSASSA-PKCS1-v1_5 or RSASSA-PSS with a SHA-2 digest.
///
/// Keys are exchanged as PKCS#1 DER.
pub struct RsaSigner {
    padding: RsaPadding,
    hash: HashAlgorithm,
}

impl RsaSigner {
    pub fn new(padding: RsaPadding, hash: HashAlgorithm) -> Self {
        Self { padding, hash }
    }

    pub fn random(modulus_length: usize, public_exponent: u32) -> Result<GeneratedKey, SignerError> {
        let exponent = BigUint::from(public_exponent);
        let private_key = RsaPrivateKey::new_with_exp(&mut thread_rng(), modulus_length, &exponent)
            .map_err(|err| SignerError::CouldNotGenerate(err.to_string()))?;

        let public = private_key
            .to_public_key()
            .to_pkcs1_der()
            .map_err(|err| SignerError::CouldNotGenerate(err.to_string()))?
            .as_bytes()
            .to_vec();
        let private = private_key
            .to_pkcs1_der()
            .map_err(|err| SignerError::CouldNotGenerate(err.to_string()))?;

        Ok(GeneratedKey {
            public,
            private: Zeroizing::new(private.as_bytes().to_vec()),
        })
    }

    fn private_key(public_key: &[u8], private_key: &[u8]) -> Result<RsaPrivateKey, SignerError> {
        let sk = RsaPrivateKey::from_pkcs1_der(private_key).map_err(|err| {
            SignerError::CouldNotExtractPublicKey(format!("couldn't initialize secret key: {err}"))
        })?;

        if sk.to_public_key() != Self::public_key(public_key)? {
            return Err(SignerError::CouldNotExtractKeyPair);
        }
        Ok(sk)
    }

    fn public_key(public_key: &[u8]) -> Result<RsaPublicKey, SignerError> {
        RsaPublicKey::from_pkcs1_der(public_key).map_err(|err| {
            SignerError::CouldNotExtractPublicKey(format!(
                "couldn't initialize verifying key: {err}"
            ))
        })
    }
}

impl Signer for RsaSigner {
    fn sign(
        &self,
        input: &[u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, SignerError> {
        let sk = Self::private_key(public_key, private_key)?;
        let mut rng = thread_rng();

        let signature = match (self.padding, self.hash) {
            (RsaPadding::Pkcs1v15, HashAlgorithm::Sha256) => pkcs1v15::SigningKey::<Sha256>::new(sk)
                .try_sign(input)
                .map(|s| s.to_vec()),
            (RsaPadding::Pkcs1v15, HashAlgorithm::Sha384) => pkcs1v15::SigningKey::<Sha384>::new(sk)
                .try_sign(input)
                .map(|s| s.to_vec()),
            (RsaPadding::Pkcs1v15, HashAlgorithm::Sha512) => pkcs1v15::SigningKey::<Sha512>::new(sk)
                .try_sign(input)
                .map(|s| s.to_vec()),
            (RsaPadding::Pss, HashAlgorithm::Sha256) => pss::BlindedSigningKey::<Sha256>::new(sk)
                .try_sign_with_rng(&mut rng, input)
                .map(|s| s.to_vec()),
            (RsaPadding::Pss, HashAlgorithm::Sha384) => pss::BlindedSigningKey::<Sha384>::new(sk)
                .try_sign_with_rng(&mut rng, input)
                .map(|s| s.to_vec()),
            (RsaPadding::Pss, HashAlgorithm::Sha512) => pss::BlindedSigningKey::<Sha512>::new(sk)
                .try_sign_with_rng(&mut rng, input)
                .map(|s| s.to_vec()),
        };

        signature.map_err(|err| SignerError::CouldNotSign(err.to_string()))
    }

    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), SignerError> {
        let pk = Self::public_key(public_key)?;

        let result = match self.padding {
            RsaPadding::Pkcs1v15 => {
                let signature = pkcs1v15::Signature::try_from(signature)
                    .map_err(|_| SignerError::InvalidSignature)?;
                match self.hash {
                    HashAlgorithm::Sha256 => {
                        pkcs1v15::VerifyingKey::<Sha256>::new(pk).verify(input, &signature)
                    }
                    HashAlgorithm::Sha384 => {
                        pkcs1v15::VerifyingKey::<Sha384>::new(pk).verify(input, &signature)
                    }
                    HashAlgorithm::Sha512 => {
                        pkcs1v15::VerifyingKey::<Sha512>::new(pk).verify(input, &signature)
                    }
                }
            }
            RsaPadding::Pss => {
                let signature = pss::Signature::try_from(signature)
                    .map_err(|_| SignerError::InvalidSignature)?;
                match self.hash {
                    HashAlgorithm::Sha256 => {
                        pss::VerifyingKey::<Sha256>::new(pk).verify(input, &signature)
                    }
                    HashAlgorithm::Sha384 => {
                        pss::VerifyingKey::<Sha384>::new(pk).verify(input, &signature)
                    }
                    HashAlgorithm::Sha512 => {
                        pss::VerifyingKey::<Sha512>::new(pk).verify(input, &signature)
                    }
                }
            }
        };

        result.map_err(|err| SignerError::CouldNotVerify(format!("couldn't verify: {err}")))
    }
}
