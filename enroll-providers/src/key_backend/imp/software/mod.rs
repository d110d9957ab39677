//! In-memory software key backend.

use std::{ops::RangeInclusive, sync::Arc};

use enroll_crypto::{
    imp::signer::{
        ecdsa::EcdsaSigner,
        rsa::{RsaSigner, RSA_MODULUS_LENGTHS},
    },
    CryptoProvider, SignerError,
};
use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::{
    common_models::PublicKeyJwk,
    key_algorithm::{
        jwk::public_key_to_jwk,
        model::{KeyGenParams, SignatureAlgorithmId, SigningParams},
    },
    key_backend::{
        error::KeyBackendError,
        model::{GeneratedKeyPair, KeyBackendCapabilities, KeySecurity, PrivateKeyHandle, PublicKey},
        KeyBackend,
    },
};


pub struct SoftwareKeyBackend {
    crypto: Arc<dyn CryptoProvider>,
    rsa_modulus_lengths: RangeInclusive<u32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub min_rsa_modulus_length: u32,
    pub max_rsa_modulus_length: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_rsa_modulus_length: *RSA_MODULUS_LENGTHS.start(),
            max_rsa_modulus_length: *RSA_MODULUS_LENGTHS.end(),
        }
    }
}

impl SoftwareKeyBackend {
    pub fn new(crypto: Arc<dyn CryptoProvider>, params: Params) -> Self {
        Self {
            crypto,
            rsa_modulus_lengths: params.min_rsa_modulus_length..=params.max_rsa_modulus_length,
        }
    }

    fn check_modulus_length(&self, modulus_length: u32) -> Result<(), KeyBackendError> {
        if !self.rsa_modulus_lengths.contains(&modulus_length) || modulus_length % 8 != 0 {
            return Err(KeyBackendError::UnsupportedParameters(format!(
                "RSA modulus length {modulus_length} outside {}..={} or not a multiple of 8",
                self.rsa_modulus_lengths.start(),
                self.rsa_modulus_lengths.end()
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyBackend for SoftwareKeyBackend {
    async fn generate(&self, params: &KeyGenParams) -> Result<GeneratedKeyPair, KeyBackendError> {
        let key = match params {
            KeyGenParams::Rsa(rsa) => {
                self.check_modulus_length(rsa.modulus_length)?;

                // large RSA keys take long enough to stall the executor
                let modulus_length = rsa.modulus_length as usize;
                let public_exponent = rsa.public_exponent;
                tokio::task::spawn_blocking(move || RsaSigner::random(modulus_length, public_exponent))
                    .await
                    .map_err(|e| KeyBackendError::GenerationFailed(e.to_string()))?
                    .map_err(|e| KeyBackendError::GenerationFailed(e.to_string()))?
            }
            KeyGenParams::Ec(ec) => EcdsaSigner::random(ec.curve),
        };

        tracing::debug!(algorithm = %params.algorithm(), "generated software key pair");

        Ok(GeneratedKeyPair {
            public: PublicKey {
                algorithm: params.algorithm(),
                bytes: key.public.clone(),
            },
            private: PrivateKeyHandle::new(params.to_owned(), key.public, key.private),
        })
    }

    async fn sign(
        &self,
        private_key: &PrivateKeyHandle,
        params: &SigningParams,
        message: &[u8],
    ) -> Result<Vec<u8>, SignerError> {
        let compatible = match (private_key.params(), params) {
            (KeyGenParams::Rsa(_), SigningParams::Rsa { .. }) => true,
            (KeyGenParams::Ec(key), SigningParams::Ecdsa { curve, .. }) => key.curve == *curve,
            _ => false,
        };
        if !compatible {
            return Err(SignerError::CouldNotSign(format!(
                "key generated for `{}` cannot produce `{}` signatures",
                private_key.params().algorithm(),
                params.algorithm()
            )));
        }

        let signer = self.crypto.get_signer(params.algorithm().as_ref())?;

        signer.sign(message, private_key.public_key(), private_key.key_reference())
    }

    fn export_public(&self, public_key: &PublicKey) -> Result<PublicKeyJwk, KeyBackendError> {
        Ok(public_key_to_jwk(public_key.algorithm, &public_key.bytes)?)
    }

    fn get_capabilities(&self) -> KeyBackendCapabilities {
        KeyBackendCapabilities {
            algorithms: SignatureAlgorithmId::iter().collect(),
            security: vec![KeySecurity::Software],
        }
    }
}
