//! Asymmetric key generation and signing behind an opaque handle.
//!
//! A [`KeyBackend`] generates key pairs matching resolved [`KeyGenParams`],
//! signs with the private half and exports the public half as JWK. The private
//! half never leaves the backend in usable form: callers only ever hold a
//! [`PrivateKeyHandle`], which is neither `Debug`, `Clone` nor serializable.
//!
//! The [software backend][sw] keeps keys in zeroizing memory. Hardware-backed
//! implementations can be plugged in through the same trait.
//!
//! [sw]: imp/software/index.html

use enroll_crypto::SignerError;

use self::{
    error::KeyBackendError,
    model::{GeneratedKeyPair, KeyBackendCapabilities, PrivateKeyHandle, PublicKey},
};
use crate::{
    common_models::PublicKeyJwk,
    key_algorithm::model::{KeyGenParams, SigningParams},
};

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait KeyBackend: Send + Sync {
    /// Generates a fresh key pair usable for signing and verification.
    async fn generate(&self, params: &KeyGenParams) -> Result<GeneratedKeyPair, KeyBackendError>;

    /// Signs `message` with the private key behind `private_key`.
    async fn sign(
        &self,
        private_key: &PrivateKeyHandle,
        params: &SigningParams,
        message: &[u8],
    ) -> Result<Vec<u8>, SignerError>;

    /// Exports the public key as JWK.
    fn export_public(&self, public_key: &PublicKey) -> Result<PublicKeyJwk, KeyBackendError>;

    fn get_capabilities(&self) -> KeyBackendCapabilities;
}
