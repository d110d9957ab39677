//! `struct`s and `enum`s for key backends.

use std::fmt;

use zeroize::Zeroizing;

use crate::key_algorithm::model::{KeyGenParams, SignatureAlgorithmId};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeySecurity {
    Hardware,
    Software,
}

#[derive(Clone, Debug, Default)]
pub struct KeyBackendCapabilities {
    pub algorithms: Vec<SignatureAlgorithmId>,
    pub security: Vec<KeySecurity>,
}

/// Public half of a generated key pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    pub algorithm: SignatureAlgorithmId,
    pub bytes: Vec<u8>,
}

/// Opaque reference to a private key held by a [`KeyBackend`](super::KeyBackend).
///
/// Intentionally not `Debug`, `Clone` or `Serialize`. The reference bytes are
/// zeroized when the handle is dropped.
pub struct PrivateKeyHandle {
    params: KeyGenParams,
    public_key: Vec<u8>,
    key_reference: Zeroizing<Vec<u8>>,
}

impl PrivateKeyHandle {
    pub fn new(params: KeyGenParams, public_key: Vec<u8>, key_reference: Zeroizing<Vec<u8>>) -> Self {
        Self {
            params,
            public_key,
            key_reference,
        }
    }

    /// Parameters the key was generated with.
    pub fn params(&self) -> &KeyGenParams {
        &self.params
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Backend-specific key reference.
    ///
    /// Only meaningful to the backend that issued the handle; for software keys
    /// this is the key material itself.
    pub fn key_reference(&self) -> &[u8] {
        &self.key_reference
    }
}

pub struct GeneratedKeyPair {
    pub private: PrivateKeyHandle,
    pub public: PublicKey,
}

impl fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
