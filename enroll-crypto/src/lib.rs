//! Signing and verifying of raw bytes.
//!
//! This crate provides key pair generation and direct signatures and verifications
//! of raw bytes for the JWS algorithms used in certificate enrollment. It has been
//! separated into its own directory to enable future certification, e.g. in the
//! [NIST Cryptographic Module Validation Program (CMVP)][cmvp].
//!
//! [cmvp]: https://csrc.nist.gov/Projects/Cryptographic-Module-Validation-Program

use std::sync::Arc;

use thiserror::Error;
use zeroize::Zeroizing;

pub mod imp;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoProviderError {
    #[error("Missing signer: `{0}`")]
    MissingSigner(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("Crypto provider error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract keypair")]
    CouldNotExtractKeyPair,
    #[error("Could not extract public key: `{0}`")]
    CouldNotExtractPublicKey(String),
    #[error("Could not generate key pair: `{0}`")]
    CouldNotGenerate(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Invalid signature")]
    InvalidSignature,
}

/// Digest used by a signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Digest output length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// NIST named curves supported for ECDSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipticCurve {
    P256,
    P384,
    P521,
}

impl EllipticCurve {
    /// JWK `crv` name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Size of one affine coordinate (and of one signature half) in bytes.
    pub fn coordinate_len(&self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaPadding {
    /// RSASSA-PKCS1-v1_5
    Pkcs1v15,
    /// RSASSA-PSS, salt length equal to the digest length
    Pss,
}

/// Freshly generated key material.
///
/// EC keys: `public` is the uncompressed SEC1 point, `private` the scalar.
/// RSA keys: both halves are PKCS#1 DER.
pub struct GeneratedKey {
    pub public: Vec<u8>,
    pub private: Zeroizing<Vec<u8>>,
}

/// Direct signing and verification over raw key bytes.
///
/// Callers normally sign through a key backend, which keeps the private key
/// behind an opaque handle.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Signer: Send + Sync {
    /// Direct signing.
    fn sign(
        &self,
        input: &[u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, SignerError>;

    /// Direct signature verification.
    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), SignerError>;
}

/// Return signer instances by JWS algorithm identifier.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CryptoProvider: Send + Sync {
    /// Returns signer instance.
    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError>;
}
