use enroll_crypto::{EllipticCurve, HashAlgorithm, RsaPadding};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::common_models::policy::KeyType;

/// JWS signature algorithm identifiers accepted in certificate policies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
pub enum SignatureAlgorithmId {
    #[strum(serialize = "RS256")]
    Rs256,
    #[strum(serialize = "RS384")]
    Rs384,
    #[strum(serialize = "RS512")]
    Rs512,
    #[strum(serialize = "ES256")]
    Es256,
    #[strum(serialize = "ES384")]
    Es384,
    #[strum(serialize = "ES512")]
    Es512,
    #[strum(serialize = "PS256")]
    Ps256,
    #[strum(serialize = "PS384")]
    Ps384,
    #[strum(serialize = "PS512")]
    Ps512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    Rsa(RsaPadding),
    Ecdsa(EllipticCurve),
}

impl SignatureAlgorithmId {
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Self::Rs256 | Self::Rs384 | Self::Rs512 => AlgorithmFamily::Rsa(RsaPadding::Pkcs1v15),
            Self::Ps256 | Self::Ps384 | Self::Ps512 => AlgorithmFamily::Rsa(RsaPadding::Pss),
            Self::Es256 => AlgorithmFamily::Ecdsa(EllipticCurve::P256),
            Self::Es384 => AlgorithmFamily::Ecdsa(EllipticCurve::P384),
            Self::Es512 => AlgorithmFamily::Ecdsa(EllipticCurve::P521),
        }
    }

    pub fn hash(&self) -> HashAlgorithm {
        match self {
            Self::Rs256 | Self::Es256 | Self::Ps256 => HashAlgorithm::Sha256,
            Self::Rs384 | Self::Es384 | Self::Ps384 => HashAlgorithm::Sha384,
            Self::Rs512 | Self::Es512 | Self::Ps512 => HashAlgorithm::Sha512,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self.family() {
            AlgorithmFamily::Rsa(_) => KeyType::Rsa,
            AlgorithmFamily::Ecdsa(_) => KeyType::Ec,
        }
    }
}

/// Everything a key backend needs to generate a key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyGenParams {
    Rsa(RsaKeyGenParams),
    Ec(EcKeyGenParams),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyGenParams {
    pub algorithm: SignatureAlgorithmId,
    pub padding: RsaPadding,
    pub hash: HashAlgorithm,
    pub modulus_length: u32,
    pub public_exponent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcKeyGenParams {
    pub algorithm: SignatureAlgorithmId,
    pub curve: EllipticCurve,
}

impl KeyGenParams {
    pub fn algorithm(&self) -> SignatureAlgorithmId {
        match self {
            Self::Rsa(params) => params.algorithm,
            Self::Ec(params) => params.algorithm,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Rsa(_) => KeyType::Rsa,
            Self::Ec(_) => KeyType::Ec,
        }
    }
}

/// Parameters of a single signing operation.
///
/// Unlike [`KeyGenParams`] these carry no modulus length: any RSA key can
/// produce any RSA signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningParams {
    Rsa {
        algorithm: SignatureAlgorithmId,
        padding: RsaPadding,
        hash: HashAlgorithm,
        /// PSS only
        salt_length: Option<usize>,
    },
    Ecdsa {
        algorithm: SignatureAlgorithmId,
        curve: EllipticCurve,
        hash: HashAlgorithm,
    },
}

impl SigningParams {
    pub fn algorithm(&self) -> SignatureAlgorithmId {
        match self {
            Self::Rsa { algorithm, .. } | Self::Ecdsa { algorithm, .. } => *algorithm,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Rsa { .. } => KeyType::Rsa,
            Self::Ecdsa { .. } => KeyType::Ec,
        }
    }
}
