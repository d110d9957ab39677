use std::{collections::HashMap, sync::Arc};

use super::{CryptoProvider, CryptoProviderError, EllipticCurve, HashAlgorithm, RsaPadding, Signer};
use self::signer::{ecdsa::EcdsaSigner, rsa::RsaSigner};

pub mod signer;

#[cfg(test)]
mod test;

#[derive(Clone)]
pub struct CryptoProviderImpl {
    signers: HashMap<String, Arc<dyn Signer>>,
}

impl CryptoProviderImpl {
    pub fn new(signers: HashMap<String, Arc<dyn Signer>>) -> Self {
        Self { signers }
    }

    /// Registers a signer for every supported JWS algorithm identifier.
    pub fn with_default_signers() -> Self {
        let rsa = |padding, hash| Arc::new(RsaSigner::new(padding, hash)) as Arc<dyn Signer>;
        let ecdsa = |curve| Arc::new(EcdsaSigner::new(curve)) as Arc<dyn Signer>;

        Self::new(HashMap::from_iter(vec![
            ("RS256".to_string(), rsa(RsaPadding::Pkcs1v15, HashAlgorithm::Sha256)),
            ("RS384".to_string(), rsa(RsaPadding::Pkcs1v15, HashAlgorithm::Sha384)),
            ("RS512".to_string(), rsa(RsaPadding::Pkcs1v15, HashAlgorithm::Sha512)),
            ("PS256".to_string(), rsa(RsaPadding::Pss, HashAlgorithm::Sha256)),
            ("PS384".to_string(), rsa(RsaPadding::Pss, HashAlgorithm::Sha384)),
            ("PS512".to_string(), rsa(RsaPadding::Pss, HashAlgorithm::Sha512)),
            ("ES256".to_string(), ecdsa(EllipticCurve::P256)),
            ("ES384".to_string(), ecdsa(EllipticCurve::P384)),
            ("ES512".to_string(), ecdsa(EllipticCurve::P521)),
        ]))
    }
}

impl CryptoProvider for CryptoProviderImpl {
    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError> {
        Ok(self
            .signers
            .get(signer)
            .ok_or(CryptoProviderError::MissingSigner(signer.to_owned()))?
            .clone())
    }
}
