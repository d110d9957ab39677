use super::{
    signer::{
        ecdsa::EcdsaSigner,
        rsa::{RsaSigner, RSA_PUBLIC_EXPONENT},
    },
    CryptoProviderImpl,
};
use crate::{CryptoProvider, CryptoProviderError, EllipticCurve, Signer, SignerError};

const MESSAGE: &[u8] = b"eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9.eyJhdWQiOiJucy0xMjMifQ";

#[test]
fn test_ecdsa_sign_verify_all_curves() {
    for curve in [EllipticCurve::P256, EllipticCurve::P384, EllipticCurve::P521] {
        let key = EcdsaSigner::random(curve);
        let signer = EcdsaSigner::new(curve);

        assert_eq!(key.public.len(), 1 + 2 * curve.coordinate_len());

        let signature = signer.sign(MESSAGE, &key.public, &key.private).unwrap();
        assert_eq!(signature.len(), 2 * curve.coordinate_len());

        signer.verify(MESSAGE, &signature, &key.public).unwrap();
        assert!(signer.verify(b"other", &signature, &key.public).is_err());
    }
}

#[test]
fn test_ecdsa_p521_public_key_matches_private_key() {
    let key = EcdsaSigner::random(EllipticCurve::P521);

    let sk = p521::ecdsa::SigningKey::from_slice(&key.private).unwrap();
    let expected = p521::ecdsa::VerifyingKey::from(&sk).to_encoded_point(false);
    assert_eq!(key.public, expected.as_bytes());
    assert_eq!(key.public[0], 0x04);

    let signer = EcdsaSigner::new(EllipticCurve::P521);
    let signature = signer.sign(MESSAGE, &key.public, &key.private).unwrap();
    signer.verify(MESSAGE, &signature, &key.public).unwrap();
}

#[test]
fn test_ecdsa_sign_rejects_mismatched_public_key() {
    let key = EcdsaSigner::random(EllipticCurve::P256);
    let other = EcdsaSigner::random(EllipticCurve::P256);

    let result = EcdsaSigner::new(EllipticCurve::P256).sign(MESSAGE, &other.public, &key.private);

    assert_eq!(result, Err(SignerError::CouldNotExtractKeyPair));
}

#[test]
fn test_ecdsa_verify_rejects_malformed_signature() {
    let key = EcdsaSigner::random(EllipticCurve::P384);

    let result = EcdsaSigner::new(EllipticCurve::P384).verify(MESSAGE, &[1, 2, 3], &key.public);

    assert_eq!(result, Err(SignerError::InvalidSignature));
}

#[test]
fn test_rsa_sign_verify_all_schemes() {
    let key = RsaSigner::random(2048, RSA_PUBLIC_EXPONENT).unwrap();
    let provider = CryptoProviderImpl::with_default_signers();

    for algorithm in ["RS256", "RS384", "RS512", "PS256", "PS384", "PS512"] {
        let signer = provider.get_signer(algorithm).unwrap();

        let signature = signer.sign(MESSAGE, &key.public, &key.private).unwrap();
        assert_eq!(signature.len(), 256, "{algorithm}");

        signer.verify(MESSAGE, &signature, &key.public).unwrap();

        let mut tampered = MESSAGE.to_vec();
        tampered[0] ^= 1;
        assert!(signer.verify(&tampered, &signature, &key.public).is_err());
    }
}

#[test]
fn test_rsa_pkcs1v15_is_deterministic() {
    let key = RsaSigner::random(2048, RSA_PUBLIC_EXPONENT).unwrap();
    let signer = CryptoProviderImpl::with_default_signers()
        .get_signer("RS256")
        .unwrap();

    let first = signer.sign(MESSAGE, &key.public, &key.private).unwrap();
    let second = signer.sign(MESSAGE, &key.public, &key.private).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_signer() {
    let provider = CryptoProviderImpl::with_default_signers();

    assert_eq!(
        provider.get_signer("HS256").err(),
        Some(CryptoProviderError::MissingSigner("HS256".to_string()))
    );
}
