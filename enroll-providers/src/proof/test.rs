use std::sync::Arc;

use enroll_crypto::{imp::CryptoProviderImpl, EllipticCurve, HashAlgorithm, RsaPadding, SignerError};
use time::macros::datetime;
use zeroize::Zeroizing;

use super::{
    decompose_proof,
    error::ProofError,
    mapper::b64url_string_to_bin,
    model::{ProofClaims, PROOF_VALIDITY},
    sign_proof, verify_proof,
};
use crate::{
    common_models::PublicKeyJwk,
    key_algorithm::{
        model::{EcKeyGenParams, KeyGenParams, RsaKeyGenParams, SignatureAlgorithmId},
        resolve_signing_params,
    },
    key_backend::{
        imp::software::{Params, SoftwareKeyBackend},
        model::PrivateKeyHandle,
        KeyBackend, MockKeyBackend,
    },
};

fn software_backend() -> SoftwareKeyBackend {
    SoftwareKeyBackend::new(
        Arc::new(CryptoProviderImpl::with_default_signers()),
        Params::default(),
    )
}

fn claims() -> ProofClaims {
    ProofClaims::new("ns-123", "user-abc", datetime!(2024-05-01 10:00:00 UTC))
}

fn es256_params() -> KeyGenParams {
    KeyGenParams::Ec(EcKeyGenParams {
        algorithm: SignatureAlgorithmId::Es256,
        curve: EllipticCurve::P256,
    })
}

#[test]
fn test_claims_validity_window() {
    let now = datetime!(2024-05-01 10:00:00.750 UTC);
    let claims = ProofClaims::new("ns-123", "user-abc", now);

    assert_eq!(claims.not_before, datetime!(2024-05-01 10:00:00 UTC));
    assert_eq!(claims.expires_at - claims.not_before, PROOF_VALIDITY);
    assert_eq!(
        serde_json::to_string(&claims).unwrap(),
        r#"{"aud":"ns-123","iss":"user-abc","nbf":1714557600,"exp":1714558200}"#
    );
}

#[tokio::test]
async fn test_token_shape() {
    let backend = software_backend();
    let key_pair = backend.generate(&es256_params()).await.unwrap();

    let token = sign_proof(
        &claims(),
        "ES256",
        &resolve_signing_params("ES256").unwrap(),
        &key_pair.private,
        &backend,
    )
    .await
    .unwrap();

    let parts: Vec<&str> = token.as_str().split('.').collect();
    assert_eq!(parts.len(), 3);
    for part in &parts {
        assert!(part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    assert_eq!(
        b64url_string_to_bin(parts[0]).unwrap(),
        br#"{"alg":"ES256","typ":"JWT"}"#
    );
    assert_eq!(
        b64url_string_to_bin(parts[1]).unwrap(),
        br#"{"aud":"ns-123","iss":"user-abc","nbf":1714557600,"exp":1714558200}"#
    );
    // fixed-width r || s
    assert_eq!(b64url_string_to_bin(parts[2]).unwrap().len(), 64);
}

#[tokio::test]
async fn test_sign_and_verify_ec() {
    let backend = software_backend();
    let crypto = CryptoProviderImpl::with_default_signers();

    for (algorithm, curve, signature_len) in [
        (SignatureAlgorithmId::Es256, EllipticCurve::P256, 64),
        (SignatureAlgorithmId::Es384, EllipticCurve::P384, 96),
        (SignatureAlgorithmId::Es512, EllipticCurve::P521, 132),
    ] {
        let key_pair = backend
            .generate(&KeyGenParams::Ec(EcKeyGenParams { algorithm, curve }))
            .await
            .unwrap();
        let alg = algorithm.to_string();

        let token = sign_proof(
            &claims(),
            &alg,
            &resolve_signing_params(&alg).unwrap(),
            &key_pair.private,
            &backend,
        )
        .await
        .unwrap();

        let jwk = backend.export_public(&key_pair.public).unwrap();
        let proof = verify_proof(token.as_str(), &jwk, &crypto).unwrap();

        assert_eq!(proof.header.algorithm, alg);
        assert_eq!(proof.claims, claims());
        assert_eq!(proof.signature.len(), signature_len);
    }
}

#[tokio::test]
async fn test_sign_and_verify_rsa() {
    let backend = software_backend();
    let crypto = CryptoProviderImpl::with_default_signers();

    let key_pair = backend
        .generate(&KeyGenParams::Rsa(RsaKeyGenParams {
            algorithm: SignatureAlgorithmId::Rs256,
            padding: RsaPadding::Pkcs1v15,
            hash: HashAlgorithm::Sha256,
            modulus_length: 2048,
            public_exponent: 65537,
        }))
        .await
        .unwrap();

    for alg in ["RS256", "RS384", "RS512", "PS256", "PS384", "PS512"] {
        let token = sign_proof(
            &claims(),
            alg,
            &resolve_signing_params(alg).unwrap(),
            &key_pair.private,
            &backend,
        )
        .await
        .unwrap();

        // the exported JWK is bound to the generation algorithm, so verify
        // against an unbound copy
        let mut jwk = backend.export_public(&key_pair.public).unwrap();
        if let PublicKeyJwk::Rsa(data) = &mut jwk {
            data.alg = None;
        }

        verify_proof(token.as_str(), &jwk, &crypto).unwrap();
    }
}

#[tokio::test]
async fn test_pkcs1_proof_is_deterministic() {
    let backend = software_backend();
    let key_pair = backend
        .generate(&KeyGenParams::Rsa(RsaKeyGenParams {
            algorithm: SignatureAlgorithmId::Rs256,
            padding: RsaPadding::Pkcs1v15,
            hash: HashAlgorithm::Sha256,
            modulus_length: 2048,
            public_exponent: 65537,
        }))
        .await
        .unwrap();
    let signing_params = resolve_signing_params("RS256").unwrap();

    let first = sign_proof(&claims(), "RS256", &signing_params, &key_pair.private, &backend)
        .await
        .unwrap();
    let second = sign_proof(&claims(), "RS256", &signing_params, &key_pair.private, &backend)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_verify_detects_tampering() {
    let backend = software_backend();
    let crypto = CryptoProviderImpl::with_default_signers();
    let key_pair = backend.generate(&es256_params()).await.unwrap();
    let jwk = backend.export_public(&key_pair.public).unwrap();

    let token = sign_proof(
        &claims(),
        "ES256",
        &resolve_signing_params("ES256").unwrap(),
        &key_pair.private,
        &backend,
    )
    .await
    .unwrap();
    let token = token.as_str();

    for (index, original) in token.char_indices() {
        if original == '.' {
            continue;
        }
        let replacement = if original == 'A' { 'B' } else { 'A' };

        let mut tampered = token.to_owned();
        tampered.replace_range(index..index + 1, &replacement.to_string());

        assert!(
            verify_proof(&tampered, &jwk, &crypto).is_err(),
            "tampering at {index} not detected"
        );
    }
}

#[tokio::test]
async fn test_verify_with_other_key_fails() {
    let backend = software_backend();
    let crypto = CryptoProviderImpl::with_default_signers();
    let key_pair = backend.generate(&es256_params()).await.unwrap();
    let other = backend.generate(&es256_params()).await.unwrap();

    let token = sign_proof(
        &claims(),
        "ES256",
        &resolve_signing_params("ES256").unwrap(),
        &key_pair.private,
        &backend,
    )
    .await
    .unwrap();

    let result = verify_proof(
        token.as_str(),
        &backend.export_public(&other.public).unwrap(),
        &crypto,
    );
    assert!(matches!(result, Err(ProofError::CouldNotVerify(_))));
}

#[tokio::test]
async fn test_sign_proof_signing_failure() {
    let mut backend = MockKeyBackend::default();
    backend
        .expect_sign()
        .once()
        .returning(|_, _, _| Err(SignerError::CouldNotSign("device locked".to_owned())));

    let handle = PrivateKeyHandle::new(es256_params(), vec![], Zeroizing::new(vec![]));

    let result = sign_proof(
        &claims(),
        "ES256",
        &resolve_signing_params("ES256").unwrap(),
        &handle,
        &backend,
    )
    .await;
    assert!(matches!(result, Err(ProofError::CouldNotSign(_))));
}

#[tokio::test]
async fn test_sign_proof_algorithm_mismatch() {
    let mut backend = MockKeyBackend::default();
    backend.expect_sign().never();

    let handle = PrivateKeyHandle::new(es256_params(), vec![], Zeroizing::new(vec![]));

    let result = sign_proof(
        &claims(),
        "ES384",
        &resolve_signing_params("ES256").unwrap(),
        &handle,
        &backend,
    )
    .await;
    assert!(matches!(result, Err(ProofError::CouldNotSign(_))));
}

#[test]
fn test_decompose_rejects_malformed_tokens() {
    for token in ["", "abc", "a.b", "a.b.c.d", "..."] {
        assert!(decompose_proof(token).is_err(), "{token}");
    }
}
