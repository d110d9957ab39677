use std::{env, error::Error, sync::Arc};

use enroll_core::{config::EnrollCoreConfig, EnrollCore};
use enroll_crypto::imp::CryptoProviderImpl;
use enroll_providers::{
    auth::imp::{StaticAccount, StaticBearerToken},
    common_models::policy::{KeySpecification, KeyType, NamespaceLocator, PolicyId},
    http_client::imp::reqwest_client::ReqwestClient,
    key_algorithm::{resolve_key_gen_params, resolve_signing_params},
    key_backend::{
        imp::software::{Params, SoftwareKeyBackend},
        KeyBackend,
    },
    proof::{model::ProofClaims, sign_proof},
};
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = EnrollCoreConfig::default();
    if let Ok(base_url) = env::var("ENROLL_BASE_URL") {
        config.enrollment_config.base_url = base_url;
    }

    let core = EnrollCore::new(
        Some(config),
        Arc::new(ReqwestClient::default()),
        Arc::new(StaticBearerToken::new(env::var("ENROLL_TOKEN").unwrap_or_default())),
        Arc::new(StaticAccount::new(
            env::var("ENROLL_SUBJECT").unwrap_or_else(|_| "user-abc".to_string()),
        )),
    )?;

    prove_possession_locally(&core).await?;

    // talk to a real server only when one is configured
    if env::var("ENROLL_BASE_URL").is_ok() {
        enroll(&core).await?;
    }

    Ok(())
}

/// Generates a key pair per algorithm, signs a proof and verifies it the way
/// the server would.
async fn prove_possession_locally(core: &EnrollCore) -> Result<(), Box<dyn Error>> {
    let key_backend = SoftwareKeyBackend::new(
        Arc::new(CryptoProviderImpl::with_default_signers()),
        Params::default(),
    );

    for (key_type, alg, key_size) in [
        (KeyType::Ec, "ES256", None),
        (KeyType::Ec, "ES512", None),
        (KeyType::Rsa, "PS256", Some(2048)),
    ] {
        let params = resolve_key_gen_params(&KeySpecification {
            key_type,
            alg: alg.to_string(),
            key_size,
            crv: None,
        })?;
        let signing_params = resolve_signing_params(alg)?;

        let key_pair = key_backend.generate(&params).await?;
        let claims = ProofClaims::new("ns-123", "user-abc", OffsetDateTime::now_utc());
        let proof = sign_proof(&claims, alg, &signing_params, &key_pair.private, &key_backend).await?;

        let public_key = key_backend.export_public(&key_pair.public)?;
        match core.enrollment_service.verify_proof(proof.as_str(), &public_key) {
            Ok(_) => println!("{alg}: proof verified"),
            Err(error) => println!("{alg}: proof rejected: {error}"),
        }
    }

    Ok(())
}

async fn enroll(core: &EnrollCore) -> Result<(), Box<dyn Error>> {
    let namespace = NamespaceLocator {
        kind: env::var("ENROLL_NAMESPACE_KIND").unwrap_or_else(|_| "ca".to_string()),
        id: env::var("ENROLL_NAMESPACE_ID").unwrap_or_else(|_| "ns-123".to_string()),
    };
    let policy_id = PolicyId::from(env::var("ENROLL_POLICY_ID")?);

    let mut session = core.enrollment_service.enroll(&namespace, &policy_id).await?;
    if session
        .state()
        .error()
        .is_some_and(|error| error.is_retryable())
    {
        session.retry().await;
    }

    match session.outcome() {
        Some(Ok(reference)) => println!("certificate {} is {}", reference.id, reference.status),
        Some(Err(error)) => println!("enrollment failed: {error}"),
        None => println!("enrollment did not complete"),
    }

    Ok(())
}
