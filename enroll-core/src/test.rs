use std::sync::Arc;

use enroll_providers::{
    auth::imp::{StaticAccount, StaticBearerToken},
    common_models::policy::{NamespaceLocator, PolicyId},
    enrollment::model::CertificateStatus,
    http_client::imp::reqwest_client::ReqwestClient,
};
use serde_json::json;
use wiremock::{
    http::Method,
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::{
    config::{EnrollCoreConfig, EnrollmentConfig},
    EnrollCore,
};

fn core(base_url: String) -> EnrollCore {
    EnrollCore::new(
        Some(EnrollCoreConfig {
            enrollment_config: EnrollmentConfig {
                base_url,
                ..Default::default()
            },
            ..Default::default()
        }),
        Arc::new(ReqwestClient::default()),
        Arc::new(StaticBearerToken::new("token")),
        Arc::new(StaticAccount::new("user-abc")),
    )
    .unwrap()
}

#[test]
fn test_new_rejects_invalid_base_url() {
    let result = EnrollCore::new(
        Some(EnrollCoreConfig {
            enrollment_config: EnrollmentConfig {
                base_url: "not a url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }),
        Arc::new(ReqwestClient::default()),
        Arc::new(StaticBearerToken::new("token")),
        Arc::new(StaticAccount::new("user-abc")),
    );

    assert!(result.is_err());
}

#[tokio::test]
async fn test_enroll_against_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::GET))
        .and(path("/api/v1/ca/ns-123/certificate-policies/tls-client"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tls-client",
            "namespace": { "kind": "ca", "id": "ns-123" },
            "keySpec": { "kty": "EC", "alg": "ES384", "crv": "P-384" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method(Method::POST))
        .and(path("/api/v1/ca/ns-123/certificate-policies/tls-client/enroll"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cert-9",
            "status": "ISSUED"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let core = core(format!("{}/api", mock_server.uri()));
    let session = core
        .enrollment_service
        .enroll(
            &NamespaceLocator {
                kind: "ca".to_string(),
                id: "ns-123".to_string(),
            },
            &PolicyId::from("tls-client".to_string()),
        )
        .await
        .unwrap();

    let Some(Ok(reference)) = session.outcome() else {
        panic!("enrollment failed: {:?}", session.state());
    };
    assert_eq!(reference.id, "cert-9");
    assert_eq!(reference.status, CertificateStatus::Issued);
}
