use std::sync::Arc;

use serde_json::json;
use wiremock::{
    http::Method,
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::HttpPolicySource;
use crate::{
    auth::{imp::StaticBearerToken, AuthError, MockBearerTokenSource},
    common_models::policy::{KeyType, NamespaceLocator, PolicyId},
    http_client::imp::reqwest_client::ReqwestClient,
    policy_source::{policy_url, PolicySource, PolicySourceError},
};

fn namespace() -> NamespaceLocator {
    NamespaceLocator {
        kind: "ca".to_string(),
        id: "ns-123".to_string(),
    }
}

fn policy_source(base_url: &str) -> HttpPolicySource {
    HttpPolicySource::new(
        base_url.parse().unwrap(),
        Arc::new(ReqwestClient::default()),
        Arc::new(StaticBearerToken::new("token")),
    )
}

#[test]
fn test_policy_url() {
    let policy_id = PolicyId::from("policy/1".to_string());

    assert_eq!(
        policy_url(&"https://kms.example.com".parse().unwrap(), &namespace(), &policy_id)
            .unwrap()
            .as_str(),
        "https://kms.example.com/v1/ca/ns-123/certificate-policies/policy%2F1"
    );
    assert_eq!(
        policy_url(&"https://kms.example.com/api/".parse().unwrap(), &namespace(), &policy_id)
            .unwrap()
            .as_str(),
        "https://kms.example.com/api/v1/ca/ns-123/certificate-policies/policy%2F1"
    );
    assert!(policy_url(&"mailto:kms@example.com".parse().unwrap(), &namespace(), &policy_id).is_err());
}

#[tokio::test]
async fn test_get_policy() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::GET))
        .and(path("/v1/ca/ns-123/certificate-policies/tls-client"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tls-client",
            "namespace": { "kind": "ca", "id": "ns-123" },
            "keySpec": { "kty": "EC", "alg": "ES256", "crv": "P-256" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let policy = policy_source(&mock_server.uri())
        .get_policy(&namespace(), &PolicyId::from("tls-client".to_string()))
        .await
        .unwrap();

    assert_eq!(policy.id.as_str(), "tls-client");
    assert_eq!(policy.namespace, namespace());
    assert_eq!(policy.key_spec.key_type, KeyType::Ec);
    assert_eq!(policy.key_spec.alg, "ES256");
    assert_eq!(policy.key_spec.crv.as_deref(), Some("P-256"));
    assert_eq!(policy.key_spec.key_size, None);
}

#[tokio::test]
async fn test_get_policy_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::GET))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = policy_source(&mock_server.uri())
        .get_policy(&namespace(), &PolicyId::from("missing".to_string()))
        .await;

    assert_eq!(
        result,
        Err(PolicySourceError::NotFound(PolicyId::from("missing".to_string())))
    );
}

#[tokio::test]
async fn test_get_policy_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::GET))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&mock_server)
        .await;

    let result = policy_source(&mock_server.uri())
        .get_policy(&namespace(), &PolicyId::from("tls-client".to_string()))
        .await;

    assert_eq!(
        result,
        Err(PolicySourceError::Failed {
            status: 500,
            diagnostic: "database unavailable".to_string()
        })
    );
}

#[tokio::test]
async fn test_get_policy_without_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::GET))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut token_source = MockBearerTokenSource::default();
    token_source
        .expect_bearer_token()
        .once()
        .returning(|| Err(AuthError::TokenUnavailable("signed out".to_string())));

    let source = HttpPolicySource::new(
        mock_server.uri().parse().unwrap(),
        Arc::new(ReqwestClient::default()),
        Arc::new(token_source),
    );

    let result = source
        .get_policy(&namespace(), &PolicyId::from("tls-client".to_string()))
        .await;
    assert!(matches!(result, Err(PolicySourceError::Auth(_))));
}
