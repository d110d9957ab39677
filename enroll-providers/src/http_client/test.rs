use serde_json::json;
use url::Url;
use wiremock::{
    http::Method as WiremockMethod,
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::{
    imp::reqwest_client::ReqwestClient, HttpClient, HttpError, HttpRequest, Method, StatusCode,
};

fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{path}", server.uri())).unwrap()
}

#[tokio::test]
async fn test_get_with_bearer_auth() {
    let mock_server = MockServer::start().await;
    Mock::given(method(WiremockMethod::GET))
        .and(path("/resource"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": 1 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = ReqwestClient::default()
        .execute(HttpRequest::get(url(&mock_server, "/resource")).bearer_auth("secret-token"))
        .await
        .unwrap();

    assert!(response.status.is_success());
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body, json!({ "value": 1 }));
}

#[tokio::test]
async fn test_post_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method(WiremockMethod::POST))
        .and(path("/resource"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "value" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = HttpRequest::post(url(&mock_server, "/resource"))
        .json(&json!({ "name": "value" }))
        .unwrap();
    let response = ReqwestClient::default().execute(request).await.unwrap();

    assert_eq!(response.status, StatusCode(201));
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method(WiremockMethod::GET))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let response = ReqwestClient::default()
        .execute(HttpRequest::get(url(&mock_server, "/")))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode(403));
    assert!(!response.status.is_success());
    assert_eq!(response.text(), "forbidden");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let result = ReqwestClient::default()
        .execute(HttpRequest::get(Url::parse("http://127.0.0.1:9/").unwrap()))
        .await;

    assert!(matches!(result, Err(HttpError::Transport(_))));
}

#[test]
fn test_request_debug_hides_bearer_token() {
    let request =
        HttpRequest::get(Url::parse("https://kms.example.com/v1").unwrap()).bearer_auth("secret-token");

    let debug = format!("{request:?}");

    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("secret-token"));
}

#[test]
fn test_method_display() {
    assert_eq!(Method::Get.to_string(), "GET");
    assert_eq!(Method::Post.to_string(), "POST");
}
