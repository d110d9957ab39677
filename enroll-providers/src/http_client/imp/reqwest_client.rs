use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, Method, StatusCode};

#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            bearer_token,
            json_body,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
        };
        // reqwest marks the Authorization header sensitive
        if let Some(token) = bearer_token {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = json_body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = StatusCode(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        tracing::debug!(%method, url = url.as_str(), %status, "HTTP request completed");

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
