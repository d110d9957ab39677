//! HTTP transport used by the enrollment and policy clients.
//!
//! A request is described by an [`HttpRequest`] and executed by an
//! [`HttpClient`], so the transport can be swapped (e.g. for a platform HTTP
//! stack). The bearer token travels in its own zeroizing field and is never
//! part of the request's `Debug` output. A `reqwest` implementation lives in
//! [`imp::reqwest_client`].

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use strum::Display;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

pub mod imp;

#[cfg(test)]
mod test;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request. Non-2xx statuses are returned as responses, only
    /// transport failures are errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP transport error: `{0}`")]
    Transport(String),
    #[error("JSON error: `{0}`")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub bearer_token: Option<Zeroizing<String>>,
    pub json_body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::Post, url)
    }

    fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            bearer_token: None,
            json_body: None,
        }
    }

    pub fn bearer_auth(mut self, token: &str) -> Self {
        self.bearer_token = Some(Zeroizing::new(token.to_owned()));
        self
    }

    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, HttpError> {
        self.json_body = Some(serde_json::to_value(value)?);
        Ok(self)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text, invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
