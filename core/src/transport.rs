//! `Transport` implementation backed by `reqwest`.
//!
//! Request bodies are serialized with `serde_json` before sending so that a
//! bad payload surfaces as `TransportError::Serialization` instead of a
//! generic network error. Response bodies are read as text and decoded the
//! same way.

use async_trait::async_trait;
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, Transport};

/// HTTP transport that resolves request paths against a fixed server origin.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(&config.base_url, client))
    }

    /// Use a preconfigured `reqwest::Client` (shared pools, custom TLS, ...).
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, TransportError> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "sending request");

        let mut request = self.client.request(to_reqwest(method), &url);
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(|e| {
            debug!(method = %method, url = %url, error = %e, "request failed");
            map_reqwest_error(e)
        })?;
        check_status(response).await
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get<T>(&self, path: &str) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        let response = self.send(HttpMethod::Get, path, None).await?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let response = self.send(HttpMethod::Post, path, Some(encode(body)?)).await?;
        decode(response).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let response = self.send(HttpMethod::Put, path, Some(encode(body)?)).await?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), TransportError> {
        self.send(HttpMethod::Delete, path, None).await?;
        Ok(())
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(e.to_string())
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(body).map_err(|e| TransportError::Serialization(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let text = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str(&text).map_err(|e| TransportError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `TransportError` variant.
async fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(TransportError::NotFound);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Http {
        status: status.as_u16(),
        body,
    })
}
