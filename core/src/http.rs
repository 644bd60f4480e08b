//! HTTP transport capability.
//!
//! # Design
//! `PostsClient` never talks to the network directly. It is handed a
//! `Transport` that performs one request per call and returns the decoded
//! body, or a `TransportError` for network faults, non-2xx statuses and
//! undecodable bodies. Production code uses
//! [`ReqwestTransport`](crate::transport::ReqwestTransport); tests substitute
//! a recording double.
//!
//! Paths passed to a transport are absolute on the server (`/api/posts/3`);
//! resolving them against a host is the transport's job.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs single HTTP requests and decodes JSON response bodies.
///
/// Implementations own connection handling, timeouts and cancellation. A
/// dropped future cancels the in-flight request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get<T>(&self, path: &str) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send;

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;

    /// Issue a DELETE; the response body, if any, is discarded.
    async fn delete(&self, path: &str) -> Result<(), TransportError>;
}
