//! Asynchronous API client core for the posts service.
//!
//! # Overview
//! `PostsClient` exposes list/get/create/update/delete over an injected
//! `Transport`. Identifiers are validated before they reach a request path,
//! so a malformed or malicious id never causes network I/O.
//!
//! # Design
//! - `PostsClient` is stateless; it holds only its transport.
//! - `id::validate` is the single injection boundary: a lenient numeric
//!   parse followed by a path-traversal scan of the raw text.
//! - `Transport` is a trait so tests can substitute a recording double;
//!   `ReqwestTransport` is the production implementation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod id;
pub mod transport;
pub mod types;

pub use client::{PostsClient, API_BASE};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult, InvalidIdError, InvalidIdReason, TransportError};
pub use http::{HttpMethod, Transport};
pub use id::{validate, PostId, RawId};
pub use transport::ReqwestTransport;
pub use types::{NewPost, Post, PostUpdate};
