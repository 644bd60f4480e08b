//! Stateless client for the posts collection.
//!
//! # Design
//! `PostsClient` holds only its injected `Transport` and carries no mutable
//! state between calls, so concurrent operations on one client need no
//! coordination. Every operation that takes an identifier validates it first
//! and returns `ApiError::InvalidId` without touching the transport when
//! validation fails. Otherwise exactly one transport call is issued and its
//! result is returned unchanged.
//!
//! Payloads are opaque to the client. Request bodies are anything
//! `Serialize` and responses anything `DeserializeOwned`, chosen by the
//! caller: the DTOs in [`types`](crate::types) for a typed view, or
//! `serde_json::Value` to keep the server's body exactly as sent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::http::Transport;
use crate::id::{self, PostId, RawId};

/// Path prefix shared by every API route.
pub const API_BASE: &str = "/api";

/// Asynchronous, stateless client for the posts API.
#[derive(Debug, Clone)]
pub struct PostsClient<T> {
    transport: T,
}

impl<T: Transport> PostsClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_posts<R>(&self) -> ApiResult<R>
    where
        R: DeserializeOwned + Send,
    {
        let path = collection_path();
        debug!(path = %path, "listing posts");
        Ok(self.transport.get(&path).await?)
    }

    pub async fn get_post<R>(&self, id: impl Into<RawId>) -> ApiResult<R>
    where
        R: DeserializeOwned + Send,
    {
        let path = item_path(checked_id(id)?);
        debug!(path = %path, "fetching post");
        Ok(self.transport.get(&path).await?)
    }

    pub async fn create_post<B, R>(&self, post: &B) -> ApiResult<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        let path = collection_path();
        debug!(path = %path, "creating post");
        Ok(self.transport.post(&path, post).await?)
    }

    pub async fn update_post<B, R>(&self, id: impl Into<RawId>, updates: &B) -> ApiResult<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        let path = item_path(checked_id(id)?);
        debug!(path = %path, "updating post");
        Ok(self.transport.put(&path, updates).await?)
    }

    pub async fn delete_post(&self, id: impl Into<RawId>) -> ApiResult<()> {
        let path = item_path(checked_id(id)?);
        debug!(path = %path, "deleting post");
        Ok(self.transport.delete(&path).await?)
    }
}

fn checked_id(id: impl Into<RawId>) -> Result<PostId, ApiError> {
    id::validate(id).map_err(|e| {
        warn!(reason = %e.reason, received = %e.received, "rejected post id");
        ApiError::from(e)
    })
}

fn collection_path() -> String {
    format!("{API_BASE}/posts")
}

fn item_path(id: PostId) -> String {
    format!("{API_BASE}/posts/{id}")
}
