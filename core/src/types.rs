//! Domain DTOs for the posts API.
//!
//! # Design
//! Optional typed views of the server's schema, defined independently of the
//! mock-server crate. `PostsClient` never requires them: any `Serialize`
//! body and any `DeserializeOwned` response type works, and
//! `serde_json::Value` keeps a body exactly as the server sent it. These DTOs
//! are strict, so a body that does not match them fails to decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single blog post returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Request payload for updating an existing post. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
