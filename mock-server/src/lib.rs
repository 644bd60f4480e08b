use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

const TITLE_MAX: usize = 255;
const CONTENT_MAX: usize = 50_000;
const AUTHOR_MAX: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Default)]
pub struct Store {
    posts: HashMap<u64, Post>,
    last_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/", get(health))
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock posts server listening");
    }
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(json!({ "detail": detail.into() })))
}

fn not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "Post not found")
}

/// Enforce the 1..=max character length rule shared by create and update.
fn check_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} must be between 1 and {max} characters"),
        ));
    }
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Blogging Platform API" }))
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    let mut posts: Vec<Post> = store.posts.values().cloned().collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Json(posts)
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    check_len("title", &input.title, TITLE_MAX)?;
    check_len("content", &input.content, CONTENT_MAX)?;
    check_len("author", &input.author, AUTHOR_MAX)?;

    let mut store = db.write().await;
    store.last_id += 1;
    let now = Utc::now();
    let post = Post {
        id: store.last_id,
        title: input.title,
        content: input.content,
        author: input.author,
        view_count: 0,
        created_at: now,
        updated_at: now,
    };
    store.posts.insert(post.id, post.clone());
    Ok((StatusCode::CREATED, Json(post)))
}

/// Reading a single post counts as a view.
async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, ApiError> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or_else(not_found)?;
    post.view_count += 1;
    Ok(Json(post.clone()))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, ApiError> {
    if let Some(title) = &input.title {
        check_len("title", title, TITLE_MAX)?;
    }
    if let Some(content) = &input.content {
        check_len("content", content, CONTENT_MAX)?;
    }
    if let Some(author) = &input.author {
        check_len("author", author, AUTHOR_MAX)?;
    }

    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(content) = input.content {
        post.content = content;
    }
    if let Some(author) = input.author {
        post.author = author;
    }
    post.updated_at = Utc::now();
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store
        .posts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_to_json() {
        let at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let post = Post {
            id: 1,
            title: "Test".to_string(),
            content: "Body".to_string(),
            author: "Ada".to_string(),
            view_count: 0,
            created_at: at,
            updated_at: at,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["view_count"], 0);
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn create_post_rejects_missing_author() {
        let result: Result<CreatePost, _> =
            serde_json::from_str(r#"{"title":"t","content":"c"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_post_all_fields_optional() {
        let input: UpdatePost = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.content.is_none());
        assert!(input.author.is_none());
    }

    #[test]
    fn length_rule_counts_characters() {
        assert!(check_len("title", "", TITLE_MAX).is_err());
        assert!(check_len("title", &"é".repeat(TITLE_MAX), TITLE_MAX).is_ok());
        assert!(check_len("title", &"a".repeat(TITLE_MAX + 1), TITLE_MAX).is_err());
    }
}
