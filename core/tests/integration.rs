//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every
//! `PostsClient` operation over real HTTP through `ReqwestTransport`.
//! Validates that path building, identifier validation and response
//! decoding work end-to-end with the actual server.

use futures::future::join_all;
use posts_core::{
    ApiError, ClientConfig, NewPost, Post, PostUpdate, PostsClient, ReqwestTransport,
    TransportError,
};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn crud_lifecycle() {
    // Step 1: start mock server on a random port.
    let base_url = start_server().await;
    let transport = ReqwestTransport::new(&ClientConfig::new(base_url)).unwrap();
    let client = PostsClient::new(transport);

    // Step 2: list: should be empty.
    let posts: Vec<Post> = client.list_posts().await.unwrap();
    assert!(posts.is_empty(), "expected empty list");

    // Step 3: create a post.
    let input = NewPost {
        title: "Integration test".to_string(),
        content: "Written over real HTTP".to_string(),
        author: "Ada".to_string(),
    };
    let created: Post = client.create_post(&input).await.unwrap();
    assert_eq!(created.title, "Integration test");
    assert_eq!(created.view_count, 0);
    let id = created.id;

    // Step 4: get the created post, by number and by numeric string.
    let fetched: Post = client.get_post(id).await.unwrap();
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.view_count, 1);
    let fetched: Post = client.get_post(id.to_string()).await.unwrap();
    assert_eq!(fetched.view_count, 2);

    // Step 5: update title only.
    let updates = PostUpdate {
        title: Some("Updated title".to_string()),
        ..Default::default()
    };
    let updated: Post = client.update_post(id, &updates).await.unwrap();
    assert_eq!(updated.title, "Updated title");
    assert_eq!(updated.content, "Written over real HTTP");

    // Step 6: server-side validation failure surfaces as an HTTP error.
    let bad = PostUpdate {
        author: Some(String::new()),
        ..Default::default()
    };
    let err = client.update_post::<_, Post>(id, &bad).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::Http { status: 422, .. })
    ));

    // Step 7: traversal ids are rejected before reaching the server.
    let err = client
        .get_post::<Post>(format!("{id}/../{id}"))
        .await
        .unwrap_err();
    assert!(err.is_invalid_id());

    // Step 8: list: should have one item.
    let posts: Vec<Post> = client.list_posts().await.unwrap();
    assert_eq!(posts.len(), 1);

    // Step 9: delete.
    client.delete_post(id).await.unwrap();

    // Step 10: get after delete: should be NotFound.
    let err = client.get_post::<Post>(id).await.unwrap_err();
    assert!(err.is_not_found());

    // Step 11: delete again: should be NotFound.
    let err = client.delete_post(id).await.unwrap_err();
    assert!(err.is_not_found());

    // Step 12: list: should be empty again.
    let posts: Vec<Post> = client.list_posts().await.unwrap();
    assert!(posts.is_empty(), "expected empty list after delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_reads_share_one_client() {
    let base_url = start_server().await;
    let client = PostsClient::new(ReqwestTransport::new(&ClientConfig::new(base_url)).unwrap());

    let created: Post = client
        .create_post(&NewPost {
            title: "Popular".to_string(),
            content: "Read me".to_string(),
            author: "Grace".to_string(),
        })
        .await
        .unwrap();

    let reads = (0..5).map(|_| client.get_post::<Post>(created.id));
    let results = join_all(reads).await;
    assert!(results.iter().all(|r| r.is_ok()));

    let after: Post = client.get_post(created.id).await.unwrap();
    assert_eq!(after.view_count, 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_json_bodies_pass_through() {
    let base_url = start_server().await;
    let client = PostsClient::new(ReqwestTransport::new(&ClientConfig::new(base_url)).unwrap());

    let body = serde_json::json!({ "title": "Raw", "content": "Untyped", "author": "Ada" });
    let created: serde_json::Value = client.create_post(&body).await.unwrap();
    assert_eq!(created["title"], "Raw");

    let listed: serde_json::Value = client.list_posts().await.unwrap();
    assert_eq!(listed[0]["id"], created["id"]);
}
