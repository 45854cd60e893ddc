use crate::common::client_with_store;
use assert_json_diff::assert_json_eq;
use directus_sdk::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn anonymous_client(url: &str, strip_headers: bool) -> Client {
    client_with_store(url, Arc::new(SessionStore::new()), strip_headers)
}

#[tokio::test]
async fn get_items_paths() {
    let mut server = Server::new_async().await;
    let all = server
        .mock("GET", "/items/posts")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"data":[{"id":1},{"id":7}]}"#)
        .create_async()
        .await;
    let one = server
        .mock("GET", "/items/posts/7")
        .with_status(200)
        .with_body(r#"{"data":{"id":7}}"#)
        .create_async()
        .await;

    let client = anonymous_client(&server.url(), false);

    let response = client.get_items("posts", ItemQuery::All).await;
    assert_json_eq!(response.data.unwrap(), json!([{"id": 1}, {"id": 7}]));

    let response = client.get_items("posts", 7.into()).await;
    assert_json_eq!(response.data.unwrap(), json!({"id": 7}));

    all.assert_async().await;
    one.assert_async().await;
}

#[tokio::test]
async fn get_items_with_filter_sends_query() {
    let mut server = Server::new_async().await;
    let filtered = server
        .mock("GET", "/items/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filter[status][_eq]".into(), "published".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("fields[0]".into(), "id".into()),
        ]))
        .match_body("")
        .with_status(200)
        .with_body(r#"{"data":[],"meta":{"filter_count":0}}"#)
        .create_async()
        .await;

    let client = anonymous_client(&server.url(), true);
    let query = ItemQuery::Filter(json!({
        "filter": {"status": {"_eq": "published"}},
        "limit": 5,
        "fields": ["id"]
    }));

    let response = client.get_items("posts", query).await;
    filtered.assert_async().await;
    assert!(response.headers.is_none());
    assert_eq!(response.extra.get("meta"), Some(&json!({"filter_count": 0})));
}

#[tokio::test]
async fn create_items_posts_body() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/items/posts")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": "Hello"})))
        .with_status(200)
        .with_body(r#"{"data":{"id":3,"title":"Hello"}}"#)
        .create_async()
        .await;

    let client = anonymous_client(&server.url(), false);
    let response = client.create_items("posts", json!({"title": "Hello"})).await;

    create.assert_async().await;
    assert_eq!(response.http_code(), Some(200));
    assert_json_eq!(response.data.unwrap(), json!({"id": 3, "title": "Hello"}));
}

#[tokio::test]
async fn update_items_single_and_bulk() {
    let mut server = Server::new_async().await;
    let single = server
        .mock("PATCH", "/items/posts/3")
        .match_body(Matcher::Json(json!({"title": "Edited"})))
        .with_status(200)
        .with_body(r#"{"data":{"id":3,"title":"Edited"}}"#)
        .create_async()
        .await;
    let bulk = server
        .mock("PATCH", "/items/posts")
        .match_body(Matcher::Json(json!({"keys": [1, 2], "data": {"status": "draft"}})))
        .with_status(200)
        .with_body(r#"{"data":[{"id":1},{"id":2}]}"#)
        .create_async()
        .await;

    let client = anonymous_client(&server.url(), false);
    client
        .update_items("posts", json!({"title": "Edited"}), Some(ItemId::from(3)))
        .await;
    client
        .update_items(
            "posts",
            json!({"keys": [1, 2], "data": {"status": "draft"}}),
            None,
        )
        .await;

    single.assert_async().await;
    bulk.assert_async().await;
}

#[tokio::test]
async fn delete_items_single_and_bulk() {
    let mut server = Server::new_async().await;
    let bulk = server
        .mock("DELETE", "/items/posts")
        .match_body(Matcher::Json(json!([1, 2, 3])))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let single = server
        .mock("DELETE", "/items/posts/5")
        .match_body("")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = anonymous_client(&server.url(), false);

    let response = client.delete_items("posts", vec![1, 2, 3].into()).await;
    assert_eq!(response.http_code(), Some(204));
    assert_eq!(response.data, None);

    let response = client.delete_items("posts", 5.into()).await;
    assert_eq!(response.http_code(), Some(204));

    bulk.assert_async().await;
    single.assert_async().await;
}

#[tokio::test]
async fn strip_headers_controls_metadata() {
    let mut server = Server::new_async().await;
    let _items = server
        .mock("GET", "/items/posts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"{"data":[]}"#)
        .expect_at_least(1)
        .create_async()
        .await;
    let _create = server
        .mock("POST", "/items/posts")
        .with_status(400)
        .with_body(r#"{"errors":[{"message":"Invalid payload."}]}"#)
        .create_async()
        .await;
    let _update = server
        .mock("PATCH", "/items/posts/3")
        .with_status(200)
        .with_body(r#"{"data":{"id":3}}"#)
        .expect(2)
        .create_async()
        .await;
    let _delete = server
        .mock("DELETE", "/items/posts")
        .with_status(204)
        .expect(2)
        .create_async()
        .await;

    let kept = anonymous_client(&server.url(), false);
    let response = kept.get_items("posts", ItemQuery::All).await;
    let headers = response.headers.as_ref().expect("headers kept");
    assert_eq!(headers.http_code, 200);
    assert_eq!(
        headers.content_type.as_deref(),
        Some("application/json; charset=utf-8")
    );
    assert!(headers.url.ends_with("/items/posts"));

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["headers"]["http_code"], json!(200));

    let response = kept
        .update_items("posts", json!({"title": "x"}), Some(ItemId::from(3)))
        .await;
    assert_eq!(response.http_code(), Some(200));
    let response = kept.delete_items("posts", vec![1, 2].into()).await;
    assert_eq!(response.http_code(), Some(204));

    let stripped = anonymous_client(&server.url(), true);
    for response in [
        stripped.get_items("posts", ItemQuery::All).await,
        stripped.get_items("posts", ItemQuery::Filter(json!({"limit": 1}))).await,
        stripped.create_items("posts", json!({})).await,
        stripped
            .update_items("posts", json!({"title": "x"}), Some(ItemId::from(3)))
            .await,
        stripped.delete_items("posts", vec![1, 2].into()).await,
    ] {
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("headers").is_none());
    }
}

#[tokio::test]
async fn transport_error_yields_errors_envelope() {
    // nothing listens on port 1
    let config = Config::with_base_url("http://127.0.0.1:1").timeouts(2, 1);
    let client = Client::new(config).expect("client should build");

    let response = client.get_items("posts", ItemQuery::All).await;
    assert!(response.has_errors());
    assert!(response.transport_error().is_some());
    assert_eq!(response.http_code(), Some(0));
    assert_eq!(response.data, None);

    let outcome = client.auth_user("admin@example.com", "secret", None).await;
    let envelope = outcome.envelope().expect("transport failure is a failure");
    assert!(envelope.transport_error().is_some());
}

#[tokio::test]
async fn non_json_body_keeps_metadata() {
    let mut server = Server::new_async().await;
    let _items = server
        .mock("GET", "/items/posts")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = anonymous_client(&server.url(), false);
    let response = client.get_items("posts", ItemQuery::All).await;
    assert_eq!(response.http_code(), Some(502));
    assert_eq!(response.data, None);
    assert!(!response.has_errors());
}
