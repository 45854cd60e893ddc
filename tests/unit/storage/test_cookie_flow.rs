use crate::common::{auth_body, client_with_store};
use chrono::Utc;
use directus_sdk::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn cookie_header(access: &str, refresh: &str, expires_in: i64) -> String {
    format!(
        "{}={}; {}={}; {}={}; theme=dark",
        REFRESH_TOKEN_KEY,
        refresh,
        ACCESS_TOKEN_KEY,
        access,
        ACCESS_EXPIRES_KEY,
        Utc::now().timestamp() + expires_in
    )
}

#[tokio::test]
async fn cookie_session_authenticates_requests() {
    let mut server = Server::new_async().await;
    let items = server
        .mock("GET", "/items/posts")
        .match_header("authorization", "Bearer A")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let store = Arc::new(CookieStore::from_cookie_header(&cookie_header("A", "R", 600)));
    let client = client_with_store(&server.url(), store.clone(), false);

    assert!(client.is_authenticated());
    client.get_items("posts", ItemQuery::All).await;
    items.assert_async().await;
    assert!(store.pending_cookies().is_empty());
}

#[tokio::test]
async fn login_queues_cookies_until_next_round_trip() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(auth_body("A", "R", 900_000))
        .create_async()
        .await;

    let store = Arc::new(CookieStore::new());
    let client = client_with_store(&server.url(), store.clone(), false);

    assert!(client.auth_user("admin@example.com", "secret", None).await.is_success());

    // not readable before the client sends the cookies back
    assert!(!client.is_authenticated());
    let pending = store.pending_cookies();
    assert_eq!(pending.len(), 3);
    assert!(pending.iter().all(|c| !c.is_removal() && c.path == "/"));

    store.apply_pending();
    assert!(client.is_authenticated());
    assert_eq!(client.get_value(ACCESS_TOKEN_KEY).as_deref(), Some("A"));
}

#[tokio::test]
async fn logout_does_not_unauthenticate_same_round_trip() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/auth/logout")
        .match_body(Matcher::Json(json!({"refresh_token": "R"})))
        .with_status(200)
        .create_async()
        .await;
    let items = server
        .mock("GET", "/items/posts")
        .match_header("authorization", "Bearer A")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let store = Arc::new(CookieStore::from_cookie_header(&cookie_header("A", "R", 600)));
    let client = client_with_store(&server.url(), store.clone(), false);

    assert!(client.auth_logout().await.is_success());
    logout.assert_async().await;

    // the removals are only queued, the old token still goes out
    client.get_items("posts", ItemQuery::All).await;
    items.assert_async().await;

    let headers = store.take_set_cookie_headers();
    assert_eq!(headers.len(), 3);
    assert!(headers.iter().all(|h| h.contains("Max-Age=0")));
    assert!(
        headers
            .iter()
            .any(|h| h.starts_with(&format!("{REFRESH_TOKEN_KEY}=;")))
    );
}

#[tokio::test]
async fn refresh_with_cookies_queues_new_pair() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(json!({"refresh_token": "R"})))
        .with_status(200)
        .with_body(auth_body("A2", "R2", 900_000))
        .create_async()
        .await;

    let store = Arc::new(CookieStore::from_cookie_header(&cookie_header("A", "R", 10)));
    let client = client_with_store(&server.url(), store.clone(), false);

    assert_eq!(client.get_access_token().await.as_deref(), Some("A2"));
    refresh.assert_async().await;
    assert_eq!(client.get_value(REFRESH_TOKEN_KEY).as_deref(), Some("R"));

    store.apply_pending();
    assert_eq!(client.get_value(REFRESH_TOKEN_KEY).as_deref(), Some("R2"));
    assert_eq!(client.get_value("theme").as_deref(), Some("dark"));
}

#[test]
fn cookie_store_is_usable_from_sync_code() {
    let store = Arc::new(CookieStore::from_cookie_header(&cookie_header("A", "R", 600)));
    let client = client_with_store("http://localhost:8055", store, false);

    // fresh token, so no request is made
    let token = tokio_test::block_on(client.get_access_token());
    assert_eq!(token.as_deref(), Some("A"));
}

#[tokio::test]
async fn tampered_expiry_cookie_forces_refresh() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(json!({"refresh_token": "R"})))
        .with_status(200)
        .with_body(auth_body("A2", "R2", 900_000))
        .expect(2)
        .create_async()
        .await;

    for expires in ["-1e30", "-inf"] {
        let header = format!(
            "{REFRESH_TOKEN_KEY}=R; {ACCESS_TOKEN_KEY}=A; {ACCESS_EXPIRES_KEY}={expires}"
        );
        let store = Arc::new(CookieStore::from_cookie_header(&header));
        let client = client_with_store(&server.url(), store, false);

        let session = client.auth().session().expect("session from cookies");
        assert_eq!(session.expires_at, 0);
        assert!(session.seconds_until_expiry() < 0);
        assert_eq!(client.get_access_token().await.as_deref(), Some("A2"));
    }

    refresh.assert_async().await;
}
