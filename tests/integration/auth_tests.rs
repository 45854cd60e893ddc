use crate::common;
use directus_sdk::prelude::*;
use tracing::info;

#[tokio::test]
#[ignore]
async fn test_login_and_logout() {
    let client = common::login().await;
    assert!(client.is_authenticated(), "Session should be stored");

    let token = client.get_access_token().await;
    assert!(token.is_some(), "Access token should be present");

    let outcome = client.auth_logout().await;
    assert!(outcome.is_success(), "Logout failed: {outcome:?}");
    assert!(!client.is_authenticated());
    info!("Login and logout completed");
}

#[tokio::test]
#[ignore]
async fn test_login_with_wrong_password() {
    let client = common::create_test_client();
    let email = std::env::var("DIRECTUS_EMAIL").expect("DIRECTUS_EMAIL not set");

    let outcome = client.auth_user(&email, "definitely-wrong", None).await;
    let envelope = outcome.envelope().expect("Login should fail");
    assert!(envelope.has_errors());
    assert!(!client.is_authenticated());
}
