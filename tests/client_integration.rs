//! 登录、token 注入与传输错误

mod common;

use common::*;
use rapidgator::netdisk::{AccountStateLabel, ApiMessage};
use rapidgator::{Error, RapidgatorClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_empty_credentials() {
    assert!(matches!(RapidgatorClient::new("", PASSWORD), Err(Error::EmptyUsername)));
    assert!(matches!(RapidgatorClient::new(USERNAME, ""), Err(Error::EmptyPassword)));
}

#[tokio::test]
async fn test_login_then_profile() {
    let (server, client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v2/user/info"))
        .and(query_param("token", TOKEN))
        .respond_with(ok(json!({ "user": user_json() })))
        .expect(1)
        .mount(&server)
        .await;

    let login = client.login().await.unwrap();
    let login = login.into_response().unwrap();
    assert_eq!(login.token, TOKEN);
    assert!(client.is_logged_in());
    assert_eq!(client.token().as_deref(), Some(TOKEN));

    let profile = client.get_profile().await.unwrap();
    assert!(profile.is_success());
    let user = profile.into_response().unwrap().user;
    assert_eq!(user.email, login.user.email);
    assert_eq!(user.state_label, Some(AccountStateLabel::Activated));
    assert_eq!(user.storage.total, 4_398_046_511_104);
}

#[tokio::test]
async fn test_failed_login_clears_token() {
    let (server, client) = setup().await;
    client.set_token("stale");

    Mock::given(method("GET"))
        .and(path("/api/v2/user/login"))
        .respond_with(api_error(401, "Error: Login or password is wrong"))
        .mount(&server)
        .await;

    let envelope = client.login().await.unwrap();
    assert!(envelope.is_unauthorized());
    assert_eq!(envelope.details, Some(ApiMessage::LoginOrPasswordWrong));
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn test_login_does_not_send_token() {
    let (server, client) = setup().await;
    client.set_token("old");
    mount_login(&server).await;

    client.login().await.unwrap();

    let query = query_of(&server, "/api/v2/user/login").await;
    assert!(query.iter().all(|(k, _)| k != "token"));
}

#[tokio::test]
async fn test_profile_without_login_reaches_server() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/user/info"))
        .respond_with(api_error(401, "Error: Invalid auth code"))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.get_profile().await.unwrap();
    assert!(envelope.is_unauthorized());
    assert_eq!(envelope.details, Some(ApiMessage::InvalidAuthCode));

    let query = query_of(&server, "/api/v2/user/info").await;
    assert!(query.is_empty());
}

#[tokio::test]
async fn test_no_request_before_login() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    assert!(matches!(client.get_file("f1").await, Err(Error::NotLoggedIn)));
    assert!(matches!(client.get_folder(None).await, Err(Error::NotLoggedIn)));
    assert!(matches!(client.remove_folder("7").await, Err(Error::NotLoggedIn)));
    assert!(matches!(client.download_file("f1").await, Err(Error::NotLoggedIn)));
}

#[tokio::test]
async fn test_http_error_status() {
    let (server, client) = setup_logged_in().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/file/info"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.get_file("f1").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert!(!err.is_precondition());
}

#[tokio::test]
async fn test_undecodable_body() {
    let (server, client) = setup_logged_in().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/file/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    match client.get_file("f1").await {
        Err(Error::Decode { endpoint, .. }) => assert_eq!(endpoint, "/api/v2/file/info"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_clones_share_token() {
    let (server, client) = setup().await;
    mount_login(&server).await;

    let cloned = client.clone();
    client.login().await.unwrap();
    assert_eq!(cloned.token().as_deref(), Some(TOKEN));
}
