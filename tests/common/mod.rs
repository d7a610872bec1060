//! 集成测试公共工具：mock 服务器与响应数据

use rapidgator::{ClientConfig, RapidgatorClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "user@example.com";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-123";

/// 启动 mock 服务器并创建指向它的客户端
pub async fn setup() -> (MockServer, RapidgatorClient) {
    let server = MockServer::start().await;
    let client =
        RapidgatorClient::with_config(USERNAME, PASSWORD, ClientConfig::with_base_url(server.uri()))
            .unwrap();
    (server, client)
}

/// 启动 mock 服务器并完成登录
#[allow(unused)]
pub async fn setup_logged_in() -> (MockServer, RapidgatorClient) {
    let (server, client) = setup().await;
    mount_login(&server).await;
    let envelope = client.login().await.unwrap();
    assert!(envelope.is_success());
    (server, client)
}

/// 成功响应外壳
pub fn ok(response: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "response": response,
        "status": 200,
        "details": null
    }))
}

/// 业务错误响应外壳（HTTP 200）
#[allow(unused)]
pub fn api_error(status: u16, details: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "response": null,
        "status": status,
        "details": details
    }))
}

pub fn user_json() -> Value {
    json!({
        "email": USERNAME,
        "is_premium": false,
        "premium_end_time": null,
        "state": 1,
        "state_label": "Activated",
        "traffic": {"total": null, "left": null},
        "storage": {"total": "4398046511104", "left": 4398035213138u64},
        "upload": {"max_file_size": 5368709120u64, "nb_pipes": 1},
        "remote_upload": {"max_nb_jobs": 10, "refresh_time": 60}
    })
}

#[allow(unused)]
pub fn folder_json(folder_id: &str, parent: Option<&str>, name: &str) -> Value {
    json!({
        "folder_id": folder_id,
        "mode": 0,
        "mode_label": "Public",
        "parent_folder_id": parent,
        "name": name,
        "url": format!("https://rapidgator.net/folder/{}/{}.html", folder_id, name),
        "nb_folders": 0,
        "nb_files": 0,
        "size_files": 0,
        "created": 1700000000
    })
}

#[allow(unused)]
pub fn file_json(file_id: &str, folder_id: &str, name: &str) -> Value {
    json!({
        "file_id": file_id,
        "folder_id": folder_id,
        "mode": 0,
        "mode_label": "Public",
        "name": name,
        "hash": "5eb63bbbe01eeed093cb22bb8f5acdc3",
        "size": 11,
        "created": 1700000000,
        "url": format!("https://rapidgator.net/file/{}/{}.html", file_id, name)
    })
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/user/login"))
        .and(query_param("login", USERNAME))
        .and(query_param("password", PASSWORD))
        .respond_with(ok(json!({ "token": TOKEN, "user": user_json() })))
        .mount(server)
        .await;
}

/// 已收到的请求中指定路径的查询参数
#[allow(unused)]
pub async fn query_of(server: &MockServer, request_path: &str) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .last()
        .map(|r| r.url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}
