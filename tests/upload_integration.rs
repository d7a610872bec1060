//! 上传协商与数据发送

mod common;

use common::*;
use rapidgator::netdisk::{UploadState, UploadStateLabel};
use rapidgator::{Error, UploadRequest};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const HELLO: &[u8] = b"hello world";
const HELLO_MD5: &str = "5eb63bbbe01eeed093cb22bb8f5acdc3";

fn pending_session(upload_url: &str) -> serde_json::Value {
    json!({
        "upload": {
            "upload_id": "u1",
            "url": upload_url,
            "file": null,
            "state": 0,
            "state_label": "Uploading"
        }
    })
}

#[tokio::test]
async fn test_negotiation_params() {
    let (server, client) = setup_logged_in().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/file/upload"))
        .and(query_param("name", "hello.txt"))
        .and(query_param("hash", HELLO_MD5))
        .and(query_param("size", "11"))
        .and(query_param("folder_id", "1"))
        .and(query_param("token", TOKEN))
        .respond_with(ok(pending_session("https://upload.rapidgator.net/u1")))
        .expect(2)
        .mount(&server)
        .await;

    // 内存数据与同内容的文件得到相同的协商参数
    let from_bytes = UploadRequest::from_bytes("hello.txt", HELLO);
    let envelope = client.upload(&from_bytes).await.unwrap();
    let session = envelope.into_response().unwrap().upload;
    assert_eq!(session.state, UploadState::Uploading);
    assert!(session.needs_data());

    let dir = tempfile::TempDir::new().unwrap();
    let file_path = dir.path().join("hello.txt");
    std::fs::write(&file_path, HELLO).unwrap();
    let from_path = UploadRequest::from_path(&file_path);
    client.upload(&from_path).await.unwrap();

    let query = query_of(&server, "/api/v2/file/upload").await;
    assert!(query.iter().all(|(k, _)| k != "multipart"));
}

#[tokio::test]
async fn test_negotiation_folder_and_multipart() {
    let (server, client) = setup_logged_in().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/file/upload"))
        .and(query_param("folder_id", "7"))
        .and(query_param("multipart", "true"))
        .respond_with(ok(pending_session("https://upload.rapidgator.net/u1")))
        .expect(1)
        .mount(&server)
        .await;

    let request = UploadRequest::from_bytes("hello.txt", HELLO)
        .folder("7")
        .multipart(true);
    client.upload(&request).await.unwrap();
}

#[tokio::test]
async fn test_upload_and_send_posts_data() {
    let (server, client) = setup_logged_in().await;
    let upload_url = format!("{}/upload/u1", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v2/file/upload"))
        .respond_with(ok(pending_session(&upload_url)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/file/upload_info"))
        .and(query_param("upload_id", "u1"))
        .respond_with(ok(json!({
            "upload": {
                "upload_id": "u1",
                "url": upload_url,
                "file": [file_json("f1", "1", "hello.txt")],
                "state": 2,
                "state_label": "Done"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .upload_and_send(UploadRequest::from_bytes("hello.txt", HELLO))
        .await
        .unwrap();
    assert_eq!(envelope.into_response().unwrap().upload.upload_id, "u1");

    let body = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path() == "/upload/u1")
        .unwrap()
        .body;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("filename=\"hello.txt\""));
    assert!(body.contains("hello world"));

    let state = client.get_upload_session_state("u1").await.unwrap();
    let session = state.into_response().unwrap().upload;
    assert!(session.state.is_success());
    assert_eq!(session.state_label, Some(UploadStateLabel::Done));
    assert_eq!(session.file[0].file_id, "f1");
}

#[tokio::test]
async fn test_instant_upload_skips_data() {
    let (server, client) = setup_logged_in().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/file/upload"))
        .respond_with(ok(json!({
            "upload": {
                "upload_id": "u2",
                "url": null,
                "file": file_json("f9", "1", "hello.txt"),
                "state": 2,
                "state_label": "Done"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let envelope = client
        .upload_and_send(UploadRequest::from_bytes("hello.txt", HELLO))
        .await
        .unwrap();
    let session = envelope.into_response().unwrap().upload;
    assert!(session.is_instant());
    assert_eq!(session.file[0].file_id, "f9");
}

#[tokio::test]
async fn test_upload_data_error_status() {
    let (server, client) = setup_logged_in().await;

    Mock::given(method("POST"))
        .and(path("/upload/u1"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&server)
        .await;

    let url = format!("{}/upload/u1", server.uri());
    let err = client
        .upload_data(&url, "big.bin", vec![0u8; 1024])
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(413));
}

#[tokio::test]
async fn test_upload_preconditions_send_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    assert!(matches!(
        client.upload(&UploadRequest::from_bytes("", HELLO)).await,
        Err(Error::EmptyName)
    ));
    assert!(matches!(
        client.upload(&UploadRequest::new("hello.txt")).await,
        Err(Error::MissingDataSource)
    ));
    assert!(matches!(
        client.upload(&UploadRequest::from_bytes("hello.txt", HELLO)).await,
        Err(Error::NotLoggedIn)
    ));
}
