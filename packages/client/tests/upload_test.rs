//! Upload tests against an in-process relay.

use irori_client::{endpoint, error::ClientError, upload::upload_file};
use irori_server::{config::ServerConfig, ui::Server};

async fn start_server(upload_dir: &std::path::Path) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        ..ServerConfig::default()
    };
    let server = Server::from_config(&config).await.unwrap();
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.run_until(listener, std::future::pending()));
    format!("ws://{}/ws", addr)
}

#[tokio::test]
async fn test_upload_file_returns_stored_name() {
    // テスト項目: ファイルをアップロードすると拡張子を保った保存名が返る
    // given (前提条件):
    let upload_dir = tempfile::tempdir().unwrap();
    let ws_url = start_server(upload_dir.path()).await;
    let source_dir = tempfile::tempdir().unwrap();
    let path = source_dir.path().join("notes.txt");
    std::fs::write(&path, "remember the milk").unwrap();
    let base = endpoint::http_base_url(&ws_url).unwrap();

    // when (操作):
    let name = upload_file(
        &reqwest::Client::new(),
        endpoint::upload_url(&base).unwrap(),
        &path,
    )
    .await
    .unwrap();

    // then (期待する結果):
    assert!(name.ends_with(".txt"));
    assert_eq!(
        std::fs::read_to_string(upload_dir.path().join(&name)).unwrap(),
        "remember the milk"
    );
    let downloaded = reqwest::get(endpoint::file_url(&base, &name))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(downloaded, "remember the milk");
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    // テスト項目: 存在しないファイルのアップロードは送信前に I/O エラーになる
    // given (前提条件):
    let base = endpoint::http_base_url("ws://127.0.0.1:9/ws").unwrap();

    // when (操作):
    let result = upload_file(
        &reqwest::Client::new(),
        endpoint::upload_url(&base).unwrap(),
        std::path::Path::new("/definitely/not/here.png"),
    )
    .await;

    // then (期待する結果):
    assert!(matches!(result, Err(ClientError::Io(_))));
}
