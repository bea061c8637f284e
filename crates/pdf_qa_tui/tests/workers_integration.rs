//! Integration tests for the worker tasks: commands in, state snapshots out,
//! against a real in-process HTTP server (mockito).

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use pdf_qa_client::ApiClient;
use pdf_qa_tui::workers::{
    spawn_chat_worker, spawn_library_worker, ChatCommand, LibraryCommand,
};

/// Poll a watch channel until `pred` holds; panics after five seconds.
async fn wait_for<T: Clone>(
    rx: &mut watch::Receiver<T>,
    mut pred: impl FnMut(&T) -> bool,
) -> T {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let state = rx.borrow();
                if pred(&state) {
                    return state.clone();
                }
            }
            rx.changed()
                .await
                .expect("worker stopped before the condition was met");
        }
    })
    .await
    .expect("timed out waiting for state")
}

#[tokio::test]
async fn submit_command_round_trips_into_transcript() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answer":"X is Y"}"#)
        .create_async()
        .await;

    let api = Arc::new(ApiClient::new(&server.url()));
    let (cmd_tx, mut state_rx) = spawn_chat_worker(api);

    cmd_tx
        .send(ChatCommand::Submit("What is X?".into()))
        .unwrap();

    let session = wait_for(&mut state_rx, |s| {
        s.transcript().len() == 2 && !s.is_pending()
    })
    .await;

    assert_eq!(session.transcript()[1].text, "X is Y");
    assert!(session.error().is_none());
}

#[tokio::test]
async fn failed_submit_publishes_error_and_keeps_user_turn() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/chat")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Failed to generate answer."}"#)
        .create_async()
        .await;

    let api = Arc::new(ApiClient::new(&server.url()));
    let (cmd_tx, mut state_rx) = spawn_chat_worker(api);

    cmd_tx.send(ChatCommand::Submit("broken".into())).unwrap();

    let session = wait_for(&mut state_rx, |s| s.error().is_some()).await;

    assert_eq!(session.error(), Some("Failed to generate answer."));
    assert_eq!(session.transcript().len(), 1);
    assert!(!session.is_pending());
}

#[tokio::test]
async fn upload_command_publishes_receipt_and_refreshed_list() {
    let mut server = mockito::Server::new_async().await;
    let upload_mock = server
        .mock("POST", "/upload_pdf")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","chunks_stored":12,"ids":[]}"#)
        .expect(1)
        .create_async()
        .await;
    let list_mock = server
        .mock("GET", "/pdfs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"_id":"a1","filename":"report.pdf","upload_date":"2024-05-01T10:00:00"}]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"%PDF-1.4 test").unwrap();

    let api = Arc::new(ApiClient::new(&server.url()));
    let (cmd_tx, mut state_rx) = spawn_library_worker(api);

    cmd_tx.send(LibraryCommand::Upload(path)).unwrap();

    let library = wait_for(&mut state_rx, |l| {
        l.success().is_some() && !l.is_uploading() && !l.is_loading() && !l.documents().is_empty()
    })
    .await;

    upload_mock.assert_async().await;
    list_mock.assert_async().await;
    assert_eq!(
        library.success(),
        Some("Upload successful! Chunks stored: 12")
    );
    assert_eq!(library.documents()[0].filename, "report.pdf");
}

#[tokio::test]
async fn delete_failure_keeps_list_and_sets_error() {
    let mut server = mockito::Server::new_async().await;
    let list_mock = server
        .mock("GET", "/pdfs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"_id":"a1","filename":"report.pdf","upload_date":"2024-05-01T10:00:00"}]"#,
        )
        .expect(1)
        .create_async()
        .await;
    let _delete_mock = server
        .mock("DELETE", "/pdf/a1")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let api = Arc::new(ApiClient::new(&server.url()));
    let (cmd_tx, mut state_rx) = spawn_library_worker(api);

    cmd_tx.send(LibraryCommand::Refresh).unwrap();
    wait_for(&mut state_rx, |l| l.documents().len() == 1).await;

    cmd_tx.send(LibraryCommand::Delete("a1".into())).unwrap();
    let library = wait_for(&mut state_rx, |l| l.error().is_some()).await;

    assert_eq!(library.error(), Some("Failed to delete PDF"));
    assert_eq!(library.documents().len(), 1);
    // The failed delete triggered no refetch.
    list_mock.assert_async().await;
}

#[tokio::test]
async fn inspect_and_close_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/pdf/a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"filename":"report.pdf","chunks":[{"chunk_index":0,"text":"hello"}]}"#,
        )
        .create_async()
        .await;

    let api = Arc::new(ApiClient::new(&server.url()));
    let (cmd_tx, mut state_rx) = spawn_library_worker(api);

    cmd_tx.send(LibraryCommand::Inspect("a1".into())).unwrap();
    let library = wait_for(&mut state_rx, |l| l.detail().is_some()).await;
    assert_eq!(library.detail().unwrap().filename, "report.pdf");

    cmd_tx.send(LibraryCommand::CloseDetail).unwrap();
    let library = wait_for(&mut state_rx, |l| l.detail().is_none()).await;
    assert!(library.error().is_none());
}
