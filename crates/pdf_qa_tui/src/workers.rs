//! Background workers owning the chat and library managers.
//!
//! Each worker receives commands over an unbounded mpsc channel, owns its
//! manager exclusively, and publishes a state snapshot over a watch channel
//! after every transition (so the UI sees the pending states too). Commands
//! within one worker are processed strictly in order; the two workers run
//! independently, so chat and library requests interleave freely while each
//! side's chained continuations (refresh after a successful upload or delete)
//! stay sequenced.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use pdf_qa_client::{ApiClient, ChatSession, Library};

/// Chat view → chat worker.
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Submit one question; ignored while a query is pending or when blank.
    Submit(String),
}

/// Library view → library worker.
#[derive(Debug, Clone)]
pub enum LibraryCommand {
    /// Refetch the document list.
    Refresh,
    /// Upload one PDF; ignored while an upload is in flight.
    Upload(PathBuf),
    /// Open the detail view for a document id.
    Inspect(String),
    /// Close the detail view (no network call).
    CloseDetail,
    /// Delete a document by id.
    Delete(String),
}

/// Spawn the chat worker. The task ends when the command sender is dropped.
pub fn spawn_chat_worker(
    api: Arc<ApiClient>,
) -> (mpsc::UnboundedSender<ChatCommand>, watch::Receiver<ChatSession>) {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<ChatCommand>();
    let (state_tx, state_rx) = watch::channel(ChatSession::new());

    tokio::spawn(async move {
        let mut session = ChatSession::new();
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                ChatCommand::Submit(query) => {
                    if !session.begin_submit(&query) {
                        continue;
                    }
                    let _ = state_tx.send(session.clone());
                    let outcome = api.ask(&query).await;
                    session.complete_submit(outcome);
                    let _ = state_tx.send(session.clone());
                }
            }
        }
    });

    (cmd_tx, state_rx)
}

/// Spawn the library worker. The task ends when the command sender is dropped.
pub fn spawn_library_worker(
    api: Arc<ApiClient>,
) -> (mpsc::UnboundedSender<LibraryCommand>, watch::Receiver<Library>) {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<LibraryCommand>();
    let (state_tx, state_rx) = watch::channel(Library::new());

    tokio::spawn(async move {
        let mut library = Library::new();
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                LibraryCommand::Refresh => {
                    run_refresh(&mut library, &api, &state_tx).await;
                }
                LibraryCommand::Upload(path) => {
                    if !library.begin_upload() {
                        continue;
                    }
                    let _ = state_tx.send(library.clone());
                    let outcome = api.upload_pdf(&path).await;
                    let refetch = library.complete_upload(outcome);
                    let _ = state_tx.send(library.clone());
                    if refetch {
                        run_refresh(&mut library, &api, &state_tx).await;
                    }
                }
                LibraryCommand::Inspect(id) => {
                    library.begin_inspect();
                    let _ = state_tx.send(library.clone());
                    let outcome = api.get_document(&id).await;
                    library.complete_inspect(outcome);
                    let _ = state_tx.send(library.clone());
                }
                LibraryCommand::CloseDetail => {
                    library.close_detail();
                    let _ = state_tx.send(library.clone());
                }
                LibraryCommand::Delete(id) => {
                    library.begin_remove();
                    let _ = state_tx.send(library.clone());
                    let outcome = api.delete_document(&id).await;
                    if library.complete_remove(outcome) {
                        run_refresh(&mut library, &api, &state_tx).await;
                    } else {
                        let _ = state_tx.send(library.clone());
                    }
                }
            }
        }
    });

    (cmd_tx, state_rx)
}

async fn run_refresh(
    library: &mut Library,
    api: &ApiClient,
    state_tx: &watch::Sender<Library>,
) {
    library.begin_refresh();
    let _ = state_tx.send(library.clone());
    let outcome = api.list_documents().await;
    library.complete_refresh(outcome);
    let _ = state_tx.send(library.clone());
}
