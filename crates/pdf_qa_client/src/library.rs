//! Document library state: the server-backed list, a transient detail view,
//! and upload progress.
//!
//! The list is a read-through cache: it is replaced wholesale from `GET /pdfs`
//! after every mutating operation rather than patched locally, so what the
//! view shows always matches server state after each round trip. Each
//! `begin_*`/`complete_*` pair brackets one network call; the async methods
//! compose them and chain the post-mutation refresh in the success
//! continuation only.

use std::path::Path;

use crate::client::{ApiClient, ApiError};
use crate::messages::{DocumentDetail, DocumentRecord, UploadReceipt};

/// Document Library Manager. Plain owned state; one instance per admin view.
#[derive(Debug, Clone, Default)]
pub struct Library {
    documents: Vec<DocumentRecord>,
    detail: Option<DocumentDetail>,
    uploading: bool,
    loading: bool,
    success: Option<String>,
    error: Option<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn detail(&self) -> Option<&DocumentDetail> {
        self.detail.as_ref()
    }

    /// True while an upload is in flight (independent of the chat guard).
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// True while a list fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── list ────────────────────────────────────────────────────────────

    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// On success the cached list is replaced wholesale. On failure the error
    /// is recorded and the previous list stays displayed — a failed refresh
    /// never blanks the table.
    pub fn complete_refresh(&mut self, outcome: Result<Vec<DocumentRecord>, ApiError>) {
        match outcome {
            Ok(records) => self.documents = records,
            Err(e) => self.error = Some(e.0),
        }
        self.loading = false;
    }

    /// Fetch the current document list from the server.
    pub async fn refresh(&mut self, api: &ApiClient) {
        self.begin_refresh();
        let outcome = api.list_documents().await;
        self.complete_refresh(outcome);
    }

    // ── upload ──────────────────────────────────────────────────────────

    /// Guarded start of an upload; false (silent no-op) while one is already
    /// in flight. Clears the prior success and error messages.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        self.success = None;
        self.error = None;
        true
    }

    /// Settle the in-flight upload. Returns true on success, which obliges the
    /// caller to refresh the list next.
    pub fn complete_upload(&mut self, outcome: Result<UploadReceipt, ApiError>) -> bool {
        self.uploading = false;
        match outcome {
            Ok(receipt) => {
                self.success = Some(format!(
                    "Upload successful! Chunks stored: {}",
                    receipt.chunks_stored
                ));
                true
            }
            Err(e) => {
                self.error = Some(e.0);
                false
            }
        }
    }

    /// Upload one PDF, then refetch the list in the success continuation so
    /// the displayed rows reflect the post-upload server state. On failure the
    /// library is left unchanged. Returns whether a request was issued.
    pub async fn upload(&mut self, api: &ApiClient, path: &Path) -> bool {
        if !self.begin_upload() {
            return false;
        }
        let outcome = api.upload_pdf(path).await;
        if self.complete_upload(outcome) {
            self.refresh(api).await;
        }
        true
    }

    // ── detail ──────────────────────────────────────────────────────────

    pub fn begin_inspect(&mut self) {
        self.error = None;
    }

    /// On success the held detail is replaced wholesale; on failure the error
    /// is recorded and any previously open detail stays untouched.
    pub fn complete_inspect(&mut self, outcome: Result<DocumentDetail, ApiError>) {
        match outcome {
            Ok(detail) => self.detail = Some(detail),
            Err(e) => self.error = Some(e.0),
        }
    }

    /// Fetch and hold the detail view for one document.
    pub async fn inspect(&mut self, api: &ApiClient, id: &str) {
        self.begin_inspect();
        let outcome = api.get_document(id).await;
        self.complete_inspect(outcome);
    }

    /// Drop the held detail. No network call.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    // ── delete ──────────────────────────────────────────────────────────

    pub fn begin_remove(&mut self) {
        self.error = None;
    }

    /// Settle a delete. Returns true on success, which obliges the caller to
    /// refresh the list next; on failure the record remains listed.
    pub fn complete_remove(&mut self, outcome: Result<(), ApiError>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e.0);
                false
            }
        }
    }

    /// Delete one document, refetching the list in the success continuation.
    pub async fn remove(&mut self, api: &ApiClient, id: &str) {
        self.begin_remove();
        let outcome = api.delete_document(id).await;
        if self.complete_remove(outcome) {
            self.refresh(api).await;
        }
    }
}
