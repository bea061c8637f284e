//! HTTP client for the Q&A server: ask, upload, list, inspect, delete, health.
//!
//! Every method is one round trip. Failures of any kind (unreachable server,
//! non-2xx status, malformed body) are normalized into a single `ApiError`
//! message: the server's `{detail}` field when it sent one, otherwise a fixed
//! per-operation fallback. Callers never see transport detail.

use std::path::Path;

use crate::messages::{
    ChatRequest, ChatResponse, DocumentDetail, DocumentRecord, ErrorBody, HealthResponse,
    UploadReceipt,
};

const ASK_FALLBACK: &str = "Failed to fetch chat response";
const UPLOAD_FALLBACK: &str = "Failed to upload PDF";
const LIST_FALLBACK: &str = "Failed to fetch PDFs";
const GET_FALLBACK: &str = "Failed to fetch PDF data";
const DELETE_FALLBACK: &str = "Failed to delete PDF";
const HEALTH_FALLBACK: &str = "Failed to reach server";

/// Normalized request error; the message is ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub String);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl From<String> for ApiError {
    fn from(s: String) -> Self {
        ApiError(s)
    }
}

/// Gateway to the Q&A server. Holds no mutable state between calls; clone or
/// share it freely across the chat and library sides.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /` — server liveness message.
    pub async fn health(&self) -> Result<String, ApiError> {
        let url = format!("{}/", self.base_url);
        tracing::debug!(url = %url, "checking server health");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(HEALTH_FALLBACK, &e))?;
        let response = check_status(response, HEALTH_FALLBACK).await?;
        let body: HealthResponse = response
            .json()
            .await
            .map_err(|e| transport_error(HEALTH_FALLBACK, &e))?;
        Ok(body.message)
    }

    /// `POST /chat` — ask a question against the stored documents.
    pub async fn ask(&self, query: &str) -> Result<String, ApiError> {
        let url = format!("{}/chat", self.base_url);
        tracing::debug!(url = %url, query_len = query.len(), "sending chat query");
        let response = self
            .http
            .post(&url)
            .json(&ChatRequest { query })
            .send()
            .await
            .map_err(|e| transport_error(ASK_FALLBACK, &e))?;
        let response = check_status(response, ASK_FALLBACK).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| transport_error(ASK_FALLBACK, &e))?;
        Ok(body.answer)
    }

    /// `POST /upload_pdf` — upload one PDF as a multipart form, field `file`.
    pub async fn upload_pdf(&self, path: &Path) -> Result<UploadReceipt, ApiError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.pdf")
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| transport_error(UPLOAD_FALLBACK, &e))?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.clone())
            .mime_str("application/pdf")
            .map_err(|e| transport_error(UPLOAD_FALLBACK, &e))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/upload_pdf", self.base_url);
        tracing::debug!(url = %url, filename = %filename, "uploading PDF");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(UPLOAD_FALLBACK, &e))?;
        let response = check_status(response, UPLOAD_FALLBACK).await?;
        response
            .json()
            .await
            .map_err(|e| transport_error(UPLOAD_FALLBACK, &e))
    }

    /// `GET /pdfs` — current document records, one per stored PDF.
    pub async fn list_documents(&self) -> Result<Vec<DocumentRecord>, ApiError> {
        let url = format!("{}/pdfs", self.base_url);
        tracing::debug!(url = %url, "fetching document list");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(LIST_FALLBACK, &e))?;
        let response = check_status(response, LIST_FALLBACK).await?;
        response
            .json()
            .await
            .map_err(|e| transport_error(LIST_FALLBACK, &e))
    }

    /// `GET /pdf/{id}` — filename plus the ordered extracted chunks.
    pub async fn get_document(&self, id: &str) -> Result<DocumentDetail, ApiError> {
        let url = format!("{}/pdf/{}", self.base_url, id);
        tracing::debug!(url = %url, "fetching document detail");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(GET_FALLBACK, &e))?;
        let response = check_status(response, GET_FALLBACK).await?;
        response
            .json()
            .await
            .map_err(|e| transport_error(GET_FALLBACK, &e))
    }

    /// `DELETE /pdf/{id}` — remove a stored PDF; the response body is unused.
    pub async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/pdf/{}", self.base_url, id);
        tracing::debug!(url = %url, "deleting document");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport_error(DELETE_FALLBACK, &e))?;
        check_status(response, DELETE_FALLBACK).await?;
        Ok(())
    }
}

/// Pass 2xx responses through; otherwise surface the server's `detail` when it
/// sent a structured body, else the operation fallback.
async fn check_status(response: reqwest::Response, fallback: &str) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    tracing::warn!(status = %status, fallback = %fallback, "server returned error status");
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    Err(ApiError(detail.unwrap_or_else(|| fallback.to_string())))
}

fn transport_error(fallback: &str, source: &dyn std::fmt::Display) -> ApiError {
    tracing::warn!(error = %source, fallback = %fallback, "request failed");
    ApiError(fallback.to_string())
}
