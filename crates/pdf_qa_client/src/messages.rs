//! Client ↔ server JSON types for the HTTP contract (see client.rs).

use serde::{Deserialize, Serialize};

/// Client → server: chat query body for `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
}

/// Server → client: chat answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Server → client: upload receipt from `POST /upload_pdf`.
/// The server also returns the inserted chunk ids; only the count is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    pub chunks_stored: u64,
}

/// Server → client: one row of `GET /pdfs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    /// ISO timestamp; may be absent for rows stored before the server recorded it.
    #[serde(default)]
    pub upload_date: Option<String>,
}

/// Server → client: one extracted text chunk of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentChunk {
    pub chunk_index: u64,
    pub text: String,
}

/// Server → client: full document view from `GET /pdf/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentDetail {
    pub filename: String,
    pub chunks: Vec<DocumentChunk>,
}

/// Server → client: health message from `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Server → client: structured error body attached to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
