//! Shared PDF Q&A client library (config, HTTP gateway, chat session and
//! document library state). Used by the terminal UI and the `pdf-qa` CLI.

pub mod client;
pub mod config;
pub mod library;
pub mod messages;
pub mod session;

pub use client::{ApiClient, ApiError};
pub use config::{default_config_path, Config, ConfigError, ServerSection};
pub use library::Library;
pub use messages::{DocumentChunk, DocumentDetail, DocumentRecord, UploadReceipt};
pub use session::{ChatSession, Role, Turn};
