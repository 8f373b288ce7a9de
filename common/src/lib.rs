//! Background Remover Common Library
//!
//! CLIとWeb(WASM)で共有されるクライアントの状態機械と型

pub mod client;
pub mod endpoints;
pub mod error;
pub mod preview;
pub mod reply;
pub mod types;
pub mod validation;

pub use client::{Completion, DownloadRequest, FileInput, PreviewTicket, UiState, UploadClient, UploadTicket};
pub use endpoints::{ApiBase, DEFAULT_API_BASE, download_file_name};
pub use error::{Result, UploadError, ValidationError};
pub use preview::PreviewHandle;
pub use reply::interpret_upload_reply;
pub use types::{CleanupResponse, ErrorBody, HealthStatus, HttpReply, SelectedFile, UploadResponse};
pub use validation::{ACCEPT_FILTER, ALLOWED_EXTENSIONS, validate_image};
