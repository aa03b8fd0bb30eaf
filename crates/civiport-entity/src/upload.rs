//! Upload input and validated descriptor models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An untrusted file upload, as received from the multipart boundary.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// The uploading account.
    pub user_id: Uuid,
    /// The client-declared filename. Never trusted for storage.
    pub original_name: String,
    /// The client-declared content type.
    pub declared_type: String,
    /// The raw file bytes.
    pub data: Vec<u8>,
}

/// Descriptor produced only when an upload passes every validation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Sanitized display filename. Safe to show; never used for storage.
    pub sanitized_name: String,
    /// Content type confirmed from magic bytes, not the client declaration.
    pub detected_type: String,
    /// Generated storage-safe filename.
    pub storage_name: String,
    /// File size in bytes.
    pub size: u64,
    /// Non-fatal observations collected during validation.
    pub warnings: Vec<String>,
}
