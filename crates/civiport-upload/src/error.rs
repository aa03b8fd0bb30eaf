//! Typed rejection codes for the upload pipeline.

use thiserror::Error;
use tracing::error;

use civiport_core::error::AppError;

/// Why an upload was rejected. Every variant maps to a stable machine
/// code via [`UploadError::code`], which is what the upload boundary
/// returns to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Below the minimum size. Rejects empty placeholder files.
    #[error("File is too small ({size} bytes, minimum {min})")]
    FileTooSmall {
        /// Actual size in bytes.
        size: u64,
        /// Configured minimum.
        min: u64,
    },
    /// Above the maximum size.
    #[error("File is too large ({size} bytes, maximum {max})")]
    FileTooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Configured maximum.
        max: u64,
    },
    /// A filename segment is on the blocklist, or the final extension is
    /// not allowed for the declared content type.
    #[error("File extension is not allowed: {segment}")]
    InvalidExtension {
        /// The offending dot-separated segment.
        segment: String,
    },
    /// Sanitization left nothing usable of the filename.
    #[error("Filename is invalid")]
    InvalidFilename,
    /// The leading bytes do not match the declared content type.
    #[error("File content does not match the declared type {declared}")]
    MagicBytesMismatch {
        /// The client-declared content type.
        declared: String,
    },
    /// The content scan found an embedded threat (strict mode only).
    #[error("File content was flagged as potentially malicious: {pattern}")]
    MaliciousContent {
        /// Name of the matched threat pattern.
        pattern: String,
    },
    /// The per-user upload ceiling was exceeded.
    #[error("Too many uploads. Please wait a moment and try again")]
    RateLimited,
    /// Generic replacement for infrastructure failures; the cause is
    /// logged before conversion.
    #[error("Service temporarily unavailable. Please try again later")]
    Unavailable,
}

impl UploadError {
    /// Stable machine-readable rejection code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileTooSmall { .. } => "FILE_TOO_SMALL",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::InvalidExtension { .. } => "INVALID_EXTENSION",
            Self::InvalidFilename => "INVALID_FILENAME",
            Self::MagicBytesMismatch { .. } => "MAGIC_BYTES_MISMATCH",
            Self::MaliciousContent { .. } => "MALICIOUS_CONTENT",
            Self::RateLimited => "RATE_LIMITED",
            Self::Unavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl From<AppError> for UploadError {
    fn from(err: AppError) -> Self {
        error!(kind = %err.kind, error = %err, "Infrastructure failure during upload validation");
        Self::Unavailable
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match &err {
            UploadError::RateLimited => AppError::rate_limit(err.to_string()),
            UploadError::Unavailable => AppError::service_unavailable(err.to_string()),
            _ => AppError::validation(err.to_string()),
        }
    }
}
