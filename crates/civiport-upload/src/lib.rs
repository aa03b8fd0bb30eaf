//! # civiport-upload
//!
//! Validation pipeline for untrusted file uploads: size bounds, an
//! every-segment extension blocklist, filename sanitization, magic-byte
//! verification against the declared content type, a content threat scan,
//! and a per-user rate ceiling. Files that pass every stage receive a
//! generated storage name; the original filename is only ever surfaced in
//! sanitized form for display.

pub mod error;
pub mod extension;
pub mod filename;
pub mod magic;
pub mod rate;
pub mod scanner;
pub mod validator;

pub use error::UploadError;
pub use rate::UploadRateLimiter;
pub use validator::{UploadValidator, ValidationOptions};
