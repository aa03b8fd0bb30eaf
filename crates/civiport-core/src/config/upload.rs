//! Upload validation configuration.

use serde::{Deserialize, Serialize};

/// File upload validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Minimum accepted file size in bytes. Rejects empty placeholder files.
    #[serde(default = "default_min_bytes")]
    pub min_bytes: u64,
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// Maximum length of a sanitized display filename.
    #[serde(default = "default_max_filename_length")]
    pub max_filename_length: usize,
    /// Maximum uploads per user per minute.
    #[serde(default = "default_uploads_per_minute")]
    pub uploads_per_minute: u32,
    /// Whether content-scan hits reject the file instead of producing warnings.
    #[serde(default)]
    pub strict_mode: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            min_bytes: default_min_bytes(),
            max_bytes: default_max_bytes(),
            max_filename_length: default_max_filename_length(),
            uploads_per_minute: default_uploads_per_minute(),
            strict_mode: false,
        }
    }
}

fn default_min_bytes() -> u64 {
    32
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_max_filename_length() -> usize {
    120
}

fn default_uploads_per_minute() -> u32 {
    20
}
