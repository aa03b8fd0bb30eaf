//! The ordered upload validation pipeline.

use std::sync::Arc;

use chrono::Utc;
use rand::RngCore;
use tracing::{debug, info};

use civiport_core::config::upload::UploadConfig;
use civiport_core::traits::counter::CounterStore;
use civiport_entity::audit::{AuditAction, AuditEvent};
use civiport_entity::store::AuditSink;
use civiport_entity::upload::{FileUpload, UploadedFile};

use crate::error::UploadError;
use crate::rate::UploadRateLimiter;
use crate::{extension, filename, magic, scanner};

/// Per-call validation options.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Whether to run the content threat scan.
    pub check_content: bool,
    /// Whether content-scan hits reject the file instead of producing
    /// warnings.
    pub strict_mode: bool,
}

impl ValidationOptions {
    /// Options derived from configuration, with the scan enabled.
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            check_content: true,
            strict_mode: config.strict_mode,
        }
    }
}

/// Runs every validation stage in a fixed order, short-circuiting on the
/// first hard failure:
///
/// size, extension, filename sanitization, magic bytes, content scan,
/// rate limit. A descriptor is only ever produced for a file that passed
/// all of them. Rejections are audited.
#[derive(Clone)]
pub struct UploadValidator {
    /// Size, length, and rate policy.
    config: UploadConfig,
    /// Per-user rate limiter.
    limiter: UploadRateLimiter,
    /// Audit event sink.
    audit: Arc<dyn AuditSink>,
}

impl std::fmt::Debug for UploadValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadValidator")
            .field("config", &self.config)
            .finish()
    }
}

impl UploadValidator {
    /// Creates a validator over the given counter store and audit sink.
    pub fn new(
        config: UploadConfig,
        counter_store: Arc<dyn CounterStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let limiter = UploadRateLimiter::new(counter_store, config.uploads_per_minute);
        Self {
            config,
            limiter,
            audit,
        }
    }

    /// Validates an untrusted upload. On rejection an audit event carrying
    /// the rejection code is emitted before the error is returned.
    pub async fn validate(
        &self,
        upload: &FileUpload,
        opts: &ValidationOptions,
    ) -> Result<UploadedFile, UploadError> {
        match self.run_pipeline(upload, opts).await {
            Ok(descriptor) => {
                info!(
                    user_id = %upload.user_id,
                    name = %descriptor.sanitized_name,
                    size = descriptor.size,
                    "Upload accepted"
                );
                Ok(descriptor)
            }
            Err(err) => {
                self.audit_rejection(upload, &err).await;
                Err(err)
            }
        }
    }

    async fn run_pipeline(
        &self,
        upload: &FileUpload,
        opts: &ValidationOptions,
    ) -> Result<UploadedFile, UploadError> {
        let size = upload.data.len() as u64;

        // Stage 1: size bounds.
        if size < self.config.min_bytes {
            return Err(UploadError::FileTooSmall {
                size,
                min: self.config.min_bytes,
            });
        }
        if size > self.config.max_bytes {
            return Err(UploadError::FileTooLarge {
                size,
                max: self.config.max_bytes,
            });
        }

        // Stage 2: extension blocklist and allow-list.
        extension::check(&upload.original_name, &upload.declared_type)?;

        // Stage 3: filename sanitization.
        let sanitized = filename::sanitize(&upload.original_name, self.config.max_filename_length)?;
        let mut warnings = sanitized.warnings;

        // Stage 4: magic bytes against the declared type.
        if !magic::matches_declared_type(&upload.data, &upload.declared_type) {
            return Err(UploadError::MagicBytesMismatch {
                declared: upload.declared_type.clone(),
            });
        }
        let detected_type = magic::detect(&upload.data)
            .unwrap_or(upload.declared_type.as_str())
            .to_string();

        // Stage 5: content threat scan.
        if opts.check_content {
            let findings = scanner::scan(&upload.data);
            if let Some(first) = findings.first() {
                if opts.strict_mode {
                    return Err(UploadError::MaliciousContent {
                        pattern: (*first).to_string(),
                    });
                }
                for finding in findings {
                    warnings.push(format!("content scan: {finding}"));
                }
            }
        }

        // Stage 6: rate ceiling, counted only for otherwise-valid files.
        if !self.limiter.try_acquire(upload.user_id).await? {
            return Err(UploadError::RateLimited);
        }

        let storage_name = generate_storage_name(&sanitized.name);
        debug!(user_id = %upload.user_id, storage_name = %storage_name, "Storage name generated");

        Ok(UploadedFile {
            sanitized_name: sanitized.name,
            detected_type,
            storage_name,
            size,
            warnings,
        })
    }

    async fn audit_rejection(&self, upload: &FileUpload, err: &UploadError) {
        let event = AuditEvent::now(Some(upload.user_id), None, AuditAction::UploadRejected)
            .with_details(serde_json::json!({
                "code": err.code(),
                "original_name": upload.original_name,
                "declared_type": upload.declared_type,
            }));
        if let Err(e) = self.audit.emit(event).await {
            tracing::warn!(error = %e, "Failed to emit audit event");
        }
    }
}

/// Builds a storage filename from a timestamp, a random component, and a
/// random hex suffix plus the validated extension. The original name is
/// never used for storage.
fn generate_storage_name(sanitized_name: &str) -> String {
    use rand::Rng;
    let mut rng = rand::rng();

    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let random: u32 = rng.random_range(0..1_000_000);
    let mut suffix = [0u8; 8];
    rng.fill_bytes(&mut suffix);

    match extension::final_extension(sanitized_name) {
        Some(ext) => format!("{timestamp}_{random:06}_{}.{ext}", hex::encode(suffix)),
        None => format!("{timestamp}_{random:06}_{}", hex::encode(suffix)),
    }
}
