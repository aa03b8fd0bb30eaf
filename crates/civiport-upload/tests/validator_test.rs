//! Integration tests for the upload pipeline over the in-memory counter
//! store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use civiport_cache::MemoryCounterStore;
use civiport_core::config::upload::UploadConfig;
use civiport_core::result::AppResult;
use civiport_entity::audit::{AuditAction, AuditEvent};
use civiport_entity::store::AuditSink;
use civiport_entity::upload::FileUpload;
use civiport_upload::{UploadError, UploadValidator, ValidationOptions};

/// Audit sink that captures emitted events for assertions.
#[derive(Default)]
struct CaptureSink {
    events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditSink for CaptureSink {
    async fn emit(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

struct Setup {
    validator: UploadValidator,
    audit: Arc<CaptureSink>,
    opts: ValidationOptions,
}

fn setup(config: UploadConfig) -> Setup {
    let audit = Arc::new(CaptureSink::default());
    let opts = ValidationOptions::from_config(&config);
    let validator = UploadValidator::new(
        config,
        Arc::new(MemoryCounterStore::new()),
        Arc::clone(&audit) as Arc<dyn AuditSink>,
    );
    Setup {
        validator,
        audit,
        opts,
    }
}

fn default_setup() -> Setup {
    setup(UploadConfig::default())
}

/// A minimal but plausible JPEG: correct leading signature plus padding.
fn jpeg_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0");
    data.resize(len, 0xAB);
    data
}

fn upload(name: &str, declared: &str, data: Vec<u8>) -> FileUpload {
    FileUpload {
        user_id: Uuid::new_v4(),
        original_name: name.to_string(),
        declared_type: declared.to_string(),
        data,
    }
}

#[tokio::test]
async fn test_minimal_valid_jpeg_is_accepted() {
    let s = default_setup();
    let result = s
        .validator
        .validate(&upload("holiday photo.jpg", "image/jpeg", jpeg_bytes(256)), &s.opts)
        .await
        .unwrap();

    assert_eq!(result.detected_type, "image/jpeg");
    assert_eq!(result.size, 256);
    assert!(!result.sanitized_name.contains('/'));
    assert!(!result.sanitized_name.contains('\\'));
    assert!(result.storage_name.ends_with(".jpg"));
    assert_ne!(result.storage_name, result.sanitized_name);
}

#[tokio::test]
async fn test_double_extension_php_is_rejected() {
    let s = default_setup();
    let err = s
        .validator
        .validate(&upload("evil.php.jpg", "image/jpeg", jpeg_bytes(256)), &s.opts)
        .await
        .unwrap_err();

    // The blocked php segment wins even though the file ends in .jpg and
    // carries genuine JPEG bytes.
    assert_eq!(err.code(), "INVALID_EXTENSION");
    assert!(matches!(err, UploadError::InvalidExtension { segment } if segment == "php"));
}

#[tokio::test]
async fn test_wrong_png_magic_is_rejected() {
    let s = default_setup();
    let mut data = b"definitely not a png file".to_vec();
    data.resize(256, 0x00);

    let err = s
        .validator
        .validate(&upload("photo.png", "image/png", data), &s.opts)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MAGIC_BYTES_MISMATCH");
}

#[tokio::test]
async fn test_size_bounds() {
    let s = default_setup();

    let err = s
        .validator
        .validate(&upload("tiny.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]), &s.opts)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FILE_TOO_SMALL");

    let config = UploadConfig {
        max_bytes: 1024,
        ..UploadConfig::default()
    };
    let s = setup(config);
    let err = s
        .validator
        .validate(&upload("big.jpg", "image/jpeg", jpeg_bytes(2048)), &s.opts)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FILE_TOO_LARGE");
}

#[tokio::test]
async fn test_traversal_name_is_sanitized_not_rejected() {
    let s = default_setup();
    let result = s
        .validator
        .validate(
            &upload("..%2f..%2fshadow.jpg", "image/jpeg", jpeg_bytes(256)),
            &s.opts,
        )
        .await
        .unwrap();

    assert!(!result.sanitized_name.contains('/'));
    assert!(!result.warnings.is_empty());
}

#[tokio::test]
async fn test_embedded_script_warns_by_default() {
    let s = default_setup();
    let mut data = jpeg_bytes(64);
    data.extend_from_slice(b"<script>alert(1)</script>");

    let result = s
        .validator
        .validate(&upload("photo.jpg", "image/jpeg", data), &s.opts)
        .await
        .unwrap();
    assert!(result.warnings.iter().any(|w| w.contains("script_tag")));
}

#[tokio::test]
async fn test_embedded_script_rejects_in_strict_mode() {
    let config = UploadConfig {
        strict_mode: true,
        ..UploadConfig::default()
    };
    let s = setup(config);
    let mut data = jpeg_bytes(64);
    data.extend_from_slice(b"<script>alert(1)</script>");

    let err = s
        .validator
        .validate(&upload("photo.jpg", "image/jpeg", data), &s.opts)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MALICIOUS_CONTENT");
}

#[tokio::test]
async fn test_rate_ceiling_rejects_bursts() {
    let config = UploadConfig {
        uploads_per_minute: 2,
        ..UploadConfig::default()
    };
    let s = setup(config);
    let user = Uuid::new_v4();

    for _ in 0..2 {
        let mut u = upload("photo.jpg", "image/jpeg", jpeg_bytes(256));
        u.user_id = user;
        s.validator.validate(&u, &s.opts).await.unwrap();
    }

    let mut u = upload("photo.jpg", "image/jpeg", jpeg_bytes(256));
    u.user_id = user;
    let err = s.validator.validate(&u, &s.opts).await.unwrap_err();
    assert_eq!(err, UploadError::RateLimited);
}

#[tokio::test]
async fn test_rejection_emits_audit_event() {
    let s = default_setup();
    let u = upload("evil.php.jpg", "image/jpeg", jpeg_bytes(256));

    let _ = s.validator.validate(&u, &s.opts).await;

    let events = s.audit.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::UploadRejected);
    assert_eq!(events[0].actor_id, Some(u.user_id));
    let details = events[0].details.as_ref().unwrap();
    assert_eq!(details["code"], "INVALID_EXTENSION");
}

#[tokio::test]
async fn test_acceptance_emits_no_audit_event() {
    let s = default_setup();
    s.validator
        .validate(&upload("photo.jpg", "image/jpeg", jpeg_bytes(256)), &s.opts)
        .await
        .unwrap();
    assert!(s.audit.events.lock().unwrap().is_empty());
}
