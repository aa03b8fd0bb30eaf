//! # civiport-entity
//!
//! Domain entity models for the CiviPort security core. Every struct in
//! this crate represents a database table row or a domain value object.
//! All entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.
//!
//! The storage boundary traits ([`store::AccountRepository`],
//! [`store::GrantRepository`], [`store::AuditSink`]) also live here so that
//! both the persistence crate and the security logic can depend on them
//! without depending on each other.

pub mod account;
pub mod audit;
pub mod permission;
pub mod store;
pub mod upload;

pub use account::{Account, Role};
pub use audit::{AuditAction, AuditEvent};
pub use permission::{NewGrant, PermissionCode, PermissionGrant};
pub use upload::{FileUpload, UploadedFile};
