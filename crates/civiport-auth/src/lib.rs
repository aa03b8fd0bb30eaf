//! # civiport-auth
//!
//! The CiviPort security core: credential authentication with adaptive
//! lockout, an optional TOTP second factor with single-use backup codes,
//! session token issuance and verification, RBAC permission resolution,
//! and request-level authorization guards.
//!
//! ## Modules
//!
//! - `authenticator` — the login state machine
//! - `throttle` — failure trackers over a pluggable counter store
//! - `password` — Argon2id password hashing and policy enforcement
//! - `twofactor` — TOTP verification, enrollment, and backup codes
//! - `session` — signed session claims: issue, verify, reissue
//! - `rbac` — role defaults and the permission resolver
//! - `guard` — pure allow/deny decision functions

pub mod audit;
pub mod authenticator;
pub mod error;
pub mod guard;
pub mod password;
pub mod rbac;
pub mod session;
pub mod throttle;
pub mod twofactor;

pub use audit::TracingAuditSink;
pub use authenticator::{AuthSuccess, Authenticator};
pub use error::{AccessError, AuthError};
pub use guard::{require_any_role, require_authenticated, require_min_role};
pub use rbac::{PermissionResolver, RoleDefaults};
pub use session::{SessionClaims, SessionIssuer, SessionVerifier, SignedSession};
pub use throttle::AttemptTracker;
pub use twofactor::{TotpEnrollment, TotpVerifier};
