//! Permission catalogue and per-account grants.

pub mod code;
pub mod grant;

pub use code::PermissionCode;
pub use grant::{NewGrant, PermissionGrant};
