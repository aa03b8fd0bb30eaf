//! # civiport-core
//!
//! Core crate for the CiviPort security core. Contains configuration
//! schemas, the counter-store trait backing all throttling state, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other CiviPort crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
